//! All backend logic independent of how the app is run.
//!
//! Assistant replies are split into labeled cards by [segment()]. UI strings come
//! from a [Translator] the caller owns. Remote analysis and chat are delegated to
//! an external functions host (see [client]); Raitu only stores its config in its
//! own app data directory (see [app_data]).

pub mod app_data;
pub mod chat;
pub mod client;
pub mod config;
pub mod i18n;
pub mod knowledge;
pub mod scan;
pub mod segment;

pub use app_data::app_data_dir;
pub use chat::{ChatError, ChatSession, Message};
pub use client::{ApiClient, ClientError, Role};
pub use config::{load_config, save_config, Config, ConfigError};
pub use i18n::{Language, Translator};
pub use knowledge::{Article, Category};
pub use scan::{analyze_file, image_data_uri, ScanError};
pub use segment::{render_sections, segment, Marker, Section};

/// Returns a short status string. Used to verify the backend is wired up.
pub fn status() -> &'static str {
    "raitu-core ready"
}
