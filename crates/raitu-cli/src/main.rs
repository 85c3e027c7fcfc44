//! CLI entry point for the Raitu backend (for dev and testing).

use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use raitu_core::chat::ChatSession;
use raitu_core::config::{config_path, load_config, save_config, Config};
use raitu_core::i18n::missing_keys;
use raitu_core::knowledge::{article, search, Category};
use raitu_core::{
    analyze_file, app_data_dir, image_data_uri, render_sections, segment, status, ApiClient,
    ConfigError, Language, Translator,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "raitu")]
#[command(about = "Raitu: organic farming advisory assistant")]
struct Cli {
    /// UI language (`en` or `te`). Defaults to the configured language.
    #[arg(long, global = true, value_name = "LANG")]
    lang: Option<Language>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show backend status (for dev).
    Status,
    /// Show where Raitu stores its config (app data directory).
    DataDir,
    /// Split an assistant reply into labeled sections.
    Segment {
        /// File holding the reply. Reads stdin when omitted.
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Look up a UI string.
    T {
        /// Translation key, e.g. `chat.title`.
        #[arg(value_name = "KEY", required_unless_present = "check")]
        key: Option<String>,
        /// Look the key up in the other language.
        #[arg(long)]
        toggle: bool,
        /// List keys missing from either language.
        #[arg(long)]
        check: bool,
    },
    /// Search the knowledge base.
    Knowledge {
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
        /// One of pest, nutrition, seasonal, water.
        #[arg(long)]
        category: Option<Category>,
        /// Show the full article with this id instead of searching.
        #[arg(long, conflicts_with_all = ["query", "category"])]
        id: Option<u32>,
    },
    /// Chat with the farming assistant.
    Chat,
    /// Analyze a crop photo.
    Scan {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Show or change settings.
    Config {
        /// Base URL of the remote functions host.
        #[arg(long)]
        endpoint: Option<String>,
        /// API key sent with every request.
        #[arg(long)]
        api_key: Option<String>,
        /// Default UI language.
        #[arg(long)]
        language: Option<Language>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config();
    let mut t = Translator::new(cli.lang.unwrap_or(config.language));

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {
            println!("Raitu backend");
            println!("  core: {}", status());
            println!("  language: {}", t.language());
            match &config.endpoint {
                Some(e) => println!("  endpoint: {}", e),
                None => println!("  endpoint: (not set)"),
            }
        }
        Commands::DataDir => match app_data_dir() {
            Some(p) => println!("{}", p.display()),
            None => {
                eprintln!("Could not determine app data directory.");
                return ExitCode::FAILURE;
            }
        },
        Commands::Segment { file } => {
            let text = match read_input(file.as_deref()) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            print!("{}", render_sections(&segment(&text)));
        }
        Commands::T { key, toggle, check } => {
            if check {
                let mut clean = true;
                for lang in [Language::En, Language::Te] {
                    for k in missing_keys(lang) {
                        clean = false;
                        println!("{}: missing {}", lang, k);
                    }
                }
                if clean {
                    println!("All keys present in both languages.");
                }
            }
            if let Some(key) = key {
                if toggle {
                    t.toggle_language();
                }
                println!("{}", t.lookup(&key));
            }
        }
        Commands::Knowledge { id: Some(id), .. } => match article(id) {
            Some(a) => {
                println!("{}", a.title);
                println!("[{}] {} · {} min", t.lookup(a.category.name_key()), a.kind, a.read_minutes);
                println!();
                println!("{}", a.description);
                println!();
                println!("{}", a.content);
            }
            None => {
                eprintln!("Error: no article with id {}", id);
                return ExitCode::FAILURE;
            }
        },
        Commands::Knowledge { query, category, id: None } => {
            let found = search(&query, category);
            println!("{}", t.lookup("knowledge.title"));
            if found.is_empty() {
                println!("  {}", t.lookup("knowledge.noResults"));
                println!("  {}", t.lookup("knowledge.noResultsDesc"));
            } else {
                let noun = if found.len() == 1 { "knowledge.article" } else { "knowledge.articles" };
                println!("{} {} {}", t.lookup("knowledge.showing"), found.len(), t.lookup(noun));
                for a in found {
                    println!();
                    println!("  #{} [{}] {}", a.id, t.lookup(a.category.name_key()), a.title);
                    println!("  {} · {} min", a.kind, a.read_minutes);
                    println!("  {}", a.description);
                }
            }
        }
        Commands::Chat => {
            let client = match config.client() {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = chat_loop(&client, &mut t).await {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Commands::Scan { path } => {
            let client = match config.client() {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            println!("{}", t.lookup("scan.analyzing"));
            match analyze_file(&client, &path).await {
                Ok(analysis) => {
                    println!("{}", t.lookup("scan.analysis"));
                    println!("{}", analysis);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        Commands::Config { endpoint, api_key, language } => {
            if endpoint.is_none() && api_key.is_none() && language.is_none() {
                match config_path() {
                    Some(p) => println!("config: {}", p.display()),
                    None => println!("config: (no app data directory)"),
                }
                println!("endpoint: {}", config.endpoint.as_deref().unwrap_or("(not set)"));
                println!("api key: {}", if config.api_key.is_some() { "(set)" } else { "(not set)" });
                println!("language: {}", config.language);
                return ExitCode::SUCCESS;
            }
            let mut updated = config.clone();
            let result = apply_config(&mut updated, endpoint.as_deref(), api_key, language)
                .and_then(|()| save_config(&updated));
            match result {
                Ok(()) => println!("Config saved."),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }
    ExitCode::SUCCESS
}

/// Apply whichever settings were given on the command line.
fn apply_config(
    config: &mut Config,
    endpoint: Option<&str>,
    api_key: Option<String>,
    language: Option<Language>,
) -> Result<(), ConfigError> {
    if let Some(url) = endpoint {
        config.set_endpoint(url)?;
    }
    if let Some(lang) = language {
        config.language = lang;
    }
    if let Some(key) = api_key {
        config.api_key = Some(key).filter(|k| !k.is_empty());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "raitu_core=debug,raitu=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
    }
}

/// Interactive chat. `/image PATH` attaches a photo to the next message,
/// `/lang` switches language, `/clear` resets the conversation, `/quit` exits.
async fn chat_loop(client: &ApiClient, t: &mut Translator) -> io::Result<()> {
    let mut session = ChatSession::new();
    let mut image: Option<String> = None;
    let stdin = io::stdin();

    println!("{}", t.lookup("chat.title"));
    println!("{}", t.lookup("chat.subtitle"));
    loop {
        print!("{} > ", t.lookup("chat.placeholder"));
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        // Keep the text as typed; only the line ending is dropped.
        let input = line.trim_end_matches(['\r', '\n']);
        let command = input.trim();
        match command.split_once(' ').map_or((command, ""), |(c, rest)| (c, rest.trim())) {
            ("/quit", _) => break,
            ("/lang", _) => {
                t.toggle_language();
                println!("{}", t.lookup("chat.title"));
                continue;
            }
            ("/clear", _) => {
                session.clear();
                image = None;
                continue;
            }
            ("/image", path) => {
                match image_data_uri(Path::new(path)) {
                    Ok(uri) => {
                        image = Some(uri);
                        println!("({} {})", t.lookup("chat.uploadImage"), path);
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
                continue;
            }
            _ => {}
        }
        if command.is_empty() && image.is_none() {
            continue;
        }

        println!("{}", t.lookup("chat.thinking"));
        let result = session.send(client, input, image.as_deref()).await;
        match result {
            Ok(reply) => {
                let sections = reply.sections().unwrap_or_default();
                println!();
                print!("{}", render_sections(&sections));
                println!();
                image = None;
            }
            Err(e) => {
                tracing::debug!(error = %e, "chat send failed");
                eprintln!("{} ({})", t.lookup("chat.error"), e);
                if image.is_some() {
                    println!("(image kept for the next message)");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_config_sets_given_fields() {
        let mut config = Config::default();
        apply_config(
            &mut config,
            Some("https://example.test/functions/v1"),
            Some("anon".to_string()),
            Some(Language::Te),
        )
        .unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("https://example.test/functions/v1"));
        assert_eq!(config.api_key.as_deref(), Some("anon"));
        assert_eq!(config.language, Language::Te);
    }

    #[test]
    fn apply_config_empty_key_clears_it() {
        let mut config = Config {
            api_key: Some("old".to_string()),
            ..Config::default()
        };
        apply_config(&mut config, None, Some(String::new()), None).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn apply_config_rejects_bad_endpoint() {
        let mut config = Config::default();
        assert!(apply_config(&mut config, Some("nope"), None, None).is_err());
        assert!(config.endpoint.is_none());
    }
}
