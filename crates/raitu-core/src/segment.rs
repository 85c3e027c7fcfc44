//! Splits an assistant reply into labeled sections for display.
//! Sections start at a marker glyph; text without markers falls back to a generic section.

use std::fmt;

/// A recognized section marker, or one of the two fallback kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Crop,
    Status,
    Problem,
    Solution,
    Prevention,
    /// A chunk whose first line carries no marker glyph.
    Information,
    /// The whole reply, used when nothing else was produced.
    Analysis,
}

/// Labeled markers in the order they are tested against a head line.
pub const MARKERS: [Marker; 5] = [
    Marker::Crop,
    Marker::Status,
    Marker::Problem,
    Marker::Solution,
    Marker::Prevention,
];

impl Marker {
    /// Glyph shown next to the section title.
    pub fn glyph(self) -> &'static str {
        match self {
            Marker::Crop => "🌱",
            Marker::Status => "📊",
            Marker::Problem => "🐛",
            Marker::Solution => "💊",
            Marker::Prevention => "\u{1F6E1}\u{FE0F}",
            Marker::Information | Marker::Analysis => "📝",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Marker::Crop => "Crop Identified",
            Marker::Status => "Health Status",
            Marker::Problem => "Issue Detected",
            Marker::Solution => "Treatment",
            Marker::Prevention => "Prevention",
            Marker::Information => "Information",
            Marker::Analysis => "Analysis",
        }
    }

    /// Inline label the model writes after the glyph, e.g. `CROP:`.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Marker::Crop => Some("CROP:"),
            Marker::Status => Some("STATUS:"),
            Marker::Problem => Some("PROBLEM:"),
            Marker::Solution => Some("SOLUTION:"),
            Marker::Prevention => Some("PREVENTION:"),
            Marker::Information | Marker::Analysis => None,
        }
    }

    /// First code point of the glyph. Also matches a shield written without U+FE0F.
    fn lead(self) -> Option<char> {
        match self {
            Marker::Information | Marker::Analysis => None,
            m => m.glyph().chars().next(),
        }
    }

    /// Glyph spellings to strip together with the label, most specific first.
    fn spellings(self) -> impl Iterator<Item = String> {
        let full = self.glyph().to_string();
        let bare = self.lead().map(String::from).filter(|b| *b != full);
        std::iter::once(full).chain(bare)
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Marker::Information | Marker::Analysis)
    }

    fn for_head(head: &str) -> Option<Marker> {
        MARKERS
            .into_iter()
            .find(|m| m.lead().is_some_and(|c| head.contains(c)))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One labeled block of an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub marker: Marker,
    pub title: &'static str,
    pub body: String,
}

impl Section {
    fn new(marker: Marker, body: String) -> Self {
        Self {
            marker,
            title: marker.title(),
            body,
        }
    }
}

/// Segment a reply into sections. Never returns an empty list.
pub fn segment(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    for chunk in split_at_markers(text) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        let (head, tail) = match chunk.split_once('\n') {
            Some((head, tail)) => (head, tail.trim()),
            None => (chunk, ""),
        };
        match Marker::for_head(head) {
            Some(marker) => {
                let mut body = strip_label(head, marker).trim().to_string();
                if !tail.is_empty() {
                    body.push('\n');
                    body.push_str(tail);
                }
                if !body.is_empty() {
                    sections.push(Section::new(marker, body));
                }
            }
            None => sections.push(Section::new(Marker::Information, chunk.to_string())),
        }
    }
    if sections.is_empty() {
        tracing::debug!("no sections recognized; using whole reply");
        sections.push(Section::new(Marker::Analysis, text.to_string()));
    }
    sections
}

/// Render sections for a terminal: glyph and title, then the indented body.
pub fn render_sections(sections: &[Section]) -> String {
    let mut out = String::new();
    for (i, s) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(s.marker.glyph());
        out.push(' ');
        out.push_str(s.title);
        out.push('\n');
        for line in s.body.lines() {
            out.push_str("   ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Zero-width split before every marker glyph. The glyph begins the next chunk.
fn split_at_markers(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for (pos, c) in text.char_indices() {
        if pos > start && MARKERS.iter().any(|m| m.lead() == Some(c)) {
            chunks.push(&text[start..pos]);
            start = pos;
        }
    }
    chunks.push(&text[start..]);
    chunks
}

/// Removes the first `<glyph> <LABEL>` from the head line, if present.
fn strip_label(head: &str, marker: Marker) -> String {
    let Some(label) = marker.label() else {
        return head.to_string();
    };
    for glyph in marker.spellings() {
        let pattern = format!("{glyph} {label}");
        if head.contains(&pattern) {
            return head.replacen(&pattern, "", 1);
        }
    }
    head.to_string()
}
