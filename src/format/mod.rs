//! Raw model text to display blocks.
//!
//! Sections are separated by blank lines. A section opening with a `#` run is a
//! heading; anything else is a paragraph whose line breaks are kept.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SECTION_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+(?:\s+|$)").unwrap());

const EMOJI_RANGE: std::ops::RangeInclusive<char> = '\u{1F300}'..='\u{1F9FF}';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayBlock {
    Heading { text: String },
    Paragraph { lines: Vec<String>, emphasized: bool },
}

impl DisplayBlock {
    /// Source text that formats back into this block.
    pub fn to_markdown(&self) -> String {
        match self {
            DisplayBlock::Heading { text } => format!("# {text}"),
            DisplayBlock::Paragraph { lines, .. } => lines.join("\n"),
        }
    }

    /// Copy-ready text without heading markers.
    pub fn plain_text(&self) -> String {
        match self {
            DisplayBlock::Heading { text } => text.clone(),
            DisplayBlock::Paragraph { lines, .. } => lines.join("\n"),
        }
    }
}

pub fn format(raw: &str) -> Vec<DisplayBlock> {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = normalized.trim();
    if text.is_empty() {
        return Vec::new();
    }

    SECTION_BREAK
        .split(text)
        .map(|section| classify(&strip_bold(section)))
        .collect()
}

/// Remove paired `**` delimiters on the same line, keeping what they enclose.
///
/// Pairs must enclose at least one character; a line is never emptied, so no
/// new blank-line section break can appear.
///
/// Runs until nothing changes, so applying it twice equals applying it once.
pub fn strip_bold(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = BOLD.replace_all(&current, "$1").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn classify(section: &str) -> DisplayBlock {
    if let Some(m) = HEADING.find(section) {
        return DisplayBlock::Heading {
            text: section[m.end()..].to_string(),
        };
    }
    DisplayBlock::Paragraph {
        lines: section.split('\n').map(str::to_string).collect(),
        emphasized: has_emoji(section),
    }
}

fn has_emoji(text: &str) -> bool {
    text.chars().any(|c| EMOJI_RANGE.contains(&c))
}

/// Rejoin blocks into text that `format` maps back to the same blocks.
pub fn to_markdown(blocks: &[DisplayBlock]) -> String {
    blocks
        .iter()
        .map(DisplayBlock::to_markdown)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn plain_text(blocks: &[DisplayBlock]) -> String {
    blocks
        .iter()
        .map(DisplayBlock::plain_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}
