//! Note text formatting and section location
//!
//! Inserts generated insights under a fixed markdown heading without
//! disturbing following sections, and parses previously inserted insights
//! back out of the note.

use crate::domain::models::Insight;

/// Heading under which insights are collected in the daily note
pub const MESSAGES_HEADER: &str = "### Messages from Today";

/// Render insights as markdown: a top-level bullet per message, with the
/// description on an indented bullet below it
pub fn format_insights(insights: &[Insight]) -> String {
    let mut lines = Vec::with_capacity(insights.len() * 2);
    for insight in insights {
        lines.push(format!("- {}", insight.message));
        lines.push(format!("\t- {}", insight.description));
    }
    lines.join("\n")
}

/// Byte offset of the newline preceding the next level 1-3 heading, if any
fn find_next_heading(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    for (idx, _) in text.match_indices('\n') {
        let mut pos = idx + 1;
        let mut hashes = 0;
        while pos < bytes.len() && bytes[pos] == b'#' && hashes < 4 {
            hashes += 1;
            pos += 1;
        }
        if (1..=3).contains(&hashes) && pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            return Some(idx);
        }
    }
    None
}

/// Insert rendered insights into the note under [`MESSAGES_HEADER`]
///
/// Creates the heading at the end of the note when absent. When the heading
/// exists, new insights land at the end of its section, before the next
/// level 1-3 heading; repeated calls accumulate rather than replace.
pub fn insert_insights(note: &str, insights: &[Insight]) -> String {
    let rendered = format_insights(insights);

    let Some(header_idx) = note.find(MESSAGES_HEADER) else {
        return format!("{}\n\n{}\n{}", note.trim_end(), MESSAGES_HEADER, rendered);
    };

    let header_end = header_idx + MESSAGES_HEADER.len();
    let before = &note[..header_end];
    let after = &note[header_end..];

    match find_next_heading(after) {
        Some(next) => {
            let existing = &after[..next];
            let remaining = &after[next..];
            format!(
                "{}{}\n{}\n{}",
                before,
                existing.trim_end(),
                rendered,
                remaining
            )
        }
        None => format!("{}\n{}\n{}", before, rendered, after.trim_end()),
    }
}

fn is_indented_bullet(line: &str) -> bool {
    let rest = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - rest.len()];
    (indent.contains('\t') || indent.len() >= 2) && rest.starts_with("- ")
}

fn indented_bullet_text(line: &str) -> String {
    line.trim_start_matches([' ', '\t'])
        .strip_prefix("- ")
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Parse insights back out of the note's [`MESSAGES_HEADER`] section
///
/// Scans only up to the next level 1-3 heading. A top-level `- ` bullet
/// starts a message; the first indented bullet after it supplies the
/// description, later ones are ignored.
pub fn parse_insights(note: &str) -> Vec<Insight> {
    let Some(header_idx) = note.find(MESSAGES_HEADER) else {
        return Vec::new();
    };

    let after = &note[header_idx + MESSAGES_HEADER.len()..];
    let section = match find_next_heading(after) {
        Some(next) => &after[..next],
        None => after,
    };

    let mut insights = Vec::new();
    let mut current: Option<(String, Option<String>)> = None;

    for line in section.lines() {
        if let Some(rest) = line.strip_prefix("- ") {
            if let Some((message, description)) = current.take() {
                insights.push(Insight::new(message, description.unwrap_or_default()));
            }
            let message = rest.trim();
            if !message.is_empty() {
                current = Some((message.to_string(), None));
            }
        } else if is_indented_bullet(line) {
            if let Some((_, description)) = current.as_mut() {
                if description.is_none() {
                    *description = Some(indented_bullet_text(line));
                }
            }
        }
    }

    if let Some((message, description)) = current {
        insights.push(Insight::new(message, description.unwrap_or_default()));
    }

    insights
}

/// Best-effort parse of a single insight from a user text selection
///
/// Accepts a bullet pair as rendered by [`format_insights`], but falls back
/// to treating the first line as the message and the second as the
/// description when the selection is not bullet-formatted.
pub fn parse_selection(selection: &str) -> Option<Insight> {
    let lines: Vec<&str> = selection
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut message = String::new();
    let mut description = String::new();

    for line in &lines {
        if let Some(rest) = line.strip_prefix("- ") {
            if message.is_empty() {
                message = rest.trim().to_string();
            } else if description.is_empty() {
                description = rest.trim().to_string();
            }
        }
    }

    if message.is_empty() {
        let first = lines.first()?;
        message = first.strip_prefix("- ").unwrap_or(first).trim().to_string();

        if let Some(second) = lines.get(1) {
            let stripped = second.strip_prefix('-').unwrap_or(second).trim_start();
            description = stripped.to_string();
        }
    }

    if message.is_empty() {
        return None;
    }

    Some(Insight {
        message,
        description,
    })
}
