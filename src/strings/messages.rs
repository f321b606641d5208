//! # Messages
//!
//! Contains constant strings and format functions for user-facing replies.
//! Replies are Telegram legacy Markdown (`*bold*`, `` `code` ``, ```` ``` ```` blocks).

/// Telegram rejects messages above 4096 characters.
pub const MESSAGE_LIMIT: usize = 4000;

/// Opening and closing fence around a log chunk, newlines included.
const FENCE_LEN: usize = 8;

pub const RUNNING_GLYPH: &str = "✅";
pub const STOPPED_GLYPH: &str = "🚫";

pub const UNAUTHORIZED: &str = "🚫 *UNAUTHORIZED* 🚫";
pub const NO_SERVICE_PROVIDED: &str = "No service provided";

/// `Unknown service: `a`` or `Unknown services: `a`, `b``
pub fn unknown_services(names: &[String]) -> String {
    let plural = if names.len() > 1 { "s" } else { "" };
    let listed = names
        .iter()
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Unknown service{plural}: {listed}")
}

pub fn service_status(service: &str, running: bool) -> String {
    if running {
        format!("{RUNNING_GLYPH} *{service}* - Running")
    } else {
        format!("{STOPPED_GLYPH} *{service}* - Not running")
    }
}

pub fn invalid_line_count(raw: &str) -> String {
    format!("Invalid line count: `{raw}`")
}

pub fn log_block(content: &str) -> String {
    format!("```\n{}\n```", content.trim_end_matches('\n'))
}

/// Split log output into code blocks that each fit in one message, fences included.
pub fn log_blocks(content: &str, limit: usize) -> Vec<String> {
    let body = content.trim_end_matches('\n');
    split_message(body, limit.saturating_sub(FENCE_LEN).max(1))
        .iter()
        .map(|chunk| log_block(chunk))
        .collect()
}

pub fn log_empty(path: &str) -> String {
    format!("`{path}` is empty")
}

/// Split on line boundaries so no chunk exceeds `limit` characters.
/// A single line longer than `limit` is hard-split.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let mut line = line;
        loop {
            let line_len = line.chars().count();
            if current_len + line_len <= limit {
                current.push_str(line);
                current_len += line_len;
                break;
            }
            if current_len > 0 {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            let split_at = line
                .char_indices()
                .nth(limit)
                .map(|(idx, _)| idx)
                .unwrap_or(line.len());
            chunks.push(line[..split_at].to_string());
            line = &line[split_at..];
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
