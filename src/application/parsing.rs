//! # Parsing Utils
//!
//! Turns inbound chat text into a `CommandInvocation`.

use crate::domain::types::CommandInvocation;

/// Parse `/name[@botname] arg1 arg2 ...`. Returns `None` for anything that is not a command,
/// and for commands addressed to a bot other than `bot_username`.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<CommandInvocation> {
    let rest = text.trim().strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let head = parts.next()?;

    // Group chats address commands as `/status@my_bot`.
    let (name, target) = match head.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (head, None),
    };
    if name.is_empty() {
        return None;
    }
    if let Some(target) = target {
        let ours = bot_username.is_some_and(|me| me.eq_ignore_ascii_case(target));
        if !ours {
            return None;
        }
    }

    Some(CommandInvocation {
        name: name.to_lowercase(),
        args: parts.map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_command() {
        let cmd = parse_command("/status", None).unwrap();
        assert_eq!(cmd.name, "status");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_parse_args() {
        let cmd = parse_command("  /log   lirc  20 ", None).unwrap();
        assert_eq!(cmd.name, "log");
        assert_eq!(cmd.args, vec!["lirc", "20"]);
    }

    #[test]
    fn test_strips_bot_suffix() {
        let cmd = parse_command("/Start@Home_Bot homebridge", Some("home_bot")).unwrap();
        assert_eq!(cmd.name, "start");
        assert_eq!(cmd.args, vec!["homebridge"]);
    }

    #[test]
    fn test_commands_for_other_bots() {
        assert!(parse_command("/stop@other_bot", Some("home_bot")).is_none());
        assert!(parse_command("/stop@home_bot_2", Some("home_bot")).is_none());
        // Without knowing our own name, no addressed command can be ours.
        assert!(parse_command("/stop@home_bot", None).is_none());
        assert!(parse_command("/stop", Some("home_bot")).is_some());
    }

    #[test]
    fn test_non_commands() {
        assert!(parse_command("status", None).is_none());
        assert!(parse_command("/", None).is_none());
        assert!(parse_command("/@bot", None).is_none());
        assert!(parse_command("", None).is_none());
    }
}
