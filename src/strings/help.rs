//! # Help Text
//!
//! Usage summary displayed via the `/help` command.

pub fn main(services: &[String]) -> String {
    let mut text = String::from(concat!(
        "*Service Bot*\n",
        "\n",
        "/status [services...] - show status\n",
        "/start [services...] - start services\n",
        "/stop [services...] - stop services\n",
        "/log <service> [n] - last n lines of the log (default 5)\n",
        "/logerr <service> [n] - last n lines of the error log\n",
        "\n",
        "*Services*\n",
    ));
    for service in services {
        text.push_str(&format!("• `{service}`\n"));
    }
    text
}
