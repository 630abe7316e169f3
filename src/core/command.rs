//! Command parser for the : command system

use crate::domain::backoffice::SpamTab;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Overview,
    Search(Option<String>),
    Spam(Option<SpamTab>),

    // Data
    Refresh,
    Export {
        category: Option<String>,
        format: Option<String>,
    },

    // Popups
    Help,
    Settings,

    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    match cmd.to_lowercase().as_str() {
        "overview" | "home" | "dashboard" | "dash" => Command::Overview,
        "search" | "lead" | "find" => Command::Search(args),
        "spam" => match args.as_deref().map(str::to_lowercase).as_deref() {
            None => Command::Spam(None),
            Some("activities" | "activity" | "act" | "a") => {
                Command::Spam(Some(SpamTab::Activities))
            }
            Some("users" | "user" | "u") => Command::Spam(Some(SpamTab::Users)),
            Some(_) => Command::Unknown(input.to_string()),
        },

        "refresh" | "reload" | "r" => Command::Refresh,
        "export" | "exp" => {
            let mut words = args.as_deref().unwrap_or("").split_whitespace();
            let category = words.next().map(str::to_lowercase);
            let format = words.next().map(str::to_lowercase);
            Command::Export { category, format }
        }

        "help" | "?" => Command::Help,
        "settings" | "config" => Command::Settings,
        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}
