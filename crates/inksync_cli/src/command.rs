//! Parsing of interactive session input.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    New,
    Open(String),
    Title(String),
    Write(String),
    Append(String),
    Show,
    Ask(String),
    Delete(String),
    Quit,
    Empty,
    Unknown(String),
}

/// Parses one input line. Text arguments keep inner whitespace; a literal
/// `\n` becomes a newline.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };
    let text = rest.replace("\\n", "\n");

    match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "list" | "ls" => Command::List,
        "new" => Command::New,
        "open" | "select" if !rest.is_empty() => Command::Open(rest.to_string()),
        "title" => Command::Title(text),
        "write" => Command::Write(text),
        "append" => Command::Append(text),
        "show" => Command::Show,
        "ask" => Command::Ask(rest.to_string()),
        "delete" | "rm" if !rest.is_empty() => Command::Delete(rest.to_string()),
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Interprets a delete confirmation answer.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::{is_affirmative, parse_command, Command};

    #[test]
    fn parses_verbs_with_arguments() {
        assert_eq!(parse_command("  list "), Command::List);
        assert_eq!(parse_command("open 2"), Command::Open("2".to_string()));
        assert_eq!(
            parse_command("title  My  Tale "),
            Command::Title("My  Tale".to_string())
        );
        assert_eq!(
            parse_command("write first\\nsecond"),
            Command::Write("first\nsecond".to_string())
        );
        assert_eq!(parse_command("ask"), Command::Ask(String::new()));
        assert_eq!(parse_command(""), Command::Empty);
    }

    #[test]
    fn open_and_delete_require_a_target() {
        assert_eq!(parse_command("open"), Command::Unknown("open".to_string()));
        assert_eq!(parse_command("delete"), Command::Unknown("delete".to_string()));
    }

    #[test]
    fn confirmation_accepts_yes_only() {
        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" yes "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
    }
}
