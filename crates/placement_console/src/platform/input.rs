use std::path::PathBuf;

use placement_core::Msg;

/// A parsed line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Field values are taken verbatim after the first space.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    let (word, value) = match line.split_once(' ') {
        Some((word, value)) => (word, value),
        None => (line.trim_end(), ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Dispatch(Msg::NoOp),
        "file" => match value.trim() {
            "" => Command::Dispatch(Msg::FileCleared),
            path => Command::Dispatch(Msg::FileSelected(PathBuf::from(path))),
        },
        "name" => Command::Dispatch(Msg::NameChanged(value.to_string())),
        "cgpa" | "threshold" => Command::Dispatch(Msg::ThresholdChanged(value.to_string())),
        "skills" => Command::Dispatch(Msg::SkillsChanged(value.to_string())),
        "upload" => Command::Dispatch(Msg::UploadClicked),
        "notify" => Command::Dispatch(Msg::NotifyClicked),
        "reset" => Command::Dispatch(Msg::Reset),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}
