use std::fs;
use std::path::{Path, PathBuf};

use doctomd_core::FileCandidate;

/// One line of user input, parsed. Indices are entered 1-based and stored
/// 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Add(Vec<PathBuf>),
    Remove(usize),
    Clear,
    Convert,
    Download(usize),
    DownloadAll,
    New,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Option<UserCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default().to_lowercase();
    let rest: Vec<&str> = words.collect();

    let command = match head.as_str() {
        "add" if !rest.is_empty() => {
            UserCommand::Add(rest.iter().copied().map(PathBuf::from).collect())
        }
        "rm" | "remove" => match parse_index(&rest) {
            Some(index) => UserCommand::Remove(index),
            None => UserCommand::Unknown(line.to_string()),
        },
        "clear" => UserCommand::Clear,
        "convert" => UserCommand::Convert,
        "download" => match rest.first() {
            Some(&"all") => UserCommand::DownloadAll,
            _ => match parse_index(&rest) {
                Some(index) => UserCommand::Download(index),
                None => UserCommand::Unknown(line.to_string()),
            },
        },
        "new" | "retry" => UserCommand::New,
        "help" => UserCommand::Help,
        "quit" | "exit" => UserCommand::Quit,
        _ => UserCommand::Unknown(line.to_string()),
    };
    Some(command)
}

fn parse_index(rest: &[&str]) -> Option<usize> {
    rest.first()
        .and_then(|word| word.parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .map(|n| n - 1)
}

/// Stats the given paths into picker candidates. Unreadable paths are
/// reported back rather than silently dropped.
pub fn candidates_from_paths(paths: &[PathBuf]) -> (Vec<FileCandidate>, Vec<String>) {
    let mut candidates = Vec::new();
    let mut unreadable = Vec::new();
    for path in paths {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => candidates.push(FileCandidate {
                name: display_name(path),
                size_bytes: meta.len(),
                path: path.clone(),
            }),
            Ok(_) => unreadable.push(format!("{}: not a file", path.display())),
            Err(err) => unreadable.push(format!("{}: {err}", path.display())),
        }
    }
    (candidates, unreadable)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
