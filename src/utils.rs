//! Small terminal helpers shared by the binary and printers.

use owo_colors::OwoColorize;

pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        format!("{}:", label)
    } else {
        paint(&format!("{}:", label))
    }
}

pub fn error_prefix() -> String {
    prefix("error", |s| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note", |s| s.cyan().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("info", |s| s.blue().bold().to_string())
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
