//! Terminal helpers shared by the binary, the reporter and the formatters.
//!
//! Colors are on unless `NO_COLOR` is set.

use owo_colors::OwoColorize;

pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, color: bool, paint: fn(&str) -> String) -> String {
    if color {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("⟦error⟧", use_colors(), |s| s.red().bold().to_string())
}

pub fn warn_prefix() -> String {
    prefix("⟦warn⟧", use_colors(), |s| s.yellow().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("⟦note⟧", use_colors(), |s| s.bright_black().to_string())
}

pub fn info_prefix() -> String {
    prefix("⟦info⟧", use_colors(), |s| s.blue().bold().to_string())
}

/// Green "happy file" notice for a clean file.
pub fn happy_line(path: &str, color: bool) -> String {
    let line = format!("HAPPY FILE > {}", path);
    if color {
        line.green().to_string()
    } else {
        line
    }
}
