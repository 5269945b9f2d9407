//! Status markers for command output.

use colored::Colorize;

pub fn success() -> String {
    "✓".green().to_string()
}

pub fn warning() -> String {
    "!".yellow().to_string()
}

pub fn error() -> String {
    "✗".red().to_string()
}
