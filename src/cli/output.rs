//! User-facing terminal output.
//!
//! Status lines are a coloured marker followed by the message.  Success
//! and info go to stdout; warnings and errors go to stderr so that piped
//! output (`sec get`, `sec export`) stays clean.

use comfy_table::{ContentArrangement, Table};
use console::{style, StyledObject};

fn stdout_line(marker: StyledObject<&str>, msg: &str) {
    println!("{marker} {msg}");
}

fn stderr_line(marker: StyledObject<&str>, msg: &str) {
    eprintln!("{marker} {msg}");
}

pub fn success(msg: &str) {
    stdout_line(style("\u{2713}").green().bold(), msg);
}

pub fn info(msg: &str) {
    stdout_line(style("\u{2139}").blue().bold(), msg);
}

pub fn warning(msg: &str) {
    stderr_line(style("\u{26a0}").yellow().bold(), msg);
}

pub fn error(msg: &str) {
    stderr_line(style("\u{2717}").red().bold(), msg);
}

/// A dimmed hint line.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Render secret names as a one-column table, or a hint when empty.
pub fn print_names_table(names: &[&str]) {
    if names.is_empty() {
        info("No secrets in this vault yet.");
        tip("Add one with `sec set <NAME> <VALUE>`.");
        return;
    }

    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Name"])
        .add_rows(names.iter().map(|name| [*name]));
    println!("{table}");
}
