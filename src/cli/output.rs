//! Terminal output helpers.
//!
//! Human-readable lines go to stdout, errors to stderr. Machine-readable
//! output goes through [`data`] and is never styled. Styling is dropped
//! when `NO_COLOR` is set or console detects no color support.

use console::Style;
use std::fmt::Display;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled()
}

/// Apply `style` to `text` if colors are on.
fn paint(style: Style, text: impl Display) -> String {
    if colors_enabled() {
        style.apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

/// `✓ provisioned device-key-001`
pub fn success(msg: &str) {
    println!("{} {}", paint(Style::new().green(), "✓"), msg);
}

/// `✗ key_name: KeyName is required`, on stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", paint(Style::new().red(), "✗"), msg);
}

/// `⚠ device device-0002 skipped: invalid public key`
pub fn warn(msg: &str) {
    println!("{} {}", paint(Style::new().yellow(), "⚠"), msg);
}

/// `→ run: keyfleet init`
pub fn hint(msg: &str) {
    let cyan = Style::new().cyan();
    println!("{} {}", paint(cyan.clone(), "→"), paint(cyan, msg));
}

pub fn header(title: &str) {
    println!("{}", paint(Style::new().bold(), title));
}

/// Indented label and value, e.g. `  updated:  150`.
pub fn kv(label: &str, value: impl Display) {
    println!("  {}  {}", paint(Style::new().dim(), label), value);
}

pub fn list_item(item: &str) {
    println!("  • {}", item);
}

pub fn dimmed(msg: &str) {
    println!("{}", paint(Style::new().dim(), msg));
}

/// Raw output for pipes and `--json`.
pub fn data(msg: &str) {
    println!("{}", msg);
}

/// A count in bold.
pub fn count(n: usize) -> String {
    paint(Style::new().bold(), n)
}

/// A key or device name in cyan.
pub fn name(n: &str) -> String {
    paint(Style::new().cyan(), n)
}
