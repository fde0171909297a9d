//! Output formatting for CLI
//!
//! Every command prints through `Output` so the three modes stay consistent:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use contacts_core::Contact;

use crate::client::{Notice, EMPTY_PLACEHOLDER};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single contact
    pub fn print_contact(&self, contact: &Contact) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", contact.id);
                println!("Name:    {}", contact.name);
                println!("Email:   {}", contact.email);
                println!("Phone:   {}", contact.phone);
                if !contact.message.is_empty() {
                    println!("Message: {}", contact.message);
                }
                println!(
                    "Created: {}",
                    contact.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            OutputFormat::Json => print_json(contact),
            OutputFormat::Quiet => println!("{}", contact.id),
        }
    }

    /// Print the contact list, newest first
    pub fn print_contacts(&self, contacts: &[Contact]) {
        match self.format {
            OutputFormat::Human => {
                if contacts.is_empty() {
                    println!("{}", EMPTY_PLACEHOLDER);
                    return;
                }
                for contact in contacts {
                    println!("{}", list_line(contact));
                }
                println!("\n{} contact(s)", contacts.len());
            }
            OutputFormat::Json => print_json(&contacts),
            OutputFormat::Quiet => {
                for contact in contacts {
                    println!("{}", contact.id);
                }
            }
        }
    }

    /// Print a controller notice
    ///
    /// Errors go to stderr in every mode; successes are silent unless human.
    pub fn notice(&self, notice: &Notice) {
        match notice {
            Notice::Error(text) => eprintln!("Error: {}", text),
            Notice::Success(text) => {
                if self.format == OutputFormat::Human {
                    println!("{}", text);
                }
            }
        }
    }

    /// Print an informational message (human mode only)
    pub fn message(&self, msg: &str) {
        if self.format == OutputFormat::Human {
            println!("{}", msg);
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to encode JSON: {}", e),
    }
}

/// One-line summary used by `contacts list`
fn list_line(contact: &Contact) -> String {
    let mut line = format!(
        "{} | {} | {} | {}",
        contact.short_id(),
        truncate(&contact.name, 24),
        truncate(&contact.email, 32),
        contact.phone
    );
    if !contact.message.is_empty() {
        line.push_str(" | ");
        line.push_str(&truncate(&contact.message, 40));
    }
    line
}

/// Truncate to `max_chars`, ending in "..." when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::contact;

    #[test]
    fn test_output_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_list_line() {
        let mut ann = contact("Ann Lee", "ann@example.com", "9876543210");
        assert_eq!(
            list_line(&ann),
            format!("{} | Ann Lee | ann@example.com | 9876543210", ann.short_id())
        );

        ann.message = "Met at the conference".to_string();
        assert!(list_line(&ann).ends_with("| Met at the conference"));
    }
}
