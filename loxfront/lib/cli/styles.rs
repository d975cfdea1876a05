use std::{fmt::Write, io::IsTerminal};

use clap::builder::styling::{AnsiColor, Effects, Style, Styles};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns a `Styles` object with the default styles for the CLI.
pub fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Green.on_default() | Effects::BOLD)
        .invalid(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Wraps `text` in the escape codes for `style`, unless styling is disabled.
fn apply_style(text: String, style: &Style, enabled: bool) -> String {
    if !enabled {
        return text;
    }

    let mut styled = String::with_capacity(text.len() + 20); // Reserve extra space for ANSI codes
    let _ = write!(styled, "{}", style);
    styled.push_str(&text);
    let _ = write!(styled, "{}", style.render_reset());
    styled
}

/// Returns `true` when stderr is a terminal that understands ANSI codes.
fn stderr_is_ansi_terminal() -> bool {
    std::io::stderr().is_terminal() && std::env::var("TERM").map_or(true, |term| term != "dumb")
}

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// A trait for applying Styles defined in [`styles`] to diagnostic text written to stderr.
pub trait AnsiStyles {
    /// Apply error style to text
    fn error(&self) -> String;
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl AnsiStyles for str {
    fn error(&self) -> String {
        apply_style(
            self.to_string(),
            styles().get_error(),
            stderr_is_ansi_terminal(),
        )
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_style_disabled() {
        let text = apply_style("test".to_string(), styles().get_error(), false);
        assert_eq!(text, "test");
    }

    #[test]
    fn test_apply_style_enabled() {
        let error = apply_style("test".to_string(), styles().get_error(), true);
        assert!(error.contains("\x1b[1m"));
        assert!(error.contains("\x1b[31m"));
        assert!(error.contains("test"));
        assert!(error.ends_with("\x1b[0m"));

        let literal = apply_style("test".to_string(), styles().get_literal(), true);
        assert!(literal.contains("\x1b[34m"));
    }

    #[test]
    fn test_apply_style_unicode() {
        let text = apply_style("测试".to_string(), styles().get_literal(), true);
        assert!(text.contains("测试"));
        assert!(text.starts_with("\x1b["));
    }
}
