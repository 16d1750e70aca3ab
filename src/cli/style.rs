//! CLI styling utilities
//!
//! Semantic styling via the [`Stylize`] trait, with terminal color support
//! detection delegated to `owo-colors` (respects `NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE`, and TTY detection).

use std::fmt::{self, Display};

pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// A value with semantic styling applied; renders ANSI codes only when the
/// target stream supports them.
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

/// Extension trait for semantic terminal styling.
///
/// Implemented for all [`Display`] types; methods take `&self` so borrowed
/// data can be styled in place.
pub trait Stylize: Display + Sized {
    /// Accent (cyan) for primary information: issue ids, counts, URLs
    fn accent(&self) -> Styled<&Self> {
        styled(self, ACCENT, Stream::Stdout)
    }

    /// Success (green) for completion states
    fn success(&self) -> Styled<&Self> {
        styled(self, SUCCESS, Stream::Stdout)
    }

    /// Error (red) for failures; renders for stderr
    fn error(&self) -> Styled<&Self> {
        styled(self, ERROR, Stream::Stderr)
    }

    /// Warning (yellow) for attention-needed states; renders for stderr
    fn warn(&self) -> Styled<&Self> {
        styled(self, WARN, Stream::Stderr)
    }

    /// Muted (dim) for secondary information
    fn muted(&self) -> Styled<&Self> {
        styled(self, MUTED, Stream::Stdout)
    }

    /// Emphasis (bold) for headers and key information
    fn emphasis(&self) -> Styled<&Self> {
        styled(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display> Stylize for T {}

const fn styled<T>(value: T, style: Style, stream: Stream) -> Styled<T> {
    Styled {
        value,
        style,
        stream,
    }
}

/// Green checkmark for success states
pub const fn check() -> Styled<&'static str> {
    styled("✓", SUCCESS, Stream::Stdout)
}

/// Red cross for failure states (renders for stderr)
pub const fn cross() -> Styled<&'static str> {
    styled("✗", ERROR, Stream::Stderr)
}

/// Create a clickable OSC 8 hyperlink showing the URL itself.
///
/// Falls back to plain URL text in terminals without hyperlink support.
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let hyperlink_stream = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(hyperlink_stream) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}
