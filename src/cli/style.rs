//! Semantic terminal styling
//!
//! Thin wrapper over `owo-colors` that names the few styles the report
//! uses and leaves color-support detection (`NO_COLOR`, `CLICOLOR`,
//! TTY checks) to the library.

use std::fmt::{self, Display};

use owo_colors::{OwoColorize, Stream, Style};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// A value with a semantic style attached; renders with ANSI codes only
/// when the target stream supports them.
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

/// Extension trait for semantic styling, implemented for all [`Display`]
/// types. Methods borrow so styled output never consumes the value.
pub trait Stylize: Display {
    /// Cyan, for primary information: paths, branches, counts
    fn accent(&self) -> Styled<&Self> {
        styled(self, ACCENT, Stream::Stdout)
    }

    /// Green, for up-to-date results
    fn success(&self) -> Styled<&Self> {
        styled(self, SUCCESS, Stream::Stdout)
    }

    /// Red, for failure detail in the report
    fn error(&self) -> Styled<&Self> {
        styled(self, ERROR, Stream::Stdout)
    }

    /// Yellow, for needs-attention results
    fn warn(&self) -> Styled<&Self> {
        styled(self, WARN, Stream::Stdout)
    }

    /// Dim, for secondary detail
    fn muted(&self) -> Styled<&Self> {
        styled(self, MUTED, Stream::Stdout)
    }

    /// Bold, for headers and the summary line
    fn emphasis(&self) -> Styled<&Self> {
        styled(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

const fn styled<T>(value: T, style: Style, stream: Stream) -> Styled<T> {
    Styled {
        value,
        style,
        stream,
    }
}

/// Up-to-date marker
pub const CHECK: &str = "✓";

/// Needs-update marker
pub const UP_ARROW: &str = "↑";

/// Errored marker
pub const CROSS: &str = "✗";

/// Green checkmark
pub const fn check() -> Styled<&'static str> {
    styled(CHECK, SUCCESS, Stream::Stdout)
}

/// Yellow up-arrow
pub const fn up_arrow() -> Styled<&'static str> {
    styled(UP_ARROW, WARN, Stream::Stdout)
}

/// Red cross (stdout: error lines are part of the report)
pub const fn cross() -> Styled<&'static str> {
    styled(CROSS, ERROR, Stream::Stdout)
}
