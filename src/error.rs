use std::fmt;

/// Byte range within the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// All errors produced by chime. Every variant is a construction-time
/// rejection; computing a trigger from a valid schedule never fails.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ValidationError {
    Time {
        message: String,
        span: Span,
        input: String,
    },

    Interval {
        message: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time { message, .. } => write!(f, "{message}"),
            Self::Interval { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn time(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::Time {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn interval(message: impl Into<String>) -> Self {
        Self::Interval {
            message: message.into(),
        }
    }

    /// Format a rich error with underline pointing at the offending input.
    pub fn display_rich(&self) -> String {
        match self {
            Self::Time {
                message,
                span,
                input,
            } => format_span_error("error", message, span, input),
            Self::Interval { message } => format!("error: {message}"),
        }
    }
}

fn format_span_error(prefix: &str, message: &str, span: &Span, input: &str) -> String {
    let mut out = format!("{prefix}: {message}\n");
    out.push_str(&format!("  {input}\n"));
    let padding = " ".repeat(span.start + 2);
    let underline = "^".repeat((span.end - span.start).max(1));
    out.push_str(&padding);
    out.push_str(&underline);
    out
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
