//! Construction-time configuration for diagrams

use std::fmt;
use std::str::FromStr;

/// Line separator used when rendering a diagram
///
/// One separator is applied to the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// `\r\n` on Windows, `\n` elsewhere
    Native,
}

impl LineEnding {
    /// The separator string
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }

    /// Get all valid names
    pub fn variants() -> &'static [&'static str] {
        &["lf", "crlf", "native"]
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "lf"),
            LineEnding::CrLf => write!(f, "crlf"),
            LineEnding::Native => write!(f, "native"),
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lf" => Ok(LineEnding::Lf),
            "crlf" => Ok(LineEnding::CrLf),
            "native" => Ok(LineEnding::Native),
            _ => Err(format!("Unknown line ending: {}", s)),
        }
    }
}

/// How block and activation pairing is checked during construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum NestingPolicy {
    /// Track open blocks and activations; latch an error on any mismatch,
    /// and on anything left open when construction is checked
    #[default]
    Strict,
    /// Trust the caller's start/end pairing; mismatches are never reported
    Trusting,
}

impl NestingPolicy {
    /// Returns true if pairing is validated
    pub fn is_strict(&self) -> bool {
        matches!(self, NestingPolicy::Strict)
    }

    /// Get all valid names
    pub fn variants() -> &'static [&'static str] {
        &["strict", "trusting"]
    }
}

impl fmt::Display for NestingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestingPolicy::Strict => write!(f, "strict"),
            NestingPolicy::Trusting => write!(f, "trusting"),
        }
    }
}

impl FromStr for NestingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(NestingPolicy::Strict),
            "trusting" => Ok(NestingPolicy::Trusting),
            _ => Err(format!("Unknown nesting policy: {}", s)),
        }
    }
}

/// Configuration fixed when a diagram is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagramConfig {
    pub line_ending: LineEnding,
    pub nesting: NestingPolicy,
}

impl DiagramConfig {
    pub fn new(line_ending: LineEnding, nesting: NestingPolicy) -> Self {
        Self {
            line_ending,
            nesting,
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_nesting(mut self, nesting: NestingPolicy) -> Self {
        self.nesting = nesting;
        self
    }
}
