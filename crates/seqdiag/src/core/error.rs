//! Core error types for diagram construction
//!
//! Construction errors are latched by the builder and surfaced when the
//! diagram is checked or finalized. Finalize adds its own write failure on top.

use std::io;

use thiserror::Error;

use super::types::{BlockKind, NotePlacement};

/// Malformed construction detected while building a diagram
///
/// Line numbers are 1-based document positions, the header being line 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("Unmatched end: `{kind}` block closed at line {line} but no block is open")]
    UnmatchedEnd { kind: BlockKind, line: usize },

    #[error("Mismatched end: `{found}` block closed at line {line} while `{expected}` block is open")]
    MismatchedEnd {
        expected: BlockKind,
        found: BlockKind,
        line: usize,
    },

    #[error("Misplaced branch: `{keyword}` at line {line} must be inside a `{owner}` block")]
    MisplacedBranch {
        keyword: &'static str,
        owner: BlockKind,
        line: usize,
    },

    #[error("Unclosed block: `{kind} {label}` opened at line {line} was never closed")]
    UnclosedBlock {
        kind: BlockKind,
        label: String,
        line: usize,
    },

    #[error("Unmatched deactivate: `{participant}` deactivated at line {line} but not active")]
    UnmatchedDeactivate { participant: String, line: usize },

    #[error("Unclosed activation: `{participant}` activated at line {line} was never deactivated")]
    UnclosedActivation { participant: String, line: usize },

    #[error("Empty note target: note at line {line} names no participant")]
    EmptyNoteTarget { line: usize },

    #[error("Too many note targets: `Note {placement}` at line {line} names {count} participants")]
    TooManyNoteTargets {
        placement: NotePlacement,
        count: usize,
        line: usize,
    },

    #[error("Format error: message for line {line} could not be formatted")]
    Format { line: usize },
}

impl ConstructionError {
    /// Line number the error refers to
    pub fn line(&self) -> usize {
        match self {
            Self::UnmatchedEnd { line, .. }
            | Self::MismatchedEnd { line, .. }
            | Self::MisplacedBranch { line, .. }
            | Self::UnclosedBlock { line, .. }
            | Self::UnmatchedDeactivate { line, .. }
            | Self::UnclosedActivation { line, .. }
            | Self::EmptyNoteTarget { line }
            | Self::TooManyNoteTargets { line, .. }
            | Self::Format { line } => *line,
        }
    }
}

/// Failure reported when a diagram is finalized
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),

    #[error("Write error: {source}{}", after_construction(.construction))]
    Write {
        source: io::Error,
        construction: Option<ConstructionError>,
    },
}

fn after_construction(construction: &Option<ConstructionError>) -> String {
    match construction {
        Some(error) => format!(" (diagram was already malformed: {})", error),
        None => String::new(),
    }
}

impl DiagramError {
    /// Create a new write error carrying the latched construction error
    pub fn write_error(source: io::Error, construction: Option<ConstructionError>) -> Self {
        Self::Write {
            source,
            construction,
        }
    }

    /// The construction error involved in this failure, if any
    pub fn construction(&self) -> Option<&ConstructionError> {
        match self {
            Self::Construction(error) => Some(error),
            Self::Write { construction, .. } => construction.as_ref(),
        }
    }

    /// The IO error of a failed write
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Write { source, .. } => Some(source),
            Self::Construction(_) => None,
        }
    }
}
