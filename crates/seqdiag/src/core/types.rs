//! Core type definitions for sequence diagram text
//!
//! This module contains the fixed token sets of the Mermaid sequence diagram
//! syntax: message arrows, note placements and block keywords.

use std::fmt;

/// Message arrow between two participants
///
/// Each variant maps to exactly one Mermaid arrow token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    /// Solid line with arrowhead: `->>`
    SyncRequest,
    /// Dotted line with arrowhead: `-->>`
    SyncResponse,
    /// Solid line with open arrow: `-)`
    AsyncRequest,
    /// Dotted line with open arrow: `--)`
    AsyncResponse,
    /// Solid line with a cross: `-x`
    RequestError,
    /// Dotted line with a cross: `--x`
    ResponseError,
}

impl Arrow {
    pub const ALL: [Arrow; 6] = [
        Arrow::SyncRequest,
        Arrow::SyncResponse,
        Arrow::AsyncRequest,
        Arrow::AsyncResponse,
        Arrow::RequestError,
        Arrow::ResponseError,
    ];

    /// The Mermaid token for this arrow
    pub fn token(&self) -> &'static str {
        match self {
            Arrow::SyncRequest => "->>",
            Arrow::SyncResponse => "-->>",
            Arrow::AsyncRequest => "-)",
            Arrow::AsyncResponse => "--)",
            Arrow::RequestError => "-x",
            Arrow::ResponseError => "--x",
        }
    }

    /// Snake-case name used by tooling
    pub fn name(&self) -> &'static str {
        match self {
            Arrow::SyncRequest => "sync_request",
            Arrow::SyncResponse => "sync_response",
            Arrow::AsyncRequest => "async_request",
            Arrow::AsyncResponse => "async_response",
            Arrow::RequestError => "request_error",
            Arrow::ResponseError => "response_error",
        }
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Where a note is placed relative to its participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotePlacement {
    /// `Note over A,B`
    Over,
    /// `Note left of A`
    LeftOf,
    /// `Note right of A`
    RightOf,
}

impl NotePlacement {
    pub const ALL: [NotePlacement; 3] = [
        NotePlacement::Over,
        NotePlacement::LeftOf,
        NotePlacement::RightOf,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            NotePlacement::Over => "over",
            NotePlacement::LeftOf => "left of",
            NotePlacement::RightOf => "right of",
        }
    }

    /// Largest participant list the placement accepts
    pub fn max_participants(&self) -> usize {
        match self {
            NotePlacement::Over => 2,
            NotePlacement::LeftOf | NotePlacement::RightOf => 1,
        }
    }
}

impl fmt::Display for NotePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Kind of a start/end block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Loop,
    Alt,
    Opt,
    Par,
    Break,
    Critical,
    Group,
}

impl BlockKind {
    pub const ALL: [BlockKind; 7] = [
        BlockKind::Loop,
        BlockKind::Alt,
        BlockKind::Opt,
        BlockKind::Par,
        BlockKind::Break,
        BlockKind::Critical,
        BlockKind::Group,
    ];

    /// Keyword that opens the block
    pub fn keyword(&self) -> &'static str {
        match self {
            BlockKind::Loop => "loop",
            BlockKind::Alt => "alt",
            BlockKind::Opt => "opt",
            BlockKind::Par => "par",
            BlockKind::Break => "break",
            BlockKind::Critical => "critical",
            BlockKind::Group => "group",
        }
    }

    /// Keyword of the branch statement this block accepts, if any
    ///
    /// `alt` takes `else`, `par` takes `and`, `critical` takes `option`.
    pub fn branch_keyword(&self) -> Option<&'static str> {
        match self {
            BlockKind::Alt => Some("else"),
            BlockKind::Par => Some("and"),
            BlockKind::Critical => Some("option"),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
