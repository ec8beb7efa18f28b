//! Seqdiag - Build Mermaid.js sequence diagrams in code
//!
//! A fluent builder that accumulates the lines of a Mermaid
//! `sequenceDiagram` document and writes it to any [`std::io::Write`].
//!
//! # Quick Start
//!
//! ```rust
//! use seqdiag::SequenceDiagram;
//!
//! let mut diagram = SequenceDiagram::new(std::io::stdout());
//! diagram
//!     .participant("Alice")
//!     .participant("Bob")
//!     .sync_request("Alice", "Bob", "Hello")
//!     .sync_response("Bob", "Alice", "Hi there");
//! diagram.finalize().unwrap();
//! ```
//!
//! # Blocks and error handling
//!
//! Block statements come in start/end pairs. With the default
//! [`NestingPolicy::Strict`] every pairing mistake is latched and reported
//! instead of producing malformed text silently:
//!
//! ```rust
//! use seqdiag::{BlockKind, ConstructionError, SequenceDiagram};
//!
//! let mut diagram = SequenceDiagram::default();
//! diagram
//!     .loop_start("until done")
//!     .sync_request("A", "B", "x")
//!     .opt_end();
//!
//! assert_eq!(
//!     diagram.last_error(),
//!     Some(&ConstructionError::MismatchedEnd {
//!         expected: BlockKind::Loop,
//!         found: BlockKind::Opt,
//!         line: 4,
//!     })
//! );
//! ```

pub mod core;
pub mod sequence;

pub use crate::core::*;
pub use crate::sequence::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Arrow, BlockKind, ConstructionError, DiagramConfig, DiagramError, LineEnding,
        NestingPolicy, NotePlacement,
    };
    pub use crate::sequence::SequenceDiagram;
}
