//! Sequence diagram builder
//!
//! Produces Mermaid sequence diagram text:
//! ```text
//! sequenceDiagram
//!     participant Alice
//!     participant Bob
//!     Alice->>Bob: Hello
//!     Bob-->>Alice: Hi there
//! ```

mod diagram;
mod nesting;
mod statement;

pub use diagram::SequenceDiagram;
pub use statement::{HEADER, INDENT};
