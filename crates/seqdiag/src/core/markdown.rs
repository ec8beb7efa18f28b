//! Markdown embedding helpers
//!
//! Mermaid diagrams are usually published inside a fenced code block whose
//! info string is `mermaid`.

/// Info string recognised by Markdown renderers with Mermaid support
pub const MERMAID_INFO_STRING: &str = "mermaid";

/// Wrap diagram text in a ```` ```mermaid ```` fenced code block
///
/// The fence uses `separator` between its lines so it matches the diagram's
/// own line ending.
///
/// # Example
/// ```rust
/// use seqdiag::mermaid_code_block;
///
/// let block = mermaid_code_block("sequenceDiagram", "\n");
/// assert_eq!(block, "```mermaid\nsequenceDiagram\n```");
/// ```
pub fn mermaid_code_block(diagram: &str, separator: &str) -> String {
    format!(
        "```{info}{sep}{body}{sep}```",
        info = MERMAID_INFO_STRING,
        sep = separator,
        body = diagram
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_lf() {
        let block = mermaid_code_block("sequenceDiagram\n    participant A", "\n");
        assert_eq!(block, "```mermaid\nsequenceDiagram\n    participant A\n```");
    }

    #[test]
    fn test_code_block_crlf() {
        let block = mermaid_code_block("sequenceDiagram", "\r\n");
        assert_eq!(block, "```mermaid\r\nsequenceDiagram\r\n```");
    }
}
