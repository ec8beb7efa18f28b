//! One-line statements of the sequence diagram syntax
//!
//! A statement formats to the body of a single line; the diagram adds the
//! indentation prefix. No escaping is applied to names or text.

use std::fmt;

use crate::core::{Arrow, BlockKind, NotePlacement};

/// Indentation prefix of every statement and block-marker line
///
/// The width is the same at every nesting depth.
pub const INDENT: &str = "    ";

/// Header line of every sequence diagram
pub const HEADER: &str = "sequenceDiagram";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Statement<'a> {
    Participant {
        name: &'a str,
        alias: Option<&'a str>,
    },
    Actor {
        name: &'a str,
        alias: Option<&'a str>,
    },
    Message {
        from: &'a str,
        arrow: Arrow,
        to: &'a str,
        text: &'a str,
    },
    Activate(&'a str),
    Deactivate(&'a str),
    Note {
        placement: NotePlacement,
        participants: &'a [&'a str],
        text: &'a str,
    },
    BlockStart {
        kind: BlockKind,
        label: &'a str,
    },
    Branch {
        keyword: &'static str,
        label: &'a str,
    },
    End,
}

impl Statement<'_> {
    /// The statement as a full, indented line
    pub(crate) fn to_line(self) -> String {
        format!("{}{}", INDENT, self)
    }
}

/// `keyword label`, or just `keyword` when the label is empty
fn write_labelled(f: &mut fmt::Formatter<'_>, keyword: &str, label: &str) -> fmt::Result {
    if label.is_empty() {
        f.write_str(keyword)
    } else {
        write!(f, "{} {}", keyword, label)
    }
}

fn write_declaration(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    name: &str,
    alias: Option<&str>,
) -> fmt::Result {
    match alias {
        Some(alias) => write!(f, "{} {} as {}", keyword, name, alias),
        None => write!(f, "{} {}", keyword, name),
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Statement::Participant { name, alias } => {
                write_declaration(f, "participant", name, alias)
            }
            Statement::Actor { name, alias } => write_declaration(f, "actor", name, alias),
            Statement::Message {
                from,
                arrow,
                to,
                text,
            } => write!(f, "{}{}{}: {}", from, arrow, to, text),
            Statement::Activate(name) => write!(f, "activate {}", name),
            Statement::Deactivate(name) => write!(f, "deactivate {}", name),
            Statement::Note {
                placement,
                participants,
                text,
            } => write!(
                f,
                "Note {} {}: {}",
                placement,
                participants.join(","),
                text
            ),
            Statement::BlockStart { kind, label } => write_labelled(f, kind.keyword(), label),
            Statement::Branch { keyword, label } => write_labelled(f, keyword, label),
            Statement::End => f.write_str("end"),
        }
    }
}
