//! Fluent sequence diagram builder
//!
//! Every emitter appends at most one line and returns the builder so calls
//! can be chained. Failures never interrupt the chain: the first one is
//! latched, every later emitter becomes a no-op, and the error is reported
//! by [`SequenceDiagram::last_error`], [`SequenceDiagram::check`] and
//! [`SequenceDiagram::finalize`].

use std::fmt;
use std::io::{self, Write};

use tracing::{debug, error, info, span, trace, warn, Level};

use super::nesting::NestingTracker;
use super::statement::{Statement, HEADER};
use crate::core::{
    Arrow, BlockKind, ConstructionError, DiagramConfig, DiagramError, ErrorLatch, LineBuffer,
    NotePlacement,
};

/// Builder for a Mermaid `sequenceDiagram` document
///
/// The builder owns the destination the document is eventually written to.
///
/// # Example
///
/// ```rust
/// use seqdiag::SequenceDiagram;
///
/// let mut diagram = SequenceDiagram::new(Vec::new());
/// diagram
///     .participant("A")
///     .participant("B")
///     .lf()
///     .sync_request("A", "B", "hi")
///     .sync_response("B", "A", "ok");
///
/// let expected = "sequenceDiagram\n    participant A\n    participant B\n\n    A->>B: hi\n    B-->>A: ok";
/// assert_eq!(diagram.render(), expected);
///
/// diagram.finalize().unwrap();
/// assert_eq!(diagram.into_inner(), expected.as_bytes());
/// ```
#[derive(Debug)]
pub struct SequenceDiagram<W> {
    lines: LineBuffer,
    latch: ErrorLatch<ConstructionError>,
    nesting: NestingTracker,
    config: DiagramConfig,
    dest: W,
    finalized: bool,
}

impl<W: Write> SequenceDiagram<W> {
    /// Create a diagram writing to `dest` with the default configuration
    pub fn new(dest: W) -> Self {
        Self::with_config(dest, DiagramConfig::default())
    }

    /// Create a diagram writing to `dest`
    pub fn with_config(dest: W, config: DiagramConfig) -> Self {
        Self {
            lines: LineBuffer::new(HEADER),
            latch: ErrorLatch::new(),
            nesting: NestingTracker::new(config.nesting),
            config,
            dest,
            finalized: false,
        }
    }

    // ---------------------------------------------------------------------
    // Declarations
    // ---------------------------------------------------------------------

    /// `participant <name>`
    pub fn participant(&mut self, name: &str) -> &mut Self {
        self.push(Statement::Participant { name, alias: None })
    }

    /// `participant <name> as <alias>`
    pub fn participant_as(&mut self, name: &str, alias: &str) -> &mut Self {
        self.push(Statement::Participant {
            name,
            alias: Some(alias),
        })
    }

    /// `actor <name>`
    pub fn actor(&mut self, name: &str) -> &mut Self {
        self.push(Statement::Actor { name, alias: None })
    }

    /// `actor <name> as <alias>`
    pub fn actor_as(&mut self, name: &str, alias: &str) -> &mut Self {
        self.push(Statement::Actor {
            name,
            alias: Some(alias),
        })
    }

    // ---------------------------------------------------------------------
    // Messages
    // ---------------------------------------------------------------------

    /// `<from><arrow><to>: <text>`
    pub fn message(&mut self, from: &str, arrow: Arrow, to: &str, text: &str) -> &mut Self {
        self.push(Statement::Message {
            from,
            arrow,
            to,
            text,
        })
    }

    /// Like [`message`](Self::message) with the text built from `args`
    ///
    /// A formatting failure latches [`ConstructionError::Format`].
    pub fn message_fmt(
        &mut self,
        from: &str,
        arrow: Arrow,
        to: &str,
        args: fmt::Arguments<'_>,
    ) -> &mut Self {
        if self.latch.has_failed() {
            return self;
        }
        let mut text = String::new();
        if fmt::write(&mut text, args).is_err() {
            let line = self.lines.next_line_number();
            self.fail(ConstructionError::Format { line });
            return self;
        }
        self.message(from, arrow, to, &text)
    }

    /// `<from>->><to>: <text>`
    pub fn sync_request(&mut self, from: &str, to: &str, text: &str) -> &mut Self {
        self.message(from, Arrow::SyncRequest, to, text)
    }

    pub fn sync_request_fmt(
        &mut self,
        from: &str,
        to: &str,
        args: fmt::Arguments<'_>,
    ) -> &mut Self {
        self.message_fmt(from, Arrow::SyncRequest, to, args)
    }

    /// `<from>-->><to>: <text>`
    pub fn sync_response(&mut self, from: &str, to: &str, text: &str) -> &mut Self {
        self.message(from, Arrow::SyncResponse, to, text)
    }

    pub fn sync_response_fmt(
        &mut self,
        from: &str,
        to: &str,
        args: fmt::Arguments<'_>,
    ) -> &mut Self {
        self.message_fmt(from, Arrow::SyncResponse, to, args)
    }

    /// `<from>-)<to>: <text>`
    pub fn async_request(&mut self, from: &str, to: &str, text: &str) -> &mut Self {
        self.message(from, Arrow::AsyncRequest, to, text)
    }

    pub fn async_request_fmt(
        &mut self,
        from: &str,
        to: &str,
        args: fmt::Arguments<'_>,
    ) -> &mut Self {
        self.message_fmt(from, Arrow::AsyncRequest, to, args)
    }

    /// `<from>--)<to>: <text>`
    pub fn async_response(&mut self, from: &str, to: &str, text: &str) -> &mut Self {
        self.message(from, Arrow::AsyncResponse, to, text)
    }

    pub fn async_response_fmt(
        &mut self,
        from: &str,
        to: &str,
        args: fmt::Arguments<'_>,
    ) -> &mut Self {
        self.message_fmt(from, Arrow::AsyncResponse, to, args)
    }

    /// `<from>-x<to>: <text>`
    pub fn request_error(&mut self, from: &str, to: &str, text: &str) -> &mut Self {
        self.message(from, Arrow::RequestError, to, text)
    }

    pub fn request_error_fmt(
        &mut self,
        from: &str,
        to: &str,
        args: fmt::Arguments<'_>,
    ) -> &mut Self {
        self.message_fmt(from, Arrow::RequestError, to, args)
    }

    /// `<from>--x<to>: <text>`
    pub fn response_error(&mut self, from: &str, to: &str, text: &str) -> &mut Self {
        self.message(from, Arrow::ResponseError, to, text)
    }

    pub fn response_error_fmt(
        &mut self,
        from: &str,
        to: &str,
        args: fmt::Arguments<'_>,
    ) -> &mut Self {
        self.message_fmt(from, Arrow::ResponseError, to, args)
    }

    // ---------------------------------------------------------------------
    // Layout, notes and activations
    // ---------------------------------------------------------------------

    /// Append an empty, unindented line
    pub fn lf(&mut self) -> &mut Self {
        if self.latch.has_failed() {
            return self;
        }
        trace!(line_number = self.lines.next_line_number(), "Appended blank line");
        self.lines.push_blank();
        self
    }

    /// `Note <placement> <p1>,<p2>: <text>`
    ///
    /// An empty participant list latches [`ConstructionError::EmptyNoteTarget`];
    /// more than [`NotePlacement::max_participants`] latches
    /// [`ConstructionError::TooManyNoteTargets`].
    pub fn note(
        &mut self,
        placement: NotePlacement,
        participants: &[&str],
        text: &str,
    ) -> &mut Self {
        if self.latch.has_failed() {
            return self;
        }
        if participants.is_empty() {
            let line = self.lines.next_line_number();
            self.fail(ConstructionError::EmptyNoteTarget { line });
            return self;
        }
        if participants.len() > placement.max_participants() {
            let line = self.lines.next_line_number();
            self.fail(ConstructionError::TooManyNoteTargets {
                placement,
                count: participants.len(),
                line,
            });
            return self;
        }
        self.push(Statement::Note {
            placement,
            participants,
            text,
        })
    }

    pub fn note_over(&mut self, participants: &[&str], text: &str) -> &mut Self {
        self.note(NotePlacement::Over, participants, text)
    }

    pub fn note_left_of(&mut self, participant: &str, text: &str) -> &mut Self {
        self.note(NotePlacement::LeftOf, &[participant], text)
    }

    pub fn note_right_of(&mut self, participant: &str, text: &str) -> &mut Self {
        self.note(NotePlacement::RightOf, &[participant], text)
    }

    /// `activate <name>`
    pub fn activate(&mut self, name: &str) -> &mut Self {
        if self.latch.has_failed() {
            return self;
        }
        let line = self.lines.next_line_number();
        self.nesting.activate(name, line);
        self.push(Statement::Activate(name))
    }

    /// `deactivate <name>`
    ///
    /// Under the strict policy, deactivating a participant that is not active
    /// latches [`ConstructionError::UnmatchedDeactivate`].
    pub fn deactivate(&mut self, name: &str) -> &mut Self {
        if self.latch.has_failed() {
            return self;
        }
        let line = self.lines.next_line_number();
        match self.nesting.deactivate(name, line) {
            Ok(()) => self.push(Statement::Deactivate(name)),
            Err(error) => {
                self.fail(error);
                self
            }
        }
    }

    // ---------------------------------------------------------------------
    // Blocks
    // ---------------------------------------------------------------------

    /// `loop <label>`
    pub fn loop_start(&mut self, label: &str) -> &mut Self {
        self.start_block(BlockKind::Loop, label)
    }

    pub fn loop_end(&mut self) -> &mut Self {
        self.end_block(BlockKind::Loop)
    }

    /// `alt <label>`
    pub fn alt_start(&mut self, label: &str) -> &mut Self {
        self.start_block(BlockKind::Alt, label)
    }

    /// `else <label>` inside an `alt` block
    pub fn alt_else(&mut self, label: &str) -> &mut Self {
        self.branch(BlockKind::Alt, "else", label)
    }

    pub fn alt_end(&mut self) -> &mut Self {
        self.end_block(BlockKind::Alt)
    }

    /// `opt <label>`
    pub fn opt_start(&mut self, label: &str) -> &mut Self {
        self.start_block(BlockKind::Opt, label)
    }

    pub fn opt_end(&mut self) -> &mut Self {
        self.end_block(BlockKind::Opt)
    }

    /// `par <label>`
    pub fn par_start(&mut self, label: &str) -> &mut Self {
        self.start_block(BlockKind::Par, label)
    }

    /// `and <label>` inside a `par` block
    pub fn par_and(&mut self, label: &str) -> &mut Self {
        self.branch(BlockKind::Par, "and", label)
    }

    pub fn par_end(&mut self) -> &mut Self {
        self.end_block(BlockKind::Par)
    }

    /// `break <label>`
    pub fn break_start(&mut self, label: &str) -> &mut Self {
        self.start_block(BlockKind::Break, label)
    }

    pub fn break_end(&mut self) -> &mut Self {
        self.end_block(BlockKind::Break)
    }

    /// `critical <label>`
    pub fn critical_start(&mut self, label: &str) -> &mut Self {
        self.start_block(BlockKind::Critical, label)
    }

    /// `option <label>` inside a `critical` block
    pub fn critical_option(&mut self, label: &str) -> &mut Self {
        self.branch(BlockKind::Critical, "option", label)
    }

    pub fn critical_end(&mut self) -> &mut Self {
        self.end_block(BlockKind::Critical)
    }

    /// `group <label>`
    pub fn group_start(&mut self, label: &str) -> &mut Self {
        self.start_block(BlockKind::Group, label)
    }

    pub fn group_end(&mut self) -> &mut Self {
        self.end_block(BlockKind::Group)
    }

    // ---------------------------------------------------------------------
    // Inspection and output
    // ---------------------------------------------------------------------

    /// The document text accumulated so far
    ///
    /// Pure: callable at any time, including after a latched error.
    pub fn render(&self) -> String {
        self.lines.render(self.config.line_ending.as_str())
    }

    /// The latched construction error, if any
    pub fn last_error(&self) -> Option<&ConstructionError> {
        self.latch.get()
    }

    /// Run the end-of-construction checks
    ///
    /// Under the strict policy a block or activation still open latches an
    /// error. Returns the latched error, whichever call produced it.
    pub fn check(&mut self) -> Result<(), ConstructionError> {
        if !self.latch.has_failed() {
            if let Err(error) = self.nesting.verify_closed() {
                self.fail(error);
            }
        }
        match self.latch.get() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Write the rendered document to the destination
    ///
    /// The text is written in a single attempt even when construction failed.
    /// A write failure carries the latched construction error alongside the
    /// IO error; otherwise a latched construction error is returned after the
    /// write.
    ///
    /// Only the first call writes. Later calls return the latched construction
    /// error, if any, without touching the destination.
    pub fn finalize(&mut self) -> Result<(), DiagramError> {
        let finalize_span = span!(Level::INFO, "finalize_diagram", lines = self.lines.len());
        let _enter = finalize_span.enter();

        let construction = self.check().err();
        if self.finalized {
            debug!("Diagram already finalized, skipping write");
            return match construction {
                Some(error) => Err(error.into()),
                None => Ok(()),
            };
        }
        self.finalized = true;
        let text = self.render();
        debug!(bytes = text.len(), "Writing diagram text");

        if let Err(source) = write_text(&mut self.dest, &text) {
            error!(error = %source, "Failed to write diagram text");
            return Err(DiagramError::write_error(source, construction));
        }
        info!(bytes = text.len(), "Wrote diagram text");

        match construction {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }

    /// Whether [`finalize`](Self::finalize) has been called
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of currently open blocks (always 0 under the trusting policy)
    pub fn depth(&self) -> usize {
        self.nesting.depth()
    }

    /// Number of lines, header included
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        self.lines.lines()
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn destination(&self) -> &W {
        &self.dest
    }

    /// Consume the diagram and return its destination
    pub fn into_inner(self) -> W {
        self.dest
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn push(&mut self, statement: Statement<'_>) -> &mut Self {
        if self.latch.has_failed() {
            return self;
        }
        let line = statement.to_line();
        trace!(line_number = self.lines.next_line_number(), line = %line, "Appended line");
        self.lines.push(line);
        self
    }

    fn fail(&mut self, error: ConstructionError) {
        if !self.latch.has_failed() {
            warn!(error = %error, "Diagram construction failed");
        }
        self.latch.fail(error);
    }

    fn start_block(&mut self, kind: BlockKind, label: &str) -> &mut Self {
        if self.latch.has_failed() {
            return self;
        }
        let line = self.lines.next_line_number();
        self.nesting.open(kind, label, line);
        self.push(Statement::BlockStart { kind, label })
    }

    fn branch(&mut self, owner: BlockKind, keyword: &'static str, label: &str) -> &mut Self {
        if self.latch.has_failed() {
            return self;
        }
        let line = self.lines.next_line_number();
        match self.nesting.branch(owner, keyword, line) {
            Ok(()) => self.push(Statement::Branch { keyword, label }),
            Err(error) => {
                self.fail(error);
                self
            }
        }
    }

    fn end_block(&mut self, kind: BlockKind) -> &mut Self {
        if self.latch.has_failed() {
            return self;
        }
        let line = self.lines.next_line_number();
        match self.nesting.close(kind, line) {
            Ok(()) => self.push(Statement::End),
            Err(error) => {
                self.fail(error);
                self
            }
        }
    }
}

fn write_text<W: Write>(dest: &mut W, text: &str) -> io::Result<()> {
    dest.write_all(text.as_bytes())?;
    dest.flush()
}

impl Default for SequenceDiagram<Vec<u8>> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<W: Write> fmt::Display for SequenceDiagram<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
