//! JSON build scripts
//!
//! A script is a JSON array of steps, each naming one builder call:
//!
//! ```json
//! [
//!   {"participant": "A"},
//!   {"participant": "B"},
//!   "lf",
//!   {"loop_start": "until done"},
//!   {"sync_request": {"from": "A", "to": "B", "message": "hi"}},
//!   "loop_end"
//! ]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Write;
use tracing::{debug, trace};

use seqdiag::{NotePlacement, SequenceDiagram};

/// Payload of a message step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageStep {
    pub from: String,
    pub to: String,
    pub message: String,
}

/// Note placement as written in scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Over,
    LeftOf,
    RightOf,
}

impl From<Placement> for NotePlacement {
    fn from(value: Placement) -> Self {
        match value {
            Placement::Over => NotePlacement::Over,
            Placement::LeftOf => NotePlacement::LeftOf,
            Placement::RightOf => NotePlacement::RightOf,
        }
    }
}

/// One builder call; step names match the builder methods
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Participant(String),
    ParticipantAs { name: String, alias: String },
    Actor(String),
    ActorAs { name: String, alias: String },
    SyncRequest(MessageStep),
    SyncResponse(MessageStep),
    AsyncRequest(MessageStep),
    AsyncResponse(MessageStep),
    RequestError(MessageStep),
    ResponseError(MessageStep),
    Lf,
    Activate(String),
    Deactivate(String),
    Note {
        placement: Placement,
        participants: Vec<String>,
        message: String,
    },
    LoopStart(String),
    LoopEnd,
    AltStart(String),
    AltElse(String),
    AltEnd,
    OptStart(String),
    OptEnd,
    ParStart(String),
    ParAnd(String),
    ParEnd,
    BreakStart(String),
    BreakEnd,
    CriticalStart(String),
    CriticalOption(String),
    CriticalEnd,
    GroupStart(String),
    GroupEnd,
}

impl Step {
    /// Perform this step on `diagram`
    pub fn apply<W: Write>(&self, diagram: &mut SequenceDiagram<W>) {
        match self {
            Step::Participant(name) => diagram.participant(name),
            Step::ParticipantAs { name, alias } => diagram.participant_as(name, alias),
            Step::Actor(name) => diagram.actor(name),
            Step::ActorAs { name, alias } => diagram.actor_as(name, alias),
            Step::SyncRequest(m) => diagram.sync_request(&m.from, &m.to, &m.message),
            Step::SyncResponse(m) => diagram.sync_response(&m.from, &m.to, &m.message),
            Step::AsyncRequest(m) => diagram.async_request(&m.from, &m.to, &m.message),
            Step::AsyncResponse(m) => diagram.async_response(&m.from, &m.to, &m.message),
            Step::RequestError(m) => diagram.request_error(&m.from, &m.to, &m.message),
            Step::ResponseError(m) => diagram.response_error(&m.from, &m.to, &m.message),
            Step::Lf => diagram.lf(),
            Step::Activate(name) => diagram.activate(name),
            Step::Deactivate(name) => diagram.deactivate(name),
            Step::Note {
                placement,
                participants,
                message,
            } => {
                let participants: Vec<&str> = participants.iter().map(String::as_str).collect();
                diagram.note((*placement).into(), &participants, message)
            }
            Step::LoopStart(label) => diagram.loop_start(label),
            Step::LoopEnd => diagram.loop_end(),
            Step::AltStart(label) => diagram.alt_start(label),
            Step::AltElse(label) => diagram.alt_else(label),
            Step::AltEnd => diagram.alt_end(),
            Step::OptStart(label) => diagram.opt_start(label),
            Step::OptEnd => diagram.opt_end(),
            Step::ParStart(label) => diagram.par_start(label),
            Step::ParAnd(label) => diagram.par_and(label),
            Step::ParEnd => diagram.par_end(),
            Step::BreakStart(label) => diagram.break_start(label),
            Step::BreakEnd => diagram.break_end(),
            Step::CriticalStart(label) => diagram.critical_start(label),
            Step::CriticalOption(label) => diagram.critical_option(label),
            Step::CriticalEnd => diagram.critical_end(),
            Step::GroupStart(label) => diagram.group_start(label),
            Step::GroupEnd => diagram.group_end(),
        };
    }
}

/// Parse a JSON script into steps
pub fn parse_script(content: &str) -> Result<Vec<Step>> {
    let steps: Vec<Step> =
        serde_json::from_str(content).context("Failed to parse build script")?;
    debug!(steps = steps.len(), "Parsed build script");
    Ok(steps)
}

/// Apply every step in order
pub fn replay<W: Write>(steps: &[Step], diagram: &mut SequenceDiagram<W>) {
    for (index, step) in steps.iter().enumerate() {
        trace!(index, ?step, "Replaying step");
        step.apply(diagram);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_step_shapes() {
        let script = r#"[
            {"participant": "A"},
            {"participant_as": {"name": "B", "alias": "Bob"}},
            "lf",
            {"sync_request": {"from": "A", "to": "B", "message": "hi"}},
            {"note": {"placement": "left_of", "participants": ["A"], "message": "n"}},
            {"critical_option": "fallback"},
            "group_end"
        ]"#;
        let steps = parse_script(script).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Participant("A".to_string()),
                Step::ParticipantAs {
                    name: "B".to_string(),
                    alias: "Bob".to_string()
                },
                Step::Lf,
                Step::SyncRequest(MessageStep {
                    from: "A".to_string(),
                    to: "B".to_string(),
                    message: "hi".to_string()
                }),
                Step::Note {
                    placement: Placement::LeftOf,
                    participants: vec!["A".to_string()],
                    message: "n".to_string()
                },
                Step::CriticalOption("fallback".to_string()),
                Step::GroupEnd,
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_step() {
        let result = parse_script(r#"[{"teleport": "A"}]"#);
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("build script"));
    }

    #[test]
    fn test_replay_builds_diagram() {
        let steps = parse_script(
            r#"[
                {"participant": "A"},
                {"participant": "B"},
                "lf",
                {"sync_request": {"from": "A", "to": "B", "message": "hi"}},
                {"sync_response": {"from": "B", "to": "A", "message": "ok"}}
            ]"#,
        )
        .unwrap();

        let mut diagram = SequenceDiagram::default();
        replay(&steps, &mut diagram);
        assert_eq!(
            diagram.render(),
            "sequenceDiagram\n    participant A\n    participant B\n\n    A->>B: hi\n    B-->>A: ok"
        );
    }

    #[test]
    fn test_replay_blocks_and_notes() {
        let steps = parse_script(
            r#"[
                {"par_start": "fan out"},
                {"async_request": {"from": "A", "to": "B", "message": "1"}},
                {"par_and": "second"},
                {"async_request": {"from": "A", "to": "C", "message": "2"}},
                "par_end",
                {"note": {"placement": "over", "participants": ["B", "C"], "message": "done"}}
            ]"#,
        )
        .unwrap();

        let mut diagram = SequenceDiagram::default();
        replay(&steps, &mut diagram);
        assert!(diagram.last_error().is_none());
        assert_eq!(
            &diagram.lines()[1..],
            &[
                "    par fan out",
                "    A-)B: 1",
                "    and second",
                "    A-)C: 2",
                "    end",
                "    Note over B,C: done",
            ]
        );
    }
}
