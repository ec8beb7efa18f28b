//! Block and activation pairing
//!
//! Under [`NestingPolicy::Strict`] the tracker keeps a stack of open blocks
//! and the list of open activations. Under [`NestingPolicy::Trusting`] it
//! records nothing and accepts every call.

use tracing::trace;

use crate::core::{BlockKind, ConstructionError, NestingPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenBlock {
    kind: BlockKind,
    label: String,
    line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenActivation {
    participant: String,
    line: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct NestingTracker {
    policy: NestingPolicy,
    blocks: Vec<OpenBlock>,
    activations: Vec<OpenActivation>,
}

impl NestingTracker {
    pub(crate) fn new(policy: NestingPolicy) -> Self {
        Self {
            policy,
            blocks: Vec::new(),
            activations: Vec::new(),
        }
    }

    /// Number of open blocks
    pub(crate) fn depth(&self) -> usize {
        self.blocks.len()
    }

    pub(crate) fn open(&mut self, kind: BlockKind, label: &str, line: usize) {
        if !self.policy.is_strict() {
            return;
        }
        self.blocks.push(OpenBlock {
            kind,
            label: label.to_string(),
            line,
        });
        trace!(%kind, depth = self.blocks.len(), "Opened block");
    }

    /// Check that a branch of `owner` is placed directly inside an `owner` block
    pub(crate) fn branch(
        &self,
        owner: BlockKind,
        keyword: &'static str,
        line: usize,
    ) -> Result<(), ConstructionError> {
        if !self.policy.is_strict() {
            return Ok(());
        }
        match self.blocks.last() {
            Some(open) if open.kind == owner => Ok(()),
            _ => Err(ConstructionError::MisplacedBranch {
                keyword,
                owner,
                line,
            }),
        }
    }

    pub(crate) fn close(&mut self, kind: BlockKind, line: usize) -> Result<(), ConstructionError> {
        if !self.policy.is_strict() {
            return Ok(());
        }
        match self.blocks.last() {
            None => Err(ConstructionError::UnmatchedEnd { kind, line }),
            Some(open) if open.kind != kind => Err(ConstructionError::MismatchedEnd {
                expected: open.kind,
                found: kind,
                line,
            }),
            Some(_) => {
                self.blocks.pop();
                trace!(%kind, depth = self.blocks.len(), "Closed block");
                Ok(())
            }
        }
    }

    pub(crate) fn activate(&mut self, participant: &str, line: usize) {
        if !self.policy.is_strict() {
            return;
        }
        self.activations.push(OpenActivation {
            participant: participant.to_string(),
            line,
        });
    }

    /// Close the most recent open activation of `participant`
    pub(crate) fn deactivate(
        &mut self,
        participant: &str,
        line: usize,
    ) -> Result<(), ConstructionError> {
        if !self.policy.is_strict() {
            return Ok(());
        }
        match self
            .activations
            .iter()
            .rposition(|open| open.participant == participant)
        {
            Some(index) => {
                self.activations.remove(index);
                Ok(())
            }
            None => Err(ConstructionError::UnmatchedDeactivate {
                participant: participant.to_string(),
                line,
            }),
        }
    }

    /// Report the first thing still left open
    ///
    /// The innermost open block is reported before any activation.
    pub(crate) fn verify_closed(&self) -> Result<(), ConstructionError> {
        if let Some(open) = self.blocks.last() {
            return Err(ConstructionError::UnclosedBlock {
                kind: open.kind,
                label: open.label.clone(),
                line: open.line,
            });
        }
        if let Some(open) = self.activations.first() {
            return Err(ConstructionError::UnclosedActivation {
                participant: open.participant.clone(),
                line: open.line,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_balanced_blocks() {
        let mut tracker = NestingTracker::new(NestingPolicy::Strict);
        tracker.open(BlockKind::Loop, "forever", 2);
        tracker.open(BlockKind::Break, "done", 3);
        assert_eq!(tracker.depth(), 2);
        assert!(tracker.close(BlockKind::Break, 4).is_ok());
        assert!(tracker.close(BlockKind::Loop, 5).is_ok());
        assert_eq!(tracker.depth(), 0);
        assert!(tracker.verify_closed().is_ok());
    }

    #[test]
    fn test_strict_unmatched_end() {
        let mut tracker = NestingTracker::new(NestingPolicy::Strict);
        assert_eq!(
            tracker.close(BlockKind::Opt, 2),
            Err(ConstructionError::UnmatchedEnd {
                kind: BlockKind::Opt,
                line: 2
            })
        );
    }

    #[test]
    fn test_strict_mismatched_end_keeps_block_open() {
        let mut tracker = NestingTracker::new(NestingPolicy::Strict);
        tracker.open(BlockKind::Loop, "x", 2);
        assert_eq!(
            tracker.close(BlockKind::Par, 3),
            Err(ConstructionError::MismatchedEnd {
                expected: BlockKind::Loop,
                found: BlockKind::Par,
                line: 3
            })
        );
        assert_eq!(tracker.depth(), 1);
    }

    #[test]
    fn test_strict_branch_needs_owner_on_top() {
        let mut tracker = NestingTracker::new(NestingPolicy::Strict);
        assert!(tracker.branch(BlockKind::Alt, "else", 2).is_err());
        tracker.open(BlockKind::Alt, "ok", 2);
        assert!(tracker.branch(BlockKind::Alt, "else", 3).is_ok());
        tracker.open(BlockKind::Loop, "inner", 4);
        assert_eq!(
            tracker.branch(BlockKind::Alt, "else", 5),
            Err(ConstructionError::MisplacedBranch {
                keyword: "else",
                owner: BlockKind::Alt,
                line: 5
            })
        );
    }

    #[test]
    fn test_strict_reports_innermost_unclosed_block() {
        let mut tracker = NestingTracker::new(NestingPolicy::Strict);
        tracker.open(BlockKind::Loop, "outer", 2);
        tracker.open(BlockKind::Critical, "inner", 3);
        tracker.activate("A", 4);
        assert_eq!(
            tracker.verify_closed(),
            Err(ConstructionError::UnclosedBlock {
                kind: BlockKind::Critical,
                label: "inner".to_string(),
                line: 3
            })
        );
    }

    #[test]
    fn test_strict_activations() {
        let mut tracker = NestingTracker::new(NestingPolicy::Strict);
        tracker.activate("A", 2);
        tracker.activate("A", 3);
        tracker.activate("B", 4);
        assert!(tracker.deactivate("A", 5).is_ok());
        assert!(tracker.deactivate("B", 6).is_ok());
        assert_eq!(
            tracker.verify_closed(),
            Err(ConstructionError::UnclosedActivation {
                participant: "A".to_string(),
                line: 2
            })
        );
        assert!(tracker.deactivate("A", 7).is_ok());
        assert!(tracker.deactivate("A", 8).is_err());
        assert!(tracker.verify_closed().is_ok());
    }

    #[test]
    fn test_trusting_accepts_everything() {
        let mut tracker = NestingTracker::new(NestingPolicy::Trusting);
        assert!(tracker.close(BlockKind::Loop, 2).is_ok());
        assert!(tracker.branch(BlockKind::Par, "and", 3).is_ok());
        assert!(tracker.deactivate("nobody", 4).is_ok());
        tracker.open(BlockKind::Group, "never closed", 5);
        tracker.activate("A", 6);
        assert_eq!(tracker.depth(), 0);
        assert!(tracker.verify_closed().is_ok());
    }
}
