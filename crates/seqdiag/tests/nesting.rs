//! Block and activation pairing under both nesting policies

// =============================================================================
// Strict policy (default)
// =============================================================================

mod strict {
    use seqdiag::prelude::*;

    #[test]
    fn test_balanced_blocks_pass_check() {
        let mut diagram = SequenceDiagram::default();
        diagram
            .alt_start("ok")
            .sync_request("A", "B", "1")
            .alt_else("not ok")
            .loop_start("retry")
            .sync_request("A", "B", "2")
            .loop_end()
            .alt_end();
        assert_eq!(diagram.depth(), 0);
        assert_eq!(diagram.check(), Ok(()));
    }

    #[test]
    fn test_unmatched_end() {
        let mut diagram = SequenceDiagram::default();
        diagram.participant("A").group_end();
        assert_eq!(
            diagram.last_error(),
            Some(&ConstructionError::UnmatchedEnd {
                kind: BlockKind::Group,
                line: 3
            })
        );
        assert_eq!(diagram.render(), "sequenceDiagram\n    participant A");
    }

    #[test]
    fn test_mismatched_end() {
        let mut diagram = SequenceDiagram::default();
        diagram.loop_start("outer").break_start("inner").loop_end();
        assert_eq!(
            diagram.last_error(),
            Some(&ConstructionError::MismatchedEnd {
                expected: BlockKind::Break,
                found: BlockKind::Loop,
                line: 4
            })
        );
    }

    #[test]
    fn test_unclosed_block_latched_at_check() {
        let mut diagram = SequenceDiagram::default();
        diagram.opt_start("maybe").sync_request("A", "B", "x");
        assert!(diagram.last_error().is_none());

        let expected = ConstructionError::UnclosedBlock {
            kind: BlockKind::Opt,
            label: "maybe".to_string(),
            line: 2,
        };
        assert_eq!(diagram.check(), Err(expected.clone()));
        assert_eq!(diagram.last_error(), Some(&expected));
    }

    #[test]
    fn test_unclosed_block_latched_at_finalize() {
        let mut diagram = SequenceDiagram::default();
        diagram.critical_start("tx").sync_request("A", "B", "commit");
        let expected_text = diagram.render();

        let error = diagram.finalize().unwrap_err();
        assert!(matches!(
            error.construction(),
            Some(ConstructionError::UnclosedBlock {
                kind: BlockKind::Critical,
                ..
            })
        ));
        assert!(error.io_error().is_none());
        assert_eq!(diagram.into_inner(), expected_text.as_bytes());
    }

    #[test]
    fn test_branches_need_their_block() {
        let cases: [(fn(&mut SequenceDiagram<Vec<u8>>), &'static str, BlockKind); 3] = [
            (|d| { d.alt_else("x"); }, "else", BlockKind::Alt),
            (|d| { d.par_and("x"); }, "and", BlockKind::Par),
            (|d| { d.critical_option("x"); }, "option", BlockKind::Critical),
        ];
        for (call, keyword, owner) in cases {
            let mut diagram = SequenceDiagram::default();
            diagram.loop_start("not the owner");
            call(&mut diagram);
            assert_eq!(
                diagram.last_error(),
                Some(&ConstructionError::MisplacedBranch {
                    keyword,
                    owner,
                    line: 3
                })
            );
        }
    }

    #[test]
    fn test_branch_inside_nested_block_is_misplaced() {
        let mut diagram = SequenceDiagram::default();
        diagram.alt_start("a").opt_start("b").alt_else("c");
        assert!(matches!(
            diagram.last_error(),
            Some(ConstructionError::MisplacedBranch { .. })
        ));
    }

    #[test]
    fn test_unmatched_deactivate() {
        let mut diagram = SequenceDiagram::default();
        diagram.activate("A").deactivate("B");
        assert_eq!(
            diagram.last_error(),
            Some(&ConstructionError::UnmatchedDeactivate {
                participant: "B".to_string(),
                line: 3
            })
        );
    }

    #[test]
    fn test_unclosed_activation() {
        let mut diagram = SequenceDiagram::default();
        diagram.activate("A").activate("B").deactivate("B");
        assert_eq!(
            diagram.check(),
            Err(ConstructionError::UnclosedActivation {
                participant: "A".to_string(),
                line: 2
            })
        );
    }

    #[test]
    fn test_unclosed_block_reported_before_activation() {
        let mut diagram = SequenceDiagram::default();
        diagram.activate("A").loop_start("x");
        assert!(matches!(
            diagram.check(),
            Err(ConstructionError::UnclosedBlock { .. })
        ));
    }
}

// =============================================================================
// Trusting policy
// =============================================================================

mod trusting {
    use seqdiag::prelude::*;

    fn trusting() -> SequenceDiagram<Vec<u8>> {
        SequenceDiagram::with_config(
            Vec::new(),
            DiagramConfig::default().with_nesting(NestingPolicy::Trusting),
        )
    }

    #[test]
    fn test_mismatches_are_not_reported() {
        let mut diagram = trusting();
        diagram
            .loop_end()
            .alt_else("orphan")
            .par_start("p")
            .critical_end()
            .deactivate("nobody")
            .break_start("never closed");

        assert!(diagram.last_error().is_none());
        assert_eq!(diagram.check(), Ok(()));
        assert_eq!(
            &diagram.lines()[1..],
            &[
                "    end",
                "    else orphan",
                "    par p",
                "    end",
                "    deactivate nobody",
                "    break never closed",
            ]
        );
    }

    #[test]
    fn test_finalize_succeeds_with_open_blocks() {
        let mut diagram = trusting();
        diagram.group_start("open").activate("A");
        assert!(diagram.finalize().is_ok());
        assert_eq!(diagram.depth(), 0);
    }

    #[test]
    fn test_empty_note_still_latches() {
        let mut diagram = trusting();
        diagram.note_over(&[], "nobody");
        assert_eq!(
            diagram.last_error(),
            Some(&ConstructionError::EmptyNoteTarget { line: 2 })
        );
    }

    #[test]
    fn test_oversized_note_still_latches() {
        let mut diagram = trusting();
        diagram
            .note_right_of("A", "fine")
            .note(NotePlacement::RightOf, &["A", "B"], "x");
        assert!(matches!(
            diagram.last_error(),
            Some(ConstructionError::TooManyNoteTargets { line: 3, .. })
        ));
    }
}
