//! Property-based tests for the conversation store
//!
//! These tests verify key invariants hold across arbitrary inputs:
//! - Accepted user text grows the conversation by exactly one trimmed turn
//! - Rejected input never changes the conversation
//! - Assistant turns are always accepted
//! - Order of appends is order of messages

use super::*;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Text with at least one visible character, possibly padded
fn arb_visible_text() -> impl Strategy<Value = String> {
    ("[ \t\n]{0,3}", "[a-zA-Z0-9?!.,]{1,40}", "[ \t\n]{0,3}")
        .prop_map(|(lead, body, tail)| format!("{lead}{body}{tail}"))
}

/// Text that trims to nothing
fn arb_blank_text() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,10}"
}

#[derive(Debug, Clone)]
enum Op {
    User(String),
    Assistant(String),
    Begin,
    End,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop_oneof![arb_visible_text(), arb_blank_text()].prop_map(Op::User),
        "[a-zA-Z ]{0,20}".prop_map(Op::Assistant),
        Just(Op::Begin),
        Just(Op::End),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn accepted_user_text_appends_one_trimmed_turn(text in arb_visible_text()) {
        let mut store = ConversationStore::new("Welcome");
        let before = store.len();

        let snapshot = store.append_user(&text).unwrap();

        prop_assert_eq!(snapshot.len(), before + 1);
        let last = snapshot.last().unwrap();
        prop_assert_eq!(last.role(), Role::User);
        prop_assert_eq!(last.text(), text.trim());
    }

    #[test]
    fn blank_text_is_rejected_without_change(text in arb_blank_text()) {
        let mut store = ConversationStore::new("Welcome");
        let before = store.snapshot();

        prop_assert_eq!(store.append_user(&text), Err(ValidationError::EmptyMessage));
        prop_assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn pending_rejects_any_user_text(
        text in prop_oneof![arb_visible_text(), arb_blank_text()]
    ) {
        let mut store = ConversationStore::new("Welcome");
        store.begin_pending();
        let before = store.snapshot();

        prop_assert_eq!(store.append_user(&text), Err(ValidationError::ReplyPending));
        prop_assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn random_operation_sequences_keep_invariants(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = ConversationStore::new("Welcome");
        let mut expected: Vec<(Role, String)> = vec![(Role::Assistant, "Welcome".to_string())];

        for op in ops {
            match op {
                Op::User(text) => {
                    let result = store.append_user(&text);
                    if store.is_pending() {
                        prop_assert_eq!(result, Err(ValidationError::ReplyPending));
                    } else if text.trim().is_empty() {
                        prop_assert_eq!(result, Err(ValidationError::EmptyMessage));
                    } else {
                        prop_assert!(result.is_ok());
                        expected.push((Role::User, text.trim().to_string()));
                    }
                }
                Op::Assistant(text) => {
                    store.append_assistant(text.clone());
                    expected.push((Role::Assistant, text));
                }
                Op::Begin => store.begin_pending(),
                Op::End => store.end_pending(),
            }
        }

        let actual: Vec<(Role, String)> = store
            .snapshot()
            .iter()
            .map(|m| (m.role(), m.text().to_string()))
            .collect();
        prop_assert_eq!(actual, expected);

        // The greeting stays first and is never a user turn
        prop_assert_eq!(store.snapshot().messages()[0].role(), Role::Assistant);
    }
}
