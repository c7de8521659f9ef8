//! Property-based tests for the compound-attribute codecs.
//!
//! These tests use proptest to verify round-trip and canonical-form
//! properties across many randomly generated values.

use automatawiki::codec::{list, GuardCodec, GuardSyntax};
use automatawiki::core::{Assignment, GuardExpr, Identifier, Operand, Relation, Transition};
use automatawiki::DecodeError;
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,6}"
}

fn identifier() -> impl Strategy<Value = Identifier> {
    name().prop_filter_map("keywords are reserved", |name| Identifier::new(name).ok())
}

/// Mostly near-identifiers, so keywords and stray characters turn up often.
fn any_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["true", "and", "or", "not", "", " ", "x y", "1x", "&&"])
            .prop_map(String::from),
        "[a-z &|!()<>=0-9_-]{0,6}",
        any::<String>(),
    ]
}

prop_compose! {
    fn arbitrary_operand()(
        variable in identifier(),
        literal in any::<i64>(),
        is_literal in any::<bool>(),
    ) -> Operand {
        if is_literal {
            Operand::Literal(literal)
        } else {
            Operand::Variable(variable)
        }
    }
}

fn arbitrary_relation() -> impl Strategy<Value = Relation> {
    prop::sample::select(Relation::ALL.to_vec())
}

fn arbitrary_guard() -> impl Strategy<Value = GuardExpr> {
    let leaf = prop_oneof![
        Just(GuardExpr::True),
        identifier().prop_map(GuardExpr::Var),
        (arbitrary_operand(), arbitrary_relation(), arbitrary_operand())
            .prop_map(|(left, op, right)| GuardExpr::Comparison { left, op, right }),
    ];

    leaf.prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| GuardExpr::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| GuardExpr::or(l, r)),
            inner.prop_map(GuardExpr::not),
        ]
    })
}

fn arbitrary_tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9_.]{1,8}", 0..8)
}

prop_compose! {
    fn arbitrary_transition()(
        from in name(),
        to in name(),
        symbol in name(),
        params in prop::collection::vec(name(), 0..4),
        guard in arbitrary_guard(),
        assignments in prop::collection::vec((name(), "[a-z0-9+* ]{1,8}"), 0..3),
    ) -> Transition {
        Transition {
            from,
            to,
            symbol,
            params,
            guard,
            assignments: assignments
                .into_iter()
                .map(|(target, expression)| Assignment::new(target, expression))
                .collect(),
        }
    }
}

proptest! {
    #[test]
    fn list_roundtrip(items in arbitrary_tokens()) {
        let encoded = list::encode(items.as_slice());
        prop_assert_eq!(list::decode(&encoded).unwrap(), items);
    }

    #[test]
    fn list_decode_ignores_padding(items in prop::collection::vec("[a-z0-9]{1,6}", 1..6)) {
        let padded = items
            .iter()
            .map(|item| format!("  {item}\t"))
            .collect::<Vec<_>>()
            .join(",");
        prop_assert_eq!(list::decode(&padded).unwrap(), items);
    }

    #[test]
    fn list_rejects_empty_tokens(
        before in prop::collection::vec("[a-z]{1,4}", 0..3),
        after in prop::collection::vec("[a-z]{1,4}", 0..3),
    ) {
        let mut items = before;
        items.push(String::new());
        items.extend(after);
        let text = items.join(",");
        prop_assume!(!text.is_empty());

        prop_assert!(list::decode(&text).is_err());
    }

    #[test]
    fn guard_roundtrip(guard in arbitrary_guard()) {
        let codec = GuardCodec::new();
        let encoded = codec.encode(&guard);
        prop_assert_eq!(codec.decode(&encoded).unwrap(), guard);
    }

    #[test]
    fn every_constructible_variable_round_trips(name in any_name()) {
        let codec = GuardCodec::new();
        match GuardExpr::var(name.as_str()) {
            Ok(guard) => prop_assert_eq!(codec.decode(&codec.encode(&guard)).unwrap(), guard),
            Err(err) => {
                prop_assert_eq!(err, DecodeError::InvalidIdentifier { name: name.clone() });
                prop_assert!(Operand::var(name.as_str()).is_err());
            }
        }
    }

    #[test]
    fn guard_within_depth_limit_round_trips(guard in arbitrary_guard()) {
        let codec = GuardCodec::new().with_max_depth(3);
        let decoded = codec.decode(&codec.encode(&guard));
        prop_assert_eq!(decoded.is_ok(), codec.check_depth(&guard).is_ok());
        if let Ok(decoded) = decoded {
            prop_assert_eq!(decoded, guard);
        }
    }

    #[test]
    fn guard_encoding_is_idempotent(guard in arbitrary_guard()) {
        let codec = GuardCodec::new();
        let once = codec.encode(&guard);
        let twice = codec.encode(&codec.decode(&once).unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn symbolic_guard_roundtrip(guard in arbitrary_guard()) {
        let codec = GuardCodec::new().with_syntax(GuardSyntax::Symbolic);
        let encoded = codec.encode(&guard);
        prop_assert_eq!(codec.decode(&encoded).unwrap(), guard);
    }

    #[test]
    fn spellings_decode_to_the_same_guard(guard in arbitrary_guard()) {
        let keyword = GuardCodec::new().encode(&guard);
        let symbolic = GuardCodec::new()
            .with_syntax(GuardSyntax::Symbolic)
            .encode(&guard);

        let codec = GuardCodec::new();
        prop_assert_eq!(codec.decode(&keyword).unwrap(), codec.decode(&symbolic).unwrap());
    }

    #[test]
    fn parenthesized_guard_decodes_to_the_same_tree(guard in arbitrary_guard()) {
        let wrapped = format!("({})", guard);
        prop_assert_eq!(wrapped.parse::<GuardExpr>().unwrap(), guard);
    }

    #[test]
    fn display_matches_codec(guard in arbitrary_guard()) {
        prop_assert_eq!(guard.to_string(), GuardCodec::new().encode(&guard));
    }

    #[test]
    fn transition_record_roundtrip(transition in arbitrary_transition()) {
        let record = transition.to_record();
        prop_assert_eq!(Transition::from_record(record).unwrap(), transition);
    }

    #[test]
    fn relabel_without_naming_is_identity(guard in arbitrary_guard()) {
        prop_assert_eq!(guard.relabel(&Default::default()), guard);
    }
}
