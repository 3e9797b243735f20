/// Property-based tests for node navigation and copy-on-write updates.
///
/// Strategies generate small JSON documents and short step sequences that
/// mix keys and indices, so that many sequences run through missing members,
/// `null` values and scalars.
use json_joy_json_node::{parse, Node, PathStep};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("c".to_string()),
        "[a-z]{1,4}",
    ]
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000i64).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Value::String),
    ]
}

fn arb_json() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..4)
                .prop_map(|members| Value::Object(members.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_step() -> impl Strategy<Value = PathStep> {
    prop_oneof![
        arb_key().prop_map(PathStep::Key),
        (0usize..4).prop_map(PathStep::Index),
    ]
}

fn arb_steps() -> impl Strategy<Value = Vec<PathStep>> {
    prop::collection::vec(arb_step(), 0..4)
}

proptest! {
    #[test]
    fn encode_decode_roundtrip(value in arb_json()) {
        let text = serde_json::to_vec(&value).unwrap();
        let node = parse(&text);
        prop_assert_eq!(node.value(), Some(&value));
        prop_assert_eq!(node.marshal().unwrap(), text);
    }

    #[test]
    fn get_in_is_chained_get(value in arb_json(), steps in arb_steps()) {
        let root = Node::new(value);
        let chained = steps.iter().fold(root.clone(), |node, step| node.get(step));
        prop_assert_eq!(root.get_in(&steps), chained);
    }

    #[test]
    fn get_without_steps_is_identity(value in arb_json()) {
        let root = Node::new(value);
        prop_assert_eq!(root.get_in(Vec::<PathStep>::new()), root);
    }

    #[test]
    fn set_never_mutates_source(value in arb_json(), steps in arb_steps(), new in arb_leaf()) {
        let root = Node::new(value.clone());
        let _ = root.set_in(&new, &steps);
        prop_assert_eq!(root.value(), Some(&value));
    }

    #[test]
    fn set_then_get_yields_value(value in arb_json(), steps in arb_steps(), new in arb_json()) {
        let root = Node::new(value);
        let updated = root.set_in(&new, &steps);
        if updated.error().is_none() {
            prop_assert!(updated.path().is_empty());
            let got = updated.get_in(&steps);
            prop_assert_eq!(got.value(), Some(&new));
        }
    }

    #[test]
    fn set_succeeds_where_get_finds_a_value(value in arb_json(), steps in arb_steps(), new in arb_leaf()) {
        let root = Node::new(value);
        let existing = root.get_in(&steps);
        if existing.error().is_none() {
            let updated = root.set_in(&new, &steps);
            prop_assert!(updated.error().is_none());
        }
    }

    #[test]
    fn failures_are_located_below_start(value in arb_json(), steps in arb_steps()) {
        let node = Node::new(value).get_in(&steps);
        if let Some(err) = node.error() {
            prop_assert!(err.path().len() <= steps.len());
            prop_assert_eq!(err.path().steps(), &steps[..err.path().len()]);
        }
    }
}
