use nested_object::{delete_immutable, get, has, set, set_immutable, Node, ResolvedOptions};
use proptest::prelude::*;
use serde_json::json;

fn path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop_oneof![Just("a"), Just("b"), Just("0"), Just("1")], 1..4)
        .prop_map(|segments| segments.into_iter().map(String::from).collect())
}

fn base() -> Node {
    Node::from(json!({"a": {"b": 1, "0": [1, 2]}, "b": [{"a": true}], "1": "x"}))
}

proptest! {
    #[test]
    fn set_then_get_returns_value(path in path_strategy(), array in any::<bool>(), n in any::<i32>()) {
        let options = ResolvedOptions { array, ..ResolvedOptions::default() };
        let mut root = base();
        set(&mut root, &path, Node::from(n), &options);
        prop_assert_eq!(get(&root, &path), Some(&Node::from(n)));
    }

    #[test]
    fn immutable_writes_leave_input_untouched(path in path_strategy(), array in any::<bool>(), n in any::<i32>()) {
        let options = ResolvedOptions { array, ..ResolvedOptions::default() };
        let root = base();
        let written = set_immutable(&root, &path, Node::from(n), &options);
        prop_assert_eq!(&root, &base());
        prop_assert_eq!(get(&written, &path), Some(&Node::from(n)));

        let removed = delete_immutable(&written, &path, &options);
        prop_assert_eq!(get(&written, &path), Some(&Node::from(n)));
        let numeric_tail = path.last().map_or(false, |s| s.parse::<usize>().is_ok());
        if !numeric_tail {
            prop_assert!(!has(&removed, &path));
        }
    }

    #[test]
    fn immutable_and_mutable_set_agree(path in path_strategy(), array in any::<bool>()) {
        let options = ResolvedOptions { array, ..ResolvedOptions::default() };
        let mut root = base();
        set(&mut root, &path, Node::from("v"), &options);
        let fresh = set_immutable(&base(), &path, Node::from("v"), &options);
        prop_assert_eq!(root, fresh);
    }
}
