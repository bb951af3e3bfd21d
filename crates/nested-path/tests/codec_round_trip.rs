use nested_path::{path_from_segments, segments_from_path, OwnedPath, PathLike};
use proptest::prelude::*;

#[test]
fn round_trip_simple_path() {
    let segments = vec!["a", "b", "c"];
    let joined = path_from_segments(&segments, ".");
    assert_eq!(segments_from_path(&joined, "."), vec!["a", "b", "c"]);
}

#[test]
fn joined_and_sequence_forms_agree() {
    let cases: &[(&str, &[&str])] = &[
        ("", &[]),
        ("a", &["a"]),
        ("a.b", &["a", "b"]),
        (".a.b.", &["a", "b"]),
        ("a..b", &["a", "b"]),
        ("0.1.2", &["0", "1", "2"]),
    ];
    for (joined, segments) in cases {
        assert_eq!(
            segments_from_path(*joined, "."),
            segments_from_path(*segments, "."),
            "mismatch for {joined:?}"
        );
    }
}

#[test]
fn owned_paths_normalise_like_borrowed_ones() {
    let owned = OwnedPath::from(".x..y");
    assert_eq!(owned.to_segments("."), segments_from_path(".x..y", "."));
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_]{0,6}"
}

fn separator() -> impl Strategy<Value = String> {
    prop_oneof![Just(".".to_string()), Just("/".to_string()), Just("::".to_string())]
}

proptest! {
    #[test]
    fn segments_survive_a_round_trip(
        segments in prop::collection::vec(segment(), 0..8),
        separator in separator(),
    ) {
        let joined = path_from_segments(&segments, &separator);
        prop_assert_eq!(
            segments_from_path(&joined, &separator),
            segments_from_path(&segments, &separator)
        );
    }

    #[test]
    fn normalised_segments_are_never_empty(path in "[a-z.]{0,16}") {
        let segments = segments_from_path(&path, ".");
        prop_assert!(segments.iter().all(|segment| !segment.is_empty()));
    }
}
