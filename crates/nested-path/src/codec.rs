//! Conversions between joined paths and segment sequences.

use crate::Segments;

/// Anything that can be used as a path: a joined string or a sequence of
/// segments.
///
/// Strings are split on the separator; sequences are taken as already split.
/// In both cases empty segments are dropped.
pub trait PathLike {
    /// Normalised segments of this path.
    fn to_segments(&self, separator: &str) -> Segments;

    /// Joined form of this path.
    ///
    /// Sequences are filtered and joined; strings are returned unchanged.
    fn to_path(&self, separator: &str) -> String;
}

fn split(path: &str, separator: &str) -> Segments {
    if path.is_empty() {
        return Vec::new();
    }
    // `str::split("")` yields every char boundary, which is never what a
    // caller configuring an empty separator wants.
    if separator.is_empty() {
        return vec![path.to_string()];
    }
    path.split(separator)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn join<S: AsRef<str>>(segments: &[S], separator: &str) -> String {
    let mut out = String::new();
    for segment in segments.iter().map(AsRef::as_ref) {
        if segment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(separator);
        }
        out.push_str(segment);
    }
    out
}

impl PathLike for str {
    fn to_segments(&self, separator: &str) -> Segments {
        split(self, separator)
    }

    fn to_path(&self, _separator: &str) -> String {
        self.to_string()
    }
}

impl PathLike for String {
    fn to_segments(&self, separator: &str) -> Segments {
        split(self, separator)
    }

    fn to_path(&self, _separator: &str) -> String {
        self.clone()
    }
}

impl<S: AsRef<str>> PathLike for [S] {
    fn to_segments(&self, _separator: &str) -> Segments {
        self.iter()
            .map(AsRef::as_ref)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn to_path(&self, separator: &str) -> String {
        join(self, separator)
    }
}

impl<S: AsRef<str>> PathLike for Vec<S> {
    fn to_segments(&self, separator: &str) -> Segments {
        self.as_slice().to_segments(separator)
    }

    fn to_path(&self, separator: &str) -> String {
        self.as_slice().to_path(separator)
    }
}

impl<S: AsRef<str>, const N: usize> PathLike for [S; N] {
    fn to_segments(&self, separator: &str) -> Segments {
        self.as_slice().to_segments(separator)
    }

    fn to_path(&self, separator: &str) -> String {
        self.as_slice().to_path(separator)
    }
}

impl<T: PathLike + ?Sized> PathLike for &T {
    fn to_segments(&self, separator: &str) -> Segments {
        (**self).to_segments(separator)
    }

    fn to_path(&self, separator: &str) -> String {
        (**self).to_path(separator)
    }
}

/// An owned path in either representation.
///
/// Useful where a path has to be stored before the separator that will
/// interpret it is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnedPath {
    Joined(String),
    Segments(Segments),
}

impl PathLike for OwnedPath {
    fn to_segments(&self, separator: &str) -> Segments {
        match self {
            OwnedPath::Joined(path) => path.to_segments(separator),
            OwnedPath::Segments(segments) => segments.to_segments(separator),
        }
    }

    fn to_path(&self, separator: &str) -> String {
        match self {
            OwnedPath::Joined(path) => path.clone(),
            OwnedPath::Segments(segments) => segments.to_path(separator),
        }
    }
}

impl From<&str> for OwnedPath {
    fn from(path: &str) -> Self {
        OwnedPath::Joined(path.to_string())
    }
}

impl From<String> for OwnedPath {
    fn from(path: String) -> Self {
        OwnedPath::Joined(path)
    }
}

impl From<Segments> for OwnedPath {
    fn from(segments: Segments) -> Self {
        OwnedPath::Segments(segments)
    }
}

impl From<&[&str]> for OwnedPath {
    fn from(segments: &[&str]) -> Self {
        OwnedPath::Segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[String]> for OwnedPath {
    fn from(segments: &[String]) -> Self {
        OwnedPath::Segments(segments.to_vec())
    }
}

/// Split a path into normalised segments.
///
/// # Example
///
/// ```
/// use nested_path::segments_from_path;
///
/// assert_eq!(segments_from_path("a/b", "/"), vec!["a", "b"]);
/// assert_eq!(segments_from_path(&["a", "", "b"], "."), vec!["a", "b"]);
/// assert!(segments_from_path("", ".").is_empty());
/// ```
pub fn segments_from_path<P: PathLike + ?Sized>(path: &P, separator: &str) -> Segments {
    path.to_segments(separator)
}

/// Join a path into its string form.
///
/// Segment sequences are filtered and joined with `separator`; a string is
/// returned unchanged.
pub fn path_from_segments<P: PathLike + ?Sized>(path: &P, separator: &str) -> String {
    path.to_path(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_drops_empty_segments() {
        assert_eq!(segments_from_path(".a..b.", "."), vec!["a", "b"]);
        assert_eq!(segments_from_path("...", "."), Vec::<String>::new());
    }

    #[test]
    fn test_split_custom_separator() {
        assert_eq!(segments_from_path("a::b::c", "::"), vec!["a", "b", "c"]);
        // The default separator has no meaning under a custom one.
        assert_eq!(segments_from_path("a.b", "/"), vec!["a.b"]);
    }

    #[test]
    fn test_split_empty_separator() {
        assert_eq!(segments_from_path("abc", ""), vec!["abc"]);
        assert!(segments_from_path("", "").is_empty());
    }

    #[test]
    fn test_sequence_input() {
        let segments = vec!["a".to_string(), String::new(), "c".to_string()];
        assert_eq!(segments_from_path(&segments, "."), vec!["a", "c"]);
        assert_eq!(path_from_segments(&segments, "."), "a.c");
        assert_eq!(path_from_segments(&["x", "y"], "/"), "x/y");
    }

    #[test]
    fn test_string_path_is_returned_unchanged() {
        assert_eq!(path_from_segments(".a..b", "."), ".a..b");
        assert_eq!(path_from_segments(&String::from("a.b"), "/"), "a.b");
    }

    #[test]
    fn test_segments_keep_separator_characters() {
        // Segments are opaque: a segment containing the separator survives
        // as one segment when passed as a sequence.
        let segments = segments_from_path(&["a.b", "c"], ".");
        assert_eq!(segments, vec!["a.b", "c"]);
    }

    #[test]
    fn test_owned_path() {
        let joined = OwnedPath::from("a.b");
        assert_eq!(joined.to_segments("."), vec!["a", "b"]);
        assert_eq!(joined.to_path("/"), "a.b");

        let seq = OwnedPath::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(seq.to_path("/"), "a/b");
        assert_eq!(seq.to_segments("/"), vec!["a", "b"]);
    }
}
