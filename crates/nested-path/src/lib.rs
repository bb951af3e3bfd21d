//! Path codec for nested data.
//!
//! A path is an ordered sequence of non-empty string segments. Callers may
//! hand paths around either as a joined string (`"user.name"`, with a
//! configurable separator) or as the segment sequence itself; both forms are
//! accepted wherever a [`PathLike`] is expected. Empty segments, such as the
//! ones produced by a leading or trailing separator, are discarded. A path of
//! zero segments addresses the root value.
//!
//! # Example
//!
//! ```
//! use nested_path::{path_from_segments, segments_from_path};
//!
//! let segments = segments_from_path("user..name.", ".");
//! assert_eq!(segments, vec!["user", "name"]);
//!
//! assert_eq!(path_from_segments(&segments, "/"), "user/name");
//!
//! // A joined string is returned as-is, without normalisation.
//! assert_eq!(path_from_segments("a..b", "."), "a..b");
//! ```

use thiserror::Error;

pub mod codec;
pub use codec::{path_from_segments, segments_from_path, OwnedPath, PathLike};

pub mod util;
pub use util::{concat, is_child, is_index, is_root, parent, strip_prefix};

/// A single key or index component of a path.
pub type Segment = String;

/// A normalised path: every segment is non-empty.
pub type Segments = Vec<Segment>;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("NO_PARENT")]
    NoParent,
    #[error("NOT_A_CHILD")]
    NotAChild,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_separator_round_trip() {
        let segments = segments_from_path("a.b.c", DEFAULT_SEPARATOR);
        assert_eq!(segments, vec!["a", "b", "c"]);
        assert_eq!(path_from_segments(&segments, DEFAULT_SEPARATOR), "a.b.c");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(PathError::NoParent.to_string(), "NO_PARENT");
        assert_eq!(PathError::NotAChild.to_string(), "NOT_A_CHILD");
    }
}
