use crate::{PathError, Segments};

/// Check if a path points to the root value.
pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
pub fn is_child(parent: &[String], child: &[String]) -> bool {
    parent.len() < child.len() && child[..parent.len()] == *parent
}

/// Get the parent path of a given path.
pub fn parent(path: &[String]) -> Result<Segments, PathError> {
    match path.split_last() {
        Some((_, parent)) => Ok(parent.to_vec()),
        None => Err(PathError::NoParent),
    }
}

/// Check if a segment is a sequence index: a non-empty run of ASCII digits.
///
/// Leading zeros are accepted (`"007"` addresses index 7).
pub fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Append `relative` to `prefix`.
pub fn concat(prefix: &[String], relative: &[String]) -> Segments {
    let mut out = Vec::with_capacity(prefix.len() + relative.len());
    out.extend_from_slice(prefix);
    out.extend_from_slice(relative);
    out
}

/// Express `path` relative to `prefix`.
///
/// `prefix` itself maps to the empty (root) path.
pub fn strip_prefix(prefix: &[String], path: &[String]) -> Result<Segments, PathError> {
    if path.len() < prefix.len() || path[..prefix.len()] != *prefix {
        return Err(PathError::NotAChild);
    }
    Ok(path[prefix.len()..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(steps: &[&str]) -> Vec<String> {
        steps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_root() {
        assert!(is_root(&[]));
        assert!(!is_root(&path(&["a"])));
    }

    #[test]
    fn test_is_child() {
        assert!(is_child(&path(&["a"]), &path(&["a", "b"])));
        assert!(is_child(&[], &path(&["a"])));
        assert!(!is_child(&path(&["a"]), &path(&["a"])));
        assert!(!is_child(&path(&["a", "b"]), &path(&["a"])));
        assert!(!is_child(&path(&["x"]), &path(&["a", "b"])));
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent(&path(&["a", "b"])).unwrap(), path(&["a"]));
        assert_eq!(parent(&path(&["a"])).unwrap(), Vec::<String>::new());
        assert_eq!(parent(&[]), Err(PathError::NoParent));
    }

    #[test]
    fn test_is_index() {
        assert!(is_index("0"));
        assert!(is_index("42"));
        assert!(is_index("007"));
        assert!(!is_index(""));
        assert!(!is_index("-1"));
        assert!(!is_index("1.5"));
        assert!(!is_index("a1"));
    }

    #[test]
    fn test_concat_and_strip_prefix() {
        let prefix = path(&["user"]);
        let full = concat(&prefix, &path(&["name", "first"]));
        assert_eq!(full, path(&["user", "name", "first"]));
        assert_eq!(strip_prefix(&prefix, &full).unwrap(), path(&["name", "first"]));
        assert_eq!(strip_prefix(&prefix, &prefix).unwrap(), Vec::<String>::new());
        assert_eq!(strip_prefix(&full, &prefix), Err(PathError::NotAChild));
        assert_eq!(
            strip_prefix(&prefix, &path(&["other"])),
            Err(PathError::NotAChild)
        );
    }
}
