//! Store and per-call options.

use serde::{Deserialize, Serialize};

use nested_path::DEFAULT_SEPARATOR;

/// Partially specified options.
///
/// Unset fields fall through to the next, less specific layer when merged:
/// per-call options over store options over library defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub separator: Option<String>,
    pub immutable: Option<bool>,
    pub array: Option<bool>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn immutable(mut self, immutable: bool) -> Self {
        self.immutable = Some(immutable);
        self
    }

    pub fn array(mut self, array: bool) -> Self {
        self.array = Some(array);
        self
    }

    /// Layer `over` on top of `self`; fields set in `over` win.
    pub fn merge(&self, over: &Options) -> Options {
        Options {
            separator: over.separator.clone().or_else(|| self.separator.clone()),
            immutable: over.immutable.or(self.immutable),
            array: over.array.or(self.array),
        }
    }

    /// Fill unset fields with the library defaults.
    pub fn resolve(&self) -> ResolvedOptions {
        let defaults = ResolvedOptions::default();
        ResolvedOptions {
            separator: self.separator.clone().unwrap_or(defaults.separator),
            immutable: self.immutable.unwrap_or(defaults.immutable),
            array: self.array.unwrap_or(defaults.array),
        }
    }
}

/// Fully specified options, as consumed by the accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub separator: String,
    pub immutable: bool,
    /// Create sequences instead of maps for numeric segments.
    pub array: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            immutable: false,
            array: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let resolved = Options::new().resolve();
        assert_eq!(resolved.separator, ".");
        assert!(!resolved.immutable);
        assert!(!resolved.array);
    }

    #[test]
    fn test_merge_precedence() {
        let store = Options::new().separator("/").array(true);
        let call = Options::new().immutable(true).array(false);
        let merged = store.merge(&call).resolve();
        assert_eq!(merged.separator, "/");
        assert!(merged.immutable);
        assert!(!merged.array);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: Options = serde_json::from_str(r#"{"separator": "::"}"#).unwrap();
        assert_eq!(options, Options::new().separator("::"));
    }
}
