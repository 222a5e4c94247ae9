//! Raw value storage behind bound fields
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::path::Path;
use indexmap::IndexMap;
use serde_json::Value;

/// Last raw (untransformed) value written to each bound path.
///
/// An entry holding `None` is a bound path whose raw value is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Register {
    entries: IndexMap<Path, Option<Value>>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value at `path`; `None` when absent or not registered
    pub fn get(&self, path: &Path) -> Option<&Value> {
        self.entries.get(path).and_then(Option::as_ref)
    }

    pub fn set(&mut self, path: Path, raw: Option<Value>) {
        self.entries.insert(path, raw);
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Drop the entry, returning its raw value
    pub fn remove(&mut self, path: &Path) -> Option<Value> {
        self.entries.shift_remove(path).flatten()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, Option<&Value>)> {
        self.entries.iter().map(|(path, raw)| (path, raw.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_entries_are_registered() {
        let mut register = Register::new();
        register.set(Path::parse("a"), None);

        assert!(register.contains(&Path::parse("a")));
        assert_eq!(register.get(&Path::parse("a")), None);
        assert_eq!(register.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let mut register = Register::new();
        register.set(Path::parse("a.b"), Some(json!(1)));
        register.set(Path::parse("a.b"), Some(json!(2)));

        assert_eq!(register.get(&Path::parse("a.b")), Some(&json!(2)));
        assert_eq!(register.remove(&Path::parse("a.b")), Some(json!(2)));
        assert!(register.is_empty());
    }
}
