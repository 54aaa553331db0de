//! Scan options.
//!
//! The keys mirror the original plugin configuration: each flag relaxes one
//! scope gate, and `enable-all` relaxes all of them at once. Everything
//! defaults to `false` (restrictive).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScanOptions {
    /// Process calls even when the owning scope does not descend from
    /// `Sinatra::Base`.
    pub enable_outside_sinatra_base: bool,
    /// Process receiver-qualified calls (e.g. `SomeClass.get`) even when
    /// the receiver cannot be confirmed to descend from `Sinatra::Base`.
    pub enable_unknown_namespaces: bool,
    /// Process calls made from within instance method bodies.
    pub enable_instance_methods: bool,
    /// Do not limit processing at all (implies the other three).
    pub enable_all: bool,
}

impl ScanOptions {
    /// Parse options from a JSON object keyed by the kebab-case flag names.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// All gates disabled.
    pub fn permissive() -> Self {
        Self {
            enable_all: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_restrictive() {
        let options = ScanOptions::default();
        assert!(!options.enable_outside_sinatra_base);
        assert!(!options.enable_unknown_namespaces);
        assert!(!options.enable_instance_methods);
        assert!(!options.enable_all);
    }

    #[test]
    fn deserializes_kebab_case_keys() {
        let options = ScanOptions::from_json(
            r#"{"enable-outside-sinatra-base": true, "enable-instance-methods": true}"#,
        )
        .unwrap();
        assert!(options.enable_outside_sinatra_base);
        assert!(options.enable_instance_methods);
        assert!(!options.enable_unknown_namespaces);
        assert!(!options.enable_all);
    }

    #[test]
    fn empty_object_yields_defaults() {
        let options = ScanOptions::from_json("{}").unwrap();
        assert_eq!(options, ScanOptions::default());
    }
}
