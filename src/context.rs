use serde::{Deserialize, Serialize};

/// Knobs for one equivalency engine.
///
/// Deserializes from JSON with every field optional, e.g. `{"max_depth": 4}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquivalencyOptions {
    /// Members nested deeper than this are reported instead of compared.
    pub max_depth: usize,
}

impl Default for EquivalencyOptions {
    fn default() -> Self {
        Self { max_depth: 10 }
    }
}

impl EquivalencyOptions {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_keep_defaults() {
        let opts = EquivalencyOptions::from_json(r#"{"max_depth": 3}"#).unwrap();
        assert_eq!(opts, EquivalencyOptions::default().with_max_depth(3));
    }
}
