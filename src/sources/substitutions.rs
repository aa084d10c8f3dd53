//! Element name aliases applied before lookup

use serde::{Deserialize, Serialize};

/// A single alias: any name containing `pattern` becomes `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSubstitution {
    pub pattern: String,
    pub replacement: String,
}

/// Ordered alias list; the first matching pattern wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameSubstitutions(Vec<NameSubstitution>);

impl NameSubstitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alias
    pub fn with(mut self, pattern: &str, replacement: &str) -> Self {
        self.0.push(NameSubstitution {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a raw source name, matching patterns case-insensitively
    pub fn apply(&self, name: &str) -> String {
        let folded = name.to_lowercase();
        self.0
            .iter()
            .find(|s| folded.contains(&s.pattern.to_lowercase()))
            .map(|s| s.replacement.clone())
            .unwrap_or_else(|| name.to_string())
    }
}

impl FromIterator<NameSubstitution> for NameSubstitutions {
    fn from_iter<I: IntoIterator<Item = NameSubstitution>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let subs = NameSubstitutions::new()
            .with("401k", "Retirement Plan")
            .with("401K Catch", "Catch Up");

        assert_eq!(subs.apply("401K CATCH UP"), "Retirement Plan");
        assert_eq!(subs.apply("Regular Pay"), "Regular Pay");
    }

    #[test]
    fn test_deserialize_from_json_list() {
        let json = r#"[{"pattern": "Dental", "replacement": "Dental Pretax"}]"#;
        let subs: NameSubstitutions = serde_json::from_str(json).unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs.apply("dental plan"), "Dental Pretax");
    }
}
