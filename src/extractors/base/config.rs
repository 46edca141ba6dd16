// Parser configuration
//
// Everything the scanner can be tuned with lives here and is passed in by value,
// so independent parses with different settings never share state.

use serde::{Deserialize, Serialize};

use super::ExtractError;

/// Modifier keywords accepted in front of `function` / `class` by default
pub const DEFAULT_MODIFIERS: [&str; 6] = [
    "public",
    "static",
    "final",
    "abstract",
    "private",
    "protected",
];

/// Configuration for the module scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Emit `LambdaFunction` nodes for anonymous functions
    pub collect_anonymous_functions: bool,
    /// Emit `LambdaClass` nodes for `new class` expressions
    pub collect_anonymous_classes: bool,
    /// Columns one tab counts for during indentation normalization
    pub tab_width: usize,
    /// Prefix keywords collected into `Declaration::modifiers` (lower case)
    pub modifiers: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            collect_anonymous_functions: true,
            collect_anonymous_classes: true,
            tab_width: 4,
            modifiers: DEFAULT_MODIFIERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl ParserConfig {
    /// Load a configuration from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ExtractError> {
        let config: ParserConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_anonymous_functions(mut self, collect: bool) -> Self {
        self.collect_anonymous_functions = collect;
        self
    }

    pub fn with_anonymous_classes(mut self, collect: bool) -> Self {
        self.collect_anonymous_classes = collect;
        self
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Check the invariants the scanner relies on
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.tab_width == 0 {
            return Err(ExtractError::InvalidConfig(
                "tab_width must be at least 1".to_string(),
            ));
        }

        for modifier in &self.modifiers {
            if modifier.is_empty() || !modifier.bytes().all(|b| b.is_ascii_alphabetic()) {
                return Err(ExtractError::InvalidConfig(format!(
                    "modifier keyword '{}' must be a non-empty ASCII word",
                    modifier
                )));
            }
            if matches!(
                modifier.to_ascii_lowercase().as_str(),
                "function" | "class" | "interface" | "trait"
            ) {
                return Err(ExtractError::InvalidConfig(format!(
                    "'{}' introduces a declaration and cannot be a modifier",
                    modifier
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert!(config.collect_anonymous_functions);
        assert!(config.collect_anonymous_classes);
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.modifiers.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_tab_width_rejected() {
        let config = ParserConfig::default().with_tab_width(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tab_width"));
    }

    #[test]
    fn test_declaration_keyword_rejected_as_modifier() {
        let mut config = ParserConfig::default();
        config.modifiers.push("Class".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_keeps_defaults_for_missing_fields() {
        let config =
            ParserConfig::from_json_str(r#"{ "collect_anonymous_classes": false, "tab_width": 2 }"#)
                .unwrap();
        assert!(config.collect_anonymous_functions);
        assert!(!config.collect_anonymous_classes);
        assert_eq!(config.tab_width, 2);
        assert_eq!(config.modifiers, ParserConfig::default().modifiers);
    }

    #[test]
    fn test_from_json_validates() {
        assert!(ParserConfig::from_json_str(r#"{ "tab_width": 0 }"#).is_err());
        assert!(ParserConfig::from_json_str("not json").is_err());
    }
}
