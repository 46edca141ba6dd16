// declscan Core - declaration extraction for brace-delimited PHP-style source
//
// A lightweight scanner that finds functions, classes, interfaces, traits and
// their anonymous forms without building a syntax tree.

pub mod extractors;
pub mod utils;

pub use extractors::{
    Declaration, DeclarationKind, ExtractError, ExtractorManager, ModuleOutline, ModuleParser,
    ParserConfig, Visibility,
};
pub use utils::hash_content;

/// Parse `source` with the default configuration
pub fn parse(source: &str) -> Vec<Declaration> {
    ModuleParser::default().parse(source)
}

/// Parse `source` with a custom configuration
pub fn parse_with(source: &str, config: &ParserConfig) -> Result<Vec<Declaration>, ExtractError> {
    Ok(ModuleParser::new(config.clone())?.parse(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_point() {
        let result = parse("abstract class Shape { abstract public function area(): float; }");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, DeclarationKind::Class);
        assert_eq!(result[0].children[0].return_type.as_deref(), Some("float"));
    }

    #[test]
    fn test_parse_with_config() {
        let config = ParserConfig::default().with_anonymous_classes(false);
        let result = parse_with("$a = new class {}; function f() {}", &config).unwrap();
        let names: Vec<_> = result.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["f"]);
    }

    #[test]
    fn test_parse_with_rejects_invalid_config() {
        let config = ParserConfig::default().with_tab_width(0);
        assert!(matches!(
            parse_with("", &config),
            Err(ExtractError::InvalidConfig(_))
        ));
    }
}
