// Declaration creation
//
// Turns a closed span plus the header facts gathered while scanning into a
// finished, indentation-normalized Declaration.

use crate::utils::indentation;

use super::extractor::BaseExtractor;
use super::types::{Declaration, DeclarationKind, Visibility};

/// Header facts collected for a declaration before it closes
#[derive(Debug, Clone, Default)]
pub struct DeclarationOptions {
    pub signature: String,
    pub body_begin: Option<usize>,
    pub return_type: Option<String>,
    pub modifiers: Vec<String>,
    pub parameters: Vec<String>,
    pub children: Vec<Declaration>,
}

impl BaseExtractor<'_> {
    /// Create a declaration spanning `[span_begin, span_end]` (both inclusive)
    pub fn create_declaration(
        &self,
        kind: DeclarationKind,
        name: String,
        span_begin: usize,
        span_end: usize,
        options: DeclarationOptions,
        tab_width: usize,
    ) -> Declaration {
        let raw_full = self.get_text(span_begin, span_end + 1);
        let (full_text, indent) = indentation::normalize(&raw_full, tab_width);

        let body_text = options.body_begin.map(|open| {
            let raw_body = self.get_text(open + 1, span_end);
            indentation::normalize(&raw_body, tab_width).0
        });

        let id = self.generate_id(kind, &name, span_begin);
        let visibility = Visibility::from_modifiers(&options.modifiers);

        Declaration {
            id,
            kind,
            name,
            signature: options.signature,
            span_begin,
            span_end,
            start_line: self.line_index.line_of(span_begin),
            end_line: self.line_index.line_of(span_end),
            body_begin: options.body_begin,
            body_text,
            full_text,
            indent,
            return_type: options.return_type,
            visibility,
            doc_comment: self.find_doc_comment(span_begin),
            modifiers: options.modifiers,
            parameters: options.parameters,
            children: options.children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_declaration_slices_and_normalizes() {
        let source = "class A {\n    public function b()\n    {\n        return 1;\n    }\n}";
        let base = BaseExtractor::new(source);
        let begin = source.find("public").unwrap();
        let open = source[begin..].find('{').unwrap() + begin;
        let end = source.rfind("    }").unwrap() + 4;

        let decl = base.create_declaration(
            DeclarationKind::Function,
            "b".to_string(),
            begin,
            end,
            DeclarationOptions {
                signature: "public function b()".to_string(),
                body_begin: Some(open),
                modifiers: vec!["public".to_string()],
                ..Default::default()
            },
            4,
        );

        assert_eq!(decl.full_text, "public function b()\n{\n    return 1;\n}");
        assert_eq!(decl.indent, 4);
        assert_eq!(decl.body_text.as_deref(), Some("\nreturn 1;\n"));
        assert_eq!(decl.start_line, 2);
        assert_eq!(decl.end_line, 5);
        assert_eq!(decl.visibility, Some(Visibility::Public));
    }

    #[test]
    fn test_bodiless_declaration_has_no_body_text() {
        let source = "function a();";
        let base = BaseExtractor::new(source);
        let decl = base.create_declaration(
            DeclarationKind::Function,
            "a".to_string(),
            0,
            source.len() - 1,
            DeclarationOptions::default(),
            4,
        );
        assert_eq!(decl.full_text, source);
        assert!(decl.body_text.is_none());
        assert!(decl.is_bodiless());
    }
}
