// Base Extractor Types for declscan
//
// Data structures produced by the module scanner: declarations, their kinds,
// visibility, and the per-file outline wrapper.

use serde::{Deserialize, Serialize};

/// A declaration (function, class, interface, ...) extracted from source code
///
/// Offsets are byte offsets into the scanned text. `span_end` is inclusive: it
/// points at the closing `}` or, for bodiless declarations, the terminating `;`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Declaration {
    /// Stable identifier (MD5 of kind, name and start offset)
    pub id: String,
    /// Kind of declaration
    pub kind: DeclarationKind,
    /// Declared name, or a synthesized placeholder for anonymous constructs
    pub name: String,
    /// Whitespace-collapsed declaration header (`public function foo($a): int`)
    pub signature: String,
    /// Offset of the first character, leading modifier keywords included
    pub span_begin: usize,
    /// Offset of the last character (closing brace or semicolon)
    pub span_end: usize,
    /// Start line number (1-based)
    pub start_line: u32,
    /// End line number (1-based)
    pub end_line: u32,
    /// Offset of the opening brace of the body, `None` for bodiless declarations
    pub body_begin: Option<usize>,
    /// Text between the braces, re-indented to column zero
    pub body_text: Option<String>,
    /// Text from `span_begin` to `span_end`, re-indented to column zero
    pub full_text: String,
    /// Columns of common indentation removed from `full_text`
    pub indent: usize,
    /// Declared return type (functions and lambdas only)
    pub return_type: Option<String>,
    /// Visibility derived from the modifier keywords
    pub visibility: Option<Visibility>,
    /// `/** ... */` block directly above the declaration
    pub doc_comment: Option<String>,
    /// Modifier keywords preceding the declaration, in source order
    pub modifiers: Vec<String>,
    /// Raw parameter texts (functions and lambdas only)
    pub parameters: Vec<String>,
    /// Direct lexical children, in the order they closed
    pub children: Vec<Declaration>,
}

impl Declaration {
    /// True for lambda functions and anonymous classes
    pub fn is_anonymous(&self) -> bool {
        self.kind.is_anonymous()
    }

    /// True when the declaration ended at a `;` instead of a closing brace
    pub fn is_bodiless(&self) -> bool {
        self.body_begin.is_none()
    }

    /// Depth-first iterator over this declaration and all of its descendants
    pub fn walk(&self) -> impl Iterator<Item = &Declaration> {
        let mut pending = vec![self];
        std::iter::from_fn(move || {
            let next = pending.pop()?;
            pending.extend(next.children.iter().rev());
            Some(next)
        })
    }

    /// Find a direct child by name
    pub fn child(&self, name: &str) -> Option<&Declaration> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Declaration kinds recognized by the scanner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Function,
    LambdaFunction,
    Class,
    LambdaClass,
    Interface,
    Trait,
}

impl DeclarationKind {
    pub fn is_anonymous(self) -> bool {
        matches!(
            self,
            DeclarationKind::LambdaFunction | DeclarationKind::LambdaClass
        )
    }

    /// Convert from string representation
    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "function" => Some(DeclarationKind::Function),
            "lambda_function" => Some(DeclarationKind::LambdaFunction),
            "class" => Some(DeclarationKind::Class),
            "lambda_class" => Some(DeclarationKind::LambdaClass),
            "interface" => Some(DeclarationKind::Interface),
            "trait" => Some(DeclarationKind::Trait),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Function => write!(f, "function"),
            DeclarationKind::LambdaFunction => write!(f, "lambda_function"),
            DeclarationKind::Class => write!(f, "class"),
            DeclarationKind::LambdaClass => write!(f, "lambda_class"),
            DeclarationKind::Interface => write!(f, "interface"),
            DeclarationKind::Trait => write!(f, "trait"),
        }
    }
}

/// Visibility levels for declarations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Visibility {
    /// Pick the visibility keyword out of a modifier run, if any
    pub fn from_modifiers(modifiers: &[String]) -> Option<Self> {
        modifiers.iter().find_map(|m| match m.as_str() {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "protected" => Some(Visibility::Protected),
            _ => None,
        })
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "Public"),
            Visibility::Private => write!(f, "Private"),
            Visibility::Protected => write!(f, "Protected"),
        }
    }
}

/// Extraction results for one source text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleOutline {
    /// File the text was read from, if any
    pub file_path: Option<String>,
    /// blake3 hex digest of the scanned text
    pub content_hash: String,
    /// Top-level declarations in the order they closed
    pub declarations: Vec<Declaration>,
}

impl ModuleOutline {
    /// Total number of declarations, nested ones included
    pub fn declaration_count(&self) -> usize {
        self.declarations.iter().map(|d| d.walk().count()).sum()
    }

    /// Serialize the outline as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, super::ExtractError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
