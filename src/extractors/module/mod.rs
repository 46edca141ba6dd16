//! Module scanner for brace-delimited PHP-style source
//!
//! A single left-to-right pass over the text, with no token stream and no
//! grammar tables. The scanner keeps three pieces of state:
//!
//! - string state: outside any literal, or inside a `'` / `"` literal
//! - the keyword run: modifier keywords waiting for a declaration keyword
//! - a stack of open declarations, each with its own brace depth
//!
//! Closed declarations go to a flat list. When a declaration closes, every
//! already closed declaration whose span lies strictly inside its span is
//! moved into its children, so the tree is assembled bottom-up without
//! recursion.
//!
//! # Module Structure
//!
//! - `lexical` - string escapes, comments, heredoc/nowdoc skipping
//! - `keywords` - keyword recognition and the modifier run
//! - `functions` - named functions, lambdas, parameter lists
//! - `types` - classes, anonymous classes, interfaces, traits
//! - `helpers` - regex patterns and byte utilities

mod functions;
mod helpers;
mod keywords;
mod lexical;
mod types;


use tracing::debug;

use crate::extractors::base::{
    BaseExtractor, Declaration, DeclarationKind, DeclarationOptions, ExtractError, ParserConfig,
};
use keywords::{Keyword, KeywordRun};
use lexical::Skip;

/// Parser for one fixed, brace-based declaration syntax
///
/// Holds only configuration; every call to [`ModuleParser::parse`] runs an
/// independent scanner, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ModuleParser {
    config: ParserConfig,
}

impl ModuleParser {
    pub fn new(config: ParserConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extract the declaration tree from `source`
    ///
    /// Top-level declarations come back in the order they closed. Declarations
    /// left open at end of input are dropped.
    pub fn parse(&self, source: &str) -> Vec<Declaration> {
        ModuleScanner::new(source, &self.config).run()
    }
}

/// Whether the main loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

/// A declaration whose closing brace has not been seen yet
#[derive(Debug)]
struct OpenDeclaration {
    kind: DeclarationKind,
    name: String,
    span_begin: usize,
    /// Braces opened minus braces closed since the declaration started
    open_brace_count: i32,
    /// Anonymous construct with collection disabled: tracked, never emitted
    suppressed: bool,
    options: DeclarationOptions,
}

impl OpenDeclaration {
    fn new(kind: DeclarationKind, name: String, span_begin: usize, options: DeclarationOptions) -> Self {
        Self {
            kind,
            name,
            span_begin,
            open_brace_count: 0,
            suppressed: false,
            options,
        }
    }

    fn suppressed(kind: DeclarationKind, span_begin: usize) -> Self {
        Self {
            suppressed: true,
            ..Self::new(kind, String::new(), span_begin, DeclarationOptions::default())
        }
    }
}

/// Scanner state for one source text
pub(super) struct ModuleScanner<'a> {
    base: BaseExtractor<'a>,
    bytes: &'a [u8],
    config: &'a ParserConfig,
    pos: usize,
    /// Quote byte of the string literal the cursor is inside, if any
    quote: Option<u8>,
    keyword_run: KeywordRun,
    open: Vec<OpenDeclaration>,
    closed: Vec<Declaration>,
}

impl<'a> ModuleScanner<'a> {
    fn new(source: &'a str, config: &'a ParserConfig) -> Self {
        Self {
            base: BaseExtractor::new(source),
            bytes: source.as_bytes(),
            config,
            pos: 0,
            quote: None,
            keyword_run: KeywordRun::default(),
            open: Vec::new(),
            closed: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Declaration> {
        while self.pos < self.bytes.len() {
            if self.step() == Step::Stop {
                debug!(
                    "Scanning stopped at offset {} on unterminated input",
                    self.pos
                );
                break;
            }
        }

        if !self.open.is_empty() {
            debug!(
                "Discarding {} unterminated declaration(s) at end of input",
                self.open.len()
            );
        }

        self.closed
    }

    fn step(&mut self) -> Step {
        let at = self.pos;
        let c = self.bytes[at];

        if lexical::is_quote(c)
            && self.quote.map_or(true, |q| q == c)
            && !lexical::is_escaped(self.bytes, at)
        {
            self.quote = match self.quote {
                None => Some(c),
                Some(_) => None,
            };
            if self.quote.is_some() {
                self.pos += 1;
                return Step::Continue;
            }
        } else if self.quote.is_some() {
            self.pos += 1;
            return Step::Continue;
        }

        match lexical::skip_non_code(self.bytes, at) {
            Skip::Resume(next) => {
                self.pos = next;
                return Step::Continue;
            }
            Skip::Unterminated => return Step::Stop,
            Skip::Nothing => {}
        }

        match c {
            b'{' => {
                if let Some(current) = self.open.last_mut() {
                    current.open_brace_count += 1;
                    if current.open_brace_count == 1 && current.options.body_begin.is_none() {
                        current.options.body_begin = Some(at);
                    }
                }
                self.pos += 1;
            }
            b'}' => {
                let closes = match self.open.last_mut() {
                    Some(current) => {
                        current.open_brace_count -= 1;
                        current.open_brace_count == 0
                    }
                    None => false,
                };
                if closes {
                    self.close_current(at);
                }
                self.pos += 1;
            }
            _ if !c.is_ascii_whitespace() && keywords::at_token_start(self.bytes, at) => {
                return self.recognize(at);
            }
            _ => self.pos += 1,
        }

        Step::Continue
    }

    /// Handle the token starting at `at`
    fn recognize(&mut self, at: usize) -> Step {
        let len = keywords::word_len(self.bytes, at);

        match keywords::classify(self.bytes, at, len, self.config) {
            Some(Keyword::Function) => functions::parse_function(self, at),
            Some(Keyword::Class) => types::parse_class(self, at),
            Some(Keyword::Interface) => {
                types::parse_named_block(self, at, DeclarationKind::Interface)
            }
            Some(Keyword::Trait) => types::parse_named_block(self, at, DeclarationKind::Trait),
            Some(Keyword::Modifier(word)) => {
                self.keyword_run.push(word, at);
                self.pos = at + len;
                Step::Continue
            }
            None => {
                self.keyword_run.clear();
                self.pos = at + len.max(1);
                Step::Continue
            }
        }
    }

    /// Text in `[begin, end)`
    fn text(&self, begin: usize, end: usize) -> String {
        self.base.get_text(begin, end)
    }

    fn push_open(&mut self, declaration: OpenDeclaration) {
        self.open.push(declaration);
    }

    /// Record a declaration that ends without a body, at the `;` at `end`
    fn close_bodiless(
        &mut self,
        kind: DeclarationKind,
        name: String,
        span_begin: usize,
        end: usize,
        options: DeclarationOptions,
    ) {
        let declaration = self.base.create_declaration(
            kind,
            name,
            span_begin,
            end,
            options,
            self.config.tab_width,
        );
        debug!(
            "Closed bodiless {} '{}' at {}..={}",
            declaration.kind, declaration.name, span_begin, end
        );
        self.closed.push(declaration);
    }

    /// Pop the current declaration at its closing brace
    fn close_current(&mut self, end: usize) {
        let Some(frame) = self.open.pop() else {
            return;
        };

        let inside = |d: &Declaration| d.span_begin > frame.span_begin && d.span_end < end;
        let (inner, outer): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.closed).into_iter().partition(inside);
        self.closed = outer;

        if frame.suppressed {
            debug!(
                "Dropped anonymous {} at {}..={} with {} nested declaration(s)",
                frame.kind,
                frame.span_begin,
                end,
                inner.len()
            );
            return;
        }

        let mut options = frame.options;
        options.children = inner;
        let declaration = self.base.create_declaration(
            frame.kind,
            frame.name,
            frame.span_begin,
            end,
            options,
            self.config.tab_width,
        );
        debug!(
            "Closed {} '{}' at {}..={} with {} child(ren)",
            declaration.kind,
            declaration.name,
            declaration.span_begin,
            declaration.span_end,
            declaration.children.len()
        );
        self.closed.push(declaration);
    }
}
