// Module scanner - Class, anonymous class, interface and trait parsing

use super::helpers::{collapse_whitespace, find_byte, is_identifier, preceding_new};
use super::{ModuleScanner, OpenDeclaration, Step};
use crate::extractors::base::{DeclarationKind, DeclarationOptions};

/// Header text between a keyword and the `{` that opens its body
///
/// Returns `None` when there is no `{` or when a `;` / `}` shows up first,
/// which means the keyword is not introducing a block here.
fn header_region(scanner: &ModuleScanner<'_>, from: usize) -> Option<String> {
    let brace = find_byte(scanner.bytes, b'{', from)?;
    if scanner.bytes[from..brace]
        .iter()
        .any(|&b| b == b';' || b == b'}')
    {
        return None;
    }
    Some(scanner.text(from, brace))
}

/// Parse `class` at `at`: a named class or a `new class` expression
pub(super) fn parse_class(scanner: &mut ModuleScanner<'_>, at: usize) -> Step {
    let after_keyword = at + "class".len();
    scanner.pos = after_keyword;

    let Some(region) = header_region(scanner, after_keyword) else {
        scanner.keyword_run.clear();
        return Step::Continue;
    };
    let region = region.trim();
    let new_at = preceding_new(scanner.bytes, at);

    let (modifiers, run_begin) = scanner.keyword_run.take();

    if new_at.is_none() && !region.is_empty() {
        // `class Foo extends Bar implements Baz`: the name is the first word
        let name = region.split_whitespace().next().unwrap_or_default().to_string();
        if !is_identifier(&name) {
            return Step::Continue;
        }

        let mut signature = modifiers.join(" ");
        signature.push_str(" class ");
        signature.push_str(region);

        let options = DeclarationOptions {
            signature: collapse_whitespace(&signature),
            modifiers,
            ..Default::default()
        };
        let span_begin = run_begin.unwrap_or(at);
        scanner.push_open(OpenDeclaration::new(
            DeclarationKind::Class,
            name,
            span_begin,
            options,
        ));
        return Step::Continue;
    }

    let span_begin = run_begin.or(new_at).unwrap_or(at);
    if !scanner.config.collect_anonymous_classes {
        scanner.push_open(OpenDeclaration::suppressed(
            DeclarationKind::LambdaClass,
            span_begin,
        ));
        return Step::Continue;
    }

    let mut signature = modifiers.join(" ");
    if new_at.is_some() {
        signature.push_str(" new");
    }
    signature.push_str(" class ");
    signature.push_str(region);

    let options = DeclarationOptions {
        signature: collapse_whitespace(&signature),
        modifiers,
        ..Default::default()
    };
    let placeholder = format!("anonymous class at offset {}", span_begin);
    scanner.push_open(OpenDeclaration::new(
        DeclarationKind::LambdaClass,
        placeholder,
        span_begin,
        options,
    ));
    Step::Continue
}

/// Parse `interface` or `trait` at `at`
///
/// These take no modifiers: a pending keyword run is discarded.
pub(super) fn parse_named_block(
    scanner: &mut ModuleScanner<'_>,
    at: usize,
    kind: DeclarationKind,
) -> Step {
    let after_keyword = at + kind.to_string().len();
    scanner.pos = after_keyword;
    scanner.keyword_run.clear();

    let Some(region) = header_region(scanner, after_keyword) else {
        return Step::Continue;
    };
    let name = region.trim().to_string();
    if name.is_empty() {
        return Step::Continue;
    }

    let options = DeclarationOptions {
        signature: collapse_whitespace(&format!("{} {}", kind, name)),
        ..Default::default()
    };
    scanner.push_open(OpenDeclaration::new(kind, name, at, options));
    Step::Continue
}
