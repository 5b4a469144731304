use std::path::PathBuf;
use std::time::Duration;

use expect_test::expect;
use styled_jsx_lsp::{
    discover_settings, document_symbols, extract_at_offset, extract_document, folding_ranges,
    hover_at_position, load_settings, to_diagnostics, CacheLimits, SourceDocument, StyleSheet,
    StyleSheetCache,
};
use tower_lsp::lsp_types::{
    Diagnostic, DocumentSymbol, HoverContents, Position, Range, SymbolKind, Url,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn source(text: &str) -> SourceDocument {
    let uri = Url::parse("file:///components/button.jsx").unwrap();
    SourceDocument::new(uri, 1, "javascriptreact", text)
}

fn cache() -> StyleSheetCache<StyleSheet> {
    StyleSheetCache::new(CacheLimits::default(), StyleSheet::parse)
}

fn format_range(range: &Range) -> String {
    format!(
        "{}:{}-{}:{}",
        range.start.line, range.start.character, range.end.line, range.end.character
    )
}

/// Masked text with spaces drawn as `·` so blanked bytes are visible.
fn masked(text: &str) -> String {
    let extraction = extract_document(&source(text), &cache())
        .unwrap()
        .expect("style region");
    let mut out = String::new();
    for line in extraction.document.text.lines() {
        out.push_str(&line.replace(' ', "·"));
        out.push('\n');
    }
    out
}

/// One line per diagnostic: `<range> <source>: <message>`.
fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "OK (no diagnostics)\n".to_string();
    }
    diagnostics
        .iter()
        .map(|d| {
            format!(
                "{} {}: {}\n",
                format_range(&d.range),
                d.source.as_deref().unwrap_or("?"),
                d.message
            )
        })
        .collect()
}

fn check_css(text: &str) -> Vec<Diagnostic> {
    let document = source(text);
    match extract_document(&document, &cache()).unwrap() {
        Some(extraction) => to_diagnostics(&extraction, &document.line_index),
        None => Vec::new(),
    }
}

fn format_symbols(symbols: &[DocumentSymbol], depth: usize, out: &mut String) {
    for symbol in symbols {
        let kind = match symbol.kind {
            SymbolKind::CLASS => "rule",
            SymbolKind::MODULE => "at-rule",
            SymbolKind::FUNCTION => "keyframes",
            _ => "other",
        };
        out.push_str(&format!(
            "{}{} {} {}\n",
            "  ".repeat(depth),
            kind,
            symbol.name,
            format_range(&symbol.range)
        ));
        if let Some(children) = &symbol.children {
            format_symbols(children, depth + 1, out);
        }
    }
}

const PAGE: &str = "const a = css`.a { color: red; }`;
export default () => (
  <style jsx>{`
    @media (min-width: 1px) {
      .b { margin: 0; }
    }
  `}</style>
);
";

// ---------------------------------------------------------------------------
// Tests — masking
// ---------------------------------------------------------------------------

#[test]
fn masks_style_element() {
    let actual = masked("<style jsx>{`\n  a { color: ${c}; }\n`}</style>\n");
    let expected = expect![[r#"
        ·············
        ··a·{·color:·${·};·}
        ··········
    "#]];
    expected.assert_eq(&actual);
}

#[test]
fn masks_conditional_values() {
    let actual = masked("const s = css`a { color: ok && 'red'; }`;\n");
    let expected = expect![[r#"
        ··············a·{·color:············;·}··
    "#]];
    expected.assert_eq(&actual);
}

#[test]
fn ignores_non_styled_jsx_elements() {
    let document = source(
        "<style>{`a { color: red; }`}</style>;\n<style global jsx>{`b{}`}</style>;\n",
    );
    assert!(extract_document(&document, &cache()).unwrap().is_none());
}

#[test]
fn masked_text_keeps_length_with_multibyte_text() {
    let text = "const label = 'héllo → wörld';\nconst s = css`a::after { content: \"✓\"; }`;\n";
    let document = source(text);
    let extraction = extract_document(&document, &cache()).unwrap().unwrap();
    assert_eq!(extraction.document.text.len(), text.len());
    assert_eq!(extraction.document.text.lines().count(), text.lines().count());
    let at = text.find("content").unwrap();
    assert!(extraction.document.text[at..].starts_with("content: \"✓\";"));
}

// ---------------------------------------------------------------------------
// Tests — diagnostics
// ---------------------------------------------------------------------------

#[test]
fn valid_style_sheets() {
    let actual = format_diagnostics(&check_css(PAGE));
    let expected = expect![[r#"
        OK (no diagnostics)
    "#]];
    expected.assert_eq(&actual);
}

#[test]
fn no_style_regions() {
    let actual = format_diagnostics(&check_css("export const answer = 42;\n"));
    let expected = expect![[r#"
        OK (no diagnostics)
    "#]];
    expected.assert_eq(&actual);
}

#[test]
fn stray_brace_is_reported_in_host_coordinates() {
    let diagnostics = check_css("// header\nconst s = css`a { color: red; } }`;\n");
    assert!(!diagnostics.is_empty());
    for d in &diagnostics {
        assert_eq!(d.range.start.line, 1);
        assert!(d.range.start.character >= 14);
        assert_eq!(d.source.as_deref(), Some("styled-jsx"));
    }
}

// ---------------------------------------------------------------------------
// Tests — symbols and folding
// ---------------------------------------------------------------------------

#[test]
fn symbols_across_regions() {
    let document = source(PAGE);
    let extraction = extract_document(&document, &cache()).unwrap().unwrap();
    let mut actual = String::new();
    format_symbols(
        &document_symbols(&extraction, &document.line_index),
        0,
        &mut actual,
    );
    let expected = expect![[r#"
        rule .a 0:14-0:32
        at-rule @media (min-width: 1px) 3:4-5:5
          rule .b 4:6-4:23
    "#]];
    expected.assert_eq(&actual);
}

#[test]
fn folds_multi_line_blocks() {
    let document = source(PAGE);
    let extraction = extract_document(&document, &cache()).unwrap().unwrap();
    let actual: Vec<(u32, u32)> = folding_ranges(&extraction, &document.line_index)
        .iter()
        .map(|f| (f.start_line, f.end_line))
        .collect();
    assert_eq!(actual, vec![(3, 4)]);
}

// ---------------------------------------------------------------------------
// Tests — cursor features
// ---------------------------------------------------------------------------

#[test]
fn hover_on_property_in_tagged_template() {
    let document = source(PAGE);
    let offset = PAGE.find("color").unwrap() + 1;
    let position = Position::new(0, offset as u32);
    let extraction = extract_at_offset(&document, offset, &cache())
        .unwrap()
        .unwrap();

    let hover = hover_at_position(&extraction, &document.line_index, position).unwrap();
    let HoverContents::Markup(content) = hover.contents else {
        panic!("expected markup hover");
    };
    assert!(content.value.contains("color"));
}

#[test]
fn cursor_outside_styles_has_no_extraction() {
    let document = source(PAGE);
    let offset = PAGE.find("export").unwrap();
    assert!(extract_at_offset(&document, offset, &cache())
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Tests — settings
// ---------------------------------------------------------------------------

#[test]
fn settings_from_fixture() {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tuned");
    let settings = load_settings(&fixture.join("settings.toml"));

    assert!(!settings.validation_enabled());
    assert_eq!(settings.validation_delay(), Duration::from_millis(50));
    assert_eq!(
        settings.cache_limits(),
        CacheLimits {
            max_entries: 4,
            max_age: Duration::from_secs(30),
        }
    );
    assert_eq!(settings.cleanup_interval(), Duration::from_secs(1));
}

#[test]
fn settings_discovered_from_child_directory() {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let (settings, dir) = discover_settings(&fixtures);
    assert_eq!(dir, fixtures.join("tuned"));
    assert!(!settings.validation_enabled());
}
