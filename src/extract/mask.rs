//! Offset-preserving masking of host documents.
//!
//! The masked text has the same byte length as the host text. Bytes outside
//! the style regions become spaces, and so do dynamic expressions inside
//! them, so a CSS parser sees only the style sheet but every byte it reports
//! on is at its original offset. Line terminators are kept, which keeps line
//! numbers aligned too.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::StyleRegion;
use crate::error::{Error, Result};

/// Starts of dynamic expressions inside a style sheet: a `${` interpolation
/// opener, or a whole bare `a && b` / `a || b` run.
static EXPRESSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{|[\w$.]+\s*(?:&&|\|\|)\s*[\w$.'\x22]+").expect("valid regex")
});

/// Output of [`mask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedText {
    pub text: String,
    /// Whole dynamic expressions found in the regions, delimiters included.
    pub expressions: Vec<StyleRegion>,
}

/// Blank everything in `text` except the given style regions.
///
/// `regions` must be sorted by start. Duplicated or overlapping regions are
/// skipped rather than masked twice.
pub fn mask(text: &str, regions: &[StyleRegion]) -> Result<MaskedText> {
    let mut out = String::with_capacity(text.len());
    let mut expressions = Vec::new();
    let mut cursor = 0;

    for region in regions {
        if region.start < cursor || region.end > text.len() {
            continue;
        }
        blank_into(&mut out, &text[cursor..region.start]);
        mask_expressions_into(&mut out, text, *region, &mut expressions);
        cursor = region.end;
    }
    blank_into(&mut out, &text[cursor..]);

    if out.len() != text.len() {
        return Err(Error::LengthMismatch {
            expected: text.len(),
            actual: out.len(),
        });
    }
    Ok(MaskedText {
        text: out,
        expressions,
    })
}

/// Copy a region into `out`, blanking its dynamic expressions.
///
/// For an interpolation only the expression between `${` and its closing
/// `}` is blanked. An interpolation that is never closed is left as is.
fn mask_expressions_into(
    out: &mut String,
    text: &str,
    region: StyleRegion,
    expressions: &mut Vec<StyleRegion>,
) {
    let css = &text[region.as_range()];
    let mut copied = 0;
    let mut search = 0;

    while let Some(found) = EXPRESSION_PATTERN.find_at(css, search) {
        let (whole, inner) = if found.as_str() == "${" {
            let Some(close) = interpolation_end(css, found.end()) else {
                search = found.end();
                continue;
            };
            (found.start()..close + 1, found.end()..close)
        } else {
            (found.range(), found.range())
        };
        out.push_str(&css[copied..inner.start]);
        blank_into(out, &css[inner.clone()]);
        copied = inner.end;
        search = whole.end;
        expressions.push(StyleRegion::new(
            region.start + whole.start,
            region.start + whole.end,
        ));
    }
    out.push_str(&css[copied..]);
}

/// Offset of the `}` closing an interpolation whose expression starts at
/// `from`. Nested braces and quoted strings are skipped.
fn interpolation_end(css: &str, from: usize) -> Option<usize> {
    let bytes = css.as_bytes();
    let mut depth = 0usize;
    let mut quote = None;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(_) if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'{' => depth += 1,
                b'}' if depth == 0 => return Some(i),
                b'}' => depth -= 1,
                _ => {}
            },
        }
        i += 1;
    }
    None
}

/// Append one space per byte of `text`, keeping line terminators.
fn blank_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\n' | '\r' => out.push(c),
            _ => out.extend(std::iter::repeat_n(' ', c.len_utf8())),
        }
    }
}
