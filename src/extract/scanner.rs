//! Lexical pre-filter for style regions.
//!
//! The scanner knows nothing about syntax. It proposes offsets just past an
//! opening `<style jsx>` tag or a `` css` `` template opener; the locator
//! decides whether a real style region sits there. Matches inside comments
//! or strings produce candidates that the locator later discards.

use regex::Regex;
use std::sync::LazyLock;

/// Opening style tag with a mandatory `jsx` marker and an optional `global`
/// marker on either side, or a `css` tag directly before a backtick.
/// Markers may carry a value such as `jsx={true}`; the locator compares
/// attribute names only.
static CANDIDATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<style\s+(?:global(?:=\S+?)?\s+)?jsx(?:=\S+?)?(?:\s+global(?:=\S+?)?)?\s*>|\bcss`"#,
    )
    .expect("valid regex")
});

/// Offsets just inside every possible style region, left to right.
pub fn candidate_offsets(text: &str) -> impl Iterator<Item = usize> + '_ {
    CANDIDATE_PATTERN.find_iter(text).map(|m| m.end())
}
