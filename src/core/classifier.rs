//! Tells installable typefaces apart from generic keywords, platform UI aliases
//! and icon fonts.

use once_cell::sync::Lazy;
use regex::RegexSet;

/// Generic CSS families, CSS-wide keywords and platform UI aliases (compared lowercase).
const NOT_REAL_FONTS: &[&str] = &[
    "sans-serif",
    "serif",
    "cursive",
    "fantasy",
    "monospace",
    "math",
    "emoji",
    "fangsong",
    "system-ui",
    "ui-sans-serif",
    "ui-serif",
    "ui-monospace",
    "ui-rounded",
    "initial",
    "inherit",
    "unset",
    "revert",
    "revert-layer",
    "default",
    "none",
    "-apple-system",
    "blinkmacsystemfont",
    "apple color emoji",
    "segoe ui emoji",
    "segoe ui symbol",
    "noto color emoji",
    "android emoji",
    "emojisymbols",
];

static NOT_REAL_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)font\s*awesome",
        r"(?i)fontawesome",
        r"(?i)webflow[\s-]*icons",
        r"(?i)material[\s-]*(icons|symbols)",
        r"(?i)google\s*sans",
        r"(?i)glyphicons",
        r"(?i)icomoon",
        r"(?i)dashicons",
        r"(?i)\bemoji\b",
        r"(?i)\bsymbols?\b",
        r"(?i)\bicons?\b",
        r"var\(",
    ])
    .expect("valid classifier patterns")
});

pub fn is_real_font(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return false;
    }

    let lowered = trimmed.to_lowercase();
    if NOT_REAL_FONTS.contains(&lowered.as_str()) {
        return false;
    }

    !NOT_REAL_PATTERNS.is_match(trimmed)
}
