use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static REPLACE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("\u{2019}", "'"),
        ("\u{2018}", "'"),
        ("`", "'"),
        ("\u{02BC}", "'"),
        ("…", "."),
        ("...", "."),
        ("\n", "."),
        ("—", ","),
        ("–", ","),
        ("“", ""),
        ("”", ""),
        ("\"", ""),
        ("«", ""),
        ("»", ""),
        ("(", ","),
        (")", ","),
        ("[", ","),
        ("]", ","),
    ])
});

static REPLACE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut escaped: Vec<String> = REPLACE_MAP.keys().map(|s| regex::escape(s)).collect();
    escaped.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let joined = escaped.join("|");
    Regex::new(&joined).expect("replace regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r]+").expect("whitespace regex"));

/// Folds typographic variants onto the characters the G2P rules know.
pub fn normalize_text(text: &str) -> String {
    let replaced = REPLACE_PATTERN.replace_all(text, |caps: &regex::Captures| {
        REPLACE_MAP.get(&caps[0]).copied().unwrap_or("")
    });
    WHITESPACE.replace_all(replaced.trim(), " ").into_owned()
}
