/// `user_account id` → `UserAccountId`.
///
/// Splits on `_` and space, drops empty segments, upper-cases the first
/// character of each segment and leaves the rest alone.
pub fn to_upper_camel_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    for segment in identifier.split(['_', ' ']).filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "try", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "typeof", "unsized", "virtual", "yield",
];

// These cannot be raw identifiers.
const RESERVED_PATH_SEGMENTS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Column name as a Rust field or module identifier.
///
/// Unicode letters and digits are kept, since Rust accepts non-ASCII
/// identifiers. Anything else becomes `_`.
pub fn to_field_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    // Must start with a letter or `_`.
    if !ident.starts_with(|c: char| c == '_' || c.is_alphabetic()) {
        ident.insert(0, '_');
    }

    if RESERVED_PATH_SEGMENTS.contains(&ident.as_str()) {
        ident.push('_');
    } else if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}
