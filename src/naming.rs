//! Identifier derivation for the generated Rust source.
//!
//! All functions are pure. Collisions with Rust keywords are resolved against a
//! fixed table.

/// Rust keywords (strict, reserved and edition-specific).
pub const RUST_RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Locals the command renderer declares next to the parameters.
pub const GENERATOR_LOCALS: &[&str] = &["params", "json"];

pub fn is_reserved(name: &str) -> bool {
    RUST_RESERVED.contains(&name)
}

/// Split a camelCase / PascalCase / kebab-case name into lowercase words.
///
/// Acronyms stay together: `getDOMCounters` → `get`, `dom`, `counters`.
pub fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut out = Vec::new();
    let mut cur = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !cur.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary {
                out.push(std::mem::take(&mut cur));
            }
        }
        cur.push(c.to_ascii_lowercase());
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// snake_case without keyword handling (module names, wire-value splitting).
pub fn underscore(name: &str) -> String {
    words(name).join("_")
}

/// snake_case identifier; keywords get a trailing underscore, a leading digit a `v` prefix.
pub fn snake_case(name: &str) -> String {
    let mut s = underscore(name);
    if s.is_empty() {
        return "empty".to_string();
    }
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        s.insert(0, 'v');
    }
    if is_reserved(&s) {
        s.push('_');
    }
    s
}

/// snake_case identifier for a command parameter: also steers clear of the
/// locals the generated function body declares.
pub fn parameter_name(name: &str) -> String {
    let mut s = snake_case(name);
    if GENERATOR_LOCALS.contains(&s.as_str()) {
        s.push('_');
    }
    s
}

/// Module name for a domain: `DOMDebugger` → `dom_debugger`.
pub fn module_name(domain: &str) -> String {
    snake_case(domain)
}

/// `screencastVisibilityChanged` → `ScreencastVisibilityChanged`.
pub fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

/// Enum variant for a wire value: `trustedtype-sink-violation` → `TrustedtypeSinkViolation`.
pub fn variant_name(value: &str) -> String {
    let mut s: String = words(value)
        .iter()
        .map(|w| pascal_case(w))
        .collect();
    if s.is_empty() {
        return "Empty".to_string();
    }
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        s.insert(0, 'V');
    }
    if s == "Self" {
        s.push('_');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_keeps_acronyms_together() {
        assert_eq!(snake_case("getDOMCounters"), "get_dom_counters");
        assert_eq!(snake_case("setXHRBreakpoint"), "set_xhr_breakpoint");
        assert_eq!(module_name("DOMDebugger"), "dom_debugger");
        assert_eq!(module_name("IndexedDB"), "indexed_db");
        assert_eq!(module_name("CSS"), "css");
        assert_eq!(snake_case("base64Encoded"), "base64_encoded");
    }

    #[test]
    fn keywords_get_suffix() {
        assert_eq!(snake_case("type"), "type_");
        assert_eq!(snake_case("override"), "override_");
        assert_eq!(snake_case("nodeId"), "node_id");
        assert_eq!(parameter_name("params"), "params_");
        assert_eq!(parameter_name("objectId"), "object_id");
    }

    #[test]
    fn snake_case_is_always_an_identifier() {
        assert_eq!(snake_case("3d"), "v3d");
        assert_eq!(snake_case("2xScale"), "v2x_scale");
        assert_eq!(snake_case("-"), "empty");
        assert_eq!(snake_case("nodeId"), snake_case("node_id"));
    }

    #[test]
    fn variant_names() {
        assert_eq!(variant_name("trustedtype-sink-violation"), "TrustedtypeSinkViolation");
        assert_eq!(variant_name("subtree-modified"), "SubtreeModified");
        assert_eq!(variant_name("XMLHttpRequest"), "XmlHttpRequest");
        assert_eq!(variant_name("3d"), "V3d");
        assert_eq!(variant_name("self"), "Self_");
        assert_eq!(variant_name(""), "Empty");
        assert_eq!(variant_name("fooBar"), variant_name("foo-bar"));
    }

    #[test]
    fn pascal_case_event_names() {
        assert_eq!(pascal_case("screencastVisibilityChanged"), "ScreencastVisibilityChanged");
        assert_eq!(pascal_case("load"), "Load");
    }
}
