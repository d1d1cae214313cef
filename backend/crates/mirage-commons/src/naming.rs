//! Resource naming convention for wire paths.
//!
//! Schema resource names are type names (`Car`, `Test::Person`); the paths
//! they are served under are derived, never stored: namespace separators
//! become underscores, the name is lowercased, and the result is pluralized.
//! `Car` is served at `/cars`, `Person` at `/people`. Both the server's
//! dispatch table and the client's path builders go through [`segment`], so
//! the two sides cannot disagree.

/// Singular path form of a resource name: `Test::Person` → `test_person`.
pub fn singular(name: &str) -> String {
    name.replace("::", "_").to_lowercase()
}

/// Path segment a resource is served under: the pluralized singular form.
pub fn segment(name: &str) -> String {
    pluralize(&singular(name))
}

/// English pluralization over the trailing word (the part after the last
/// underscore), covering the irregulars and suffix rules that show up in
/// type names.
fn pluralize(word: &str) -> String {
    let (prefix, last) = match word.rfind('_') {
        Some(at) => word.split_at(at + 1),
        None => ("", word),
    };
    format!("{prefix}{}", pluralize_word(last))
}

fn pluralize_word(word: &str) -> String {
    const IRREGULAR: &[(&str, &str)] = &[
        ("person", "people"),
        ("man", "men"),
        ("woman", "women"),
        ("child", "children"),
        ("foot", "feet"),
        ("tooth", "teeth"),
        ("goose", "geese"),
        ("mouse", "mice"),
    ];
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.is_empty() && !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }
    format!("{word}s")
}
