// src/core/sanitize.rs

/// Session headings on the program page, raw markup entities included.
/// Applied in order; `&nbsp;` must go before `;`.
const SESSION_REPLACEMENTS: &[(&str, &str)] = &[
    ("&nbsp;", "_"),
    ("&amp", "_"),
    (";", ""),
    (" ", "_"),
    ("/", "_"),
    (",", ""),
    ("(1)", ""),
    ("(2)", ""),
    ("(3)", ""),
];

/// Workshop titles from the menu anchor text (entities already decoded).
const WORKSHOP_REPLACEMENTS: &[(&str, &str)] = &[
    (" ", "_"),
    (",", ""),
    (":", ""),
    (".", "_"),
    ("-", "_"),
    ("?", ""),
    ("/", "_"),
];

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

fn apply_table(s: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Collapse `__` runs and trim `_` at both ends.
fn tidy_underscores(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_us = false;
    for ch in s.chars() {
        if ch == '_' {
            if !last_us { out.push(ch); }
            last_us = true;
        } else {
            out.push(ch);
            last_us = false;
        }
    }
    out.trim_matches('_').to_string()
}

/// Session heading -> folder name.
pub fn session_folder_name(raw: &str) -> String {
    tidy_underscores(&apply_table(raw.trim(), SESSION_REPLACEMENTS))
}

/// Workshop menu text -> folder name.
pub fn workshop_folder_name(text: &str) -> String {
    tidy_underscores(&apply_table(&normalize_ws(text), WORKSHOP_REPLACEMENTS))
}

/// Expected paper title as compared against candidate labels:
/// entities decoded, colons dropped, lowercase, single-spaced.
pub fn normalize_title(text: &str) -> String {
    normalize_ws(&normalize_entities(text).replace(':', "").to_lowercase())
}

/// True if `name` can be used as a single path component.
pub fn is_safe_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_names_become_folder_safe() {
        assert_eq!(
            session_folder_name("Oral 1.1A&nbsp;Deep Learning (1)"),
            "Oral_1.1A_Deep_Learning"
        );
        assert_eq!(
            session_folder_name("Vision &amp; Language, Video/Action (3)"),
            "Vision_Language_Video_Action"
        );
        assert_eq!(session_folder_name("Posters"), "Posters");
    }

    #[test]
    fn workshop_names_become_folder_safe() {
        assert_eq!(
            workshop_folder_name("Fair, Data-Efficient and Trusted CV: What now?"),
            "Fair_Data_Efficient_and_Trusted_CV_What_now"
        );
        assert_eq!(workshop_folder_name("AI City 2.0 / Re-ID"), "AI_City_2_0_Re_ID");
    }

    #[test]
    fn titles_are_lowercased_without_colons() {
        assert_eq!(
            normalize_title("  DeepNet:  Learning &amp; Seeing "),
            "deepnet learning & seeing"
        );
    }

    #[test]
    fn safe_component_rejects_traversal() {
        assert!(is_safe_component("paper.pdf"));
        assert!(!is_safe_component(".."));
        assert!(!is_safe_component(""));
        assert!(!is_safe_component("a/b"));
    }
}
