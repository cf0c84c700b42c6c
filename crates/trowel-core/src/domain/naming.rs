//! Identifier case transforms and project-name normalisation.
//!
//! Scaffolded file names and class names are derived from the user's input
//! through these functions, so they must stay deterministic: the same input
//! always produces the same identifiers.

/// Convert a name to PascalCase.
///
/// Every run of `-`, `_` or whitespace is removed and the character that
/// follows it is upper-cased; the first character is upper-cased as well.
/// Everything else is left untouched, so already-capitalised words survive.
///
/// | Input | Output |
/// |-------|--------|
/// | "billing" | "Billing" |
/// | "my-service" | "MyService" |
/// | "user_profile card" | "UserProfileCard" |
/// | "Payment" | "Payment" |
pub fn to_pascal_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = true;

    for c in input.chars() {
        if is_word_separator(c) {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

/// Convert a name to kebab-case.
///
/// A hyphen goes between an ASCII lowercase letter and a following ASCII
/// uppercase letter, runs of whitespace or `_` collapse to a single `-`,
/// and the result is lower-cased.
pub fn to_kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;
    let mut in_gap = false;

    for c in input.chars() {
        if c.is_whitespace() || c == '_' {
            if !in_gap {
                out.push('-');
                in_gap = true;
            }
            prev = Some(c);
            continue;
        }
        in_gap = false;

        if let Some(p) = prev {
            if p.is_ascii_lowercase() && c.is_ascii_uppercase() {
                out.push('-');
            }
        }
        out.push(c);
        prev = Some(c);
    }

    out.to_lowercase()
}

/// Normalise a project name to a filesystem-safe directory name.
///
/// The name is lower-cased and each character outside `[a-z0-9-]` is
/// replaced by `-`, one for one. Runs are not collapsed.
pub fn sanitize_project_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn is_word_separator(c: char) -> bool {
    c == '-' || c == '_' || c.is_whitespace()
}
