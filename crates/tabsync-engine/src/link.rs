//! Hyperlink formula encoding and series-code derivation.
//!
//! The encoder is the single place where untrusted text is embedded in a
//! formula string; quote doubling here is a correctness requirement, not
//! cosmetics.

/// Render a `HYPERLINK` formula for the host spreadsheet.
pub fn hyperlink_formula(target: &str, label: &str) -> String {
    format!(
        "=HYPERLINK(\"{}\",\"{}\")",
        escape_quotes(target),
        escape_quotes(label)
    )
}

/// The display label of a rendered `HYPERLINK` formula, if `formula` is one.
pub fn hyperlink_label(formula: &str) -> Option<String> {
    let args = quoted_args(formula.strip_prefix("=HYPERLINK(")?);
    args.into_iter().nth(1)
}

/// The link target of a rendered `HYPERLINK` formula, if `formula` is one.
pub fn hyperlink_target(formula: &str) -> Option<String> {
    let args = quoted_args(formula.strip_prefix("=HYPERLINK(")?);
    args.into_iter().next()
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "\"\"")
}

/// Extract quoted string arguments, undoing quote doubling.
fn quoted_args(rest: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = rest.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '"' {
            continue;
        }
        let mut arg = String::new();
        while let Some(ch) = chars.next() {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    arg.push('"');
                } else {
                    break;
                }
            } else {
                arg.push(ch);
            }
        }
        args.push(arg);
    }
    args
}

/// Derive the series code from a free-text model string.
///
/// The model string often starts with the management number followed by a
/// decorated series name (e.g. punctuation or a Roman-numeral generation
/// mark before the code). The code itself is a run of two or more
/// uppercase letters immediately followed by digits.
pub fn series_code(model: &str, key: Option<&str>) -> Option<String> {
    let mut rest = model.trim();
    if let Some(key) = key {
        let key = key.trim();
        if !key.is_empty()
            && let Some(stripped) = rest.strip_prefix(key)
        {
            rest = stripped;
        }
    }
    let rest = rest.trim_start_matches(|c: char| !c.is_ascii_alphabetic() && !is_roman_numeral(c));
    let letters = rest.chars().take_while(|c| c.is_ascii_uppercase()).count();
    if letters < 2 {
        return None;
    }
    let digits = rest
        .chars()
        .skip(letters)
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    Some(rest.chars().take(letters + digits).collect())
}

fn is_roman_numeral(c: char) -> bool {
    ('\u{2160}'..='\u{2188}').contains(&c)
}
