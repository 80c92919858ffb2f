//! Single-pass repair for the JSON faults models commonly emit:
//! curly quotes as delimiters, trailing commas and raw control characters
//! inside strings.

use serde_json::Value;

/// Rewrites `raw` into a string `serde_json` is more likely to accept.
///
/// Curly double quotes are only treated as delimiters where a straight quote
/// would be one; inside a straight-quoted string they are ordinary text.
pub fn cleanup_json_string(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut opened_by_smart_quote = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(c);
                continue;
            }
            match c {
                '\\' => {
                    escaped = true;
                    out.push(c);
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                c if opened_by_smart_quote && is_smart_double_quote(c) => {
                    in_string = false;
                    out.push('"');
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                opened_by_smart_quote = false;
                out.push(c);
            }
            c if is_smart_double_quote(c) => {
                in_string = true;
                opened_by_smart_quote = true;
                out.push('"');
            }
            ',' if closes_next(&chars[i + 1..]) => {}
            c => out.push(c),
        }
    }

    out
}

fn is_smart_double_quote(c: char) -> bool {
    matches!(c, '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}')
}

/// True when the next non-whitespace character closes an object or array.
fn closes_next(rest: &[char]) -> bool {
    rest.iter()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| *c == '}' || *c == ']')
}

/// Parses `raw`, falling back to one repaired attempt.
pub fn parse_with_repair(raw: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_str(&cleanup_json_string(raw)),
    }
}
