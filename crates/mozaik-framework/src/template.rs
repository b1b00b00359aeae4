// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! `$name` / `${name}` placeholder substitution for component descriptions.

use std::collections::BTreeMap;

/// Replaces `$name` and `${name}` placeholders found in `context`; `$$` yields `$`.
///
/// Placeholders without a value, and `$` signs not followed by an identifier, are left
/// untouched.
///
/// ```
/// use std::collections::BTreeMap;
/// use mozaik_framework::template::safe_substitute;
///
/// let mut context = BTreeMap::new();
/// context.insert("name".to_string(), "V1".to_string());
/// assert_eq!(safe_substitute("${name}: $name $missing $$5", &context), "V1: V1 $missing $5");
/// ```
pub fn safe_substitute(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(position) = rest.find('$') {
        out.push_str(&rest[..position]);
        let after = &rest[position + 1..];

        if let Some(stripped) = after.strip_prefix('$') {
            out.push('$');
            rest = stripped;
            continue;
        }

        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) if is_identifier(&braced[..end]) => {
                    let key = &braced[..end];
                    match context.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("${");
                            out.push_str(key);
                            out.push('}');
                        }
                    }
                    rest = &braced[end + 1..];
                }
                _ => {
                    out.push('$');
                    rest = after;
                }
            }
            continue;
        }

        let length = identifier_length(after);
        if length == 0 {
            out.push('$');
            rest = after;
            continue;
        }
        let key = &after[..length];
        match context.get(key) {
            Some(value) => out.push_str(value),
            None => {
                out.push('$');
                out.push_str(key);
            }
        }
        rest = &after[length..];
    }
    out.push_str(rest);
    out
}

fn identifier_length(s: &str) -> usize {
    let mut length = 0;
    for (i, c) in s.char_indices() {
        let allowed = c == '_' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit());
        if !allowed {
            break;
        }
        length = i + 1;
    }
    length
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && identifier_length(s) == s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> BTreeMap<String, String> {
        [("name", "UniformProbabilisticArborization"), ("source", "LGN_On"), ("target", "V1_Exc_L4")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_and_braced_placeholders() {
        assert_eq!(
            safe_substitute("$name from ${source}_x to $target.", &context()),
            "UniformProbabilisticArborization from LGN_On_x to V1_Exc_L4."
        );
    }

    #[test]
    fn test_unknown_and_malformed_placeholders_untouched() {
        assert_eq!(safe_substitute("$unknown ${also} ${bad-key} $ 3$", &context()), "$unknown ${also} ${bad-key} $ 3$");
        assert_eq!(safe_substitute("${name", &context()), "${name");
        assert_eq!(safe_substitute("$1", &context()), "$1");
    }

    #[test]
    fn test_escaped_dollar() {
        assert_eq!(safe_substitute("$$name costs $$", &context()), "$name costs $");
    }
}
