//! Indentation handling for blocks nested in indented markup

/// Leading spaces and tabs of the first line with content.
pub fn indentation(text: &str) -> &str {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start_matches([' ', '\t']).len()])
        .unwrap_or("")
}

/// Remove `prefix` from every line with content.
///
/// Lines indented less than `prefix` lose whatever indentation they have;
/// whitespace-only lines are kept as they are.
pub fn dedent(text: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return text.to_string();
    }
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line
            } else {
                line.strip_prefix(prefix)
                    .unwrap_or_else(|| line.trim_start_matches([' ', '\t']))
            }
        })
        .collect()
}

/// Prefix every line with content with `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indentation_skips_blank_lines() {
        assert_eq!(indentation("\n   \n    resource {\n  x\n"), "    ");
        assert_eq!(indentation("\tresource {\n"), "\t");
        assert_eq!(indentation("resource {\n"), "");
        assert_eq!(indentation("\n\n"), "");
    }

    #[test]
    fn test_dedent_keeps_blank_lines() {
        let text = "    a {\n      b = 1\n\n   \n    }\n";
        assert_eq!(dedent(text, "    "), "a {\n  b = 1\n\n   \n}\n");
    }

    #[test]
    fn test_dedent_short_indent() {
        assert_eq!(dedent("    a\n  b\n", "    "), "a\nb\n");
    }

    #[test]
    fn test_indent_skips_empty_lines() {
        assert_eq!(indent("a {\n\n  b = 1\n}\n", "  "), "  a {\n\n    b = 1\n  }\n");
    }

    #[test]
    fn test_dedent_then_indent_restores() {
        let text = "   resource \"a\" \"b\" {\n     x = 1\n\n   }\n";
        let prefix = indentation(text);
        assert_eq!(indent(&dedent(text, prefix), prefix), text);
    }
}
