/// Backslash-escapes characters Discord would treat as markdown.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '~' | '`' | '|' | '>' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Reads a Discord ID given raw or as a user, role or channel mention.
pub fn parse_id(input: &str) -> Option<u64> {
    let inner = input
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|mention| {
            mention
                .trim_start_matches("@&")
                .trim_start_matches("@!")
                .trim_start_matches(['@', '#'])
        })
        .unwrap_or(input);
    inner.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markdown() {
        assert_eq!(escape_markdown("*"), "\\*");
        assert_eq!(escape_markdown("a_b"), "a\\_b");
        assert_eq!(escape_markdown("é"), "é");
    }

    #[test]
    fn parses_raw_ids_and_mentions() {
        assert_eq!(parse_id("80351110224678912"), Some(80351110224678912));
        assert_eq!(parse_id("<@80351110224678912>"), Some(80351110224678912));
        assert_eq!(parse_id("<@!80351110224678912>"), Some(80351110224678912));
        assert_eq!(parse_id("<@&42>"), Some(42));
        assert_eq!(parse_id("<#42>"), Some(42));
        assert_eq!(parse_id("snowflake"), None);
        assert_eq!(parse_id("<@abc>"), None);
        assert_eq!(parse_id("-5"), None);
    }
}
