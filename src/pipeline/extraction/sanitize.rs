/// Normalize report text before pattern matching.
/// Strips characters outside the allow-list, collapses whitespace runs to a
/// single space and trims both ends.
pub fn normalize_text(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| {
            c.is_alphanumeric()
                || c.is_whitespace()
                || matches!(
                    c,
                    '_' | '.'
                        | ','
                        | ':'
                        | ';'
                        | '('
                        | ')'
                        | '['
                        | ']'
                        | '-'
                        | '+'
                        | '='
                        | '<'
                        | '>'
                        | '/'
                        | '%'
                        | '*'
                )
        })
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
