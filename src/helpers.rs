use fancy_regex::Regex;

/// Text of capture group 1 when `re` matches `text`.  A regex engine error
/// (backtrack limit) counts as no match.
pub(crate) fn capture_first<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .ok()
        .flatten()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// First comment token whose capture group 1 matches `re`.
pub(crate) fn find_in_comment<'t>(re: &Regex, comment: &'t [String]) -> Option<&'t str> {
    comment.iter().find_map(|token| capture_first(re, token))
}

/// Everything after the first `n` characters of `s`, or `""` when `s` is shorter.
pub(crate) fn skip_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or("", |(i, _)| &s[i..])
}
