/// Splits `input` on `delimiter`, ignoring delimiters nested inside
/// parentheses or square brackets so arbitrary values like `[color:var(--x)]`
/// survive intact. Always returns at least one part.
pub fn segment(input: &str, delimiter: char) -> Vec<&str> {
    let mut paren_depth = 0usize;
    let mut bracket_depth = 0usize;
    let mut split_indices = Vec::new();

    for (idx, ch) in input.char_indices() {
        match ch {
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            ch if ch == delimiter && paren_depth == 0 && bracket_depth == 0 => {
                split_indices.push(idx);
            }
            _ => {}
        }
    }

    if split_indices.is_empty() {
        return vec![input];
    }

    let mut parts = Vec::with_capacity(split_indices.len() + 1);
    let mut start = 0usize;
    for idx in split_indices {
        parts.push(&input[start..idx]);
        start = idx + delimiter.len_utf8();
    }
    parts.push(&input[start..]);
    parts
}

/// Finds the longest registered functional root that prefixes `base`,
/// returning the root and the remaining value text. Candidate roots are
/// only considered at `-` boundaries, so `mt-4` resolves to `mt` even when
/// a shorter `m` root is registered. Returns `(None, None)` when no root
/// matches.
pub fn find_root<'a, F>(base: &'a str, is_root: F) -> (Option<&'a str>, Option<&'a str>)
where
    F: Fn(&str) -> bool,
{
    let mut end = base.len();
    loop {
        let candidate = &base[..end];
        if is_root(candidate) {
            let value = if end == base.len() {
                None
            } else {
                Some(&base[end + 1..])
            };
            return (Some(candidate), value);
        }
        let Some(cut) = candidate.rfind('-') else {
            return (None, None);
        };
        end = cut;
    }
}
