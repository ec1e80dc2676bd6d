// src/core/sanitize.rs

/// Collapse every whitespace run (including NBSP) into one space and trim.
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

/// Lower-case and replace every run of non-word characters with one space.
/// Word characters are letters, digits and `_` in any script, so
/// "Offer Duration, days" → "offer duration days" and "Юр. лицо" → "юр лицо".
pub fn normalize_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_space && !out.is_empty() { out.push(' '); }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Decode the character references that show up in table cells.
/// Unknown or malformed references are kept verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        // references are short; anything longer is plain text
        let semi = tail.char_indices().take(12).find(|&(_, c)| c == ';').map(|(i, _)| i);
        match semi.and_then(|end| decode_one(&tail[1..end]).map(|ch| (ch, end))) {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_one(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "nbsp" => Some('\u{a0}'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "ndash" => Some('–'),
        "mdash" => Some('—'),
        "laquo" => Some('«'),
        "raquo" => Some('»'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_nbsp_and_newlines() {
        assert_eq!(normalize_ws("  a \u{a0}\n b\t"), "a b");
        assert_eq!(normalize_ws("   "), "");
    }

    #[test]
    fn normalize_key_handles_punctuation_and_cyrillic() {
        assert_eq!(normalize_key("Offer Duration, days"), "offer duration days");
        assert_eq!(normalize_key("  Юр. лицо "), "юр лицо");
        assert_eq!(normalize_key("Green-Probability (%)"), "green probability");
        assert_eq!(normalize_key("%"), "");
        assert_eq!(normalize_key("motivation_amount"), "motivation_amount");
    }

    #[test]
    fn decode_entities_named_and_numeric() {
        assert_eq!(decode_entities("A&amp;B"), "A&B");
        assert_eq!(decode_entities("10&nbsp;%"), "10\u{a0}%");
        assert_eq!(decode_entities("&#1044;&#x43e;"), "До");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
    }

    #[test]
    fn decode_entities_keeps_unknown() {
        assert_eq!(decode_entities("R&D"), "R&D");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_entities("tail &"), "tail &");
    }
}
