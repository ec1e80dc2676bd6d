// src/core/html.rs
// Forgiving HTML tokenizer for the streaming table scanner.
// Case-insensitive on tag names, quote-aware inside tags, never fails:
// anything it cannot read as a tag is handed out as text.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name ...>`; the name is ASCII-lowercased.
    Open { name: String, self_closing: bool },
    /// `</name>`
    Close { name: String },
    /// Raw text between tags (entities not yet decoded).
    Text(&'a str),
}

pub struct Tokens<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
    // inside <script>/<style>: skip to the matching close tag
    raw_until: Option<&'static [u8]>,
}

impl<'a> Tokens<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, b: s.as_bytes(), i: 0, n: s.len(), raw_until: None }
    }

    /// Advance past the `>` that ends the tag starting at `self.i`.
    /// A quote opens an attribute value only right after `=` (whitespace
    /// allowed in between); anywhere else it is a plain character.
    #[inline]
    fn skip_tag(&mut self) {
        let mut quote: Option<u8> = None;
        let mut after_eq = false;
        while self.i < self.n {
            let c = self.b[self.i];
            self.i += 1;
            match quote {
                Some(q) => {
                    if c == q { quote = None; }
                }
                None => match c {
                    b'>' => return,
                    b'=' => { after_eq = true; continue; }
                    b'\'' | b'"' if after_eq => quote = Some(c),
                    c if c.is_ascii_whitespace() => continue,
                    _ => {}
                },
            }
            after_eq = false;
        }
    }

    #[inline]
    fn read_name(&mut self) -> String {
        let start = self.i;
        while self.i < self.n {
            match self.b[self.i] {
                b'>' | b'/' => break,
                c if c.is_ascii_whitespace() => break,
                _ => self.i += 1,
            }
        }
        self.s[start..self.i].to_ascii_lowercase()
    }

    fn open_tag(&mut self) -> Token<'a> {
        self.i += 1; // '<'
        let name = self.read_name();
        let tag_start = self.i;
        self.skip_tag();
        let self_closing = self.i >= 2
            && self.i > tag_start
            && self.b[self.i - 1] == b'>'
            && self.b[self.i - 2] == b'/';
        if !self_closing {
            match name.as_str() {
                "script" => self.raw_until = Some(b"</script"),
                "style" => self.raw_until = Some(b"</style"),
                _ => {}
            }
        }
        Token::Open { name, self_closing }
    }

    fn close_tag(&mut self) -> Token<'a> {
        self.i += 2; // "</"
        let name = self.read_name();
        self.skip_tag();
        Token::Close { name }
    }

    fn text_until_next_tag(&mut self, from: usize) -> Token<'a> {
        let start = self.i;
        let end = find_byte(self.b, from, b'<').unwrap_or(self.n);
        self.i = end;
        Token::Text(&self.s[start..end])
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.n {
            if let Some(close) = self.raw_until.take() {
                self.i = find_ci(self.b, self.i, close).unwrap_or(self.n);
                continue;
            }
            if self.b[self.i] != b'<' {
                return Some(self.text_until_next_tag(self.i));
            }
            let rest = &self.b[self.i..];
            if rest.starts_with(b"<!--") {
                self.i = find_ci(self.b, self.i + 4, b"-->").map_or(self.n, |p| p + 3);
                continue;
            }
            match rest.get(1) {
                Some(b'!') | Some(b'?') => {
                    // doctype, CDATA-ish, processing instructions
                    self.skip_tag();
                    continue;
                }
                Some(b'/') if rest.get(2).is_some_and(u8::is_ascii_alphabetic) => {
                    return Some(self.close_tag());
                }
                Some(c) if c.is_ascii_alphabetic() => return Some(self.open_tag()),
                // stray '<' is text
                _ => return Some(self.text_until_next_tag(self.i + 1)),
            }
        }
        None
    }
}

#[inline]
fn find_byte(b: &[u8], from: usize, needle: u8) -> Option<usize> {
    b.get(from..)?.iter().position(|&c| c == needle).map(|off| from + off)
}

/// ASCII case-insensitive search for `needle` starting at `from`.
pub fn find_ci(hay: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
