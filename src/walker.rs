//! Recursive-descent tokeniser that drives every other component.
//!
//! The walker parses a complete in-memory JSON text and fires a callback for
//! each token, carrying the current dotted/bracketed path. Value bytes are
//! never copied: tokens are slices of the caller's input.

use crate::error::JsonError;
use crate::token::{Name, Token, TokenType};

/// Hard cap on the textual path maintained during a walk. Components past
/// the cap are truncated silently.
pub const MAX_PATH_LEN: usize = 256;

type WalkResult = Result<(), JsonError>;

#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Byte length of a UTF-8 sequence, judged by the lead byte's high bits.
#[inline]
fn utf8_char_len(b: u8) -> usize {
    if b & 0x80 == 0 {
        1
    } else {
        match b & 0xf0 {
            0xf0 => 4,
            0xe0 => 3,
            _ => 2,
        }
    }
}

/// Length of the escape body following a backslash, not counting the
/// backslash itself. `s` starts right after the backslash.
fn escape_len(s: &[u8]) -> Result<usize, JsonError> {
    match s.first() {
        None => Err(JsonError::Incomplete),
        Some(b'u') => {
            if s.len() < 5 {
                Err(JsonError::Incomplete)
            } else if s[1..5].iter().all(u8::is_ascii_hexdigit) {
                Ok(5)
            } else {
                Err(JsonError::Invalid)
            }
        }
        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Ok(1),
        Some(_) => Err(JsonError::Invalid),
    }
}

struct Walker<'j, F> {
    src: &'j [u8],
    text: &'j str,
    pos: usize,
    path: String,
    name: Name<'j>,
    cb: F,
}

impl<'j, F> Walker<'j, F>
where
    F: FnMut(Name<'j>, &str, &Token<'j>),
{
    #[inline]
    fn left(&self) -> usize {
        self.src.len() - self.pos
    }

    fn skip_ws(&mut self) {
        while self.pos < self.src.len() && is_space(self.src[self.pos]) {
            self.pos += 1;
        }
    }

    /// Current byte after whitespace, without consuming it.
    fn cur(&mut self) -> Option<u8> {
        self.skip_ws();
        self.src.get(self.pos).copied()
    }

    fn test_and_skip(&mut self, expected: u8) -> WalkResult {
        match self.cur() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(JsonError::Invalid),
            None => Err(JsonError::Incomplete),
        }
    }

    /// Append to the path, clamping at [`MAX_PATH_LEN`]. Returns the length
    /// before the append so the caller can restore it.
    fn append_to_path(&mut self, s: &str) -> usize {
        let n = self.path.len();
        let mut take = s.len().min(MAX_PATH_LEN - n);
        while take > 0 && !s.is_char_boundary(take) {
            take -= 1;
        }
        self.path.push_str(&s[..take]);
        n
    }

    fn truncate_path(&mut self, len: usize) {
        self.path.truncate(len);
    }

    /// Fire the callback, unless the path ends in the `.` sentinel that marks
    /// "inside an object, key not yet appended". The sentinel is what keeps
    /// key tokens from surfacing as value events.
    fn emit(&mut self, ty: TokenType, off: usize, len: usize) {
        if self.path.is_empty() || !self.path.ends_with('.') {
            let tok = Token {
                ty,
                off,
                text: &self.text[off..off + len],
            };
            (self.cb)(self.name, &self.path, &tok);
            self.name = Name::None;
        }
    }

    /* string = '"' { quoted_printable_chars } '"' */
    fn parse_string(&mut self) -> WalkResult {
        self.test_and_skip(b'"')?;
        let start = self.pos;
        loop {
            let Some(&ch) = self.src.get(self.pos) else {
                return Err(JsonError::Incomplete);
            };
            if ch < 32 {
                return Err(JsonError::Invalid);
            }
            let len = utf8_char_len(ch);
            if len > self.left() {
                return Err(JsonError::Incomplete);
            }
            if ch == b'\\' {
                let n = escape_len(&self.src[self.pos + 1..])?;
                self.pos += 1 + n;
            } else if ch == b'"' {
                self.emit(TokenType::Str, start, self.pos - start);
                self.pos += 1;
                return Ok(());
            } else {
                self.pos += len;
            }
        }
    }

    /* number = [ '-' ] digit+ [ '.' digit+ ] [ ('e'|'E') [ '+'|'-' ] digit+ ] */
    fn parse_number(&mut self) -> WalkResult {
        self.skip_ws();
        let start = self.pos;
        if self.src.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        self.digits()?;
        if self.src.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            self.digits()?;
        }
        if matches!(self.src.get(self.pos), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.src.get(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.digits()?;
        }
        self.emit(TokenType::Num, start, self.pos - start);
        Ok(())
    }

    /// At least one ASCII digit, then as many as follow.
    fn digits(&mut self) -> WalkResult {
        match self.src.get(self.pos) {
            None => return Err(JsonError::Incomplete),
            Some(b) if !b.is_ascii_digit() => return Err(JsonError::Invalid),
            _ => {}
        }
        while matches!(self.src.get(self.pos), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        Ok(())
    }

    /// Literal keyword: `null`, `true`, `false`.
    fn expect(&mut self, word: &[u8], ty: TokenType) -> WalkResult {
        let start = self.pos;
        for (i, &b) in word.iter().enumerate() {
            match self.src.get(start + i) {
                None => return Err(JsonError::Incomplete),
                Some(&c) if c != b => return Err(JsonError::Invalid),
                _ => {}
            }
        }
        self.pos += word.len();
        self.emit(ty, start, word.len());
        Ok(())
    }

    /* identifier = letter { letter | digit | '_' } */
    fn parse_identifier(&mut self) -> WalkResult {
        let start = self.pos;
        while matches!(
            self.src.get(self.pos),
            Some(&b) if b == b'_' || b.is_ascii_alphanumeric()
        ) {
            self.pos += 1;
        }
        self.emit(TokenType::Str, start, self.pos - start);
        Ok(())
    }

    /* key = identifier | string */
    fn parse_key(&mut self) -> WalkResult {
        match self.cur() {
            Some(c) if c.is_ascii_alphabetic() => self.parse_identifier(),
            Some(b'"') => self.parse_string(),
            Some(_) => Err(JsonError::Invalid),
            None => Err(JsonError::Incomplete),
        }
    }

    /* pair = key ':' value */
    fn parse_pair(&mut self) -> WalkResult {
        self.skip_ws();
        let start = self.pos;
        self.parse_key()?;
        let name = if self.src[start] == b'"' {
            &self.text[start + 1..self.pos - 1]
        } else {
            &self.text[start..self.pos]
        };
        self.name = Name::Key(name);
        let saved = self.append_to_path(name);
        self.test_and_skip(b':')?;
        self.parse_value()?;
        self.truncate_path(saved);
        Ok(())
    }

    /* object = '{' [ pair { ',' pair } ] '}' */
    fn parse_object(&mut self) -> WalkResult {
        self.skip_ws();
        let open = self.pos;
        self.emit(TokenType::ObjectStart, open, 0);
        self.test_and_skip(b'{')?;
        let state = self.path.len();
        self.append_to_path(".");
        while self.cur() != Some(b'}') {
            self.parse_pair()?;
            if self.cur() == Some(b',') {
                self.pos += 1;
            }
        }
        self.test_and_skip(b'}')?;
        self.truncate_path(state);
        self.emit(TokenType::ObjectEnd, open, self.pos - open);
        Ok(())
    }

    /* array = '[' [ value { ',' value } ] ']' */
    fn parse_array(&mut self) -> WalkResult {
        self.skip_ws();
        let open = self.pos;
        self.emit(TokenType::ArrayStart, open, 0);
        self.test_and_skip(b'[')?;
        let state = self.path.len();
        let mut idx = 0usize;
        while self.cur() != Some(b']') {
            let saved = self.append_to_path(&format!("[{idx}]"));
            self.name = Name::Index(idx);
            idx += 1;
            self.parse_value()?;
            self.truncate_path(saved);
            if self.cur() == Some(b',') {
                self.pos += 1;
            }
        }
        self.test_and_skip(b']')?;
        self.truncate_path(state);
        self.emit(TokenType::ArrayEnd, open, self.pos - open);
        Ok(())
    }

    /* value = 'null' | 'true' | 'false' | number | string | array | object */
    fn parse_value(&mut self) -> WalkResult {
        match self.cur() {
            Some(b'"') => self.parse_string(),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'n') => self.expect(b"null", TokenType::Null),
            Some(b't') => self.expect(b"true", TokenType::True),
            Some(b'f') => self.expect(b"false", TokenType::False),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(JsonError::Invalid),
            None => Err(JsonError::Incomplete),
        }
    }
}

/// Walk a JSON text, firing `cb` for every token in document order.
///
/// Returns the number of bytes consumed; input past the first complete value
/// is left untouched. The callback receives the value's [`Name`] in its
/// parent, the current path, and the token itself. Paths follow
/// `.key[index]` syntax with an empty string at the root; start tokens fire
/// with the parent path, end tokens with the same path as their start.
///
/// Object keys may be bare identifiers in addition to quoted strings; this
/// is the only extension over strict JSON.
///
/// # Examples
///
/// ```
/// use jsonwalk::{json_walk, TokenType};
///
/// let mut numbers = Vec::new();
/// let n = json_walk(r#"{"a":[1,2]}"#, |_, path, tok| {
///     if tok.ty == TokenType::Num {
///         numbers.push((path.to_string(), tok.text));
///     }
/// })
/// .unwrap();
/// assert_eq!(n, 11);
/// assert_eq!(numbers, [(".a[0]".to_string(), "1"), (".a[1]".to_string(), "2")]);
/// ```
pub fn json_walk<'j, F>(src: &'j str, cb: F) -> Result<usize, JsonError>
where
    F: FnMut(Name<'j>, &str, &Token<'j>),
{
    let mut walker = Walker {
        src: src.as_bytes(),
        text: src,
        pos: 0,
        path: String::with_capacity(MAX_PATH_LEN),
        name: Name::None,
        cb,
    };
    if walker.src.is_empty() {
        return Err(JsonError::Incomplete);
    }
    walker.parse_value()?;
    Ok(walker.pos)
}
