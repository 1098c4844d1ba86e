//! Re-emit walker events with two-space indentation.

use crate::error::JsonError;
use crate::sink::Sink;
use crate::token::{Name, Token, TokenType};
use crate::walker::json_walk;

struct Prettifier<'o> {
    out: &'o mut dyn Sink,
    level: usize,
    last: Option<TokenType>,
}

impl Prettifier<'_> {
    fn indent(&mut self) {
        for _ in 0..self.level {
            self.out.write(b"  ");
        }
    }

    /// Separator, newline, indentation and (inside objects) the quoted key
    /// that precede a value.
    fn print_key(&mut self, name: Name, path: &str) {
        if matches!(self.last, Some(last) if !last.is_start()) {
            self.out.write(b",");
        }
        if !path.is_empty() {
            self.out.write(b"\n");
        }
        self.indent();
        if !path.is_empty() && !path.ends_with(']') {
            if let Name::Key(key) = name {
                self.out.write(b"\"");
                self.out.write(key.as_bytes());
                self.out.write(b"\": ");
            }
        }
    }

    fn event(&mut self, name: Name, path: &str, t: &Token) {
        match t.ty {
            TokenType::ObjectStart | TokenType::ArrayStart => {
                self.print_key(name, path);
                self.out
                    .write(if t.ty == TokenType::ArrayStart { b"[" } else { b"{" });
                self.level += 1;
            }
            TokenType::ObjectEnd | TokenType::ArrayEnd => {
                self.level = self.level.saturating_sub(1);
                if matches!(self.last, Some(last) if !last.is_start()) {
                    self.out.write(b"\n");
                    self.indent();
                }
                self.out
                    .write(if t.ty == TokenType::ArrayEnd { b"]" } else { b"}" });
            }
            _ => {
                self.print_key(name, path);
                if t.ty == TokenType::Str {
                    self.out.write(b"\"");
                }
                self.out.write(t.text.as_bytes());
                if t.ty == TokenType::Str {
                    self.out.write(b"\"");
                }
            }
        }
        self.last = Some(t.ty);
    }
}

/// Pretty-print `src` into `out` with two-space indentation. Purely a
/// whitespace transform: token text is copied verbatim. Returns the bytes
/// of input consumed, like [`json_walk`].
///
/// # Examples
///
/// ```
/// use jsonwalk::json_prettify;
///
/// let mut out = Vec::new();
/// json_prettify(r#"{"a":[1]}"#, &mut out).unwrap();
/// assert_eq!(out, b"{\n  \"a\": [\n    1\n  ]\n}");
/// ```
pub fn json_prettify(src: &str, out: &mut dyn Sink) -> Result<usize, JsonError> {
    let mut pd = Prettifier {
        out,
        level: 0,
        last: None,
    };
    json_walk(src, |name, path, t| pd.event(name, path, t))
}
