//! Format-string driven extractor: reads values out of a JSON text into
//! typed targets addressed by path.
//!
//! The format grammar mirrors the printer's: `{`/`}` enter and leave object
//! scope, an identifier followed by `:` names the key to descend into, and
//! each `%` conversion runs one walk that fills the next [`ScanTarget`].

use crate::codec::{b64_decode, hex_decode};
use crate::escape::json_unescape;
use crate::token::{Token, TokenType};
use crate::walker::json_walk;

/// Typed out-parameter for one `%` conversion, in format-string order.
///
/// Targets the conversion does not match are left at their caller-set
/// value, so initialise them to whatever default you want.
pub enum ScanTarget<'s, 'j> {
    /// `%B`: stores whether the matched token is `true`.
    Bool(&'s mut bool),
    /// `%d`/`%i` family.
    Int(&'s mut i64),
    /// `%u`/`%o`/`%x` family.
    Uint(&'s mut u64),
    /// `%f`/`%e`/`%g` family (any length modifier).
    Float(&'s mut f64),
    /// `%Q` (unescaped) or `%s` (raw token text). JSON `null` stores `None`.
    Str(&'s mut Option<String>),
    /// `%T`: the raw token, containers included.
    Tok(&'s mut Option<Token<'j>>),
    /// `%H`: decoded hex bytes.
    HexBuf(&'s mut Option<Vec<u8>>),
    /// `%V`: decoded base64 bytes.
    Base64Buf(&'s mut Option<Vec<u8>>),
    /// `%M`: delegate invoked with the matched token.
    Scan(&'s mut dyn FnMut(&Token<'j>)),
}

#[derive(Clone, Copy)]
enum Conv {
    B,
    Q,
    T,
    M,
    H,
    V,
    Int,
    Uint,
    Float,
    Raw,
}

/// Extract values from `src` according to `fmt`, filling `targets` in
/// directive order. Returns the number of conversions that succeeded.
///
/// # Examples
///
/// ```
/// use jsonwalk::{json_scanf, ScanTarget};
///
/// let (mut flag, mut n) = (false, 0i64);
/// let count = json_scanf(
///     r#"{"a":true,"b":17}"#,
///     "{a:%B b:%d}",
///     &mut [ScanTarget::Bool(&mut flag), ScanTarget::Int(&mut n)],
/// );
/// assert_eq!(count, 2);
/// assert!(flag);
/// assert_eq!(n, 17);
/// ```
pub fn json_scanf<'j>(src: &'j str, fmt: &str, targets: &mut [ScanTarget<'_, 'j>]) -> usize {
    let f = fmt.as_bytes();
    let mut path = String::new();
    let mut i = 0;
    let mut next_target = 0;
    let mut conversions = 0;
    while i < f.len() {
        match f[i] {
            b'{' => {
                path.push('.');
                i += 1;
            }
            b'}' => {
                if let Some(p) = path.rfind('.') {
                    path.truncate(p);
                }
                i += 1;
            }
            b'%' => {
                let (conv, ni) = parse_conv(f, i);
                i = ni;
                if next_target < targets.len() {
                    conversions += run_conversion(src, &path, conv, &mut targets[next_target]);
                    next_target += 1;
                }
            }
            c if c.is_ascii_alphabetic() || c >= 0x80 => {
                let start = i;
                while i < f.len() && !matches!(f[i], b':' | b' ' | b'\r' | b'\n' | b'\t') {
                    i += 1;
                }
                let key = &fmt[start..i];
                if let Some(p) = path.rfind('.') {
                    path.truncate(p + 1);
                }
                path.push_str(key);
                while i < f.len() && matches!(f[i], b':' | b' ' | b'\r' | b'\n' | b'\t') {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    conversions
}

/// Parse the conversion starting at the `%` in `f[i]`, returning it and the
/// position to resume scanning from.
fn parse_conv(f: &[u8], i: usize) -> (Conv, usize) {
    match f.get(i + 1) {
        Some(b'B') => (Conv::B, i + 2),
        Some(b'Q') => (Conv::Q, i + 2),
        Some(b'T') => (Conv::T, i + 2),
        Some(b'M') => (Conv::M, i + 2),
        Some(b'H') => (Conv::H, i + 2),
        Some(b'V') => (Conv::V, i + 2),
        _ => {
            // A scanf-style spec such as `%d`, `%3lf`, `%x`: span to the next
            // delimiter and classify by the final conversion letter. Closing
            // braces are left for the outer loop so path pops still happen.
            let mut j = i + 1;
            while j < f.len()
                && !matches!(f[j], b',' | b' ' | b'\t' | b'\r' | b'\n' | b']' | b'}')
            {
                j += 1;
            }
            let conv = classify(&f[i + 1..j]);
            while j < f.len() && matches!(f[j], b',' | b' ' | b'\t' | b'\r' | b'\n') {
                j += 1;
            }
            (conv, j)
        }
    }
}

fn classify(spec: &[u8]) -> Conv {
    let letter = spec
        .iter()
        .rev()
        .find(|b| b.is_ascii_alphabetic())
        .copied()
        .unwrap_or(b'd');
    match letter {
        b'u' | b'o' | b'x' | b'X' => Conv::Uint,
        b'f' | b'F' | b'e' | b'E' | b'g' | b'G' | b'a' | b'A' => Conv::Float,
        b's' | b'c' => Conv::Raw,
        _ => Conv::Int,
    }
}

fn run_conversion<'j>(
    src: &'j str,
    path: &str,
    conv: Conv,
    target: &mut ScanTarget<'_, 'j>,
) -> usize {
    let mut count = 0;
    let _ = json_walk(src, |_, p, tok| {
        if p != path || tok.ty.is_start() {
            return;
        }
        count += apply(conv, target, tok);
    });
    count
}

fn apply<'j>(conv: Conv, target: &mut ScanTarget<'_, 'j>, tok: &Token<'j>) -> usize {
    match (conv, target) {
        (Conv::B, ScanTarget::Bool(v)) => {
            **v = tok.ty == TokenType::True;
            1
        }
        (Conv::T, ScanTarget::Tok(slot)) => {
            **slot = Some(*tok);
            1
        }
        (Conv::Q, ScanTarget::Str(slot)) => {
            if tok.ty == TokenType::Null {
                **slot = None;
                return 0;
            }
            match json_unescape(tok.text.as_bytes())
                .ok()
                .and_then(|v| String::from_utf8(v).ok())
            {
                Some(s) => {
                    **slot = Some(s);
                    1
                }
                None => 0,
            }
        }
        (Conv::Raw, ScanTarget::Str(slot)) => {
            **slot = Some(tok.text.to_string());
            1
        }
        (Conv::H, ScanTarget::HexBuf(slot)) => match hex_decode(tok.text.as_bytes()) {
            Some(v) => {
                **slot = Some(v);
                1
            }
            None => 0,
        },
        (Conv::V, ScanTarget::Base64Buf(slot)) => match b64_decode(tok.text.as_bytes()) {
            Some(v) => {
                **slot = Some(v);
                1
            }
            None => 0,
        },
        (Conv::M, ScanTarget::Scan(f)) => {
            f(tok);
            1
        }
        (Conv::Int, ScanTarget::Int(v)) => match parse_int_prefix(tok.text) {
            Some(x) => {
                **v = x;
                1
            }
            None => 0,
        },
        (Conv::Uint, ScanTarget::Uint(v)) => match parse_uint_prefix(tok.text) {
            Some(x) => {
                **v = x;
                1
            }
            None => 0,
        },
        (Conv::Float, ScanTarget::Float(v)) => match tok.text.parse::<f64>() {
            Ok(x) => {
                **v = x;
                1
            }
            Err(_) => 0,
        },
        _ => 0,
    }
}

/// Longest leading integer, `sscanf`-style: an optional sign and digits,
/// ignoring whatever follows (so `%d` against `1.5` reads `1`).
fn parse_int_prefix(s: &str) -> Option<i64> {
    let b = s.as_bytes();
    let mut i = usize::from(matches!(b.first(), Some(b'-' | b'+')));
    let start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == start {
        return None;
    }
    s[..i].parse().ok()
}

fn parse_uint_prefix(s: &str) -> Option<u64> {
    let b = s.as_bytes();
    let mut i = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 {
        return None;
    }
    s[..i].parse().ok()
}

/// Fetch the token of element `idx` of the array at `path`.
///
/// Returns `None` when the element does not exist. Containers yield their
/// end token, spanning the whole element.
///
/// # Examples
///
/// ```
/// use jsonwalk::json_scanf_array_elem;
///
/// let tok = json_scanf_array_elem(r#"{"a":[10,20]}"#, ".a", 1).unwrap();
/// assert_eq!(tok.text, "20");
/// ```
pub fn json_scanf_array_elem<'j>(src: &'j str, path: &str, idx: usize) -> Option<Token<'j>> {
    let full = format!("{path}[{idx}]");
    let mut found = None;
    let _ = json_walk(src, |_, p, tok| {
        if p == full && !tok.ty.is_start() {
            found = Some(*tok);
        }
    });
    found
}
