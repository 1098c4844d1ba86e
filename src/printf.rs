//! Format-string driven JSON printer.
//!
//! The format language passes structural characters through verbatim, quotes
//! bare identifiers, and interprets `%` conversions against a tagged
//! argument list ([`FmtArg`]) instead of C-style varargs: the format string
//! stays a compact DSL while argument widths become explicit and safe.

use crate::codec::{b64_encode, hex_encode};
use crate::escape::json_escape;
use crate::sink::Sink;

/// A `%M` delegate: writes to the sink and may consume further arguments
/// from the shared cursor.
pub type PrintfFn = dyn Fn(&mut dyn Sink, &mut Args<'_, '_>) -> usize;

/// One printer argument. Conversions pull these off an [`Args`] cursor in
/// format-string order.
#[derive(Clone, Copy)]
pub enum FmtArg<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    /// `%Q`/`%s` payload; `None` prints as JSON `null` under `%Q`.
    Str(Option<&'a str>),
    /// `%H`/`%V` payload.
    Bytes(&'a [u8]),
    /// Array payloads for [`json_printf_array`].
    Ints(&'a [i64]),
    Floats(&'a [f64]),
    /// `%M` delegate.
    Fmt(&'a PrintfFn),
}

macro_rules! impl_from {
    ($($t:ty => $variant:ident as $conv:ty),* $(,)?) => {
        $(impl<'a> From<$t> for FmtArg<'a> {
            fn from(v: $t) -> Self {
                FmtArg::$variant(v as $conv)
            }
        })*
    };
}

impl_from! {
    i8 => Int as i64, i16 => Int as i64, i32 => Int as i64, i64 => Int as i64,
    isize => Int as i64,
    u8 => Uint as u64, u16 => Uint as u64, u32 => Uint as u64, u64 => Uint as u64,
    usize => Uint as u64,
    f32 => Float as f64, f64 => Float as f64,
}

impl<'a> From<bool> for FmtArg<'a> {
    fn from(v: bool) -> Self {
        FmtArg::Bool(v)
    }
}

impl<'a> From<char> for FmtArg<'a> {
    fn from(v: char) -> Self {
        FmtArg::Char(v)
    }
}

impl<'a> From<&'a str> for FmtArg<'a> {
    fn from(v: &'a str) -> Self {
        FmtArg::Str(Some(v))
    }
}

impl<'a> From<&'a String> for FmtArg<'a> {
    fn from(v: &'a String) -> Self {
        FmtArg::Str(Some(v))
    }
}

impl<'a> From<Option<&'a str>> for FmtArg<'a> {
    fn from(v: Option<&'a str>) -> Self {
        FmtArg::Str(v)
    }
}

impl<'a> From<&'a [u8]> for FmtArg<'a> {
    fn from(v: &'a [u8]) -> Self {
        FmtArg::Bytes(v)
    }
}

impl<'a> From<&'a Vec<u8>> for FmtArg<'a> {
    fn from(v: &'a Vec<u8>) -> Self {
        FmtArg::Bytes(v)
    }
}

impl<'a> From<&'a [i64]> for FmtArg<'a> {
    fn from(v: &'a [i64]) -> Self {
        FmtArg::Ints(v)
    }
}

impl<'a> From<&'a [f64]> for FmtArg<'a> {
    fn from(v: &'a [f64]) -> Self {
        FmtArg::Floats(v)
    }
}

/// Build a `[FmtArg; N]` from mixed expressions via `From`.
///
/// ```
/// use jsonwalk::{json_args, json_printf};
///
/// let mut out = Vec::new();
/// json_printf(&mut out, "[%d, %B, %Q]", &json_args![7, true, "x"]);
/// assert_eq!(out, br#"[7, true, "x"]"#);
/// ```
#[macro_export]
macro_rules! json_args {
    () => { [$crate::FmtArg::Int(0); 0] };
    ($($x:expr),+ $(,)?) => { [$( $crate::FmtArg::from($x) ),+] };
}

/// Cursor over a printer argument list, shared with `%M` delegates.
pub struct Args<'s, 'a> {
    items: &'s [FmtArg<'a>],
    pos: usize,
}

impl<'s, 'a> Args<'s, 'a> {
    pub fn new(items: &'s [FmtArg<'a>]) -> Self {
        Self { items, pos: 0 }
    }

    /// Pop the next argument, if any.
    pub fn next(&mut self) -> Option<&'s FmtArg<'a>> {
        let item = self.items.get(self.pos);
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn next_i64(&mut self) -> Option<i64> {
        match self.next()? {
            FmtArg::Int(v) => Some(*v),
            FmtArg::Uint(v) => Some(*v as i64),
            FmtArg::Bool(v) => Some(*v as i64),
            FmtArg::Char(c) => Some(*c as i64),
            _ => None,
        }
    }

    fn next_u64(&mut self) -> Option<u64> {
        match self.next()? {
            FmtArg::Uint(v) => Some(*v),
            FmtArg::Int(v) => Some(*v as u64),
            FmtArg::Bool(v) => Some(*v as u64),
            FmtArg::Char(c) => Some(*c as u64),
            _ => None,
        }
    }

    fn next_f64(&mut self) -> Option<f64> {
        match self.next()? {
            FmtArg::Float(v) => Some(*v),
            FmtArg::Int(v) => Some(*v as f64),
            FmtArg::Uint(v) => Some(*v as f64),
            _ => None,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        match self.next()? {
            FmtArg::Char(c) => Some(*c),
            FmtArg::Int(v) => char::from_u32(*v as u32),
            FmtArg::Uint(v) => char::from_u32(*v as u32),
            _ => None,
        }
    }

    fn next_bytes(&mut self) -> Option<&'a [u8]> {
        match self.next()? {
            FmtArg::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// Interpret `fmt` against `args` and write the result, returning the
/// logical byte count (see [`Sink`] on dry-run sizing).
///
/// Structural characters (`{ } [ ] : , "` and whitespace) pass through;
/// a bare identifier becomes a quoted key; `%` introduces a conversion:
///
/// | directive | argument | output |
/// |---|---|---|
/// | `%Q`, `%.*Q` | `Str` | quoted, escaped string, or `null` |
/// | `%H` | `Bytes` | quoted lowercase hex |
/// | `%V` | `Bytes` | quoted base64 |
/// | `%B` | `Bool` | `true` / `false` |
/// | `%M` | `Fmt` | delegate, may consume further args |
/// | other | per printf | C99-style `diouxX eEfFgG c s p %` |
///
/// # Examples
///
/// ```
/// use jsonwalk::{json_args, json_printf};
///
/// let mut out = Vec::new();
/// json_printf(&mut out, "{foo:%d,bar:%Q}", &json_args![42, "he\"llo"]);
/// assert_eq!(out, br#"{"foo":42,"bar":"he\"llo"}"#);
/// ```
pub fn json_printf(out: &mut dyn Sink, fmt: &str, args: &[FmtArg]) -> usize {
    let mut cursor = Args::new(args);
    json_vprintf(out, fmt, &mut cursor)
}

/// [`json_printf`] over an existing argument cursor; this is what `%M`
/// delegates and the path mutator call.
pub fn json_vprintf(out: &mut dyn Sink, fmt: &str, args: &mut Args) -> usize {
    let f = fmt.as_bytes();
    let mut i = 0;
    let mut len = 0;
    while i < f.len() {
        let c = f[i];
        match c {
            b':' | b',' | b' ' | b'\r' | b'\n' | b'\t' | b'[' | b']' | b'{' | b'}' | b'"' => {
                len += out.write(&f[i..i + 1]);
                i += 1;
            }
            b'%' => {
                i += 1;
                len += directive(out, f, &mut i, args);
            }
            b'_' => len += ident_sugar(out, f, &mut i),
            c if c.is_ascii_alphabetic() => len += ident_sugar(out, f, &mut i),
            _ => {
                len += out.write(&f[i..i + 1]);
                i += 1;
            }
        }
    }
    len
}

/// Bare identifier in the format string: emit it as a quoted key.
fn ident_sugar(out: &mut dyn Sink, f: &[u8], i: &mut usize) -> usize {
    let start = *i;
    while matches!(f.get(*i), Some(&b) if b == b'_' || b.is_ascii_alphanumeric()) {
        *i += 1;
    }
    let mut n = out.write(b"\"");
    n += out.write(&f[start..*i]);
    n += out.write(b"\"");
    n
}

fn directive(out: &mut dyn Sink, f: &[u8], i: &mut usize, args: &mut Args) -> usize {
    match f.get(*i) {
        Some(b'M') => {
            *i += 1;
            match args.next() {
                Some(&FmtArg::Fmt(func)) => func(out, args),
                _ => 0,
            }
        }
        Some(b'B') => {
            *i += 1;
            let v = match args.next() {
                Some(&FmtArg::Bool(v)) => v,
                Some(&FmtArg::Int(v)) => v != 0,
                Some(&FmtArg::Uint(v)) => v != 0,
                _ => return 0,
            };
            out.write(if v { b"true".as_ref() } else { b"false".as_ref() })
        }
        Some(b'H') => {
            *i += 1;
            match args.next_bytes() {
                Some(bytes) => {
                    let mut n = out.write(b"\"");
                    n += hex_encode(out, bytes);
                    n + out.write(b"\"")
                }
                None => 0,
            }
        }
        Some(b'V') => {
            *i += 1;
            match args.next_bytes() {
                Some(bytes) => {
                    let mut n = out.write(b"\"");
                    n += b64_encode(out, bytes);
                    n + out.write(b"\"")
                }
                None => 0,
            }
        }
        Some(b'Q') => {
            *i += 1;
            quoted(out, args)
        }
        // `%.*Q`: the explicit-length spelling; slices carry their length,
        // so it consumes the same single Str argument as `%Q`.
        Some(b'.') if f.get(*i + 1) == Some(&b'*') && f.get(*i + 2) == Some(&b'Q') => {
            *i += 3;
            quoted(out, args)
        }
        Some(_) => {
            let spec = parse_spec(f, i, args);
            run_spec(out, &spec, args)
        }
        None => out.write(b"%"),
    }
}

fn quoted(out: &mut dyn Sink, args: &mut Args) -> usize {
    match args.next() {
        Some(&FmtArg::Str(Some(s))) => {
            let mut n = out.write(b"\"");
            n += json_escape(out, s.as_bytes());
            n + out.write(b"\"")
        }
        Some(&FmtArg::Str(None)) => out.write(b"null"),
        _ => 0,
    }
}

// ============================================================================
// Default printf dialect
// ============================================================================

#[derive(Default)]
struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    hash: bool,
    zero: bool,
    width: usize,
    prec: Option<usize>,
    conv: u8,
}

/// Parse flags, width, precision, length modifiers and the conversion
/// specifier. `*` width/precision consume integer arguments, matching C;
/// length modifiers are accepted and discarded since [`FmtArg`] variants
/// already fix the argument width.
fn parse_spec(f: &[u8], i: &mut usize, args: &mut Args) -> Spec {
    let mut sp = Spec::default();
    loop {
        match f.get(*i) {
            Some(b'-') => sp.minus = true,
            Some(b'+') => sp.plus = true,
            Some(b' ') => sp.space = true,
            Some(b'#') => sp.hash = true,
            Some(b'0') => sp.zero = true,
            _ => break,
        }
        *i += 1;
    }
    if f.get(*i) == Some(&b'*') {
        *i += 1;
        let w = args.next_i64().unwrap_or(0);
        if w < 0 {
            sp.minus = true;
        }
        sp.width = w.unsigned_abs() as usize;
    } else {
        while matches!(f.get(*i), Some(b) if b.is_ascii_digit()) {
            sp.width = sp.width * 10 + (f[*i] - b'0') as usize;
            *i += 1;
        }
    }
    if f.get(*i) == Some(&b'.') {
        *i += 1;
        if f.get(*i) == Some(&b'*') {
            *i += 1;
            let p = args.next_i64().unwrap_or(0);
            sp.prec = if p < 0 { None } else { Some(p as usize) };
        } else {
            let mut p = 0usize;
            while matches!(f.get(*i), Some(b) if b.is_ascii_digit()) {
                p = p * 10 + (f[*i] - b'0') as usize;
                *i += 1;
            }
            sp.prec = Some(p);
        }
    }
    match f.get(*i) {
        Some(&(m @ (b'h' | b'l'))) => {
            *i += 1;
            if f.get(*i) == Some(&m) {
                *i += 1;
            }
        }
        Some(b'j' | b'z' | b't' | b'L') => *i += 1,
        _ => {}
    }
    if let Some(&c) = f.get(*i) {
        sp.conv = c;
        *i += 1;
    }
    sp
}

fn run_spec(out: &mut dyn Sink, sp: &Spec, args: &mut Args) -> usize {
    match sp.conv {
        b'd' | b'i' => {
            let Some(v) = args.next_i64() else { return 0 };
            emit_int(out, sp, v < 0, v.unsigned_abs().to_string(), v == 0, true)
        }
        b'u' => {
            let Some(v) = args.next_u64() else { return 0 };
            emit_int(out, sp, false, v.to_string(), v == 0, false)
        }
        b'o' => {
            let Some(v) = args.next_u64() else { return 0 };
            emit_int(out, sp, false, format!("{v:o}"), v == 0, false)
        }
        b'x' => {
            let Some(v) = args.next_u64() else { return 0 };
            emit_int(out, sp, false, format!("{v:x}"), v == 0, false)
        }
        b'X' => {
            let Some(v) = args.next_u64() else { return 0 };
            emit_int(out, sp, false, format!("{v:X}"), v == 0, false)
        }
        b'e' | b'E' | b'f' | b'F' | b'g' | b'G' | b'a' | b'A' => {
            let Some(v) = args.next_f64() else { return 0 };
            emit_float(out, sp, v)
        }
        b'c' | b'C' => {
            let Some(c) = args.next_char() else { return 0 };
            let mut buf = [0u8; 4];
            pad_number(out, sp, "", c.encode_utf8(&mut buf), false)
        }
        b's' | b'S' => {
            let s = match args.next() {
                Some(&FmtArg::Str(v)) => v.unwrap_or(""),
                _ => return 0,
            };
            let t = match sp.prec {
                Some(p) => match s.char_indices().nth(p) {
                    Some((idx, _)) => &s[..idx],
                    None => s,
                },
                None => s,
            };
            pad_number(out, sp, "", t, false)
        }
        b'p' => {
            let Some(v) = args.next_u64() else { return 0 };
            pad_number(out, sp, "", &format!("0x{v:x}"), false)
        }
        b'n' => {
            // No out-parameters in the tagged-argument model; the argument
            // is consumed so later conversions stay aligned.
            let _ = args.next();
            0
        }
        b'%' => out.write(b"%"),
        0 => 0,
        _ => {
            // Unknown specifier: consume one argument and move on.
            let _ = args.next();
            0
        }
    }
}

fn emit_int(
    out: &mut dyn Sink,
    sp: &Spec,
    neg: bool,
    mut mag: String,
    is_zero: bool,
    signed: bool,
) -> usize {
    if let Some(p) = sp.prec {
        if is_zero && p == 0 {
            mag.clear();
        } else if p > mag.len() {
            mag.insert_str(0, &"0".repeat(p - mag.len()));
        }
    }
    let mut prefix = String::new();
    if signed {
        if neg {
            prefix.push('-');
        } else if sp.plus {
            prefix.push('+');
        } else if sp.space {
            prefix.push(' ');
        }
    }
    if sp.hash && !is_zero {
        match sp.conv {
            b'x' => prefix.push_str("0x"),
            b'X' => prefix.push_str("0X"),
            b'o' if !mag.starts_with('0') => prefix.push('0'),
            _ => {}
        }
    }
    // '0' is ignored for integer conversions when a precision is given
    pad_number(out, sp, &prefix, &mag, sp.prec.is_none())
}

fn emit_float(out: &mut dyn Sink, sp: &Spec, v: f64) -> usize {
    let upper = sp.conv.is_ascii_uppercase();
    let neg = v.is_sign_negative();
    let a = v.abs();
    let body = if !v.is_finite() {
        if a.is_nan() { "nan".to_string() } else { "inf".to_string() }
    } else {
        let p = sp.prec.unwrap_or(6);
        match sp.conv.to_ascii_lowercase() {
            b'f' => fmt_fixed(a, p, sp.hash),
            // %a is rendered through the decimal exponent form
            b'e' | b'a' => fmt_exp(a, p, sp.hash),
            _ => fmt_general(a, p, sp.hash),
        }
    };
    let body = if upper { body.to_uppercase() } else { body };
    let mut prefix = String::new();
    if neg {
        prefix.push('-');
    } else if sp.plus {
        prefix.push('+');
    } else if sp.space {
        prefix.push(' ');
    }
    pad_number(out, sp, &prefix, &body, v.is_finite())
}

fn fmt_fixed(a: f64, p: usize, hash: bool) -> String {
    let mut s = format!("{a:.p$}");
    if hash && p == 0 {
        s.push('.');
    }
    s
}

fn fmt_exp(a: f64, p: usize, hash: bool) -> String {
    let s = format!("{a:.p$e}");
    let epos = s.rfind('e').unwrap();
    let exp: i32 = s[epos + 1..].parse().unwrap();
    let mut mant = s[..epos].to_string();
    if hash && p == 0 {
        mant.push('.');
    }
    format!(
        "{}e{}{:02}",
        mant,
        if exp < 0 { '-' } else { '+' },
        exp.abs()
    )
}

/// C99 `%g`: pick `%e` or `%f` style from the decimal exponent, then drop
/// trailing fractional zeros unless `#` was given.
fn fmt_general(a: f64, p: usize, hash: bool) -> String {
    let p = p.max(1);
    let probe = format!("{a:.prec$e}", prec = p - 1);
    let epos = probe.rfind('e').unwrap();
    let x: i32 = probe[epos + 1..].parse().unwrap();
    if x >= -4 && (x as i64) < p as i64 {
        let prec = (p as i64 - 1 - x as i64).max(0) as usize;
        let s = format!("{a:.prec$}");
        if hash { s } else { strip_frac_zeros(&s) }
    } else {
        let mant = &probe[..epos];
        let mant = if hash {
            mant.to_string()
        } else {
            strip_frac_zeros(mant)
        };
        format!(
            "{}e{}{:02}",
            mant,
            if x < 0 { '-' } else { '+' },
            x.abs()
        )
    }
}

fn strip_frac_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn write_rep(out: &mut dyn Sink, b: u8, n: usize) -> usize {
    let buf = [b; 32];
    let mut left = n;
    let mut total = 0;
    while left > 0 {
        let k = left.min(buf.len());
        total += out.write(&buf[..k]);
        left -= k;
    }
    total
}

/// Apply width padding around `prefix + body`. Zero padding goes between
/// the sign/prefix and the digits; `-` wins over `0`.
fn pad_number(out: &mut dyn Sink, sp: &Spec, prefix: &str, body: &str, zero_ok: bool) -> usize {
    let total = prefix.len() + body.len();
    let mut n = 0;
    if total >= sp.width {
        n += out.write(prefix.as_bytes());
        n += out.write(body.as_bytes());
        return n;
    }
    let fill = sp.width - total;
    if sp.minus {
        n += out.write(prefix.as_bytes());
        n += out.write(body.as_bytes());
        n += write_rep(out, b' ', fill);
    } else if sp.zero && zero_ok {
        n += out.write(prefix.as_bytes());
        n += write_rep(out, b'0', fill);
        n += out.write(body.as_bytes());
    } else {
        n += write_rep(out, b' ', fill);
        n += out.write(prefix.as_bytes());
        n += out.write(body.as_bytes());
    }
    n
}

// ============================================================================
// %M helpers
// ============================================================================

/// `%M` delegate printing a whole slice as a JSON array.
///
/// Consumes an `Ints` or `Floats` argument followed by a `Str` sub-format
/// applied to each element, with `, ` separators.
///
/// ```
/// use jsonwalk::{json_args, json_printf, json_printf_array, FmtArg};
///
/// let mut out = Vec::new();
/// let data: &[i64] = &[1, 2, 3];
/// json_printf(
///     &mut out,
///     "%M",
///     &json_args![FmtArg::Fmt(&json_printf_array), data, "%d"],
/// );
/// assert_eq!(out, b"[1, 2, 3]");
/// ```
pub fn json_printf_array(out: &mut dyn Sink, args: &mut Args) -> usize {
    let mut n = out.write(b"[");
    let elems = args.next().copied();
    let fmt = match args.next() {
        Some(&FmtArg::Str(Some(s))) => s,
        _ => "%d",
    };
    match elems {
        Some(FmtArg::Ints(v)) => {
            for (k, &e) in v.iter().enumerate() {
                if k > 0 {
                    n += out.write(b", ");
                }
                n += json_printf(out, fmt, &[FmtArg::Int(e)]);
            }
        }
        Some(FmtArg::Floats(v)) => {
            for (k, &e) in v.iter().enumerate() {
                if k > 0 {
                    n += out.write(b", ");
                }
                n += json_printf(out, fmt, &[FmtArg::Float(e)]);
            }
        }
        _ => {}
    }
    n + out.write(b"]")
}
