//! Path-addressed in-place edits: replace, insert, or delete the value at a
//! path while copying the surrounding text verbatim.

use crate::error::JsonError;
use crate::printf::{Args, FmtArg, json_printf, json_vprintf};
use crate::sink::Sink;
use crate::token::{Token, TokenType};
use crate::walker::{is_space, json_walk};

/// Offsets gathered in a single walk over the source.
struct SetfState {
    /// Longest component-aligned prefix of the target path seen so far.
    matched: usize,
    /// Splice range: the value on exact match, or the insertion point (the
    /// deepest enclosing container's closing bracket) otherwise.
    pos: usize,
    end: usize,
    have_pos: bool,
    exact: bool,
    /// End offset of the token preceding the splice; deletion cuts here so
    /// the separating comma goes with the value.
    prev: usize,
    /// Set once the target value itself opens, so tokens inside a matched
    /// container stop advancing `prev`.
    value_open: bool,
}

/// `p` covers whole components of `target` (so `.ab` is not a prefix of
/// `.abc`, but `.a` is a prefix of `.a.b` and `.a[0]`).
fn component_prefix(target: &str, p: &str) -> bool {
    target.starts_with(p)
        && (target.len() == p.len() || matches!(target.as_bytes()[p.len()], b'.' | b'['))
}

/// String tokens exclude their quotes; splicing needs them included.
fn quote_pad(t: &Token) -> usize {
    usize::from(t.ty == TokenType::Str)
}

fn setf_cb(st: &mut SetfState, target: &str, p: &str, t: &Token) {
    if t.ty.is_start() {
        if p == target {
            st.value_open = true;
        }
        return;
    }
    let off = t.off;
    if component_prefix(target, p) && p.len() > st.matched {
        st.matched = p.len();
    }
    if p == target {
        st.pos = off - quote_pad(t);
        st.end = t.end() + quote_pad(t);
        st.have_pos = true;
        st.exact = true;
    }
    if !st.have_pos && t.ty.is_end() && p.len() < target.len() && component_prefix(target, p) {
        // The deepest existing container on the target path is closing with
        // no exact match: insert just before its closing bracket.
        let close = t.end() - 1;
        st.pos = close;
        st.end = close;
        st.have_pos = true;
        return;
    }
    if !st.have_pos && !st.value_open {
        st.prev = t.end() + quote_pad(t);
    } else if t.ty.is_end() && off + 1 <= st.pos && off + 1 > st.prev {
        // The target was the first value in this container; the cut point
        // moves to just after the opening bracket.
        st.prev = off + 1;
    }
}

enum Seg<'p> {
    Key(&'p str),
    Idx,
}

fn parse_segments(rest: &str) -> Vec<Seg<'_>> {
    let b = rest.as_bytes();
    let mut i = 0;
    let mut segs = Vec::new();
    while i < b.len() {
        match b[i] {
            b'.' => {
                i += 1;
                let start = i;
                while i < b.len() && !matches!(b[i], b'.' | b'[') {
                    i += 1;
                }
                segs.push(Seg::Key(&rest[start..i]));
            }
            b'[' => {
                i += 1;
                while i < b.len() && b[i] != b']' {
                    i += 1;
                }
                if i < b.len() {
                    i += 1;
                }
                segs.push(Seg::Idx);
            }
            _ => break,
        }
    }
    segs
}

/// Rewrite `src` into `out` with the value at `path` changed.
///
/// `value` of `Some((fmt, args))` replaces the value (or inserts it, along
/// with any missing intermediate objects/arrays, when the path descends
/// below the existing structure); `None` deletes it, comma included.
/// Returns whether a value was located or an insertion point found; on
/// `Ok(false)` and on deletion misses the source is emitted unchanged.
///
/// # Examples
///
/// ```
/// use jsonwalk::{json_args, json_setf};
///
/// let mut out = Vec::new();
/// assert!(json_setf(r#"{"a":1}"#, &mut out, ".b", Some(("%d", &json_args![2]))).unwrap());
/// assert_eq!(out, br#"{"a":1,"b":2}"#);
///
/// let mut out = Vec::new();
/// assert!(json_setf(r#"{"a":1,"b":2}"#, &mut out, ".a", None).unwrap());
/// assert_eq!(out, br#"{"b":2}"#);
/// ```
pub fn json_setf(
    src: &str,
    out: &mut dyn Sink,
    path: &str,
    value: Option<(&str, &[FmtArg])>,
) -> Result<bool, JsonError> {
    let mut st = SetfState {
        matched: 0,
        pos: 0,
        end: src.len(),
        have_pos: false,
        exact: false,
        prev: 0,
        value_open: false,
    };
    json_walk(src, |_, p, t| setf_cb(&mut st, path, p, t))?;
    let b = src.as_bytes();

    let Some((fmt, args)) = value else {
        // Deletion
        if !st.exact {
            out.write(b);
            return Ok(false);
        }
        out.write(&b[..st.prev]);
        let mut end = st.end;
        if st.prev > 0 && matches!(b[st.prev - 1], b'{' | b'[') {
            // First element went away; the comma that separated it from the
            // next one goes too.
            let mut i = end;
            while i < b.len() && is_space(b[i]) {
                i += 1;
            }
            if i < b.len() && b[i] == b',' {
                end = i + 1;
            }
        }
        out.write(&b[end..]);
        return Ok(true);
    };

    if !st.have_pos {
        out.write(b);
        return Ok(false);
    }
    out.write(&b[..st.pos]);
    let segs = parse_segments(&path[st.matched..]);
    if !segs.is_empty() && !st.exact {
        // Separator before the first synthesised component, unless the
        // container we are splicing into is empty.
        let mut j = st.pos;
        while j > 0 && is_space(b[j - 1]) {
            j -= 1;
        }
        if j > 0 && !matches!(b[j - 1], b'{' | b'[') {
            out.write(b",");
        }
    }
    let mut closers = Vec::new();
    for (k, seg) in segs.iter().enumerate() {
        if let Seg::Key(name) = *seg {
            json_printf(out, "%Q:", &[FmtArg::Str(Some(name))]);
        }
        if k + 1 < segs.len() {
            match segs[k + 1] {
                Seg::Key(_) => {
                    out.write(b"{");
                    closers.push(b'}');
                }
                Seg::Idx => {
                    out.write(b"[");
                    closers.push(b']');
                }
            }
        }
    }
    let mut cursor = Args::new(args);
    json_vprintf(out, fmt, &mut cursor);
    while let Some(c) = closers.pop() {
        out.write(&[c]);
    }
    out.write(&b[st.end..]);
    Ok(true)
}
