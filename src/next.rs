//! Child-at-a-time enumeration of an object or array, plus `Iterator`
//! adapters over it.
//!
//! Each step walks the document again and picks the first direct child of
//! the container at `path` whose token starts past the opaque `handle`
//! (the previous child's start offset). O(n²) over the whole document, but
//! it needs no allocation and no retained state between calls.

use crate::token::{Name, Token};
use crate::walker::json_walk;

struct NextEntry<'j> {
    handle: usize,
    key: Option<&'j str>,
    idx: Option<usize>,
    val: Token<'j>,
}

fn json_next<'j>(src: &'j str, handle: Option<usize>, base: &str) -> Option<NextEntry<'j>> {
    let mut found: Option<NextEntry<'j>> = None;
    let mut pending_key: Option<&'j str> = None;
    let mut pending_idx: Option<usize> = None;
    let _ = json_walk(src, |name, p, t| {
        if found.is_some() {
            return;
        }
        if p.len() <= base.len() || !p.starts_with(base) {
            return;
        }
        let rem = &p.as_bytes()[base.len()..];
        if rem[1..].iter().any(|&b| b == b'.' || b == b'[') {
            // Deeper than a direct child.
            return;
        }
        if t.ty.is_start() {
            // Container child: remember under which name it opened; its end
            // event carries no name.
            match name {
                Name::Key(k) => {
                    pending_key = Some(k);
                    pending_idx = None;
                }
                Name::Index(i) => {
                    pending_idx = Some(i);
                    pending_key = None;
                }
                Name::None => {}
            }
        } else if handle.is_none_or(|h| h < t.off) {
            let (key, idx) = if t.ty.is_end() {
                (pending_key, pending_idx)
            } else {
                match name {
                    Name::Key(k) => (Some(k), None),
                    Name::Index(i) => (None, Some(i)),
                    Name::None => (None, None),
                }
            };
            found = Some(NextEntry {
                handle: t.off,
                key,
                idx,
                val: *t,
            });
        }
    });
    found
}

/// Next key/value member of the object at `path`, after `handle` (`None`
/// starts from the beginning). Returns the new handle, the raw key, and the
/// value token.
///
/// # Examples
///
/// ```
/// use jsonwalk::json_next_key;
///
/// let doc = r#"{"a":1,"b":[2]}"#;
/// let (h, key, val) = json_next_key(doc, None, "").unwrap();
/// assert_eq!((key, val.text), ("a", "1"));
/// let (_, key, val) = json_next_key(doc, Some(h), "").unwrap();
/// assert_eq!((key, val.text), ("b", "[2]"));
/// ```
pub fn json_next_key<'j>(
    src: &'j str,
    handle: Option<usize>,
    path: &str,
) -> Option<(usize, &'j str, Token<'j>)> {
    let entry = json_next(src, handle, path)?;
    entry.key.map(|k| (entry.handle, k, entry.val))
}

/// Next element of the array at `path`, after `handle`. Returns the new
/// handle, the element index, and the value token.
pub fn json_next_elem<'j>(
    src: &'j str,
    handle: Option<usize>,
    path: &str,
) -> Option<(usize, usize, Token<'j>)> {
    let entry = json_next(src, handle, path)?;
    entry.idx.map(|i| (entry.handle, i, entry.val))
}

/// Iterator over the members of the object at `path`.
pub struct Keys<'j, 'p> {
    src: &'j str,
    path: &'p str,
    handle: Option<usize>,
}

impl<'j> Iterator for Keys<'j, '_> {
    type Item = (&'j str, Token<'j>);

    fn next(&mut self) -> Option<Self::Item> {
        let (h, key, val) = json_next_key(self.src, self.handle, self.path)?;
        self.handle = Some(h);
        Some((key, val))
    }
}

/// Iterate the members of the object at `path`.
///
/// ```
/// use jsonwalk::keys;
///
/// let names: Vec<_> = keys(r#"{"x":1,"y":2}"#, "").map(|(k, _)| k).collect();
/// assert_eq!(names, ["x", "y"]);
/// ```
pub fn keys<'j, 'p>(src: &'j str, path: &'p str) -> Keys<'j, 'p> {
    Keys {
        src,
        path,
        handle: None,
    }
}

/// Iterator over the elements of the array at `path`.
pub struct Elems<'j, 'p> {
    src: &'j str,
    path: &'p str,
    handle: Option<usize>,
}

impl<'j> Iterator for Elems<'j, '_> {
    type Item = (usize, Token<'j>);

    fn next(&mut self) -> Option<Self::Item> {
        let (h, idx, val) = json_next_elem(self.src, self.handle, self.path)?;
        self.handle = Some(h);
        Some((idx, val))
    }
}

/// Iterate the elements of the array at `path`.
pub fn elems<'j, 'p>(src: &'j str, path: &'p str) -> Elems<'j, 'p> {
    Elems {
        src,
        path,
        handle: None,
    }
}
