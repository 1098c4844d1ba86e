/// Kind of a JSON lexeme or container delimiter surfaced by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    Str,
    Num,
    True,
    False,
    Null,
}

impl TokenType {
    /// True for `ObjectStart` and `ArrayStart`.
    #[inline]
    pub fn is_start(self) -> bool {
        matches!(self, TokenType::ObjectStart | TokenType::ArrayStart)
    }

    /// True for `ObjectEnd` and `ArrayEnd`.
    #[inline]
    pub fn is_end(self) -> bool {
        matches!(self, TokenType::ObjectEnd | TokenType::ArrayEnd)
    }
}

/// A typed span of the walked source.
///
/// `text` is a zero-copy slice into the original input and `off` is its byte
/// offset there. For `Str` the slice excludes the surrounding quotes; for
/// start tokens it is empty and positioned at the opening bracket; for end
/// tokens it spans the whole container, brackets included.
///
/// Tokens borrow the input for the duration of the walk; copy what you need
/// if it must outlive the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'j> {
    pub ty: TokenType,
    pub off: usize,
    pub text: &'j str,
}

impl<'j> Token<'j> {
    /// Byte offset one past the end of the token slice.
    #[inline]
    pub fn end(&self) -> usize {
        self.off + self.text.len()
    }
}

/// The name under which a walked value appears in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Name<'j> {
    /// Root value, or a container-end event.
    None,
    /// Object member: the raw key bytes, quotes stripped, escapes untouched.
    Key(&'j str),
    /// Array element index.
    Index(usize),
}
