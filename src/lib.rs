//! Embeddable JSON toolkit built around a single streaming parser.
//!
//! Four tightly coupled capabilities share one recursive-descent walker:
//!
//! - [`json_walk`] fires a callback with a typed token and its
//!   `.dotted[3]` path for every lexeme of a JSON text, zero-copy;
//! - [`json_printf`] composes JSON from a printf-like format string and a
//!   tagged argument list, with JSON-specific conversions (`%Q` quoted
//!   string, `%H` hex, `%V` base64, `%B` boolean, `%M` delegate);
//! - [`json_scanf`] runs the same format language in reverse, extracting
//!   values by path into typed targets;
//! - [`json_setf`] rewrites a document in place, replacing, inserting (with
//!   any missing intermediate containers), or deleting the value at a path
//!   while copying all surrounding text verbatim.
//!
//! Around those sit [`json_prettify`], the [`json_next_key`] /
//! [`json_next_elem`] child iterators, string escaping, and file helpers.
//! Output goes through the byte-oriented [`Sink`] capability; the bounded
//! [`SliceSink`] reports the length it *would* have written, so buffer
//! sizes can be discovered with a dry run.
//!
//! ```
//! use jsonwalk::{json_args, json_printf, json_scanf, ScanTarget};
//!
//! let mut doc = Vec::new();
//! json_printf(&mut doc, "{name:%Q, visits:%d}", &json_args!["ada", 7]);
//! assert_eq!(doc, br#"{"name":"ada", "visits":7}"#);
//!
//! let mut visits = 0i64;
//! let doc = String::from_utf8(doc).unwrap();
//! json_scanf(&doc, "{visits:%d}", &mut [ScanTarget::Int(&mut visits)]);
//! assert_eq!(visits, 7);
//! ```
//!
//! The full document must be in memory; input is borrowed for the duration
//! of a call and tokens borrow from it. The walker copies no value bytes;
//! its only working storage is the bounded path buffer.

mod codec;
mod error;
mod escape;
mod fileio;
mod next;
mod prettify;
mod printf;
mod scanf;
mod setf;
mod sink;
mod token;
mod walker;

pub use error::{FileError, JsonError};
pub use escape::{json_escape, json_unescape};
pub use fileio::{json_fprintf, json_fread, json_prettify_file};
pub use next::{Elems, Keys, elems, json_next_elem, json_next_key, keys};
pub use prettify::json_prettify;
pub use printf::{Args, FmtArg, PrintfFn, json_printf, json_printf_array, json_vprintf};
pub use scanf::{ScanTarget, json_scanf, json_scanf_array_elem};
pub use setf::json_setf;
pub use sink::{IoSink, Sink, SliceSink};
pub use token::{Name, Token, TokenType};
pub use walker::{MAX_PATH_LEN, json_walk};

#[cfg(test)]
mod tests;
