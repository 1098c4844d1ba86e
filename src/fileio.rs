//! Whole-file convenience helpers over the printer and prettifier.

use std::fs;
use std::path::Path;

use crate::error::FileError;
use crate::prettify::json_prettify;
use crate::printf::{FmtArg, json_printf};
use crate::sink::{IoSink, Sink};

/// Slurp a file into a `String`.
pub fn json_fread(path: impl AsRef<Path>) -> Result<String, FileError> {
    Ok(fs::read_to_string(path)?)
}

/// Format JSON straight into a file, with a trailing newline. Returns the
/// logical byte count from the printer (the newline not included).
///
/// ```no_run
/// use jsonwalk::{json_args, json_fprintf};
///
/// json_fprintf("settings.json", "{greeting:%Q}", &json_args!["hello"])?;
/// # Ok::<(), jsonwalk::FileError>(())
/// ```
pub fn json_fprintf(
    path: impl AsRef<Path>,
    fmt: &str,
    args: &[FmtArg],
) -> Result<usize, FileError> {
    let file = fs::File::create(path)?;
    let mut sink = IoSink::new(file);
    let n = json_printf(&mut sink, fmt, args);
    sink.write(b"\n");
    sink.finish()?;
    Ok(n)
}

/// Prettify a JSON file in place, appending a trailing newline.
///
/// The output is buffered before anything is written back, so a file that
/// fails to parse is left exactly as it was.
pub fn json_prettify_file(path: impl AsRef<Path>) -> Result<usize, FileError> {
    let src = fs::read_to_string(&path)?;
    let mut buf = Vec::with_capacity(src.len() * 2);
    let n = json_prettify(&src, &mut buf)?;
    buf.push(b'\n');
    fs::write(&path, &buf)?;
    Ok(n)
}
