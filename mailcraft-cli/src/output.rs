//! Delivery of rendered markup.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

/// Where rendered markup is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Write to a file, replacing it if present.
    File(PathBuf),
    /// Write to standard output.
    Stdout,
    /// Place on the system clipboard.
    Clipboard,
}

/// Outcome of a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    /// Markup was written to a file.
    File {
        /// Target path.
        path: PathBuf,
        /// Bytes written.
        bytes: usize,
    },
    /// Markup was written to standard output.
    Stdout,
    /// Markup is on the clipboard.
    Clipboard,
    /// The clipboard could not be written; nothing else changed.
    ClipboardUnavailable(String),
}

/// Send `markup` to `destination`.
///
/// A clipboard failure is not an error: it is returned as
/// [`Delivered::ClipboardUnavailable`] so the caller can report it once.
///
/// # Errors
///
/// Returns an error if a file or stdout write fails.
pub fn deliver(
    markup: &str,
    destination: &Destination,
    stdout: &mut impl Write,
) -> anyhow::Result<Delivered> {
    match destination {
        Destination::File(path) => {
            std::fs::write(path, markup)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(Delivered::File {
                path: path.clone(),
                bytes: markup.len(),
            })
        }
        Destination::Stdout => {
            stdout.write_all(markup.as_bytes())?;
            if !markup.ends_with('\n') {
                writeln!(stdout)?;
            }
            stdout.flush()?;
            Ok(Delivered::Stdout)
        }
        Destination::Clipboard => Ok(copy_to_clipboard(markup)),
    }
}

fn copy_to_clipboard(markup: &str) -> Delivered {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(markup)) {
        Ok(()) => {
            tracing::debug!("Copied {} bytes to clipboard", markup.len());
            Delivered::Clipboard
        }
        Err(e) => {
            tracing::warn!("Clipboard write failed: {e}");
            Delivered::ClipboardUnavailable(e.to_string())
        }
    }
}
