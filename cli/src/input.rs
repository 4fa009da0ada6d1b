//! # Reading the Secret
//!
//! Where the input bytes come from:
//!
//! - `--input FILE`: the whole file.
//! - stdin is a terminal: a hidden prompt (`rpassword`), newline excluded.
//! - otherwise: stdin until EOF, verbatim.
//!
//! Every buffer holding input lives in a [`Zeroizing`] wrapper and is wiped
//! when dropped.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use zeroize::Zeroizing;

/// Prompt shown on the terminal. Goes to the TTY, never to stdout.
const PROMPT: &str = "Enter passphrase: ";

/// Initial buffer size for stdin. Passphrases, hex digests and raw keys all
/// fit. Longer piped input makes the `Vec` grow, and the allocation it
/// leaves behind is freed without being wiped.
const INITIAL_CAPACITY: usize = 4096;

/// Where the secret came from, for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    File,
    Terminal,
    Stdin,
}

/// Read the input material and optionally strip one trailing newline.
pub fn read_material(path: Option<&Path>, trim_newline: bool) -> Result<Zeroizing<Vec<u8>>> {
    let (source, mut material) = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            let capacity = capacity_for(file.metadata().ok().map(|m| m.len()));
            let material = read_to_end(file, capacity)
                .with_context(|| format!("failed to read input file {}", path.display()))?;
            (Source::File, material)
        }
        None if io::stdin().is_terminal() => (Source::Terminal, prompt_terminal()?),
        None => (
            Source::Stdin,
            read_to_end(io::stdin().lock(), INITIAL_CAPACITY)
                .context("failed to read stdin")?,
        ),
    };

    let trimmed = trim_newline && strip_trailing_newline(&mut material);
    tracing::info!(?source, length = material.len(), trimmed, "input read");
    Ok(material)
}

fn prompt_terminal() -> Result<Zeroizing<Vec<u8>>> {
    let passphrase = rpassword::prompt_password(PROMPT).context("failed to read passphrase")?;
    Ok(Zeroizing::new(passphrase.into_bytes()))
}

/// Buffer size for a file of `len` bytes: room for the whole file plus the
/// byte `read_to_end` needs to see EOF, so the buffer never grows.
pub fn capacity_for(len: Option<u64>) -> usize {
    len.and_then(|len| usize::try_from(len).ok())
        .map_or(INITIAL_CAPACITY, |len| len.saturating_add(1).max(INITIAL_CAPACITY))
}

/// Drain `reader` into a zeroizing buffer of the given initial capacity.
pub fn read_to_end<R: Read>(mut reader: R, capacity: usize) -> io::Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(Vec::with_capacity(capacity));
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Remove one trailing `\r\n` or `\n`. Returns whether anything was removed.
pub fn strip_trailing_newline(buf: &mut Vec<u8>) -> bool {
    let cut = if buf.ends_with(b"\r\n") {
        2
    } else if buf.ends_with(b"\n") {
        1
    } else {
        return false;
    };
    buf.truncate(buf.len() - cut);
    true
}
