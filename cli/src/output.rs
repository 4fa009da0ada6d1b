//! # Writing the Result
//!
//! The key file goes to stdout or to `--output`. When the user can't see the
//! key file (it went to a file, or stdout is piped somewhere), the public key
//! is also echoed to stderr so they learn their recipient without opening
//! the secret.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use passgen_core::EncodedIdentity;

/// Whether the public key should be echoed to stderr.
pub fn should_echo_public_key(to_file: bool, stdout_is_terminal: bool) -> bool {
    to_file || !stdout_is_terminal
}

/// Echo the recipient: `Public key: age1...` with a newline, or the bare
/// recipient in raw mode.
pub fn echo_public_key<W: Write>(out: &mut W, encoded: &EncodedIdentity) -> io::Result<()> {
    if encoded.is_verbose() {
        writeln!(out, "Public key: {}", encoded.recipient())?;
    } else {
        write!(out, "{}", encoded.recipient())?;
    }
    out.flush()
}

/// Create (or truncate) the key file. Owner-only permissions on Unix.
pub fn create_key_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Write `encoded` to its destination, echoing the public key if needed.
///
/// The output file is created before anything is printed, so a bad path
/// fails without emitting a half result.
pub fn emit(encoded: &EncodedIdentity, output: Option<&Path>) -> Result<()> {
    let mut file = output
        .map(|path| {
            create_key_file(path)
                .with_context(|| format!("failed to create output file {}", path.display()))
        })
        .transpose()?;

    if should_echo_public_key(file.is_some(), io::stdout().is_terminal()) {
        echo_public_key(&mut io::stderr().lock(), encoded)
            .context("failed to write public key to stderr")?;
    }

    match output.zip(file.as_mut()) {
        Some((path, file)) => {
            encoded
                .write_to(file)
                .with_context(|| format!("failed to write secret key to {}", path.display()))?;
            tracing::info!(path = %path.display(), "key file written");
        }
        None => {
            encoded
                .write_to(&mut io::stdout().lock())
                .map_err(explain_stdout_error)
                .context("failed to write secret key to stdout")?;
        }
    }
    Ok(())
}

/// Rust ignores SIGPIPE, so a closed reader shows up here as `BrokenPipe`.
fn explain_stdout_error(err: io::Error) -> anyhow::Error {
    if err.kind() == io::ErrorKind::BrokenPipe {
        anyhow::Error::new(err).context(
            "the program reading our output exited early; check both ends of the pipe",
        )
    } else {
        err.into()
    }
}
