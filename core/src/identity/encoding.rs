//! # Identity Encoding
//!
//! Renders an [`Identity`] in age's textual format and reads it back.
//!
//! ```text
//! public point (32 bytes) -> Bech32("age", ...)              -> age1...
//! secret scalar (32 bytes) -> Bech32("age-secret-key-", ...) -> AGE-SECRET-KEY-1...
//! ```
//!
//! Both use the original BIP-173 Bech32 checksum (not Bech32m), because
//! that's what age uses, and outputs have to decrypt with stock `age`.
//! The secret string is upper-cased as a whole so it can't be mistaken for
//! a recipient.
//!
//! A verbose key file looks exactly like one written by `age-keygen`:
//!
//! ```text
//! # created: 2026-10-18T10:34:12+02:00
//! # public key: age1...
//! AGE-SECRET-KEY-1...
//! ```

use std::fmt;
use std::io::{self, Write};

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{
    CREATED_COMMENT, IDENTITY_HRP, PUBLIC_KEY_COMMENT, PUBLIC_KEY_LENGTH, RECIPIENT_HRP,
    SCALAR_LENGTH,
};
use crate::crypto::keys::Scalar;
use crate::identity::x25519::Identity;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing recipient or identity strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The string is not valid Bech32 (bad characters, mixed case, bad
    /// checksum, ...).
    #[error("bech32 decode error: {0}")]
    Bech32Decode(String),

    /// Valid Bech32, but the prefix belongs to something else.
    #[error("invalid HRP: expected '{expected}', got '{got}'")]
    InvalidHrp {
        /// The expected HRP.
        expected: String,
        /// The HRP that was actually found.
        got: String,
    },

    /// Valid Bech32 with the right prefix, wrong payload size.
    #[error("invalid key data length: expected {expected} bytes, got {got}")]
    InvalidDataLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// Bech32
// ---------------------------------------------------------------------------

/// Encode a public point as an `age1...` recipient.
pub fn encode_recipient(public: &[u8; PUBLIC_KEY_LENGTH]) -> String {
    let hrp = Hrp::parse(RECIPIENT_HRP).expect("static HRP is valid");
    bech32::encode_lower::<Bech32>(hrp, public)
        .expect("encoding a 32-byte payload should never fail")
}

/// Encode a secret scalar as an `AGE-SECRET-KEY-1...` string.
///
/// Returned in a [`Zeroizing`] wrapper so the text is wiped when dropped.
pub fn encode_secret(secret: &Scalar) -> Zeroizing<String> {
    let hrp = Hrp::parse(IDENTITY_HRP).expect("static HRP is valid");
    Zeroizing::new(
        bech32::encode_upper::<Bech32>(hrp, secret.as_bytes())
            .expect("encoding a 32-byte payload should never fail"),
    )
}

/// Decode `s`, insisting on a Bech32 checksum, `expected_hrp` (compared
/// case-insensitively) and a 32-byte payload.
///
/// `bech32::decode` would also take Bech32m, which age rejects.
fn decode_key(s: &str, expected_hrp: &str) -> Result<Zeroizing<Vec<u8>>, EncodingError> {
    let checked = CheckedHrpstring::new::<Bech32>(s.trim())
        .map_err(|e| EncodingError::Bech32Decode(e.to_string()))?;
    let hrp = checked.hrp();
    let data = Zeroizing::new(checked.byte_iter().collect::<Vec<u8>>());

    let got = hrp.to_string();
    if !got.eq_ignore_ascii_case(expected_hrp) {
        return Err(EncodingError::InvalidHrp {
            expected: expected_hrp.to_string(),
            got,
        });
    }

    if data.len() != SCALAR_LENGTH {
        return Err(EncodingError::InvalidDataLength {
            expected: SCALAR_LENGTH,
            got: data.len(),
        });
    }

    Ok(data)
}

/// Parse an `age1...` recipient back into its public point.
pub fn parse_recipient(s: &str) -> Result<[u8; PUBLIC_KEY_LENGTH], EncodingError> {
    let data = decode_key(s, RECIPIENT_HRP)?;
    let mut public = [0u8; PUBLIC_KEY_LENGTH];
    public.copy_from_slice(&data);
    Ok(public)
}

/// Parse an `AGE-SECRET-KEY-1...` string and re-derive its public point.
pub fn parse_identity(s: &str) -> Result<Identity, EncodingError> {
    let data = decode_key(s, IDENTITY_HRP)?;
    let secret = Scalar::try_from_slice(&data).map_err(|e| EncodingError::InvalidDataLength {
        expected: e.expected,
        got: e.got,
    })?;
    Ok(Identity::from_scalar(secret))
}

// ---------------------------------------------------------------------------
// EncodedIdentity
// ---------------------------------------------------------------------------

/// Rendering options for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Emit the `# created:` and `# public key:` comment lines, and end every
    /// line with a newline. When `false`, only the bare secret key is
    /// rendered, without a trailing newline, for piping into other tools.
    pub verbose: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { verbose: true }
    }
}

/// The text form of an [`Identity`], ready to be written somewhere.
///
/// `Display` renders the full key file (or the bare secret in raw mode).
/// The secret key string is wiped when this value is dropped.
pub struct EncodedIdentity {
    created: Option<String>,
    recipient: String,
    secret: Zeroizing<String>,
}

impl EncodedIdentity {
    /// The RFC 3339 creation timestamp. `None` in raw mode.
    pub fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }

    /// The `age1...` recipient.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// The `AGE-SECRET-KEY-1...` string.
    pub fn secret_key(&self) -> &str {
        &self.secret
    }

    /// Whether the comment lines are rendered.
    pub fn is_verbose(&self) -> bool {
        self.created.is_some()
    }

    /// Write the rendering to `out` and flush it.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)?;
        out.flush()
    }
}

impl fmt::Display for EncodedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.created {
            Some(created) => {
                writeln!(f, "{}{}", CREATED_COMMENT, created)?;
                writeln!(f, "{}{}", PUBLIC_KEY_COMMENT, self.recipient)?;
                writeln!(f, "{}", self.secret.as_str())
            }
            None => f.write_str(&self.secret),
        }
    }
}

impl fmt::Debug for EncodedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedIdentity")
            .field("created", &self.created)
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}

/// Render `identity`, stamping verbose output with the current local time.
///
/// The timestamp is the only non-deterministic part of the output, and it is
/// a comment: the key material is unaffected.
pub fn encode(identity: &Identity, opts: EncodeOptions) -> EncodedIdentity {
    encode_at(identity, opts, Local::now().into())
}

/// Render `identity` with a caller-supplied creation time.
pub fn encode_at(
    identity: &Identity,
    opts: EncodeOptions,
    created: DateTime<FixedOffset>,
) -> EncodedIdentity {
    EncodedIdentity {
        created: opts
            .verbose
            .then(|| created.to_rfc3339_opts(SecondsFormat::Secs, true)),
        recipient: identity.recipient(),
        secret: identity.to_secret_string(),
    }
}
