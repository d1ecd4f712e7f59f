use crate::signing::errors::VerifyError;
use hex::FromHex;
use std::fmt;

/// Length of a SHA-1 digest in bytes.
pub const SHA1_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// SHA-1 certificate fingerprint held in canonical 20-byte form.
///
/// Both textual forms in the wild (colon-delimited uppercase pairs like
/// `AB:01:..` and unseparated lowercase like `ab01..`) normalize to the same
/// value here, so comparison is never performed on raw text.
pub struct Fingerprint([u8; SHA1_LEN]);

impl Fingerprint {
    /// Parses either textual form, any case. Rejects anything that is not
    /// exactly 40 hex characters after stripping colon separators.
    pub fn parse(raw: &str) -> Result<Self, VerifyError> {
        let stripped = raw.trim().replace(':', "");
        let bytes = Vec::from_hex(&stripped)
            .map_err(|_| VerifyError::MalformedFingerprint(raw.trim().to_string()))?;
        let digest: [u8; SHA1_LEN] = bytes
            .try_into()
            .map_err(|_| VerifyError::MalformedFingerprint(raw.trim().to_string()))?;
        Ok(Self(digest))
    }

    /// Canonical form: lowercase hex, no separators.
    pub fn canonical(&self) -> String {
        hex::encode(self.0)
    }

    /// Display form expected by the backend console: uppercase pairs joined
    /// with `:`.
    pub fn console_form(&self) -> String {
        let mut out = String::with_capacity(self.0.len() * 3);
        for (idx, byte) in self.0.iter().enumerate() {
            if idx > 0 {
                out.push(':');
            }
            out.push_str(&format!("{:02X}", byte));
        }
        out
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
