//! APDU response interpretation
//!
//! A response buffer is a possibly empty payload followed by a two-byte
//! status-word trailer. [`Response::interpret`] checks the trailer against the pair
//! the caller expects and, on mismatch, resolves it through the
//! knowledge base in [`status`] to produce a categorized diagnostic.

pub mod status;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::response::status::{StatusWord, common};

/// A response whose trailer matched the expected status word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    payload: Bytes,
    status: StatusWord,
}

impl Response {
    /// Interpret a raw response buffer against an expected trailer
    ///
    /// The buffer must carry at least the two trailer bytes; the payload
    /// may be empty. `expected` must be exactly two bytes; anything else
    /// silently falls back to the canonical success pair `9000`. On a
    /// trailer mismatch this fails with [`Error::KnownStatus`] when the
    /// knowledge base has an exact entry for the trailer, or
    /// [`Error::UnexpectedStatus`] otherwise. Every non-expected trailer
    /// is surfaced as an error, informational entries included.
    pub fn interpret(response: &[u8], expected: &[u8]) -> Result<Self> {
        if response.len() < 2 {
            return Err(Error::ResponseTooShort(response.len()));
        }

        let expected = match *expected {
            [e1, e2] => StatusWord::new(e1, e2),
            _ => {
                warn!(
                    len = expected.len(),
                    "malformed expected trailer, falling back to 9000"
                );
                common::SUCCESS
            }
        };

        let (payload, trailer) = response.split_at(response.len() - 2);
        let status = StatusWord::new(trailer[0], trailer[1]);

        if status == expected {
            return Ok(Self {
                payload: Bytes::copy_from_slice(payload),
                status,
            });
        }

        match status::lookup(status.sw1(), status.sw2()) {
            Some(entry) => Err(Error::KnownStatus {
                status,
                severity: entry.severity,
                description: entry.description,
            }),
            None => {
                debug!(%status, "trailer not in the knowledge base");
                Err(Error::UnexpectedStatus { status })
            }
        }
    }

    /// Interpret a raw response buffer expecting the canonical `9000`
    pub fn interpret_default(response: &[u8]) -> Result<Self> {
        Self::interpret(response, &common::SUCCESS.to_bytes())
    }

    /// Response payload, trailer excluded
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The matched status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// First status byte (SW1)
    pub const fn sw1(&self) -> u8 {
        self.status.sw1()
    }

    /// Second status byte (SW2)
    pub const fn sw2(&self) -> u8 {
        self.status.sw2()
    }
}
