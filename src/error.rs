//! Error types for frame parsing and response interpretation
//!
//! A single crate-wide [`Error`] enum covers both components. Every failure
//! is deterministic given the same input; nothing here is transient or
//! retryable, so errors carry the full diagnosis for the caller to act on.

use thiserror::Error;

use crate::response::status::{Severity, StatusWord};

/// Result type for frame parsing and response interpretation
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for frame parsing and response interpretation
#[derive(Debug, Error)]
pub enum Error {
    /// One or more input tokens are not valid 0-255 byte values
    ///
    /// `rendered` holds the entire original sequence as two-hex-digit
    /// tokens with every offending token wrapped in brackets, e.g.
    /// `00 A4 [zz] 00`.
    #[error("{} invalid byte(s) at indices {indices:?}: {rendered}", .indices.len())]
    InvalidBytes {
        /// Zero-based positions of the offending tokens
        indices: Vec<usize>,
        /// Bracket-highlighted rendering of the full input
        rendered: String,
    },

    /// Frame shorter than the four mandatory header bytes
    #[error("insufficient bytes, need at least CLA/INS/P1/P2 (got {0})")]
    FrameTooShort(usize),

    /// Length fields do not cut the frame into valid regions
    #[error("invalid frame length: {0}")]
    InvalidFrameLength(&'static str),

    /// Response shorter than the two-byte status-word trailer
    #[error("insufficient byte length: response needs at least a status word (got {0})")]
    ResponseTooShort(usize),

    /// Trailer did not match the expected pair and has no knowledge-base entry
    #[error("unexpected response status: sw1=0x{:02X} sw2=0x{:02X}", .status.sw1(), .status.sw2())]
    UnexpectedStatus {
        /// The unrecognised trailer
        status: StatusWord,
    },

    /// Trailer resolved to a known non-success entry in the knowledge base
    ///
    /// Raised for every non-expected trailer with an entry, `Info`-tagged
    /// entries included: any trailer other than the expected pair is an
    /// anomaly under the caller contract.
    #[error("{}{description}", .severity.prefix())]
    KnownStatus {
        /// The matched trailer
        status: StatusWord,
        /// Severity category from the knowledge base
        severity: Severity,
        /// Human-readable description from the knowledge base
        description: &'static str,
    },
}
