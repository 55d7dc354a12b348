//! APDU frame parsing and status word interpretation
//!
//! This crate provides the in-memory representation, validation and
//! classification of single APDU (Application Protocol Data Unit) frames
//! according to ISO/IEC 7816-4:
//!
//! - [`Apdu`] parses a raw command frame, given as a byte sequence or a
//!   space-delimited hex string, into validated fields, reporting the
//!   exact positions of malformed bytes
//! - [`Response`] interprets a response buffer against an expected
//!   status word, resolving unexpected trailers through a built-in
//!   knowledge base into categorized diagnostics
//!
//! Both components are pure synchronous functions over immutable inputs:
//! no I/O, no shared mutable state, safe to call concurrently without
//! coordination. Transports, secure messaging and command chaining are
//! out of scope; callers feed raw bytes in and get structured values or
//! errors back.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

// Main modules
pub mod command;
pub mod error;
pub mod input;
pub mod response;

pub use command::Apdu;
pub use error::{Error, Result};
pub use input::FrameInput;
pub use response::Response;
pub use response::status::{Severity, StatusWord, StatusWordEntry};

/// Prelude module containing commonly used types
pub mod prelude {
    // Core types
    pub use crate::{Bytes, BytesMut, Error, Result};

    // Command frame
    pub use crate::command::Apdu;
    pub use crate::input::FrameInput;

    // Response interpretation
    pub use crate::response::Response;
    pub use crate::response::status::{Severity, StatusWord, common as status};
}
