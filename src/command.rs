//! APDU command frame parsing and field access
//!
//! This module provides the [`Apdu`] value type: a validated,
//! field-decomposed command frame according to ISO/IEC 7816-4, built only
//! through the fallible [`Apdu::parse`] constructor.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::error::{Error, Result};
use crate::input::FrameInput;

/// A validated command APDU
///
/// Immutable once constructed; [`Apdu::parse`] is the only way to obtain
/// one, so an `Apdu` in hand always satisfies the frame invariants: the
/// length field is 0, 1 or 3 bytes, its big-endian value equals
/// `data().len()`, and the expected-length field is 0, 1 or 3 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apdu {
    cla: u8,
    ins: u8,
    p1: u8,
    p2: u8,
    lc: Bytes,
    data: Bytes,
    le: Bytes,
}

impl Apdu {
    /// Parse and validate a raw command frame
    ///
    /// Accepts anything convertible to [`FrameInput`]: a byte slice, a
    /// sequence of integer words, or a hex string like `"00 A4 04 00 05"`.
    /// `extended` selects 3-byte length-field encoding; the caller must
    /// supply it from protocol context, the frame does not self-describe it.
    ///
    /// Byte validation and structural validation are two independent
    /// passes: a frame with malformed tokens fails with
    /// [`Error::InvalidBytes`] before any field is examined, while a frame
    /// of well-formed bytes that cannot be cut into fields fails with
    /// [`Error::FrameTooShort`] or [`Error::InvalidFrameLength`].
    pub fn parse(input: impl Into<FrameInput>, extended: bool) -> Result<Self> {
        let bytes = input.into().normalize()?;

        if bytes.len() < 4 {
            return Err(Error::FrameTooShort(bytes.len()));
        }

        let (cla, ins, p1, p2) = (bytes[0], bytes[1], bytes[2], bytes[3]);

        // An exactly-4-byte frame carries no length field at all
        let lc_len = match (bytes.len(), extended) {
            (4, _) => 0,
            (_, false) => 1,
            (_, true) => 3,
        };
        if bytes.len() < 4 + lc_len {
            return Err(Error::InvalidFrameLength(
                "length field extends past the end of the frame",
            ));
        }
        let lc = &bytes[4..4 + lc_len];

        let data_len = decode_length(lc)?;
        let data_end = 4 + lc_len + data_len;
        if bytes.len() < data_end {
            return Err(Error::InvalidFrameLength(
                "data field extends past the end of the frame",
            ));
        }
        let data = &bytes[4 + lc_len..data_end];

        // Whatever remains is the expected-length field
        let le = &bytes[data_end..];
        if !matches!(le.len(), 0 | 1 | 3) {
            return Err(Error::InvalidFrameLength(
                "expected-length field must be 0, 1 or 3 bytes",
            ));
        }

        trace!(cla, ins, p1, p2, data_len, le_len = le.len(), "decomposed frame");

        Ok(Self {
            cla,
            ins,
            p1,
            p2,
            lc: Bytes::copy_from_slice(lc),
            data: Bytes::copy_from_slice(data),
            le: Bytes::copy_from_slice(le),
        })
    }

    /// Command class (CLA)
    pub const fn cla(&self) -> u8 {
        self.cla
    }

    /// Instruction code (INS)
    pub const fn ins(&self) -> u8 {
        self.ins
    }

    /// First parameter (P1)
    pub const fn p1(&self) -> u8 {
        self.p1
    }

    /// Second parameter (P2)
    pub const fn p2(&self) -> u8 {
        self.p2
    }

    /// Encoded length-of-data field (0, 1 or 3 bytes)
    pub fn lc(&self) -> &[u8] {
        &self.lc
    }

    /// Command payload data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Encoded expected-response-length field (0, 1 or 3 bytes)
    pub fn le(&self) -> &[u8] {
        &self.le
    }

    /// Reconstruct the flat frame bytes
    ///
    /// The expected-length field is emitted both before and after the
    /// payload, matching the wire convention of the devices this frame
    /// layout mirrors.
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer =
            BytesMut::with_capacity(4 + 2 * self.le.len() + self.data.len());
        buffer.put_u8(self.cla);
        buffer.put_u8(self.ins);
        buffer.put_u8(self.p1);
        buffer.put_u8(self.p2);
        buffer.put_slice(&self.le);
        buffer.put_slice(&self.data);
        buffer.put_slice(&self.le);
        buffer.freeze()
    }

    /// Render every field as uppercase hex text, in frame order
    pub fn field_map(&self) -> Vec<(&'static str, String)> {
        vec![
            ("CLA", format!("{:02X}", self.cla)),
            ("INS", format!("{:02X}", self.ins)),
            ("P1", format!("{:02X}", self.p1)),
            ("P2", format!("{:02X}", self.p2)),
            ("LC", hex::encode_upper(&self.lc)),
            ("DATA", hex::encode_upper(&self.data)),
            ("LE", hex::encode_upper(&self.le)),
        ]
    }
}

impl fmt::Display for Apdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.field_map() {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Decode the big-endian value of a length field
fn decode_length(lc: &[u8]) -> Result<usize> {
    match *lc {
        [] => Ok(0),
        [b0] => Ok(b0 as usize),
        [b0, b1, b2] => Ok(((b0 as usize) << 16) | ((b1 as usize) << 8) | b2 as usize),
        _ => Err(Error::InvalidFrameLength("length field must be 0, 1 or 3 bytes")),
    }
}
