//! Frame input normalization
//!
//! The parser accepts raw frames in several shapes: a byte slice, a
//! sequence of unvalidated integer words (as handed over by scripting
//! hosts or config files), or a whitespace-separated hex string. All of
//! them funnel through a single normalization step that either yields a
//! uniform byte vector or reports every offending position at once.

use crate::error::{Error, Result};

/// Raw input accepted by [`Apdu::parse`](crate::Apdu::parse)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameInput {
    /// Bytes already constrained to the valid range
    Raw(Vec<u8>),
    /// Unvalidated integer words; each must lie in `0..=255`
    Values(Vec<i64>),
    /// Whitespace-separated two-hex-digit tokens, e.g. `"00 A4 04 00 05"`
    HexText(String),
}

impl FrameInput {
    /// Normalize into a plain byte vector, validating every token
    ///
    /// Byte well-formedness is a precondition of structural parsing:
    /// on any invalid token this fails with [`Error::InvalidBytes`]
    /// listing all offending indices and a bracket-highlighted rendering
    /// of the complete input, without attempting field decomposition.
    pub(crate) fn normalize(&self) -> Result<Vec<u8>> {
        match self {
            Self::Raw(bytes) => Ok(bytes.clone()),
            Self::Values(values) => {
                let tokens = values
                    .iter()
                    .map(|&value| {
                        u8::try_from(value)
                            .map_err(|_| value.to_string())
                    })
                    .collect::<Vec<_>>();
                collect_tokens(tokens)
            }
            Self::HexText(text) => {
                let tokens = text
                    .split_whitespace()
                    .map(|token| {
                        if token.len() == 2 && token.bytes().all(|b| b.is_ascii_hexdigit()) {
                            u8::from_str_radix(token, 16).map_err(|_| token.to_string())
                        } else {
                            Err(token.to_string())
                        }
                    })
                    .collect::<Vec<_>>();
                collect_tokens(tokens)
            }
        }
    }
}

/// Fold validated tokens into bytes, or render the highlighted failure
fn collect_tokens(tokens: Vec<std::result::Result<u8, String>>) -> Result<Vec<u8>> {
    let indices: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter_map(|(i, token)| token.is_err().then_some(i))
        .collect();

    if indices.is_empty() {
        return Ok(tokens.into_iter().map(|token| token.unwrap_or_default()).collect());
    }

    let rendered = tokens
        .iter()
        .map(|token| match token {
            Ok(byte) => format!("{byte:02X}"),
            Err(original) => format!("[{original}]"),
        })
        .collect::<Vec<_>>()
        .join(" ");

    Err(Error::InvalidBytes { indices, rendered })
}

impl From<&[u8]> for FrameInput {
    fn from(bytes: &[u8]) -> Self {
        Self::Raw(bytes.to_vec())
    }
}

impl From<Vec<u8>> for FrameInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Raw(bytes)
    }
}

impl From<&[i64]> for FrameInput {
    fn from(values: &[i64]) -> Self {
        Self::Values(values.to_vec())
    }
}

impl From<Vec<i64>> for FrameInput {
    fn from(values: Vec<i64>) -> Self {
        Self::Values(values)
    }
}

impl From<&str> for FrameInput {
    fn from(text: &str) -> Self {
        Self::HexText(text.to_string())
    }
}

impl From<String> for FrameInput {
    fn from(text: String) -> Self {
        Self::HexText(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_bytes_pass_through() {
        let input = FrameInput::Raw(vec![0x00, 0xA4, 0x04, 0x00]);
        assert_eq!(input.normalize().unwrap(), vec![0x00, 0xA4, 0x04, 0x00]);

        // Byte slices and vectors convert to the Raw variant
        assert_eq!(
            FrameInput::from(&[0x3Fu8, 0x00][..]),
            FrameInput::Raw(vec![0x3F, 0x00])
        );
    }

    #[test]
    fn test_byte_range_validation() {
        // Every value in 0..=255 is accepted, everything else rejected
        let input = FrameInput::Values(vec![0, 128, 255]);
        assert_eq!(input.normalize().unwrap(), vec![0x00, 0x80, 0xFF]);

        for bad in [-1i64, 256, 1000, i64::MIN, i64::MAX] {
            let input = FrameInput::Values(vec![0, bad]);
            assert!(matches!(
                input.normalize(),
                Err(Error::InvalidBytes { indices, .. }) if indices == vec![1]
            ));
        }
    }

    #[test]
    fn test_hex_token_validation() {
        // A token is valid iff it is exactly two hex digits, any case
        let input = FrameInput::from("00 a4 04 00 FF");
        assert_eq!(input.normalize().unwrap(), vec![0x00, 0xA4, 0x04, 0x00, 0xFF]);

        for bad in ["zz", "0", "000", "g0", "4-", "+1"] {
            let input = FrameInput::from(format!("00 {bad} 04"));
            assert!(matches!(
                input.normalize(),
                Err(Error::InvalidBytes { indices, .. }) if indices == vec![1]
            ));
        }
    }

    #[test]
    fn test_highlight_brackets_exactly_the_offenders() {
        let input = FrameInput::from("00 zz 04 q7 05");
        match input.normalize() {
            Err(Error::InvalidBytes { indices, rendered }) => {
                assert_eq!(indices, vec![1, 3]);
                assert_eq!(rendered, "00 [zz] 04 [q7] 05");
            }
            other => panic!("expected InvalidBytes, got {other:?}"),
        }

        // Integer inputs keep their original rendering inside the brackets
        let input = FrameInput::Values(vec![0, 300, 4, -1]);
        match input.normalize() {
            Err(Error::InvalidBytes { indices, rendered }) => {
                assert_eq!(indices, vec![1, 3]);
                assert_eq!(rendered, "00 [300] 04 [-1]");
            }
            other => panic!("expected InvalidBytes, got {other:?}"),
        }
    }

    #[test]
    fn test_error_message_states_count_and_indices() {
        let err = FrameInput::from("zz 00 yy").normalize().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("2 invalid byte(s)"));
        assert!(message.contains("[0, 2]"));
        assert!(message.contains("[zz] 00 [yy]"));
    }
}
