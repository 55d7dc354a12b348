//! Status words and the status-word knowledge base
//!
//! A [`StatusWord`] is the two-byte trailer of a response APDU. The
//! knowledge base maps known trailers to a severity category and a
//! human-readable description; it is static, read-only and safe to query
//! from any number of threads.

use std::fmt;

/// Two-byte status word trailing an APDU response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    sw1: u8,
    sw2: u8,
}

impl StatusWord {
    /// Create a status word from its two bytes
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// First status byte (SW1)
    pub const fn sw1(&self) -> u8 {
        self.sw1
    }

    /// Second status byte (SW2)
    pub const fn sw2(&self) -> u8 {
        self.sw2
    }

    /// Combined 16-bit value, SW1 in the high byte
    pub const fn to_u16(&self) -> u16 {
        ((self.sw1 as u16) << 8) | self.sw2 as u16
    }

    /// The two raw trailer bytes
    pub const fn to_bytes(&self) -> [u8; 2] {
        [self.sw1, self.sw2]
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}", self.sw1, self.sw2)
    }
}

impl From<u16> for StatusWord {
    fn from(value: u16) -> Self {
        Self::new((value >> 8) as u8, (value & 0xFF) as u8)
    }
}

impl From<(u8, u8)> for StatusWord {
    fn from((sw1, sw2): (u8, u8)) -> Self {
        Self::new(sw1, sw2)
    }
}

impl From<StatusWord> for u16 {
    fn from(status: StatusWord) -> Self {
        status.to_u16()
    }
}

/// Severity category of a knowledge-base entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational outcome
    Info,
    /// Recoverable or advisory condition
    Warning,
    /// Hard failure
    Error,
    /// The source material assigns no category
    Unspecified,
}

impl Severity {
    /// Bracketed message prefix, empty for [`Severity::Unspecified`]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Info => "(Info) ",
            Self::Warning => "(Warning) ",
            Self::Error => "(Error) ",
            Self::Unspecified => "",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Unspecified => "Unspecified",
        };
        f.write_str(name)
    }
}

/// One record of the status-word knowledge base
///
/// Keys are uppercase two-hex-digit strings. Some rows carry wildcard
/// keys (`"XX"`, `"FX"`) inherited from the source table; lookups are
/// exact-match only, so those rows are never returned. Kept verbatim for
/// compatibility with callers that read the table directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusWordEntry {
    /// SW1 key, uppercase hex
    pub sw1: &'static str,
    /// SW2 key, uppercase hex or wildcard
    pub sw2: &'static str,
    /// Severity category
    pub severity: Severity,
    /// Human-readable description
    pub description: &'static str,
}

const fn entry(
    sw1: &'static str,
    sw2: &'static str,
    severity: Severity,
    description: &'static str,
) -> StatusWordEntry {
    StatusWordEntry { sw1, sw2, severity, description }
}

/// The static knowledge base, populated once and never mutated
static KNOWLEDGE_BASE: &[StatusWordEntry] = &[
    entry("67", "00", Severity::Error, "Wrong length"),
    entry("68", "81", Severity::Error, "Logical channel not supported"),
    entry("68", "82", Severity::Error, "Secure messaging not supported"),
    entry("68", "83", Severity::Error, "Last command of the chain expected"),
    entry("68", "84", Severity::Error, "Command chaining not supported"),
    entry("69", "81", Severity::Error, "Command incompatible with file structure"),
    entry("69", "82", Severity::Error, "Security condition not satisfied"),
    entry("69", "83", Severity::Error, "Authentication method blocked"),
    entry("69", "84", Severity::Error, "Referenced data reversibly blocked (invalidated)"),
    entry("69", "85", Severity::Error, "Conditions of use not satisfied"),
    entry("69", "86", Severity::Error, "Command not allowed (no current EF)"),
    entry("69", "87", Severity::Error, "Expected secure messaging data objects missing"),
    entry("69", "88", Severity::Error, "Incorrect secure messaging data objects"),
    entry("6A", "80", Severity::Error, "The parameters in the data field are incorrect"),
    entry("6A", "81", Severity::Error, "Function not supported"),
    entry("6A", "82", Severity::Error, "File not found"),
    entry("6A", "83", Severity::Error, "Record not found"),
    entry("6A", "84", Severity::Error, "There is insufficient memory space in record or file"),
    entry("6A", "85", Severity::Error, "Lc inconsistent with TLV structure"),
    entry("6A", "86", Severity::Error, "Incorrect P1 or P2 parameter"),
    entry("6A", "87", Severity::Error, "Lc inconsistent with P1-P2"),
    entry("6A", "88", Severity::Error, "Referenced data not found"),
    entry("6A", "89", Severity::Error, "File already exists"),
    entry("6A", "8A", Severity::Error, "DF name already exists"),
    entry("6A", "FX", Severity::Unspecified, "No information given (proprietary)"),
    entry("6B", "00", Severity::Error, "Wrong parameter(s) P1-P2"),
    entry("6C", "XX", Severity::Warning, "Incorrect Le field; SW2 encodes the exact number of available bytes"),
    entry("6D", "00", Severity::Error, "Instruction code not supported or invalid"),
    entry("6E", "00", Severity::Error, "Class not supported"),
    entry("90", "00", Severity::Info, "Command successfully executed (OK)"),
    entry("91", "XX", Severity::Info, "Command successfully executed; extra information available"),
];

/// Look up a trailer in the knowledge base
///
/// Exact match on both keys only; the wildcard rows never match.
pub fn lookup(sw1: u8, sw2: u8) -> Option<&'static StatusWordEntry> {
    let k1 = hex::encode_upper([sw1]);
    let k2 = hex::encode_upper([sw2]);
    KNOWLEDGE_BASE
        .iter()
        .find(|entry| entry.sw1 == k1 && entry.sw2 == k2)
}

/// Common status words by name
pub mod common {
    use super::StatusWord;

    /// Command completed normally (9000)
    pub const SUCCESS: StatusWord = StatusWord::new(0x90, 0x00);
    /// Wrong length (6700)
    pub const WRONG_LENGTH: StatusWord = StatusWord::new(0x67, 0x00);
    /// Security condition not satisfied (6982)
    pub const SECURITY_CONDITION_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x82);
    /// File not found (6A82)
    pub const FILE_NOT_FOUND: StatusWord = StatusWord::new(0x6A, 0x82);
    /// Wrong parameters P1-P2 (6B00)
    pub const WRONG_P1_P2: StatusWord = StatusWord::new(0x6B, 0x00);
    /// Instruction not supported (6D00)
    pub const INS_NOT_SUPPORTED: StatusWord = StatusWord::new(0x6D, 0x00);
    /// Class not supported (6E00)
    pub const CLA_NOT_SUPPORTED: StatusWord = StatusWord::new(0x6E, 0x00);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_word_views() {
        let status = StatusWord::new(0x6A, 0x82);
        assert_eq!(status.sw1(), 0x6A);
        assert_eq!(status.sw2(), 0x82);
        assert_eq!(status.to_u16(), 0x6A82);
        assert_eq!(status.to_bytes(), [0x6A, 0x82]);
        assert_eq!(status.to_string(), "6A82");
        assert_eq!(StatusWord::from(0x9000u16), common::SUCCESS);
    }

    #[test]
    fn test_exact_lookup() {
        let entry = lookup(0x6A, 0x82).unwrap();
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(entry.description, "File not found");

        let entry = lookup(0x90, 0x00).unwrap();
        assert_eq!(entry.severity, Severity::Info);
    }

    #[test]
    fn test_wildcard_rows_never_match() {
        // 6C and 91 rows are keyed "XX" and only ever match literally
        assert!(lookup(0x6C, 0x07).is_none());
        assert!(lookup(0x91, 0x23).is_none());
        assert!(lookup(0x6A, 0xF3).is_none());
        // unrelated trailers miss too
        assert!(lookup(0x12, 0x34).is_none());
    }

    #[test]
    fn test_severity_prefix() {
        assert_eq!(Severity::Info.prefix(), "(Info) ");
        assert_eq!(Severity::Warning.prefix(), "(Warning) ");
        assert_eq!(Severity::Error.prefix(), "(Error) ");
        assert_eq!(Severity::Unspecified.prefix(), "");
    }
}
