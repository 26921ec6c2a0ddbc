//! Intel-HEX image parser.
//!
//! Parses the `:LLAAAATT…CC` record format the 65xx test suites ship in.
//! Type 00 data records land in a 64 KiB image; a type 01 record ends the
//! stream. Anything malformed fails fast: a missing `:`, a truncated
//! record, a bad hex digit, a checksum mismatch, or a record type this
//! 16-bit address space has no use for.

use std::fmt;

const IMAGE_SIZE: usize = 0x1_0000;

/// Record type of a data record.
const RECORD_DATA: u8 = 0x00;
/// Record type marking the end of the stream.
const RECORD_EOF: u8 = 0x01;

#[derive(Debug, PartialEq, Eq)]
pub enum IhexError {
    /// A record did not start with `:`.
    MissingColon { line: usize },
    /// A record ended before its declared length.
    Truncated { line: usize },
    /// A character outside `0-9A-Fa-f` where a hex digit was expected.
    BadHexDigit { line: usize },
    /// The record checksum did not add up.
    ChecksumMismatch { line: usize, expected: u8, actual: u8 },
    /// A record type other than data (00) or end-of-file (01).
    UnsupportedRecordType { line: usize, kind: u8 },
    /// A data record would run past the top of the 64 KiB space.
    AddressOverflow { line: usize },
    /// The stream ended without a type 01 record.
    MissingEof,
}

impl fmt::Display for IhexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColon { line } => {
                write!(f, "line {line}: record does not start with ':'")
            }
            Self::Truncated { line } => write!(f, "line {line}: truncated record"),
            Self::BadHexDigit { line } => write!(f, "line {line}: invalid hex digit"),
            Self::ChecksumMismatch { line, expected, actual } => write!(
                f,
                "line {line}: checksum mismatch (expected {expected:02X}, got {actual:02X})"
            ),
            Self::UnsupportedRecordType { line, kind } => {
                write!(f, "line {line}: unsupported record type {kind:02X}")
            }
            Self::AddressOverflow { line } => {
                write!(f, "line {line}: data runs past $FFFF")
            }
            Self::MissingEof => write!(f, "stream ended without an end-of-file record"),
        }
    }
}

impl std::error::Error for IhexError {}

/// A 64 KiB memory image assembled from data records.
#[derive(Debug)]
pub struct Image {
    data: Vec<u8>,
    extent: Option<(u16, u16)>,
}

impl Image {
    /// Parse an Intel-HEX stream.
    pub fn parse(text: &str) -> Result<Self, IhexError> {
        let mut data = vec![0u8; IMAGE_SIZE];
        let mut extent: Option<(u16, u16)> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line = index + 1;
            let record = raw_line.trim();
            if record.is_empty() {
                continue;
            }
            let Some(hex) = record.strip_prefix(':') else {
                return Err(IhexError::MissingColon { line });
            };

            let bytes = decode_hex(hex, line)?;
            // Count, address, type and checksum around the payload.
            if bytes.len() < 5 {
                return Err(IhexError::Truncated { line });
            }
            let count = bytes[0] as usize;
            if bytes.len() != count + 5 {
                return Err(IhexError::Truncated { line });
            }

            let sum = bytes[..bytes.len() - 1]
                .iter()
                .fold(0u8, |acc, &b| acc.wrapping_add(b));
            let expected = sum.wrapping_neg();
            let actual = bytes[bytes.len() - 1];
            if expected != actual {
                return Err(IhexError::ChecksumMismatch { line, expected, actual });
            }

            let addr = (u16::from(bytes[1]) << 8) | u16::from(bytes[2]);
            match bytes[3] {
                RECORD_DATA => {
                    let start = addr as usize;
                    let payload = &bytes[4..4 + count];
                    if start + count > IMAGE_SIZE {
                        return Err(IhexError::AddressOverflow { line });
                    }
                    data[start..start + count].copy_from_slice(payload);
                    if count > 0 {
                        let end = (start + count - 1) as u16;
                        extent = Some(match extent {
                            None => (addr, end),
                            Some((lo, hi)) => (lo.min(addr), hi.max(end)),
                        });
                    }
                }
                RECORD_EOF => return Ok(Self { data, extent }),
                kind => return Err(IhexError::UnsupportedRecordType { line, kind }),
            }
        }
        Err(IhexError::MissingEof)
    }

    /// The full 64 KiB image.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Lowest and highest addresses any data record touched.
    #[must_use]
    pub fn extent(&self) -> Option<(u16, u16)> {
        self.extent
    }
}

fn decode_hex(hex: &str, line: usize) -> Result<Vec<u8>, IhexError> {
    if hex.len() % 2 != 0 {
        return Err(IhexError::Truncated { line });
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| {
            let hi = hex_digit(pair[0]).ok_or(IhexError::BadHexDigit { line })?;
            let lo = hex_digit(pair[1]).ok_or(IhexError::BadHexDigit { line })?;
            Ok((hi << 4) | lo)
        })
        .collect()
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}
