#![allow(missing_docs)]
#![allow(dead_code)]

use cef::{DecodeErrorKind, EncodingForm, FixedWidth, VariableWidth};

/// 16-bit code units with surrogate pairs, in the manner of UTF-16.
pub struct SurrogatePairs;

impl EncodingForm for SurrogatePairs {
    type CodeUnit = u16;
    type NonnegativeInteger = u32;
}

impl VariableWidth for SurrogatePairs {
    type SequenceLength = u8;

    fn decode(units: &[u16]) -> Result<(u32, u8), DecodeErrorKind> {
        match units {
            [high @ 0xD800..=0xDBFF, low @ 0xDC00..=0xDFFF, ..] => {
                let value = 0x1_0000
                    + ((u32::from(*high) - 0xD800) << 10)
                    + (u32::from(*low) - 0xDC00);
                Ok((value, 2))
            }
            [0xD800..=0xDBFF] => Err(DecodeErrorKind::Truncated {
                needed: 2,
                available: 1,
            }),
            [0xD800..=0xDBFF, ..] => Err(DecodeErrorKind::Malformed {
                reason: "high surrogate not followed by a low surrogate",
            }),
            [0xDC00..=0xDFFF, ..] => Err(DecodeErrorKind::Malformed {
                reason: "unpaired low surrogate",
            }),
            [unit, ..] => Ok((u32::from(*unit), 1)),
            [] => Err(DecodeErrorKind::Truncated {
                needed: 1,
                available: 0,
            }),
        }
    }
}

/// 32-bit code units holding scalar values directly, in the manner of UTF-32.
pub struct Scalars32;

impl EncodingForm for Scalars32 {
    type CodeUnit = u32;
    type NonnegativeInteger = char;
}

impl FixedWidth for Scalars32 {
    const SEQUENCE_LENGTH: usize = 1;

    fn decode(units: &[u32]) -> Result<char, DecodeErrorKind> {
        char::from_u32(units[0]).ok_or(DecodeErrorKind::Malformed {
            reason: "not a Unicode scalar value",
        })
    }
}

/// Little-endian 32-bit values split over four bytes.
pub struct Bytes32Le;

impl EncodingForm for Bytes32Le {
    type CodeUnit = u8;
    type NonnegativeInteger = u32;
}

impl FixedWidth for Bytes32Le {
    const SEQUENCE_LENGTH: usize = 4;

    fn decode(units: &[u8]) -> Result<u32, DecodeErrorKind> {
        Ok(u32::from_le_bytes([units[0], units[1], units[2], units[3]]))
    }
}
