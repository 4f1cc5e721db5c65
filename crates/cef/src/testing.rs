//! Fixture encoding forms for tests, benchmarks and fuzzing.
//!
//! These are deliberately tiny and are not meant to be used as real
//! encodings.

use alloc::vec::Vec;

use crate::{DecodeErrorKind, EncodingForm, FixedWidth, VariableWidth};

/// One byte per character, decoded unchanged.
#[derive(Debug)]
pub struct Identity8;

impl EncodingForm for Identity8 {
    type CodeUnit = u8;
    type NonnegativeInteger = u32;
}

impl FixedWidth for Identity8 {
    const SEQUENCE_LENGTH: usize = 1;

    fn decode(units: &[u8]) -> Result<u32, DecodeErrorKind> {
        Ok(u32::from(units[0]))
    }
}

/// Two bytes per character, combined big-endian.
#[derive(Debug)]
pub struct Be16;

impl EncodingForm for Be16 {
    type CodeUnit = u8;
    type NonnegativeInteger = u32;
}

impl FixedWidth for Be16 {
    const SEQUENCE_LENGTH: usize = 2;

    fn decode(units: &[u8]) -> Result<u32, DecodeErrorKind> {
        Ok((u32::from(units[0]) << 8) | u32::from(units[1]))
    }
}

/// One or two bytes per character.
///
/// A byte with the high bit clear is a character on its own. A byte with the
/// high bit set leads a pair; the trailing byte must have its high bit clear
/// and the value is `((lead & 0x7F) << 8) | trail`.
#[derive(Debug)]
pub struct HighBitPair;

impl EncodingForm for HighBitPair {
    type CodeUnit = u8;
    type NonnegativeInteger = u32;
}

impl VariableWidth for HighBitPair {
    type SequenceLength = u8;

    fn decode(units: &[u8]) -> Result<(u32, u8), DecodeErrorKind> {
        let lead = units[0];
        if lead & 0x80 == 0 {
            return Ok((u32::from(lead), 1));
        }
        let Some(&trail) = units.get(1) else {
            return Err(DecodeErrorKind::Truncated {
                needed: 2,
                available: units.len(),
            });
        };
        if trail & 0x80 != 0 {
            return Err(DecodeErrorKind::Malformed {
                reason: "trailing unit has its high bit set",
            });
        }
        Ok(((u32::from(lead & 0x7F) << 8) | u32::from(trail), 2))
    }
}

/// Split `units` into approximately equal-sized chunks.
///
/// Chunk boundaries ignore character boundaries on purpose: the streaming
/// decoder has to stitch characters back together.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks<T>(units: &[T], parts: usize) -> Vec<&[T]> {
    assert!(parts > 0);
    let len = units.len();
    let chunk_size = len.div_ceil(parts).max(1);
    units.chunks(chunk_size).collect()
}

/// Split `units` at the given cut points (taken modulo the remaining length),
/// producing chunks of at least one unit.
#[must_use]
pub fn split_at_cuts<'a, T>(units: &'a [T], cuts: &[usize]) -> Vec<&'a [T]> {
    let mut chunks = Vec::new();
    let mut rest = units;
    for &cut in cuts {
        if rest.is_empty() {
            break;
        }
        let size = 1 + cut % rest.len();
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
