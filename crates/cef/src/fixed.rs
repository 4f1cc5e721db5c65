//! The fixed-width decode loop.
//!
//! Alignment is a property of the whole buffer: it is checked once, before
//! the first character is decoded, and never per character.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use log::{debug, trace};

use crate::{
    error::{DecodeError, DecodeErrorKind},
    form::FixedWidth,
    options::DecodeOptions,
    variable::Decoded,
};

/// Iterator decoding a whole buffer with a [`FixedWidth`] form.
pub struct FixedWidthDecoder<'a, F: FixedWidth> {
    units: &'a [F::CodeUnit],
    position: usize,
    failed: bool,
    options: DecodeOptions<F::NonnegativeInteger>,
}

impl<'a, F: FixedWidth> FixedWidthDecoder<'a, F> {
    /// Decode `units` strictly.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::Misaligned`] at offset 0 if the buffer length is not
    /// a multiple of `F::SEQUENCE_LENGTH`.
    pub fn new(units: &'a [F::CodeUnit]) -> Result<Self, DecodeError> {
        Self::with_options(units, DecodeOptions::default())
    }

    /// Decode `units` with the given options.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::Misaligned`] at offset 0 if the buffer length is not
    /// a multiple of `F::SEQUENCE_LENGTH`.
    pub fn with_options(
        units: &'a [F::CodeUnit],
        options: DecodeOptions<F::NonnegativeInteger>,
    ) -> Result<Self, DecodeError> {
        let width = const {
            assert!(F::SEQUENCE_LENGTH > 0, "fixed-width forms need a non-zero sequence length");
            F::SEQUENCE_LENGTH
        };
        if units.len() % width != 0 {
            return Err(DecodeErrorKind::Misaligned {
                len: units.len(),
                width,
            }
            .at(0));
        }
        Ok(Self::aligned(units, options))
    }

    /// Decode a buffer whose alignment is checked at compile time.
    ///
    /// ```rust
    /// # #[cfg(feature = "testing")] {
    /// use cef::{FixedWidthDecoder, testing::Identity8};
    ///
    /// const UNITS: [u8; 3] = [65, 66, 67];
    /// let values: Vec<u32> = FixedWidthDecoder::<Identity8>::from_array(&UNITS)
    ///     .map(|d| d.unwrap().value)
    ///     .collect();
    /// assert_eq!(values, [65, 66, 67]);
    /// # }
    /// ```
    ///
    /// An array whose length is not a multiple of the sequence length fails
    /// to build.
    #[must_use]
    pub fn from_array<const N: usize>(units: &'a [F::CodeUnit; N]) -> Self {
        const {
            assert!(F::SEQUENCE_LENGTH > 0, "fixed-width forms need a non-zero sequence length");
            assert!(
                N % F::SEQUENCE_LENGTH == 0,
                "the length of the code unit sequence must be a multiple of the form's sequence length"
            );
        };
        Self::aligned(units, DecodeOptions::default())
    }

    fn aligned(
        units: &'a [F::CodeUnit],
        options: DecodeOptions<F::NonnegativeInteger>,
    ) -> Self {
        Self {
            units,
            position: 0,
            failed: false,
            options,
        }
    }

    /// Offset of the next code unit to decode.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Code units not yet decoded. Always a whole number of characters.
    #[must_use]
    pub fn remaining(&self) -> &'a [F::CodeUnit] {
        &self.units[self.position..]
    }

    /// Whether the loop has stopped, at the end of the buffer or on an error.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.failed || self.position == self.units.len()
    }
}

impl<F: FixedWidth> Iterator for FixedWidthDecoder<'_, F> {
    type Item = Result<Decoded<F::NonnegativeInteger>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }

        let offset = self.position;
        let len = F::SEQUENCE_LENGTH;
        // Alignment was checked up front, so a full window is always there.
        let window = &self.units[offset..offset + len];
        let value = match F::decode(window) {
            Ok(value) => value,
            Err(kind) => match self.options.replacement() {
                Some(replacement) if kind.is_replaceable() => {
                    debug!("replacing undecodable input at code unit {offset}: {kind}");
                    replacement
                }
                _ => {
                    self.failed = true;
                    return Some(Err(kind.at(offset)));
                }
            },
        };

        trace!("decoded {len} code unit(s) at {offset}");
        self.position += len;
        Some(Ok(Decoded { value, offset, len }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_done() {
            return (0, Some(0));
        }
        let left = (self.units.len() - self.position) / F::SEQUENCE_LENGTH;
        (1, Some(left))
    }
}

impl<F: FixedWidth> FusedIterator for FixedWidthDecoder<'_, F> {}

/// Decode every character of `units`, returning the values in order.
///
/// # Errors
///
/// [`DecodeErrorKind::Misaligned`] before anything is decoded, or the first
/// error a character raises.
pub fn decode_all_fixed<F: FixedWidth>(
    units: &[F::CodeUnit],
) -> Result<Vec<F::NonnegativeInteger>, DecodeError> {
    FixedWidthDecoder::<F>::new(units)?
        .map(|decoded| decoded.map(|d| d.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{
        EncodingForm,
        testing::{Be16, Identity8},
    };

    /// Rejects the all-ones window, to exercise error paths.
    struct NoFfff;

    impl EncodingForm for NoFfff {
        type CodeUnit = u8;
        type NonnegativeInteger = u32;
    }

    impl FixedWidth for NoFfff {
        const SEQUENCE_LENGTH: usize = 2;

        fn decode(units: &[u8]) -> Result<u32, DecodeErrorKind> {
            match units {
                [0xFF, 0xFF] => Err(DecodeErrorKind::Malformed {
                    reason: "reserved window",
                }),
                _ => Be16::decode(units),
            }
        }
    }

    #[test]
    fn identity_form_decodes_each_unit() {
        assert_eq!(decode_all_fixed::<Identity8>(&[65, 66, 67]), Ok(vec![65, 66, 67]));
    }

    #[test]
    fn windows_cover_buffer_exactly() {
        let units = [0x00, 0x41, 0x12, 0x34, 0xFF, 0xFE];
        let decoded: Vec<_> = FixedWidthDecoder::<Be16>::new(&units)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(
            decoded
                .iter()
                .map(|d| (d.value, d.offset))
                .collect::<Vec<_>>(),
            vec![(0x0041, 0), (0x1234, 2), (0xFFFE, 4)]
        );
        assert_eq!(decoded.last().map(Decoded::end), Some(units.len()));
    }

    #[test]
    fn misaligned_buffer_rejected_before_decoding() {
        let Err(err) = FixedWidthDecoder::<Be16>::new(&[1, 2, 3]) else {
            panic!("expected misalignment");
        };
        assert_eq!(
            err,
            DecodeErrorKind::Misaligned { len: 3, width: 2 }.at(0)
        );
        // Even with a replacement policy the buffer itself is refused.
        assert!(
            FixedWidthDecoder::<Be16>::with_options(&[1], DecodeOptions::replacing(0)).is_err()
        );
    }

    #[test]
    fn error_stops_iteration() {
        let mut decoder = FixedWidthDecoder::<NoFfff>::new(&[0x00, 0x01, 0xFF, 0xFF, 0x00, 0x02])
            .unwrap();
        assert_eq!(decoder.next().map(|d| d.map(|d| d.value)), Some(Ok(1)));
        let err = decoder.next().unwrap().unwrap_err();
        assert_eq!(err.offset(), 2);
        assert!(decoder.is_done());
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn replacement_skips_one_window() {
        let values: Vec<_> = FixedWidthDecoder::<NoFfff>::with_options(
            &[0xFF, 0xFF, 0x00, 0x02],
            DecodeOptions::replacing(0xFFFD),
        )
        .unwrap()
        .map(|d| d.unwrap().value)
        .collect();
        assert_eq!(values, vec![0xFFFD, 0x0002]);
    }

    #[test]
    fn from_array_checks_alignment_statically() {
        const UNITS: [u8; 4] = [0xAB, 0xCD, 0x00, 0x01];
        let decoder = FixedWidthDecoder::<Be16>::from_array(&UNITS);
        assert_eq!(decoder.size_hint(), (1, Some(2)));
        let values: Vec<_> = decoder.map(|d| d.unwrap().value).collect();
        assert_eq!(values, vec![0xABCD, 0x0001]);
    }
}
