//! The capability contract a character encoding form implements.
//!
//! A form is normally a zero-sized marker type selected at compile time:
//! generic decode loops take it as a type parameter and call its associated
//! functions, so no form value ever exists at run time. Forms never own or
//! mutate the code units they read; every call is a pure function of the
//! window it is handed.
//!
//! ```rust
//! use cef::{DecodeErrorKind, EncodingForm, FixedWidth};
//!
//! /// Latin-1: one byte per character, the byte is the code point.
//! struct Latin1;
//!
//! impl EncodingForm for Latin1 {
//!     type CodeUnit = u8;
//!     type NonnegativeInteger = u32;
//! }
//!
//! impl FixedWidth for Latin1 {
//!     const SEQUENCE_LENGTH: usize = 1;
//!
//!     fn decode(units: &[u8]) -> Result<u32, DecodeErrorKind> {
//!         Ok(u32::from(units[0]))
//!     }
//! }
//!
//! let values = cef::decode_all_fixed::<Latin1>(b"ABC").unwrap();
//! assert_eq!(values, [65, 66, 67]);
//! ```

use core::marker::PhantomData;

use crate::error::DecodeErrorKind;

/// Members shared by fixed-width and variable-width forms.
pub trait EncodingForm {
    /// The atomic storage unit of an encoded sequence.
    type CodeUnit: Copy;
    /// The decoded value of one character (a code point).
    type NonnegativeInteger: Copy;
}

/// A form in which every character occupies exactly
/// [`SEQUENCE_LENGTH`](FixedWidth::SEQUENCE_LENGTH) code units.
pub trait FixedWidth: EncodingForm {
    /// Code units per character. Must be non-zero.
    const SEQUENCE_LENGTH: usize;

    /// Decode the character held by the first `SEQUENCE_LENGTH` units of
    /// `units`.
    ///
    /// Callers going through [`decode_fixed`] or the decode loops are
    /// guaranteed that `units.len() >= SEQUENCE_LENGTH`, so implementations
    /// may index the window directly.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::Malformed`] when the window does not encode a
    /// character of this form.
    fn decode(
        units: &[Self::CodeUnit],
    ) -> Result<Self::NonnegativeInteger, DecodeErrorKind>;
}

/// A form in which the number of code units per character is only known once
/// the character has been decoded.
pub trait VariableWidth: EncodingForm {
    /// Integer type of the consumed count.
    type SequenceLength: Copy + Into<usize>;

    /// Code units to skip past a malformed character when a decode loop
    /// substitutes a replacement for it.
    const RESYNC: usize = 1;

    /// Decode the character starting at `units[0]`, returning its value and
    /// the number of code units that encode it.
    ///
    /// `units` is never empty when called through [`decode_variable`] or the
    /// decode loops. It extends to the end of the buffer, so a character that
    /// does not fit must be reported rather than read past.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::Malformed`] for an invalid sequence and
    /// [`DecodeErrorKind::Truncated`] when the buffer ends inside the
    /// character.
    fn decode(
        units: &[Self::CodeUnit],
    ) -> Result<(Self::NonnegativeInteger, Self::SequenceLength), DecodeErrorKind>;
}

/// Decode one fixed-width character, checking the window first.
///
/// # Errors
///
/// [`DecodeErrorKind::Truncated`] if fewer than `F::SEQUENCE_LENGTH` units are
/// available, otherwise whatever `F::decode` reports.
pub fn decode_fixed<F: FixedWidth>(
    units: &[F::CodeUnit],
) -> Result<F::NonnegativeInteger, DecodeErrorKind> {
    const { assert!(F::SEQUENCE_LENGTH > 0, "fixed-width forms need a non-zero sequence length") };

    if units.len() < F::SEQUENCE_LENGTH {
        return Err(DecodeErrorKind::Truncated {
            needed: F::SEQUENCE_LENGTH,
            available: units.len(),
        });
    }
    F::decode(&units[..F::SEQUENCE_LENGTH])
}

/// Decode one variable-width character and validate the consumed count the
/// form reports.
///
/// # Errors
///
/// [`DecodeErrorKind::Truncated`] on an empty window,
/// [`DecodeErrorKind::ZeroLengthSequence`] or [`DecodeErrorKind::Overrun`]
/// when the form reports an impossible count, otherwise whatever `F::decode`
/// reports.
pub fn decode_variable<F: VariableWidth>(
    units: &[F::CodeUnit],
) -> Result<(F::NonnegativeInteger, usize), DecodeErrorKind> {
    if units.is_empty() {
        return Err(DecodeErrorKind::Truncated {
            needed: 1,
            available: 0,
        });
    }

    let (value, consumed) = F::decode(units)?;
    let consumed: usize = consumed.into();
    if consumed == 0 {
        return Err(DecodeErrorKind::ZeroLengthSequence);
    }
    if consumed > units.len() {
        return Err(DecodeErrorKind::Overrun {
            consumed,
            available: units.len(),
        });
    }
    Ok((value, consumed))
}

/// Views a fixed-width form as a variable-width one whose consumed count is
/// always `F::SEQUENCE_LENGTH`.
///
/// Lets code written against [`VariableWidth`] (the streaming decoder, the
/// form registry) accept fixed-width forms too.
pub struct AsVariable<F>(PhantomData<F>);

impl<F: FixedWidth> EncodingForm for AsVariable<F> {
    type CodeUnit = F::CodeUnit;
    type NonnegativeInteger = F::NonnegativeInteger;
}

impl<F: FixedWidth> VariableWidth for AsVariable<F> {
    type SequenceLength = usize;
    const RESYNC: usize = F::SEQUENCE_LENGTH;

    fn decode(
        units: &[Self::CodeUnit],
    ) -> Result<(Self::NonnegativeInteger, usize), DecodeErrorKind> {
        decode_fixed::<F>(units).map(|value| (value, F::SEQUENCE_LENGTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Be16, HighBitPair, Identity8};

    struct Stalls;

    impl EncodingForm for Stalls {
        type CodeUnit = u8;
        type NonnegativeInteger = u32;
    }

    impl VariableWidth for Stalls {
        type SequenceLength = u8;

        fn decode(units: &[u8]) -> Result<(u32, u8), DecodeErrorKind> {
            Ok((u32::from(units[0]), 0))
        }
    }

    struct Greedy;

    impl EncodingForm for Greedy {
        type CodeUnit = u8;
        type NonnegativeInteger = u32;
    }

    impl VariableWidth for Greedy {
        type SequenceLength = usize;

        fn decode(units: &[u8]) -> Result<(u32, usize), DecodeErrorKind> {
            Ok((0, units.len() + 1))
        }
    }

    #[test]
    fn fixed_window_too_short_is_truncated() {
        assert_eq!(
            decode_fixed::<Be16>(&[0x12]),
            Err(DecodeErrorKind::Truncated {
                needed: 2,
                available: 1
            })
        );
        assert_eq!(decode_fixed::<Be16>(&[0x12, 0x34, 0x56]), Ok(0x1234));
    }

    #[test]
    fn variable_never_called_on_empty_window() {
        assert_eq!(
            decode_variable::<Stalls>(&[]),
            Err(DecodeErrorKind::Truncated {
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn variable_rejects_impossible_counts() {
        assert_eq!(
            decode_variable::<Stalls>(&[1]),
            Err(DecodeErrorKind::ZeroLengthSequence)
        );
        assert_eq!(
            decode_variable::<Greedy>(&[1, 2]),
            Err(DecodeErrorKind::Overrun {
                consumed: 3,
                available: 2
            })
        );
    }

    #[test]
    fn single_character_consumes_whole_buffer() {
        assert_eq!(decode_variable::<HighBitPair>(&[0x41]), Ok((0x41, 1)));
        assert_eq!(decode_variable::<HighBitPair>(&[0x81, 0x01]), Ok((0x0101, 2)));
        assert_eq!(decode_fixed::<Identity8>(&[0x41]), Ok(0x41));
    }

    #[test]
    fn resync_width_follows_the_form() {
        assert_eq!(HighBitPair::RESYNC, 1);
        assert_eq!(AsVariable::<Be16>::RESYNC, 2);
    }

    #[test]
    fn fixed_form_as_variable() {
        assert_eq!(
            decode_variable::<AsVariable<Be16>>(&[0xAB, 0xCD, 0xEF]),
            Ok((0xABCD, 2))
        );
        assert!(decode_variable::<AsVariable<Be16>>(&[0xAB]).is_err());
    }
}
