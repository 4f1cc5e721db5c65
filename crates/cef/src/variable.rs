//! The variable-width decode loop.
//!
//! The loop is a two-state machine. While the cursor is before the end of the
//! buffer it is *scanning*: it decodes the character under the cursor and
//! advances by the reported consumed count. Once the cursor sits exactly on
//! the end it is *done*, and no further decode is ever issued. Any error also
//! ends the loop.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use log::{debug, trace};

use crate::{
    error::{DecodeError, DecodeErrorKind},
    form::{VariableWidth, decode_variable},
    options::DecodeOptions,
};

/// One decoded character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decoded<V> {
    /// The decoded code point.
    pub value: V,
    /// Offset of the character's first code unit within the buffer.
    pub offset: usize,
    /// Number of code units the character occupies.
    pub len: usize,
}

impl<V> Decoded<V> {
    /// Offset one past the character's last code unit.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Done,
}

/// Iterator decoding a whole buffer with a [`VariableWidth`] form.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "testing")] {
/// use cef::{VariableWidthDecoder, testing::HighBitPair};
///
/// let units = [0x41, 0x81, 0x01];
/// let decoded: Vec<_> = VariableWidthDecoder::<HighBitPair>::new(&units)
///     .map(|d| d.map(|d| (d.value, d.len)))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(decoded, [(0x41, 1), (0x0101, 2)]);
/// # }
/// ```
pub struct VariableWidthDecoder<'a, F: VariableWidth> {
    units: &'a [F::CodeUnit],
    position: usize,
    state: State,
    options: DecodeOptions<F::NonnegativeInteger>,
}

impl<'a, F: VariableWidth> VariableWidthDecoder<'a, F> {
    /// Decode `units` strictly.
    #[must_use]
    pub fn new(units: &'a [F::CodeUnit]) -> Self {
        Self::with_options(units, DecodeOptions::default())
    }

    /// Decode `units` with the given options.
    #[must_use]
    pub fn with_options(
        units: &'a [F::CodeUnit],
        options: DecodeOptions<F::NonnegativeInteger>,
    ) -> Self {
        let state = if units.is_empty() {
            State::Done
        } else {
            State::Scanning
        };
        Self {
            units,
            position: 0,
            state,
            options,
        }
    }

    /// Offset of the next code unit to decode.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Code units not yet decoded.
    #[must_use]
    pub fn remaining(&self) -> &'a [F::CodeUnit] {
        &self.units[self.position..]
    }

    /// Whether the loop has stopped, at the end of the buffer or on an error.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    fn step(&mut self) -> Result<Decoded<F::NonnegativeInteger>, DecodeError> {
        let offset = self.position;
        let window = &self.units[offset..];

        let (value, len) = match decode_variable::<F>(window) {
            Ok(decoded) => decoded,
            Err(kind) => match self.options.replacement() {
                Some(replacement) if kind.is_replaceable() => {
                    let skip = match kind {
                        DecodeErrorKind::Truncated { .. } => window.len(),
                        _ => F::RESYNC.clamp(1, window.len()),
                    };
                    debug!("replacing undecodable input at code unit {offset}: {kind}");
                    (replacement, skip)
                }
                _ => return Err(kind.at(offset)),
            },
        };

        trace!("decoded {len} code unit(s) at {offset}");
        self.position += len;
        Ok(Decoded { value, offset, len })
    }
}

impl<F: VariableWidth> Iterator for VariableWidthDecoder<'_, F> {
    type Item = Result<Decoded<F::NonnegativeInteger>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }

        let result = self.step();
        if result.is_err() || self.position == self.units.len() {
            self.state = State::Done;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Done => (0, Some(0)),
            State::Scanning => (1, Some(self.units.len() - self.position)),
        }
    }
}

impl<F: VariableWidth> FusedIterator for VariableWidthDecoder<'_, F> {}

/// Decode every character of `units`, returning the values in order.
///
/// # Errors
///
/// The first [`DecodeError`] encountered.
pub fn decode_all_variable<F: VariableWidth>(
    units: &[F::CodeUnit],
) -> Result<Vec<F::NonnegativeInteger>, DecodeError> {
    VariableWidthDecoder::<F>::new(units)
        .map(|decoded| decoded.map(|d| d.value))
        .collect()
}
