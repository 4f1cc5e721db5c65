//! Decoding errors and where they happened.

use thiserror::Error;

/// An error raised while decoding a code unit sequence, together with the
/// offset (in code units, from the start of the buffer) where it occurred.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at code unit {offset}")]
pub struct DecodeError {
    pub(crate) kind: DecodeErrorKind,
    pub(crate) offset: usize,
}

impl DecodeError {
    pub(crate) const fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// Offset of the first code unit of the character that failed to decode.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the buffer ended too early, or a form claimed more code units
    /// than the buffer holds.
    ///
    /// Only [`DecodeErrorKind::Truncated`] makes a
    /// [`StreamingDecoder`](crate::StreamingDecoder) wait for more input;
    /// [`DecodeErrorKind::Overrun`] is a contract violation and stops it.
    #[must_use]
    pub const fn is_truncation(&self) -> bool {
        self.kind.is_truncation()
    }
}

/// The error taxonomy shared by every encoding form.
///
/// Concrete forms report `Malformed` and `Truncated`; the remaining variants
/// are raised by the generic decode loops when a form or a buffer breaks the
/// decoding contract.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The code units at this position do not encode any character.
    #[error("malformed code unit sequence: {reason}")]
    Malformed {
        /// Short, static description supplied by the encoding form.
        reason: &'static str,
    },
    /// The buffer ends in the middle of a character.
    #[error("truncated code unit sequence: needed {needed} code units, {available} available")]
    Truncated {
        /// Code units the character requires.
        needed: usize,
        /// Code units left in the buffer.
        available: usize,
    },
    /// A variable-width form claimed to have consumed nothing.
    #[error("encoding form consumed zero code units")]
    ZeroLengthSequence,
    /// A variable-width form claimed more code units than were available.
    #[error("encoding form consumed {consumed} code units, only {available} available")]
    Overrun {
        /// Count reported by the form.
        consumed: usize,
        /// Code units left in the buffer.
        available: usize,
    },
    /// Fixed-width buffer whose length is not a multiple of the form's width.
    #[error("buffer of {len} code units is not a multiple of the sequence length {width}")]
    Misaligned {
        /// Length of the buffer.
        len: usize,
        /// Code units per character.
        width: usize,
    },
}

impl DecodeErrorKind {
    /// Attach the buffer offset at which this error was observed.
    #[must_use]
    pub const fn at(self, offset: usize) -> DecodeError {
        DecodeError::new(self, offset)
    }

    pub(crate) const fn is_truncation(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::Overrun { .. })
    }

    /// Whether a replacement policy may substitute a value for this error.
    ///
    /// Only input errors qualify. Contract violations by the form itself or a
    /// misaligned buffer always surface.
    pub(crate) const fn is_replaceable(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Truncated { .. })
    }
}
