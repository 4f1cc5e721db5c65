//! Incremental decoding of input that arrives in chunks.
//!
//! A chunk boundary may fall in the middle of a character. The decoder keeps
//! the incomplete tail and stitches it onto the next chunk, so any chunking of
//! a buffer decodes to the same characters as the buffer as a whole.
//!
//! ```rust
//! # #[cfg(feature = "testing")] {
//! use cef::{StreamingDecoder, testing::HighBitPair};
//!
//! let mut decoder = StreamingDecoder::<HighBitPair>::new();
//! let first: Vec<_> = decoder.feed(&[0x41, 0x81]).into_iter().map(|d| d.unwrap().value).collect();
//! assert_eq!(first, [0x41]);
//! assert_eq!(decoder.pending(), 1);
//!
//! let second: Vec<_> = decoder.feed(&[0x01]).into_iter().map(|d| d.unwrap().value).collect();
//! assert_eq!(second, [0x0101]);
//! assert_eq!(decoder.finish(), Ok(None));
//! # }
//! ```

use alloc::vec::Vec;

use log::{debug, trace};

use crate::{
    error::{DecodeError, DecodeErrorKind},
    form::{VariableWidth, decode_variable},
    options::DecodeOptions,
    variable::Decoded,
};

/// Decodes a stream of code unit chunks with a [`VariableWidth`] form.
///
/// Fixed-width forms can be streamed through
/// [`AsVariable`](crate::AsVariable); a replaced character then skips one
/// whole window, as in [`FixedWidthDecoder`](crate::FixedWidthDecoder).
pub struct StreamingDecoder<F: VariableWidth> {
    pending: Vec<F::CodeUnit>,
    /// Absolute offset of `pending[0]`.
    base: usize,
    error: Option<DecodeError>,
    options: DecodeOptions<F::NonnegativeInteger>,
}

impl<F: VariableWidth> Default for StreamingDecoder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: VariableWidth> StreamingDecoder<F> {
    /// A strict streaming decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(DecodeOptions::default())
    }

    /// A streaming decoder with the given options.
    #[must_use]
    pub fn with_options(options: DecodeOptions<F::NonnegativeInteger>) -> Self {
        Self {
            pending: Vec::new(),
            base: 0,
            error: None,
            options,
        }
    }

    /// Code units held back because they begin an incomplete character.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Absolute offset of the next character to be decoded.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.base
    }

    /// Feed the next chunk and decode every character it completes.
    ///
    /// Offsets in the returned [`Decoded`] values are relative to the start of
    /// the whole stream. After an error is returned the decoder stops: later
    /// chunks are ignored and [`finish`](Self::finish) reports the same error.
    pub fn feed(
        &mut self,
        chunk: &[F::CodeUnit],
    ) -> Vec<Result<Decoded<F::NonnegativeInteger>, DecodeError>> {
        let mut out = Vec::new();
        if self.error.is_some() {
            return out;
        }
        self.pending.extend_from_slice(chunk);

        let mut pos = 0;
        while pos < self.pending.len() {
            let offset = self.base + pos;
            match decode_variable::<F>(&self.pending[pos..]) {
                Ok((value, len)) => {
                    trace!("decoded {len} code unit(s) at {offset}");
                    out.push(Ok(Decoded { value, offset, len }));
                    pos += len;
                }
                Err(DecodeErrorKind::Truncated { .. }) => break,
                Err(kind) => match self.options.replacement() {
                    Some(value) if kind.is_replaceable() => {
                        let len = F::RESYNC.clamp(1, self.pending.len() - pos);
                        debug!("replacing undecodable input at code unit {offset}: {kind}");
                        out.push(Ok(Decoded { value, offset, len }));
                        pos += len;
                    }
                    _ => {
                        let err = kind.at(offset);
                        self.error = Some(err);
                        out.push(Err(err));
                        break;
                    }
                },
            }
        }

        self.pending.drain(..pos);
        self.base += pos;
        if !self.pending.is_empty() && self.error.is_none() {
            debug!(
                "holding {} code unit(s) of an incomplete character at {}",
                self.pending.len(),
                self.base
            );
        }
        out
    }

    /// End the stream.
    ///
    /// Returns `Ok(None)` when the input ended on a character boundary. With a
    /// replacement policy an incomplete final character is replaced as a
    /// whole.
    ///
    /// # Errors
    ///
    /// The error that stopped an earlier [`feed`](Self::feed), or
    /// [`DecodeErrorKind::Truncated`] if the stream ended inside a character.
    pub fn finish(self) -> Result<Option<Decoded<F::NonnegativeInteger>>, DecodeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.pending.is_empty() {
            return Ok(None);
        }

        let offset = self.base;
        let len = self.pending.len();
        let kind = match decode_variable::<F>(&self.pending) {
            Err(kind) => kind,
            // `feed` only holds back what failed to decode as truncated.
            Ok(_) => DecodeErrorKind::Truncated {
                needed: len + 1,
                available: len,
            },
        };
        match self.options.replacement() {
            Some(value) if kind.is_replaceable() => {
                debug!("replacing incomplete trailing character at code unit {offset}");
                Ok(Some(Decoded { value, offset, len }))
            }
            _ => Err(kind.at(offset)),
        }
    }
}
