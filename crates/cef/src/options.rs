/// What a decode loop does when the input at the cursor does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MalformedInput<V> {
    /// Stop and report a [`DecodeError`](crate::DecodeError).
    Fail,
    /// Yield the given value in place of the bad character and resynchronise.
    ///
    /// A variable-width loop skips [`VariableWidth::RESYNC`](crate::VariableWidth::RESYNC)
    /// code units (one by default); a fixed-width loop, or a fixed-width form
    /// seen through [`AsVariable`](crate::AsVariable), skips one full window. A truncated tail is replaced once, as a whole.
    Replace(V),
}

/// Configuration for the decode loops.
///
/// # Examples
///
/// ```rust
/// use cef::{DecodeOptions, MalformedInput};
///
/// let options = DecodeOptions {
///     malformed: MalformedInput::Replace(0xFFFD_u32),
/// };
/// assert_ne!(options, DecodeOptions::default());
/// ```
///
/// # Default
///
/// Strict: every malformed or truncated character is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeOptions<V> {
    /// Policy for characters that fail to decode.
    ///
    /// Contract violations (a form reporting an impossible consumed count, a
    /// misaligned fixed-width buffer) are never replaced.
    ///
    /// # Default
    ///
    /// [`MalformedInput::Fail`]
    pub malformed: MalformedInput<V>,
}

// Hand-written so that `V` needs no `Default` bound.
impl<V> Default for MalformedInput<V> {
    fn default() -> Self {
        Self::Fail
    }
}

impl<V> Default for DecodeOptions<V> {
    fn default() -> Self {
        Self {
            malformed: MalformedInput::Fail,
        }
    }
}

impl<V: Copy> DecodeOptions<V> {
    /// Options that substitute `value` for undecodable characters.
    #[must_use]
    pub const fn replacing(value: V) -> Self {
        Self {
            malformed: MalformedInput::Replace(value),
        }
    }

    pub(crate) fn replacement(&self) -> Option<V> {
        match self.malformed {
            MalformedInput::Fail => None,
            MalformedInput::Replace(value) => Some(value),
        }
    }
}
