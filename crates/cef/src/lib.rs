//! Generic decoding over character encoding forms.
//!
//! An *encoding form* maps sequences of code units (bytes, 16-bit words, …)
//! to code points. This crate defines the contract such a form implements,
//! in a fixed-width ([`FixedWidth`]) and a variable-width ([`VariableWidth`])
//! flavour, and the generic loops that decode a whole buffer with any form
//! chosen at compile time:
//!
//! - [`FixedWidthDecoder`] checks once that the buffer holds a whole number of
//!   characters, then steps through it window by window.
//! - [`VariableWidthDecoder`] decodes at the cursor and advances by the count
//!   the form reports until the cursor lands exactly on the end.
//! - [`StreamingDecoder`] does the same for input that arrives in chunks.
//! - [`FormRegistry`] picks a form by name at run time.
//!
//! Malformed and truncated input is reported as a [`DecodeError`] carrying the
//! offending offset, unless [`DecodeOptions`] ask for a replacement value.
//!
//! No concrete encoding ships with the crate; the `testing` feature exposes a
//! few toy forms.

#![no_std]
#![forbid(unsafe_code)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod dynamic;
mod error;
mod fixed;
mod form;
mod options;
mod streaming;
mod variable;

#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use dynamic::{DynForm, FormRegistry, RegistryError, Static};
pub use error::{DecodeError, DecodeErrorKind};
pub use fixed::{FixedWidthDecoder, decode_all_fixed};
pub use form::{AsVariable, EncodingForm, FixedWidth, VariableWidth, decode_fixed, decode_variable};
pub use options::{DecodeOptions, MalformedInput};
pub use streaming::StreamingDecoder;
pub use variable::{Decoded, VariableWidthDecoder, decode_all_variable};
