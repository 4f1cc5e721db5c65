//! Forms chosen at run time.
//!
//! The static traits are the primary interface. When the form is only known
//! once the program runs (a name read from a header, a configuration value),
//! forms can be boxed behind [`DynForm`] and looked up in a
//! [`FormRegistry`].

use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};
use core::marker::PhantomData;

use thiserror::Error;

use crate::{
    error::{DecodeError, DecodeErrorKind},
    form::{VariableWidth, decode_variable},
};

/// Object-safe view of a variable-width form.
pub trait DynForm<U, V>: Send + Sync {
    /// Name the form is registered under.
    fn name(&self) -> &str;

    /// Decode the character at the start of `units`, returning its value and
    /// consumed count.
    ///
    /// `units` is never empty. The count must be non-zero and no larger than
    /// `units.len()`; [`FormRegistry::decode_all`] rejects any other count.
    ///
    /// # Errors
    ///
    /// Whatever the underlying form reports, plus the contract violations of
    /// [`decode_variable`].
    fn decode_one(&self, units: &[U]) -> Result<(V, usize), DecodeErrorKind>;
}

/// Adapts a statically dispatched [`VariableWidth`] form to [`DynForm`].
pub struct Static<F> {
    name: String,
    _form: PhantomData<fn() -> F>,
}

impl<F> Static<F> {
    /// Wrap the form `F` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _form: PhantomData,
        }
    }
}

impl<F> DynForm<F::CodeUnit, F::NonnegativeInteger> for Static<F>
where
    F: VariableWidth,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn decode_one(
        &self,
        units: &[F::CodeUnit],
    ) -> Result<(F::NonnegativeInteger, usize), DecodeErrorKind> {
        decode_variable::<F>(units)
    }
}

/// Errors raised by [`FormRegistry::decode_all`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No form is registered under this name.
    #[error("unknown encoding form '{0}'")]
    UnknownForm(String),
    /// The form was found but the input did not decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Named collection of forms sharing a code unit and value type.
pub struct FormRegistry<U, V> {
    forms: BTreeMap<String, Box<dyn DynForm<U, V>>>,
}

impl<U, V> Default for FormRegistry<U, V> {
    fn default() -> Self {
        Self {
            forms: BTreeMap::new(),
        }
    }
}

impl<U, V> core::fmt::Debug for FormRegistry<U, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.forms.keys()).finish()
    }
}

impl<U, V> FormRegistry<U, V> {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `form` under its own name, replacing any previous entry.
    /// Returns the replaced form.
    pub fn register(&mut self, form: Box<dyn DynForm<U, V>>) -> Option<Box<dyn DynForm<U, V>>> {
        self.forms.insert(String::from(form.name()), form)
    }

    /// Look up a form by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn DynForm<U, V>> {
        self.forms.get(name).map(|form| &**form)
    }

    /// Registered names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    /// Decode all of `units` with the form registered under `name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownForm`] if `name` is not registered, otherwise
    /// the first decode error, including [`DecodeErrorKind::ZeroLengthSequence`]
    /// and [`DecodeErrorKind::Overrun`] for a form reporting an impossible
    /// consumed count.
    pub fn decode_all(&self, name: &str, units: &[U]) -> Result<Vec<V>, RegistryError> {
        let form = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownForm(String::from(name)))?;

        let mut values = Vec::new();
        let mut position = 0;
        while position != units.len() {
            let available = units.len() - position;
            let (value, consumed) = form
                .decode_one(&units[position..])
                .map_err(|kind| kind.at(position))?;
            if consumed == 0 {
                return Err(DecodeErrorKind::ZeroLengthSequence.at(position).into());
            }
            if consumed > available {
                return Err(DecodeErrorKind::Overrun {
                    consumed,
                    available,
                }
                .at(position)
                .into());
            }
            values.push(value);
            position += consumed;
        }
        Ok(values)
    }
}
