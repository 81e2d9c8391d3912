//! Populate configuration structs in place from environment variables.
//!
//! ```rust,no_run
//! use env_populate::Populate;
//!
//! #[derive(Debug, Default, Populate)]
//! struct Config {
//!     #[field(env = "ENV")]
//!     env: String,
//!     server: Server,
//! }
//!
//! #[derive(Debug, Default, Populate)]
//! struct Server {
//!     #[field(env = "PORT")]
//!     port: i32,
//!     #[field(env = "DEBUG")]
//!     debug: bool,
//! }
//!
//! let mut config = Config::default();
//! config.populate(true)?;
//! # Ok::<(), env_populate::PopulateError>(())
//! ```
//!
//! Fields are visited depth-first in declaration order and the first failure
//! stops the walk. Fields already assigned keep their new values.

extern crate self as env_populate;

#[macro_use]
mod macros;

pub mod docs;
pub mod environment;
pub mod error;
pub mod fetch;
pub mod field;

// Re-export main types
pub use docs::{EnvVarDoc, env_vars, render_docs, write_docs};
pub use environment::{Lookup, ProcessEnv};
pub use error::{InvalidBool, ParseFailure, PopulateError};
pub use field::{EnvField, FieldDescriptor, FieldKind};

// Re-export macro
pub use env_populate_macros::Populate;

/// A struct whose annotated fields can be filled from environment variables.
///
/// Normally implemented with `#[derive(Populate)]`.
pub trait Populate {
    /// Populate from `env`.
    ///
    /// With `require_value_present`, an absent or blank variable is a
    /// [`PopulateError::Missing`] error. Without it the value is read as the
    /// empty string, which string fields accept and integer or boolean
    /// fields reject with [`PopulateError::Parse`].
    fn populate_from(
        &mut self,
        env: &dyn Lookup,
        require_value_present: bool,
    ) -> Result<(), PopulateError>;

    /// Populate from the process environment
    fn populate(&mut self, require_value_present: bool) -> Result<(), PopulateError> {
        self.populate_from(&ProcessEnv, require_value_present)
    }

    /// Field table of this type, in declaration order
    fn fields() -> Vec<FieldDescriptor>
    where
        Self: Sized;
}

impl<T: Populate> Populate for &mut T {
    fn populate_from(
        &mut self,
        env: &dyn Lookup,
        require_value_present: bool,
    ) -> Result<(), PopulateError> {
        (**self).populate_from(env, require_value_present)
    }

    fn fields() -> Vec<FieldDescriptor> {
        T::fields()
    }
}

impl<T: Populate> Populate for Box<T> {
    fn populate_from(
        &mut self,
        env: &dyn Lookup,
        require_value_present: bool,
    ) -> Result<(), PopulateError> {
        (**self).populate_from(env, require_value_present)
    }

    fn fields() -> Vec<FieldDescriptor> {
        T::fields()
    }
}

/// Populate `target` from the process environment
pub fn populate<T: Populate + ?Sized>(
    target: &mut T,
    require_value_present: bool,
) -> Result<(), PopulateError> {
    target.populate(require_value_present)
}
