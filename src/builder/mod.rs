//! Construction API: registration errors, the registrar, and macros.
//!
//! A machine's state tree is declared once, during construction, through
//! the [`Registrar`] handed to the description's setup routine. This
//! module also carries the registration-time error type and the
//! `state_id_enum!` declaration macro.

pub mod error;
pub mod macros;
pub mod registrar;

pub use error::BuildError;
pub use registrar::{Registrar, StateFactory};
