//! Surrogate classes and instances
//!
//! This crate turns declarations into objects that behave like the thing
//! they stand in for:
//! - SurrogateClass: declared once, dispatches class methods, makes instances
//! - Surrogate: one instance with its own ledger, overrides and attributes
//! - Override / Outcome: per-receiver behaviors and what they produce
//!
//! Every dispatch is recorded in the receiver's
//! [`InvocationLedger`](surrogate_ledger::InvocationLedger) before its
//! behavior is resolved. A surrogate also exports its public surface as a
//! [`TypeDefinition`](surrogate_core::TypeDefinition) along with the
//! [`HelperRegistry`](surrogate_core::HelperRegistry) of methods the
//! machinery adds, ready for substitutability checks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod behavior;
pub mod class;
pub mod instance;
pub mod method;

pub use behavior::{Attributes, DefaultFn, Outcome, Override};
pub use class::{SurrogateClass, SurrogateClassBuilder};
pub use instance::Surrogate;
pub use method::MethodSpec;
