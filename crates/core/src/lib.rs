//! Core types for surrogate
//!
//! This crate defines the foundational types shared by the ledger, the
//! comparer and the double machinery:
//! - Value / Arguments: argument values with deep equality and inspect rendering
//! - ParameterMode / ParameterSignature: normalized formal parameter lists
//! - TypeDefinition: explicit method descriptor tables with inheritance
//! - HelperRegistry: helper methods excluded from comparisons
//! - SurrogateConfig: `surrogate.toml` settings
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod helpers;
pub mod signature;
pub mod types;
pub mod value;

pub use config::{HelperConfig, SurrogateConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use helpers::HelperRegistry;
pub use signature::{FormalParameter, Parameter, ParameterMode, ParameterPrefix, ParameterSignature};
pub use types::{
    MethodDef, MethodKind, ResolvedMethod, Side, TypeDefinition, TypeDefinitionBuilder,
    TypeRegistry, Visibility,
};
pub use value::{Arguments, Value};
