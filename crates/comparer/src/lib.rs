//! API comparer for surrogate
//!
//! Structural interface-compatibility checks between a surrogate's type
//! definition and a candidate real implementation:
//! - MethodDescriptor: per-method presence, origin, api flag and signatures
//! - ApiComparer: enumerates and classifies every public, non-helper method
//! - ComparisonResult: missing/extra/mismatched sets and the verdict
//!
//! # Example
//!
//! ```
//! use surrogate_comparer::{ApiComparer, ComparerOptions};
//! use surrogate_core::TypeDefinition;
//!
//! let mock = TypeDefinition::builder("MockUser")
//!     .class_method("find", "id")
//!     .instance_method("name", "")
//!     .build()?;
//! let real = TypeDefinition::builder("User")
//!     .class_method("find", "user_id")
//!     .instance_method("name", "")
//!     .instance_method("email", "")
//!     .build()?;
//!
//! let result = ApiComparer::new(&mock, &real, ComparerOptions::new())?.compare();
//! assert!(!result.substitutable);
//! assert!(result.is_substitutable(true));
//! # Ok::<(), surrogate_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comparer;
pub mod descriptor;

pub use comparer::{names, ApiComparer, ComparerOptions, ComparisonResult};
pub use descriptor::MethodDescriptor;
