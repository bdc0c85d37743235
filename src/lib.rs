//! Surrogate - test doubles that stay honest
//!
//! Surrogate lets a test define a stand-in type with scripted default
//! behaviors, records every call made to it, and afterwards answers two
//! questions: was the stand-in asked the right things, and does a real
//! implementation actually expose the interface the stand-in promises.
//!
//! # Quick Start
//!
//! ```
//! use surrogate::{args, ApiComparer, ComparerOptions, InvocationQuery, SurrogateClass, TypeDefinition, Value};
//!
//! let mut users = SurrogateClass::endow("MockUser")
//!     .define_class_method("find", "id")
//!     .define("name", "")
//!     .default(|_, _| Value::from("Josh"))
//!     .build()?;
//!
//! users.invoke("find", args![12])?;
//! assert!(users.evaluate(&InvocationQuery::told_to("find").with(args![12])).passed());
//!
//! let real = TypeDefinition::builder("User")
//!     .class_method("find", "id")
//!     .instance_method("name", "")
//!     .build()?;
//! let options = ComparerOptions::new().with_helpers(users.helpers());
//! let result = ApiComparer::new(&users.type_definition(), &real, options)?.compare();
//! assert!(result.substitutable);
//! # Ok::<(), surrogate::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `surrogate-core`: values, parameter signatures, type definitions, config, errors
//! - `surrogate-ledger`: invocation ledger, queries and failure messages
//! - `surrogate-comparer`: method descriptors and substitutability verdicts
//! - `surrogate-double`: surrogate classes and instances with behavior dispatch

pub use surrogate_comparer::*;
pub use surrogate_core::*;
pub use surrogate_double::*;
pub use surrogate_ledger::*;
