//! Invocation ledger and matcher for surrogate
//!
//! This crate records every call made to a surrogate instance and answers
//! "was this surrogate asked the right things" after the fact:
//! - InvocationLedger: append-only, per-instance store of InvocationRecords
//! - InvocationQuery: method + optional arguments + optional exact count + polarity
//! - Evaluation: the plain-data outcome an assertion layer reports from
//! - FailureMessage / Vocabulary: diagnostic rendering of failed queries
//!
//! # Example
//!
//! ```
//! use surrogate_core::args;
//! use surrogate_ledger::{InvocationLedger, InvocationQuery};
//!
//! let mut ledger = InvocationLedger::new();
//! ledger.record("find", args![12]);
//! ledger.record("find", args![12]);
//! ledger.record("find", args![23]);
//!
//! assert!(InvocationQuery::told_to("find").times(3).evaluate(&ledger).passed());
//! assert!(InvocationQuery::told_to("find").with(args![12]).times(2).evaluate(&ledger).passed());
//!
//! let failed = InvocationQuery::told_to("find").with(args![9]).evaluate(&ledger);
//! assert_eq!(
//!     failed.failure_message().unwrap(),
//!     "should have been told to find with `9', but got `12', `12', `23'"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ledger;
pub mod message;
pub mod query;
pub mod record;

pub use ledger::{InvocationLedger, Invocations};
pub use message::{times_msg, FailureMessage, Vocabulary};
pub use query::{Evaluation, InvocationQuery, Polarity};
pub use record::InvocationRecord;
