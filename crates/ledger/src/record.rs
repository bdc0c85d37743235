//! Invocation records

use surrogate_core::{Arguments, Value};

/// One recorded call to a surrogate
///
/// Immutable once created; only [`InvocationLedger`](crate::InvocationLedger)
/// constructs records.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRecord {
    method_name: String,
    arguments: Arguments,
    sequence_index: u64,
}

impl InvocationRecord {
    pub(crate) fn new(method_name: String, arguments: Arguments, sequence_index: u64) -> Self {
        InvocationRecord {
            method_name,
            arguments,
            sequence_index,
        }
    }

    /// Name of the method that was called
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Arguments exactly as passed
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Position of this call among all calls recorded by the same ledger
    pub fn sequence_index(&self) -> u64 {
        self.sequence_index
    }

    /// Deep equality of this record's arguments with `expected`
    pub fn arguments_eq(&self, expected: &Arguments) -> bool {
        self.arguments == *expected
    }

    /// First argument, if any
    pub fn first_argument(&self) -> Option<&Value> {
        self.arguments.get(0)
    }
}
