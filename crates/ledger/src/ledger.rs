//! Per-instance invocation ledger
//!
//! Append-only: records are never removed, merged or deduplicated. The
//! ledger is owned by exactly one surrogate instance and lives and dies
//! with it; queries only ever read it.

use crate::record::InvocationRecord;
use rustc_hash::FxHashMap;
use surrogate_core::Arguments;
use tracing::trace;

/// Append-only store of every call made to one surrogate instance
#[derive(Debug, Clone, Default)]
pub struct InvocationLedger {
    records: Vec<InvocationRecord>,
    /// Positions in `records` per method name, in recorded order
    by_method: FxHashMap<String, Vec<usize>>,
}

impl InvocationLedger {
    /// An empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call, returning its sequence index
    pub fn record(&mut self, method_name: impl Into<String>, arguments: Arguments) -> u64 {
        let method_name = method_name.into();
        let position = self.records.len();
        let sequence_index = position as u64;
        trace!(
            method = %method_name,
            sequence_index,
            arity = arguments.len(),
            "recorded invocation"
        );
        self.by_method
            .entry(method_name.clone())
            .or_default()
            .push(position);
        self.records
            .push(InvocationRecord::new(method_name, arguments, sequence_index));
        sequence_index
    }

    /// Every record for `method_name`, in recorded order
    ///
    /// The returned view can be cloned and iterated again; calling `all`
    /// twice yields the same sequence.
    pub fn all(&self, method_name: &str) -> Invocations<'_> {
        let positions = self
            .by_method
            .get(method_name)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        Invocations {
            records: &self.records,
            positions: positions.iter(),
        }
    }

    /// Number of calls to `method_name`
    pub fn count(&self, method_name: &str) -> usize {
        self.by_method.get(method_name).map_or(0, Vec::len)
    }

    /// Number of calls to `method_name` whose arguments equal `expected`
    pub fn count_with(&self, method_name: &str, expected: &Arguments) -> usize {
        self.all(method_name)
            .filter(|record| record.arguments_eq(expected))
            .count()
    }

    /// True if `method_name` was called at least once
    pub fn was_invoked(&self, method_name: &str) -> bool {
        self.count(method_name) > 0
    }

    /// Argument tuples of every call to `method_name`, in recorded order
    pub fn arguments_of(&self, method_name: &str) -> Vec<Arguments> {
        self.all(method_name)
            .map(|record| record.arguments().clone())
            .collect()
    }

    /// Every record across all methods, in recorded order
    pub fn iter(&self) -> std::slice::Iter<'_, InvocationRecord> {
        self.records.iter()
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Records for one method name, in recorded order
#[derive(Debug, Clone)]
pub struct Invocations<'a> {
    records: &'a [InvocationRecord],
    positions: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for Invocations<'a> {
    type Item = &'a InvocationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|&i| &self.records[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl ExactSizeIterator for Invocations<'_> {}

impl DoubleEndedIterator for Invocations<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.positions.next_back().map(|&i| &self.records[i])
    }
}
