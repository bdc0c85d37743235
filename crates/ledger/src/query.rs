//! Invocation queries
//!
//! An [`InvocationQuery`] states an expectation about one method of a
//! surrogate: that it was called, optionally with specific arguments,
//! optionally an exact number of times, or (with negative polarity) that
//! it was not. Evaluating the query against a ledger yields an
//! [`Evaluation`], plain data that any assertion layer can turn into a
//! pass or a failure carrying the rendered message.
//!
//! ## Matching rules
//!
//! | arguments | count | matched when                                  |
//! |-----------|-------|-----------------------------------------------|
//! | -         | -     | at least one call                             |
//! | set       | -     | at least one call with equal arguments        |
//! | -         | N     | exactly N calls                               |
//! | set       | N     | exactly N calls with equal arguments          |
//!
//! Negative polarity inverts pass/fail only. Counts and observed argument
//! tuples are computed the same way, so diagnostics always describe what
//! actually happened.

use crate::ledger::InvocationLedger;
use crate::message::{FailureMessage, Vocabulary};
use surrogate_core::Arguments;
use tracing::debug;

/// Whether the query expects its condition to hold or not to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// The condition must hold
    Affirmative,
    /// The condition must not hold
    Negative,
}

/// An expectation over one method's recorded calls
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationQuery {
    method_name: String,
    expected_arguments: Option<Arguments>,
    expected_count: Option<usize>,
    polarity: Polarity,
    vocabulary: Vocabulary,
}

impl InvocationQuery {
    /// Affirmative query about `method_name`, phrased as "told to"
    pub fn new(method_name: impl Into<String>) -> Self {
        InvocationQuery {
            method_name: method_name.into(),
            expected_arguments: None,
            expected_count: None,
            polarity: Polarity::Affirmative,
            vocabulary: Vocabulary::ToldTo,
        }
    }

    /// "has been told to `method_name`" (commands)
    pub fn told_to(method_name: impl Into<String>) -> Self {
        Self::new(method_name)
    }

    /// "has been asked for its `method_name`" (queries)
    pub fn asked_for(method_name: impl Into<String>) -> Self {
        Self::new(method_name).phrased_as(Vocabulary::AskedFor)
    }

    /// "has been asked if `method_name`" (predicates)
    pub fn asked_if(method_name: impl Into<String>) -> Self {
        Self::new(method_name).phrased_as(Vocabulary::AskedIf)
    }

    /// "has been initialized with `arguments`"
    pub fn initialized_with(arguments: Arguments) -> Self {
        Self::new(Vocabulary::INITIALIZE)
            .phrased_as(Vocabulary::InitializedWith)
            .with(arguments)
    }

    /// Expect calls with exactly these arguments
    pub fn with(mut self, arguments: Arguments) -> Self {
        self.expected_arguments = Some(arguments);
        self
    }

    /// Expect exactly `count` matching calls
    pub fn times(mut self, count: usize) -> Self {
        self.expected_count = Some(count);
        self
    }

    /// Flip the polarity
    pub fn negate(mut self) -> Self {
        self.polarity = match self.polarity {
            Polarity::Affirmative => Polarity::Negative,
            Polarity::Negative => Polarity::Affirmative,
        };
        self
    }

    /// Change how failure messages phrase the expectation
    pub fn phrased_as(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Method the query is about
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Expected argument tuple, if any
    pub fn expected_arguments(&self) -> Option<&Arguments> {
        self.expected_arguments.as_ref()
    }

    /// Expected exact count, if any
    pub fn expected_count(&self) -> Option<usize> {
        self.expected_count
    }

    /// Polarity
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Phrasing used by failure messages
    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    /// Evaluate against `ledger`
    pub fn evaluate(&self, ledger: &InvocationLedger) -> Evaluation {
        let invocations = ledger.arguments_of(&self.method_name);
        let times_invoked = invocations.len();
        let times_matched = match &self.expected_arguments {
            Some(expected) => invocations.iter().filter(|args| *args == expected).count(),
            None => times_invoked,
        };

        let matched = match (&self.expected_arguments, self.expected_count) {
            (None, None) => times_invoked > 0,
            (Some(_), None) => times_matched > 0,
            (_, Some(expected)) => times_matched == expected,
        };

        debug!(
            method = %self.method_name,
            matched,
            polarity = ?self.polarity,
            times_invoked,
            times_matched,
            "evaluated invocation query"
        );

        Evaluation {
            query: self.clone(),
            matched,
            times_invoked,
            times_matched,
            invocations,
        }
    }
}

/// Outcome of evaluating a query against a ledger
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    query: InvocationQuery,
    matched: bool,
    times_invoked: usize,
    times_matched: usize,
    invocations: Vec<Arguments>,
}

impl Evaluation {
    /// The evaluated query
    pub fn query(&self) -> &InvocationQuery {
        &self.query
    }

    /// Whether the query's condition held, ignoring polarity
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Whether the expectation is met, taking polarity into account
    pub fn passed(&self) -> bool {
        match self.query.polarity {
            Polarity::Affirmative => self.matched,
            Polarity::Negative => !self.matched,
        }
    }

    /// Calls to the method, regardless of arguments
    pub fn times_invoked(&self) -> usize {
        self.times_invoked
    }

    /// Calls to the method whose arguments equal the expected ones
    /// (all calls when no arguments are expected)
    pub fn times_matched(&self) -> usize {
        self.times_matched
    }

    /// Observed argument tuples, in recorded order
    pub fn invocations(&self) -> &[Arguments] {
        &self.invocations
    }

    /// Which failure message applies to this query's shape
    pub fn failure_kind(&self) -> FailureMessage {
        FailureMessage::select(
            self.query.expected_arguments.is_some(),
            self.query.expected_count.is_some(),
            self.query.polarity,
        )
    }

    /// The rendered failure message, or `None` when the expectation is met
    pub fn failure_message(&self) -> Option<String> {
        if self.passed() {
            None
        } else {
            Some(self.failure_kind().render(self))
        }
    }
}
