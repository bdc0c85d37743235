//! Failure messages for invocation queries
//!
//! The message is picked from the shape of the query: whether it expects
//! specific arguments, whether it expects an exact count, and its
//! polarity. Affirmative messages always say what was observed instead
//! (no calls at all, the argument tuples actually received, or the actual
//! count) so a failing test points straight at the discrepancy.

use crate::query::{Evaluation, Polarity};
use surrogate_core::Arguments;

/// How messages phrase the expected interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// "told to find" (commands)
    ToldTo,
    /// "asked for its name" (queries)
    AskedFor,
    /// "asked if admin" (predicates)
    AskedIf,
    /// "initialized with ..." (construction)
    InitializedWith,
}

impl Vocabulary {
    /// Method name recorded for construction
    pub const INITIALIZE: &'static str = "initialize";

    /// The interaction, e.g. "told to find"
    pub fn action(&self, method: &str) -> String {
        match self {
            Vocabulary::ToldTo => format!("told to {}", method),
            Vocabulary::AskedFor => format!("asked for its {}", method),
            Vocabulary::AskedIf => format!("asked if {}", method),
            Vocabulary::InitializedWith => "initialized".to_string(),
        }
    }

    /// Said when the method was never called
    pub fn never(&self) -> &'static str {
        match self {
            Vocabulary::ToldTo => "was never told to",
            Vocabulary::AskedFor | Vocabulary::AskedIf => "was never asked",
            Vocabulary::InitializedWith => "was never initialized",
        }
    }

    /// Said before an observed count, e.g. "was told to find"
    pub fn observed(&self, method: &str) -> String {
        match self {
            Vocabulary::AskedIf => "was asked".to_string(),
            other => format!("was {}", other.action(method)),
        }
    }
}

/// The eight message shapes: {args?} x {count?} x {polarity}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMessage {
    /// Affirmative, no arguments, no count
    ShouldDefault,
    /// Affirmative, with arguments
    ShouldWith,
    /// Affirmative, with count
    ShouldTimes,
    /// Affirmative, with arguments and count
    ShouldWithTimes,
    /// Negative, no arguments, no count
    ShouldNotDefault,
    /// Negative, with arguments
    ShouldNotWith,
    /// Negative, with count
    ShouldNotTimes,
    /// Negative, with arguments and count
    ShouldNotWithTimes,
}

impl FailureMessage {
    /// Pick the message for a query's shape
    pub fn select(with_arguments: bool, with_count: bool, polarity: Polarity) -> Self {
        use FailureMessage::*;
        match (polarity, with_arguments, with_count) {
            (Polarity::Affirmative, false, false) => ShouldDefault,
            (Polarity::Affirmative, true, false) => ShouldWith,
            (Polarity::Affirmative, false, true) => ShouldTimes,
            (Polarity::Affirmative, true, true) => ShouldWithTimes,
            (Polarity::Negative, false, false) => ShouldNotDefault,
            (Polarity::Negative, true, false) => ShouldNotWith,
            (Polarity::Negative, false, true) => ShouldNotTimes,
            (Polarity::Negative, true, true) => ShouldNotWithTimes,
        }
    }

    /// Render the message for `evaluation`
    pub fn render(&self, evaluation: &Evaluation) -> String {
        let query = evaluation.query();
        let words = query.vocabulary();
        let method = query.method_name();
        let action = words.action(method);
        let expected_args = query
            .expected_arguments()
            .map(ToString::to_string)
            .unwrap_or_default();
        let expected_times = times_msg(query.expected_count().unwrap_or(0));

        match self {
            FailureMessage::ShouldDefault => format!("was never {}", action),
            FailureMessage::ShouldWith => {
                let observed = if evaluation.times_invoked() == 0 {
                    words.never().to_string()
                } else {
                    format!("got {}", inspect_all(evaluation.invocations()))
                };
                format!("should have been {} with {}, but {}", action, expected_args, observed)
            }
            FailureMessage::ShouldTimes => format!(
                "should have been {} {}, but {} {}",
                action,
                expected_times,
                words.observed(method),
                times_msg(evaluation.times_invoked())
            ),
            FailureMessage::ShouldWithTimes => {
                let observed = if evaluation.times_invoked() == 0 {
                    words.never().to_string()
                } else {
                    format!(
                        "{} {}",
                        words.observed(method),
                        times_msg(evaluation.times_matched())
                    )
                };
                format!(
                    "should have been {} {} with {}, but {}",
                    action, expected_times, expected_args, observed
                )
            }
            FailureMessage::ShouldNotDefault => format!(
                "shouldn't have been {}, but {} {}",
                action,
                words.observed(method),
                times_msg(evaluation.times_invoked())
            ),
            FailureMessage::ShouldNotWith => {
                format!("should not have been {} with {}", action, expected_args)
            }
            FailureMessage::ShouldNotTimes => {
                format!("shouldn't have been {} {}, but was", action, expected_times)
            }
            FailureMessage::ShouldNotWithTimes => {
                let observed = if evaluation.times_matched() == 0 {
                    words.never().to_string()
                } else {
                    format!(
                        "{} {}",
                        words.observed(method),
                        times_msg(evaluation.times_matched())
                    )
                };
                format!(
                    "should not have been {} {} with {}, but {}",
                    action, expected_times, expected_args, observed
                )
            }
        }
    }
}

/// "1 time", "3 times"
pub fn times_msg(n: usize) -> String {
    if n == 1 {
        "1 time".to_string()
    } else {
        format!("{} times", n)
    }
}

fn inspect_all(invocations: &[Arguments]) -> String {
    invocations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InvocationLedger, InvocationQuery};
    use surrogate_core::args;

    fn ledger() -> InvocationLedger {
        let mut ledger = InvocationLedger::new();
        ledger.record("find", args![12]);
        ledger.record("find", args![12]);
        ledger.record("find", args![23]);
        ledger
    }

    fn message(query: InvocationQuery, ledger: &InvocationLedger) -> String {
        query
            .evaluate(ledger)
            .failure_message()
            .expect("query should fail")
    }

    #[test]
    fn test_select_covers_cross_product() {
        use FailureMessage::*;
        let a = Polarity::Affirmative;
        let n = Polarity::Negative;
        assert_eq!(FailureMessage::select(false, false, a), ShouldDefault);
        assert_eq!(FailureMessage::select(true, false, a), ShouldWith);
        assert_eq!(FailureMessage::select(false, true, a), ShouldTimes);
        assert_eq!(FailureMessage::select(true, true, a), ShouldWithTimes);
        assert_eq!(FailureMessage::select(false, false, n), ShouldNotDefault);
        assert_eq!(FailureMessage::select(true, false, n), ShouldNotWith);
        assert_eq!(FailureMessage::select(false, true, n), ShouldNotTimes);
        assert_eq!(FailureMessage::select(true, true, n), ShouldNotWithTimes);
    }

    #[test]
    fn test_should_default() {
        assert_eq!(
            message(InvocationQuery::told_to("name"), &ledger()),
            "was never told to name"
        );
        assert_eq!(
            message(InvocationQuery::asked_for("name"), &ledger()),
            "was never asked for its name"
        );
        assert_eq!(
            message(InvocationQuery::asked_if("admin?"), &ledger()),
            "was never asked if admin?"
        );
    }

    #[test]
    fn test_should_with_lists_observed_arguments() {
        assert_eq!(
            message(InvocationQuery::told_to("find").with(args![123123123]), &ledger()),
            "should have been told to find with `123123123', but got `12', `12', `23'"
        );
    }

    #[test]
    fn test_should_with_never_called() {
        assert_eq!(
            message(InvocationQuery::told_to("add_phone_number").with(args!["123", "456-7890"]), &ledger()),
            "should have been told to add_phone_number with `\"123\", \"456-7890\"', but was never told to"
        );
    }

    #[test]
    fn test_should_times_reports_actual_count() {
        assert_eq!(
            message(InvocationQuery::told_to("find").times(2), &ledger()),
            "should have been told to find 2 times, but was told to find 3 times"
        );
        assert_eq!(
            message(InvocationQuery::asked_if("admin?").times(1), &ledger()),
            "should have been asked if admin? 1 time, but was asked 0 times"
        );
    }

    #[test]
    fn test_should_with_times() {
        assert_eq!(
            message(InvocationQuery::told_to("find").with(args![23]).times(2), &ledger()),
            "should have been told to find 2 times with `23', but was told to find 1 time"
        );
        assert_eq!(
            message(
                InvocationQuery::told_to("id").with(args![]).times(1),
                &ledger()
            ),
            "should have been told to id 1 time with `no args', but was never told to"
        );
    }

    #[test]
    fn test_should_not_default() {
        assert_eq!(
            message(InvocationQuery::told_to("find").negate(), &ledger()),
            "shouldn't have been told to find, but was told to find 3 times"
        );
    }

    #[test]
    fn test_should_not_with() {
        assert_eq!(
            message(InvocationQuery::told_to("find").with(args![12]).negate(), &ledger()),
            "should not have been told to find with `12'"
        );
    }

    #[test]
    fn test_should_not_times() {
        assert_eq!(
            message(InvocationQuery::told_to("find").times(3).negate(), &ledger()),
            "shouldn't have been told to find 3 times, but was"
        );
    }

    #[test]
    fn test_should_not_with_times() {
        assert_eq!(
            message(InvocationQuery::told_to("find").with(args![12]).times(2).negate(), &ledger()),
            "should not have been told to find 2 times with `12', but was told to find 2 times"
        );
        assert_eq!(
            message(InvocationQuery::told_to("find").with(args![99]).times(0).negate(), &ledger()),
            "should not have been told to find 0 times with `99', but was never told to"
        );
    }

    #[test]
    fn test_initialized_with_message() {
        let mut ledger = InvocationLedger::new();
        assert_eq!(
            message(InvocationQuery::initialized_with(args![123]), &ledger),
            "should have been initialized with `123', but was never initialized"
        );
        ledger.record("initialize", args![1]);
        assert_eq!(
            message(InvocationQuery::initialized_with(args![123]), &ledger),
            "should have been initialized with `123', but got `1'"
        );
    }

    #[test]
    fn test_times_msg() {
        assert_eq!(times_msg(0), "0 times");
        assert_eq!(times_msg(1), "1 time");
        assert_eq!(times_msg(2), "2 times");
    }
}
