//! Behavior dispatch
//!
//! Each surrogate method resolves its return value from, in order:
//! 1. an override set on the receiver (constant, queue or scripted failure)
//! 2. the method's default behavior
//! 3. the receiver's attribute of the same name, or `Null`
//!
//! The ledger only observes. Every dispatch is recorded before any of the
//! steps above run, so a call that ends in an error is still on record.

use crate::method::MethodSpec;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use surrogate_core::{Arguments, Error, Result, Value};
use surrogate_ledger::InvocationLedger;
use tracing::{debug, warn};

/// Per-receiver state readable and writable by default behaviors
pub type Attributes = FxHashMap<String, Value>;

/// A method's default behavior
pub type DefaultFn = Arc<dyn Fn(&mut Attributes, &Arguments) -> Value + Send + Sync>;

/// What a value source produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A value to return
    Value(Value),
    /// The source has nothing left to give
    Exhausted,
}

/// A behavior set on one receiver that takes precedence over the default
#[derive(Debug, Clone, PartialEq)]
pub enum Override {
    /// Return the same value on every call
    Constant(Value),
    /// Return queued values in order, then run dry
    Queue(VecDeque<Value>),
    /// Fail every call with this message
    Fail(String),
}

impl Override {
    /// Produce the next outcome for a call to `method`
    ///
    /// # Errors
    ///
    /// `ScriptedFailure` for [`Override::Fail`].
    pub fn next(&mut self, method: &str) -> Result<Outcome> {
        match self {
            Override::Constant(value) => Ok(Outcome::Value(value.clone())),
            Override::Queue(queue) => Ok(queue.pop_front().map_or(Outcome::Exhausted, Outcome::Value)),
            Override::Fail(message) => Err(Error::ScriptedFailure {
                method: method.to_string(),
                message: message.clone(),
            }),
        }
    }
}

/// Ledger, overrides and attributes of one receiver (a class or an instance)
#[derive(Default)]
pub(crate) struct Receiver {
    pub(crate) ledger: InvocationLedger,
    pub(crate) overrides: FxHashMap<String, Override>,
    pub(crate) attributes: Attributes,
}

impl Receiver {
    /// Record the call, then resolve its behavior
    pub(crate) fn dispatch(&mut self, spec: &MethodSpec, arguments: Arguments) -> Result<Value> {
        self.ledger.record(spec.name(), arguments.clone());

        if let Some(behavior) = self.overrides.get_mut(spec.name()) {
            return match behavior.next(spec.name()) {
                Ok(Outcome::Value(value)) => {
                    debug!(method = spec.name(), "resolved from override");
                    Ok(value)
                }
                Ok(Outcome::Exhausted) => {
                    warn!(method = spec.name(), "override queue exhausted");
                    Err(Error::DefaultsExhausted {
                        method: spec.name().to_string(),
                    })
                }
                Err(e) => {
                    debug!(method = spec.name(), "scripted failure");
                    Err(e)
                }
            };
        }

        Ok(self.run_default(spec, &arguments))
    }

    pub(crate) fn run_default(&mut self, spec: &MethodSpec, arguments: &Arguments) -> Value {
        match spec.default() {
            Some(default) => {
                debug!(method = spec.name(), "resolved from default");
                default(&mut self.attributes, arguments)
            }
            None => self
                .attributes
                .get(spec.name())
                .cloned()
                .unwrap_or(Value::Null),
        }
    }
}

impl fmt::Debug for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("invocations", &self.ledger.len())
            .field("overrides", &self.overrides)
            .field("attributes", &self.attributes)
            .finish()
    }
}
