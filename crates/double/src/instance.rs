//! Surrogate instances

use crate::behavior::{Override, Receiver};
use crate::class::SurrogateDefinition;
use std::sync::Arc;
use surrogate_core::{Arguments, MethodKind, Result, Value};
use surrogate_ledger::{Evaluation, InvocationLedger, InvocationQuery, Vocabulary};

/// One instance of a [`SurrogateClass`](crate::SurrogateClass)
///
/// Owns its ledger exclusively; nothing is shared with the class or with
/// sibling instances except the declarations.
#[derive(Debug)]
pub struct Surrogate {
    definition: Arc<SurrogateDefinition>,
    receiver: Receiver,
}

impl Surrogate {
    pub(crate) fn initialize(definition: Arc<SurrogateDefinition>, arguments: Arguments) -> Self {
        let mut surrogate = Surrogate {
            definition,
            receiver: Receiver::default(),
        };
        let receiver = &mut surrogate.receiver;
        match surrogate
            .definition
            .method(Vocabulary::INITIALIZE, MethodKind::Instance)
        {
            Some(spec) => {
                receiver.ledger.record(spec.name(), arguments.clone());
                receiver.run_default(spec, &arguments);
            }
            None => {
                receiver.ledger.record(Vocabulary::INITIALIZE, arguments);
            }
        }
        surrogate
    }

    /// Dispatch an instance method
    ///
    /// The call is recorded before its behavior is resolved.
    ///
    /// # Errors
    ///
    /// `UnknownMethod` when no such instance method is declared (nothing
    /// is recorded), `DefaultsExhausted` when a queued override ran dry and
    /// `ScriptedFailure` when a failure was scripted.
    pub fn invoke(&mut self, method: &str, arguments: Arguments) -> Result<Value> {
        let spec = self.definition.require(method, MethodKind::Instance)?;
        self.receiver.dispatch(spec, arguments)
    }

    /// Return `value` from every call to `method`
    pub fn will(&mut self, method: &str, value: impl Into<Value>) -> Result<()> {
        self.set_override(method, Override::Constant(value.into()))
    }

    /// Return `values` in order from the next calls to `method`
    pub fn will_queue<I>(&mut self, method: &str, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let queue = values.into_iter().map(Into::into).collect();
        self.set_override(method, Override::Queue(queue))
    }

    /// Fail every call to `method` with `message`
    pub fn will_fail(&mut self, method: &str, message: impl Into<String>) -> Result<()> {
        self.set_override(method, Override::Fail(message.into()))
    }

    fn set_override(&mut self, method: &str, behavior: Override) -> Result<()> {
        self.definition.require(method, MethodKind::Instance)?;
        self.receiver.overrides.insert(method.to_string(), behavior);
        Ok(())
    }

    /// Attribute set by a default behavior
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.receiver.attributes.get(name)
    }

    /// Calls made to this instance, `initialize` first
    pub fn ledger(&self) -> &InvocationLedger {
        &self.receiver.ledger
    }

    /// Argument tuples of every call to `method`, in order
    pub fn invocations(&self, method: &str) -> Vec<Arguments> {
        self.receiver.ledger.arguments_of(method)
    }

    /// Evaluate `query` against this instance's ledger
    pub fn evaluate(&self, query: &InvocationQuery) -> Evaluation {
        query.evaluate(&self.receiver.ledger)
    }
}
