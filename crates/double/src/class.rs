//! Surrogate classes
//!
//! A [`SurrogateClass`] is built once with [`SurrogateClass::endow`] and
//! then acts as the type-level receiver: class methods dispatch through
//! it and [`instantiate`](SurrogateClass::instantiate) hands out
//! [`Surrogate`] instances. The declarations are shared; ledgers,
//! overrides and attributes belong to each receiver.
//!
//! ```
//! use surrogate_core::{args, Value};
//! use surrogate_double::SurrogateClass;
//!
//! let mut users = SurrogateClass::endow("User")
//!     .define_class_method("find", "id")
//!     .define("name", "")
//!     .default(|_, _| Value::from("Josh"))
//!     .build()
//!     .unwrap();
//!
//! users.will("find", "user1").unwrap();
//! assert_eq!(users.invoke("find", args![1]).unwrap(), Value::from("user1"));
//!
//! let mut user = users.instantiate(args![1]);
//! assert_eq!(user.invoke("name", args![]).unwrap(), Value::from("Josh"));
//! ```

use crate::behavior::{Attributes, Override, Receiver};
use crate::instance::Surrogate;
use crate::method::MethodSpec;
use std::sync::Arc;
use surrogate_core::{
    Arguments, Error, HelperRegistry, MethodDef, MethodKind, ParameterMode, ParameterSignature,
    Result, TypeDefinition, Value,
};
use surrogate_ledger::{Evaluation, InvocationLedger, InvocationQuery};
use tracing::debug;

/// Prefix of the override setters published for every method
const WILL_PREFIX: &str = "will_";
/// Prefix of the override setters published for query-style methods
const WILL_HAVE_PREFIX: &str = "will_have_";
/// Ledger accessor published on both namespaces
const INVOCATIONS: &str = "invocations";

/// Declarations shared by a class and all its instances
#[derive(Debug)]
pub(crate) struct SurrogateDefinition {
    name: String,
    methods: Vec<MethodSpec>,
}

impl SurrogateDefinition {
    pub(crate) fn method(&self, name: &str, kind: MethodKind) -> Option<&MethodSpec> {
        self.methods
            .iter()
            .find(|m| m.kind() == kind && m.name() == name)
    }

    pub(crate) fn require(&self, name: &str, kind: MethodKind) -> Result<&MethodSpec> {
        self.method(name, kind).ok_or_else(|| Error::UnknownMethod {
            method: name.to_string(),
            kind,
        })
    }

    /// Methods the surrogate machinery adds on top of the declarations
    fn helper_methods(&self) -> Vec<(MethodKind, String, ParameterSignature)> {
        let setter = ParameterSignature::new().with("values", ParameterMode::Rest);
        let mut helpers = Vec::new();
        for spec in self.methods.iter().filter(|m| !m.is_initializer()) {
            for prefix in [WILL_PREFIX, WILL_HAVE_PREFIX] {
                helpers.push((
                    spec.kind(),
                    format!("{}{}", prefix, spec.name()),
                    setter.clone(),
                ));
            }
        }
        for kind in MethodKind::ALL {
            helpers.push((
                kind,
                INVOCATIONS.to_string(),
                ParameterSignature::new().with("method", ParameterMode::Required),
            ));
        }
        helpers
    }
}

/// Builder for [`SurrogateClass`]
///
/// Parameter lists use the textual form of
/// [`ParameterSignature::parse`]. Errors are collected and the first one is
/// reported by [`build`](Self::build).
#[derive(Debug)]
pub struct SurrogateClassBuilder {
    name: String,
    methods: Vec<MethodSpec>,
    error: Option<Error>,
}

impl SurrogateClassBuilder {
    fn declare(mut self, name: &str, kind: MethodKind, params: &str, api: bool) -> Self {
        match ParameterSignature::parse(params) {
            Ok(signature) => self
                .methods
                .push(MethodSpec::new(name, kind, signature, api, None)),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Declare a contract class method
    pub fn define_class_method(self, name: &str, params: &str) -> Self {
        self.declare(name, MethodKind::Class, params, true)
    }

    /// Declare a contract instance method
    pub fn define(self, name: &str, params: &str) -> Self {
        self.declare(name, MethodKind::Instance, params, true)
    }

    /// Declare an ordinary class method outside the contract
    pub fn def_class(self, name: &str, params: &str) -> Self {
        self.declare(name, MethodKind::Class, params, false)
    }

    /// Declare an ordinary instance method outside the contract
    pub fn def_instance(self, name: &str, params: &str) -> Self {
        self.declare(name, MethodKind::Instance, params, false)
    }

    /// Default behavior for the most recently declared method
    pub fn default<F>(mut self, behavior: F) -> Self
    where
        F: Fn(&mut Attributes, &Arguments) -> Value + Send + Sync + 'static,
    {
        match self.methods.last_mut() {
            Some(spec) => spec.set_default(Arc::new(behavior)),
            None => {
                self.error.get_or_insert(Error::invalid_target(format!(
                    "default behavior given before any method of `{}` was declared",
                    self.name
                )));
            }
        }
        self
    }

    /// Finish the class
    ///
    /// # Errors
    ///
    /// `MalformedParameter` for an unparsable parameter list, and
    /// `InvalidComparisonTarget` when the declarations do not form a valid
    /// type definition (for example a method declared twice).
    pub fn build(self) -> Result<SurrogateClass> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let definition = Arc::new(SurrogateDefinition {
            name: self.name,
            methods: self.methods,
        });
        let class = SurrogateClass::from_definition(definition);
        class.type_definition().validate()?;
        debug!(
            surrogate = %class.name(),
            methods = class.definition.methods.len(),
            "endowed surrogate class"
        );
        Ok(class)
    }
}

/// A surrogate type: the receiver of class methods and factory of instances
#[derive(Debug)]
pub struct SurrogateClass {
    definition: Arc<SurrogateDefinition>,
    receiver: Receiver,
}

impl SurrogateClass {
    /// Start declaring a surrogate named `name`
    pub fn endow(name: impl Into<String>) -> SurrogateClassBuilder {
        SurrogateClassBuilder {
            name: name.into(),
            methods: Vec::new(),
            error: None,
        }
    }

    fn from_definition(definition: Arc<SurrogateDefinition>) -> Self {
        SurrogateClass {
            definition,
            receiver: Receiver::default(),
        }
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Every declared method, in declaration order
    pub fn methods(&self) -> &[MethodSpec] {
        &self.definition.methods
    }

    /// Dispatch a class method
    ///
    /// The call is recorded before its behavior is resolved.
    ///
    /// # Errors
    ///
    /// `UnknownMethod` when no such class method is declared (nothing is
    /// recorded), `DefaultsExhausted` when a queued override ran dry and
    /// `ScriptedFailure` when a failure was scripted.
    pub fn invoke(&mut self, method: &str, arguments: Arguments) -> Result<Value> {
        let spec = self.definition.require(method, MethodKind::Class)?;
        self.receiver.dispatch(spec, arguments)
    }

    /// Return `value` from every call to `method`
    pub fn will(&mut self, method: &str, value: impl Into<Value>) -> Result<()> {
        self.set_override(method, Override::Constant(value.into()))
    }

    /// Return `values` in order from the next calls to `method`, then fail
    /// with `DefaultsExhausted`
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
        self.definition.require(method, MethodKind::Class)?;
        self.receiver.overrides.insert(method.to_string(), behavior);
        Ok(())
    }

    /// A new instance, initialized with `arguments`
    ///
    /// The instance's ledger starts with one `initialize` record and the
    /// `initialize` default, if declared, has already run.
    pub fn instantiate(&self, arguments: Arguments) -> Surrogate {
        Surrogate::initialize(Arc::clone(&self.definition), arguments)
    }

    /// A copy of this class with the same declarations, an empty ledger
    /// and no overrides
    pub fn fork(&self) -> SurrogateClass {
        SurrogateClass::from_definition(Arc::clone(&self.definition))
    }

    /// Calls made to class methods
    pub fn ledger(&self) -> &InvocationLedger {
        &self.receiver.ledger
    }

    /// Argument tuples of every call to `method`, in order
    pub fn invocations(&self, method: &str) -> Vec<Arguments> {
        self.receiver.ledger.arguments_of(method)
    }

    /// Evaluate `query` against the class ledger
    pub fn evaluate(&self, query: &InvocationQuery) -> Evaluation {
        query.evaluate(&self.receiver.ledger)
    }

    /// The class's public surface, helpers included
    ///
    /// Pair it with [`helpers`](Self::helpers) when comparing so the
    /// machinery's own methods are left out.
    pub fn type_definition(&self) -> TypeDefinition {
        let mut def = TypeDefinition::new(self.name());
        for spec in &self.definition.methods {
            def.add_method(spec.to_method_def());
        }
        for (kind, name, signature) in self.definition.helper_methods() {
            if def.declared(&name, kind).is_none() {
                def.add_method(MethodDef::public(name, kind, signature));
            }
        }
        def
    }

    /// Names of the methods the machinery adds to this class
    pub fn helpers(&self) -> HelperRegistry {
        let mut registry = HelperRegistry::new();
        for (kind, name, _) in self.definition.helper_methods() {
            if self.definition.method(&name, kind).is_none() {
                registry.register(kind, name);
            }
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrogate_core::args;
    use surrogate_ledger::InvocationQuery;

    static_assertions::assert_impl_all!(SurrogateClass: Send, Sync);
    static_assertions::assert_impl_all!(Surrogate: Send, Sync);

    fn user_class() -> SurrogateClass {
        SurrogateClass::endow("User")
            .define_class_method("find", "id")
            .default(|_, args| args.get(0).cloned().unwrap_or(Value::Null))
            .define("initialize", "id")
            .default(|attrs, args| {
                attrs.insert("id".to_string(), args.get(0).cloned().unwrap_or(Value::Null));
                Value::Null
            })
            .define("id", "")
            .define("name", "")
            .default(|_, _| Value::from("Josh"))
            .def_instance("helper", "")
            .build()
            .unwrap()
    }

    #[test]
    fn test_class_dispatch_uses_default() {
        let mut users = user_class();
        assert_eq!(users.invoke("find", args![12]).unwrap(), Value::Int(12));
        assert_eq!(users.invocations("find"), vec![args![12]]);
    }

    #[test]
    fn test_unknown_method_is_not_recorded() {
        let mut users = user_class();
        let err = users.invoke("destroy_all", args![]).unwrap_err();
        assert!(matches!(err, Error::UnknownMethod { kind: MethodKind::Class, .. }));
        assert!(users.ledger().is_empty());

        // instance methods are not class methods
        assert!(users.invoke("name", args![]).is_err());
        assert!(users.will("name", "Bill").is_err());
    }

    #[test]
    fn test_queue_then_exhausted() {
        let mut users = user_class();
        users.will_queue("find", ["user1", "user2"]).unwrap();
        assert_eq!(users.invoke("find", args![1]).unwrap(), Value::from("user1"));
        assert_eq!(users.invoke("find", args![2]).unwrap(), Value::from("user2"));
        let err = users.invoke("find", args![3]).unwrap_err();
        assert!(matches!(err, Error::DefaultsExhausted { ref method } if method == "find"));
        assert_eq!(users.ledger().count("find"), 3);
    }

    #[test]
    fn test_fork_has_fresh_state() {
        let mut users = user_class();
        users.will("find", "user1").unwrap();
        users.invoke("find", args![1]).unwrap();

        let mut fork = users.fork();
        assert!(fork.ledger().is_empty());
        assert_eq!(fork.invoke("find", args![5]).unwrap(), Value::Int(5));
        assert_eq!(users.ledger().len(), 1);
    }

    #[test]
    fn test_instantiate_records_initialize() {
        let users = user_class();
        let mut user = users.instantiate(args![123]);
        assert!(user
            .evaluate(&InvocationQuery::initialized_with(args![123]))
            .passed());
        assert_eq!(user.invoke("id", args![]).unwrap(), Value::Int(123));
    }

    #[test]
    fn test_type_definition_marks_api_and_hides_initialize() {
        let def = user_class().type_definition();
        assert!(def.declared("find", MethodKind::Class).unwrap().api);
        assert!(!def.declared("helper", MethodKind::Instance).unwrap().api);
        assert!(def.lookup_public("initialize", MethodKind::Instance).is_none());
        assert!(def.lookup_public("will_find", MethodKind::Class).is_some());
        assert!(def.lookup_public("will_have_name", MethodKind::Instance).is_some());
        assert!(def.lookup_public("will_initialize", MethodKind::Instance).is_none());
    }

    #[test]
    fn test_helpers_cover_generated_methods() {
        let helpers = user_class().helpers();
        assert!(helpers.is_helper(MethodKind::Class, "will_find"));
        assert!(helpers.is_helper(MethodKind::Class, "invocations"));
        assert!(helpers.is_helper(MethodKind::Instance, "will_have_id"));
        assert!(!helpers.is_helper(MethodKind::Instance, "helper"));
        assert!(!helpers.is_helper(MethodKind::Instance, "name"));
    }

    #[test]
    fn test_declared_invocations_method_is_not_a_helper() {
        let class = SurrogateClass::endow("Log")
            .define("invocations", "")
            .build()
            .unwrap();
        assert!(!class.helpers().is_helper(MethodKind::Instance, "invocations"));
        assert!(class.helpers().is_helper(MethodKind::Class, "invocations"));
    }

    #[test]
    fn test_build_errors() {
        let err = SurrogateClass::endow("User")
            .define("find", "a b")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MalformedParameter { .. }));

        let err = SurrogateClass::endow("User")
            .define("id", "")
            .define("id", "")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidComparisonTarget(_)));

        let err = SurrogateClass::endow("User")
            .default(|_, _| Value::Null)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidComparisonTarget(_)));
    }
}
