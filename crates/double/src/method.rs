//! Method declarations on a surrogate

use crate::behavior::DefaultFn;
use std::fmt;
use surrogate_core::{MethodDef, MethodKind, ParameterSignature, Visibility};

/// One method a surrogate class declares
#[derive(Clone)]
pub struct MethodSpec {
    name: String,
    kind: MethodKind,
    signature: ParameterSignature,
    api: bool,
    default: Option<DefaultFn>,
}

impl MethodSpec {
    /// A method declaration
    pub fn new(
        name: impl Into<String>,
        kind: MethodKind,
        signature: ParameterSignature,
        api: bool,
        default: Option<DefaultFn>,
    ) -> Self {
        MethodSpec {
            name: name.into(),
            kind,
            signature,
            api,
            default,
        }
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace
    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    /// Declared parameter list
    pub fn signature(&self) -> &ParameterSignature {
        &self.signature
    }

    /// Declared inside the contract block
    pub fn is_api(&self) -> bool {
        self.api
    }

    /// Default behavior, if one was given
    pub fn default(&self) -> Option<&DefaultFn> {
        self.default.as_ref()
    }

    /// Whether this is the constructor hook
    pub fn is_initializer(&self) -> bool {
        self.kind == MethodKind::Instance && self.name == surrogate_ledger::Vocabulary::INITIALIZE
    }

    pub(crate) fn set_default(&mut self, default: DefaultFn) {
        self.default = Some(default);
    }

    /// The declaration as seen by a comparer
    ///
    /// The constructor hook is private, like any constructor.
    pub fn to_method_def(&self) -> MethodDef {
        MethodDef {
            name: self.name.clone(),
            kind: self.kind,
            visibility: if self.is_initializer() {
                Visibility::Private
            } else {
                Visibility::Public
            },
            signature: self.signature.clone(),
            api: self.api,
        }
    }
}

impl fmt::Debug for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("signature", &self.signature)
            .field("api", &self.api)
            .field("default", &self.default.is_some())
            .finish()
    }
}
