//! Method descriptors
//!
//! A [`MethodDescriptor`] describes one (name, kind) pair found on either
//! side of a comparison: whether each side publicly exposes it, whether
//! that exposure is inherited, whether the surrogate declared it in its
//! contract block, and the parameter signature on each side.

use serde::Serialize;
use surrogate_core::{Error, MethodKind, ParameterSignature, Result, Side, TypeDefinition};

/// One named method as seen from both sides of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    name: String,
    kind: MethodKind,
    on_surrogate: bool,
    on_actual: bool,
    inherited_on_surrogate: bool,
    inherited_on_actual: bool,
    api_method: bool,
    surrogate_signature: Option<ParameterSignature>,
    actual_signature: Option<ParameterSignature>,
}

impl MethodDescriptor {
    /// Inspect both definitions for `name` in the `kind` namespace
    ///
    /// Only public methods count as present; private and protected ones
    /// are treated as absent.
    pub fn resolve(
        name: &str,
        kind: MethodKind,
        surrogate: &TypeDefinition,
        actual: &TypeDefinition,
    ) -> Self {
        let on_surrogate = surrogate.lookup_public(name, kind);
        let on_actual = actual.lookup_public(name, kind);

        MethodDescriptor {
            name: name.to_string(),
            kind,
            on_surrogate: on_surrogate.is_some(),
            on_actual: on_actual.is_some(),
            inherited_on_surrogate: on_surrogate.map_or(false, |m| m.inherited),
            inherited_on_actual: on_actual.map_or(false, |m| m.inherited),
            api_method: on_surrogate.map_or(false, |m| m.def.api),
            surrogate_signature: on_surrogate.map(|m| m.def.signature.clone()),
            actual_signature: on_actual.map(|m| m.def.signature.clone()),
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

    /// Type-level method
    pub fn is_class_method(&self) -> bool {
        self.kind == MethodKind::Class
    }

    /// Instance-level method
    pub fn is_instance_method(&self) -> bool {
        self.kind == MethodKind::Instance
    }

    /// Publicly exposed by the surrogate
    pub fn is_on_surrogate(&self) -> bool {
        self.on_surrogate
    }

    /// Publicly exposed by the actual type
    pub fn is_on_actual(&self) -> bool {
        self.on_actual
    }

    /// Exposed by the surrogate through an ancestor
    pub fn is_inherited_on_surrogate(&self) -> bool {
        self.inherited_on_surrogate
    }

    /// Exposed by the actual type through an ancestor
    pub fn is_inherited_on_actual(&self) -> bool {
        self.inherited_on_actual
    }

    /// Declared inside the surrogate's contract block
    pub fn is_api_method(&self) -> bool {
        self.api_method
    }

    /// Signature on the surrogate side
    ///
    /// # Errors
    ///
    /// `NoSignature` when the surrogate does not expose this method.
    pub fn surrogate_parameters(&self) -> Result<&ParameterSignature> {
        self.parameters(Side::Surrogate)
    }

    /// Signature on the actual side
    ///
    /// # Errors
    ///
    /// `NoSignature` when the actual type does not expose this method.
    pub fn actual_parameters(&self) -> Result<&ParameterSignature> {
        self.parameters(Side::Actual)
    }

    /// Signature on `side`
    pub fn parameters(&self, side: Side) -> Result<&ParameterSignature> {
        let signature = match side {
            Side::Surrogate => self.surrogate_signature.as_ref(),
            Side::Actual => self.actual_signature.as_ref(),
        };
        signature.ok_or_else(|| Error::NoSignature {
            method: self.name.clone(),
            kind: self.kind,
            side,
        })
    }

    /// For a method on both sides, whether the signatures are shape-equal
    ///
    /// `None` when the method is missing from either side.
    pub fn signatures_match(&self) -> Option<bool> {
        match (&self.surrogate_signature, &self.actual_signature) {
            (Some(s), Some(a)) => Some(s.shape_eq(a)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrogate_core::ParameterMode;

    fn surrogate() -> TypeDefinition {
        TypeDefinition::builder("MockUser")
            .method("find", MethodKind::Class, surrogate_core::Visibility::Public, "id", true)
            .instance_method("name", "")
            .private_method("secret", "")
            .build()
            .unwrap()
    }

    fn actual() -> TypeDefinition {
        TypeDefinition::builder("User")
            .class_method("find", "user_id")
            .instance_method("secret", "")
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_on_both() {
        let find = MethodDescriptor::resolve("find", MethodKind::Class, &surrogate(), &actual());
        assert!(find.is_on_surrogate());
        assert!(find.is_on_actual());
        assert!(find.is_api_method());
        assert!(find.is_class_method());
        assert!(!find.is_instance_method());
        assert_eq!(find.surrogate_parameters().unwrap().names(), vec!["id"]);
        assert_eq!(find.actual_parameters().unwrap().names(), vec!["user_id"]);
        assert_eq!(find.signatures_match(), Some(true));
    }

    #[test]
    fn test_missing_side_has_no_signature() {
        let name = MethodDescriptor::resolve("name", MethodKind::Instance, &surrogate(), &actual());
        assert!(name.is_on_surrogate());
        assert!(!name.is_on_actual());
        assert!(!name.is_api_method());
        assert_eq!(name.surrogate_parameters().unwrap().modes(), Vec::<ParameterMode>::new());
        let err = name.actual_parameters().unwrap_err();
        assert!(matches!(
            err,
            Error::NoSignature {
                side: Side::Actual,
                kind: MethodKind::Instance,
                ..
            }
        ));
        assert_eq!(name.signatures_match(), None);
    }

    #[test]
    fn test_private_counts_as_absent() {
        let secret = MethodDescriptor::resolve("secret", MethodKind::Instance, &surrogate(), &actual());
        assert!(!secret.is_on_surrogate());
        assert!(secret.is_on_actual());
        assert!(secret.surrogate_parameters().unwrap_err().is_no_signature());
    }
}
