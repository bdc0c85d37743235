//! Type descriptor tables
//!
//! Rust has no runtime reflection over method visibility or ownership, so
//! every type that takes part in a comparison registers an explicit
//! descriptor table: a [`TypeDefinition`] listing the methods it declares
//! directly, plus an optional parent definition it inherits from.
//!
//! Lookup walks the chain from the type towards its root ancestor and the
//! nearest declaration wins. A method overridden on the type itself is
//! therefore never "inherited", even when an ancestor also declares it,
//! and an override can change the visibility seen by callers.

use crate::error::{Error, Result};
use crate::signature::ParameterSignature;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Method namespace: type-level and instance-level methods never collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Type-level method, no receiver instance required
    Class,
    /// Instance-level method, requires a receiver instance
    Instance,
}

impl MethodKind {
    /// Both kinds, class first
    pub const ALL: [MethodKind; 2] = [MethodKind::Class, MethodKind::Instance];

    /// Lowercase name used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Class => "class",
            MethodKind::Instance => "instance",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Callable by anyone
    Public,
    /// Callable by the type and its descendants
    Protected,
    /// Callable by the type only
    Private,
}

/// Which definition of a comparison a fact refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The surrogate whose contract is being checked against
    Surrogate,
    /// The candidate real implementation
    Actual,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Surrogate => f.write_str("surrogate"),
            Side::Actual => f.write_str("actual"),
        }
    }
}

/// One method declared directly on a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Namespace
    pub kind: MethodKind,
    /// Visibility
    pub visibility: Visibility,
    /// Normalized parameter list
    pub signature: ParameterSignature,
    /// Declared inside a surrogate's contract block
    pub api: bool,
}

impl MethodDef {
    /// A public, non-api method
    pub fn public(name: impl Into<String>, kind: MethodKind, signature: ParameterSignature) -> Self {
        MethodDef {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            signature,
            api: false,
        }
    }
}

/// A method found by walking a definition's ancestry
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMethod<'a> {
    /// The nearest declaration
    pub def: &'a MethodDef,
    /// True when the nearest declaration lives on an ancestor
    pub inherited: bool,
}

/// Descriptor table for one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    name: String,
    parent: Option<Arc<TypeDefinition>>,
    methods: Vec<MethodDef>,
}

impl TypeDefinition {
    /// A definition with no methods and no parent
    pub fn new(name: impl Into<String>) -> Self {
        TypeDefinition {
            name: name.into(),
            parent: None,
            methods: Vec::new(),
        }
    }

    /// Start a builder for a definition named `name`
    pub fn builder(name: impl Into<String>) -> TypeDefinitionBuilder {
        TypeDefinitionBuilder::new(name)
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent definition, if any
    pub fn parent(&self) -> Option<&Arc<TypeDefinition>> {
        self.parent.as_ref()
    }

    /// Methods declared directly on this type
    pub fn declared_methods(&self) -> &[MethodDef] {
        &self.methods
    }

    /// Set the parent definition
    pub fn set_parent(&mut self, parent: Arc<TypeDefinition>) {
        self.parent = Some(parent);
    }

    /// Declare a method directly on this type
    ///
    /// No validation happens here; see [`validate`](Self::validate).
    pub fn add_method(&mut self, method: MethodDef) {
        self.methods.push(method);
    }

    /// Remove a method declared directly on this type, returning it
    pub fn remove_method(&mut self, name: &str, kind: MethodKind) -> Option<MethodDef> {
        let pos = self
            .methods
            .iter()
            .position(|m| m.name == name && m.kind == kind)?;
        Some(self.methods.remove(pos))
    }

    /// Find the method declared directly on this type
    pub fn declared(&self, name: &str, kind: MethodKind) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name && m.kind == kind)
    }

    /// Find the nearest declaration of `name` along the ancestry chain
    pub fn lookup(&self, name: &str, kind: MethodKind) -> Option<ResolvedMethod<'_>> {
        if let Some(def) = self.declared(name, kind) {
            return Some(ResolvedMethod {
                def,
                inherited: false,
            });
        }
        let mut ancestor = self.parent.as_deref();
        while let Some(current) = ancestor {
            if let Some(def) = current.declared(name, kind) {
                return Some(ResolvedMethod {
                    def,
                    inherited: true,
                });
            }
            ancestor = current.parent.as_deref();
        }
        None
    }

    /// Find `name` only if its nearest declaration is public
    pub fn lookup_public(&self, name: &str, kind: MethodKind) -> Option<ResolvedMethod<'_>> {
        self.lookup(name, kind)
            .filter(|resolved| resolved.def.visibility == Visibility::Public)
    }

    /// Names of every publicly invocable method of `kind`, own and inherited
    pub fn public_method_names(&self, kind: MethodKind) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut public = BTreeSet::new();
        let mut current = Some(self);
        while let Some(def) = current {
            for method in def.methods.iter().filter(|m| m.kind == kind) {
                // Nearest declaration decides visibility
                if seen.insert(method.name.clone()) && method.visibility == Visibility::Public {
                    public.insert(method.name.clone());
                }
            }
            current = def.parent.as_deref();
        }
        public
    }

    /// Check that this definition (and its ancestors) can be compared
    ///
    /// Rejects empty type names, invalid method names, and methods declared
    /// twice on the same type in the same namespace.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_target("type name is empty"));
        }
        let mut declared: FxHashSet<(&str, MethodKind)> = FxHashSet::default();
        for method in &self.methods {
            if !is_method_name(&method.name) {
                return Err(Error::invalid_target(format!(
                    "{} declares a method with invalid name `{}`",
                    self.name, method.name
                )));
            }
            if !declared.insert((method.name.as_str(), method.kind)) {
                return Err(Error::invalid_target(format!(
                    "{} declares {} method `{}` more than once",
                    self.name, method.kind, method.name
                )));
            }
        }
        match &self.parent {
            Some(parent) => parent.validate(),
            None => Ok(()),
        }
    }
}

fn is_method_name(name: &str) -> bool {
    let body = name
        .strip_suffix('?')
        .or_else(|| name.strip_suffix('!'))
        .unwrap_or(name);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Builder for [`TypeDefinition`]
///
/// Parameter lists are given in textual form (see
/// [`ParameterSignature::parse`]); the first malformed list is reported by
/// [`build`](Self::build).
#[derive(Debug)]
pub struct TypeDefinitionBuilder {
    def: TypeDefinition,
    error: Option<Error>,
}

impl TypeDefinitionBuilder {
    fn new(name: impl Into<String>) -> Self {
        TypeDefinitionBuilder {
            def: TypeDefinition::new(name),
            error: None,
        }
    }

    /// Inherit from `parent`
    pub fn parent(mut self, parent: Arc<TypeDefinition>) -> Self {
        self.def.parent = Some(parent);
        self
    }

    /// Declare a method with full control over its attributes
    pub fn method(
        mut self,
        name: &str,
        kind: MethodKind,
        visibility: Visibility,
        params: &str,
        api: bool,
    ) -> Self {
        match ParameterSignature::parse(params) {
            Ok(signature) => self.def.methods.push(MethodDef {
                name: name.to_string(),
                kind,
                visibility,
                signature,
                api,
            }),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Declare a public class method
    pub fn class_method(self, name: &str, params: &str) -> Self {
        self.method(name, MethodKind::Class, Visibility::Public, params, false)
    }

    /// Declare a public instance method
    pub fn instance_method(self, name: &str, params: &str) -> Self {
        self.method(name, MethodKind::Instance, Visibility::Public, params, false)
    }

    /// Declare a private instance method
    pub fn private_method(self, name: &str, params: &str) -> Self {
        self.method(name, MethodKind::Instance, Visibility::Private, params, false)
    }

    /// Declare a protected instance method
    pub fn protected_method(self, name: &str, params: &str) -> Self {
        self.method(name, MethodKind::Instance, Visibility::Protected, params, false)
    }

    /// Finish the definition
    pub fn build(self) -> Result<TypeDefinition> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.def),
        }
    }
}

/// Named lookup of type definitions
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: FxHashMap<String, Arc<TypeDefinition>>,
}

impl TypeRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its own name, replacing any previous one
    pub fn register(&mut self, def: TypeDefinition) -> Arc<TypeDefinition> {
        let def = Arc::new(def);
        self.types.insert(def.name.clone(), Arc::clone(&def));
        def
    }

    /// Look up a definition by name
    pub fn get(&self, name: &str) -> Option<&Arc<TypeDefinition>> {
        self.types.get(name)
    }

    /// Look up a definition by name, failing as an invalid comparison target
    pub fn resolve(&self, name: &str) -> Result<Arc<TypeDefinition>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| Error::invalid_target(format!("no type definition named `{}`", name)))
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Arc<TypeDefinition> {
        Arc::new(
            TypeDefinition::builder("Base")
                .class_method("cm_inherited", "")
                .instance_method("im_inherited", "")
                .instance_method("overridden", "a")
                .private_method("made_public", "")
                .build()
                .unwrap(),
        )
    }

    fn child() -> TypeDefinition {
        TypeDefinition::builder("Child")
            .parent(base())
            .instance_method("own", "x, y = 1")
            .instance_method("overridden", "a, b")
            .instance_method("made_public", "")
            .private_method("secret", "")
            .protected_method("guarded", "")
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_own_method_is_not_inherited() {
        let def = child();
        let resolved = def.lookup("own", MethodKind::Instance).unwrap();
        assert!(!resolved.inherited);
        assert_eq!(resolved.def.signature.len(), 2);
    }

    #[test]
    fn test_lookup_ancestor_method_is_inherited() {
        let def = child();
        assert!(def.lookup("im_inherited", MethodKind::Instance).unwrap().inherited);
        assert!(def.lookup("cm_inherited", MethodKind::Class).unwrap().inherited);
    }

    #[test]
    fn test_override_is_not_inherited_and_wins() {
        let def = child();
        let resolved = def.lookup("overridden", MethodKind::Instance).unwrap();
        assert!(!resolved.inherited);
        assert_eq!(resolved.def.signature.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_kinds_are_separate_namespaces() {
        let def = child();
        assert!(def.lookup("cm_inherited", MethodKind::Instance).is_none());
        assert!(def.lookup("own", MethodKind::Class).is_none());
    }

    #[test]
    fn test_public_method_names_excludes_private_and_protected() {
        let names = child().public_method_names(MethodKind::Instance);
        assert!(names.contains("own"));
        assert!(names.contains("im_inherited"));
        assert!(names.contains("overridden"));
        assert!(names.contains("made_public"));
        assert!(!names.contains("secret"));
        assert!(!names.contains("guarded"));
    }

    #[test]
    fn test_nearest_declaration_decides_visibility() {
        let def = TypeDefinition::builder("Hider")
            .parent(base())
            .private_method("im_inherited", "")
            .build()
            .unwrap();
        assert!(!def.public_method_names(MethodKind::Instance).contains("im_inherited"));
        assert!(def.lookup_public("im_inherited", MethodKind::Instance).is_none());
        assert!(def.lookup("im_inherited", MethodKind::Instance).is_some());
    }

    #[test]
    fn test_builder_reports_malformed_parameters() {
        let result = TypeDefinition::builder("Bad")
            .instance_method("ok", "a")
            .instance_method("broken", "a, , b")
            .build();
        assert!(matches!(result, Err(Error::MalformedParameter { .. })));
    }

    #[test]
    fn test_remove_method() {
        let mut def = child();
        assert!(def.remove_method("own", MethodKind::Instance).is_some());
        assert!(def.lookup("own", MethodKind::Instance).is_none());
        assert!(def.remove_method("own", MethodKind::Instance).is_none());
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        child().validate().unwrap();
        TypeDefinition::builder("Predicates")
            .instance_method("admin?", "")
            .instance_method("save!", "")
            .build()
            .unwrap()
            .validate()
            .unwrap();
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let err = TypeDefinition::new("  ").validate().unwrap_err();
        assert!(matches!(err, Error::InvalidComparisonTarget(_)));
    }

    #[test]
    fn test_validate_rejects_duplicate_declaration() {
        let mut def = TypeDefinition::new("Dup");
        def.add_method(MethodDef::public("id", MethodKind::Instance, ParameterSignature::new()));
        def.add_method(MethodDef::public("id", MethodKind::Instance, ParameterSignature::new()));
        assert!(matches!(def.validate(), Err(Error::InvalidComparisonTarget(_))));
    }

    #[test]
    fn test_validate_allows_same_name_in_both_kinds() {
        let mut def = TypeDefinition::new("Both");
        def.add_method(MethodDef::public("id", MethodKind::Instance, ParameterSignature::new()));
        def.add_method(MethodDef::public("id", MethodKind::Class, ParameterSignature::new()));
        def.validate().unwrap();
    }

    #[test]
    fn test_validate_checks_ancestors() {
        let mut parent = TypeDefinition::new("Parent");
        parent.add_method(MethodDef::public("has space", MethodKind::Instance, ParameterSignature::new()));
        let mut def = TypeDefinition::new("Child");
        def.set_parent(Arc::new(parent));
        assert!(matches!(def.validate(), Err(Error::InvalidComparisonTarget(_))));
    }

    #[test]
    fn test_registry_resolve() {
        let mut registry = TypeRegistry::new();
        registry.register(child());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("Child").unwrap().name(), "Child");
        assert!(matches!(
            registry.resolve("Nope"),
            Err(Error::InvalidComparisonTarget(_))
        ));
    }
}
