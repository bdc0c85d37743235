//! API substitutability checks
//!
//! The comparer answers "can a real object stand in for this surrogate"
//! by comparing the public surface of two type definitions. It never
//! calls methods; only the presence and parameter shape of each public
//! method are compared.
//!
//! ## Verdict
//!
//! - `missing_*_methods`: public on the surrogate, absent on the actual
//!   type. Always fatal.
//! - signature mismatches: on both sides with different parameter shapes.
//!   Always fatal.
//! - `extra_*_methods`: public on the actual type, absent on the
//!   surrogate. Fatal only outside subset mode.
//!
//! Subset mode is one-directional: it asks whether the actual type covers
//! everything the surrogate promises. The reverse question is not computed.

use crate::descriptor::MethodDescriptor;
use serde::Serialize;
use std::collections::BTreeSet;
use surrogate_core::{
    HelperRegistry, MethodKind, Result, SurrogateConfig, TypeDefinition, TypeRegistry,
};
use tracing::debug;

/// Inputs that shape a comparison besides the two definitions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparerOptions {
    /// Allow the actual type to expose extra public methods
    pub subset: bool,
    /// Helper methods excluded from the comparison
    pub helpers: HelperRegistry,
}

impl ComparerOptions {
    /// Exact-surface comparison with no helpers
    pub fn new() -> Self {
        Self::default()
    }

    /// Subset comparison with no helpers
    pub fn subset() -> Self {
        ComparerOptions {
            subset: true,
            ..Self::default()
        }
    }

    /// Builder-style setter for the helper registry
    pub fn with_helpers(mut self, helpers: HelperRegistry) -> Self {
        self.helpers = helpers;
        self
    }

    /// Options from configuration, merging the configured helpers into
    /// `helpers` (typically the ones published by the surrogate itself)
    pub fn from_config(config: &SurrogateConfig, helpers: &HelperRegistry) -> Self {
        let mut merged = helpers.clone();
        merged.merge(&config.helper_registry());
        ComparerOptions {
            subset: config.subset,
            helpers: merged,
        }
    }
}

/// Compares a surrogate's public surface with a candidate implementation's
#[derive(Debug, Clone)]
pub struct ApiComparer {
    surrogate_name: String,
    actual_name: String,
    subset: bool,
    methods: Vec<MethodDescriptor>,
}

impl ApiComparer {
    /// Build a comparer over two definitions
    ///
    /// # Errors
    ///
    /// `InvalidComparisonTarget` when either definition fails validation.
    pub fn new(
        surrogate: &TypeDefinition,
        actual: &TypeDefinition,
        options: ComparerOptions,
    ) -> Result<Self> {
        surrogate.validate()?;
        actual.validate()?;

        let mut methods = Vec::new();
        for kind in MethodKind::ALL {
            let names: BTreeSet<String> = surrogate
                .public_method_names(kind)
                .into_iter()
                .chain(actual.public_method_names(kind))
                .filter(|name| !options.helpers.is_helper(kind, name))
                .collect();
            methods.extend(
                names
                    .iter()
                    .map(|name| MethodDescriptor::resolve(name, kind, surrogate, actual)),
            );
        }

        Ok(ApiComparer {
            surrogate_name: surrogate.name().to_string(),
            actual_name: actual.name().to_string(),
            subset: options.subset,
            methods,
        })
    }

    /// Build a comparer over two definitions looked up by name
    ///
    /// # Errors
    ///
    /// `InvalidComparisonTarget` when a name is unknown or a definition
    /// fails validation.
    pub fn from_registry(
        registry: &TypeRegistry,
        surrogate: &str,
        actual: &str,
        options: ComparerOptions,
    ) -> Result<Self> {
        let surrogate = registry.resolve(surrogate)?;
        let actual = registry.resolve(actual)?;
        Self::new(&surrogate, &actual, options)
    }

    /// Every public, non-helper method on either side, class methods first,
    /// each group sorted by name
    pub fn all_methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// The descriptor for `name` in the `kind` namespace
    pub fn method(&self, name: &str, kind: MethodKind) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .find(|m| m.name() == name && m.kind() == kind)
    }

    fn select<F>(&self, kind: MethodKind, keep: F) -> Vec<MethodDescriptor>
    where
        F: Fn(&MethodDescriptor) -> bool,
    {
        self.methods
            .iter()
            .filter(|m| m.kind() == kind && keep(*m))
            .cloned()
            .collect()
    }

    /// Public on the actual type, absent on the surrogate
    pub fn extra_methods(&self, kind: MethodKind) -> Vec<MethodDescriptor> {
        self.select(kind, |m| m.is_on_actual() && !m.is_on_surrogate())
    }

    /// Public on the surrogate, absent on the actual type
    pub fn missing_methods(&self, kind: MethodKind) -> Vec<MethodDescriptor> {
        self.select(kind, |m| m.is_on_surrogate() && !m.is_on_actual())
    }

    /// On both sides with parameter lists of different shape
    pub fn signature_mismatches(&self) -> Vec<MethodDescriptor> {
        self.methods
            .iter()
            .filter(|m| m.signatures_match() == Some(false))
            .cloned()
            .collect()
    }

    /// Run the comparison
    pub fn compare(&self) -> ComparisonResult {
        let result = ComparisonResult::new(
            self.surrogate_name.clone(),
            self.actual_name.clone(),
            self.subset,
            self.extra_methods(MethodKind::Instance),
            self.extra_methods(MethodKind::Class),
            self.missing_methods(MethodKind::Instance),
            self.missing_methods(MethodKind::Class),
            self.signature_mismatches(),
        );
        debug!(
            surrogate = %result.surrogate_name,
            actual = %result.actual_name,
            subset = result.subset,
            missing = result.missing_instance_methods.len() + result.missing_class_methods.len(),
            extra = result.extra_instance_methods.len() + result.extra_class_methods.len(),
            mismatched = result.signature_mismatches.len(),
            substitutable = result.substitutable,
            "compared api"
        );
        result
    }
}

/// Outcome of one comparison
///
/// Immutable once built; callers read the sets and flags directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// Name of the surrogate definition
    pub surrogate_name: String,
    /// Name of the actual definition
    pub actual_name: String,
    /// Whether the verdict was computed in subset mode
    pub subset: bool,
    /// Instance methods the actual type has and the surrogate lacks
    pub extra_instance_methods: Vec<MethodDescriptor>,
    /// Class methods the actual type has and the surrogate lacks
    pub extra_class_methods: Vec<MethodDescriptor>,
    /// Instance methods the surrogate has and the actual type lacks
    pub missing_instance_methods: Vec<MethodDescriptor>,
    /// Class methods the surrogate has and the actual type lacks
    pub missing_class_methods: Vec<MethodDescriptor>,
    /// Methods on both sides whose parameter shapes differ
    pub signature_mismatches: Vec<MethodDescriptor>,
    /// The verdict for `subset`
    pub substitutable: bool,
}

impl ComparisonResult {
    #[allow(clippy::too_many_arguments)]
    fn new(
        surrogate_name: String,
        actual_name: String,
        subset: bool,
        extra_instance_methods: Vec<MethodDescriptor>,
        extra_class_methods: Vec<MethodDescriptor>,
        missing_instance_methods: Vec<MethodDescriptor>,
        missing_class_methods: Vec<MethodDescriptor>,
        signature_mismatches: Vec<MethodDescriptor>,
    ) -> Self {
        let mut result = ComparisonResult {
            surrogate_name,
            actual_name,
            subset,
            extra_instance_methods,
            extra_class_methods,
            missing_instance_methods,
            missing_class_methods,
            signature_mismatches,
            substitutable: false,
        };
        result.substitutable = result.is_substitutable(subset);
        result
    }

    /// The verdict for either mode
    ///
    /// The method sets do not depend on the mode, so one comparison can
    /// answer both questions.
    pub fn is_substitutable(&self, subset: bool) -> bool {
        let covers = self.missing_instance_methods.is_empty()
            && self.missing_class_methods.is_empty()
            && self.signature_mismatches.is_empty();
        let exact = self.extra_instance_methods.is_empty() && self.extra_class_methods.is_empty();
        covers && (subset || exact)
    }

    /// Human readable reasons the verdict is negative, one per line
    ///
    /// `None` when the actual type is substitutable.
    pub fn explain(&self) -> Option<String> {
        if self.substitutable {
            return None;
        }
        let mut reasons = Vec::new();
        let mut push = |label: &str, methods: &[MethodDescriptor]| {
            if !methods.is_empty() {
                reasons.push(format!("{} [{}]", label, names(methods).join(", ")));
            }
        };
        push(
            "is missing instance methods",
            self.missing_instance_methods.as_slice(),
        );
        push("is missing class methods", self.missing_class_methods.as_slice());
        if !self.subset {
            push("has extra instance methods", self.extra_instance_methods.as_slice());
            push("has extra class methods", self.extra_class_methods.as_slice());
        }
        for m in &self.signature_mismatches {
            // both signatures exist for a mismatch
            if let (Ok(s), Ok(a)) = (m.surrogate_parameters(), m.actual_parameters()) {
                reasons.push(format!(
                    "has a different {} signature for {}: surrogate {}, actual {}",
                    m.kind(),
                    m.name(),
                    s,
                    a
                ));
            }
        }
        Some(format!(
            "{} is not substitutable for {} because it\n  {}",
            self.actual_name,
            self.surrogate_name,
            reasons.join("\n  ")
        ))
    }
}

/// Names of `methods`, in order
pub fn names(methods: &[MethodDescriptor]) -> Vec<&str> {
    methods.iter().map(MethodDescriptor::name).collect()
}
