//! `PropertySet` and related types for pass communication.
//!
//! The [`PropertySet`] is the shared context threaded through every pass of a
//! [`PassManager`](crate::PassManager). It carries the target basis and any
//! number of typed custom properties, such as the
//! [`OptimizationReport`](crate::OptimizationReport) written by the peephole
//! optimizer.
//!
//! # Examples
//!
//! ```
//! use nativ_compile::{BasisGates, PropertySet};
//! use nativ_ir::GateKind;
//!
//! let props = PropertySet::new().with_basis_gates(BasisGates::native());
//! assert!(props.basis_gates.as_ref().unwrap().contains(GateKind::ECR));
//! ```
//!
//! ## Custom properties for pass communication
//!
//! ```
//! use nativ_compile::PropertySet;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct RewriteStats {
//!     rules_applied: usize,
//! }
//!
//! let mut props = PropertySet::new();
//! props.insert(RewriteStats { rules_applied: 15 });
//!
//! let stats = props.get::<RewriteStats>().unwrap();
//! assert_eq!(stats.rules_applied, 15);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};

use nativ_ir::GateKind;

/// Basis gates for the target device.
///
/// Gate kinds in the basis are copied through decomposition untouched; all
/// others are rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GateKind>", into = "Vec<GateKind>")]
pub struct BasisGates {
    /// Gate kinds in the basis, sorted and deduplicated.
    gates: Vec<GateKind>,
}

impl BasisGates {
    /// Create a new basis gates set.
    pub fn new(gates: impl IntoIterator<Item = GateKind>) -> Self {
        let mut gates: Vec<GateKind> = gates.into_iter().collect();
        gates.sort_unstable();
        gates.dedup();
        Self { gates }
    }

    /// The hardware-native basis: `id`, `x`, `sx`, `rz`, `ecr`.
    pub fn native() -> Self {
        Self::new(GateKind::NATIVE)
    }

    /// Check if a gate kind is in the basis.
    pub fn contains(&self, kind: GateKind) -> bool {
        self.gates.binary_search(&kind).is_ok()
    }

    /// Get the basis gates.
    pub fn gates(&self) -> &[GateKind] {
        &self.gates
    }

    /// Check if the basis is exactly the native set.
    pub fn is_native(&self) -> bool {
        *self == Self::native()
    }

    /// Number of gate kinds in the basis.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if the basis is empty.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

impl Default for BasisGates {
    fn default() -> Self {
        Self::native()
    }
}

impl From<Vec<GateKind>> for BasisGates {
    fn from(gates: Vec<GateKind>) -> Self {
        Self::new(gates)
    }
}

impl From<BasisGates> for Vec<GateKind> {
    fn from(basis: BasisGates) -> Self {
        basis.gates
    }
}

/// Properties shared between compilation passes.
///
/// The target basis has a dedicated public field; passes store anything else
/// with the type-keyed [`insert`](Self::insert) and [`get`](Self::get)
/// methods. Each type can have at most one value stored.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Target basis gates for decomposition.
    ///
    /// When unset, translation falls back to the native basis.
    pub basis_gates: Option<BasisGates>,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target basis.
    #[must_use]
    pub fn with_basis_gates(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}
