//! Mutable, append-only attribute declarations.

use indexmap::IndexSet;

use crate::kind::{Attribute, AttributeKind};
use crate::schema::{Schema, SharedSchema};
use crate::value::DefaultValue;

/// Accumulates `(name, kind, default)` declarations for a [`Schema`].
///
/// Names are unique and keep their insertion order. The three tables are
/// index-aligned: attribute `i` is `names[i]` with `kinds[i]` and
/// `defaults[i]`.
///
/// The first declaration of a name wins. Re-declaring a name is a silent
/// no-op, even when the later declaration uses a different kind. This lets
/// independently written simulation stages each declare the attributes they
/// need and have the declarations merged without coordination.
#[derive(Clone, Debug, Default)]
pub struct SchemaBuilder {
    pub(crate) names: IndexSet<String>,
    pub(crate) kinds: Vec<AttributeKind>,
    pub(crate) defaults: Vec<DefaultValue>,
}

impl SchemaBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an attribute whose kind is taken from `T`.
    ///
    /// Returns `false` (and changes nothing) if `name` was already declared.
    pub fn add<T: Attribute>(&mut self, name: &str, default: T) -> bool {
        self.add_erased(name, T::KIND, DefaultValue::from_value(default))
    }

    /// Declare an attribute with an explicit kind and erased default.
    ///
    /// Returns `false` (and changes nothing) if `name` was already declared.
    pub fn add_erased(&mut self, name: &str, kind: AttributeKind, default: DefaultValue) -> bool {
        if let Some(existing) = self.names.get_index_of(name) {
            tracing::debug!(
                attribute = name,
                declared = %self.kinds[existing],
                ignored = %kind,
                "duplicate attribute declaration ignored"
            );
            return false;
        }
        self.names.insert(name.to_owned());
        self.kinds.push(kind);
        self.defaults.push(default);
        true
    }

    /// Chaining form of [`SchemaBuilder::add`].
    pub fn with<T: Attribute>(mut self, name: &str, default: T) -> Self {
        self.add(name, default);
        self
    }

    /// Number of distinct attribute names declared so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `name` has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Kind recorded for `name`, if declared.
    pub fn kind_of(&self, name: &str) -> Option<AttributeKind> {
        self.names.get_index_of(name).map(|i| self.kinds[i])
    }

    /// Add every attribute of `other`, in its order, first declaration wins.
    pub fn merge(&mut self, other: &SchemaBuilder) {
        for ((name, &kind), &default) in other.names.iter().zip(&other.kinds).zip(&other.defaults) {
            self.add_erased(name, kind, default);
        }
    }

    /// Add every attribute of a frozen schema, in its order, first declaration wins.
    pub fn merge_schema(&mut self, other: &Schema) {
        for index in other.attribute_indices() {
            self.add_erased(
                other.name_of(index),
                other.type_of(index),
                *other.default_value(index),
            );
        }
    }

    /// Freeze the current declarations into a shareable schema.
    ///
    /// The schema takes its own copy of the tables; the builder can keep
    /// being mutated without affecting schemas it already produced.
    pub fn build(&self) -> SharedSchema {
        Schema::from_builder(self).into_shared()
    }
}
