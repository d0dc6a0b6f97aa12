//! Frozen, shareable attribute schemas.

use std::ops::Range;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::builder::SchemaBuilder;
use crate::id::SchemaId;
use crate::kind::AttributeKind;
use crate::value::DefaultValue;

/// Shared handle to a frozen schema.
///
/// Every buffer store built against a schema holds one of these, so the
/// schema always outlives the stores that use it.
pub type SharedSchema = Arc<Schema>;

/// Immutable description of an attribute set.
///
/// Every attribute has a unique name, a unique index (its position in
/// declaration order), a kind, and a default value. The tables are fixed
/// once the schema is built.
///
/// Equality is identity: two schemas compare equal only if they are the
/// same instance (or `Arc` clones of it). Structurally identical schemas
/// built separately are different schemas.
#[derive(Debug)]
pub struct Schema {
    id: SchemaId,
    names: IndexSet<String>,
    kinds: Vec<AttributeKind>,
    defaults: Vec<DefaultValue>,
}

impl Schema {
    /// Freeze a copy of a builder's declarations.
    pub fn from_builder(builder: &SchemaBuilder) -> Self {
        let schema = Self {
            id: SchemaId::next(),
            names: builder.names.clone(),
            kinds: builder.kinds.clone(),
            defaults: builder.defaults.clone(),
        };
        tracing::debug!(
            schema = %schema.id,
            attributes = schema.len(),
            row_bytes = schema.row_bytes(),
            "schema built"
        );
        schema
    }

    /// A schema with no attributes.
    pub fn empty() -> Self {
        Self::from_builder(&SchemaBuilder::new())
    }

    /// Wrap this schema in an `Arc` for sharing.
    pub fn into_shared(self) -> SharedSchema {
        Arc::new(self)
    }

    /// Start a new builder pre-populated with this schema's attributes.
    pub fn to_builder(&self) -> SchemaBuilder {
        SchemaBuilder {
            names: self.names.clone(),
            kinds: self.kinds.clone(),
            defaults: self.defaults.clone(),
        }
    }

    /// This schema's identity.
    pub fn id(&self) -> SchemaId {
        self.id
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the schema declares no attributes.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the attribute at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn name_of(&self, index: usize) -> &str {
        match self.names.get_index(index) {
            Some(name) => name,
            None => panic!(
                "attribute index {index} out of range for schema {} with {} attributes",
                self.id,
                self.len()
            ),
        }
    }

    /// Kind of the attribute at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn type_of(&self, index: usize) -> AttributeKind {
        self.check_index(index);
        self.kinds[index]
    }

    /// Kind of the attribute called `name`.
    ///
    /// # Panics
    ///
    /// Panics if no attribute is called `name`.
    pub fn type_of_name(&self, name: &str) -> AttributeKind {
        self.kinds[self.attribute_index(name)]
    }

    /// All kinds, indexed by attribute index.
    pub fn types(&self) -> &[AttributeKind] {
        &self.kinds
    }

    /// All names, in index order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Iterate `(index, name, kind)` over every attribute.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, AttributeKind)> + '_ {
        self.names
            .iter()
            .zip(&self.kinds)
            .enumerate()
            .map(|(index, (name, &kind))| (index, name.as_str(), kind))
    }

    /// Index of the attribute called `name`, or `None` if absent.
    pub fn attribute_index_try(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    /// Index of the attribute called `name` with kind `kind`.
    ///
    /// Returns `None` if the name is absent or declared with another kind.
    pub fn attribute_index_try_kind(&self, name: &str, kind: AttributeKind) -> Option<usize> {
        self.attribute_index_try(name)
            .filter(|&index| self.kinds[index] == kind)
    }

    /// Index of the attribute called `name`.
    ///
    /// # Panics
    ///
    /// Panics if no attribute is called `name`. Use
    /// [`Schema::attribute_index_try`] when presence is not guaranteed.
    pub fn attribute_index(&self, name: &str) -> usize {
        match self.attribute_index_try(name) {
            Some(index) => index,
            None => panic!("unknown attribute '{name}' in schema {}", self.id),
        }
    }

    /// Every valid attribute index, starting at 0.
    pub fn attribute_indices(&self) -> Range<usize> {
        0..self.len()
    }

    /// Default value of the attribute at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn default_value(&self, index: usize) -> &DefaultValue {
        self.check_index(index);
        &self.defaults[index]
    }

    /// Default bytes of the attribute at `index`, sized by its kind.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn default_value_bytes(&self, index: usize) -> &[u8] {
        self.check_index(index);
        self.defaults[index].bytes(self.kinds[index])
    }

    /// Bytes occupied by one row across every column.
    pub fn row_bytes(&self) -> usize {
        self.kinds.iter().map(|k| k.size()).sum()
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.len(),
            "attribute index {index} out of range for schema {} with {} attributes",
            self.id,
            self.len()
        );
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Schema {}
