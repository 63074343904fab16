use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use serde_json::Value;

use crate::{FieldPath, Resolver, ResolverRef};

pub struct FieldDefinition {
    name: String,
    resolver: Option<ResolverRef>,
}

impl FieldDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolver declared on the field. `None` means the default field resolver applies.
    pub fn resolver(&self) -> Option<&ResolverRef> {
        self.resolver.as_ref()
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

/// An output object type and the fields declared on it.
#[derive(Debug)]
pub struct ObjectType {
    name: String,
    fields: IndexMap<String, FieldDefinition>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn field(self, name: impl Into<String>, resolver: impl Resolver + 'static) -> Self {
        self.field_ref(name, Arc::new(resolver))
    }

    #[must_use]
    pub fn field_ref(mut self, name: impl Into<String>, resolver: ResolverRef) -> Self {
        let name = name.into();
        self.fields.insert(
            name.clone(),
            FieldDefinition {
                name,
                resolver: Some(resolver),
            },
        );
        self
    }

    /// A field read straight from the parent value.
    #[must_use]
    pub fn plain_field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.fields.insert(name.clone(), FieldDefinition { name, resolver: None });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> + '_ {
        self.fields.values()
    }
}

/// Schema metadata about the field being resolved.
#[derive(Debug, Clone)]
pub struct ResolveInfo {
    pub field_name: String,
    pub path: FieldPath,
    pub parent_type: Arc<ObjectType>,
    /// Root value of the whole operation.
    pub root_value: Value,
}

impl ResolveInfo {
    pub fn new(field_name: impl Into<String>, path: FieldPath, parent_type: Arc<ObjectType>) -> Self {
        Self {
            field_name: field_name.into(),
            path,
            parent_type,
            root_value: Value::Null,
        }
    }

    #[must_use]
    pub fn with_root_value(self, root_value: Value) -> Self {
        Self { root_value, ..self }
    }
}
