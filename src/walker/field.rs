//! Walked fields and the per-pass arena that owns them.
//!
//! A field's parent is an index into the same arena rather than a pointer,
//! so dotted paths can be rebuilt for as long as the arena lives and
//! nothing outlives the pass.

use crate::core::directive::Directive;
use crate::core::types::FieldValue;
use std::fmt;
use std::ops::Index;

/// Handle to a field inside a [`FieldArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    /// Position of the field in its arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A field produced by the walker.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Enclosing field, if this field belongs to a nested record
    pub parent: Option<FieldId>,
    /// Declared identifier (or a list index for synthetic element fields)
    pub name: String,
    /// Value read from the record
    pub value: FieldValue,
    /// Directives parsed from the field's tag, in declared order
    pub directives: Vec<Directive>,
}

impl Field {
    /// Create a root field.
    pub fn new(name: impl Into<String>, value: FieldValue, directives: Vec<Directive>) -> Self {
        Self {
            parent: None,
            name: name.into(),
            value,
            directives,
        }
    }

    /// Set the enclosing field.
    pub fn with_parent(mut self, parent: FieldId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Storage for every field of one validation pass.
#[derive(Debug, Clone, Default)]
pub struct FieldArena {
    fields: Vec<Field>,
}

impl FieldArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field and get its handle.
    pub fn push(&mut self, field: Field) -> FieldId {
        let id = FieldId(self.fields.len());
        self.fields.push(field);
        id
    }

    /// Add several fields at once, returning their handles in order.
    pub fn extend(&mut self, fields: Vec<Field>) -> Vec<FieldId> {
        fields.into_iter().map(|field| self.push(field)).collect()
    }

    /// Get a field by handle.
    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.0)
    }

    /// Number of fields in the arena.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all fields with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields.iter().enumerate().map(|(i, f)| (FieldId(i), f))
    }

    /// Handles of fields with no parent.
    pub fn roots(&self) -> Vec<FieldId> {
        self.iter()
            .filter(|(_, f)| f.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Dotted path of a field, optionally followed by extra segments.
    ///
    /// Fields with empty names contribute nothing. Postfix segments are
    /// appended with `.`, which is how list indexes get onto a path.
    pub fn full_name(&self, id: FieldId, postfix: &[&str]) -> String {
        let mut segments: Vec<&str> = Vec::new();

        if let Some(field) = self.get(id) {
            if !field.name.is_empty() {
                segments.push(&field.name);
            }

            let mut parent = field.parent;
            while let Some(parent_id) = parent {
                match self.get(parent_id) {
                    Some(p) => {
                        if !p.name.is_empty() {
                            segments.push(&p.name);
                        }
                        parent = p.parent;
                    }
                    None => break,
                }
            }
        }

        segments.reverse();
        let mut full_name = segments.join(".");

        if !postfix.is_empty() {
            if !full_name.is_empty() {
                full_name.push('.');
            }
            full_name.push_str(&postfix.join("."));
        }

        full_name
    }

    /// Dotted path of a field.
    pub fn path(&self, id: FieldId) -> String {
        self.full_name(id, &[])
    }
}

impl Index<FieldId> for FieldArena {
    type Output = Field;

    fn index(&self, id: FieldId) -> &Field {
        &self.fields[id.0]
    }
}
