//! Record reflection surface.
//!
//! Rust has no runtime struct introspection, so a type opts in by
//! implementing [`Reflect`] and describing its fields as a [`Record`]:
//! field names, visibility, per-key metadata tags and current values.
//!
//! ```rust
//! use tagcheck::prelude::*;
//!
//! struct User {
//!     name: String,
//!     age: Option<i64>,
//! }
//!
//! impl Reflect for User {
//!     fn record_name(&self) -> &str {
//!         "User"
//!     }
//!
//!     fn reflect(&self) -> Record {
//!         Record::builder("User")
//!             .field(RecordField::new("Name", self.name.clone()).tag("validate", "not_empty"))
//!             .field(RecordField::new("Age", self.age).tag("validate", "empty,min:18"))
//!             .build()
//!     }
//! }
//! ```

use crate::core::types::FieldValue;
use indexmap::IndexMap;
use std::rc::Rc;
use std::sync::Arc;

/// Whether a field is visible to the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Field is part of the record's public surface and gets walked.
    #[default]
    Exported,
    /// Field is internal and is skipped.
    Private,
}

/// Metadata tags attached to a field, keyed by tag key.
///
/// Looking up a missing key returns an empty string, which parses to no
/// directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTags {
    entries: IndexMap<String, String>,
}

impl FieldTags {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag text for a key.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Get the tag text for a key, or `""` if absent.
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(|s| s.as_str()).unwrap_or("")
    }
}

/// One field of a reflected record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    /// Declared identifier
    pub name: String,
    /// Exported or private
    pub visibility: Visibility,
    /// Metadata tags by key
    pub tags: FieldTags,
    /// Current value
    pub value: FieldValue,
}

impl RecordField {
    /// Create an exported field with no tags.
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Exported,
            tags: FieldTags::new(),
            value: value.into(),
        }
    }

    /// Create a private field. Private fields are never walked.
    pub fn private(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            visibility: Visibility::Private,
            ..Self::new(name, value)
        }
    }

    /// Attach tag text under a key.
    pub fn tag(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.tags.insert(key, text);
        self
    }

    /// Check whether the walker should visit this field.
    pub fn is_exported(&self) -> bool {
        self.visibility == Visibility::Exported
    }
}

/// Reflected view of a record: its type name and ordered fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// Type name, substituted for `{struct}` in error messages
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<RecordField>,
}

impl Record {
    /// Start building a record with the given type name.
    pub fn builder(name: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            record: Record {
                name: name.into(),
                fields: Vec::new(),
            },
        }
    }
}

/// Builder for [`Record`].
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Append a field.
    pub fn field(mut self, field: RecordField) -> Self {
        self.record.fields.push(field);
        self
    }

    /// Append an exported field carrying a single tag.
    pub fn tagged(
        self,
        name: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.field(RecordField::new(name, value).tag(key, text))
    }

    /// Finish the record.
    pub fn build(self) -> Record {
        self.record
    }
}

/// Types whose fields can be walked and validated.
pub trait Reflect {
    /// Type name of the record.
    fn record_name(&self) -> &str;

    /// Describe the record's fields and their current values.
    fn reflect(&self) -> Record;
}

impl Reflect for Record {
    fn record_name(&self) -> &str {
        &self.name
    }

    fn reflect(&self) -> Record {
        self.clone()
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn record_name(&self) -> &str {
        (**self).record_name()
    }

    fn reflect(&self) -> Record {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    fn record_name(&self) -> &str {
        (**self).record_name()
    }

    fn reflect(&self) -> Record {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn record_name(&self) -> &str {
        (**self).record_name()
    }

    fn reflect(&self) -> Record {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    fn record_name(&self) -> &str {
        (**self).record_name()
    }

    fn reflect(&self) -> Record {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn record_name(&self) -> &str {
        (**self).record_name()
    }

    fn reflect(&self) -> Record {
        (**self).reflect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ValueKind;

    #[test]
    fn test_builder_keeps_order() {
        let record = Record::builder("User")
            .tagged("Name", "validate", "not_empty", "ann")
            .field(RecordField::private("secret", 1i64))
            .build();

        assert_eq!(record.name, "User");
        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields[0].name, "Name");
        assert!(record.fields[0].is_exported());
        assert!(!record.fields[1].is_exported());
    }

    #[test]
    fn test_missing_tag_is_empty() {
        let field = RecordField::new("Name", "x").tag("json", "name");
        assert_eq!(field.tags.get("json"), "name");
        assert_eq!(field.tags.get("validate"), "");
    }

    #[test]
    fn test_reflect_through_references() {
        let record = Record::builder("Point")
            .field(RecordField::new("X", None::<i64>))
            .build();

        let by_ref: &Record = &record;
        let boxed: Box<Record> = Box::new(record.clone());
        let shared: Arc<Record> = Arc::new(record.clone());

        assert_eq!(by_ref.record_name(), "Point");
        assert_eq!(boxed.reflect(), record);
        assert_eq!(shared.reflect().fields[0].value, FieldValue::Nil(ValueKind::Integer));
    }
}
