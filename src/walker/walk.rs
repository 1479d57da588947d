//! Record walking.

use crate::core::directive::parse_tag;
use crate::core::error::ValidationError;
use crate::core::record::Reflect;
use crate::walker::field::{Field, FieldArena, FieldId};
use log::trace;

/// Walk a record's exported fields into a fresh arena.
///
/// Private fields are skipped. Each field's tag under `tag_key` is parsed
/// into directives; a parse error fails the whole walk.
pub fn walk<R: Reflect + ?Sized>(record: &R, tag_key: &str) -> Result<FieldArena, ValidationError> {
    let mut arena = FieldArena::new();
    walk_into(&mut arena, None, record, tag_key)?;
    Ok(arena)
}

/// Walk a record into an existing arena under `parent`.
///
/// Used for nested records: the new fields' paths are prefixed with the
/// parent's path. On error the arena is left untouched.
pub fn walk_into<R: Reflect + ?Sized>(
    arena: &mut FieldArena,
    parent: Option<FieldId>,
    record: &R,
    tag_key: &str,
) -> Result<Vec<FieldId>, ValidationError> {
    let reflected = record.reflect();
    let mut fields = Vec::with_capacity(reflected.fields.len());

    for record_field in reflected.fields {
        if !record_field.is_exported() {
            continue;
        }

        let directives = parse_tag(record_field.tags.get(tag_key)).map_err(|source| {
            let field = match parent {
                Some(parent_id) => arena.full_name(parent_id, &[record_field.name.as_str()]),
                None => record_field.name.clone(),
            };
            ValidationError::TagParse {
                record: reflected.name.clone(),
                field,
                source,
            }
        })?;

        fields.push(Field {
            parent,
            name: record_field.name,
            value: record_field.value,
            directives,
        });
    }

    trace!(
        "walked {} exported field(s) of '{}'",
        fields.len(),
        reflected.name
    );

    Ok(arena.extend(fields))
}
