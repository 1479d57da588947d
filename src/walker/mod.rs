//! Reflective field walking.
//!
//! Turns a [`Reflect`](crate::core::record::Reflect) record into a flat,
//! path-addressable list of fields with their parsed directives.

pub mod field;
pub mod walk;

pub use field::{Field, FieldArena, FieldId};
pub use walk::{walk, walk_into};
