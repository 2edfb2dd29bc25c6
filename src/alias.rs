//! Name-to-field lookup table built once per schema.
//!
//! Every recognized header label, canonical names plus declared aliases,
//! maps to exactly one field slot. Registration order is canonical name
//! first, then aliases, field by field in declaration order; a label that
//! is already taken stays with its first owner and the rejection is
//! reported as a collision.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::warn;

use crate::schema::RecordSchema;

/// A rejected alias registration: `name` stays with `owner`, the
/// registration attempted by `field` is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    pub name: String,
    pub field: String,
    pub owner: String,
}

/// Immutable lookup from recognized label to field slot (index into the
/// schema's binding list).
#[derive(Debug, Default)]
pub struct AliasIndex {
    names: HashMap<String, usize>,
}

impl AliasIndex {
    /// Builds the index for a schema. Pure function of the schema apart
    /// from the warning logged per collision.
    pub fn build<T>(schema: &RecordSchema<T>) -> (Self, Vec<AliasCollision>) {
        let mut names: HashMap<String, usize> = HashMap::new();
        let mut collisions = Vec::new();
        for (slot, field) in schema.fields().iter().enumerate() {
            let labels =
                std::iter::once(field.name()).chain(field.aliases().iter().map(String::as_str));
            for label in labels {
                let trimmed = label.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match names.entry(trimmed.to_string()) {
                    Entry::Occupied(existing) => {
                        let owner = schema.field(*existing.get()).name().to_string();
                        warn!(
                            "alias '{}' on field '{}' collides with field '{}'; keeping the first owner",
                            trimmed,
                            field.name(),
                            owner
                        );
                        collisions.push(AliasCollision {
                            name: trimmed.to_string(),
                            field: field.name().to_string(),
                            owner,
                        });
                    }
                    Entry::Vacant(vacant) => {
                        vacant.insert(slot);
                    }
                }
            }
        }
        (Self { names }, collisions)
    }

    /// Case-sensitive lookup after trimming surrounding whitespace.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.names.get(name.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
