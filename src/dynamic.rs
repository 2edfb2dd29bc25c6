//! Schema-document-driven records.
//!
//! [`DynamicRecord`] holds mapped values under their canonical field names
//! instead of struct fields, so a loaded [`SchemaDoc`] is enough to map a
//! workbook without compiling a record type. Its validation predicate
//! enforces the document's `required` flags: a required field must be set,
//! and a required text field must be non-empty after trimming. This is
//! what the CLI runs.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use crate::schema::{FieldValue, RecordSchema, SchemaDoc, SemanticType, Validate};

/// A record whose fields live in a name-to-value map. Serializes as a
/// flat JSON object keyed by canonical field name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DynamicRecord {
    #[serde(flatten)]
    values: BTreeMap<String, FieldValue>,
    #[serde(skip)]
    required: Vec<String>,
}

impl DynamicRecord {
    fn with_required(required: Vec<String>) -> Self {
        Self {
            values: BTreeMap::new(),
            required,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }
}

impl Validate for DynamicRecord {
    fn is_valid(&self) -> bool {
        self.required.iter().all(|name| match self.values.get(name) {
            Some(FieldValue::Text(text)) => !text.trim().is_empty(),
            Some(_) => true,
            None => false,
        })
    }
}

impl SchemaDoc {
    /// Builds the binding table for [`DynamicRecord`]s from this document.
    pub fn bind(&self) -> RecordSchema<DynamicRecord> {
        let mut builder = RecordSchema::builder();
        for spec in &self.fields {
            let key = spec.name.clone();
            let aliases = spec.aliases.clone();
            builder = match spec.datatype {
                SemanticType::Text => builder.text(
                    &spec.name,
                    aliases,
                    move |record: &mut DynamicRecord, value| {
                        record.set(&key, FieldValue::Text(value));
                    },
                ),
                SemanticType::Integer => builder.integer(&spec.name, aliases, move |record, value| {
                    record.set(&key, FieldValue::Integer(value));
                }),
                SemanticType::Decimal => builder.decimal(&spec.name, aliases, move |record, value| {
                    record.set(&key, FieldValue::Decimal(value));
                }),
                SemanticType::Boolean => builder.boolean(&spec.name, aliases, move |record, value| {
                    record.set(&key, FieldValue::Boolean(value));
                }),
            };
        }
        builder.build()
    }

    /// Factory seeding each fresh record with this document's required
    /// field names, for [`crate::engine::MappingEngine::run_with_factory`].
    pub fn record_factory(&self) -> impl Fn() -> Result<DynamicRecord> + use<> {
        let required: Vec<String> = self
            .fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name.clone())
            .collect();
        move || Ok(DynamicRecord::with_required(required.clone()))
    }
}
