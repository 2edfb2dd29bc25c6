//! Schema model: semantic types, field bindings, and YAML persistence.
//!
//! This module owns [`SemanticType`] (the four logical value kinds a field
//! can hold), [`FieldValue`] (a coerced cell value), [`RecordSchema`] (the
//! caller-built table of field bindings driving the mapping engine), and
//! [`SchemaDoc`] (the on-disk YAML form of a schema, for callers that map
//! into [`crate::dynamic::DynamicRecord`]s instead of a compiled type).
//!
//! A binding carries the field's canonical name, any number of alternate
//! header labels (aliases), the semantic type to coerce cells into, and a
//! setter closure that writes the coerced value into the record. Listing
//! bindings explicitly through [`RecordSchema::builder`] replaces runtime
//! field discovery: the schema is always declared, never inferred.

use std::{fmt, fs::File, io::BufReader, path::Path, str::FromStr};

use anyhow::{Context, Result, anyhow, bail, ensure};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

const CURRENT_SCHEMA_VERSION: &str = "1.0.0";

/// The logical value kind a field holds, independent of how the source
/// cell physically stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    Text,
    Integer,
    Decimal,
    Boolean,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Text => "text",
            SemanticType::Integer => "integer",
            SemanticType::Decimal => "decimal",
            SemanticType::Boolean => "boolean",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["text", "integer", "decimal", "boolean"]
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SemanticType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "text" | "string" => Ok(SemanticType::Text),
            "integer" | "int" => Ok(SemanticType::Integer),
            "decimal" | "double" | "float" => Ok(SemanticType::Decimal),
            "boolean" | "bool" => Ok(SemanticType::Boolean),
            _ => Err(anyhow!(
                "Unknown field datatype '{value}'. Supported types: {}",
                SemanticType::variants().join(", ")
            )),
        }
    }
}

impl Serialize for SemanticType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SemanticType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        SemanticType::from_str(&token).map_err(|err| de::Error::custom(err.to_string()))
    }
}

/// A cell value coerced to a field's semantic type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
}

impl FieldValue {
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            FieldValue::Text(_) => SemanticType::Text,
            FieldValue::Integer(_) => SemanticType::Integer,
            FieldValue::Decimal(_) => SemanticType::Decimal,
            FieldValue::Boolean(_) => SemanticType::Boolean,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Decimal(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// The self-validation capability a record type must expose. Invoked once
/// per row after all mapped fields are populated; a `false` drops the row.
pub trait Validate {
    fn is_valid(&self) -> bool;
}

type Setter<T> = Box<dyn Fn(&mut T, FieldValue)>;

/// One field of a [`RecordSchema`]: canonical name, alternate header
/// labels, the semantic type cells are coerced into, and the setter that
/// writes the coerced value into the record.
pub struct FieldBinding<T> {
    name: String,
    aliases: Vec<String>,
    datatype: SemanticType,
    assign: Setter<T>,
}

impl<T> FieldBinding<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn datatype(&self) -> SemanticType {
        self.datatype
    }

    pub(crate) fn assign(&self, record: &mut T, value: FieldValue) {
        (self.assign)(record, value);
    }
}

impl<T> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("datatype", &self.datatype)
            .finish()
    }
}

/// An ordered set of field bindings for records of type `T`. Built once,
/// immutable thereafter; the engine borrows it for the duration of a run.
#[derive(Debug)]
pub struct RecordSchema<T> {
    fields: Vec<FieldBinding<T>>,
}

impl<T> RecordSchema<T> {
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder { fields: Vec::new() }
    }

    pub fn fields(&self) -> &[FieldBinding<T>] {
        &self.fields
    }

    pub fn field(&self, slot: usize) -> &FieldBinding<T> {
        &self.fields[slot]
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Fluent construction of a [`RecordSchema`]. Each helper declares one
/// field with a setter typed to the field's semantic type; the builder
/// wraps it so the engine can hand every setter a [`FieldValue`].
pub struct SchemaBuilder<T> {
    fields: Vec<FieldBinding<T>>,
}

impl<T> SchemaBuilder<T> {
    pub fn text<I, S, F>(self, name: &str, aliases: I, set: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&mut T, String) + 'static,
    {
        self.push(name, aliases, SemanticType::Text, move |record, value| {
            if let FieldValue::Text(text) = value {
                set(record, text);
            }
        })
    }

    pub fn integer<I, S, F>(self, name: &str, aliases: I, set: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&mut T, i64) + 'static,
    {
        self.push(name, aliases, SemanticType::Integer, move |record, value| {
            if let FieldValue::Integer(number) = value {
                set(record, number);
            }
        })
    }

    pub fn decimal<I, S, F>(self, name: &str, aliases: I, set: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&mut T, f64) + 'static,
    {
        self.push(name, aliases, SemanticType::Decimal, move |record, value| {
            if let FieldValue::Decimal(number) = value {
                set(record, number);
            }
        })
    }

    pub fn boolean<I, S, F>(self, name: &str, aliases: I, set: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&mut T, bool) + 'static,
    {
        self.push(name, aliases, SemanticType::Boolean, move |record, value| {
            if let FieldValue::Boolean(flag) = value {
                set(record, flag);
            }
        })
    }

    pub fn build(self) -> RecordSchema<T> {
        RecordSchema {
            fields: self.fields,
        }
    }

    fn push<I, S>(
        mut self,
        name: &str,
        aliases: I,
        datatype: SemanticType,
        assign: impl Fn(&mut T, FieldValue) + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.push(FieldBinding {
            name: name.to_string(),
            aliases: aliases.into_iter().map(Into::into).collect(),
            datatype,
            assign: Box::new(assign),
        });
        self
    }
}

/// One field of a schema document: the serialized counterpart of a
/// [`FieldBinding`], plus the `required` flag consumed by
/// [`crate::dynamic::DynamicRecord`] validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub datatype: SemanticType,
    #[serde(default)]
    pub required: bool,
}

/// The on-disk YAML form of a schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDoc {
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}

impl SchemaDoc {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening schema file {path:?}"))?;
        let reader = BufReader::new(file);
        let doc: SchemaDoc = serde_yaml::from_reader(reader).context("Parsing schema YAML")?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let mut doc = self.clone();
        if doc.schema_version.is_none() {
            doc.schema_version = Some(CURRENT_SCHEMA_VERSION.to_string());
        }
        let file = File::create(path).with_context(|| format!("Creating schema file {path:?}"))?;
        serde_yaml::to_writer(file, &doc).context("Writing schema YAML")
    }

    /// Canonical names must be unique; alias overlap is tolerated at index
    /// build time (first owner wins), so it is not rejected here.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.fields.is_empty(), "Schema declares no fields");
        for (idx, field) in self.fields.iter().enumerate() {
            ensure!(
                !field.name.trim().is_empty(),
                "Field at position {} has an empty name",
                idx + 1
            );
            if self.fields[..idx].iter().any(|f| f.name == field.name) {
                bail!("Field name '{}' is declared more than once", field.name);
            }
        }
        Ok(())
    }

    /// Starter document for `sheet-mapped template`.
    pub fn template() -> Self {
        SchemaDoc {
            fields: vec![
                FieldSpec {
                    name: "name".to_string(),
                    aliases: vec!["full name".to_string()],
                    datatype: SemanticType::Text,
                    required: true,
                },
                FieldSpec {
                    name: "amount".to_string(),
                    aliases: Vec::new(),
                    datatype: SemanticType::Decimal,
                    required: false,
                },
            ],
            schema_version: Some(CURRENT_SCHEMA_VERSION.to_string()),
        }
    }
}
