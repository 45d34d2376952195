//! Field metadata supplied by the ORM layer
//!
//! The ORM collaborator describes each mapped field by name, declared column
//! type and, for relations, the association kind. Declared types are
//! resolved into a [`FieldKind`] which drives fixture value generation.
//!
//! # Declared types
//!
//! - `boolean` - [`FieldKind::Boolean`]
//! - `integer`, `smallint`, `bigint` - [`FieldKind::Integer`]
//! - `decimal`, `float` - [`FieldKind::Numeric`]
//! - `date`, `date_immutable` - [`FieldKind::Date`]
//! - `datetime`, `datetime_immutable`, `datetimetz` - [`FieldKind::DateTime`]
//! - subtypes of the configured enum base type - [`FieldKind::Enum`]
//! - anything else - [`FieldKind::Text`]

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fixture::FixtureSource;
use crate::registry::TypeRegistry;

/// Modifier prepended to free-text values when a second fixture is generated
pub const DEFAULT_MODIFIER: &str = "new";

/// Resolved field type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Boolean column
    Boolean,
    /// Integer column
    Integer,
    /// Decimal or floating point column
    Numeric,
    /// Date column
    Date,
    /// Date and time column
    DateTime,
    /// Enum column type
    Enum(String),
    /// Any other column, treated as free text
    Text(String),
}

impl FieldKind {
    /// Resolve a declared column type
    ///
    /// `enum_base` names the type every enum column type derives from.
    ///
    /// ```
    /// # use entity_scaffold::{FieldKind, TypeCatalog};
    /// let catalog = TypeCatalog::default().with_enum("status", "AbstractEnumType", ["draft"]);
    ///
    /// assert_eq!(FieldKind::resolve("boolean", &catalog, "AbstractEnumType"), FieldKind::Boolean);
    /// assert_eq!(
    ///     FieldKind::resolve("status", &catalog, "AbstractEnumType"),
    ///     FieldKind::Enum("status".into())
    /// );
    /// assert_eq!(
    ///     FieldKind::resolve("text", &catalog, "AbstractEnumType"),
    ///     FieldKind::Text("text".into())
    /// );
    /// ```
    #[must_use]
    pub fn resolve(declared: &str, types: &dyn TypeRegistry, enum_base: &str) -> Self {
        match declared {
            "boolean" => Self::Boolean,
            "integer" | "smallint" | "bigint" => Self::Integer,
            "decimal" | "float" => Self::Numeric,
            "date" | "date_immutable" => Self::Date,
            "datetime" | "datetime_immutable" | "datetimetz" => Self::DateTime,
            other if types.is_subtype_of(other, enum_base) => Self::Enum(other.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Declared type name
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Enum(name) | Self::Text(name) => name,
        }
    }

    /// Whether generated source writes values of this kind without quotes
    #[must_use]
    pub const fn is_bare_literal(&self) -> bool {
        matches!(self, Self::Boolean | Self::Integer)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A fixture value together with its declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Raw value
    pub value: String,
    /// Declared column type
    pub field_type: String,
    /// Prefix for free-text mutations, [`DEFAULT_MODIFIER`] when absent
    #[serde(default)]
    pub modifier: Option<String>,
}

impl FieldSpec {
    /// Create a spec without a modifier
    pub fn new(value: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            field_type: field_type.into(),
            modifier: None,
        }
    }

    /// Set the free-text modifier
    #[must_use]
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    /// Modifier to use, falling back to [`DEFAULT_MODIFIER`]
    #[must_use]
    pub fn modifier(&self) -> &str {
        self.modifier.as_deref().unwrap_or(DEFAULT_MODIFIER)
    }
}

/// Kind of relation between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// One-to-one
    OneToOne,
    /// Many-to-one
    ManyToOne,
    /// One-to-many
    OneToMany,
    /// Many-to-many
    ManyToMany,
}

/// An uploadable property and the property that stores its file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadableField {
    /// Property holding the uploaded file
    pub property: String,
    /// Property holding the stored file name
    pub file_name_property: String,
}

impl UploadableField {
    /// Create an uploadable field description
    pub fn new(property: impl Into<String>, file_name_property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            file_name_property: file_name_property.into(),
        }
    }
}

/// Everything the ORM layer reports about one mapped field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Property name
    pub name: String,
    /// Declared column type
    pub field_type: String,
    /// Sample value or values for fixtures
    pub fixture: FixtureSource,
    /// Association kind for relations
    #[serde(default)]
    pub association: Option<AssociationKind>,
}

impl FieldMetadata {
    /// Describe a plain column
    pub fn column(
        name: impl Into<String>,
        field_type: impl Into<String>,
        fixture: impl Into<FixtureSource>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            fixture: fixture.into(),
            association: None,
        }
    }

    /// Describe a relation
    pub fn association(
        name: impl Into<String>,
        target: impl Into<String>,
        kind: AssociationKind,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: target.into(),
            fixture: FixtureSource::Value(String::new()),
            association: Some(kind),
        }
    }
}
