//! Fixture value generation
//!
//! Turns sample values reported by the ORM layer into literals suitable for
//! generated fixture files, and derives a second, distinguishable value from a
//! first one so that generated fixtures can describe two different records.
//!
//! All randomness comes from the caller's [`Rng`], so a seeded generator
//! gives reproducible output.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

use crate::error::{Result, ScaffoldError};
use crate::field::{FieldKind, FieldSpec};
use crate::registry::{EnumValueProvider, TypeCatalog, TypeRegistry};

/// Base type enum column types derive from unless configured otherwise
pub const DEFAULT_ENUM_BASE_TYPE: &str = "Fresh\\DoctrineEnumBundle\\DBAL\\Types\\AbstractEnumType";

/// Matches `<(new \DateTime('...'))>` and captures the date literal
static DATE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\(new \\DateTime\('(.*)'\)\)>")
        .expect("date placeholder pattern is valid")
});

/// Sample value source for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixtureSource {
    /// A single raw value
    Value(String),
    /// Candidate values, one is picked at random
    Choices(Vec<String>),
}

impl From<&str> for FixtureSource {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for FixtureSource {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<String>> for FixtureSource {
    fn from(values: Vec<String>) -> Self {
        Self::Choices(values)
    }
}

/// Produces and mutates fixture values
#[derive(Clone)]
pub struct FixtureGenerator {
    types: Arc<dyn TypeRegistry>,
    enums: Arc<dyn EnumValueProvider>,
    enum_base_type: String,
}

impl FixtureGenerator {
    /// Create a generator from a type registry and an enum value provider
    #[must_use]
    pub fn new(types: Arc<dyn TypeRegistry>, enums: Arc<dyn EnumValueProvider>) -> Self {
        Self {
            types,
            enums,
            enum_base_type: DEFAULT_ENUM_BASE_TYPE.to_string(),
        }
    }

    /// Create a generator whose types and enum values come from one catalog
    #[must_use]
    pub fn from_catalog(catalog: Arc<TypeCatalog>) -> Self {
        Self::new(catalog.clone(), catalog)
    }

    /// Use a different base type to recognise enum column types
    #[must_use]
    pub fn with_enum_base_type(mut self, enum_base_type: impl Into<String>) -> Self {
        self.enum_base_type = enum_base_type.into();
        self
    }

    /// Base type enum column types derive from
    #[must_use]
    pub fn enum_base_type(&self) -> &str {
        &self.enum_base_type
    }

    /// Resolve a declared column type against this generator's registry
    #[must_use]
    pub fn resolve_kind(&self, declared_type: &str) -> FieldKind {
        FieldKind::resolve(declared_type, self.types.as_ref(), &self.enum_base_type)
    }

    /// Literal for a generated fixture
    ///
    /// - choices: one picked uniformly, empty when there are none
    /// - `<(new \DateTime('...'))>`: the date literal inside
    /// - other values starting with `<`: unresolved placeholder, empty
    /// - anything else: single quotes replaced by double quotes
    ///
    /// ```
    /// # use entity_scaffold::{FixtureGenerator, FixtureSource, TypeCatalog};
    /// # use std::sync::Arc;
    /// let generator = FixtureGenerator::from_catalog(Arc::new(TypeCatalog::default()));
    /// let mut rng = rand::thread_rng();
    ///
    /// let date = FixtureSource::from("<(new \\DateTime('2020-01-01'))>");
    /// assert_eq!(generator.fixture(&date, &mut rng), "2020-01-01");
    /// assert_eq!(generator.fixture(&"<name()>".into(), &mut rng), "");
    /// assert_eq!(generator.fixture(&"it's".into(), &mut rng), "it\"s");
    /// ```
    pub fn fixture<R: Rng + ?Sized>(&self, source: &FixtureSource, rng: &mut R) -> String {
        match source {
            FixtureSource::Choices(values) => values.choose(rng).cloned().unwrap_or_default(),
            FixtureSource::Value(value) => {
                let value = DATE_PLACEHOLDER
                    .captures(value)
                    .and_then(|captures| captures.get(1))
                    .map_or(value.as_str(), |literal| literal.as_str());

                if value.starts_with('<') {
                    return String::new();
                }

                value.replace('\'', "\"")
            }
        }
    }

    /// Derive a second fixture value from `value`
    ///
    /// The declared type decides the mutation:
    ///
    /// - boolean: the opposite literal
    /// - date or datetime: one day later, as `YYYY-MM-DD`
    /// - enum type: another legal value of the enum
    /// - anything else: the value plus a random integer in `1..=100` when it
    ///   is numeric, `"{additional} {value}"` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidDate`] when a date value cannot be
    /// parsed and [`ScaffoldError::UnknownEnumType`] when the enum type has no
    /// registered values.
    pub fn modify_value<R: Rng + ?Sized>(
        &self,
        value: &str,
        declared_type: &str,
        additional: &str,
        rng: &mut R,
    ) -> Result<String> {
        let kind = self.resolve_kind(declared_type);
        self.modify_kind(value, &kind, additional, rng)
    }

    /// [`Self::modify_value`] driven by a [`FieldSpec`]
    ///
    /// # Errors
    ///
    /// See [`Self::modify_value`].
    pub fn modify_field<R: Rng + ?Sized>(&self, spec: &FieldSpec, rng: &mut R) -> Result<String> {
        self.modify_value(&spec.value, &spec.field_type, spec.modifier(), rng)
    }

    /// [`Self::modify_value`] for an already resolved kind
    ///
    /// # Errors
    ///
    /// See [`Self::modify_value`].
    pub fn modify_kind<R: Rng + ?Sized>(
        &self,
        value: &str,
        kind: &FieldKind,
        additional: &str,
        rng: &mut R,
    ) -> Result<String> {
        match kind {
            FieldKind::Boolean => Ok(toggle_boolean(value).to_string()),
            FieldKind::Date | FieldKind::DateTime => next_day(value),
            FieldKind::Enum(enum_type) => self.get_enum_value(enum_type, value, rng),
            FieldKind::Integer | FieldKind::Numeric | FieldKind::Text(_) => {
                let number = increment_number(value, rng.gen_range(1..=100));
                Ok(number.unwrap_or_else(|| format!("{additional} {value}")))
            }
        }
    }

    /// Another legal value of `enum_type`, chosen uniformly
    ///
    /// The current value is left out of the draw. When it is the only legal
    /// value it is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::UnknownEnumType`] when the provider knows no
    /// values for `enum_type`.
    pub fn get_enum_value<R: Rng + ?Sized>(
        &self,
        enum_type: &str,
        current: &str,
        rng: &mut R,
    ) -> Result<String> {
        let mut values = self
            .enums
            .values(enum_type)
            .ok_or_else(|| ScaffoldError::UnknownEnumType(enum_type.to_string()))?;

        if let Some(position) = values.iter().position(|value| value == current) {
            values.remove(position);
        }

        let Some(next) = values.choose(rng) else {
            tracing::debug!(enum_type, current, "keeping the only enum value");
            return Ok(current.to_string());
        };

        Ok(next.clone())
    }
}

impl std::fmt::Debug for FixtureGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureGenerator")
            .field("enum_base_type", &self.enum_base_type)
            .finish_non_exhaustive()
    }
}

fn toggle_boolean(value: &str) -> &'static str {
    let value = value.trim().to_ascii_lowercase();
    if matches!(value.as_str(), "" | "0" | "false") {
        "true"
    } else {
        "false"
    }
}

fn increment_number(value: &str, offset: i64) -> Option<String> {
    let trimmed = value.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
        return integer.checked_add(offset).map(|sum| sum.to_string());
    }

    #[allow(clippy::cast_precision_loss)]
    let offset = offset as f64;
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .map(|number| (number + offset).to_string())
}

fn next_day(value: &str) -> Result<String> {
    let invalid = || ScaffoldError::InvalidDate(value.to_string());
    let date = parse_date(value.trim()).ok_or_else(invalid)?;
    let next = date.succ_opt().ok_or_else(invalid)?;

    Ok(next.format("%Y-%m-%d").to_string())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];
    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    if value.is_empty() {
        return Some(chrono::Local::now().date_naive());
    }

    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok());
    let datetime = || {
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|datetime| datetime.date())
    };
    let rfc3339 = || {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|datetime| datetime.date_naive())
    };

    date.or_else(datetime).or_else(rfc3339)
}
