//! Template context for scaffolding one entity
//!
//! Combines the names derived by [`ModelClassParser`] with per-field fixture
//! samples into a single JSON value that code templates render from.

use rand::Rng;
use serde_json::Value;

use crate::error::Result;
use crate::field::{FieldKind, FieldMetadata, UploadableField, DEFAULT_MODIFIER};
use crate::fixture::FixtureGenerator;
use crate::helpers::{GeneratorHelpers, DEFAULT_FIXTURE_SUFFIX};
use crate::parser::ModelClassParser;

/// Suffix of the second fixture reference of each model
pub const SECOND_FIXTURE_SUFFIX: &str = "-2";

/// Builds template variables for a model and its fields
#[derive(Debug, Clone)]
pub struct ScaffoldContext<'a> {
    parser: &'a ModelClassParser,
    fixtures: &'a FixtureGenerator,
    uploadable_fields: Vec<UploadableField>,
}

impl<'a> ScaffoldContext<'a> {
    /// Create a context builder
    #[must_use]
    pub const fn new(parser: &'a ModelClassParser, fixtures: &'a FixtureGenerator) -> Self {
        Self {
            parser,
            fixtures,
            uploadable_fields: Vec::new(),
        }
    }

    /// Declare the model's uploadable fields
    #[must_use]
    pub fn with_uploadable_fields(mut self, uploadable_fields: Vec<UploadableField>) -> Self {
        self.uploadable_fields = uploadable_fields;
        self
    }

    /// Template variables for `model_class`
    ///
    /// # Errors
    ///
    /// Returns an error if the class is unknown, lies outside every bundle's
    /// entity directory, or one of its fixture values cannot be modified.
    pub fn build<R: Rng + ?Sized>(
        &self,
        model_class: &str,
        fields: &[FieldMetadata],
        rng: &mut R,
    ) -> Result<Value> {
        let class = self.parser.validate_class(model_class)?;
        let model_class = class.as_str();
        let parsed = self.parser.parse_model_class(model_class)?;
        let basename = parsed.model_basename.as_str();

        let fields = fields
            .iter()
            .map(|field| self.field_context(field, rng))
            .collect::<Result<Vec<_>>>()?;

        let has_flag = |flag: &str| fields.iter().any(|field| field[flag] == true);
        let has_date_fields = fields
            .iter()
            .any(|field| matches!(field["type"].as_str(), Some("date" | "datetime")));
        let has_enum_fields = has_flag("is_enum");
        let has_many_to_many = has_flag("is_many_to_many");
        let has_uploadable = has_flag("is_uploadable");

        tracing::debug!(
            model_class,
            fields = fields.len(),
            "built scaffold template context"
        );

        Ok(serde_json::json!({
            "model_class": model_class,
            "model_basename": basename,
            "model_bundle_name": parsed.model_bundle_name,
            "model_sub_dirs": self.parser.get_model_sub_dirs(model_class)?,
            "bundle_name": parsed.bundle.name,
            "bundle_namespace": parsed.bundle.namespace,
            "create_form_type_class": parsed.create_form_type_class,
            "create_form_type_basename": parsed.create_form_type_basename,
            "edit_form_type_class": parsed.edit_form_type_class,
            "edit_form_type_basename": parsed.edit_form_type_basename,
            "table_name": GeneratorHelpers::plural(&GeneratorHelpers::tableize(basename)),
            "model_lower_first": GeneratorHelpers::lower_first(basename),
            "model_lower_words": GeneratorHelpers::lower_words(basename),
            "model_lower_dash": GeneratorHelpers::lower_dash(basename),
            "model_plural": GeneratorHelpers::plural(basename),
            "model_title": GeneratorHelpers::to_title(basename),
            "fixture_names": [
                self.parser.fixture_field_name(model_class, DEFAULT_FIXTURE_SUFFIX)?,
                self.parser.fixture_field_name(model_class, SECOND_FIXTURE_SUFFIX)?,
            ],
            "fields": fields,
            "has_date_fields": has_date_fields,
            "has_enum_fields": has_enum_fields,
            "has_many_to_many": has_many_to_many,
            "has_uploadable": has_uploadable,
        }))
    }

    fn field_context<R: Rng + ?Sized>(
        &self,
        field: &FieldMetadata,
        rng: &mut R,
    ) -> Result<Value> {
        let is_uploadable =
            GeneratorHelpers::is_uploadable_field(&self.uploadable_fields, &field.name);

        if let Some(association) = field.association {
            // Relations point at the target's first fixture when it is scaffoldable
            let reference = self
                .parser
                .fixture_field_name(&field.field_type, DEFAULT_FIXTURE_SUFFIX)
                .ok();
            if reference.is_none() {
                tracing::warn!(
                    field = %field.name,
                    target = %field.field_type,
                    "association target has no fixture reference"
                );
            }

            return Ok(serde_json::json!({
                "name": field.name,
                "label": GeneratorHelpers::to_title(&field.name),
                "type": field.field_type,
                "association": association,
                "reference": reference,
                "is_enum": false,
                "is_many_to_many": GeneratorHelpers::is_many_to_many(association),
                "is_uploadable": is_uploadable,
            }));
        }

        let kind = self.fixtures.resolve_kind(&field.field_type);
        let first_value = self.fixtures.fixture(&field.fixture, rng);
        let second_value = if first_value.is_empty() {
            String::new()
        } else {
            self.fixtures
                .modify_kind(&first_value, &kind, DEFAULT_MODIFIER, rng)?
        };

        Ok(serde_json::json!({
            "name": field.name,
            "column_name": GeneratorHelpers::tableize(&field.name),
            "label": GeneratorHelpers::to_title(&field.name),
            "type": kind.type_name(),
            "first_value": quote(&first_value, &kind),
            "second_value": quote(&second_value, &kind),
            "is_enum": matches!(kind, FieldKind::Enum(_)),
            "is_many_to_many": false,
            "is_uploadable": is_uploadable,
        }))
    }
}

fn quote(value: &str, kind: &FieldKind) -> String {
    // An empty bare literal would leave a hole in generated source
    if value.is_empty() && kind.is_bare_literal() {
        return "null".to_string();
    }
    GeneratorHelpers::wrap_in_quote(value, Some(kind.type_name()), true)
}
