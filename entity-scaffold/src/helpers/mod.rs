//! Identifier helpers for code generation
//!
//! Naming conventions, pluralization, quoting and fixture reference names
//! used when rendering scaffold templates. Every case-changing helper has a
//! scalar form and an `_all` form that applies it element-wise to a
//! [`StringCollection`], keeping keys and order.

mod camel_case;
mod collection;

pub use camel_case::CamelCaseParts;
pub use collection::StringCollection;

use inflector::Inflector;

use crate::field::{AssociationKind, UploadableField};

/// Suffix appended to the first fixture reference of a model
pub const DEFAULT_FIXTURE_SUFFIX: &str = "-1";

/// Template helpers for scaffold generation
pub struct GeneratorHelpers;

impl GeneratorHelpers {
    /// Convert an identifier to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::tableize("OrderItem"), "order_item");
    /// assert_eq!(GeneratorHelpers::tableize("orderItem"), "order_item");
    /// ```
    #[must_use]
    pub fn tableize(input: &str) -> String {
        input.to_snake_case()
    }

    /// [`Self::tableize`] applied to every element
    pub fn tableize_all<C: StringCollection>(items: C) -> C::Output {
        items.map_strings(Self::tableize)
    }

    /// Lowercase words separated by spaces
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::lower_words("OrderItem"), "order item");
    /// ```
    #[must_use]
    pub fn lower_words(input: &str) -> String {
        Self::tableize(input).replace('_', " ")
    }

    /// [`Self::lower_words`] applied to every element
    pub fn lower_words_all<C: StringCollection>(items: C) -> C::Output {
        items.map_strings(Self::lower_words)
    }

    /// Pluralize a word
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::plural("order_item"), "order_items");
    /// assert_eq!(GeneratorHelpers::plural("category"), "categories");
    /// ```
    ///
    /// # Note
    ///
    /// Irregular nouns are not always handled; model names are expected to be
    /// regular words.
    #[must_use]
    pub fn plural(input: &str) -> String {
        input.to_plural()
    }

    /// [`Self::plural`] applied to every element
    pub fn plural_all<C: StringCollection>(items: C) -> C::Output {
        items.map_strings(Self::plural)
    }

    /// Singularize a word
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::singular("order_items"), "order_item");
    /// assert_eq!(GeneratorHelpers::singular("categories"), "category");
    /// ```
    #[must_use]
    pub fn singular(input: &str) -> String {
        input.to_singular()
    }

    /// [`Self::singular`] applied to every element
    pub fn singular_all<C: StringCollection>(items: C) -> C::Output {
        items.map_strings(Self::singular)
    }

    /// Lowercase the first character only
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::lower_first("OrderItem"), "orderItem");
    /// ```
    #[must_use]
    pub fn lower_first(input: &str) -> String {
        let mut chars = input.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };
        first.to_lowercase().chain(chars).collect()
    }

    /// [`Self::lower_first`] applied to every element
    pub fn lower_first_all<C: StringCollection>(items: C) -> C::Output {
        items.map_strings(Self::lower_first)
    }

    /// Uppercase the first character only
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::upper_first("orderItem"), "OrderItem");
    /// ```
    #[must_use]
    pub fn upper_first(input: &str) -> String {
        let mut chars = input.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };
        first.to_uppercase().chain(chars).collect()
    }

    /// [`Self::upper_first`] applied to every element
    pub fn upper_first_all<C: StringCollection>(items: C) -> C::Output {
        items.map_strings(Self::upper_first)
    }

    /// Lowercase words separated by dashes
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::lower_dash("OrderItem"), "order-item");
    /// ```
    #[must_use]
    pub fn lower_dash(input: &str) -> String {
        Self::tableize(input).replace('_', "-")
    }

    /// [`Self::lower_dash`] applied to every element
    pub fn lower_dash_all<C: StringCollection>(items: C) -> C::Output {
        items.map_strings(Self::lower_dash)
    }

    /// Human-readable title
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::to_title("OrderItem"), "Order Item");
    /// ```
    #[must_use]
    pub fn to_title(input: &str) -> String {
        input.to_title_case()
    }

    /// Append `suffix`, first dropping the trailing words of `basename` it repeats
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// let form_type = |name: &str| GeneratorHelpers::add_basename_suffix(name, "FormType");
    /// assert_eq!(form_type("Level"), "LevelFormType");
    /// assert_eq!(form_type("LevelType"), "LevelFormType");
    /// assert_eq!(form_type("LevelFormType"), "LevelFormType");
    /// ```
    #[must_use]
    pub fn add_basename_suffix(basename: &str, suffix: &str) -> String {
        let basename_parts = CamelCaseParts::new(basename);
        let suffix_parts = CamelCaseParts::new(suffix);
        let shared = basename_parts.shared_tail_len(&suffix_parts);

        format!("{}{suffix}", basename_parts.without_last(shared))
    }

    /// Quote a value for generated source, leaving booleans and integers bare
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::wrap_in_quote("5", Some("integer"), true), "5");
    /// assert_eq!(GeneratorHelpers::wrap_in_quote("x", Some("string"), true), "'x'");
    /// assert_eq!(GeneratorHelpers::wrap_in_quote("x", None, false), "\"x\"");
    /// ```
    #[must_use]
    pub fn wrap_in_quote(value: &str, field_type: Option<&str>, single_quotes: bool) -> String {
        match field_type {
            Some("boolean" | "integer") => value.to_string(),
            _ if single_quotes => format!("'{value}'"),
            _ => format!("\"{value}\""),
        }
    }

    /// Double-quote every element
    pub fn wrap_in_quotes<C: StringCollection>(items: C) -> C::Output {
        items.map_strings(|item| format!("\"{item}\""))
    }

    /// Append `part` unless `input` is empty
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(GeneratorHelpers::add_to_end_if_not_empty("Admin", "\\"), "Admin\\");
    /// assert_eq!(GeneratorHelpers::add_to_end_if_not_empty("", "\\"), "");
    /// ```
    #[must_use]
    pub fn add_to_end_if_not_empty(input: &str, part: &str) -> String {
        if input.is_empty() {
            String::new()
        } else {
            format!("{input}{part}")
        }
    }

    /// Fixture reference name from a model's sub-directories and basename
    ///
    /// ```
    /// # use entity_scaffold::GeneratorHelpers;
    /// assert_eq!(
    ///     GeneratorHelpers::fixture_field_name(&["Admin", "Catalog"], "Product", "-1"),
    ///     "admin-catalog-product-1"
    /// );
    /// let name = GeneratorHelpers::fixture_field_name::<&str>(&[], "OrderItem", "-2");
    /// assert_eq!(name, "order-item-2");
    /// ```
    #[must_use]
    pub fn fixture_field_name<S: AsRef<str>>(
        sub_dirs: &[S],
        basename: &str,
        suffix: &str,
    ) -> String {
        let mut segments = Self::lower_dash_all(sub_dirs);
        segments.push(Self::lower_dash(basename));

        format!("{}{suffix}", segments.join("-"))
    }

    /// Whether the association is many-to-many
    #[must_use]
    pub const fn is_many_to_many(kind: AssociationKind) -> bool {
        matches!(kind, AssociationKind::ManyToMany)
    }

    /// Whether `field_name` stores the file name of an uploadable field
    #[must_use]
    pub fn is_uploadable_field(uploadable_fields: &[UploadableField], field_name: &str) -> bool {
        uploadable_fields
            .iter()
            .any(|field| field.file_name_property == field_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_tableize() {
        assert_eq!(GeneratorHelpers::tableize("OrderItem"), "order_item");
        assert_eq!(GeneratorHelpers::tableize("Product"), "product");
        assert_eq!(GeneratorHelpers::tableize("order_item"), "order_item");
    }

    #[test]
    fn test_lower_words_and_dash() {
        assert_eq!(GeneratorHelpers::lower_words("OrderItem"), "order item");
        assert_eq!(GeneratorHelpers::lower_dash("OrderItem"), "order-item");
        assert_eq!(GeneratorHelpers::lower_dash("Admin"), "admin");
    }

    #[test]
    fn test_plural_and_singular() {
        assert_eq!(GeneratorHelpers::plural("order_item"), "order_items");
        assert_eq!(GeneratorHelpers::plural("post"), "posts");
        assert_eq!(GeneratorHelpers::plural("category"), "categories");
        assert_eq!(GeneratorHelpers::singular("posts"), "post");
        assert_eq!(GeneratorHelpers::singular("categories"), "category");
    }

    #[test]
    fn test_first_character_case() {
        assert_eq!(GeneratorHelpers::lower_first("OrderItem"), "orderItem");
        assert_eq!(GeneratorHelpers::upper_first("orderItem"), "OrderItem");
        assert_eq!(GeneratorHelpers::upper_first("édition"), "Édition");
        assert_eq!(GeneratorHelpers::lower_first(""), "");
        assert_eq!(GeneratorHelpers::upper_first(""), "");
    }

    #[test]
    fn test_collection_forms_keep_structure() {
        let tables = GeneratorHelpers::tableize_all(vec!["OrderItem", "Product"]);
        assert_eq!(tables, ["order_item", "product"]);

        let labels = BTreeMap::from([("create", "CreateProduct"), ("edit", "EditProduct")]);
        let dashed = GeneratorHelpers::lower_dash_all(labels);
        assert_eq!(dashed["create"], "create-product");
        assert_eq!(dashed["edit"], "edit-product");

        let titles = GeneratorHelpers::upper_first_all(["name", "price"]);
        assert_eq!(titles, ["Name", "Price"]);
    }

    #[test]
    fn test_add_basename_suffix() {
        for basename in ["Level", "LevelType", "LevelFormType"] {
            assert_eq!(
                GeneratorHelpers::add_basename_suffix(basename, "FormType"),
                "LevelFormType"
            );
        }
    }

    #[test]
    fn test_add_basename_suffix_without_overlap() {
        let suffixed = GeneratorHelpers::add_basename_suffix;
        assert_eq!(suffixed("Product", "Admin"), "ProductAdmin");
        assert_eq!(suffixed("", "FormType"), "FormType");
        assert_eq!(suffixed("FormType", "FormType"), "FormType");
    }

    #[test]
    fn test_add_basename_suffix_stops_at_first_mismatch() {
        // "Form" is kept because "Level" breaks the trailing match first
        assert_eq!(
            GeneratorHelpers::add_basename_suffix("FormLevelType", "FormType"),
            "FormLevelFormType"
        );
        assert_eq!(
            GeneratorHelpers::add_basename_suffix("HTTPLevelType", "FormType"),
            "HTTPLevelFormType"
        );
    }

    #[test]
    fn test_wrap_in_quote() {
        let quote = GeneratorHelpers::wrap_in_quote;
        assert_eq!(quote("5", Some("integer"), true), "5");
        assert_eq!(quote("true", Some("boolean"), false), "true");
        assert_eq!(quote("x", Some("string"), true), "'x'");
        assert_eq!(quote("x", Some("string"), false), "\"x\"");
        assert_eq!(quote("1.5", Some("decimal"), true), "'1.5'");
    }

    #[test]
    fn test_wrap_in_quotes() {
        let quoted = GeneratorHelpers::wrap_in_quotes(vec!["new", "paid"]);
        assert_eq!(quoted, ["\"new\"", "\"paid\""]);
    }

    #[test]
    fn test_fixture_field_name() {
        let name = GeneratorHelpers::fixture_field_name::<&str>;
        assert_eq!(
            name(&["Admin", "Catalog"], "Product", "-1"),
            "admin-catalog-product-1"
        );
        assert_eq!(
            name(&["ShopAdmin"], "OrderItem", DEFAULT_FIXTURE_SUFFIX),
            "shop-admin-order-item-1"
        );
    }

    #[test]
    fn test_association_and_uploadable_checks() {
        let many = GeneratorHelpers::is_many_to_many;
        assert!(many(AssociationKind::ManyToMany));
        assert!(!many(AssociationKind::ManyToOne));

        let uploadable = vec![UploadableField::new("imageFile", "imageName")];
        let is_uploadable = GeneratorHelpers::is_uploadable_field;
        assert!(is_uploadable(&uploadable, "imageName"));
        assert!(!is_uploadable(&uploadable, "imageFile"));
        assert!(!is_uploadable(&[], "imageName"));
    }
}
