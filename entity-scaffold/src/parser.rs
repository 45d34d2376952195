//! Model class parsing
//!
//! Derives everything scaffolding needs to know about where an entity class
//! lives: the bundle that owns it, the sub-directories between the bundle's
//! entity directory and the class, and the class names of its form types.
//!
//! ```text
//! App\Entity\Admin\Catalog\Product
//! └┬┘ └─┬──┘ └─────┬─────┘ └──┬──┘
//!  │    │          │          └ basename
//!  │    │          └ sub-directories
//!  │    └ entity directory
//!  └ bundle namespace
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::class_name::{ClassName, NAMESPACE_SEPARATOR};
use crate::config::NamingSettings;
use crate::error::{Result, ScaffoldError};
use crate::helpers::GeneratorHelpers;
use crate::registry::{Bundle, BundleRegistry, FileExistenceChecker, TypeRegistry};

/// Names derived from one model class
///
/// Field order matches the order the parser derives them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedModelClass {
    /// Class basename, e.g. `Product`
    pub model_basename: String,
    /// Bundle-qualified name, e.g. `AppBundle:Admin\Product`
    pub model_bundle_name: String,
    /// Form type used for creation
    pub create_form_type_class: String,
    /// Basename of the creation form type
    pub create_form_type_basename: String,
    /// Form type used for editing
    pub edit_form_type_class: String,
    /// Basename of the edit form type
    pub edit_form_type_basename: String,
    /// Bundle owning the model
    pub bundle: Bundle,
}

/// Resolves model classes against a bundle registry
#[derive(Clone)]
pub struct ModelClassParser {
    bundles: Arc<BundleRegistry>,
    types: Arc<dyn TypeRegistry>,
    files: Arc<dyn FileExistenceChecker>,
    naming: NamingSettings,
}

impl ModelClassParser {
    /// Create a parser with default naming conventions
    #[must_use]
    pub fn new(
        bundles: Arc<BundleRegistry>,
        types: Arc<dyn TypeRegistry>,
        files: Arc<dyn FileExistenceChecker>,
    ) -> Self {
        Self {
            bundles,
            types,
            files,
            naming: NamingSettings::default(),
        }
    }

    /// Use different naming conventions
    #[must_use]
    pub fn with_naming(mut self, naming: NamingSettings) -> Self {
        self.naming = naming;
        self
    }

    /// Naming conventions in use
    #[must_use]
    pub const fn naming(&self) -> &NamingSettings {
        &self.naming
    }

    /// Bundle registry in use
    #[must_use]
    pub fn bundles(&self) -> &BundleRegistry {
        &self.bundles
    }

    /// Normalise a class name and check that the class exists
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::ClassNotFound`] if the type registry does not
    /// know the class.
    pub fn validate_class(&self, class: &str) -> Result<ClassName> {
        let class = ClassName::new(class);
        if !self.types.exists(class.as_str()) {
            return Err(ScaffoldError::ClassNotFound(class.to_string()));
        }

        Ok(class)
    }

    /// Bundle owning the model class, first match in registration order
    #[must_use]
    pub fn get_bundle(&self, model_class: &str) -> Option<&Bundle> {
        self.bundles.owner_of(&ClassName::new(model_class))
    }

    /// Short name of the bundle owning the model class
    #[must_use]
    pub fn get_bundle_name(&self, model_class: &str) -> Option<&str> {
        self.get_bundle(model_class)
            .map(|bundle| bundle.name.as_str())
    }

    /// Last segment of the model class
    #[must_use]
    pub fn get_model_basename(&self, model_class: &str) -> String {
        ClassName::new(model_class).basename().to_string()
    }

    /// Namespace segments between the bundle's entity directory and the basename
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::BundleNotFound`] if no bundle owns the class
    /// and [`ScaffoldError::OutsideEntityRoot`] if the class does not live
    /// under `<BundleNamespace>\Entity\`.
    pub fn get_model_sub_dirs(&self, model_class: &str) -> Result<Vec<String>> {
        let class = ClassName::new(model_class);
        self.sub_dirs(&class)
    }

    /// Bundle-qualified model name, `<Bundle>:<SubDir\...\><Basename>`
    ///
    /// # Errors
    ///
    /// See [`Self::get_model_sub_dirs`].
    pub fn get_model_bundle_name(&self, model_class: &str) -> Result<String> {
        let class = ClassName::new(model_class);
        let bundle = self.owning_bundle(&class)?;
        let sub_dirs = self.sub_dirs(&class)?.join("\\");
        let sub_dirs = GeneratorHelpers::add_to_end_if_not_empty(&sub_dirs, "\\");

        Ok(format!("{}:{sub_dirs}{}", bundle.name, class.basename()))
    }

    /// Form type class for the model
    ///
    /// The default is `<BundleNamespace>\Form\<SubDirs\><Basename>Type`. With
    /// a non-empty `prefix`, `<Prefix><Basename>Type` in the same namespace is
    /// used instead when its source file or class exists.
    ///
    /// # Errors
    ///
    /// See [`Self::get_model_sub_dirs`].
    pub fn get_form_type_class(&self, model_class: &str, prefix: &str) -> Result<String> {
        let class = ClassName::new(model_class);
        let basename = format!("{}{}", class.basename(), self.naming.form_type_suffix);

        if !prefix.is_empty() {
            let prefix = GeneratorHelpers::upper_first(prefix);
            let prefixed = format!("{prefix}{basename}");
            let prefixed = self.form_type_class(&class, &prefixed)?;

            if self.form_type_exists(&prefixed) {
                tracing::debug!(form_type = %prefixed, "using prefixed form type");
                return Ok(prefixed.to_string());
            }
            tracing::debug!(
                form_type = %prefixed,
                "prefixed form type not found, falling back to default"
            );
        }

        let form_type = self.form_type_class(&class, &basename)?;
        Ok(form_type.to_string())
    }

    /// All names scaffolding derives from a model class
    ///
    /// # Errors
    ///
    /// See [`Self::get_model_sub_dirs`].
    pub fn parse_model_class(&self, model_class: &str) -> Result<ParsedModelClass> {
        let NamingSettings {
            create_prefix,
            edit_prefix,
            ..
        } = &self.naming;
        let bundle = self.owning_bundle(&ClassName::new(model_class))?.clone();

        let model_basename = self.get_model_basename(model_class);
        let model_bundle_name = self.get_model_bundle_name(model_class)?;
        let create_form_type_class = self.get_form_type_class(model_class, create_prefix)?;
        let create_form_type_basename = self.get_model_basename(&create_form_type_class);
        let edit_form_type_class = self.get_form_type_class(model_class, edit_prefix)?;
        let edit_form_type_basename = self.get_model_basename(&edit_form_type_class);

        tracing::debug!(
            model_class,
            bundle = %bundle.name,
            create_form_type = %create_form_type_class,
            edit_form_type = %edit_form_type_class,
            "parsed model class"
        );

        Ok(ParsedModelClass {
            model_basename,
            model_bundle_name,
            create_form_type_class,
            create_form_type_basename,
            edit_form_type_class,
            edit_form_type_basename,
            bundle,
        })
    }

    /// Fixture reference name for the model, e.g. `admin-product-1`
    ///
    /// # Errors
    ///
    /// See [`Self::get_model_sub_dirs`].
    pub fn fixture_field_name(&self, model_class: &str, suffix: &str) -> Result<String> {
        let class = ClassName::new(model_class);
        let sub_dirs = self.sub_dirs(&class)?;

        Ok(GeneratorHelpers::fixture_field_name(
            &sub_dirs,
            class.basename(),
            suffix,
        ))
    }

    /// Source file a form type class is expected in
    #[must_use]
    pub fn class_source_path(&self, class: &ClassName) -> PathBuf {
        let mut path = self.naming.source_root.clone();
        path.extend(class.segments());
        path.set_extension(&self.naming.class_file_extension);
        path
    }

    fn owning_bundle(&self, class: &ClassName) -> Result<&Bundle> {
        self.bundles
            .owner_of(class)
            .ok_or_else(|| ScaffoldError::BundleNotFound(class.to_string()))
    }

    fn entity_root(&self, bundle: &Bundle) -> String {
        let entity_dir = &self.naming.entity_dir;
        format!("{}\\{entity_dir}\\", bundle.namespace)
    }

    fn sub_dirs(&self, class: &ClassName) -> Result<Vec<String>> {
        let bundle = self.owning_bundle(class)?;
        let entity_root = self.entity_root(bundle);

        let relative = class
            .as_str()
            .strip_prefix(&entity_root)
            .filter(|relative| !relative.is_empty())
            .ok_or_else(|| ScaffoldError::OutsideEntityRoot {
                class: class.to_string(),
                entity_root: entity_root.clone(),
            })?;

        if relative.split(NAMESPACE_SEPARATOR).any(str::is_empty) {
            return Err(ScaffoldError::EmptySegment(class.to_string()));
        }

        let mut sub_dirs: Vec<String> = relative
            .split(NAMESPACE_SEPARATOR)
            .map(str::to_string)
            .collect();
        sub_dirs.pop();
        Ok(sub_dirs)
    }

    fn form_type_class(&self, class: &ClassName, basename: &str) -> Result<ClassName> {
        let namespace = &self.owning_bundle(class)?.namespace;
        let form_dir = &self.naming.form_dir;
        let sub_dirs = self.sub_dirs(class)?.join("\\");
        let sub_dirs = GeneratorHelpers::add_to_end_if_not_empty(&sub_dirs, "\\");

        let form_type = format!("{namespace}\\{form_dir}\\{sub_dirs}{basename}");
        Ok(ClassName::new(form_type))
    }

    fn form_type_exists(&self, class: &ClassName) -> bool {
        self.files.is_file(&self.class_source_path(class)) || self.types.exists(class.as_str())
    }
}

impl std::fmt::Debug for ModelClassParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClassParser")
            .field("bundles", &self.bundles)
            .field("naming", &self.naming)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MockFileExistenceChecker, MockTypeRegistry};
    use std::path::Path;

    const PRODUCT: &str = "App\\Entity\\Product";
    const ADMIN_PRODUCT: &str = "App\\Entity\\Admin\\Product";
    const CATALOG_PRODUCT: &str = "App\\Entity\\Admin\\Catalog\\Product";

    fn bundles() -> Arc<BundleRegistry> {
        Arc::new(
            BundleRegistry::default()
                .with_bundle("AppFooBundle", "AppFoo")
                .with_bundle("AppBundle", "App"),
        )
    }

    fn parser_with(types: MockTypeRegistry, files: MockFileExistenceChecker) -> ModelClassParser {
        ModelClassParser::new(bundles(), Arc::new(types), Arc::new(files))
    }

    fn parser() -> ModelClassParser {
        let mut types = MockTypeRegistry::new();
        types.expect_exists().return_const(false);
        let mut files = MockFileExistenceChecker::new();
        files.expect_is_file().return_const(false);
        parser_with(types, files)
    }

    fn sub_dirs(model_class: &str) -> Vec<String> {
        parser().get_model_sub_dirs(model_class).unwrap()
    }

    fn sub_dirs_error(model_class: &str) -> ScaffoldError {
        parser().get_model_sub_dirs(model_class).unwrap_err()
    }

    fn bundle_name(model_class: &str) -> Option<String> {
        parser().get_bundle_name(model_class).map(str::to_string)
    }

    #[test]
    fn test_validate_class() {
        let mut types = MockTypeRegistry::new();
        types.expect_exists().returning(|name| name == PRODUCT);
        let parser = parser_with(types, MockFileExistenceChecker::new());

        let class = parser.validate_class("App/Entity/Product").unwrap();
        assert_eq!(class.as_str(), PRODUCT);

        let err = parser.validate_class("App\\Entity\\Missing").unwrap_err();
        assert!(matches!(err, ScaffoldError::ClassNotFound(name) if name.ends_with("Missing")));
    }

    #[test]
    fn test_get_bundle_name() {
        assert_eq!(bundle_name(PRODUCT).unwrap(), "AppBundle");
        assert_eq!(bundle_name("AppFoo\\Item").unwrap(), "AppFooBundle");
        assert_eq!(bundle_name("Vendor\\Entity\\Product"), None);
    }

    #[test]
    fn test_bundle_prefix_needs_separator_boundary() {
        let bundles = BundleRegistry::new(vec![Bundle::new("AppFooBundle", "AppFoo")]);
        let parser = ModelClassParser::new(
            Arc::new(bundles),
            Arc::new(MockTypeRegistry::new()),
            Arc::new(MockFileExistenceChecker::new()),
        );
        assert_eq!(parser.get_bundle_name("App\\Foo\\Entity\\Product"), None);
        assert_eq!(parser.get_bundle_name("AppFooBar\\Entity\\Product"), None);
    }

    #[test]
    fn test_get_model_sub_dirs() {
        assert!(sub_dirs(PRODUCT).is_empty());
        assert_eq!(sub_dirs(ADMIN_PRODUCT), ["Admin"]);
        assert_eq!(sub_dirs(CATALOG_PRODUCT), ["Admin", "Catalog"]);
    }

    #[test]
    fn test_get_model_sub_dirs_with_repeated_basename() {
        assert_eq!(sub_dirs("App\\Entity\\Product\\Product"), ["Product"]);
        assert_eq!(
            sub_dirs("App\\Entity\\ProductCatalog\\Product"),
            ["ProductCatalog"]
        );
    }

    #[test]
    fn test_get_model_sub_dirs_outside_entity_root() {
        match sub_dirs_error("App\\Model\\Product") {
            ScaffoldError::OutsideEntityRoot { class, entity_root } => {
                assert_eq!(class, "App\\Model\\Product");
                assert_eq!(entity_root, "App\\Entity\\");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_model_sub_dirs_without_bundle() {
        let err = sub_dirs_error("Vendor\\Entity\\Product");
        assert!(matches!(err, ScaffoldError::BundleNotFound(_)));
    }

    #[test]
    fn test_empty_class_segments_are_rejected() {
        let parser = parser();

        for class in ["App\\Entity\\\\Product", "App\\Entity\\Admin\\"] {
            let err = parser.get_model_sub_dirs(class).unwrap_err();
            assert!(matches!(err, ScaffoldError::EmptySegment(_)), "{class}");

            let err = parser.get_model_bundle_name(class).unwrap_err();
            assert!(matches!(err, ScaffoldError::EmptySegment(_)), "{class}");
        }
        let parsed = parser.parse_model_class("App\\Entity\\\\Product");
        assert!(matches!(parsed, Err(ScaffoldError::EmptySegment(_))));
    }

    #[test]
    fn test_get_model_bundle_name() {
        let parser = parser();
        let bundle_name = |class| parser.get_model_bundle_name(class).unwrap();

        assert_eq!(bundle_name(PRODUCT), "AppBundle:Product");
        assert_eq!(
            bundle_name(CATALOG_PRODUCT),
            "AppBundle:Admin\\Catalog\\Product"
        );
    }

    #[test]
    fn test_get_form_type_class_default() {
        let parser = parser();
        let form_type = |prefix| parser.get_form_type_class(ADMIN_PRODUCT, prefix);

        for prefix in ["", "Create"] {
            let class = form_type(prefix).unwrap();
            assert_eq!(class, "App\\Form\\Admin\\ProductType");
        }
    }

    #[test]
    fn test_get_form_type_class_prefixed_when_file_exists() {
        let expected = Path::new("./src/App/Form/Admin/CreateProductType.php");
        let mut types = MockTypeRegistry::new();
        types.expect_exists().return_const(false);
        let mut files = MockFileExistenceChecker::new();
        files
            .expect_is_file()
            .withf(move |path: &Path| path == expected)
            .return_const(true);
        files.expect_is_file().return_const(false);

        let parser = parser_with(types, files);
        let form_type = |prefix| parser.get_form_type_class(ADMIN_PRODUCT, prefix);

        let create = form_type("create").unwrap();
        assert_eq!(create, "App\\Form\\Admin\\CreateProductType");
        let edit = form_type("Edit").unwrap();
        assert_eq!(edit, "App\\Form\\Admin\\ProductType");
    }

    #[test]
    fn test_get_form_type_class_prefixed_when_type_registered() {
        let mut types = MockTypeRegistry::new();
        types
            .expect_exists()
            .returning(|name| name == "App\\Form\\EditProductType");
        let mut files = MockFileExistenceChecker::new();
        files.expect_is_file().return_const(false);

        let parser = parser_with(types, files);
        let edit = parser.get_form_type_class(PRODUCT, "Edit").unwrap();
        assert_eq!(edit, "App\\Form\\EditProductType");
    }

    #[test]
    fn test_class_source_path_uses_naming() {
        let parser = parser().with_naming(NamingSettings {
            source_root: PathBuf::from("/project/src"),
            class_file_extension: "inc".to_string(),
            ..NamingSettings::default()
        });
        let class = ClassName::new("App\\Form\\ProductType");
        let path = parser.class_source_path(&class);
        assert_eq!(path, Path::new("/project/src/App/Form/ProductType.inc"));
    }

    #[test]
    fn test_parse_model_class() {
        let mut types = MockTypeRegistry::new();
        types.expect_exists().return_const(false);
        let mut files = MockFileExistenceChecker::new();
        files
            .expect_is_file()
            .returning(|path| path.ends_with("CreateProductType.php"));

        let parsed = parser_with(types, files)
            .parse_model_class(ADMIN_PRODUCT)
            .unwrap();

        assert_eq!(parsed.model_basename, "Product");
        assert_eq!(parsed.model_bundle_name, "AppBundle:Admin\\Product");
        assert_eq!(
            parsed.create_form_type_class,
            "App\\Form\\Admin\\CreateProductType"
        );
        assert_eq!(parsed.create_form_type_basename, "CreateProductType");
        assert_eq!(
            parsed.edit_form_type_class,
            "App\\Form\\Admin\\ProductType"
        );
        assert_eq!(parsed.edit_form_type_basename, "ProductType");
        assert_eq!(parsed.bundle, Bundle::new("AppBundle", "App"));
    }

    #[test]
    fn test_fixture_field_name() {
        let parser = parser();
        let name = |class, suffix| parser.fixture_field_name(class, suffix).unwrap();

        assert_eq!(name(CATALOG_PRODUCT, "-1"), "admin-catalog-product-1");
        assert_eq!(name("App\\Entity\\OrderItem", "-2"), "order-item-2");
    }
}
