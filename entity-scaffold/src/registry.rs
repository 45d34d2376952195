//! Bundle registry and the lookup capabilities the parser and generators consume
//!
//! None of the lookups here are performed by reflection. The caller supplies
//! what it knows about its application through these types:
//!
//! - [`BundleRegistry`] - ordered `{name, namespace}` pairs
//! - [`TypeRegistry`] - which classes exist and how they relate
//! - [`EnumValueProvider`] - legal values of enum column types
//! - [`FileExistenceChecker`] - whether a source file is present
//!
//! [`TypeCatalog`] implements both type-level traits from plain data, which
//! makes it loadable from configuration.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::class_name::ClassName;

/// A registered bundle (application module)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Short name, e.g. `AppBundle`
    pub name: String,
    /// Root namespace, e.g. `App`
    pub namespace: String,
}

impl Bundle {
    /// Create a bundle
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// Ordered collection of bundles, searched in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleRegistry {
    bundles: Vec<Bundle>,
}

impl BundleRegistry {
    /// Create a registry from bundles in registration order
    #[must_use]
    pub const fn new(bundles: Vec<Bundle>) -> Self {
        Self { bundles }
    }

    /// Append a bundle
    #[must_use]
    pub fn with_bundle(mut self, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.bundles.push(Bundle::new(name, namespace));
        self
    }

    /// All bundles in registration order
    #[must_use]
    pub const fn bundles(&self) -> &[Bundle] {
        self.bundles.as_slice()
    }

    /// Look a bundle up by its short name
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|bundle| bundle.name == name)
    }

    /// First bundle whose namespace contains the class
    #[must_use]
    pub fn owner_of(&self, class: &ClassName) -> Option<&Bundle> {
        self.bundles
            .iter()
            .find(|bundle| class.is_within(&bundle.namespace))
    }

    /// Number of registered bundles
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether no bundle is registered
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

/// Knows which classes exist
#[cfg_attr(test, mockall::automock)]
pub trait TypeRegistry: Send + Sync {
    /// Whether the fully-qualified class exists
    fn exists(&self, name: &str) -> bool;

    /// Whether `name` extends or implements `base`
    fn is_subtype_of(&self, name: &str, base: &str) -> bool;
}

/// Knows the legal values of enum column types
#[cfg_attr(test, mockall::automock)]
pub trait EnumValueProvider: Send + Sync {
    /// Values of `enum_type` in declaration order, `None` for an unknown type
    fn values(&self, enum_type: &str) -> Option<Vec<String>>;
}

/// Answers whether a file is present
#[cfg_attr(test, mockall::automock)]
pub trait FileExistenceChecker: Send + Sync {
    /// Whether `path` is an existing regular file
    fn is_file(&self, path: &Path) -> bool;
}

/// [`FileExistenceChecker`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileChecker;

impl FileExistenceChecker for FsFileChecker {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory type catalog
///
/// ```
/// # use entity_scaffold::{TypeCatalog, TypeRegistry, EnumValueProvider};
/// let catalog = TypeCatalog::default()
///     .with_type("App\\Entity\\Product")
///     .with_enum("order_status", "App\\DBAL\\EnumType", ["new", "paid", "shipped"]);
///
/// assert!(catalog.exists("App\\Entity\\Product"));
/// assert!(catalog.is_subtype_of("order_status", "App\\DBAL\\EnumType"));
/// assert_eq!(catalog.values("order_status").unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeCatalog {
    /// Known class names
    pub types: BTreeSet<String>,
    /// Direct parents of each type
    pub parents: BTreeMap<String, Vec<String>>,
    /// Enum values per enum type
    pub enums: BTreeMap<String, Vec<String>>,
}

impl TypeCatalog {
    /// Register a class
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.types.insert(ClassName::new(name.into()).to_string());
        self
    }

    /// Register a class together with its direct parent
    #[must_use]
    pub fn with_subtype(mut self, name: impl Into<String>, parent: impl Into<String>) -> Self {
        let name = ClassName::new(name.into()).to_string();
        self.types.insert(name.clone());
        self.parents
            .entry(name)
            .or_default()
            .push(ClassName::new(parent.into()).to_string());
        self
    }

    /// Register an enum type deriving from `base` with its values
    #[must_use]
    pub fn with_enum<I, S>(
        mut self,
        enum_type: impl Into<String>,
        base: impl Into<String>,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let enum_type = enum_type.into();
        let values = values.into_iter().map(Into::into).collect();
        self = self.with_subtype(enum_type.clone(), base);
        self.enums.insert(enum_type, values);
        self
    }
}

impl TypeRegistry for TypeCatalog {
    fn exists(&self, name: &str) -> bool {
        self.types.contains(ClassName::new(name).as_str())
    }

    fn is_subtype_of(&self, name: &str, base: &str) -> bool {
        let base = ClassName::new(base);
        let mut pending = vec![ClassName::new(name).to_string()];
        let mut seen = BTreeSet::new();

        while let Some(current) = pending.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(parents) = self.parents.get(&current) {
                if parents.iter().any(|parent| parent == base.as_str()) {
                    return true;
                }
                pending.extend(parents.iter().cloned());
            }
        }

        false
    }
}

impl EnumValueProvider for TypeCatalog {
    fn values(&self, enum_type: &str) -> Option<Vec<String>> {
        self.enums.get(enum_type).cloned()
    }
}
