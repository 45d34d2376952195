//! entity-scaffold: naming and fixture helpers for CRUD code generators
//!
//! Given the fully-qualified class name of an ORM entity, this crate derives
//! the names a scaffolding generator needs (owning bundle, sub-directories,
//! form type classes, fixture references) and produces sample fixture values
//! that differ between a "create" and an "edit" test.
//!
//! # Building Blocks
//!
//! - [`GeneratorHelpers`]: identifier inflection and quoting
//! - [`ModelClassParser`]: class name to bundle, sub-directories and form types
//! - [`FixtureGenerator`]: fixture literals and their modified counterparts
//! - [`context::ScaffoldContext`]: all of the above as one JSON template context
//!
//! Nothing is discovered by reflection. Applications describe their bundles
//! in a [`BundleRegistry`] and their classes and enum types through the
//! [`TypeRegistry`] and [`EnumValueProvider`] traits, or load both from
//! configuration with [`ScaffoldConfig`].
//!
//! # Quick Start
//!
//! ```rust
//! use entity_scaffold::{BundleRegistry, FsFileChecker, ModelClassParser, TypeCatalog};
//! use std::sync::Arc;
//!
//! # fn main() -> entity_scaffold::Result<()> {
//! let parser = ModelClassParser::new(
//!     Arc::new(BundleRegistry::default().with_bundle("AppBundle", "App")),
//!     Arc::new(TypeCatalog::default()),
//!     Arc::new(FsFileChecker),
//! );
//!
//! let parsed = parser.parse_model_class("App\\Entity\\Admin\\Product")?;
//! assert_eq!(parsed.model_bundle_name, "AppBundle:Admin\\Product");
//! assert_eq!(parsed.edit_form_type_class, "App\\Form\\Admin\\ProductType");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod class_name;
pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod fixture;
pub mod helpers;
pub mod observability;
pub mod parser;
pub mod registry;

pub use class_name::ClassName;
pub use config::ScaffoldConfig;
pub use error::{ErrorKind, Result, ScaffoldError};
pub use field::{AssociationKind, FieldKind, FieldMetadata, FieldSpec, UploadableField};
pub use fixture::{FixtureGenerator, FixtureSource};
pub use helpers::GeneratorHelpers;
pub use parser::{ModelClassParser, ParsedModelClass};
pub use registry::{
    Bundle, BundleRegistry, EnumValueProvider, FileExistenceChecker, FsFileChecker, TypeCatalog,
    TypeRegistry,
};
