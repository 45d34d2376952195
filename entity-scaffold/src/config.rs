//! Configuration management for entity-scaffold
//!
//! Naming conventions, the bundle registry and the type catalog can all be
//! supplied through configuration. Sources are merged with clear precedence:
//!
//! 1. Environment variables (highest priority, `SCAFFOLD_` prefix, `__` for nesting)
//! 2. `./scaffold.toml` (project)
//! 3. `~/.config/entity-scaffold/config.toml` (user config, XDG)
//! 4. `/etc/entity-scaffold/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # scaffold.toml
//! [naming]
//! source_root = "./src"
//! entity_dir = "Entity"
//! form_dir = "Form"
//!
//! [fixtures]
//! seed = 42
//!
//! [[bundles]]
//! name = "AppBundle"
//! namespace = "App"
//!
//! [types]
//! types = ["App\\Entity\\Product"]
//!
//! [types.enums]
//! order_status = ["new", "paid", "shipped"]
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::fixture::{FixtureGenerator, DEFAULT_ENUM_BASE_TYPE};
use crate::parser::ModelClassParser;
use crate::registry::{BundleRegistry, FsFileChecker, TypeCatalog};

/// Project file name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "scaffold.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "SCAFFOLD_";

/// Naming conventions for derived class names and paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingSettings {
    /// Directory holding class source files, used to probe for form types
    pub source_root: PathBuf,

    /// Namespace segment under a bundle that holds entities
    pub entity_dir: String,

    /// Namespace segment under a bundle that holds form types
    pub form_dir: String,

    /// Suffix of form type class names
    pub form_type_suffix: String,

    /// Extension of class source files
    pub class_file_extension: String,

    /// Prefix of a dedicated creation form type
    pub create_prefix: String,

    /// Prefix of a dedicated edit form type
    pub edit_prefix: String,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("./src"),
            entity_dir: "Entity".to_string(),
            form_dir: "Form".to_string(),
            form_type_suffix: "Type".to_string(),
            class_file_extension: "php".to_string(),
            create_prefix: "Create".to_string(),
            edit_prefix: "Edit".to_string(),
        }
    }
}

/// Fixture generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureSettings {
    /// Base type every enum column type derives from
    pub enum_base_type: String,

    /// Fixed seed for reproducible fixtures, random when unset
    pub seed: Option<u64>,
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self {
            enum_base_type: DEFAULT_ENUM_BASE_TYPE.to_string(),
            seed: None,
        }
    }
}

impl FixtureSettings {
    /// Random source honouring the configured seed
    #[must_use]
    pub fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}

/// Complete entity-scaffold configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Registered bundles in lookup order
    #[serde(default)]
    pub bundles: BundleRegistry,

    /// Naming conventions
    #[serde(default)]
    pub naming: NamingSettings,

    /// Fixture generation settings
    #[serde(default)]
    pub fixtures: FixtureSettings,

    /// Known types and enum values
    #[serde(default)]
    pub types: TypeCatalog,
}

impl ScaffoldConfig {
    /// Load configuration for a project
    ///
    /// Searches for configuration with precedence:
    /// 1. Environment variables (`SCAFFOLD_*`)
    /// 2. `./scaffold.toml`
    /// 3. `~/.config/entity-scaffold/config.toml`
    /// 4. `/etc/entity-scaffold/config.toml`
    /// 5. Defaults
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Configuration values fail type conversion
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use entity_scaffold::config::ScaffoldConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = ScaffoldConfig::load()?;
    /// let parser = config.parser();
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Self::defaults()?;

        let system_config = PathBuf::from("/etc/entity-scaffold").join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        // Environment variables override everything
        figment = figment.merge(Self::environment());

        let config = Self::from_figment(&figment)?;
        tracing::debug!(
            bundles = config.bundles.len(),
            types = config.types.types.len(),
            "loaded scaffold configuration"
        );
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Defaults apply to anything the file leaves out, and `SCAFFOLD_*`
    /// environment variables override everything.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - The file contains invalid TOML syntax
    /// - Configuration values fail type conversion
    pub fn load_from(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let figment = Self::defaults()?
            .merge(Toml::file(path.into()))
            .merge(Self::environment());

        Ok(Self::from_figment(&figment)?)
    }

    /// Extract configuration from an assembled figment
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScaffoldError::Config`] if extraction fails.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    /// Recommended user configuration path
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(PROJECT_CONFIG_FILE),
            |config_dir| config_dir.join("entity-scaffold").join("config.toml"),
        )
    }

    /// Model class parser backed by this configuration and the local filesystem
    #[must_use]
    pub fn parser(&self) -> ModelClassParser {
        ModelClassParser::new(
            Arc::new(self.bundles.clone()),
            Arc::new(self.types.clone()),
            Arc::new(FsFileChecker),
        )
        .with_naming(self.naming.clone())
    }

    /// Fixture generator backed by this configuration's type catalog
    #[must_use]
    pub fn fixture_generator(&self) -> FixtureGenerator {
        FixtureGenerator::from_catalog(Arc::new(self.types.clone()))
            .with_enum_base_type(self.fixtures.enum_base_type.clone())
    }

    fn defaults() -> anyhow::Result<Figment> {
        let defaults = toml::to_string(&Self::default())?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    /// `SCAFFOLD_*` variables, double underscore for nesting
    fn environment() -> Env {
        Env::prefixed(ENV_PREFIX).split("__").lowercase(true)
    }
}
