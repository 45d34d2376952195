//! Fully-qualified class names
//!
//! A class name is a namespace path followed by a basename, joined with the
//! namespace separator (`\`). File-path style input (`App/Entity/Product`)
//! is normalised on construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace separator
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Fully-qualified class name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(String);

impl ClassName {
    /// Create a class name, normalising `/` to `\` and dropping a leading separator
    ///
    /// # Examples
    ///
    /// ```
    /// # use entity_scaffold::ClassName;
    /// let class = ClassName::new("App/Entity/Product");
    /// assert_eq!(class.as_str(), "App\\Entity\\Product");
    /// ```
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        let normalized = name.as_ref().trim().replace('/', "\\");
        let normalized = normalized
            .strip_prefix(NAMESPACE_SEPARATOR)
            .map_or_else(|| normalized.clone(), str::to_string);

        Self(normalized)
    }

    /// Build a class name from a namespace and a basename
    #[must_use]
    pub fn join(namespace: &str, basename: &str) -> Self {
        if namespace.is_empty() {
            Self::new(basename)
        } else {
            Self::new(format!("{namespace}{NAMESPACE_SEPARATOR}{basename}"))
        }
    }

    /// The class name as a string slice
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Last path segment
    ///
    /// ```
    /// # use entity_scaffold::ClassName;
    /// assert_eq!(ClassName::new("App\\Entity\\Admin\\Product").basename(), "Product");
    /// assert_eq!(ClassName::new("Product").basename(), "Product");
    /// ```
    #[must_use]
    pub fn basename(&self) -> &str {
        self.0
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map_or(self.0.as_str(), |(_, basename)| basename)
    }

    /// Everything before the basename, empty for a bare basename
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.0
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map_or("", |(namespace, _)| namespace)
    }

    /// Path segments in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(NAMESPACE_SEPARATOR)
    }

    /// Whether this class lives inside `namespace`
    ///
    /// The namespace must be followed by a separator, so `App\Foo` is not
    /// inside `App\Fo` and `AppFoo\Bar` is not inside `App`.
    #[must_use]
    pub fn is_within(&self, namespace: &str) -> bool {
        self.0
            .strip_prefix(namespace)
            .is_some_and(|rest| rest.starts_with(NAMESPACE_SEPARATOR))
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClassName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
