//! Format registry construction.
//!
//! A [`FormatPackage`] is a named, static table of file-type handlers. The
//! [`PackageCatalog`] lists the packages compiled into the binary, and
//! [`collect_format_types`] turns an ordered list of package names into the
//! [`FormatRegistry`] used for one run.
//!
//! # Override policy
//!
//! When two packages register the same file-type key, the package listed
//! later wins. The key keeps the position where it was first registered, so
//! filename probing order is stable while a center-specific package replaces
//! a default handler.

use tracing::{debug, info, warn};

use genie_model::{GenieError, Result};

use crate::format::{FileTypeFormat, FormatConstructor, FormatContext};

/// A plugin package: a name plus the handlers it exports.
#[derive(Debug, Clone, Copy)]
pub struct FormatPackage {
    pub name: &'static str,
    pub formats: &'static [(&'static str, FormatConstructor)],
}

/// Packages available to a run, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct PackageCatalog {
    packages: Vec<FormatPackage>,
}

impl PackageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package. A package with the same name is replaced.
    #[must_use]
    pub fn with_package(mut self, package: FormatPackage) -> Self {
        self.insert(package);
        self
    }

    pub fn insert(&mut self, package: FormatPackage) {
        match self.packages.iter_mut().find(|p| p.name == package.name) {
            Some(existing) => *existing = package,
            None => self.packages.push(package),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FormatPackage> {
        self.packages.iter().find(|package| package.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.packages.iter().map(|package| package.name).collect()
    }
}

/// What to do when a requested package is not in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Fail the whole registry build.
    #[default]
    Propagate,
    /// Log and continue with the remaining packages.
    SkipMissing,
}

/// One registered file type.
#[derive(Debug, Clone)]
pub struct FormatEntry {
    pub file_type: String,
    /// Package the handler came from.
    pub package: String,
    constructor: FormatConstructor,
}

impl FormatEntry {
    pub fn instantiate(&self, context: &FormatContext) -> Box<dyn FileTypeFormat> {
        (self.constructor)(context)
    }
}

/// Ordered mapping from file-type key to handler.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    entries: Vec<FormatEntry>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `file_type`.
    ///
    /// Returns the package whose handler was replaced, if the key was
    /// already registered.
    pub fn register(
        &mut self,
        package: impl Into<String>,
        file_type: impl Into<String>,
        constructor: FormatConstructor,
    ) -> Option<String> {
        let entry = FormatEntry {
            file_type: file_type.into(),
            package: package.into(),
            constructor,
        };
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.file_type == entry.file_type)
        {
            Some(existing) => Some(std::mem::replace(existing, entry).package),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Register every handler of a package, later registrations winning.
    pub fn register_package(&mut self, package: &FormatPackage) {
        for (file_type, constructor) in package.formats {
            if let Some(previous) = self.register(package.name, *file_type, *constructor) {
                warn!(
                    file_type,
                    package = package.name,
                    overridden = %previous,
                    "file type handler overridden"
                );
            } else {
                debug!(file_type, package = package.name, "registered file type");
            }
        }
    }

    pub fn get(&self, file_type: &str) -> Option<&FormatEntry> {
        self.entries
            .iter()
            .find(|entry| entry.file_type == file_type)
    }

    pub fn contains(&self, file_type: &str) -> bool {
        self.get(file_type).is_some()
    }

    /// Entries in probing order.
    pub fn iter(&self) -> impl Iterator<Item = &FormatEntry> {
        self.entries.iter()
    }

    pub fn file_types(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.file_type.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the registry for a run from packages named in `package_names`.
///
/// Packages are applied in the order given; see the module docs for how
/// colliding keys are resolved.
pub fn collect_format_types<S: AsRef<str>>(
    catalog: &PackageCatalog,
    package_names: &[S],
    policy: LoadPolicy,
) -> Result<FormatRegistry> {
    let mut registry = FormatRegistry::new();
    for name in package_names {
        let name = name.as_ref();
        let Some(package) = catalog.get(name) else {
            let available = catalog.names().join(", ");
            if policy == LoadPolicy::SkipMissing {
                warn!(package = name, available = %available, "skipping unknown format package");
                continue;
            }
            return Err(GenieError::UnknownPackage {
                name: name.to_string(),
                available,
            });
        };
        registry.register_package(package);
    }
    info!(
        packages = package_names.len(),
        file_types = ?registry.file_types(),
        "format registry built"
    );
    Ok(registry)
}
