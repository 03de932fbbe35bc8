//! Built-in file-type packages.
//!
//! - `example_registry`: the `example` type created by project bootstrap
//!   (`TEST-<CENTER>*.txt` files whose content is `VALID`, `ERROR`, or noise).
//! - `genie`: the `clinical` and `cna` flat-file types.

mod clinical;
mod cna;
mod example;
mod tabular;

pub use clinical::ClinicalFormat;
pub use cna::CnaFormat;
pub use example::ExampleFormat;

use genie_validate::{FormatPackage, PackageCatalog};

pub const EXAMPLE_REGISTRY: FormatPackage = FormatPackage {
    name: "example_registry",
    formats: &[("example", ExampleFormat::construct)],
};

pub const GENIE: FormatPackage = FormatPackage {
    name: "genie",
    formats: &[
        ("clinical", ClinicalFormat::construct),
        ("cna", CnaFormat::construct),
    ],
};

/// Every package compiled into this crate.
pub fn builtin_catalog() -> PackageCatalog {
    PackageCatalog::new()
        .with_package(GENIE)
        .with_package(EXAMPLE_REGISTRY)
}
