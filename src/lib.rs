//! Reference tables for the MSDDS diagram surface's COM identifiers.
//!
//! The crate loads a Markdown resource (by default the bundled
//! `data/msdds.md`) into two immutable tables:
//!
//! - identifiers: GUID, kind (`CLSID`/`IID`/`LIBID`) and label
//! - registry values: `.reg`-style key path, value name and data
//!
//! and answers queries against them.
//!
//! # Example
//!
//! ```rust
//! use ddsref::{Catalog, BUNDLED_RESOURCE};
//!
//! let catalog = Catalog::load(BUNDLED_RESOURCE, false).unwrap();
//! let entry = catalog.lookup_by_guid("c795d2fe-7776-11d8-9070-00065b840d9c").unwrap();
//! assert_eq!(entry.label, "MSDDS Diagram Control 80");
//! assert!(catalog.validate_progid_chain("MSDDS.Diagram.080").is_resolved());
//! ```

pub mod catalog;
pub mod domain;
pub mod guid;
pub mod resource;
pub mod services;

pub use catalog::{
    Catalog, CatalogError, ClassBackReference, ClsidConflict, IdentifierEntry, IdentifierKind,
    LabelMatches, ProgIdValidation, RegistryKeyEntry,
};
pub use domain::constants::BUNDLED_RESOURCE;
pub use guid::Guid;
pub use resource::{parse_resource, ResourceTables};
