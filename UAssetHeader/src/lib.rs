//! # UAssetHeader
//!
//! A pure-Rust decoder for the header region of Unreal Engine package files
//! (`.uasset` / `.umap`): the package summary, name table, import table and
//! export table.
//!
//! Field presence throughout the header depends on the version counters
//! recorded in the file itself. Byte-swapped packages, wide-character
//! strings and package-level compression are detected and rejected.
//!
//! ## Quick Start
//!
//! ```no_run
//! use uasset_header::read_package;
//!
//! let package = read_package("Content/Maps/Ground.uasset")?;
//! println!("{} names, {} exports", package.names.len(), package.exports.len());
//!
//! for export in &package.exports {
//!     let class = package.object_name(export.class_index);
//!     println!("{:?} ({} bytes)", class, export.serial_size);
//! }
//! # Ok::<(), uasset_header::Error>(())
//! ```
//!
//! ### Decoding Options
//!
//! ```
//! use uasset_header::{parse_package_bytes_with_options, ParseOptions};
//!
//! let options = ParseOptions::new().with_parallel_tables(false);
//! let err = parse_package_bytes_with_options(&[0u8; 4], &options).unwrap_err();
//! assert_eq!(err.offset(), 0);
//! ```

pub mod codec;
pub mod error;
pub mod options;
pub mod package;
pub mod version;

// Re-exports for convenience
pub use error::{Error, Result};
pub use options::ParseOptions;
pub use package::{
    Package, PackageSummary, parse_package_bytes, parse_package_bytes_with_options, read_package,
};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::codec::PackageReader;
    pub use crate::error::{Error, Result};
    pub use crate::options::ParseOptions;
    pub use crate::package::{
        CustomVersionContainer, EngineVersion, Guid, NameEntry, NameReference, NameTable,
        ObjectExport, ObjectImport, Package, PackageIndex, PackageSummary, parse_package_bytes,
        parse_package_bytes_with_options, read_package,
    };
    pub use crate::version::{ObjectVersionUE4, ObjectVersionUE5, PackageFileVersion};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
