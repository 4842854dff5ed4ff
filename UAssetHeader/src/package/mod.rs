//! Package header decoding
//!
//! The header is decoded in one forward pass with a fixed order: the summary
//! locates and sizes every table, the name table must be complete before
//! any name reference can be checked, and only then are the import and
//! export tables read. Those two occupy disjoint byte ranges and only read
//! the finished summary and name table, so they may be decoded concurrently.

mod context;
mod exports;
mod imports;
mod name_table;
mod summary;
mod types;

pub use context::DecodeContext;
pub use exports::read_exports;
pub use imports::read_imports;
pub use name_table::NameTable;
pub use summary::PackageSummary;
pub use types::*;

use crate::codec::PackageReader;
use crate::error::{Error, Result};
use crate::options::ParseOptions;
use serde::Serialize;
use std::path::Path;

/// Package tag as it appears in a little-endian package.
pub const PACKAGE_FILE_TAG: u32 = 0x9E2A83C1;

/// Package tag of a byte-swapped (big-endian) package.
pub const PACKAGE_FILE_TAG_SWAPPED: u32 = 0xC1832A9E;

/// A fully decoded package header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub summary: PackageSummary,
    pub names: NameTable,
    pub imports: Vec<ObjectImport>,
    pub exports: Vec<ObjectExport>,
}

impl Package {
    /// Import an object index refers to, if it is an import.
    #[must_use]
    pub fn import(&self, index: PackageIndex) -> Option<&ObjectImport> {
        index.to_import().and_then(|i| self.imports.get(i))
    }

    /// Export an object index refers to, if it is an export.
    #[must_use]
    pub fn export(&self, index: PackageIndex) -> Option<&ObjectExport> {
        index.to_export().and_then(|i| self.exports.get(i))
    }

    /// Text of a name reference, without the instance number.
    #[must_use]
    pub fn name(&self, name: &NameReference) -> Option<&str> {
        self.names.get(name.index).map(|entry| entry.text.as_str())
    }

    /// Name of the object an index refers to, as the engine prints it.
    ///
    /// Returns `None` for the null index and for indices past either table.
    #[must_use]
    pub fn object_name(&self, index: PackageIndex) -> Option<String> {
        let name = if let Some(import) = self.import(index) {
            import.object_name
        } else {
            self.export(index)?.object_name
        };
        self.names.display(&name)
    }
}

/// Read a package header from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any decoding error
/// from [`parse_package_bytes`].
pub fn read_package<P: AsRef<Path>>(path: P) -> Result<Package> {
    let data = std::fs::read(path).map_err(|source| Error::Io { source, offset: 0 })?;
    parse_package_bytes(&data)
}

/// Parse a package header from bytes with the default options
///
/// # Errors
///
/// Returns the first error encountered; there is no partial result.
pub fn parse_package_bytes(data: &[u8]) -> Result<Package> {
    parse_package_bytes_with_options(data, &ParseOptions::default())
}

/// Parse a package header from bytes
///
/// # Errors
///
/// Returns the first error encountered; there is no partial result. When
/// both the import and export tables are malformed, the import error is
/// reported regardless of `options.parallel_tables`.
pub fn parse_package_bytes_with_options(data: &[u8], options: &ParseOptions) -> Result<Package> {
    let mut reader = PackageReader::new(data).with_max_elements(options.max_table_entries);

    let summary = PackageSummary::read(&mut reader)?;
    let names = NameTable::read(&mut reader, &summary)?;
    tracing::debug!("Read {} names", names.len());

    let ctx = DecodeContext::new(&summary, &names);
    let (imports, exports) = if options.parallel_tables {
        rayon::join(
            || read_imports(&mut reader.clone(), &ctx),
            || read_exports(&mut reader.clone(), &ctx),
        )
    } else {
        (
            read_imports(&mut reader.clone(), &ctx),
            read_exports(&mut reader.clone(), &ctx),
        )
    };
    let imports = imports?;
    let exports = exports?;
    tracing::debug!("Read {} imports, {} exports", imports.len(), exports.len());

    Ok(Package {
        summary,
        names,
        imports,
        exports,
    })
}
