//! Read-only state shared by the import and export decoders

use super::name_table::NameTable;
use super::summary::PackageSummary;
use crate::version::PackageFileVersion;

/// The completed summary and name table.
///
/// Both are final before any record that needs them is decoded, so the
/// context is only ever borrowed immutably and can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    pub summary: &'a PackageSummary,
    pub names: &'a NameTable,
}

impl<'a> DecodeContext<'a> {
    #[must_use]
    pub fn new(summary: &'a PackageSummary, names: &'a NameTable) -> Self {
        Self { summary, names }
    }

    #[must_use]
    pub fn version(&self) -> &'a PackageFileVersion {
        &self.summary.file_version
    }
}
