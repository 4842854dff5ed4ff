//! Name table decoding and name reference resolution

use super::summary::PackageSummary;
use super::types::{NameEntry, NameReference};
use crate::codec::PackageReader;
use crate::error::{Error, Result};
use serde::Serialize;

/// Deduplicated names of a package, in file order.
///
/// Built once from the summary and never modified afterwards; every name
/// reference in the import and export tables is checked against it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct NameTable {
    entries: Vec<NameEntry>,
}

impl NameTable {
    /// Decode `summary.names.count` entries starting at `summary.names.offset`.
    pub fn read(reader: &mut PackageReader<'_>, summary: &PackageSummary) -> Result<Self> {
        let entries = summary
            .names
            .read_records(reader, "name table", NameEntry::read)?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn from_entries(entries: Vec<NameEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    /// Entry at a raw table index.
    #[must_use]
    pub fn get(&self, index: i32) -> Option<&NameEntry> {
        usize::try_from(index).ok().and_then(|i| self.entries.get(i))
    }

    /// Entry a reference points at.
    pub fn resolve(&self, name: &NameReference) -> Result<&NameEntry> {
        self.get(name.index).ok_or(Error::OutOfRange {
            index: name.index,
            len: self.entries.len(),
            offset: 0,
        })
    }

    /// Read an `(index, number)` pair and check the index against the table.
    pub fn read_reference(&self, reader: &mut PackageReader<'_>) -> Result<NameReference> {
        let offset = reader.position();
        let index = reader.read_i32()?;
        let number = reader.read_i32()?;
        if self.get(index).is_none() {
            return Err(Error::OutOfRange {
                index,
                len: self.entries.len(),
                offset,
            });
        }
        Ok(NameReference { index, number })
    }

    /// Text of a reference as the engine prints it.
    ///
    /// A non-zero instance number `n` is appended as `_{n - 1}`.
    #[must_use]
    pub fn display(&self, name: &NameReference) -> Option<String> {
        let entry = self.get(name.index)?;
        if name.number == 0 {
            Some(entry.text.clone())
        } else {
            Some(format!("{}_{}", entry.text, i64::from(name.number) - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(names: &[&str]) -> NameTable {
        NameTable::from_entries(
            names
                .iter()
                .map(|text| NameEntry {
                    text: (*text).to_string(),
                    non_case_preserving_hash: 0,
                    case_preserving_hash: 0,
                })
                .collect(),
        )
    }

    fn reference_bytes(index: i32, number: i32) -> Vec<u8> {
        [index.to_le_bytes(), number.to_le_bytes()].concat()
    }

    #[test]
    fn test_read_reference_in_range() {
        let names = table(&["None", "Texture2D", "Engine"]);
        for index in 0..3 {
            let data = reference_bytes(index, 0);
            let mut reader = PackageReader::new(&data);
            let name = names.read_reference(&mut reader).unwrap();
            assert_eq!(name.index, index);
            assert_eq!(names.resolve(&name).unwrap(), &names.entries()[index as usize]);
        }
    }

    #[test]
    fn test_read_reference_out_of_range() {
        let names = table(&["None", "Texture2D", "Engine"]);
        for index in [3, -1] {
            let data = reference_bytes(index, 0);
            let mut reader = PackageReader::new(&data);
            assert!(matches!(
                names.read_reference(&mut reader),
                Err(Error::OutOfRange { len: 3, offset: 0, .. })
            ));
        }
    }

    #[test]
    fn test_display_appends_instance_number() {
        let names = table(&["Actor"]);
        let plain = NameReference { index: 0, number: 0 };
        let numbered = NameReference { index: 0, number: 3 };
        assert_eq!(names.display(&plain).as_deref(), Some("Actor"));
        assert_eq!(names.display(&numbered).as_deref(), Some("Actor_2"));
        assert_eq!(names.display(&NameReference { index: 1, number: 0 }), None);
    }
}
