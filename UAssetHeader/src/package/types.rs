//! Types for package header records
//!
//! Fixed-layout records shared by the summary, import and export decoders.
//! Version-gated fields are `Option`s decided once per record.

use crate::codec::PackageReader;
use crate::error::{Error, Result};
use crate::version::CustomVersionFormat;
use serde::Serialize;
use std::fmt;

/// 128-bit identifier stored as four little-endian words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Guid {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

impl Guid {
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        Ok(Self {
            a: reader.read_u32()?,
            b: reader.read_u32()?,
            c: reader.read_u32()?,
            d: reader.read_u32()?,
        })
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.a == 0 && self.b == 0 && self.c == 0 && self.d == 0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}{:08X}{:08X}{:08X}", self.a, self.b, self.c, self.d)
    }
}

/// Engine release that saved (or is compatible with) the package.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EngineVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub changelist: u32,
    pub branch: String,
}

impl EngineVersion {
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        Ok(Self {
            major: reader.read_u16()?,
            minor: reader.read_u16()?,
            patch: reader.read_u16()?,
            changelist: reader.read_u32()?,
            branch: reader.read_fstring()?,
        })
    }
}

/// Which engine build saved the package.
///
/// Older packages only record a changelist number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SavedByEngine {
    Version(EngineVersion),
    Changelist(u32),
}

/// Custom version entry of the `Enums` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumCustomVersion {
    pub tag: u32,
    pub version: i32,
}

impl EnumCustomVersion {
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        Ok(Self {
            tag: reader.read_u32()?,
            version: reader.read_i32()?,
        })
    }
}

/// Custom version entry of the `Guids` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidCustomVersion {
    pub key: Guid,
    pub version: i32,
    pub friendly_name: String,
}

impl GuidCustomVersion {
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        Ok(Self {
            key: Guid::read(reader)?,
            version: reader.read_i32()?,
            friendly_name: reader.read_fstring()?,
        })
    }
}

/// Custom version entry of the `Optimized` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomVersion {
    pub key: Guid,
    pub version: i32,
}

impl CustomVersion {
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        Ok(Self {
            key: Guid::read(reader)?,
            version: reader.read_i32()?,
        })
    }
}

/// Per-subsystem version list. The layout is fixed for the whole container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CustomVersionContainer {
    Enums(Vec<EnumCustomVersion>),
    Guids(Vec<GuidCustomVersion>),
    Optimized(Vec<CustomVersion>),
}

impl CustomVersionContainer {
    /// Read the container in the layout selected by `legacy_file_version`.
    pub fn read(reader: &mut PackageReader<'_>, legacy_file_version: i32) -> Result<Self> {
        let offset = reader.position();
        match CustomVersionFormat::for_legacy_version(legacy_file_version) {
            Some(CustomVersionFormat::Enums) => {
                Ok(Self::Enums(reader.read_array(EnumCustomVersion::read)?))
            }
            Some(CustomVersionFormat::Guids) => {
                Ok(Self::Guids(reader.read_array(GuidCustomVersion::read)?))
            }
            Some(CustomVersionFormat::Optimized) => {
                Ok(Self::Optimized(reader.read_array(CustomVersion::read)?))
            }
            None => Err(Error::UnsupportedFormat {
                legacy_version: legacy_file_version,
                offset,
            }),
        }
    }

    #[must_use]
    pub fn format(&self) -> CustomVersionFormat {
        match self {
            Self::Enums(_) => CustomVersionFormat::Enums,
            Self::Guids(_) => CustomVersionFormat::Guids,
            Self::Optimized(_) => CustomVersionFormat::Optimized,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Enums(v) => v.len(),
            Self::Guids(v) => v.len(),
            Self::Optimized(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Version recorded for a guid-keyed subsystem.
    ///
    /// Always `None` for the `Enums` layout, which has no guid keys.
    #[must_use]
    pub fn version_of(&self, key: &Guid) -> Option<i32> {
        match self {
            Self::Enums(_) => None,
            Self::Guids(v) => v.iter().find(|e| e.key == *key).map(|e| e.version),
            Self::Optimized(v) => v.iter().find(|e| e.key == *key).map(|e| e.version),
        }
    }
}

/// Export and name counts of an earlier save of the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationInfo {
    pub export_count: i32,
    pub name_count: i32,
}

impl GenerationInfo {
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        Ok(Self {
            export_count: reader.read_i32()?,
            name_count: reader.read_i32()?,
        })
    }
}

/// `(count, offset)` pair locating a table inside the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TableLocation {
    pub count: i32,
    pub offset: i32,
    /// Where the pair itself sits in the summary; errors about the table
    /// are reported here.
    #[serde(skip)]
    pub field_offset: u64,
}

impl TableLocation {
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        let field_offset = reader.position();
        Ok(Self {
            count: reader.read_i32()?,
            offset: reader.read_i32()?,
            field_offset,
        })
    }

    /// Decode the table this pair locates.
    pub fn read_records<'a, T, F>(
        &self,
        reader: &mut PackageReader<'a>,
        table: &str,
        read_record: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(&mut PackageReader<'a>) -> Result<T>,
    {
        reader.read_table(self.count, self.offset, self.field_offset, table, read_record)
    }
}

/// One entry of the name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameEntry {
    pub text: String,
    pub non_case_preserving_hash: u16,
    pub case_preserving_hash: u16,
}

impl NameEntry {
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        Ok(Self {
            text: reader.read_fstring()?,
            non_case_preserving_hash: reader.read_u16()?,
            case_preserving_hash: reader.read_u16()?,
        })
    }
}

/// Reference into the name table plus an instance number.
///
/// Only produced by [`NameTable`](super::NameTable), so the index is always
/// valid for the table it was read against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NameReference {
    pub index: i32,
    pub number: i32,
}

/// Signed index into the combined import/export object space.
///
/// Zero is the package itself, negative values are imports (`-1` is the
/// first import), positive values are exports (`1` is the first export).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct PackageIndex(pub i32);

impl PackageIndex {
    pub const NULL: PackageIndex = PackageIndex(0);

    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        reader.read_i32().map(PackageIndex)
    }

    #[must_use]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn is_import(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub fn is_export(self) -> bool {
        self.0 > 0
    }

    /// Position in the import table, if this is an import.
    #[must_use]
    pub fn to_import(self) -> Option<usize> {
        self.is_import().then(|| (self.0.unsigned_abs() - 1) as usize)
    }

    /// Position in the export table, if this is an export.
    #[must_use]
    pub fn to_export(self) -> Option<usize> {
        self.is_export().then(|| (self.0 - 1) as usize)
    }
}

/// An object this package references from another package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectImport {
    pub class_package: NameReference,
    pub class_name: NameReference,
    pub outer_index: PackageIndex,
    pub object_name: NameReference,
    pub package_name: Option<NameReference>,
    pub import_optional: Option<bool>,
}

/// Window into the preload dependency list for one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DependencyWindow {
    pub first_export_dependency: i32,
    pub serialization_before_serialization: i32,
    pub create_before_serialization: i32,
    pub serialization_before_create: i32,
    pub create_before_create: i32,
}

impl DependencyWindow {
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        Ok(Self {
            first_export_dependency: reader.read_i32()?,
            serialization_before_serialization: reader.read_i32()?,
            create_before_serialization: reader.read_i32()?,
            serialization_before_create: reader.read_i32()?,
            create_before_create: reader.read_i32()?,
        })
    }
}

/// An object serialized inside this package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectExport {
    pub class_index: PackageIndex,
    pub super_index: PackageIndex,
    pub template_index: Option<PackageIndex>,
    pub outer_index: PackageIndex,
    pub object_name: NameReference,
    pub object_flags: u32,
    /// Stored as 32-bit in older packages, widened here.
    pub serial_size: i64,
    pub serial_offset: i64,
    pub forced_export: bool,
    pub not_for_client: bool,
    pub not_for_server: bool,
    pub package_guid: Option<Guid>,
    pub is_inherited_instance: Option<bool>,
    pub package_flags: u32,
    pub not_always_loaded_for_editor_game: Option<bool>,
    pub is_asset: Option<bool>,
    pub generate_public_hash: Option<bool>,
    pub dependencies: Option<DependencyWindow>,
}
