//! Package summary decoding
//!
//! The summary is a positional field sequence with no tags: every field is
//! read in file order, and version-gated fields are read only when the
//! counters decoded at the top of the summary reach their threshold. The
//! table locations it yields drive every other decoder.

use super::types::{
    CustomVersionContainer, EngineVersion, GenerationInfo, Guid, SavedByEngine, TableLocation,
};
use super::{PACKAGE_FILE_TAG, PACKAGE_FILE_TAG_SWAPPED};
use crate::codec::PackageReader;
use crate::error::{Error, Result};
use crate::version::{ObjectVersionUE4, ObjectVersionUE5, PackageFileVersion};
use serde::Serialize;

/// Root record of a package header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub tag: u32,
    pub file_version: PackageFileVersion,
    /// Absent only for legacy file version -4.
    pub legacy_ue3_version: Option<i32>,
    /// Present from legacy file version -2 on.
    pub custom_versions: Option<CustomVersionContainer>,
    pub unversioned: bool,
    pub total_header_size: i32,
    pub package_name: String,
    pub package_flags: u32,
    pub names: TableLocation,
    pub soft_object_paths: Option<TableLocation>,
    pub localization_id: Option<String>,
    pub gatherable_text_data: Option<TableLocation>,
    pub exports: TableLocation,
    pub imports: TableLocation,
    pub depends_offset: i32,
    pub soft_package_references: Option<TableLocation>,
    pub searchable_names_offset: Option<i32>,
    pub thumbnail_table_offset: i32,
    pub guid: Guid,
    pub persistent_guid: Option<Guid>,
    pub owner_persistent_guid: Option<Guid>,
    pub generations: Vec<GenerationInfo>,
    pub saved_by: SavedByEngine,
    pub compatible_with_engine_version: Option<EngineVersion>,
    pub compression_flags: u32,
    pub package_source: u32,
    pub additional_packages_to_cook: Vec<String>,
    pub num_texture_allocations: Option<i32>,
    pub asset_registry_data_offset: i32,
    pub bulk_data_start_offset: i64,
    pub world_tile_info_data_offset: Option<i32>,
    pub chunk_ids: Option<Vec<i32>>,
    pub preload_dependencies: TableLocation,
    pub names_referenced_from_export_data_count: Option<i32>,
    pub payload_toc_offset: Option<i64>,
    pub data_resource_offset: Option<i32>,
}

impl PackageSummary {
    /// Decode the summary from the start of the package.
    pub fn read(reader: &mut PackageReader<'_>) -> Result<Self> {
        reader.seek_to(0, 0, "package summary")?;

        let tag = reader.read_u32()?;
        if tag == PACKAGE_FILE_TAG_SWAPPED {
            return Err(Error::UnsupportedEndianness { offset: 0 });
        }
        if tag != PACKAGE_FILE_TAG {
            return Err(Error::MalformedHeader {
                reason: format!("bad package tag {tag:#010X}, expected {PACKAGE_FILE_TAG:#010X}"),
                offset: 0,
            });
        }

        let version_offset = reader.position();
        let legacy = reader.read_i32()?;
        if legacy >= 0 {
            return Err(Error::UnsupportedVersion {
                version: legacy,
                offset: version_offset,
            });
        }

        let legacy_ue3_version = if PackageFileVersion::has_legacy_ue3_version(legacy) {
            Some(reader.read_i32()?)
        } else {
            None
        };
        let ue4 = reader.read_i32()?;
        let ue5 = if PackageFileVersion::has_ue5_version(legacy) {
            reader.read_i32()?
        } else {
            0
        };
        let licensee_ue4 = reader.read_i32()?;
        let version = PackageFileVersion {
            legacy,
            ue4,
            ue5,
            licensee_ue4,
        };

        let custom_versions = if PackageFileVersion::has_custom_versions(legacy) {
            Some(CustomVersionContainer::read(reader, legacy)?)
        } else {
            None
        };

        let unversioned = version.is_unversioned();
        if unversioned {
            tracing::warn!("Package is unversioned; version-gated fields are treated as absent");
        }

        let total_header_size = reader.read_i32()?;
        let package_name = reader.read_fstring()?;
        let package_flags = reader.read_u32()?;

        let names = TableLocation::read(reader)?;

        let soft_object_paths = if version.ue5_at_least(ObjectVersionUE5::SoftObjectPathList) {
            Some(TableLocation::read(reader)?)
        } else {
            None
        };

        let localization_id = if version.ue4_at_least(ObjectVersionUE4::SummaryLocalizationId) {
            Some(reader.read_fstring()?)
        } else {
            None
        };

        let gatherable_text_data =
            if version.ue4_at_least(ObjectVersionUE4::SerializeTextInPackages) {
                Some(TableLocation::read(reader)?)
            } else {
                None
            };

        let exports = TableLocation::read(reader)?;
        let imports = TableLocation::read(reader)?;
        let depends_offset = reader.read_i32()?;

        let soft_package_references =
            if version.ue4_at_least(ObjectVersionUE4::StringAssetReferencesMap) {
                Some(TableLocation::read(reader)?)
            } else {
                None
            };

        let searchable_names_offset = if version.ue4_at_least(ObjectVersionUE4::SearchableNames) {
            Some(reader.read_i32()?)
        } else {
            None
        };

        let thumbnail_table_offset = reader.read_i32()?;
        let guid = Guid::read(reader)?;

        let persistent_guid = if version.ue4_at_least(ObjectVersionUE4::PackageOwner) {
            Some(Guid::read(reader)?)
        } else {
            None
        };

        // Only written between the package-owner and non-outer-import versions
        let owner_persistent_guid = if version.ue4_at_least(ObjectVersionUE4::PackageOwner)
            && version.ue4_below(ObjectVersionUE4::NonOuterPackageImport)
        {
            Some(Guid::read(reader)?)
        } else {
            None
        };

        let generations = reader.read_array(GenerationInfo::read)?;

        let saved_by = if version.ue4_at_least(ObjectVersionUE4::EngineVersionObject) {
            SavedByEngine::Version(EngineVersion::read(reader)?)
        } else {
            SavedByEngine::Changelist(reader.read_u32()?)
        };

        let compatible_with_engine_version =
            if version.ue4_at_least(ObjectVersionUE4::CompatibleEngineVersion) {
                Some(EngineVersion::read(reader)?)
            } else {
                None
            };

        let compression_flags = reader.read_u32()?;

        // Package-level compression cannot be decoded; the chunk layout is
        // irrelevant once any chunk is present.
        let chunks_offset = reader.position();
        let compressed_chunks = reader.read_i32()?;
        if compressed_chunks < 0 {
            return Err(Error::InvalidLength {
                count: i64::from(compressed_chunks),
                offset: chunks_offset,
            });
        }
        if compressed_chunks > 0 {
            return Err(Error::UnsupportedFeature {
                feature: format!("package-level compression ({compressed_chunks} compressed chunks)"),
                offset: chunks_offset,
            });
        }
        if compression_flags != 0 {
            tracing::warn!("Compression flags {:#X} set without compressed chunks", compression_flags);
        }

        let package_source = reader.read_u32()?;
        let additional_packages_to_cook = reader.read_array(PackageReader::read_fstring)?;

        let num_texture_allocations = if version.has_texture_allocations() {
            Some(reader.read_i32()?)
        } else {
            None
        };

        let asset_registry_data_offset = reader.read_i32()?;
        let bulk_data_start_offset = reader.read_i64()?;

        let world_tile_info_data_offset = if version.ue4_at_least(ObjectVersionUE4::WorldLevelInfo) {
            Some(reader.read_i32()?)
        } else {
            None
        };

        let chunk_ids = if version.ue4_at_least(ObjectVersionUE4::ChunkIdsAsArray) {
            Some(reader.read_array(PackageReader::read_i32)?)
        } else {
            None
        };

        let preload_dependencies = TableLocation::read(reader)?;

        let names_referenced_from_export_data_count =
            if version.ue5_at_least(ObjectVersionUE5::NamesReferencedFromExportData) {
                Some(reader.read_i32()?)
            } else {
                None
            };

        let payload_toc_offset = if version.ue5_at_least(ObjectVersionUE5::PayloadToc) {
            Some(reader.read_i64()?)
        } else {
            None
        };

        let data_resource_offset = if version.ue5_at_least(ObjectVersionUE5::DataResources) {
            Some(reader.read_i32()?)
        } else {
            None
        };

        tracing::debug!(
            "Read summary for '{}' (legacy {}, UE4 {}, UE5 {}): {} names, {} imports, {} exports",
            package_name,
            legacy,
            ue4,
            ue5,
            names.count,
            imports.count,
            exports.count
        );

        Ok(Self {
            tag,
            file_version: version,
            legacy_ue3_version,
            custom_versions,
            unversioned,
            total_header_size,
            package_name,
            package_flags,
            names,
            soft_object_paths,
            localization_id,
            gatherable_text_data,
            exports,
            imports,
            depends_offset,
            soft_package_references,
            searchable_names_offset,
            thumbnail_table_offset,
            guid,
            persistent_guid,
            owner_persistent_guid,
            generations,
            saved_by,
            compatible_with_engine_version,
            compression_flags,
            package_source,
            additional_packages_to_cook,
            num_texture_allocations,
            asset_registry_data_offset,
            bulk_data_start_offset,
            world_tile_info_data_offset,
            chunk_ids,
            preload_dependencies,
            names_referenced_from_export_data_count,
            payload_toc_offset,
            data_resource_offset,
        })
    }

    #[must_use]
    pub fn version(&self) -> &PackageFileVersion {
        &self.file_version
    }

    /// Soft object path count, zero when the package predates the list.
    #[must_use]
    pub fn soft_object_paths_count(&self) -> i32 {
        self.soft_object_paths.map_or(0, |t| t.count)
    }

    #[must_use]
    pub fn gatherable_text_data_count(&self) -> i32 {
        self.gatherable_text_data.map_or(0, |t| t.count)
    }

    #[must_use]
    pub fn soft_package_references_count(&self) -> i32 {
        self.soft_package_references.map_or(0, |t| t.count)
    }

    /// Changelist of the saving engine, from whichever record the package has.
    #[must_use]
    pub fn engine_changelist(&self) -> u32 {
        match &self.saved_by {
            SavedByEngine::Version(v) => v.changelist,
            SavedByEngine::Changelist(c) => *c,
        }
    }
}
