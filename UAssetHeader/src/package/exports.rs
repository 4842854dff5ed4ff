//! Export table decoding
//!
//! Export records carry the widest set of version-gated fields. The serial
//! size and offset share one width decision per record, and the package
//! guid is the one field that disappears in newer packages.

use super::context::DecodeContext;
use super::types::{DependencyWindow, Guid, ObjectExport, PackageIndex};
use crate::codec::PackageReader;
use crate::error::Result;
use crate::version::{ObjectVersionUE4, ObjectVersionUE5};

impl ObjectExport {
    pub fn read(reader: &mut PackageReader<'_>, ctx: &DecodeContext<'_>) -> Result<Self> {
        let version = ctx.version();

        let class_index = PackageIndex::read(reader)?;
        let super_index = PackageIndex::read(reader)?;

        let template_index = if version.ue4_at_least(ObjectVersionUE4::TemplateIndexInCookedExports) {
            Some(PackageIndex::read(reader)?)
        } else {
            None
        };

        let outer_index = PackageIndex::read(reader)?;
        let object_name = ctx.names.read_reference(reader)?;
        let object_flags = reader.read_u32()?;

        let (serial_size, serial_offset) =
            if version.ue4_at_least(ObjectVersionUE4::ExportMapSerialSizes64Bit) {
                (reader.read_i64()?, reader.read_i64()?)
            } else {
                (i64::from(reader.read_i32()?), i64::from(reader.read_i32()?))
            };

        let forced_export = reader.read_bool()?;
        let not_for_client = reader.read_bool()?;
        let not_for_server = reader.read_bool()?;

        let package_guid = if version.ue5_below(ObjectVersionUE5::RemoveObjectExportPackageGuid) {
            Some(Guid::read(reader)?)
        } else {
            None
        };

        let is_inherited_instance =
            if version.ue5_at_least(ObjectVersionUE5::TrackObjectExportIsInherited) {
                Some(reader.read_bool()?)
            } else {
                None
            };

        let package_flags = reader.read_u32()?;

        let not_always_loaded_for_editor_game =
            if version.ue4_at_least(ObjectVersionUE4::LoadForEditorGame) {
                Some(reader.read_bool()?)
            } else {
                None
            };

        let is_asset = if version.ue4_at_least(ObjectVersionUE4::CookedAssetsInEditorSupport) {
            Some(reader.read_bool()?)
        } else {
            None
        };

        let generate_public_hash = if version.ue5_at_least(ObjectVersionUE5::OptionalResources) {
            Some(reader.read_bool()?)
        } else {
            None
        };

        let dependencies =
            if version.ue4_at_least(ObjectVersionUE4::PreloadDependenciesInCookedExports) {
                Some(DependencyWindow::read(reader)?)
            } else {
                None
            };

        tracing::trace!(
            "Export name {} class {:?}: {} bytes at {}",
            object_name.index,
            class_index,
            serial_size,
            serial_offset
        );

        Ok(Self {
            class_index,
            super_index,
            template_index,
            outer_index,
            object_name,
            object_flags,
            serial_size,
            serial_offset,
            forced_export,
            not_for_client,
            not_for_server,
            package_guid,
            is_inherited_instance,
            package_flags,
            not_always_loaded_for_editor_game,
            is_asset,
            generate_public_hash,
            dependencies,
        })
    }
}

/// Decode the export table located by the summary.
pub fn read_exports(
    reader: &mut PackageReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<ObjectExport>> {
    ctx.summary
        .exports
        .read_records(reader, "export table", |r| ObjectExport::read(r, ctx))
}
