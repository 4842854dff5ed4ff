//! Import table decoding

use super::context::DecodeContext;
use super::types::{ObjectImport, PackageIndex};
use crate::codec::PackageReader;
use crate::error::Result;
use crate::version::{ObjectVersionUE4, ObjectVersionUE5};

impl ObjectImport {
    pub fn read(reader: &mut PackageReader<'_>, ctx: &DecodeContext<'_>) -> Result<Self> {
        let version = ctx.version();

        let class_package = ctx.names.read_reference(reader)?;
        let class_name = ctx.names.read_reference(reader)?;
        let outer_index = PackageIndex::read(reader)?;
        let object_name = ctx.names.read_reference(reader)?;

        let package_name = if version.ue4_at_least(ObjectVersionUE4::NonOuterPackageImport) {
            Some(ctx.names.read_reference(reader)?)
        } else {
            None
        };

        let import_optional = if version.ue5_at_least(ObjectVersionUE5::OptionalResources) {
            Some(reader.read_bool()?)
        } else {
            None
        };

        tracing::trace!(
            "Import name {} class name {} outer {:?}",
            object_name.index,
            class_name.index,
            outer_index
        );

        Ok(Self {
            class_package,
            class_name,
            outer_index,
            object_name,
            package_name,
            import_optional,
        })
    }
}

/// Decode the import table located by the summary.
pub fn read_imports(
    reader: &mut PackageReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<ObjectImport>> {
    ctx.summary
        .imports
        .read_records(reader, "import table", |r| ObjectImport::read(r, ctx))
}
