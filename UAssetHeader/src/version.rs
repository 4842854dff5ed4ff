//! Package version counters and the thresholds that gate field presence
//!
//! A package records a legacy file version (negative, more negative is newer)
//! plus the UE4 and UE5 object version counters. Every optional field in the
//! header is present only once one of those counters reaches a named engine
//! threshold.

use serde::Serialize;

/// UE4-epoch object version thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum ObjectVersionUE4 {
    WorldLevelInfo = 224,
    ChunkIdsAsArray = 326,
    EngineVersionObject = 336,
    LoadForEditorGame = 365,
    StringAssetReferencesMap = 384,
    CompatibleEngineVersion = 444,
    SerializeTextInPackages = 459,
    CookedAssetsInEditorSupport = 485,
    PreloadDependenciesInCookedExports = 507,
    TemplateIndexInCookedExports = 508,
    SearchableNames = 510,
    ExportMapSerialSizes64Bit = 511,
    SummaryLocalizationId = 516,
    PackageOwner = 518,
    NonOuterPackageImport = 520,
}

/// UE5-epoch object version thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum ObjectVersionUE5 {
    InitialVersion = 1000,
    NamesReferencedFromExportData = 1001,
    PayloadToc = 1002,
    OptionalResources = 1003,
    RemoveObjectExportPackageGuid = 1005,
    TrackObjectExportIsInherited = 1006,
    SoftObjectPathList = 1008,
    DataResources = 1009,
}

/// On-disk layout of the custom version container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomVersionFormat {
    /// Legacy file version -2: `(tag: u32, version: i32)` entries.
    Enums,
    /// Legacy file versions -5..=-3: `(guid, version, friendly name)` entries.
    Guids,
    /// Legacy file versions below -5: `(guid, version)` entries.
    Optimized,
}

impl CustomVersionFormat {
    /// Select the container layout for a legacy file version.
    ///
    /// Returns `None` for versions that never carried a container.
    #[must_use]
    pub fn for_legacy_version(legacy_file_version: i32) -> Option<Self> {
        match legacy_file_version {
            -2 => Some(CustomVersionFormat::Enums),
            -5..=-3 => Some(CustomVersionFormat::Guids),
            v if v < -5 => Some(CustomVersionFormat::Optimized),
            _ => None,
        }
    }
}

/// The version counters recorded at the top of a package summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PackageFileVersion {
    pub legacy: i32,
    pub ue4: i32,
    /// Zero when the legacy version predates the UE5 counter.
    pub ue5: i32,
    pub licensee_ue4: i32,
}

impl PackageFileVersion {
    #[must_use]
    pub fn ue4_at_least(&self, threshold: ObjectVersionUE4) -> bool {
        self.ue4 >= threshold as i32
    }

    #[must_use]
    pub fn ue4_below(&self, threshold: ObjectVersionUE4) -> bool {
        !self.ue4_at_least(threshold)
    }

    #[must_use]
    pub fn ue5_at_least(&self, threshold: ObjectVersionUE5) -> bool {
        self.ue5 >= threshold as i32
    }

    #[must_use]
    pub fn ue5_below(&self, threshold: ObjectVersionUE5) -> bool {
        !self.ue5_at_least(threshold)
    }

    /// All three counters are zero; the package was saved without version info.
    #[must_use]
    pub fn is_unversioned(&self) -> bool {
        self.ue4 == 0 && self.ue5 == 0 && self.licensee_ue4 == 0
    }

    /// Legacy version -4 is the only one that omits the UE3 version field.
    #[must_use]
    pub fn has_legacy_ue3_version(legacy_file_version: i32) -> bool {
        legacy_file_version != -4
    }

    #[must_use]
    pub fn has_ue5_version(legacy_file_version: i32) -> bool {
        legacy_file_version <= -8
    }

    #[must_use]
    pub fn has_custom_versions(legacy_file_version: i32) -> bool {
        legacy_file_version <= -2
    }

    /// The texture allocation count was dropped at legacy version -7.
    #[must_use]
    pub fn has_texture_allocations(&self) -> bool {
        self.legacy > -7
    }
}
