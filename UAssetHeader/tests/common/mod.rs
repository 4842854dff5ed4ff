//! Synthetic package builder shared by the integration tests
//!
//! Writes the header fields in file order with the engine thresholds spelled
//! out, so the decoder is checked against an independent layout.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

pub const TAG: u32 = 0x9E2A83C1;
pub const TAG_SWAPPED: u32 = 0xC1832A9E;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Clone)]
pub struct ImportSpec {
    pub class_package: i32,
    pub class_name: i32,
    pub outer_index: i32,
    pub object_name: i32,
    pub package_name: i32,
    pub optional: bool,
}

#[derive(Debug, Clone)]
pub struct ExportSpec {
    pub class_index: i32,
    pub outer_index: i32,
    pub object_name: i32,
    pub object_number: i32,
    pub serial_size: i64,
    pub serial_offset: i64,
    /// Raw value of the forced-export boolean.
    pub forced_export: i32,
    pub is_asset: bool,
}

impl Default for ExportSpec {
    fn default() -> Self {
        Self {
            class_index: -1,
            outer_index: 0,
            object_name: 0,
            object_number: 0,
            serial_size: 128,
            serial_offset: 4096,
            forced_export: 0,
            is_asset: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PackageBuilder {
    pub tag: u32,
    pub legacy: i32,
    pub ue4: i32,
    pub ue5: i32,
    pub licensee: i32,
    /// Raw container bytes; an empty container when `None`.
    pub custom_versions: Option<Vec<u8>>,
    pub package_name: String,
    pub names: Vec<String>,
    pub imports: Vec<ImportSpec>,
    pub exports: Vec<ExportSpec>,
    pub compression_flags: u32,
    pub compressed_chunks: i32,
    pub names_offset_override: Option<i32>,
}

impl PackageBuilder {
    /// A UE5.1-era cooked package.
    pub fn modern() -> Self {
        Self {
            tag: TAG,
            legacy: -8,
            ue4: 522,
            ue5: 1009,
            licensee: 0,
            custom_versions: None,
            package_name: "/Game/Maps/Ground".to_string(),
            names: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
            compression_flags: 0,
            compressed_chunks: 0,
            names_offset_override: None,
        }
    }

    /// A UE4.20-era package without the UE5 counter.
    pub fn legacy_ue4() -> Self {
        Self {
            legacy: -6,
            ue4: 500,
            ue5: 0,
            ..Self::modern()
        }
    }

    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.names = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        // Field widths never depend on offset values, so measure first
        let summary_len = self.summary_bytes(0, 0, 0).len();
        let names = self.name_bytes();
        let imports = self.import_bytes();
        let exports = self.export_bytes();

        let names_offset = summary_len as i32;
        let imports_offset = names_offset + names.len() as i32;
        let exports_offset = imports_offset + imports.len() as i32;

        let mut out = self.summary_bytes(
            self.names_offset_override.unwrap_or(names_offset),
            imports_offset,
            exports_offset,
        );
        assert_eq!(out.len(), summary_len);
        out.extend_from_slice(&names);
        out.extend_from_slice(&imports);
        out.extend_from_slice(&exports);
        out
    }

    fn summary_bytes(&self, names_offset: i32, imports_offset: i32, exports_offset: i32) -> Vec<u8> {
        let mut w = Vec::new();
        let (ue4, ue5) = (self.ue4, self.effective_ue5());

        w.write_u32::<LittleEndian>(self.tag).unwrap();
        w.write_i32::<LittleEndian>(self.legacy).unwrap();
        if self.legacy != -4 {
            w.write_i32::<LittleEndian>(864).unwrap();
        }
        w.write_i32::<LittleEndian>(ue4).unwrap();
        if self.legacy <= -8 {
            w.write_i32::<LittleEndian>(ue5).unwrap();
        }
        w.write_i32::<LittleEndian>(self.licensee).unwrap();
        if self.legacy <= -2 {
            match &self.custom_versions {
                Some(raw) => w.extend_from_slice(raw),
                None => w.write_i32::<LittleEndian>(0).unwrap(),
            }
        }

        w.write_i32::<LittleEndian>(0x1234).unwrap(); // total header size
        write_fstring(&mut w, &self.package_name);
        w.write_u32::<LittleEndian>(0x8000_0000).unwrap(); // package flags
        w.write_i32::<LittleEndian>(self.names.len() as i32).unwrap();
        w.write_i32::<LittleEndian>(names_offset).unwrap();
        if ue5 >= 1008 {
            write_pair(&mut w, 0, 0);
        }
        if ue4 >= 516 {
            write_fstring(&mut w, "4C7C1B1D");
        }
        if ue4 >= 459 {
            write_pair(&mut w, 0, 0);
        }
        w.write_i32::<LittleEndian>(self.exports.len() as i32).unwrap();
        w.write_i32::<LittleEndian>(exports_offset).unwrap();
        w.write_i32::<LittleEndian>(self.imports.len() as i32).unwrap();
        w.write_i32::<LittleEndian>(imports_offset).unwrap();
        w.write_i32::<LittleEndian>(0).unwrap(); // depends offset
        if ue4 >= 384 {
            write_pair(&mut w, 0, 0);
        }
        if ue4 >= 510 {
            w.write_i32::<LittleEndian>(0).unwrap();
        }
        w.write_i32::<LittleEndian>(0).unwrap(); // thumbnail table offset
        write_guid(&mut w, [1, 2, 3, 4]);
        if ue4 >= 518 {
            write_guid(&mut w, [5, 6, 7, 8]);
        }
        if (518..520).contains(&ue4) {
            write_guid(&mut w, [9, 10, 11, 12]);
        }
        // One generation
        w.write_i32::<LittleEndian>(1).unwrap();
        write_pair(&mut w, self.exports.len() as i32, self.names.len() as i32);
        if ue4 >= 336 {
            write_engine_version(&mut w, 5, 1, 1, 23_058_290, "++UE5+Release-5.1");
        } else {
            w.write_u32::<LittleEndian>(2_000_000).unwrap();
        }
        if ue4 >= 444 {
            write_engine_version(&mut w, 5, 1, 0, 0, "");
        }
        w.write_u32::<LittleEndian>(self.compression_flags).unwrap();
        w.write_i32::<LittleEndian>(self.compressed_chunks).unwrap();
        w.write_u32::<LittleEndian>(0xDEAD).unwrap(); // package source
        // Additional packages to cook
        w.write_i32::<LittleEndian>(1).unwrap();
        write_fstring(&mut w, "/Game/Extra");
        if self.legacy > -7 {
            w.write_i32::<LittleEndian>(0).unwrap();
        }
        w.write_i32::<LittleEndian>(0).unwrap(); // asset registry offset
        w.write_i64::<LittleEndian>(-1).unwrap(); // bulk data start
        if ue4 >= 224 {
            w.write_i32::<LittleEndian>(0).unwrap();
        }
        if ue4 >= 326 {
            w.write_i32::<LittleEndian>(1).unwrap();
            w.write_i32::<LittleEndian>(7).unwrap();
        }
        write_pair(&mut w, 0, -1); // preload dependencies
        if ue5 >= 1001 {
            w.write_i32::<LittleEndian>(0).unwrap();
        }
        if ue5 >= 1002 {
            w.write_i64::<LittleEndian>(-1).unwrap();
        }
        if ue5 >= 1009 {
            w.write_i32::<LittleEndian>(-1).unwrap();
        }
        w
    }

    /// The UE5 counter only exists from legacy version -8 on.
    fn effective_ue5(&self) -> i32 {
        if self.legacy <= -8 { self.ue5 } else { 0 }
    }

    fn name_bytes(&self) -> Vec<u8> {
        let mut w = Vec::new();
        for (i, name) in self.names.iter().enumerate() {
            write_fstring(&mut w, name);
            w.write_u16::<LittleEndian>(i as u16).unwrap();
            w.write_u16::<LittleEndian>(0xBEEF).unwrap();
        }
        w
    }

    fn import_bytes(&self) -> Vec<u8> {
        let mut w = Vec::new();
        for import in &self.imports {
            write_pair(&mut w, import.class_package, 0);
            write_pair(&mut w, import.class_name, 0);
            w.write_i32::<LittleEndian>(import.outer_index).unwrap();
            write_pair(&mut w, import.object_name, 0);
            if self.ue4 >= 520 {
                write_pair(&mut w, import.package_name, 0);
            }
            if self.effective_ue5() >= 1003 {
                w.write_i32::<LittleEndian>(i32::from(import.optional)).unwrap();
            }
        }
        w
    }

    fn export_bytes(&self) -> Vec<u8> {
        let mut w = Vec::new();
        for export in &self.exports {
            w.write_i32::<LittleEndian>(export.class_index).unwrap();
            w.write_i32::<LittleEndian>(0).unwrap(); // super
            if self.ue4 >= 508 {
                w.write_i32::<LittleEndian>(0).unwrap(); // template
            }
            w.write_i32::<LittleEndian>(export.outer_index).unwrap();
            write_pair(&mut w, export.object_name, export.object_number);
            w.write_u32::<LittleEndian>(0x0000_0001).unwrap(); // object flags
            if self.ue4 >= 511 {
                w.write_i64::<LittleEndian>(export.serial_size).unwrap();
                w.write_i64::<LittleEndian>(export.serial_offset).unwrap();
            } else {
                w.write_i32::<LittleEndian>(export.serial_size as i32).unwrap();
                w.write_i32::<LittleEndian>(export.serial_offset as i32).unwrap();
            }
            w.write_i32::<LittleEndian>(export.forced_export).unwrap();
            w.write_i32::<LittleEndian>(0).unwrap(); // not for client
            w.write_i32::<LittleEndian>(1).unwrap(); // not for server
            if self.effective_ue5() < 1005 {
                write_guid(&mut w, [0xAA, 0xBB, 0xCC, 0xDD]);
            }
            if self.effective_ue5() >= 1006 {
                w.write_i32::<LittleEndian>(0).unwrap();
            }
            w.write_u32::<LittleEndian>(0).unwrap(); // package flags
            if self.ue4 >= 365 {
                w.write_i32::<LittleEndian>(0).unwrap();
            }
            if self.ue4 >= 485 {
                w.write_i32::<LittleEndian>(i32::from(export.is_asset)).unwrap();
            }
            if self.effective_ue5() >= 1003 {
                w.write_i32::<LittleEndian>(1).unwrap();
            }
            if self.ue4 >= 507 {
                for value in [-1, 0, 0, 0, 0] {
                    w.write_i32::<LittleEndian>(value).unwrap();
                }
            }
        }
        w
    }
}

pub fn write_fstring(w: &mut Vec<u8>, text: &str) {
    if text.is_empty() {
        w.write_i32::<LittleEndian>(0).unwrap();
        return;
    }
    w.write_i32::<LittleEndian>(text.len() as i32 + 1).unwrap();
    w.extend_from_slice(text.as_bytes());
    w.push(0);
}

pub fn write_pair(w: &mut Vec<u8>, a: i32, b: i32) {
    w.write_i32::<LittleEndian>(a).unwrap();
    w.write_i32::<LittleEndian>(b).unwrap();
}

pub fn write_guid(w: &mut Vec<u8>, words: [u32; 4]) {
    for word in words {
        w.write_u32::<LittleEndian>(word).unwrap();
    }
}

fn write_engine_version(w: &mut Vec<u8>, major: u16, minor: u16, patch: u16, changelist: u32, branch: &str) {
    w.write_u16::<LittleEndian>(major).unwrap();
    w.write_u16::<LittleEndian>(minor).unwrap();
    w.write_u16::<LittleEndian>(patch).unwrap();
    w.write_u32::<LittleEndian>(changelist).unwrap();
    write_fstring(w, branch);
}
