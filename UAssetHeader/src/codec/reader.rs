//! Little-endian primitive reader over an in-memory package
//!
//! Every read records its starting offset so a failure can be reported with
//! the exact position in the file.

use crate::error::{Error, Result};
use crate::options::DEFAULT_MAX_TABLE_ENTRIES;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, ErrorKind};

/// Cursor over the bytes of a package.
///
/// Cheap to create; independent readers over the same slice can decode
/// disjoint tables concurrently.
#[derive(Debug, Clone)]
pub struct PackageReader<'a> {
    cursor: Cursor<&'a [u8]>,
    max_elements: usize,
}

impl<'a> PackageReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            max_elements: DEFAULT_MAX_TABLE_ENTRIES,
        }
    }

    /// Cap the element count accepted by [`read_array`](Self::read_array)
    /// and [`check_count`](Self::check_count).
    #[must_use]
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// Current absolute offset.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Total length of the underlying package.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursor.get_ref().is_empty()
    }

    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.position())
    }

    /// Jump to an absolute offset taken from the package summary.
    ///
    /// The target must lie within the package. `source` is where the offset
    /// value itself was read and is the position reported on failure;
    /// `table` names what the offset locates.
    pub fn seek_to(&mut self, offset: i64, source: u64, table: &str) -> Result<()> {
        let len = self.len();
        match u64::try_from(offset) {
            Ok(target) if target <= len => {
                self.cursor.set_position(target);
                Ok(())
            }
            _ => Err(Error::MalformedHeader {
                reason: format!("{table} offset {offset} lies outside the {len}-byte package"),
                offset: source,
            }),
        }
    }

    fn read_with<T>(
        &mut self,
        read: impl FnOnce(&mut Cursor<&'a [u8]>) -> std::io::Result<T>,
    ) -> Result<T> {
        let offset = self.position();
        read(&mut self.cursor).map_err(|source| {
            self.cursor.set_position(offset);
            Error::Io { source, offset }
        })
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_with(|c| c.read_u16::<LittleEndian>())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_with(|c| c.read_i16::<LittleEndian>())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_with(|c| c.read_u32::<LittleEndian>())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_with(|c| c.read_i32::<LittleEndian>())
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_with(|c| c.read_u64::<LittleEndian>())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_with(|c| c.read_i64::<LittleEndian>())
    }

    /// Booleans are serialized as 32-bit integers holding 0 or 1.
    pub fn read_bool(&mut self) -> Result<bool> {
        let offset = self.position();
        match self.read_i32()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(Error::InvalidBoolean { value, offset }),
        }
    }

    /// Read a length-prefixed, null-terminated UTF-8 string.
    ///
    /// Negative lengths mark wide-character strings, which are rejected.
    /// A zero length is an empty string with no terminator byte.
    pub fn read_fstring(&mut self) -> Result<String> {
        let offset = self.position();
        let length = self.read_i32()?;
        if length < 0 {
            return Err(Error::UnsupportedEncoding { length, offset });
        }
        if length == 0 {
            return Ok(String::new());
        }

        let start = self.position();
        let data: &'a [u8] = *self.cursor.get_ref();
        let bytes = usize::try_from(start)
            .ok()
            .and_then(|start| data.get(start..start + length as usize))
            .ok_or_else(|| Error::Io {
                source: std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!("string of {length} bytes runs past the end of the package"),
                ),
                offset: start,
            })?;
        self.cursor.set_position(start + length as u64);

        // Drop the mandatory null terminator
        let text = &bytes[..bytes.len() - 1];
        std::str::from_utf8(text)
            .map(str::to_owned)
            .map_err(|_| Error::UnsupportedEncoding { length, offset })
    }

    /// Validate a serialized element count against the reader's limit.
    pub fn check_count(&self, count: i64, offset: u64) -> Result<usize> {
        usize::try_from(count)
            .ok()
            .filter(|&n| n <= self.max_elements)
            .ok_or(Error::InvalidLength { count, offset })
    }

    /// Read an `i32` count followed by that many elements.
    ///
    /// `read_element` decides the element type: a primitive reader such as
    /// [`read_i32`](Self::read_i32) or a record decoder like `Guid::read`.
    pub fn read_array<T, F>(&mut self, mut read_element: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let offset = self.position();
        let count = self.read_i32()?;
        let count = self.check_count(i64::from(count), offset)?;

        // Every element takes at least one byte, so never reserve past the data
        let mut elements = Vec::with_capacity(count.min(self.remaining() as usize));
        for _ in 0..count {
            elements.push(read_element(self)?);
        }
        Ok(elements)
    }

    /// Read `count` records starting at `offset`, as located by the summary.
    ///
    /// `field_offset` is the position of the summary's `(count, offset)`
    /// pair: a bad count is reported there, a bad offset four bytes later.
    /// An empty table is never sought, so its offset is not validated.
    pub fn read_table<T, F>(
        &mut self,
        count: i32,
        offset: i32,
        field_offset: u64,
        table: &str,
        mut read_record: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let count = self.check_count(i64::from(count), field_offset)?;
        if count == 0 {
            return Ok(Vec::new());
        }
        self.seek_to(i64::from(offset), field_offset + 4, table)?;
        tracing::debug!("Reading {} {} entries at offset {}", count, table, offset);

        let mut records = Vec::with_capacity(count.min(self.remaining() as usize));
        for _ in 0..count {
            records.push(read_record(self)?);
        }
        Ok(records)
    }
}
