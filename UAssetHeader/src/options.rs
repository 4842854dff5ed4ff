//! Options controlling how a package header is decoded

/// Default upper bound on any table or sequence element count.
pub const DEFAULT_MAX_TABLE_ENTRIES: usize = 1 << 24;

/// Options for decoding a package header.
///
/// # Example
///
/// ```
/// use uasset_header::ParseOptions;
///
/// // Decode everything on the calling thread, accept at most 4096 names
/// let options = ParseOptions::new()
///     .with_parallel_tables(false)
///     .with_max_table_entries(4096);
/// assert!(!options.parallel_tables);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Decode the import and export tables concurrently once the name
    /// table is complete.
    /// Default: true
    pub parallel_tables: bool,

    /// Largest element count accepted for any table or sequence. Larger
    /// counts fail with `InvalidLength` before anything is allocated.
    pub max_table_entries: usize,
}

impl ParseOptions {
    /// Create options with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parallel_tables: true,
            max_table_entries: DEFAULT_MAX_TABLE_ENTRIES,
        }
    }

    /// Set whether the import and export tables decode concurrently.
    #[must_use]
    pub fn with_parallel_tables(mut self, enabled: bool) -> Self {
        self.parallel_tables = enabled;
        self
    }

    /// Set the largest accepted table or sequence element count.
    #[must_use]
    pub fn with_max_table_entries(mut self, max: usize) -> Self {
        self.max_table_entries = max;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
