//! Configuration for loaders

/// How the second pass of a two-pass loader gets its entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStrategy {
    /// Seek back to the start of the body and parse it again
    Rewind,
    /// Keep the parsed entries in memory after the first pass
    Buffer,
}

/// Configuration for path-based loading
#[derive(Debug, Clone)]
pub struct IoConfig {
    /// Second-pass strategy for formats that are read twice
    pub pass_strategy: PassStrategy,

    /// Starting number of row buckets for formats whose size is discovered
    /// from the data (grows by doubling)
    pub initial_row_capacity: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            pass_strategy: PassStrategy::Rewind,
            initial_row_capacity: 1024,
        }
    }
}

impl IoConfig {
    /// Config that replays entries from memory instead of re-reading files
    pub fn buffered() -> Self {
        Self {
            pass_strategy: PassStrategy::Buffer,
            ..Self::default()
        }
    }
}
