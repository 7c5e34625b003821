//! Host-side memo of complete layout passes.
//!
//! The passes themselves keep no state. A host that lays out the same tags
//! repeatedly (for example on every frame) can route calls through a
//! [`MeasureCache`], which reuses a previous [`FlowOutput`] when the
//! container config and every visible item size are bit-identical.

use indexmap::IndexMap;
use log::trace;
use tagflow_core::{Alignment, FlowConfig, FlowError, FlowItem};

use crate::flow::{FlowLayout, FlowOutput};
use crate::measure::{measure_items, MeasuredItem};

pub const DEFAULT_CACHE_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    config: [u64; 7],
    alignment: Alignment,
    items: Vec<(usize, u64, u64)>,
}

impl CacheKey {
    fn new(config: &FlowConfig, items: &[MeasuredItem]) -> Self {
        Self {
            config: [
                config.width.to_bits(),
                config.padding.top.to_bits(),
                config.padding.right.to_bits(),
                config.padding.bottom.to_bits(),
                config.padding.left.to_bits(),
                config.line_spacing.to_bits(),
                config.column_spacing.to_bits(),
            ],
            alignment: config.alignment,
            items: items
                .iter()
                .map(|item| (item.index, item.size.width.to_bits(), item.size.height.to_bits()))
                .collect(),
        }
    }
}

/// Bounded memo of layout outputs, evicting the oldest entry first.
#[derive(Debug, Clone)]
pub struct MeasureCache {
    entries: IndexMap<CacheKey, FlowOutput>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl MeasureCache {
    /// Create a cache holding at most `capacity` outputs (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Lay out `items`, reusing a stored output when inputs repeat.
    ///
    /// Items are still measured on every call; only packing and
    /// positioning are skipped on a hit.
    pub fn compute<I: FlowItem>(&mut self, flow: &FlowLayout, items: &[I]) -> Result<&FlowOutput, FlowError> {
        let measured = measure_items(items, flow.config().content_width())?;
        let key = CacheKey::new(flow.config(), &measured);

        if let Some(index) = self.entries.get_index_of(&key) {
            self.hits += 1;
            trace!("layout cache hit for {} items", measured.len());
            return Ok(&self.entries[index]);
        }

        self.misses += 1;
        let output = flow.compute_measured(measured)?;
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        let (index, _) = self.entries.insert_full(key, output);
        Ok(&self.entries[index])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every stored output and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
