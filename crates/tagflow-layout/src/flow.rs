//! Entry points combining the measurement pass and line positioning.

use log::debug;
use tagflow_core::{Bounds, ConfigError, FlowConfig, FlowError, FlowItem};

use crate::measure::{MeasuredItem, Measurement, MeasurementPass};
use crate::position::{positioner, PlacedItem};

/// Measurement and placement from a single pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowOutput {
    pub measurement: Measurement,
    /// Boxes of the visible items, in item order
    pub items: Vec<PlacedItem>,
}

impl FlowOutput {
    /// Total container height, vertical padding included.
    pub fn required_height(&self) -> f64 {
        self.measurement.required_height()
    }

    /// Box of the item at `index` in the host's collection.
    pub fn bounds_of(&self, index: usize) -> Option<Bounds> {
        self.items
            .binary_search_by_key(&index, |placed| placed.index)
            .ok()
            .map(|pos| self.items[pos].bounds)
    }

    /// Bounding box of all placed items, or `None` when nothing is visible.
    pub fn content_bounds(&self) -> Option<Bounds> {
        let mut iter = self.items.iter().map(|placed| placed.bounds);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, bounds| acc.union(&bounds)))
    }
}

/// A validated container ready to lay out items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    config: FlowConfig,
}

impl FlowLayout {
    /// Validate `config` and wrap it.
    pub fn new(config: FlowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    fn pass(&self) -> MeasurementPass<'_> {
        // The config was validated in `new` and cannot change afterwards.
        MeasurementPass::from_validated(&self.config)
    }

    /// Run only the measurement pass.
    pub fn measure<I: FlowItem>(&self, items: &[I]) -> Result<Measurement, FlowError> {
        self.pass().run(items)
    }

    /// Height the container needs for `items`.
    pub fn required_height<I: FlowItem>(&self, items: &[I]) -> Result<f64, FlowError> {
        Ok(self.measure(items)?.required_height())
    }

    /// Boxes for the visible items, in item order.
    pub fn layout<I: FlowItem>(&self, items: &[I]) -> Result<Vec<PlacedItem>, FlowError> {
        Ok(self.compute(items)?.items)
    }

    /// Measure and position `items`, measuring each item once.
    pub fn compute<I: FlowItem>(&self, items: &[I]) -> Result<FlowOutput, FlowError> {
        let measurement = self.pass().run(items)?;
        Ok(self.place(measurement))
    }

    /// Position items whose sizes were captured already.
    ///
    /// Rejects invalid sizes and indices that are not strictly ascending.
    pub fn compute_measured(&self, measured: Vec<MeasuredItem>) -> Result<FlowOutput, FlowError> {
        let measurement = self.pass().pack(measured)?;
        Ok(self.place(measurement))
    }

    fn place(&self, measurement: Measurement) -> FlowOutput {
        let items = positioner(self.config.alignment).position(&measurement, &self.config);
        debug!(
            "{:?} layout placed {} items, height {}",
            self.config.alignment,
            items.len(),
            measurement.required_height()
        );
        FlowOutput { measurement, items }
    }
}

/// Height the container needs to show every visible item.
pub fn measure<I: FlowItem>(items: &[I], config: &FlowConfig) -> Result<f64, FlowError> {
    FlowLayout::new(*config)?.required_height(items)
}

/// Final boxes for the visible items, in item order.
pub fn layout<I: FlowItem>(items: &[I], config: &FlowConfig) -> Result<Vec<PlacedItem>, FlowError> {
    FlowLayout::new(*config)?.layout(items)
}
