//! Flow layout for dynamic collections of tags.
//!
//! Items are packed into wrapped rows inside a fixed-width container and then
//! positioned within each row, either flush-left or centered.
//!
//! # Architecture
//!
//! 1. **Measurement pass**: greedy first-fit row packing, assigning every
//!    visible item a line and a column and computing the required height
//! 2. **Line positioning**: a [`LinePositioner`] strategy turns line
//!    assignments into per-item bounds
//! 3. **Caching**: [`MeasureCache`] lets a host skip repeated passes when
//!    item sizes and the container are unchanged
//!
//! Vertical placement is identical for both alignments: every row starts at
//! `padding.top` plus the heights of the rows above it and the spacing
//! between them. Row heights are the tallest item of each row.
//!
//! This deliberately departs from the Android tag widget these rules come
//! from, so layouts are not pixel-for-pixel compatible with it: there a row
//! was as tall as the last measured item and left-aligned rows ignored
//! `padding.top`. Here every row uses its own maximum height and
//! `padding.top` applies to both alignments.
//!
//! # Example
//!
//! ```
//! use tagflow_core::{FixedItem, FlowConfig};
//! use tagflow_layout::{layout, measure};
//!
//! let config = FlowConfig::new(300.0);
//! let tags = [FixedItem::new(100.0, 40.0), FixedItem::new(120.0, 40.0)];
//!
//! let height = measure(&tags, &config)?;
//! for placed in layout(&tags, &config)? {
//!     println!("{}: {:?}", placed.index, placed.bounds);
//! }
//! # assert!((height - 40.0).abs() < 0.001);
//! # Ok::<(), tagflow_core::FlowError>(())
//! ```

mod cache;
mod flow;
mod measure;
mod position;

pub use cache::{MeasureCache, DEFAULT_CACHE_CAPACITY};
pub use flow::{layout, measure, FlowLayout, FlowOutput};
pub use measure::{measure_items, Line, LineAssignment, MeasuredItem, Measurement, MeasurementPass};
pub use position::{positioner, CenterAlign, LeftAlign, LinePositioner, PlacedItem};
