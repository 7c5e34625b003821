//! Line positioning strategies.
//!
//! A positioner turns the line assignments of a [`Measurement`] into final
//! bounds. Both strategies share the vertical placement rule and differ only
//! in where each row starts horizontally.

use smallvec::SmallVec;
use tagflow_core::{Alignment, Bounds, FlowConfig};

use crate::measure::{LineAssignment, MeasuredItem, Measurement};

/// Final placement of one visible item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    /// Position of the item in the host's collection
    pub index: usize,
    /// Row and column the item was packed into
    pub line: LineAssignment,
    /// Box in container coordinates
    pub bounds: Bounds,
}

/// Places measured items within their lines.
pub trait LinePositioner {
    /// Compute bounds for every measured item, in item order.
    fn position(&self, measurement: &Measurement, config: &FlowConfig) -> Vec<PlacedItem>;
}

/// Rows flush against the left padding edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeftAlign;

/// Rows centered within the content width.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterAlign;

static LEFT_ALIGN: LeftAlign = LeftAlign;
static CENTER_ALIGN: CenterAlign = CenterAlign;

/// Strategy for an alignment mode.
pub fn positioner(alignment: Alignment) -> &'static dyn LinePositioner {
    match alignment {
        Alignment::Left => &LEFT_ALIGN,
        Alignment::Center => &CENTER_ALIGN,
    }
}

/// Top edge of every line.
///
/// `top(n) = padding.top + Σ height(0..n) + line_spacing * n`
fn line_tops(measurement: &Measurement, config: &FlowConfig) -> SmallVec<[f64; 16]> {
    let mut tops = SmallVec::with_capacity(measurement.line_count());
    let mut y = config.padding.top;
    for height in measurement.line_heights() {
        tops.push(y);
        y += height + config.line_spacing;
    }
    tops
}

impl LinePositioner for LeftAlign {
    fn position(&self, measurement: &Measurement, config: &FlowConfig) -> Vec<PlacedItem> {
        let tops = line_tops(measurement, config);
        let mut placed = Vec::with_capacity(measurement.items().len());
        let mut cursor = config.padding.left;

        for (item, line) in measurement.iter() {
            if line.column_in_line == 0 {
                cursor = config.padding.left;
            }
            let bounds = Bounds::from_origin(cursor, tops[line.line_index], item.size);
            cursor += item.size.width + config.column_spacing;
            placed.push(PlacedItem {
                index: item.index,
                line,
                bounds,
            });
        }

        placed
    }
}

impl LinePositioner for CenterAlign {
    fn position(&self, measurement: &Measurement, config: &FlowConfig) -> Vec<PlacedItem> {
        let tops = line_tops(measurement, config);
        let content_width = config.content_width();
        let mut placed = Vec::with_capacity(measurement.items().len());

        // Items of the row being collected; flushed when the line changes.
        let mut row: SmallVec<[(&MeasuredItem, LineAssignment); 16]> = SmallVec::new();

        for (item, line) in measurement.iter() {
            if row.first().is_some_and(|(_, first)| first.line_index != line.line_index) {
                emit_centered_row(&row, &tops, content_width, config, &mut placed);
                row.clear();
            }
            row.push((item, line));
        }
        if !row.is_empty() {
            emit_centered_row(&row, &tops, content_width, config, &mut placed);
        }

        placed
    }
}

fn emit_centered_row(
    row: &[(&MeasuredItem, LineAssignment)],
    tops: &[f64],
    content_width: f64,
    config: &FlowConfig,
    placed: &mut Vec<PlacedItem>,
) {
    let items_width: f64 = row.iter().map(|(item, _)| item.size.width).sum();
    let gaps = row.len().saturating_sub(1) as f64;
    let line_width = items_width + config.column_spacing * gaps;

    // Negative when the row is wider than the content box; it then
    // overflows equally on both sides.
    let mut x = config.padding.left + (content_width - line_width) / 2.0;

    for &(item, line) in row {
        let bounds = Bounds::from_origin(x, tops[line.line_index], item.size);
        x += item.size.width + config.column_spacing;
        placed.push(PlacedItem {
            index: item.index,
            line,
            bounds,
        });
    }
}
