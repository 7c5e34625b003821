//! Measurement pass: greedy first-fit packing of items into rows.

use std::ops::Range;

use log::{debug, trace, warn};
use tagflow_core::{ConfigError, FlowConfig, FlowError, FlowItem, Size};

/// A visible item captured at the start of a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredItem {
    /// Position of the item in the host's collection
    pub index: usize,
    /// Size reported by the item for this pass
    pub size: Size,
}

impl MeasuredItem {
    pub fn new(index: usize, size: Size) -> Self {
        Self { index, size }
    }
}

/// Row and column of a visible item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineAssignment {
    pub line_index: usize,
    pub column_in_line: usize,
}

/// One packed row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// First measured item of the row (index into [`Measurement::items`])
    pub start: usize,
    /// One past the last measured item of the row
    pub end: usize,
    /// Item widths plus the column spacing between them
    pub width: f64,
    /// Height of the tallest item
    pub height: f64,
}

impl Line {
    fn open(start: usize, size: Size) -> Self {
        Self {
            start,
            end: start + 1,
            width: size.width,
            height: size.height,
        }
    }

    fn push(&mut self, size: Size, column_spacing: f64) {
        self.width += column_spacing + size.width;
        self.height = self.height.max(size.height);
        self.end += 1;
    }

    /// Number of items in the row.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Range into [`Measurement::items`].
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Result of a measurement pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    items: Vec<MeasuredItem>,
    assignments: Vec<LineAssignment>,
    lines: Vec<Line>,
    required_height: f64,
}

impl Measurement {
    /// Visible items in host order.
    pub fn items(&self) -> &[MeasuredItem] {
        &self.items
    }

    /// Line assignments, parallel to [`items`](Self::items).
    pub fn assignments(&self) -> &[LineAssignment] {
        &self.assignments
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Per-line height table.
    pub fn line_heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.lines.iter().map(|line| line.height)
    }

    /// Total container height, vertical padding included.
    pub fn required_height(&self) -> f64 {
        self.required_height
    }

    /// Assignment of the item at `index` in the host's collection.
    ///
    /// Returns `None` for hidden items and out-of-range indices.
    pub fn assignment_for(&self, index: usize) -> Option<LineAssignment> {
        self.items
            .binary_search_by_key(&index, |item| item.index)
            .ok()
            .map(|pos| self.assignments[pos])
    }

    /// Iterate measured items together with their assignments.
    pub fn iter(&self) -> impl Iterator<Item = (&MeasuredItem, LineAssignment)> + '_ {
        self.items.iter().zip(self.assignments.iter().copied())
    }
}

/// Capture the size of every visible item.
///
/// Each visible item is measured exactly once; hidden items are skipped
/// without being measured.
pub fn measure_items<I: FlowItem>(items: &[I], max_width: f64) -> Result<Vec<MeasuredItem>, FlowError> {
    let max_width = max_width.max(0.0);
    let mut measured = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        if !item.is_visible() {
            continue;
        }
        let size = item.measure(max_width);
        if !size.is_valid() {
            return Err(FlowError::InvalidItemSize {
                index,
                width: size.width,
                height: size.height,
            });
        }
        measured.push(MeasuredItem::new(index, size));
    }

    Ok(measured)
}

/// Assigns lines and columns to items and computes the required height.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementPass<'a> {
    config: &'a FlowConfig,
}

impl<'a> MeasurementPass<'a> {
    /// Create a pass over a validated config.
    pub fn new(config: &'a FlowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub(crate) fn from_validated(config: &'a FlowConfig) -> Self {
        Self { config }
    }

    /// Measure the visible items and pack them into lines.
    pub fn run<I: FlowItem>(&self, items: &[I]) -> Result<Measurement, FlowError> {
        let measured = measure_items(items, self.config.content_width())?;
        Ok(self.pack_unchecked(measured))
    }

    /// Pack already measured items into lines.
    ///
    /// Sizes must be finite and non-negative and indices strictly
    /// ascending, as [`measure_items`] produces them.
    pub fn pack(&self, items: Vec<MeasuredItem>) -> Result<Measurement, FlowError> {
        check_measured(&items)?;
        Ok(self.pack_unchecked(items))
    }

    fn pack_unchecked(&self, items: Vec<MeasuredItem>) -> Measurement {
        let content_width = self.config.content_width();
        let column_spacing = self.config.column_spacing;

        let mut lines: Vec<Line> = Vec::new();
        let mut assignments = Vec::with_capacity(items.len());

        for (pos, item) in items.iter().enumerate() {
            let size = item.size;
            if size.width > content_width {
                warn!(
                    "item {} is {} wide, overflowing content width {}",
                    item.index, size.width, content_width
                );
            }

            let appended = match lines.last_mut() {
                Some(line) if fits(line.width, size.width, column_spacing, content_width) => {
                    line.push(size, column_spacing);
                    true
                }
                _ => false,
            };
            if !appended {
                if !lines.is_empty() {
                    trace!("item {} wraps to line {}", item.index, lines.len());
                }
                lines.push(Line::open(pos, size));
            }

            let line_index = lines.len() - 1;
            assignments.push(LineAssignment {
                line_index,
                column_in_line: pos - lines[line_index].start,
            });
        }

        let required_height = required_height(self.config, &lines);
        debug!(
            "measured {} items into {} lines, height {}",
            items.len(),
            lines.len(),
            required_height
        );

        Measurement {
            items,
            assignments,
            lines,
            required_height,
        }
    }
}

fn check_measured(items: &[MeasuredItem]) -> Result<(), FlowError> {
    let mut previous: Option<usize> = None;
    for item in items {
        if !item.size.is_valid() {
            return Err(FlowError::InvalidItemSize {
                index: item.index,
                width: item.size.width,
                height: item.size.height,
            });
        }
        if let Some(previous) = previous.filter(|&previous| item.index <= previous) {
            return Err(FlowError::UnorderedItems {
                index: item.index,
                previous,
            });
        }
        previous = Some(item.index);
    }
    Ok(())
}

/// An item stays on the current line only if it fits; an exact fit counts.
fn fits(running_width: f64, width: f64, column_spacing: f64, content_width: f64) -> bool {
    content_width > 0.0 && running_width + column_spacing + width <= content_width
}

fn required_height(config: &FlowConfig, lines: &[Line]) -> f64 {
    let gaps = lines.len().saturating_sub(1) as f64;
    let content: f64 = lines.iter().map(|line| line.height).sum();
    config.padding.vertical() + content + config.line_spacing * gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagflow_core::{FixedItem, Padding};

    fn run(config: &FlowConfig, items: &[FixedItem]) -> Measurement {
        MeasurementPass::new(config).unwrap().run(items).unwrap()
    }

    fn lines_of(measurement: &Measurement) -> Vec<Vec<usize>> {
        measurement
            .lines()
            .iter()
            .map(|line| measurement.items()[line.range()].iter().map(|i| i.index).collect())
            .collect()
    }

    #[test]
    fn test_worked_example() {
        let config = FlowConfig::new(300.0)
            .with_column_spacing(10.0)
            .with_line_spacing(15.0);
        let items = vec![
            FixedItem::new(100.0, 40.0),
            FixedItem::new(120.0, 40.0),
            FixedItem::new(100.0, 40.0),
            FixedItem::new(50.0, 40.0),
        ];

        let m = run(&config, &items);

        assert_eq!(lines_of(&m), vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(
            m.assignments(),
            &[
                LineAssignment { line_index: 0, column_in_line: 0 },
                LineAssignment { line_index: 0, column_in_line: 1 },
                LineAssignment { line_index: 1, column_in_line: 0 },
                LineAssignment { line_index: 1, column_in_line: 1 },
            ]
        );
        assert!((m.lines()[0].width - 230.0).abs() < 0.001);
        assert!((m.lines()[1].width - 160.0).abs() < 0.001);
        // 40 + 15 + 40
        assert!((m.required_height() - 95.0).abs() < 0.001);
    }

    #[test]
    fn test_exact_fit_stays_on_line() {
        let config = FlowConfig::new(210.0).with_column_spacing(10.0);
        let items = vec![FixedItem::new(100.0, 20.0), FixedItem::new(100.0, 20.0)];

        let m = run(&config, &items);

        assert_eq!(m.line_count(), 1);
        assert!((m.lines()[0].width - 210.0).abs() < 0.001);
    }

    #[test]
    fn test_one_unit_over_wraps() {
        let config = FlowConfig::new(209.0).with_column_spacing(10.0);
        let items = vec![FixedItem::new(100.0, 20.0), FixedItem::new(100.0, 20.0)];

        let m = run(&config, &items);

        assert_eq!(lines_of(&m), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_line_height_is_tallest_item() {
        let config = FlowConfig::new(500.0).with_line_spacing(5.0);
        let items = vec![
            FixedItem::new(50.0, 20.0),
            FixedItem::new(50.0, 60.0),
            FixedItem::new(50.0, 30.0),
            FixedItem::new(450.0, 10.0),
        ];

        let m = run(&config, &items);

        let heights: Vec<f64> = m.line_heights().collect();
        assert_eq!(heights, vec![60.0, 10.0]);
        // 60 + 5 + 10
        assert!((m.required_height() - 75.0).abs() < 0.001);
    }

    #[test]
    fn test_padding_in_height_and_width() {
        let config = FlowConfig::new(240.0)
            .with_padding(Padding { top: 7.0, right: 20.0, bottom: 3.0, left: 20.0 })
            .with_column_spacing(10.0)
            .with_line_spacing(0.0);
        // content width 200: 100 + 10 + 100 > 200
        let items = vec![FixedItem::new(100.0, 30.0), FixedItem::new(100.0, 30.0)];

        let m = run(&config, &items);

        assert_eq!(m.line_count(), 2);
        assert!((m.required_height() - 70.0).abs() < 0.001);
    }

    #[test]
    fn test_no_visible_items() {
        let config = FlowConfig::new(300.0).with_padding(Padding::symmetric(4.0, 6.0));
        let items = vec![FixedItem::hidden(10.0, 10.0)];

        let m = run(&config, &items);
        assert_eq!(m.line_count(), 0);
        assert!(m.items().is_empty());
        assert!((m.required_height() - 12.0).abs() < 0.001);

        let empty: Vec<FixedItem> = Vec::new();
        let m = run(&config, &empty);
        assert!((m.required_height() - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_hidden_items_are_skipped() {
        let config = FlowConfig::new(300.0).with_column_spacing(10.0);
        let items = vec![
            FixedItem::new(100.0, 40.0),
            FixedItem::hidden(500.0, 400.0),
            FixedItem::new(100.0, 40.0),
        ];

        let m = run(&config, &items);

        assert_eq!(lines_of(&m), vec![vec![0, 2]]);
        assert_eq!(m.assignment_for(1), None);
        assert_eq!(
            m.assignment_for(2),
            Some(LineAssignment { line_index: 0, column_in_line: 1 })
        );
        assert!((m.required_height() - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_oversized_item_gets_own_line() {
        let config = FlowConfig::new(100.0).with_column_spacing(10.0);
        let items = vec![
            FixedItem::new(30.0, 10.0),
            FixedItem::new(250.0, 10.0),
            FixedItem::new(30.0, 10.0),
        ];

        let m = run(&config, &items);

        assert_eq!(lines_of(&m), vec![vec![0], vec![1], vec![2]]);
        assert!((m.lines()[1].width - 250.0).abs() < 0.001);
    }

    #[test]
    fn test_oversized_first_item() {
        let config = FlowConfig::new(100.0).with_column_spacing(10.0);
        let items = vec![FixedItem::new(150.0, 10.0), FixedItem::new(20.0, 10.0)];

        let m = run(&config, &items);

        assert_eq!(lines_of(&m), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_non_positive_content_width() {
        let config = FlowConfig::new(10.0)
            .with_padding(Padding::symmetric(10.0, 0.0))
            .with_column_spacing(0.0);
        let items = vec![
            FixedItem::new(0.0, 5.0),
            FixedItem::new(0.0, 5.0),
            FixedItem::new(0.0, 5.0),
        ];

        let m = run(&config, &items);

        assert_eq!(m.line_count(), 3);
        assert!(m.assignments().iter().all(|a| a.column_in_line == 0));
    }

    #[test]
    fn test_items_measured_with_content_width() {
        use std::cell::Cell;

        struct WidthRecorder {
            seen: Cell<Option<f64>>,
        }

        impl FlowItem for WidthRecorder {
            fn measure(&self, max_width: f64) -> Size {
                self.seen.set(Some(max_width));
                Size::new(10.0, 10.0)
            }
        }

        let config = FlowConfig::new(200.0).with_padding(Padding::symmetric(25.0, 0.0));
        let recorder = WidthRecorder { seen: Cell::new(None) };
        run_recorder(&config, &recorder);
        assert_eq!(recorder.seen.get(), Some(150.0));

        let narrow = FlowConfig::new(20.0).with_padding(Padding::symmetric(25.0, 0.0));
        run_recorder(&narrow, &recorder);
        assert_eq!(recorder.seen.get(), Some(0.0));

        fn run_recorder(config: &FlowConfig, recorder: &WidthRecorder) {
            MeasurementPass::new(config).unwrap().run(&[recorder]).unwrap();
        }
    }

    #[test]
    fn test_invalid_item_size() {
        let config = FlowConfig::new(100.0);
        let items = vec![FixedItem::new(10.0, 10.0), FixedItem::new(f64::NAN, 10.0)];

        let err = MeasurementPass::new(&config).unwrap().run(&items).unwrap_err();
        assert!(matches!(err, FlowError::InvalidItemSize { index: 1, .. }));

        let items = vec![FixedItem::new(10.0, -1.0)];
        let err = MeasurementPass::new(&config).unwrap().run(&items).unwrap_err();
        assert!(matches!(err, FlowError::InvalidItemSize { index: 0, .. }));
    }

    #[test]
    fn test_zero_content_width() {
        let config = FlowConfig::new(20.0)
            .with_padding(Padding::symmetric(10.0, 0.0))
            .with_column_spacing(0.0);
        let items = vec![
            FixedItem::new(0.0, 5.0),
            FixedItem::new(0.0, 5.0),
            FixedItem::new(0.0, 5.0),
        ];

        let m = run(&config, &items);

        assert!((config.content_width() - 0.0).abs() < 0.001);
        assert_eq!(lines_of(&m), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_pack_rejects_invalid_sizes() {
        let config = FlowConfig::new(100.0);
        let pass = MeasurementPass::new(&config).unwrap();

        let err = pass
            .pack(vec![
                MeasuredItem::new(0, Size::new(f64::NAN, 10.0)),
                MeasuredItem::new(1, Size::new(10.0, 10.0)),
            ])
            .unwrap_err();
        assert!(matches!(err, FlowError::InvalidItemSize { index: 0, .. }));

        let err = pass
            .pack(vec![
                MeasuredItem::new(0, Size::new(10.0, 10.0)),
                MeasuredItem::new(1, Size::new(-50.0, -5.0)),
            ])
            .unwrap_err();
        assert!(matches!(err, FlowError::InvalidItemSize { index: 1, .. }));
    }

    #[test]
    fn test_pack_rejects_unordered_indices() {
        let config = FlowConfig::new(300.0);
        let pass = MeasurementPass::new(&config).unwrap();
        let size = Size::new(20.0, 10.0);

        let err = pass
            .pack(vec![
                MeasuredItem::new(5, size),
                MeasuredItem::new(1, size),
                MeasuredItem::new(3, size),
            ])
            .unwrap_err();
        assert!(matches!(err, FlowError::UnorderedItems { index: 1, previous: 5 }));

        let err = pass
            .pack(vec![MeasuredItem::new(2, size), MeasuredItem::new(2, size)])
            .unwrap_err();
        assert!(matches!(err, FlowError::UnorderedItems { index: 2, previous: 2 }));

        let m = pass
            .pack(vec![MeasuredItem::new(1, size), MeasuredItem::new(4, size)])
            .unwrap();
        assert_eq!(
            m.assignment_for(4),
            Some(LineAssignment { line_index: 0, column_in_line: 1 })
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = FlowConfig::new(100.0).with_line_spacing(f64::NAN);
        assert!(MeasurementPass::new(&config).is_err());
    }
}
