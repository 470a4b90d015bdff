// src/attr_row.rs

//! Per-row attribute storage for a screen buffer.
//!
//! A row of terminal cells is usually styled uniformly, so the attributes of
//! one row compress extremely well: [`AttrRow`] keeps them in an
//! [`RleVec`] with inline capacity 1, meaning the common single-run row
//! lives entirely on the stack. All range semantics (splitting, coalescing,
//! length bookkeeping) are inherited from the container; this type only
//! speaks in columns and attributes.

use log::trace;

use crate::attr::TextAttribute;
use crate::error::RleError;
use crate::rle::iter::RleIter;
use crate::rle::RleVec;
use crate::run::Run;

/// The attributes of one row of screen buffer cells, indexed by column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrRow {
    data: RleVec<TextAttribute, u32, 1>,
}

impl AttrRow {
    /// Creates a row of `width` columns, all carrying `attr`.
    pub fn new(width: u32, attr: TextAttribute) -> Self {
        trace!("creating AttrRow: width {}", width);
        Self {
            data: RleVec::filled(width, attr),
        }
    }

    /// The row width in columns.
    pub fn width(&self) -> u32 {
        self.data.len()
    }

    /// Whether the row has zero columns.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The attribute at `column`.
    ///
    /// # Errors
    /// [`RleError::OutOfRange`] when `column >= self.width()`.
    pub fn attr_at(&self, column: u32) -> Result<TextAttribute, RleError> {
        self.data.at(column).copied()
    }

    /// Applies `attr` from `start` through the end of the row.
    ///
    /// Returns whether the row content changed, so callers can skip redraws
    /// of untouched rows.
    ///
    /// # Errors
    /// [`RleError::OutOfRange`] when `start > self.width()`.
    pub fn set_attr_to_end(&mut self, start: u32, attr: TextAttribute) -> Result<bool, RleError> {
        let changed = self.tail_differs(start, attr);
        self.data.replace(start, self.data.len(), attr)?;
        Ok(changed)
    }

    /// Applies `attr` to the half-open column range `[begin, end)`.
    ///
    /// `end` is clamped to the row width.
    ///
    /// # Errors
    /// [`RleError::OutOfRange`] when `begin > end` after clamping.
    pub fn replace(&mut self, begin: u32, end: u32, attr: TextAttribute) -> Result<(), RleError> {
        self.data.replace(begin, end, attr)
    }

    /// Rewrites every cell carrying `old_attr` to `new_attr`.
    pub fn replace_attrs(&mut self, old_attr: TextAttribute, new_attr: TextAttribute) {
        self.data.replace_values(old_attr, new_attr);
    }

    /// Resizes the row to `new_width` columns. Growth replicates the last
    /// column's attribute; shrinking truncates on the right.
    ///
    /// # Errors
    /// [`RleError::EmptyExtend`] when growing a zero-width row.
    pub fn resize(&mut self, new_width: u32) -> Result<(), RleError> {
        trace!("resizing AttrRow: {} -> {}", self.data.len(), new_width);
        self.data.resize_trailing_extent(new_width)
    }

    /// Refills the whole row with `attr`, keeping the width.
    pub fn reset(&mut self, attr: TextAttribute) {
        self.data = RleVec::filled(self.data.len(), attr);
    }

    /// The hyperlink ids present in the row, deduplicated in order of first
    /// appearance.
    pub fn hyperlinks(&self) -> Vec<u16> {
        let mut ids = Vec::new();
        for run in self.data.runs() {
            let id = run.value.hyperlink_id();
            if id != 0 && !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Per-column iteration over the row's attributes.
    pub fn iter(&self) -> RleIter<'_, TextAttribute, u32> {
        self.data.iter()
    }

    /// The underlying runs, for renderers that batch by styled span.
    pub fn runs(&self) -> &[Run<TextAttribute, u32>] {
        self.data.runs()
    }

    /// Whether any column in `[start, width)` differs from `attr`.
    fn tail_differs(&self, start: u32, attr: TextAttribute) -> bool {
        let mut covered: u32 = 0;
        for run in self.data.runs() {
            let run_end = covered + run.length;
            if run_end > start && run.value != attr {
                return true;
            }
            covered = run_end;
        }
        false
    }
}

impl<'a> IntoIterator for &'a AttrRow {
    type Item = &'a TextAttribute;
    type IntoIter = RleIter<'a, TextAttribute, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{AttrFlags, Color};

    fn attr(index: u8) -> TextAttribute {
        TextAttribute::new(Color::Indexed(index), Color::Default)
    }

    #[test]
    fn new_row_is_uniform() {
        let row = AttrRow::new(80, attr(7));
        assert_eq!(row.width(), 80);
        assert_eq!(row.runs().len(), 1);
        assert_eq!(row.attr_at(0).unwrap(), attr(7));
        assert_eq!(row.attr_at(79).unwrap(), attr(7));
        assert!(row.attr_at(80).is_err());
    }

    #[test]
    fn replace_splits_and_recoalesces() {
        let mut row = AttrRow::new(10, attr(0));
        row.replace(3, 6, attr(1)).unwrap();
        assert_eq!(row.runs().len(), 3);
        assert_eq!(row.attr_at(3).unwrap(), attr(1));
        assert_eq!(row.attr_at(6).unwrap(), attr(0));

        // Painting the hole back over restores the single run.
        row.replace(3, 6, attr(0)).unwrap();
        assert_eq!(row.runs().len(), 1);
        assert_eq!(row.width(), 10);
    }

    #[test]
    fn set_attr_to_end_reports_changes() {
        let mut row = AttrRow::new(8, attr(0));
        assert!(row.set_attr_to_end(5, attr(2)).unwrap());
        assert_eq!(row.attr_at(4).unwrap(), attr(0));
        assert_eq!(row.attr_at(5).unwrap(), attr(2));
        assert_eq!(row.attr_at(7).unwrap(), attr(2));

        // Repainting the same tail is a no-change.
        assert!(!row.set_attr_to_end(5, attr(2)).unwrap());
        // Painting from column 0 changes the head.
        assert!(row.set_attr_to_end(0, attr(2)).unwrap());
        assert_eq!(row.runs().len(), 1);

        assert!(row.set_attr_to_end(9, attr(3)).is_err());
    }

    #[test]
    fn set_attr_to_end_at_width_is_a_noop() {
        let mut row = AttrRow::new(4, attr(0));
        assert!(!row.set_attr_to_end(4, attr(1)).unwrap());
        assert_eq!(row.width(), 4);
        assert_eq!(row.runs().len(), 1);
    }

    #[test]
    fn replace_attrs_remaps_globally() {
        let mut row = AttrRow::new(6, attr(0));
        row.replace(2, 3, attr(1)).unwrap();
        row.replace(4, 5, attr(1)).unwrap();
        assert_eq!(row.runs().len(), 5);

        row.replace_attrs(attr(1), attr(0));
        assert_eq!(row.runs().len(), 1);
        assert_eq!(row.attr_at(2).unwrap(), attr(0));
    }

    #[test]
    fn resize_grows_with_last_attribute() {
        let mut row = AttrRow::new(4, attr(0));
        row.set_attr_to_end(2, attr(1)).unwrap();

        row.resize(8).unwrap();
        assert_eq!(row.width(), 8);
        assert_eq!(row.attr_at(7).unwrap(), attr(1));

        row.resize(1).unwrap();
        assert_eq!(row.width(), 1);
        assert_eq!(row.attr_at(0).unwrap(), attr(0));

        row.resize(0).unwrap();
        assert!(row.is_empty());
        assert!(row.resize(3).is_err());
    }

    #[test]
    fn reset_refills_at_current_width() {
        let mut row = AttrRow::new(6, attr(0));
        row.replace(1, 5, attr(4)).unwrap();
        row.reset(attr(9));
        assert_eq!(row.width(), 6);
        assert_eq!(row.runs().len(), 1);
        assert_eq!(row.attr_at(3).unwrap(), attr(9));
    }

    #[test]
    fn hyperlinks_dedupes_in_first_appearance_order() {
        let linked = |id: u16| attr(0).with_hyperlink(id);
        let mut row = AttrRow::new(10, attr(0));
        row.replace(1, 3, linked(2)).unwrap();
        row.replace(4, 5, linked(1)).unwrap();
        row.replace(6, 8, linked(2)).unwrap();

        assert_eq!(row.hyperlinks(), vec![2, 1]);

        let plain = AttrRow::new(10, attr(0));
        assert!(plain.hyperlinks().is_empty());
    }

    #[test]
    fn iter_matches_columns() {
        let mut row = AttrRow::new(5, attr(0));
        row.replace(2, 4, attr(1).with_flags(AttrFlags::BOLD)).unwrap();

        let collected: Vec<_> = row.iter().copied().collect();
        assert_eq!(collected.len(), 5);
        for (column, item) in collected.into_iter().enumerate() {
            assert_eq!(item, row.attr_at(column as u32).unwrap());
        }
    }
}
