//! Bounded, ordered list of operating-hour rows.

use pinup_core::{OperatingInterval, MAX_OPERATING_HOURS};

use crate::error::HoursError;

/// Stable handle to one editor row. Ids are never reused, so a handle to a
/// removed row stays dead even after new rows are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

#[derive(Debug, Default)]
pub struct OperatingHoursEditor {
    rows: Vec<(RowId, OperatingInterval)>,
    next_id: u64,
}

impl OperatingHoursEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the editor with persisted hours, in order.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::LimitExceeded`] if `intervals` holds more than
    /// [`MAX_OPERATING_HOURS`] entries.
    pub fn with_intervals(intervals: Vec<OperatingInterval>) -> Result<Self, HoursError> {
        if intervals.len() > MAX_OPERATING_HOURS {
            return Err(HoursError::LimitExceeded {
                max: MAX_OPERATING_HOURS,
            });
        }

        let mut editor = Self::new();
        for interval in intervals {
            let id = editor.next_row_id();
            editor.rows.push((id, interval));
        }
        Ok(editor)
    }

    /// Appends a blank row.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::LimitExceeded`] when the editor is already full;
    /// the row list is left untouched.
    pub fn add_interval(&mut self) -> Result<RowId, HoursError> {
        if self.rows.len() >= MAX_OPERATING_HOURS {
            return Err(HoursError::LimitExceeded {
                max: MAX_OPERATING_HOURS,
            });
        }

        let id = self.next_row_id();
        self.rows.push((id, OperatingInterval::default()));
        Ok(id)
    }

    /// Removes `row`. Returns `false` if it was already gone.
    pub fn remove_interval(&mut self, row: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|(id, _)| *id != row);
        self.rows.len() != before
    }

    /// Binds `value` to `row`. Returns `false` if the row no longer exists.
    pub fn set_interval(&mut self, row: RowId, value: OperatingInterval) -> bool {
        match self.rows.iter_mut().find(|(id, _)| *id == row) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Live rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &OperatingInterval)> {
        self.rows.iter().map(|(id, interval)| (*id, interval))
    }

    /// The intervals currently bound to live rows, in order. Incomplete rows
    /// are included as-is.
    #[must_use]
    pub fn snapshot(&self) -> Vec<OperatingInterval> {
        self.rows.iter().map(|(_, interval)| interval.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn next_row_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn interval(days: &str, start: u32, end: u32) -> OperatingInterval {
        OperatingInterval::new(
            days,
            NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
        )
    }

    #[test]
    fn add_beyond_cap_is_rejected_without_mutation() {
        let mut editor = OperatingHoursEditor::new();
        for _ in 0..MAX_OPERATING_HOURS {
            editor.add_interval().unwrap();
        }

        for _ in 0..3 {
            assert_eq!(
                editor.add_interval(),
                Err(HoursError::LimitExceeded { max: 5 })
            );
            assert_eq!(editor.len(), MAX_OPERATING_HOURS);
        }
    }

    #[test]
    fn removing_frees_a_slot() {
        let mut editor = OperatingHoursEditor::new();
        let first = editor.add_interval().unwrap();
        for _ in 1..MAX_OPERATING_HOURS {
            editor.add_interval().unwrap();
        }
        assert!(editor.remove_interval(first));
        assert!(editor.add_interval().is_ok());
        assert_eq!(editor.len(), MAX_OPERATING_HOURS);
    }

    #[test]
    fn snapshot_keeps_relative_order_after_removals() {
        let mut editor = OperatingHoursEditor::new();
        let rows: Vec<RowId> = (0..5).map(|_| editor.add_interval().unwrap()).collect();
        for (i, row) in rows.iter().enumerate() {
            let hour = u32::try_from(i).unwrap();
            assert!(editor.set_interval(*row, interval(&format!("d{i}"), 9 + hour, 18)));
        }

        assert!(editor.remove_interval(rows[1]));
        assert!(editor.remove_interval(rows[3]));

        let days: Vec<String> = editor.snapshot().into_iter().map(|i| i.days).collect();
        assert_eq!(days, vec!["d0", "d2", "d4"]);
    }

    #[test]
    fn removing_twice_is_a_no_op() {
        let mut editor = OperatingHoursEditor::new();
        let a = editor.add_interval().unwrap();
        let b = editor.add_interval().unwrap();
        assert!(editor.remove_interval(a));
        assert!(!editor.remove_interval(a));
        assert_eq!(editor.rows().map(|(id, _)| id).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn stale_row_handles_are_not_reused() {
        let mut editor = OperatingHoursEditor::new();
        let a = editor.add_interval().unwrap();
        editor.remove_interval(a);
        let b = editor.add_interval().unwrap();
        assert_ne!(a, b);
        assert!(!editor.set_interval(a, interval("Mon", 9, 18)));
        assert_eq!(editor.snapshot(), vec![OperatingInterval::default()]);
    }

    #[test]
    fn incomplete_rows_are_snapshotted() {
        let mut editor = OperatingHoursEditor::new();
        let row = editor.add_interval().unwrap();
        editor.set_interval(
            row,
            OperatingInterval {
                days: "Sat".to_string(),
                start_time: NaiveTime::from_hms_opt(11, 0, 0),
                end_time: None,
            },
        );
        let snapshot = editor.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].end_time, None);
    }

    #[test]
    fn with_intervals_enforces_cap() {
        let six = vec![interval("Mon", 9, 18); 6];
        assert!(matches!(
            OperatingHoursEditor::with_intervals(six),
            Err(HoursError::LimitExceeded { max: 5 })
        ));

        let editor = OperatingHoursEditor::with_intervals(vec![interval("Mon", 9, 18)]).unwrap();
        assert_eq!(editor.len(), 1);
    }
}
