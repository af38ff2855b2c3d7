//! The wide weekly grid: one row per (sport, training group), one column per
//! day/half-day slot.

use std::collections::BTreeMap;

use log::warn;

use crate::merge::{MergedCell, TRAINING_CAMP_MARKER};
use crate::model::Slot;

/// Placeholder for empty cells. A single space, not an empty string, so the
/// written cell keeps its formatting downstream.
pub const BLANK_CELL: &str = " ";

/// One grid row: the key pair plus exactly [`Slot::COUNT`] cell strings.
#[derive(Debug, Clone)]
pub struct PivotRow {
    pub sport: String,
    pub training_group: String,
    pub cells: Vec<String>,
}

impl PivotRow {
    fn blank(sport: String, training_group: String) -> PivotRow {
        PivotRow {
            sport,
            training_group,
            cells: vec![BLANK_CELL.to_string(); Slot::COUNT],
        }
    }
}

/// The pivoted week, rows sorted by (sport, training group).
///
/// Only columns are guaranteed: pairs absent from the input have no row.
#[derive(Debug, Clone, Default)]
pub struct PivotGrid {
    pub rows: Vec<PivotRow>,
}

impl PivotGrid {
    /// Build the grid from merged cells. Duplicate (row, slot) pairs keep the
    /// first value and log a data-quality warning.
    pub fn build(cells: Vec<MergedCell>) -> PivotGrid {
        let mut rows: BTreeMap<(String, String), PivotRow> = BTreeMap::new();

        for cell in cells {
            let key = (cell.sport.clone(), cell.training_group.clone());
            let row = rows
                .entry(key)
                .or_insert_with(|| PivotRow::blank(cell.sport, cell.training_group));

            let idx = cell.slot.index();
            if row.cells[idx] != BLANK_CELL {
                warn!(
                    "duplicate cell for {} / {} at {}; keeping the first value",
                    row.sport,
                    row.training_group,
                    cell.slot.label()
                );
                continue;
            }
            row.cells[idx] = cell.value;
        }

        PivotGrid {
            rows: rows.into_values().collect(),
        }
    }

    /// The single row for a (sport, training group) pair, if present.
    pub fn row(&self, sport: &str, training_group: &str) -> Option<&PivotRow> {
        self.rows
            .iter()
            .find(|r| r.sport == sport && r.training_group == training_group)
    }

    /// All rows of one sport, in grid order.
    pub fn rows_for_sport(&self, sport: &str) -> Vec<&PivotRow> {
        self.rows.iter().filter(|r| r.sport == sport).collect()
    }

    /// Spread the training-camp marker across whole days.
    ///
    /// A camp day blocks out both half-days: if either the AM or PM cell of a
    /// day carries the marker, both cells are rewritten to start with it,
    /// followed by whatever other lines they already had.
    pub fn propagate_training_camp(&mut self) {
        for row in &mut self.rows {
            for day in 0..7 {
                let am = day * 2;
                let pm = am + 1;
                let marked = contains_marker(&row.cells[am]) || contains_marker(&row.cells[pm]);
                if marked {
                    row.cells[am] = prepend_marker(&row.cells[am]);
                    row.cells[pm] = prepend_marker(&row.cells[pm]);
                }
            }
        }
    }
}

fn contains_marker(value: &str) -> bool {
    value.to_uppercase().contains(TRAINING_CAMP_MARKER)
}

fn prepend_marker(value: &str) -> String {
    let rest: Vec<&str> = value
        .trim()
        .lines()
        .filter(|line| !line.trim().eq_ignore_ascii_case(TRAINING_CAMP_MARKER))
        .collect();

    if rest.is_empty() {
        TRAINING_CAMP_MARKER.to_string()
    } else {
        format!("{}\n{}", TRAINING_CAMP_MARKER, rest.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(sport: &str, group: &str, slot: usize, value: &str) -> MergedCell {
        MergedCell {
            sport: sport.to_string(),
            training_group: group.to_string(),
            slot: Slot::ALL[slot],
            value: value.to_string(),
        }
    }

    #[test]
    fn test_grid_always_has_all_slot_columns() {
        let grid = PivotGrid::build(vec![cell("Fencing", "Fencing", 3, "Hall\n09:00-10:00")]);
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].cells.len(), Slot::COUNT);
        assert_eq!(grid.rows[0].cells[3], "Hall\n09:00-10:00");
        // every other slot holds the single-space placeholder
        for (idx, value) in grid.rows[0].cells.iter().enumerate() {
            if idx != 3 {
                assert_eq!(value, BLANK_CELL);
            }
        }
    }

    #[test]
    fn test_absent_pairs_have_no_row() {
        let grid = PivotGrid::build(vec![cell("Fencing", "Fencing", 0, "x")]);
        assert!(grid.row("Squash", "Squash").is_none());
    }

    #[test]
    fn test_rows_sorted_by_key() {
        let grid = PivotGrid::build(vec![
            cell("Squash", "Squash", 0, "a"),
            cell("Fencing", "Fencing", 0, "b"),
            cell("Fencing", "Epee", 0, "c"),
        ]);
        let keys: Vec<(&str, &str)> = grid
            .rows
            .iter()
            .map(|r| (r.sport.as_str(), r.training_group.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("Fencing", "Epee"), ("Fencing", "Fencing"), ("Squash", "Squash")]
        );
    }

    #[test]
    fn test_duplicate_cells_are_first_wins() {
        let grid = PivotGrid::build(vec![
            cell("Fencing", "Fencing", 0, "first"),
            cell("Fencing", "Fencing", 0, "second"),
        ]);
        assert_eq!(grid.rows[0].cells[0], "first");
    }

    #[test]
    fn test_camp_propagates_across_the_day() {
        let mut grid = PivotGrid::build(vec![
            cell("Fencing", "Fencing", 0, TRAINING_CAMP_MARKER),
            cell("Fencing", "Fencing", 1, "Pool\n09:00-10:00"),
        ]);
        grid.propagate_training_camp();

        let row = grid.row("Fencing", "Fencing").unwrap();
        assert_eq!(row.cells[0], "TRAINING CAMP");
        assert_eq!(row.cells[1], "TRAINING CAMP\nPool\n09:00-10:00");
    }

    #[test]
    fn test_camp_fills_blank_opposite_half() {
        let mut grid = PivotGrid::build(vec![cell("Fencing", "Fencing", 2, TRAINING_CAMP_MARKER)]);
        grid.propagate_training_camp();

        let row = grid.row("Fencing", "Fencing").unwrap();
        assert_eq!(row.cells[2], "TRAINING CAMP");
        assert_eq!(row.cells[3], "TRAINING CAMP");
        // other days untouched
        assert_eq!(row.cells[0], BLANK_CELL);
    }
}
