//! The fixed template map and the engine that writes grid rows into it.
//!
//! The map is a hand-maintained artifact tied to one organization's weekly
//! template; it is data, not a layout system.

use std::fmt;

use log::warn;

use crate::error::Result;
use crate::model::{day_label, Slot, Week};
use crate::pivot::PivotGrid;
use crate::xlsx::sheet::{CellRef, CellStyle, SheetBuffer};

/// One entry of the template map.
#[derive(Debug, Clone, Copy)]
pub enum Placement {
    /// Write the single (sport, training group) grid row at `cell`.
    Group {
        sport: &'static str,
        training_group: &'static str,
        cell: &'static str,
    },
    /// Write every row of `sport` merged per column at `cell`.
    SportConcat {
        sport: &'static str,
        cell: &'static str,
    },
}

/// A placement entry that matched no grid row. Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPlacement {
    pub sport: String,
    pub training_group: Option<String>,
}

impl fmt::Display for MissingPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.training_group {
            Some(group) => write!(f, "{} - {}.", self.sport, group),
            None => write!(f, "No data found for Sport='{}'.", self.sport),
        }
    }
}

/// Template rows (1-based) carrying the seven date labels.
const DATE_HEADER_ROWS: [u32; 3] = [4, 35, 67];

/// Cells carrying the "Week beginning / Week N" summary label.
const WEEK_HEADING_CELLS: [&str; 3] = ["O2", "O33", "O65"];

/// Cells carrying the block banner.
const BANNER_CELLS: [&str; 3] = ["A2", "A33", "A65"];

/// Column C, the first of the 14 slot columns. Each day spans two columns,
/// so date labels step by two.
const FIRST_SLOT_COL: u16 = 2;

/// The weekly template map.
pub fn default_placements() -> &'static [Placement] {
    use Placement::{Group, SportConcat};
    &[
        Group { sport: "Development", training_group: "Development 1", cell: "C6" },
        Group { sport: "Development", training_group: "Development 2", cell: "C8" },
        Group { sport: "Development", training_group: "Development 3", cell: "C10" },
        Group { sport: "Endurance", training_group: "Endurance_Senior", cell: "C12" },
        Group { sport: "Jumps", training_group: "Jumps_Jaco", cell: "C14" },
        Group { sport: "Jumps", training_group: "Jumps_Martin Bercel", cell: "C16" },
        Group { sport: "Jumps", training_group: "Jumps_Ross Jeffs", cell: "C18" },
        Group { sport: "Jumps", training_group: "Jumps_ElWalid", cell: "C20" },
        Group { sport: "Sprints", training_group: "Sprints_Lee", cell: "C22" },
        Group { sport: "Sprints", training_group: "Sprints_Hamdi", cell: "C24" },
        Group { sport: "Throws", training_group: "Senior Performance Throws", cell: "C26" },
        Group { sport: "Squash", training_group: "Squash", cell: "C37" },
        Group { sport: "Table Tennis", training_group: "Table Tennis", cell: "C39" },
        Group { sport: "Fencing", training_group: "Fencing", cell: "C41" },
        Group { sport: "Swimming", training_group: "Swimming", cell: "C43" },
        Group { sport: "Padel", training_group: "Padel", cell: "C45" },
        SportConcat { sport: "Pre Academy Padel", cell: "C47" },
        Group { sport: "Pre Academy Padel", training_group: "Explorers", cell: "C48" },
        Group { sport: "Pre Academy Padel", training_group: "Explorers+", cell: "C49" },
        Group { sport: "Pre Academy Padel", training_group: "Starters", cell: "C50" },
        Group { sport: "Pre Academy", training_group: "Pre Academy Fencing", cell: "C51" },
        Group { sport: "Pre Academy", training_group: "Pre Academy Squash Girls", cell: "C53" },
        Group { sport: "Pre Academy", training_group: "Pre Academy Athletics", cell: "C55" },
        SportConcat { sport: "Girls Programe", cell: "C57" },
        Group { sport: "Girls Programe", training_group: "Kids", cell: "C58" },
        Group { sport: "Girls Programe", training_group: "Mini Cadet_U14", cell: "C59" },
        Group { sport: "Girls Programe", training_group: "Cadet_U16", cell: "C60" },
        Group { sport: "Girls Programe", training_group: "Youth_U18", cell: "C61" },
        Group { sport: "Sprints", training_group: "Sprints_Steve", cell: "C69" },
        Group { sport: "Sprints", training_group: "Sprints_Kurt", cell: "C71" },
        Group { sport: "Sprints", training_group: "Sprints_Rafal", cell: "C73" },
        Group { sport: "Sprints", training_group: "Sprints_Francis", cell: "C75" },
        Group { sport: "Endurance", training_group: "Sprints_Yasmani", cell: "C77" },
        Group { sport: "Endurance", training_group: "Endurance_Driss", cell: "C81" },
        Group { sport: "Endurance", training_group: "Endurance_Kada", cell: "C83" },
        Group { sport: "Endurance", training_group: "Endurance_Khamis", cell: "C85" },
        Group { sport: "Decathlon", training_group: "Decathlon_QAF", cell: "C87" },
        Group { sport: "Jumps", training_group: "Jumps_Linus", cell: "C96" },
        Group { sport: "Jumps", training_group: "Jumps_Pawel", cell: "C98" },
        Group { sport: "Throws", training_group: "Discus_QAF", cell: "C102" },
        Group { sport: "Throws", training_group: "Hammer_QAF", cell: "C104" },
        Group { sport: "Throws", training_group: "Javelin_QAF", cell: "C106" },
    ]
}

/// Write the fixed scaffold: banners, week headings, date labels with AM/PM
/// markers, and a label in column A for every mapped row.
pub fn stamp_template(
    sheet: &mut SheetBuffer,
    week: &Week,
    placements: &[Placement],
) -> Result<()> {
    for cell in BANNER_CELLS {
        sheet.set(CellRef::parse(cell)?, "Weekly Training Plan", CellStyle::Banner);
    }

    for cell in WEEK_HEADING_CELLS {
        sheet.set(CellRef::parse(cell)?, week.heading(), CellStyle::WeekHeading);
    }

    for &header_row in &DATE_HEADER_ROWS {
        let row = header_row - 1;
        for (offset, date) in week.days().enumerate() {
            let col = FIRST_SLOT_COL + offset as u16 * 2;
            sheet.set(CellRef { row, col }, day_label(date), CellStyle::DateHeader);
            sheet.set(CellRef { row: row + 1, col }, "AM", CellStyle::SlotHeader);
            sheet.set(CellRef { row: row + 1, col: col + 1 }, "PM", CellStyle::SlotHeader);
        }
    }

    for placement in placements {
        let (label, cell) = match placement {
            Placement::Group { training_group, cell, .. } => (*training_group, *cell),
            Placement::SportConcat { sport, cell } => (*sport, *cell),
        };
        let at = CellRef::parse(cell)?.at_col(0);
        sheet.set(at, label, CellStyle::Label);
    }

    Ok(())
}

/// Run the map against the grid, writing matched rows into the sheet and
/// returning one notice per entry with no data.
pub fn apply_placements(
    grid: &PivotGrid,
    placements: &[Placement],
    sheet: &mut SheetBuffer,
) -> Result<Vec<MissingPlacement>> {
    let mut missing = Vec::new();

    for placement in placements {
        match placement {
            Placement::Group { sport, training_group, cell } => {
                let at = CellRef::parse(cell)?;
                match grid.row(sport, training_group) {
                    Some(row) => sheet.write_row(at, &row.cells, CellStyle::Session),
                    None => {
                        let notice = MissingPlacement {
                            sport: sport.to_string(),
                            training_group: Some(training_group.to_string()),
                        };
                        warn!("{}", notice);
                        missing.push(notice);
                    }
                }
            }
            Placement::SportConcat { sport, cell } => {
                let at = CellRef::parse(cell)?;
                let rows = grid.rows_for_sport(sport);
                if rows.is_empty() {
                    let notice = MissingPlacement {
                        sport: sport.to_string(),
                        training_group: None,
                    };
                    warn!("{}", notice);
                    missing.push(notice);
                    continue;
                }

                let values: Vec<String> = (0..Slot::COUNT)
                    .map(|idx| {
                        rows.iter()
                            .map(|row| row.cells[idx].as_str())
                            .filter(|value| !value.trim().is_empty())
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .collect();
                sheet.write_row(at, &values, CellStyle::Session);
            }
        }
    }

    Ok(missing)
}
