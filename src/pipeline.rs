//! The end-to-end weekly pipeline as one pure function over the raw table.

use log::info;

use crate::error::Result;
use crate::merge::merge_week;
use crate::model::{Session, Week};
use crate::normalize::{normalize, FilterRules};
use crate::pivot::PivotGrid;
use crate::placement::{apply_placements, default_placements, stamp_template, MissingPlacement, Placement};
use crate::report::RawTable;
use crate::xlsx::sheet::SheetBuffer;

/// One pipeline configuration. The former script variants differ only in
/// their filter rules and placement map, so each is a profile of this struct.
#[derive(Debug, Clone)]
pub struct Profile {
    pub filters: FilterRules,
    pub placements: &'static [Placement],
}

impl Default for Profile {
    fn default() -> Profile {
        Profile {
            filters: FilterRules::default(),
            placements: default_placements(),
        }
    }
}

/// Everything one run produces for a week.
#[derive(Debug)]
pub struct WeekPlan {
    pub sessions: Vec<Session>,
    pub grid: PivotGrid,
    pub sheet: SheetBuffer,
    pub missing: Vec<MissingPlacement>,
}

/// Normalize, merge, pivot and place one week of the raw table.
pub fn build_week_plan(table: &RawTable, week: Week, profile: &Profile) -> Result<WeekPlan> {
    let sessions = normalize(table, week, &profile.filters)?;
    info!(
        "{} sessions in the week of {}",
        sessions.len(),
        week.start()
    );

    let mut grid = PivotGrid::build(merge_week(&sessions));
    grid.propagate_training_camp();

    let mut sheet = SheetBuffer::new();
    stamp_template(&mut sheet, &week, profile.placements)?;
    let missing = apply_placements(&grid, profile.placements, &mut sheet)?;

    Ok(WeekPlan {
        sessions,
        grid,
        sheet,
        missing,
    })
}
