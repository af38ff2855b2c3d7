//! The venue usage workbook: one heading and table per venue.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Datelike, Weekday};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use crate::error::Result;
use crate::model::{day_name, format_time, Session, Week};

/// Venues rendered per printed page.
pub const VENUES_PER_PAGE: usize = 5;

const HEADER_FILL: u32 = 0xADD8E6;
const SHADED_DAY_FILL: u32 = 0xD3D3D3;

const COLUMNS: [(&str, f64); 5] = [
    ("Date", 24.0),
    ("Time", 16.0),
    ("Session Type", 18.0),
    ("Training Group", 26.0),
    ("Sport", 18.0),
];

/// Group sessions by venue (venues sorted by name), each venue's rows sorted
/// by date then start time with missing starts last.
pub fn venue_groups(sessions: &[Session]) -> Vec<(String, Vec<&Session>)> {
    let mut by_venue: BTreeMap<String, Vec<&Session>> = BTreeMap::new();
    for session in sessions {
        if session.venue.is_empty() {
            continue;
        }
        by_venue.entry(session.venue.clone()).or_default().push(session);
    }

    let mut groups: Vec<(String, Vec<&Session>)> = by_venue.into_iter().collect();
    for (_, rows) in &mut groups {
        rows.sort_by(|a, b| {
            a.date.cmp(&b.date).then_with(|| match (a.start, b.start) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
        });
    }
    groups
}

/// Alternating day shading, Sunday shaded first.
fn is_shaded(day: Weekday) -> bool {
    day.num_days_from_sunday() % 2 == 0
}

/// Write the venue usage report: landscape pages, five venues per page,
/// day-shaded rows.
pub fn write_venue_workbook(sessions: &[Session], week: &Week, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Venue Usage")?;
    worksheet.set_landscape();

    for (col, (_, width)) in COLUMNS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let title = Format::new().set_bold().set_font_size(14);
    let subtitle = Format::new();
    let venue_heading = Format::new().set_bold().set_font_size(12);
    let header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_background_color(HEADER_FILL)
        .set_border(FormatBorder::Thin);
    let shaded = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_background_color(SHADED_DAY_FILL)
        .set_border(FormatBorder::Thin);
    let unshaded = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    worksheet.write_string_with_format(0, 0, "Venue Usage Report", &title)?;
    worksheet.write_string_with_format(
        1,
        0,
        &format!("Week Beginning: {}", week.start().format("%d %b %Y")),
        &subtitle,
    )?;

    let groups = venue_groups(sessions);
    let mut row: u32 = 2;
    let mut page_breaks: Vec<u32> = Vec::new();

    for (chunk_idx, chunk) in groups.chunks(VENUES_PER_PAGE).enumerate() {
        if chunk_idx > 0 {
            page_breaks.push(row);
        }

        for (venue, venue_sessions) in chunk {
            row += 1;
            worksheet.write_string_with_format(row, 0, venue, &venue_heading)?;
            row += 1;

            for (col, (name, _)) in COLUMNS.iter().enumerate() {
                worksheet.write_string_with_format(row, col as u16, *name, &header)?;
            }
            row += 1;

            for session in venue_sessions {
                let format = if is_shaded(session.date.weekday()) {
                    &shaded
                } else {
                    &unshaded
                };

                let date = format!(
                    "{} {}",
                    day_name(session.date.weekday()),
                    session.date.format("%d %b %Y")
                );
                let time = format!(
                    "{} - {}",
                    format_time(session.start),
                    format_time(session.finish)
                );

                worksheet.write_string_with_format(row, 0, &date, format)?;
                worksheet.write_string_with_format(row, 1, &time, format)?;
                worksheet.write_string_with_format(row, 2, &session.session_type, format)?;
                worksheet.write_string_with_format(row, 3, &session.training_group, format)?;
                worksheet.write_string_with_format(row, 4, &session.sport, format)?;
                row += 1;
            }
        }
    }

    if !page_breaks.is_empty() {
        worksheet.set_page_breaks(&page_breaks)?;
    }

    workbook.save(path)?;
    Ok(())
}
