//! Template cell references and the in-memory sheet the pipeline writes to.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

use crate::error::{PlanError, Result};

lazy_static::lazy_static! {
    static ref CELL_REF: Regex = Regex::new(r"^([A-Za-z]+)([0-9]+)$").unwrap();
}

/// A zero-based (row, column) coordinate, parsed from "C6"-style references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    /// Parse a template reference like "C6" or "AA3".
    pub fn parse(reference: &str) -> Result<CellRef> {
        let captures = CELL_REF
            .captures(reference)
            .ok_or_else(|| PlanError::InvalidCellRef(reference.to_string()))?;

        let mut col: u32 = 0;
        for c in captures[1].chars() {
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > 16_384 {
                return Err(PlanError::InvalidCellRef(reference.to_string()));
            }
        }

        let row: u32 = captures[2]
            .parse()
            .map_err(|_| PlanError::InvalidCellRef(reference.to_string()))?;
        if row == 0 {
            return Err(PlanError::InvalidCellRef(reference.to_string()));
        }

        Ok(CellRef {
            row: row - 1,
            col: (col - 1) as u16,
        })
    }

    pub fn col_offset(self, offset: u16) -> CellRef {
        CellRef {
            row: self.row,
            col: self.col + offset,
        }
    }

    pub fn at_col(self, col: u16) -> CellRef {
        CellRef { row: self.row, col }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = String::new();
        let mut col = self.col as u32 + 1;
        while col > 0 {
            let rem = (col - 1) % 26;
            letters.insert(0, (b'A' + rem as u8) as char);
            col = (col - 1) / 26;
        }
        write!(f, "{}{}", letters, self.row + 1)
    }
}

/// Presentation class of a written cell; the workbook writer maps each to a
/// concrete format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Banner,
    Label,
    DateHeader,
    SlotHeader,
    WeekHeading,
    Session,
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub value: String,
    pub style: CellStyle,
}

/// Sparse in-memory worksheet. Placement and stamping write into it; the
/// xlsx writer flushes it to disk in one pass.
#[derive(Debug, Clone, Default)]
pub struct SheetBuffer {
    cells: BTreeMap<(u32, u16), Cell>,
}

impl SheetBuffer {
    pub fn new() -> SheetBuffer {
        SheetBuffer::default()
    }

    pub fn set(&mut self, at: CellRef, value: impl Into<String>, style: CellStyle) {
        self.cells.insert(
            (at.row, at.col),
            Cell {
                value: value.into(),
                style,
            },
        );
    }

    /// Write values left to right starting at `start`, one column per value.
    pub fn write_row(&mut self, start: CellRef, values: &[String], style: CellStyle) {
        for (offset, value) in values.iter().enumerate() {
            self.set(start.col_offset(offset as u16), value.clone(), style);
        }
    }

    pub fn value(&self, at: CellRef) -> Option<&str> {
        self.cells.get(&(at.row, at.col)).map(|c| c.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &Cell)> + '_ {
        self.cells
            .iter()
            .map(|(&(row, col), cell)| (CellRef { row, col }, cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_refs() {
        assert_eq!(CellRef::parse("A1").unwrap(), CellRef { row: 0, col: 0 });
        assert_eq!(CellRef::parse("C6").unwrap(), CellRef { row: 5, col: 2 });
        assert_eq!(CellRef::parse("O65").unwrap(), CellRef { row: 64, col: 14 });
        assert_eq!(CellRef::parse("AA3").unwrap(), CellRef { row: 2, col: 26 });
        assert_eq!(CellRef::parse("c6").unwrap(), CellRef { row: 5, col: 2 });
    }

    #[test]
    fn test_parse_rejects_malformed_refs() {
        for bad in ["", "C", "6", "6C", "C0", "C-1", "C 6"] {
            assert!(CellRef::parse(bad).is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_display_round_trips() {
        for reference in ["A1", "C6", "O65", "AA3"] {
            assert_eq!(CellRef::parse(reference).unwrap().to_string(), reference);
        }
    }

    #[test]
    fn test_write_row_advances_columns() {
        let mut sheet = SheetBuffer::new();
        let values: Vec<String> = (0..14).map(|i| format!("v{}", i)).collect();
        let start = CellRef::parse("C6").unwrap();
        sheet.write_row(start, &values, CellStyle::Session);

        assert_eq!(sheet.len(), 14);
        for (i, value) in values.iter().enumerate() {
            assert_eq!(sheet.value(start.col_offset(i as u16)), Some(value.as_str()));
        }
        assert_eq!(sheet.value(CellRef::parse("B6").unwrap()), None);
    }
}
