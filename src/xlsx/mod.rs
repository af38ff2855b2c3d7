pub mod sheet;
pub mod writer;

pub use sheet::{Cell, CellRef, CellStyle, SheetBuffer};
pub use writer::write_plan_workbook;
