use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Report table error: {0}")]
    Report(String),

    #[error("Report is missing expected column: {0}")]
    MissingColumn(String),

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, PlanError>;
