use thiserror::Error;

/// Ошибки, прерывающие обработку всего файла
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is empty")]
    EmptyInput,

    #[error("file has no header line")]
    NoHeader,

    #[error("no valid records found in file")]
    NoValidRecords,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ошибки отдельной строки: строка пропускается, обработка продолжается
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("line {line} is malformed: expected {expected} fields, got {actual}")]
    Malformed {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("missing required field '{field}' in line {line}")]
    RequiredFieldMissing { line: u64, field: &'static str },

    #[error("invalid {field} format in line {line}: '{value}'")]
    RequiredFieldParse {
        line: u64,
        field: &'static str,
        value: String,
    },
}
