use std::io::{Read, Seek, SeekFrom, Write};

use bytes::Bytes;
use contracts::domain::a001_product_record::ProductRecord;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_from_csv::{ImportFromCsv, ImportSummary};
use tempfile::NamedTempFile;

use crate::domain::a001_product_record::{parse_products, ImportError};
use crate::shared::logger;

/// Файл, полученный из multipart формы
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content: Bytes,
}

/// Обрабатывает загруженный файл: сохраняет во временный файл, читает и разбирает.
///
/// Временный файл удаляется при выходе из функции на любом пути, включая ошибки.
pub fn process_file(upload: &UploadedFile) -> Result<Vec<ProductRecord>, ImportError> {
    logger::log(
        "import",
        &format!(
            "{} ({}): starting to process file {} ({} bytes)",
            ImportFromCsv::display_name(),
            ImportFromCsv::full_name(),
            upload.file_name,
            upload.content.len()
        ),
    );

    let mut staged = stage(&upload.content)?;
    tracing::debug!("File staged at: {}", staged.path().display());

    let content = read_staged(&mut staged)?;
    let outcome = parse_products(&content)?;

    let summary = ImportSummary {
        file_name: upload.file_name.clone(),
        size_bytes: upload.content.len(),
        accepted: outcome.records.len(),
        skipped: outcome.skipped,
    };
    logger::log(
        "import",
        &format!(
            "Successfully processed {} records from {} ({} bytes, {} skipped)",
            summary.accepted, summary.file_name, summary.size_bytes, summary.skipped
        ),
    );

    Ok(outcome.records)
}

/// Сохраняет содержимое во временный файл. Имя файла от клиента не используется.
fn stage(content: &[u8]) -> Result<NamedTempFile, ImportError> {
    let mut file = tempfile::Builder::new()
        .prefix("csv-upload-")
        .suffix(".csv")
        .tempfile()?;
    file.write_all(content)?;
    file.flush()?;
    Ok(file)
}

fn read_staged(staged: &mut NamedTempFile) -> Result<String, ImportError> {
    let file = staged.as_file_mut();
    file.seek(SeekFrom::Start(0))?;

    let mut raw = Vec::new();
    file.read_to_end(&mut raw)?;
    if raw.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    Ok(String::from_utf8_lossy(&raw).into_owned())
}
