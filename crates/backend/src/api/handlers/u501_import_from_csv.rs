use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::domain::a001_product_record::{ImportError, TableFormatter};
use crate::shared::{config, logger};
use crate::usecases::u501_import_from_csv::{process_file, UploadedFile};

/// Ошибки обработки запроса на загрузку
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Error parsing form data: {0}")]
    Form(String),

    #[error("Upload exceeds the configured size limit")]
    TooLarge,

    #[error("Error retrieving file")]
    MissingFile,

    #[error("Error processing file: {0}")]
    Import(#[from] ImportError),
}

impl UploadError {
    fn status(&self) -> StatusCode {
        match self {
            UploadError::Form(_) | UploadError::MissingFile => StatusCode::BAD_REQUEST,
            UploadError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::Import(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        tracing::error!("Upload failed: {}", self);
        (self.status(), self.to_string()).into_response()
    }
}

/// POST /leitura/teste
///
/// Принимает multipart форму с CSV файлом и возвращает таблицу товаров текстом.
pub async fn upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, UploadError> {
    logger::log("http", "Received request to process CSV file");

    let mut multipart = multipart.map_err(|e| UploadError::Form(e.body_text()))?;
    let field_name = &config::get().upload.field_name;

    let upload = read_upload(&mut multipart, field_name).await?;
    logger::log(
        "http",
        &format!(
            "Received file: {}, size: {} bytes",
            upload.file_name,
            upload.content.len()
        ),
    );

    let records = process_file(&upload)?;
    let table = TableFormatter::new().format_as_table(&records);

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        table,
    )
        .into_response())
}

/// Берет первое поле формы с нужным именем, остальные поля пропускает
async fn read_upload(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<UploadedFile, UploadError> {
    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let content = field.bytes().await.map_err(form_error)?;
        return Ok(UploadedFile { file_name, content });
    }

    Err(UploadError::MissingFile)
}

fn form_error(e: axum::extract::multipart::MultipartError) -> UploadError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge
    } else {
        UploadError::Form(e.body_text())
    }
}
