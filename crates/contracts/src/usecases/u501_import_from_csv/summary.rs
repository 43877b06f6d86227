/// Итог обработки одного загруженного файла
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub file_name: String,
    pub size_bytes: usize,
    pub accepted: usize,
    pub skipped: usize,
}
