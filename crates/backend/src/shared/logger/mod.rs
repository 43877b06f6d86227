/// Диагностический журнал сервера.
///
/// События пишутся через `tracing` с источником "server" и категорией,
/// так что их можно отфильтровать в общем логе.
///
/// # Примеры
/// ```
/// backend::shared::logger::log("startup", "Сервер запущен");
/// backend::shared::logger::warn("import", "Line 3 is malformed, skipping");
/// ```
pub fn log(category: &str, message: &str) {
    tracing::info!(source = "server", category, "{}", message);
}

pub fn warn(category: &str, message: &str) {
    tracing::warn!(source = "server", category, "{}", message);
}
