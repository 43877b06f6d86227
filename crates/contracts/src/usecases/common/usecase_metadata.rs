/// Метаданные UseCase для идентификации в логах
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u501")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "import_from_csv")
    fn usecase_name() -> &'static str;

    /// Отображаемое имя для логов
    fn display_name() -> &'static str;

    /// Полное имя вида "u501_import_from_csv"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
