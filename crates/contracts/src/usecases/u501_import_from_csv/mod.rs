pub mod summary;

pub use summary::ImportSummary;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportFromCsv;

impl UseCaseMetadata for ImportFromCsv {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_from_csv"
    }

    fn display_name() -> &'static str {
        "Import products from CSV"
    }
}
