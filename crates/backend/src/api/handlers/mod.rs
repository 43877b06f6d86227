// UseCase handlers
pub mod u501_import_from_csv;
