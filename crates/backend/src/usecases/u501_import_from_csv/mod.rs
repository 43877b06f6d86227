pub mod executor;

pub use executor::{process_file, UploadedFile};
