//! On-disk storage for uploaded files

mod upload_store;

pub use upload_store::UploadStore;
