mod file_store;

pub use file_store::{FILE_STORE_CAPACITY_BYTES, FileStore, FileStoreError};
