mod file;
#[cfg(test)]
mod memory;

use std::path;
use std::sync::Arc;

pub use file::FileStore;
#[cfg(test)]
pub use memory::MemoryStore;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::StorageBox;

pub struct StorageManager {}

impl StorageManager {
    pub fn get() -> StorageBox {
        let data_dir = path::PathBuf::from(Config::get(ConfigKey::DataDir));
        return Arc::new(FileStore::new(data_dir));
    }
}
