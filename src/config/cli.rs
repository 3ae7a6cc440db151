use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Filesystem storage. Relative paths resolve against `base_path`; an empty base
/// means the current directory.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn file_size(&self, path: &str) -> Result<u64> {
        let full_path = Path::new(&self.base_path).join(path);
        let metadata = tokio::fs::metadata(full_path).await?;
        Ok(metadata.len())
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}
