use crate::core::Storage;
use crate::utils::error::{GenError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at `base_path`; absolute paths bypass the root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

fn access_error(path: &Path, source: std::io::Error) -> GenError {
    GenError::FileAccessError {
        path: path.display().to_string(),
        source,
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| access_error(&full_path, e))
    }

    /// 先寫入同目錄的暫存檔，成功後再 rename，失敗時不會留下半截檔案
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        let parent = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| access_error(&parent, e))?;

        let mut temp = tempfile::Builder::new()
            .prefix(".tsv2go-")
            .suffix(".tmp")
            .tempfile_in(&parent)
            .map_err(|e| access_error(&parent, e))?;

        temp.write_all(data)
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| access_error(temp.path(), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(|e| access_error(temp.path(), e))?;
        }

        temp.persist(&full_path)
            .map_err(|e| access_error(&full_path, e.error))?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}
