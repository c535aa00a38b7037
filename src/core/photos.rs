//! Photo assets kept in the cache directory.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::error::{AppError, Result, ResultExt};
use crate::utils;

/// Served when the stored extension does not identify an image type.
pub const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

/// Writes uploaded photos into a cache directory and reads them back.
#[derive(Clone, Debug)]
pub struct PhotoStore {
    cache_dir: PathBuf,
}

/// An opened photo, ready to be streamed.
#[derive(Debug)]
pub struct PhotoAsset {
    /// File contents.
    pub stream: ReaderStream<File>,
    /// Content type to serve the bytes under.
    pub content_type: String,
    /// Size on disk in bytes.
    pub len: u64,
}

impl PhotoStore {
    /// Creates a store rooted at `cache_dir`. Call [`PhotoStore::ensure_dir`]
    /// before the first write.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// The directory assets are written to.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Creates the cache directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        utils::ensure_dir_exists(&self.cache_dir)
            .await
            .with_context(|| format!("creating cache directory {}", self.cache_dir.display()))
    }

    /// Writes `bytes` under a freshly generated name and returns that name.
    ///
    /// `field` is the form field the upload came from and prefixes the name;
    /// the extension of `original_name` is preserved.
    pub async fn store(&self, field: &str, original_name: Option<&str>, bytes: &[u8]) -> Result<String> {
        let filename = utils::generate_filename(field, original_name);
        let path = self.cache_dir.join(&filename);

        let mut file = File::create(&path).await.map_err(|e| {
            log::error!("Failed to create {}: {}", path.display(), e);
            AppError::Io(e)
        })?;
        file.write_all(bytes).await?;
        file.flush().await?;

        log::debug!("Stored {} bytes as {}", bytes.len(), filename);
        Ok(filename)
    }

    /// Opens a stored asset for streaming.
    pub async fn open(&self, filename: &str) -> Result<PhotoAsset> {
        let path = self.path_for(filename)?;
        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!("photo file {}", filename)));
            }
            Err(e) => return Err(AppError::Io(e)),
        };
        let len = file.metadata().await?.len();

        Ok(PhotoAsset {
            stream: ReaderStream::new(file),
            content_type: content_type_for(filename),
            len,
        })
    }

    /// Deletes a stored asset. A file that is already gone is not an error.
    pub async fn remove(&self, filename: &str) -> Result<()> {
        let path = self.path_for(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                log::info!("Removed orphaned photo {}", filename);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Absolute location of an asset. Names that are not a single plain
    /// file name are treated as missing.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf> {
        if !utils::is_plain_file_name(filename) {
            return Err(AppError::NotFound(format!("photo file {}", filename)));
        }
        Ok(self.cache_dir.join(filename))
    }
}

/// Content type guessed from the file extension, restricted to images.
pub fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}
