//! Blob store for uploaded images: filename rules plus a disk-backed
//! implementation serving files under `/images/<name>`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;

/// Largest single file accepted for upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Most files accepted in one upload batch.
pub const MAX_FILES_PER_UPLOAD: usize = 5;
/// Public mount point where stored images are served back.
pub const PUBLIC_PREFIX: &str = "/images";

lazy_static! {
    static ref IMAGE_EXT: Regex = Regex::new(r"\.(jpg|jpeg|png|gif)$").expect("valid regex");
}

/// Filename filter for uploads. Case-sensitive on purpose: the filter only
/// admits lowercase image extensions.
pub fn is_image_filename(name: &str) -> bool {
    IMAGE_EXT.is_match(name)
}

/// Unique stored name: millisecond timestamp plus a random suffix, with the
/// original extension preserved.
pub fn generated_name(original: &str) -> String {
    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{millis}-{suffix}{ext}")
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `body` under `name`, returning the public path it is served at.
    async fn put(&self, name: &str, body: Bytes) -> anyhow::Result<String>;
}

pub struct DiskBlobStore {
    dir: PathBuf,
}

impl DiskBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl BlobStore for DiskBlobStore {
    async fn put(&self, name: &str, body: Bytes) -> anyhow::Result<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .context("create upload dir")?;
        let path = self.dir.join(name);
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }
}
