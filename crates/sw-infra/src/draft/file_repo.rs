//! File-based draft repository
//!
//! Persists the wizard draft as pretty JSON in a single file. Writes go to
//! a sibling temp file first and are renamed into place.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use sw_core::config::DEFAULT_DRAFT_FILE;
use sw_core::ports::DraftRepositoryPort;
use sw_core::wizard::WizardSnapshot;

pub struct FileDraftRepository {
    draft_file_path: PathBuf,
}

impl FileDraftRepository {
    /// Create repository with custom file path
    pub fn new(draft_file_path: PathBuf) -> Self {
        Self { draft_file_path }
    }

    /// Create repository with base dir and filename
    pub fn with_base_dir(base_dir: PathBuf, filename: impl Into<String>) -> Self {
        Self {
            draft_file_path: base_dir.join(filename.into()),
        }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            draft_file_path: base_dir.join(DEFAULT_DRAFT_FILE),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.draft_file_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .draft_file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.draft_file_path.with_file_name(name)
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.draft_file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DraftRepositoryPort for FileDraftRepository {
    async fn load_draft(&self) -> anyhow::Result<Option<WizardSnapshot>> {
        if !fs::try_exists(&self.draft_file_path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.draft_file_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let snapshot = WizardSnapshot::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse wizard draft: {e}"))?;

        Ok(Some(snapshot))
    }

    async fn save_draft(&self, snapshot: &WizardSnapshot) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = snapshot
            .to_json()
            .map_err(|e| anyhow::anyhow!("Failed to serialize wizard draft: {e}"))?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create draft file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write draft file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync draft file: {e}"))?;
        drop(file);

        fs::rename(&temp_path, &self.draft_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to replace draft file: {e}"))?;

        debug!(path = %self.draft_file_path.display(), "wizard draft written");
        Ok(())
    }

    async fn clear_draft(&self) -> anyhow::Result<()> {
        if fs::try_exists(&self.draft_file_path).await? {
            fs::remove_file(&self.draft_file_path).await?;
        }
        Ok(())
    }
}
