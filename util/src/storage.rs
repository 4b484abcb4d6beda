//! Filesystem layout for reply attachments.
//!
//! Files live under `{STORAGE_ROOT}/{ticket_id}/{filename}`. The database keeps the
//! path relative to the root so the root can move between deployments.

use std::io;
use std::path::PathBuf;

/// Handle to the attachment directory tree.
#[derive(Debug, Clone)]
pub struct AttachmentStore {
    root: PathBuf,
}

impl AttachmentStore {
    /// Creates a store rooted at `root`.
    /// If relative, it is resolved against the current directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(root)
        };
        Self { root }
    }

    /// Folder holding every attachment of one ticket: {root}/{ticket_id}
    pub fn ticket_dir(&self, ticket_id: i64) -> PathBuf {
        self.root.join(ticket_id.to_string())
    }

    /// Path relative to the root, as stored in the database.
    pub fn relative_path(ticket_id: i64, filename: &str) -> String {
        format!("{ticket_id}/{filename}")
    }

    /// Absolute location of a stored relative path.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Creates the root directory if it does not exist yet.
    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Writes `bytes` to `{root}/{ticket_id}/{filename}` and returns the relative path.
    ///
    /// An existing file with the same name in the same ticket is overwritten.
    /// `filename` must already be sanitized with [`sanitize_filename`].
    pub async fn save(&self, ticket_id: i64, filename: &str, bytes: &[u8]) -> io::Result<String> {
        let dir = self.ticket_dir(ticket_id);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(filename), bytes).await?;

        tracing::debug!(ticket_id, filename, size = bytes.len(), "Stored attachment");
        Ok(Self::relative_path(ticket_id, filename))
    }
}

impl AttachmentStore {
    /// Removes a stored file by its relative path. A missing file is not an error.
    pub async fn remove(&self, relative: &str) -> io::Result<()> {
        match tokio::fs::remove_file(self.resolve(relative)).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Reduces a client supplied filename to its final path component.
///
/// Returns `None` for names that cannot be stored (empty, `.` or `..`).
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or("").trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}
