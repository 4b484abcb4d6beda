use crate::error::{ServiceError, ServiceResult};
use chrono::Utc;
use db::models::{reply_files, replies, tickets};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use sea_orm::{DbConn, TransactionTrait};
use util::storage::{AttachmentStore, sanitize_filename};

pub use db::models::replies::Model as Reply;
pub use db::models::reply_files::Model as ReplyFile;

/// Characters escaped when a filename becomes a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A file part taken off a multipart request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CreateReply {
    pub ticket_id: i64,
    pub author_id: i64,
    pub content: String,
    pub uploads: Vec<Upload>,
}

#[derive(Debug, Clone)]
pub struct CreatedReply {
    pub reply: Reply,
    pub files: Vec<ReplyFile>,
}

pub struct ReplyService;

impl ReplyService {
    /// Stores a reply and its attachments.
    ///
    /// The reply row and all file rows are inserted in a single transaction sharing
    /// one timestamp. Files are written while the transaction is open and removed
    /// again if anything fails before commit. `base_url` has no trailing slash.
    pub async fn create(
        db: &DbConn,
        store: &AttachmentStore,
        params: CreateReply,
        base_url: &str,
    ) -> ServiceResult<CreatedReply> {
        if params.content.is_empty() {
            return Err(ServiceError::Validation("No content provided".into()));
        }

        if tickets::Model::find(db, params.ticket_id).await?.is_none() {
            return Err(ServiceError::NotFound("Ticket not found".into()));
        }

        let mut named = Vec::with_capacity(params.uploads.len());
        for upload in &params.uploads {
            let filename = sanitize_filename(&upload.filename).ok_or_else(|| {
                ServiceError::Validation(format!("Invalid filename: {:?}", upload.filename))
            })?;
            named.push((filename, upload.bytes.as_slice()));
        }

        let mut written = Vec::with_capacity(named.len());
        let result = Self::persist(db, store, &params, &named, base_url, &mut written).await;

        if let Err(e) = &result {
            tracing::warn!(ticket_id = params.ticket_id, error = %e, "Reply failed, removing stored files");
            for path in &written {
                if let Err(err) = store.remove(path).await {
                    tracing::error!(path = %path, error = %err, "Failed to remove attachment");
                }
            }
        }

        let created = result?;
        tracing::info!(
            ticket_id = params.ticket_id,
            reply_id = created.reply.id,
            author_id = params.author_id,
            files = created.files.len(),
            "Added reply"
        );

        Ok(created)
    }

    async fn persist(
        db: &DbConn,
        store: &AttachmentStore,
        params: &CreateReply,
        named: &[(String, &[u8])],
        base_url: &str,
        written: &mut Vec<String>,
    ) -> ServiceResult<CreatedReply> {
        let now = Utc::now();
        let txn = db.begin().await?;

        let reply =
            replies::Model::create(&txn, params.ticket_id, params.author_id, &params.content, now)
                .await?;

        let mut files = Vec::with_capacity(named.len());
        for (filename, bytes) in named {
            let path = store.save(params.ticket_id, filename, bytes).await?;
            written.push(path.clone());

            let url = attachment_url(base_url, params.ticket_id, filename);
            let file =
                reply_files::Model::create(&txn, params.ticket_id, reply.id, filename, &path, &url, now)
                    .await?;
            files.push(file);
        }

        txn.commit().await?;
        Ok(CreatedReply { reply, files })
    }
}

/// Public download link of an attachment: `{base_url}/files/{ticket_id}/{filename}`.
pub fn attachment_url(base_url: &str, ticket_id: i64, filename: &str) -> String {
    format!(
        "{}/files/{}/{}",
        base_url.trim_end_matches('/'),
        ticket_id,
        utf8_percent_encode(filename, PATH_SEGMENT)
    )
}
