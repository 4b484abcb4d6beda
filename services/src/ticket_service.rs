use crate::error::{ServiceError, ServiceResult};
use crate::ticket_view::{AttachmentRecord, Profile, ReplyAggregate, TicketAggregate};
use db::models::{reply_files, replies, tickets, user};
use sea_orm::{DbConn, DbErr, EntityTrait};
use std::collections::HashMap;

pub use db::models::tickets::Model as Ticket;
pub use db::models::tickets::TicketStatus;

pub struct TicketService;

impl TicketService {
    pub async fn create(db: &DbConn, user_id: i64, title: &str) -> ServiceResult<Ticket> {
        let ticket = tickets::Model::create(db, user_id, title).await?;
        tracing::info!(ticket_id = ticket.id, user_id, "Opened ticket");
        Ok(ticket)
    }

    /// Marks the ticket closed and stamps `updated_at`. Closing twice is allowed.
    pub async fn close(db: &DbConn, ticket_id: i64) -> ServiceResult<Ticket> {
        match tickets::Model::set_closed(db, ticket_id).await {
            Ok(ticket) => {
                tracing::info!(ticket_id, "Closed ticket");
                Ok(ticket)
            }
            Err(DbErr::RecordNotFound(_)) => Err(ServiceError::NotFound("Ticket not found".into())),
            Err(err) => Err(err.into()),
        }
    }

    /// Loads a ticket with its creator, replies, reply authors and files.
    ///
    /// Replies and files come back in creation order. Returns `Ok(None)` when the
    /// ticket does not exist.
    pub async fn load_aggregate(db: &DbConn, ticket_id: i64) -> ServiceResult<Option<TicketAggregate>> {
        let Some((ticket, creator)) = tickets::Entity::find_by_id(ticket_id)
            .find_also_related(user::Entity)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let creator = creator.ok_or_else(|| {
            ServiceError::Integrity(format!("Ticket {ticket_id} has no creator"))
        })?;

        let replies = replies::Model::find_all_for_ticket_with_author(db, ticket_id).await?;
        let reply_ids: Vec<i64> = replies.iter().map(|(reply, _)| reply.id).collect();

        let mut files_by_reply: HashMap<i64, Vec<AttachmentRecord>> = HashMap::new();
        for file in reply_files::Model::find_for_replies(db, reply_ids).await? {
            files_by_reply
                .entry(file.reply_id)
                .or_default()
                .push(AttachmentRecord::from(file));
        }

        let mut reply_aggregates = Vec::with_capacity(replies.len());
        for (reply, author) in replies {
            let author = author.ok_or_else(|| {
                ServiceError::Integrity(format!("Reply {} has no author", reply.id))
            })?;

            reply_aggregates.push(ReplyAggregate {
                content: reply.content,
                author: Profile::from(author),
                created_at: reply.created_at,
                files: files_by_reply.remove(&reply.id).unwrap_or_default(),
            });
        }

        Ok(Some(TicketAggregate {
            id: ticket.id,
            creator: Profile::from(creator),
            status: ticket.status,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            replies: reply_aggregates,
        }))
    }
}

impl From<user::Model> for Profile {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            avatar_url: user.avatar,
        }
    }
}

impl From<reply_files::Model> for AttachmentRecord {
    fn from(file: reply_files::Model) -> Self {
        Self {
            filename: file.filename,
            url: file.url,
            created_at: file.created_at,
        }
    }
}
