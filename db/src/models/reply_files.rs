use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, QueryOrder, entity::prelude::*};

/// A file uploaded together with a reply.
///
/// `path` is relative to the attachment storage root; `url` is the public link
/// handed out to clients.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reply_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ticket_id: i64,
    pub reply_id: i64,
    pub filename: String,
    pub path: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tickets::Entity",
        from = "Column::TicketId",
        to = "super::tickets::Column::Id"
    )]
    Ticket,

    #[sea_orm(
        belongs_to = "super::replies::Entity",
        from = "Column::ReplyId",
        to = "super::replies::Column::Id"
    )]
    Reply,
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl Related<super::replies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reply.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(
        db: &C,
        ticket_id: i64,
        reply_id: i64,
        filename: &str,
        path: &str,
        url: &str,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let active = ActiveModel {
            ticket_id: Set(ticket_id),
            reply_id: Set(reply_id),
            filename: Set(filename.to_owned()),
            path: Set(path.to_owned()),
            url: Set(url.to_owned()),
            created_at: Set(now),
            ..Default::default()
        };

        active.insert(db).await
    }

    /// Files of the given replies, in creation order.
    pub async fn find_for_replies(db: &DbConn, reply_ids: Vec<i64>) -> Result<Vec<Model>, DbErr> {
        if reply_ids.is_empty() {
            return Ok(Vec::new());
        }

        Entity::find()
            .filter(Column::ReplyId.is_in(reply_ids))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// First stored file with this name in the ticket.
    pub async fn find_by_ticket_and_filename(
        db: &DbConn,
        ticket_id: i64,
        filename: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::TicketId.eq(ticket_id))
            .filter(Column::Filename.eq(filename))
            .order_by_asc(Column::Id)
            .one(db)
            .await
    }
}
