use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,

    /// The user who opened the ticket.
    pub user_id: i64,

    pub status: TicketStatus,

    pub created_at: DateTime<Utc>,
    /// Bumped whenever the status changes; the close time of a closed ticket.
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum TicketStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,

    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(has_many = "super::replies::Entity")]
    Replies,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::replies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Replies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DbConn, user_id: i64, title: &str) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            title: Set(title.to_owned()),
            user_id: Set(user_id),
            status: Set(TicketStatus::Open),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find(db: &DbConn, ticket_id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(ticket_id).one(db).await
    }

    pub async fn set_closed(db: &DbConn, ticket_id: i64) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(ticket_id).one(db).await?;

        let model = match model {
            Some(m) => m,
            None => return Err(DbErr::RecordNotFound("Ticket not found".to_string())),
        };

        let mut active_model: ActiveModel = model.into();

        active_model.status = Set(TicketStatus::Closed);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    pub fn is_closed(&self) -> bool {
        self.status == TicketStatus::Closed
    }
}
