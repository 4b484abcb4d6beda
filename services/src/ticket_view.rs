//! Ticket thread materialization.
//!
//! Turns a fully loaded [`TicketAggregate`] into the [`TicketView`] returned by
//! `GET /tickets/{id}`:
//!
//! - `participants` → id-keyed directory of everyone who touched the ticket
//! - `timeline` → `Opened`, one `Replied` per reply, and `Closed` for closed tickets
//! - `conversation` → one text entry per reply followed by one entry per attachment
//! - `parameters.duration` → milliseconds between the first and last timeline event
//!
//! Everything here is pure: no I/O, no shared state. Ordering always follows the
//! order in which the loader supplied replies and files; nothing is re-sorted.

use chrono::{DateTime, SecondsFormat, Utc};
use db::models::tickets::TicketStatus;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

pub type UserId = i64;

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// A ticket together with everything needed to render its thread.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketAggregate {
    pub id: i64,
    pub creator: Profile,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// In creation order.
    pub replies: Vec<ReplyAggregate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplyAggregate {
    pub content: String,
    pub author: Profile,
    pub created_at: DateTime<Utc>,
    /// In creation order.
    pub files: Vec<AttachmentRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentRecord {
    pub filename: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub ticket_id: i64,
    pub asker: UserId,
    pub parameters: ViewParameters,
    pub participants: BTreeMap<UserId, Participant>,
    pub timeline: Vec<TimelineEvent>,
    pub conversation: Vec<ConversationEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewParameters {
    /// Milliseconds from the first to the last timeline event.
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimelineLabel {
    Opened,
    Replied,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub label: TimelineLabel,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationEntry {
    pub sender_id: UserId,
    /// Always the reply's timestamp, also for attachment entries.
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub content: MessageContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { text: String },
    Image(Attachment),
    File(Attachment),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    pub file_type: String,
    /// Not tracked; always 0.
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    File,
}

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Builds the complete view of a ticket thread.
pub fn materialize(ticket: &TicketAggregate) -> TicketView {
    let participants = aggregate_participants(ticket);
    let timeline = build_timeline(ticket);
    let duration = duration_ms(&timeline);
    let conversation = flatten_conversation(ticket);

    TicketView {
        ticket_id: ticket.id,
        asker: ticket.creator.id,
        parameters: ViewParameters { duration },
        participants,
        timeline,
        conversation,
    }
}

/// Creator first, then every reply author not seen yet. First write wins.
pub fn aggregate_participants(ticket: &TicketAggregate) -> BTreeMap<UserId, Participant> {
    let mut participants = BTreeMap::new();
    participants.insert(ticket.creator.id, Participant::from(&ticket.creator));

    for reply in &ticket.replies {
        participants
            .entry(reply.author.id)
            .or_insert_with(|| Participant::from(&reply.author));
    }

    participants
}

pub fn build_timeline(ticket: &TicketAggregate) -> Vec<TimelineEvent> {
    let mut timeline = Vec::with_capacity(ticket.replies.len() + 2);

    timeline.push(TimelineEvent {
        label: TimelineLabel::Opened,
        timestamp: ticket.created_at,
        user_id: None,
    });

    timeline.extend(ticket.replies.iter().map(|reply| TimelineEvent {
        label: TimelineLabel::Replied,
        timestamp: reply.created_at,
        user_id: Some(reply.author.id),
    }));

    if ticket.status == TicketStatus::Closed {
        timeline.push(TimelineEvent {
            label: TimelineLabel::Closed,
            timestamp: ticket.updated_at,
            user_id: None,
        });
    }

    timeline
}

/// Last minus first event, at the millisecond precision the timestamps are
/// serialized with. Negative when the input timestamps are out of order.
pub fn duration_ms(timeline: &[TimelineEvent]) -> i64 {
    match (timeline.first(), timeline.last()) {
        (Some(first), Some(last)) => {
            last.timestamp.timestamp_millis() - first.timestamp.timestamp_millis()
        }
        _ => 0,
    }
}

pub fn flatten_conversation(ticket: &TicketAggregate) -> Vec<ConversationEntry> {
    let mut conversation = Vec::new();

    for reply in &ticket.replies {
        // Empty text is still emitted.
        conversation.push(ConversationEntry {
            sender_id: reply.author.id,
            timestamp: reply.created_at,
            content: MessageContent::Text {
                text: reply.content.clone(),
            },
        });

        for file in &reply.files {
            let attachment = Attachment {
                name: file.filename.clone(),
                url: file.url.clone(),
                file_type: extension(&file.filename).to_string(),
                size: 0,
            };
            let content = match classify(&file.filename) {
                AttachmentKind::Image => MessageContent::Image(attachment),
                AttachmentKind::File => MessageContent::File(attachment),
            };

            conversation.push(ConversationEntry {
                sender_id: reply.author.id,
                timestamp: reply.created_at,
                content,
            });
        }
    }

    conversation
}

/// `Image` for jpg/jpeg/png/gif (any case), `File` for everything else.
pub fn classify(filename: &str) -> AttachmentKind {
    let ext = extension(filename).to_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        AttachmentKind::Image
    } else {
        AttachmentKind::File
    }
}

/// Text after the last `.`; the whole name when there is no dot.
pub fn extension(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

/// ISO-8601 UTC with milliseconds, e.g. `2024-05-01T10:00:00.000Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}

impl From<&Profile> for Participant {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.username.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }
}
