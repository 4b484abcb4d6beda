pub mod replies;
pub mod reply_files;
pub mod tickets;
pub mod user;

pub use replies::Entity as Reply;
pub use reply_files::Entity as ReplyFile;
pub use tickets::Entity as Ticket;
pub use user::Entity as User;
