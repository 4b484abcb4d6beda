pub mod m202605010001_create_users;
pub mod m202605010002_create_tickets;
pub mod m202605010003_create_replies;
pub mod m202605010004_create_reply_files;
