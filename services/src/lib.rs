pub mod error;
pub mod reply_service;
pub mod ticket_service;
pub mod ticket_view;
pub mod user_service;

pub use error::ServiceError;
