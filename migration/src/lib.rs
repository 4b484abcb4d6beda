pub use sea_orm_migration::prelude::*;

mod migrations;
pub mod migrator;
pub mod runner;

pub use migrator::Migrator;
