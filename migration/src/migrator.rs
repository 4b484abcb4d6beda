use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202605010001_create_users::Migration),
            Box::new(migrations::m202605010002_create_tickets::Migration),
            Box::new(migrations::m202605010003_create_replies::Migration),
            Box::new(migrations::m202605010004_create_reply_files::Migration),
        ]
    }
}
