use sea_orm_migration::prelude::*;

mod m20251001_000001_create_users;
mod m20251001_000002_create_books;
mod m20251001_000003_create_mental_models;
mod m20251001_000004_create_likes;
mod m20251001_000005_create_action_plans;
mod m20251001_000006_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_users::Migration),
            Box::new(m20251001_000002_create_books::Migration),
            Box::new(m20251001_000003_create_mental_models::Migration),
            Box::new(m20251001_000004_create_likes::Migration),
            Box::new(m20251001_000005_create_action_plans::Migration),
            Box::new(m20251001_000006_add_lookup_indexes::Migration),
        ]
    }
}
