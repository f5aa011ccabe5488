use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (index name, table, column). Foreign keys, status and the columns the
/// list filters search on.
const INDEXES: &[(&str, &str, &str)] = &[
    ("idx_users_email", "users", "email"),
    ("idx_users_first_name", "users", "first_name"),
    ("idx_users_last_name", "users", "last_name"),
    ("idx_users_email_verified", "users", "email_verified"),
    ("idx_users_organization_id", "users", "organization_id"),
    ("idx_books_title", "books", "title"),
    ("idx_books_authors", "books", "authors"),
    ("idx_mental_models_user_id", "mental_models", "user_id"),
    ("idx_mental_models_book_id", "mental_models", "book_id"),
    ("idx_mental_models_status", "mental_models", "status"),
    ("idx_mental_models_created_at", "mental_models", "created_at"),
    ("idx_likes_user_id", "likes", "user_id"),
    ("idx_action_plans_mental_model_id", "action_plans", "mental_model_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .table(Alias::new(*table))
                        .col(Alias::new(*column))
                        .name(*name)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in INDEXES.iter().rev() {
            manager
                .drop_index(
                    Index::drop()
                        .name(*name)
                        .table(Alias::new(*table))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}
