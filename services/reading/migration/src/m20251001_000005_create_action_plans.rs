use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionPlans::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActionPlans::MentalModelId).uuid().not_null())
                    .col(ColumnDef::new(ActionPlans::Content).text().not_null())
                    .col(
                        ColumnDef::new(ActionPlans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ActionPlans::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ActionPlans::Table, ActionPlans::MentalModelId)
                            .to(MentalModels::Table, MentalModels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionPlans::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ActionPlans {
    Table,
    Id,
    MentalModelId,
    Content,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MentalModels {
    Table,
    Id,
}
