use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MentalModels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentalModels::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MentalModels::UserId).string().not_null())
                    .col(ColumnDef::new(MentalModels::BookId).uuid().not_null())
                    .col(
                        ColumnDef::new(MentalModels::Status)
                            .string_len(16)
                            .not_null()
                            .default("reading"),
                    )
                    .col(ColumnDef::new(MentalModels::WhyReadAnswer1).text().not_null())
                    .col(ColumnDef::new(MentalModels::WhyReadAnswer2).text().not_null())
                    .col(ColumnDef::new(MentalModels::WhyReadAnswer3).text().not_null())
                    .col(ColumnDef::new(MentalModels::WhatToGainAnswer1).text().not_null())
                    .col(ColumnDef::new(MentalModels::WhatToGainAnswer2).text().not_null())
                    .col(ColumnDef::new(MentalModels::WhatToGainAnswer3).text().not_null())
                    .col(
                        ColumnDef::new(MentalModels::GoalAfterReadingAnswer1)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentalModels::GoalAfterReadingAnswer2)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentalModels::GoalAfterReadingAnswer3)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentalModels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MentalModels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentalModels::Table, MentalModels::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentalModels::Table, MentalModels::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MentalModels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MentalModels {
    Table,
    Id,
    UserId,
    BookId,
    Status,
    #[iden = "why_read_answer_1"]
    WhyReadAnswer1,
    #[iden = "why_read_answer_2"]
    WhyReadAnswer2,
    #[iden = "why_read_answer_3"]
    WhyReadAnswer3,
    #[iden = "what_to_gain_answer_1"]
    WhatToGainAnswer1,
    #[iden = "what_to_gain_answer_2"]
    WhatToGainAnswer2,
    #[iden = "what_to_gain_answer_3"]
    WhatToGainAnswer3,
    #[iden = "goal_after_reading_answer_1"]
    GoalAfterReadingAnswer1,
    #[iden = "goal_after_reading_answer_2"]
    GoalAfterReadingAnswer2,
    #[iden = "goal_after_reading_answer_3"]
    GoalAfterReadingAnswer3,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
}
