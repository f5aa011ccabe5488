use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub google_book_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub thumbnail_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::mental_models::Entity")]
    MentalModels,
}

impl Related<super::mental_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MentalModels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
