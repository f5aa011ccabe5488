use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "action_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub mental_model_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mental_models::Entity",
        from = "Column::MentalModelId",
        to = "super::mental_models::Column::Id",
        on_delete = "Cascade"
    )]
    MentalModel,
}

impl Related<super::mental_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MentalModel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
