use sea_orm::entity::prelude::*;

/// A reader's reflection on one book. `status` holds `reading` or `completed`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mental_models")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub book_id: Uuid,
    pub status: String,
    #[sea_orm(column_name = "why_read_answer_1", column_type = "Text")]
    pub why_read_answer_1: String,
    #[sea_orm(column_name = "why_read_answer_2", column_type = "Text")]
    pub why_read_answer_2: String,
    #[sea_orm(column_name = "why_read_answer_3", column_type = "Text")]
    pub why_read_answer_3: String,
    #[sea_orm(column_name = "what_to_gain_answer_1", column_type = "Text")]
    pub what_to_gain_answer_1: String,
    #[sea_orm(column_name = "what_to_gain_answer_2", column_type = "Text")]
    pub what_to_gain_answer_2: String,
    #[sea_orm(column_name = "what_to_gain_answer_3", column_type = "Text")]
    pub what_to_gain_answer_3: String,
    #[sea_orm(column_name = "goal_after_reading_answer_1", column_type = "Text")]
    pub goal_after_reading_answer_1: String,
    #[sea_orm(column_name = "goal_after_reading_answer_2", column_type = "Text")]
    pub goal_after_reading_answer_2: String,
    #[sea_orm(column_name = "goal_after_reading_answer_3", column_type = "Text")]
    pub goal_after_reading_answer_3: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::books::Entity",
        from = "Column::BookId",
        to = "super::books::Column::Id",
        on_delete = "Cascade"
    )]
    Book,
    #[sea_orm(has_many = "super::likes::Entity")]
    Likes,
    #[sea_orm(has_many = "super::action_plans::Entity")]
    ActionPlans,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::likes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl Related<super::action_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActionPlans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
