use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use bookmind_domain::id::UserId;
use bookmind_domain::reflection::Answers;
use bookmind_domain::status::MentalModelStatus;
use bookmind_reading_schema::{action_plans, books, likes, mental_models, users};

use crate::domain::repository::{
    ActionPlanRepository, BookRepository, LikeRepository, MentalModelRepository, UserRepository,
};
use crate::domain::types::{
    ActionPlan, Book, Like, LikeSummary, MentalModel, MentalModelChanges, User, UserProfile,
};
use crate::error::ReadingServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, ReadingServiceError> {
        let model = users::Entity::find_by_id(id.as_str().to_owned())
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn upsert(
        &self,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> Result<User, ReadingServiceError> {
        let am = users::ActiveModel {
            id: Set(profile.id.as_str().to_owned()),
            email: Set(profile.email.clone()),
            first_name: Set(profile.first_name.clone()),
            last_name: Set(profile.last_name.clone()),
            email_verified: Set(profile.email_verified),
            profile_picture_url: Set(profile.profile_picture_url.clone()),
            organization_id: Set(profile.organization_id.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        users::Entity::insert(am)
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .update_columns([
                        users::Column::Email,
                        users::Column::FirstName,
                        users::Column::LastName,
                        users::Column::EmailVerified,
                        users::Column::ProfilePictureUrl,
                        users::Column::OrganizationId,
                        users::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert user")?;

        let stored = users::Entity::find_by_id(profile.id.as_str().to_owned())
            .one(&self.db)
            .await
            .context("reload upserted user")?
            .context("upserted user vanished")?;
        Ok(user_from_model(stored))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        email_verified: model.email_verified,
        profile_picture_url: model.profile_picture_url,
        organization_id: model.organization_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Book repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: DatabaseConnection,
}

impl BookRepository for DbBookRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, ReadingServiceError> {
        let model = books::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find book by id")?;
        Ok(model.map(book_from_model))
    }

    async fn find_by_google_book_id(
        &self,
        google_book_id: &str,
    ) -> Result<Option<Book>, ReadingServiceError> {
        let model = books::Entity::find()
            .filter(books::Column::GoogleBookId.eq(google_book_id))
            .one(&self.db)
            .await
            .context("find book by google book id")?;
        Ok(model.map(book_from_model))
    }

    async fn insert_if_absent(&self, book: &Book) -> Result<Book, ReadingServiceError> {
        let am = books::ActiveModel {
            id: Set(book.id),
            google_book_id: Set(book.google_book_id.clone()),
            title: Set(book.title.clone()),
            authors: Set(book.authors.clone()),
            thumbnail_url: Set(book.thumbnail_url.clone()),
            description: Set(book.description.clone()),
            created_at: Set(book.created_at),
        };
        // A concurrent insert of the same google_book_id loses silently.
        books::Entity::insert(am)
            .on_conflict(
                OnConflict::column(books::Column::GoogleBookId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert book")?;

        let stored = self
            .find_by_google_book_id(&book.google_book_id)
            .await?
            .context("inserted book vanished")?;
        Ok(stored)
    }
}

fn book_from_model(model: books::Model) -> Book {
    Book {
        id: model.id,
        google_book_id: model.google_book_id,
        title: model.title,
        authors: model.authors,
        thumbnail_url: model.thumbnail_url,
        description: model.description,
        created_at: model.created_at,
    }
}

// ── Mental model repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMentalModelRepository {
    pub db: DatabaseConnection,
}

impl MentalModelRepository for DbMentalModelRepository {
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(MentalModel, Book)>, ReadingServiceError> {
        let rows = mental_models::Entity::find()
            .filter(mental_models::Column::UserId.eq(user_id.as_str()))
            .order_by_asc(mental_models::Column::CreatedAt)
            .order_by_asc(mental_models::Column::Id)
            .find_also_related(books::Entity)
            .all(&self.db)
            .await
            .context("list mental models by user")?;
        joined_rows(rows)
    }

    async fn find_owned(
        &self,
        id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<(MentalModel, Book)>, ReadingServiceError> {
        let row = mental_models::Entity::find_by_id(id)
            .filter(mental_models::Column::UserId.eq(user_id.as_str()))
            .find_also_related(books::Entity)
            .one(&self.db)
            .await
            .context("find owned mental model")?;
        Ok(joined_rows(row.into_iter().collect())?.pop())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MentalModel>, ReadingServiceError> {
        let model = mental_models::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find mental model by id")?;
        model.map(mental_model_from_model).transpose()
    }

    async fn create(&self, model: &MentalModel) -> Result<(), ReadingServiceError> {
        let a = &model.answers;
        mental_models::ActiveModel {
            id: Set(model.id),
            user_id: Set(model.user_id.as_str().to_owned()),
            book_id: Set(model.book_id),
            status: Set(model.status.as_str().to_owned()),
            why_read_answer_1: Set(a.why_read_answer_1.clone()),
            why_read_answer_2: Set(a.why_read_answer_2.clone()),
            why_read_answer_3: Set(a.why_read_answer_3.clone()),
            what_to_gain_answer_1: Set(a.what_to_gain_answer_1.clone()),
            what_to_gain_answer_2: Set(a.what_to_gain_answer_2.clone()),
            what_to_gain_answer_3: Set(a.what_to_gain_answer_3.clone()),
            goal_after_reading_answer_1: Set(a.goal_after_reading_answer_1.clone()),
            goal_after_reading_answer_2: Set(a.goal_after_reading_answer_2.clone()),
            goal_after_reading_answer_3: Set(a.goal_after_reading_answer_3.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create mental model")?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: &UserId,
        changes: &MentalModelChanges,
        expected: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ReadingServiceError> {
        use mental_models::Column;

        let patch = &changes.answers;
        let answer_columns = [
            (Column::WhyReadAnswer1, &patch.why_read_answer_1),
            (Column::WhyReadAnswer2, &patch.why_read_answer_2),
            (Column::WhyReadAnswer3, &patch.why_read_answer_3),
            (Column::WhatToGainAnswer1, &patch.what_to_gain_answer_1),
            (Column::WhatToGainAnswer2, &patch.what_to_gain_answer_2),
            (Column::WhatToGainAnswer3, &patch.what_to_gain_answer_3),
            (Column::GoalAfterReadingAnswer1, &patch.goal_after_reading_answer_1),
            (Column::GoalAfterReadingAnswer2, &patch.goal_after_reading_answer_2),
            (Column::GoalAfterReadingAnswer3, &patch.goal_after_reading_answer_3),
        ];

        let mut query = mental_models::Entity::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(updated_at));
        if let Some(status) = changes.status {
            query = query.col_expr(Column::Status, Expr::value(status.as_str().to_owned()));
        }
        for (column, value) in answer_columns {
            if let Some(value) = value {
                query = query.col_expr(column, Expr::value(value.clone()));
            }
        }
        if let Some(expected) = expected {
            query = query.filter(Column::UpdatedAt.eq(expected));
        }
        let result = query
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id.as_str()))
            .exec(&self.db)
            .await
            .context("update mental model")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<bool, ReadingServiceError> {
        let result = mental_models::Entity::delete_many()
            .filter(mental_models::Column::Id.eq(id))
            .filter(mental_models::Column::UserId.eq(user_id.as_str()))
            .exec(&self.db)
            .await
            .context("delete mental model")?;
        Ok(result.rows_affected > 0)
    }
}

fn mental_model_from_model(model: mental_models::Model) -> Result<MentalModel, ReadingServiceError> {
    let status: MentalModelStatus = model
        .status
        .parse()
        .with_context(|| format!("mental model {} has an unreadable status", model.id))?;
    Ok(MentalModel {
        id: model.id,
        user_id: UserId(model.user_id),
        book_id: model.book_id,
        status,
        answers: Answers {
            why_read_answer_1: model.why_read_answer_1,
            why_read_answer_2: model.why_read_answer_2,
            why_read_answer_3: model.why_read_answer_3,
            what_to_gain_answer_1: model.what_to_gain_answer_1,
            what_to_gain_answer_2: model.what_to_gain_answer_2,
            what_to_gain_answer_3: model.what_to_gain_answer_3,
            goal_after_reading_answer_1: model.goal_after_reading_answer_1,
            goal_after_reading_answer_2: model.goal_after_reading_answer_2,
            goal_after_reading_answer_3: model.goal_after_reading_answer_3,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Convert joined rows. The foreign key guarantees every model has a book.
fn joined_rows(
    rows: Vec<(mental_models::Model, Option<books::Model>)>,
) -> Result<Vec<(MentalModel, Book)>, ReadingServiceError> {
    rows.into_iter()
        .map(|(model, book)| {
            let book = book.with_context(|| format!("mental model {} has no book", model.id))?;
            Ok((mental_model_from_model(model)?, book_from_model(book)))
        })
        .collect()
}

// ── Like repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLikeRepository {
    pub db: DatabaseConnection,
}

impl LikeRepository for DbLikeRepository {
    async fn find(
        &self,
        mental_model_id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<Like>, ReadingServiceError> {
        let model = likes::Entity::find_by_id((mental_model_id, user_id.as_str().to_owned()))
            .one(&self.db)
            .await
            .context("find like")?;
        Ok(model.map(like_from_model))
    }

    async fn insert_if_absent(&self, like: &Like) -> Result<Like, ReadingServiceError> {
        let am = likes::ActiveModel {
            mental_model_id: Set(like.mental_model_id),
            user_id: Set(like.user_id.as_str().to_owned()),
            created_at: Set(like.created_at),
        };
        likes::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([likes::Column::MentalModelId, likes::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert like")?;

        let stored = self
            .find(like.mental_model_id, &like.user_id)
            .await?
            .context("inserted like vanished")?;
        Ok(stored)
    }

    async fn delete(
        &self,
        mental_model_id: Uuid,
        user_id: &UserId,
    ) -> Result<bool, ReadingServiceError> {
        let result = likes::Entity::delete_many()
            .filter(likes::Column::MentalModelId.eq(mental_model_id))
            .filter(likes::Column::UserId.eq(user_id.as_str()))
            .exec(&self.db)
            .await
            .context("delete like")?;
        Ok(result.rows_affected > 0)
    }

    async fn summarize(
        &self,
        mental_model_ids: &[Uuid],
        viewer: &UserId,
    ) -> Result<HashMap<Uuid, LikeSummary>, ReadingServiceError> {
        if mental_model_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = likes::Entity::find()
            .filter(likes::Column::MentalModelId.is_in(mental_model_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("summarize likes")?;

        let mut summaries: HashMap<Uuid, LikeSummary> = HashMap::new();
        for row in rows {
            let summary = summaries.entry(row.mental_model_id).or_default();
            summary.count += 1;
            summary.liked_by_viewer |= row.user_id == viewer.as_str();
        }
        Ok(summaries)
    }

    async fn list_liked_by(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(MentalModel, Book)>, ReadingServiceError> {
        let liked = likes::Entity::find()
            .filter(likes::Column::UserId.eq(user_id.as_str()))
            .order_by_asc(likes::Column::CreatedAt)
            .order_by_asc(likes::Column::MentalModelId)
            .all(&self.db)
            .await
            .context("list likes by user")?;
        if liked.is_empty() {
            return Ok(Vec::new());
        }

        let rows = mental_models::Entity::find()
            .filter(mental_models::Column::Id.is_in(liked.iter().map(|l| l.mental_model_id)))
            .find_also_related(books::Entity)
            .all(&self.db)
            .await
            .context("load liked mental models")?;
        let mut by_id: HashMap<Uuid, (MentalModel, Book)> = joined_rows(rows)?
            .into_iter()
            .map(|row| (row.0.id, row))
            .collect();

        Ok(liked
            .iter()
            .filter_map(|like| by_id.remove(&like.mental_model_id))
            .collect())
    }
}

fn like_from_model(model: likes::Model) -> Like {
    Like {
        mental_model_id: model.mental_model_id,
        user_id: UserId(model.user_id),
        created_at: model.created_at,
    }
}

// ── Action plan repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActionPlanRepository {
    pub db: DatabaseConnection,
}

impl ActionPlanRepository for DbActionPlanRepository {
    async fn list_by_mental_model(
        &self,
        mental_model_id: Uuid,
    ) -> Result<Vec<ActionPlan>, ReadingServiceError> {
        let models = action_plans::Entity::find()
            .filter(action_plans::Column::MentalModelId.eq(mental_model_id))
            .order_by_asc(action_plans::Column::CreatedAt)
            .order_by_asc(action_plans::Column::Id)
            .all(&self.db)
            .await
            .context("list action plans")?;
        Ok(models.into_iter().map(action_plan_from_model).collect())
    }

    async fn find_owned(
        &self,
        id: Uuid,
        owner: &UserId,
    ) -> Result<Option<ActionPlan>, ReadingServiceError> {
        let model = action_plans::Entity::find_by_id(id)
            .inner_join(mental_models::Entity)
            .filter(mental_models::Column::UserId.eq(owner.as_str()))
            .one(&self.db)
            .await
            .context("find owned action plan")?;
        Ok(model.map(action_plan_from_model))
    }

    async fn create(&self, plan: &ActionPlan) -> Result<(), ReadingServiceError> {
        action_plans::ActiveModel {
            id: Set(plan.id),
            mental_model_id: Set(plan.mental_model_id),
            content: Set(plan.content.clone()),
            created_at: Set(plan.created_at),
            updated_at: Set(plan.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create action plan")?;
        Ok(())
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        expected: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ReadingServiceError> {
        let mut query = action_plans::Entity::update_many()
            .col_expr(action_plans::Column::Content, Expr::value(content.to_owned()))
            .col_expr(action_plans::Column::UpdatedAt, Expr::value(updated_at))
            .filter(action_plans::Column::Id.eq(id));
        if let Some(expected) = expected {
            query = query.filter(action_plans::Column::UpdatedAt.eq(expected));
        }
        let result = query
            .exec(&self.db)
            .await
            .context("update action plan")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ReadingServiceError> {
        let result = action_plans::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete action plan")?;
        Ok(result.rows_affected > 0)
    }
}

fn action_plan_from_model(model: action_plans::Model) -> ActionPlan {
    ActionPlan {
        id: model.id,
        mental_model_id: model.mental_model_id,
        content: model.content,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
