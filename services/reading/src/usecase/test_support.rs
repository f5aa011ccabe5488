//! In-memory repositories shared by the usecase tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use bookmind_domain::id::UserId;
use bookmind_domain::reflection::Answers;
use bookmind_domain::status::MentalModelStatus;

use crate::domain::repository::{
    ActionPlanRepository, BookRepository, CatalogPort, LikeRepository, MentalModelRepository,
    UserRepository,
};
use crate::domain::types::{
    ActionPlan, Book, CatalogVolume, Like, LikeSummary, MentalModel, MentalModelChanges, User,
    UserProfile,
};
use crate::error::ReadingServiceError;

#[derive(Default)]
pub struct StoreState {
    pub users: Vec<User>,
    pub books: Vec<Book>,
    pub mental_models: Vec<MentalModel>,
    pub likes: Vec<Like>,
    pub action_plans: Vec<ActionPlan>,
}

/// One shared store implementing every repository trait.
///
/// `vanish_before_write` simulates a row deleted between the existence check
/// and the write: updates and deletes then affect zero rows.
/// `rewrite_before_write` simulates another request updating the row in that
/// window, leaving the given `updated_at` behind.
#[derive(Clone, Default)]
pub struct MockStore {
    pub state: Arc<Mutex<StoreState>>,
    pub vanish_before_write: bool,
    pub rewrite_before_write: Option<DateTime<Utc>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vanishing(self) -> Self {
        Self {
            vanish_before_write: true,
            ..self
        }
    }

    pub fn rewritten_at(self, updated_at: DateTime<Utc>) -> Self {
        Self {
            rewrite_before_write: Some(updated_at),
            ..self
        }
    }

    pub fn with_user(self, id: &str) -> Self {
        self.state.lock().unwrap().users.push(test_user(id));
        self
    }

    pub fn with_book(self, book: Book) -> Self {
        self.state.lock().unwrap().books.push(book);
        self
    }

    pub fn with_mental_model(self, model: MentalModel) -> Self {
        self.state.lock().unwrap().mental_models.push(model);
        self
    }

    pub fn with_like(self, like: Like) -> Self {
        self.state.lock().unwrap().likes.push(like);
        self
    }

    pub fn with_action_plan(self, plan: ActionPlan) -> Self {
        self.state.lock().unwrap().action_plans.push(plan);
        self
    }

    fn book_of(state: &StoreState, model: &MentalModel) -> Option<Book> {
        state.books.iter().find(|b| b.id == model.book_id).cloned()
    }
}

pub fn fixed_time(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap() + Duration::seconds(offset_secs)
}

pub fn test_user(id: &str) -> User {
    User {
        id: UserId::from(id),
        email: format!("{id}@example.com"),
        first_name: Some("Test".to_owned()),
        last_name: None,
        email_verified: true,
        profile_picture_url: None,
        organization_id: None,
        created_at: fixed_time(0),
        updated_at: fixed_time(0),
    }
}

pub fn test_book(google_book_id: &str) -> Book {
    Book {
        id: Uuid::now_v7(),
        google_book_id: google_book_id.to_owned(),
        title: "Thinking in Systems".to_owned(),
        authors: Some("Donella H. Meadows".to_owned()),
        thumbnail_url: None,
        description: None,
        created_at: fixed_time(0),
    }
}

pub fn test_mental_model(user_id: &str, book: &Book, offset_secs: i64) -> MentalModel {
    MentalModel {
        id: Uuid::now_v7(),
        user_id: UserId::from(user_id),
        book_id: book.id,
        status: MentalModelStatus::Reading,
        answers: Answers::new("motivation"),
        created_at: fixed_time(offset_secs),
        updated_at: fixed_time(offset_secs),
    }
}

pub fn test_action_plan(model: &MentalModel, content: &str, offset_secs: i64) -> ActionPlan {
    ActionPlan {
        id: Uuid::now_v7(),
        mental_model_id: model.id,
        content: content.to_owned(),
        created_at: fixed_time(offset_secs),
        updated_at: fixed_time(offset_secs),
    }
}

impl UserRepository for MockStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn upsert(
        &self,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> Result<User, ReadingServiceError> {
        let mut state = self.state.lock().unwrap();
        let created_at = state
            .users
            .iter()
            .find(|u| u.id == profile.id)
            .map_or(now, |u| u.created_at);
        state.users.retain(|u| u.id != profile.id);
        let user = User {
            id: profile.id.clone(),
            email: profile.email.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email_verified: profile.email_verified,
            profile_picture_url: profile.profile_picture_url.clone(),
            organization_id: profile.organization_id.clone(),
            created_at,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }
}

impl BookRepository for MockStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.books.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_google_book_id(
        &self,
        google_book_id: &str,
    ) -> Result<Option<Book>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .books
            .iter()
            .find(|b| b.google_book_id == google_book_id)
            .cloned())
    }

    async fn insert_if_absent(&self, book: &Book) -> Result<Book, ReadingServiceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .books
            .iter()
            .find(|b| b.google_book_id == book.google_book_id)
        {
            return Ok(existing.clone());
        }
        state.books.push(book.clone());
        Ok(book.clone())
    }
}

impl MentalModelRepository for MockStore {
    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(MentalModel, Book)>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<_> = state
            .mental_models
            .iter()
            .filter(|m| &m.user_id == user_id)
            .filter_map(|m| Self::book_of(&state, m).map(|b| (m.clone(), b)))
            .collect();
        rows.sort_by_key(|(m, _)| (m.created_at, m.id));
        Ok(rows)
    }

    async fn find_owned(
        &self,
        id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<(MentalModel, Book)>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .mental_models
            .iter()
            .find(|m| m.id == id && &m.user_id == user_id)
            .and_then(|m| Self::book_of(&state, m).map(|b| (m.clone(), b))))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MentalModel>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state.mental_models.iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, model: &MentalModel) -> Result<(), ReadingServiceError> {
        self.state.lock().unwrap().mental_models.push(model.clone());
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
        let mut state = self.state.lock().unwrap();
        if self.vanish_before_write {
            state.mental_models.retain(|m| m.id != id);
        }
        let Some(model) = state
            .mental_models
            .iter_mut()
            .find(|m| m.id == id && &m.user_id == user_id)
        else {
            return Ok(false);
        };
        if let Some(rewritten) = self.rewrite_before_write {
            model.updated_at = rewritten;
        }
        if expected.is_some_and(|expected| expected != model.updated_at) {
            return Ok(false);
        }
        if let Some(status) = changes.status {
            model.status = status;
        }
        model.answers.apply(&changes.answers);
        model.updated_at = updated_at;
        Ok(true)
    }

    async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<bool, ReadingServiceError> {
        let mut state = self.state.lock().unwrap();
        if self.vanish_before_write {
            state.mental_models.retain(|m| m.id != id);
        }
        let before = state.mental_models.len();
        state
            .mental_models
            .retain(|m| !(m.id == id && &m.user_id == user_id));
        let deleted = state.mental_models.len() != before;
        if deleted {
            state.likes.retain(|l| l.mental_model_id != id);
            state.action_plans.retain(|p| p.mental_model_id != id);
        }
        Ok(deleted)
    }
}

impl LikeRepository for MockStore {
    async fn find(
        &self,
        mental_model_id: Uuid,
        user_id: &UserId,
    ) -> Result<Option<Like>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .likes
            .iter()
            .find(|l| l.mental_model_id == mental_model_id && &l.user_id == user_id)
            .cloned())
    }

    async fn insert_if_absent(&self, like: &Like) -> Result<Like, ReadingServiceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .likes
            .iter()
            .find(|l| l.mental_model_id == like.mental_model_id && l.user_id == like.user_id)
        {
            return Ok(existing.clone());
        }
        state.likes.push(like.clone());
        Ok(like.clone())
    }

    async fn delete(
        &self,
        mental_model_id: Uuid,
        user_id: &UserId,
    ) -> Result<bool, ReadingServiceError> {
        let mut state = self.state.lock().unwrap();
        if self.vanish_before_write {
            state
                .likes
                .retain(|l| !(l.mental_model_id == mental_model_id && &l.user_id == user_id));
            return Ok(false);
        }
        let before = state.likes.len();
        state
            .likes
            .retain(|l| !(l.mental_model_id == mental_model_id && &l.user_id == user_id));
        Ok(state.likes.len() != before)
    }

    async fn summarize(
        &self,
        mental_model_ids: &[Uuid],
        viewer: &UserId,
    ) -> Result<HashMap<Uuid, LikeSummary>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        let mut out: HashMap<Uuid, LikeSummary> = HashMap::new();
        for like in state
            .likes
            .iter()
            .filter(|l| mental_model_ids.contains(&l.mental_model_id))
        {
            let entry = out.entry(like.mental_model_id).or_default();
            entry.count += 1;
            entry.liked_by_viewer |= &like.user_id == viewer;
        }
        Ok(out)
    }

    async fn list_liked_by(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(MentalModel, Book)>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        let mut likes: Vec<_> = state.likes.iter().filter(|l| &l.user_id == user_id).collect();
        likes.sort_by_key(|l| l.created_at);
        Ok(likes
            .into_iter()
            .filter_map(|l| state.mental_models.iter().find(|m| m.id == l.mental_model_id))
            .filter_map(|m| Self::book_of(&state, m).map(|b| (m.clone(), b)))
            .collect())
    }
}

impl ActionPlanRepository for MockStore {
    async fn list_by_mental_model(
        &self,
        mental_model_id: Uuid,
    ) -> Result<Vec<ActionPlan>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        let mut plans: Vec<_> = state
            .action_plans
            .iter()
            .filter(|p| p.mental_model_id == mental_model_id)
            .cloned()
            .collect();
        plans.sort_by_key(|p| (p.created_at, p.id));
        Ok(plans)
    }

    async fn find_owned(
        &self,
        id: Uuid,
        owner: &UserId,
    ) -> Result<Option<ActionPlan>, ReadingServiceError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .action_plans
            .iter()
            .find(|p| {
                p.id == id
                    && state
                        .mental_models
                        .iter()
                        .any(|m| m.id == p.mental_model_id && &m.user_id == owner)
            })
            .cloned())
    }

    async fn create(&self, plan: &ActionPlan) -> Result<(), ReadingServiceError> {
        self.state.lock().unwrap().action_plans.push(plan.clone());
        Ok(())
    }

    async fn update_content(
        &self,
        id: Uuid,
        content: &str,
        expected: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ReadingServiceError> {
        let mut state = self.state.lock().unwrap();
        if self.vanish_before_write {
            state.action_plans.retain(|p| p.id != id);
        }
        let Some(plan) = state.action_plans.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        if let Some(rewritten) = self.rewrite_before_write {
            plan.updated_at = rewritten;
        }
        if expected.is_some_and(|expected| expected != plan.updated_at) {
            return Ok(false);
        }
        plan.content = content.to_owned();
        plan.updated_at = updated_at;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ReadingServiceError> {
        let mut state = self.state.lock().unwrap();
        if self.vanish_before_write {
            state.action_plans.retain(|p| p.id != id);
        }
        let before = state.action_plans.len();
        state.action_plans.retain(|p| p.id != id);
        Ok(state.action_plans.len() != before)
    }
}

/// Canned catalog responses.
#[derive(Default)]
pub struct MockCatalog {
    pub volumes: Vec<CatalogVolume>,
    pub fail_with: Option<String>,
    pub last_max_results: Mutex<Option<u32>>,
}

pub fn test_volume(google_book_id: &str) -> CatalogVolume {
    CatalogVolume {
        google_book_id: google_book_id.to_owned(),
        title: "Range".to_owned(),
        authors: Some("David Epstein".to_owned()),
        thumbnail_url: None,
        description: None,
        publisher: Some("Riverhead".to_owned()),
        published_date: Some("2019-05-28".to_owned()),
        page_count: Some(352),
    }
}

impl CatalogPort for MockCatalog {
    async fn search(
        &self,
        _query: &str,
        max_results: u32,
    ) -> Result<Vec<CatalogVolume>, ReadingServiceError> {
        *self.last_max_results.lock().unwrap() = Some(max_results);
        if let Some(msg) = &self.fail_with {
            return Err(ReadingServiceError::GoogleBooksApi(msg.clone()));
        }
        Ok(self.volumes.clone())
    }

    async fn get(
        &self,
        google_book_id: &str,
    ) -> Result<Option<CatalogVolume>, ReadingServiceError> {
        if let Some(msg) = &self.fail_with {
            return Err(ReadingServiceError::GoogleBooksApi(msg.clone()));
        }
        Ok(self
            .volumes
            .iter()
            .find(|v| v.google_book_id == google_book_id)
            .cloned())
    }
}
