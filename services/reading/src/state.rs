use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbActionPlanRepository, DbBookRepository, DbLikeRepository, DbMentalModelRepository,
    DbUserRepository,
};
use crate::infra::google_books::GoogleBooksClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub catalog: GoogleBooksClient,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn book_repo(&self) -> DbBookRepository {
        DbBookRepository {
            db: self.db.clone(),
        }
    }

    pub fn mental_model_repo(&self) -> DbMentalModelRepository {
        DbMentalModelRepository {
            db: self.db.clone(),
        }
    }

    pub fn like_repo(&self) -> DbLikeRepository {
        DbLikeRepository {
            db: self.db.clone(),
        }
    }

    pub fn action_plan_repo(&self) -> DbActionPlanRepository {
        DbActionPlanRepository {
            db: self.db.clone(),
        }
    }
}
