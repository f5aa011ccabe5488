
mod action_plan_test;
mod auth_test;
mod book_test;
mod catalog_test;
mod like_test;
mod mental_model_test;
