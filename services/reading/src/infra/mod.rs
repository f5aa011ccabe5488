pub mod db;
pub mod google_books;
