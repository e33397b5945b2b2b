//! Study tracker for SAT topics: a fixed subject/topic/subtopic catalog that
//! users can extend, with a rating and a note kept per topic path.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod store;
pub mod tui;

pub use catalog::{topic_path, Catalog, Subject};
pub use error::StoreError;
pub use session::Session;
pub use store::{DataFile, StudyDocument, StudyStore};
