pub mod accounts;
pub mod director;
pub mod identification;
pub mod providers;
pub mod recommendations;
pub mod title_search;

pub use identification::MovieIdentifier;
pub use providers::{MovieProvider, OmdbProvider};
