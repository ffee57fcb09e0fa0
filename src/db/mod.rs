pub mod sqlite;

pub use sqlite::{create_pool, FavoriteRef, Repository};
