//! Storage infrastructure - embedded SQLite database and its migrations

pub mod migrations;
mod sqlite;

pub use migrations::{run_migrations, storage_migrations, Migration, SqliteMigrator};
pub use sqlite::{connect, connect_in_memory, SqliteConfig};
