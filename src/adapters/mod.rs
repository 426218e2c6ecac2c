// Adapters layer: concrete implementations for external systems (storage, http).

pub mod http;
pub mod storage;

pub use http::{build_sync_client, NoopSync, RemoteAgendaClient};
pub use storage::{initialize_pool, SqlitePersonaRepository};
