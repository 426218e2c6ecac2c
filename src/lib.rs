pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{create_router, serve, AppState};
pub use config::AppConfig;
pub use core::{Persona, PersonaInput, PersonaService};
pub use utils::error::{AgendaError, Result};
