pub mod service;

pub use crate::domain::model::{Persona, PersonaInput};
pub use crate::domain::ports::{ConfigProvider, PersonaRepository, PersonaSync};
pub use crate::utils::error::Result;
pub use service::PersonaService;
