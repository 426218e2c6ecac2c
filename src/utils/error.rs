use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template rendering error: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Background task failed: {message}")]
    TaskError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Persona {id} not found")]
    NotFound { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Conflict,
    NotFound,
    Storage,
    Network,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AgendaError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AgendaError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AgendaError::ConfigError { .. }
            | AgendaError::ConfigValidationError { .. }
            | AgendaError::InvalidConfigValueError { .. }
            | AgendaError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AgendaError::ValidationError { .. } => ErrorCategory::Validation,
            AgendaError::DuplicateEmail { .. } => ErrorCategory::Conflict,
            AgendaError::NotFound { .. } => ErrorCategory::NotFound,
            AgendaError::DatabaseError(_) | AgendaError::PoolError(_) | AgendaError::IoError(_) => {
                ErrorCategory::Storage
            }
            AgendaError::HttpError(_) => ErrorCategory::Network,
            AgendaError::SerializationError(_)
            | AgendaError::TemplateError(_)
            | AgendaError::TaskError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Conflict | ErrorCategory::NotFound => {
                ErrorSeverity::Low
            }
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Internal => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息 (網頁與 API 回應)
    pub fn user_friendly_message(&self) -> String {
        match self {
            AgendaError::ValidationError { message, .. } => message.clone(),
            AgendaError::DuplicateEmail { .. } => "El email ya está registrado".to_string(),
            AgendaError::NotFound { .. } => "Persona no encontrada".to_string(),
            AgendaError::ConfigError { message } => format!("Configuración inválida: {}", message),
            AgendaError::ConfigValidationError { field, message } => {
                format!("Configuración inválida en '{}': {}", field, message)
            }
            AgendaError::InvalidConfigValueError { field, reason, .. } => {
                format!("Valor inválido para '{}': {}", field, reason)
            }
            AgendaError::MissingConfigError { field } => {
                format!("Falta la configuración requerida '{}'", field)
            }
            AgendaError::DatabaseError(_) | AgendaError::PoolError(_) => {
                "Error de base de datos".to_string()
            }
            AgendaError::HttpError(_) => "Error de comunicación con el servicio remoto".to_string(),
            _ => "Error interno del servidor".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the configuration file, environment variables and command line flags"
            }
            ErrorCategory::Validation => "Correct the highlighted field and submit again",
            ErrorCategory::Conflict => "Use a different email address or edit the existing contact",
            ErrorCategory::NotFound => "Refresh the contact list; the record may have been deleted",
            ErrorCategory::Storage => {
                "Verify the database path is writable and the file is not locked by another process"
            }
            ErrorCategory::Network => "Verify the remote service URL and that it is reachable",
            ErrorCategory::Internal => "Retry the request; if it keeps failing, check the server logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, AgendaError>;
