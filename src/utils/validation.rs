use crate::utils::error::{AgendaError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// ---- 設定欄位驗證 ----

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AgendaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AgendaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AgendaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AgendaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AgendaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AgendaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AgendaError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AgendaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AgendaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

// ---- 資料欄位驗證 (訊息直接顯示給使用者) ----

pub fn validate_required_text(field_name: &str, label: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AgendaError::validation(
            field_name,
            format!("El campo {} es obligatorio", label),
        ));
    }
    validate_max_length(field_name, label, value, max_len)
}

pub fn validate_max_length(field_name: &str, label: &str, value: &str, max_len: usize) -> Result<()> {
    if value.chars().count() > max_len {
        return Err(AgendaError::validation(
            field_name,
            format!("El campo {} no puede superar {} caracteres", label, max_len),
        ));
    }
    Ok(())
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9+()\- ]+$").expect("phone pattern is a valid regex"))
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if !email_regex().is_match(value) {
        return Err(AgendaError::validation(
            field_name,
            "El email no tiene un formato válido",
        ));
    }
    Ok(())
}

pub fn validate_phone(field_name: &str, value: &str) -> Result<()> {
    if !phone_regex().is_match(value) {
        return Err(AgendaError::validation(
            field_name,
            "El teléfono solo puede contener dígitos, espacios y los caracteres + - ( )",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("sync.base_url", "https://example.com").is_ok());
        assert!(validate_url("sync.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("sync.base_url", "").is_err());
        assert!(validate_url("sync.base_url", "invalid-url").is_err());
        assert!(validate_url("sync.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("database.pool_size", 5, 1).is_ok());
        assert!(validate_positive_number("database.pool_size", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("sync.timeout_seconds", 10, 1, 300).is_ok());
        assert!(validate_range("sync.timeout_seconds", 0, 1, 300).is_err());
        assert!(validate_range("sync.timeout_seconds", 301, 1, 300).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "ana@example.com").is_ok());
        assert!(validate_email("email", "ana.perez+agenda@mail.example.org").is_ok());
        assert!(validate_email("email", "ana").is_err());
        assert!(validate_email("email", "ana@example").is_err());
        assert!(validate_email("email", "ana @example.com").is_err());
        assert!(validate_email("email", "a@b@c.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("telefono", "+34 (91) 555-1234").is_ok());
        assert!(validate_phone("telefono", "555 123").is_ok());
        assert!(validate_phone("telefono", "call me").is_err());
    }

    #[test]
    fn test_validate_required_text_counts_chars() {
        assert!(validate_required_text("nombre", "nombre", "   ", 10).is_err());
        // 10 個字元，不是 10 個位元組
        assert!(validate_required_text("nombre", "nombre", "ññññññññññ", 10).is_ok());
        assert!(validate_required_text("nombre", "nombre", "ñññññññññññ", 10).is_err());
    }
}
