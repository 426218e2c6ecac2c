use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email, validate_max_length, validate_phone, validate_required_text, Validate,
};
use serde::{Deserialize, Serialize};

pub const MAX_NOMBRE_LEN: usize = 100;
pub const MAX_APELLIDO_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 150;
pub const MAX_TELEFONO_LEN: usize = 20;
pub const MAX_DIRECCION_LEN: usize = 255;

/// 已儲存的聯絡人
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
}

/// 可寫入的欄位，也是送往遠端的同步內容 (不含 id)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaInput {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl PersonaInput {
    pub fn normalized(self) -> Self {
        Self {
            nombre: self.nombre.trim().to_string(),
            apellido: self.apellido.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            telefono: blank_to_none(self.telefono),
            direccion: blank_to_none(self.direccion),
        }
    }
}

impl Validate for PersonaInput {
    fn validate(&self) -> Result<()> {
        validate_required_text("nombre", "nombre", &self.nombre, MAX_NOMBRE_LEN)?;
        validate_required_text("apellido", "apellido", &self.apellido, MAX_APELLIDO_LEN)?;
        validate_required_text("email", "email", &self.email, MAX_EMAIL_LEN)?;
        validate_email("email", &self.email)?;

        if let Some(telefono) = &self.telefono {
            validate_max_length("telefono", "teléfono", telefono, MAX_TELEFONO_LEN)?;
            validate_phone("telefono", telefono)?;
        }
        if let Some(direccion) = &self.direccion {
            validate_max_length("direccion", "dirección", direccion, MAX_DIRECCION_LEN)?;
        }
        Ok(())
    }
}

impl Persona {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }

    /// 取出可同步的資料
    pub fn to_input(&self) -> PersonaInput {
        PersonaInput {
            nombre: self.nombre.clone(),
            apellido: self.apellido.clone(),
            email: self.email.clone(),
            telefono: self.telefono.clone(),
            direccion: self.direccion.clone(),
        }
    }
}
