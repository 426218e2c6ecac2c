use super::{with_connection, SqlitePool};
use crate::domain::model::{Persona, PersonaInput};
use crate::domain::ports::PersonaRepository;
use crate::utils::error::{AgendaError, Result};
use async_trait::async_trait;
use rusqlite::{params, ErrorCode, OptionalExtension, Row};

const SELECT_COLUMNS: &str = "SELECT id, nombre, apellido, email, telefono, direccion FROM personas";

#[derive(Clone)]
pub struct SqlitePersonaRepository {
    pool: SqlitePool,
}

impl SqlitePersonaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_persona(row: &Row<'_>) -> rusqlite::Result<Persona> {
    Ok(Persona {
        id: row.get("id")?,
        nombre: row.get("nombre")?,
        apellido: row.get("apellido")?,
        email: row.get("email")?,
        telefono: row.get("telefono")?,
        direccion: row.get("direccion")?,
    })
}

/// UNIQUE(email) 衝突轉成領域錯誤，其餘照原樣往上拋
fn map_write_error(err: rusqlite::Error, email: &str) -> AgendaError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation => {
            AgendaError::DuplicateEmail {
                email: email.to_string(),
            }
        }
        _ => AgendaError::DatabaseError(err),
    }
}

#[async_trait]
impl PersonaRepository for SqlitePersonaRepository {
    async fn insert(&self, input: &PersonaInput) -> Result<Persona> {
        let data = input.clone();
        with_connection(&self.pool, move |conn| {
            conn.execute(
                "INSERT INTO personas (nombre, apellido, email, telefono, direccion)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![data.nombre, data.apellido, data.email, data.telefono, data.direccion],
            )
            .map_err(|e| map_write_error(e, &data.email))?;

            let id = conn.last_insert_rowid();
            tracing::debug!("Inserted persona {} ({})", id, data.email);

            Ok(Persona {
                id,
                nombre: data.nombre,
                apellido: data.apellido,
                email: data.email,
                telefono: data.telefono,
                direccion: data.direccion,
            })
        })
        .await
    }

    async fn update(&self, id: i64, input: &PersonaInput) -> Result<Option<Persona>> {
        let data = input.clone();
        with_connection(&self.pool, move |conn| {
            let changed = conn
                .execute(
                    "UPDATE personas
                     SET nombre = ?1, apellido = ?2, email = ?3, telefono = ?4, direccion = ?5
                     WHERE id = ?6",
                    params![
                        data.nombre,
                        data.apellido,
                        data.email,
                        data.telefono,
                        data.direccion,
                        id
                    ],
                )
                .map_err(|e| map_write_error(e, &data.email))?;

            if changed == 0 {
                return Ok(None);
            }

            Ok(Some(Persona {
                id,
                nombre: data.nombre,
                apellido: data.apellido,
                email: data.email,
                telefono: data.telefono,
                direccion: data.direccion,
            }))
        })
        .await
    }

    async fn find_all(&self, skip: usize, limit: usize) -> Result<Vec<Persona>> {
        // SQLite 把負的 OFFSET 當成 0，超出範圍要飽和而不是繞回
        let skip = i64::try_from(skip).unwrap_or(i64::MAX);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        with_connection(&self.pool, move |conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id LIMIT ?1 OFFSET ?2"))?;
            let personas = stmt
                .query_map(params![limit, skip], row_to_persona)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(personas)
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Persona>> {
        with_connection(&self.pool, move |conn| {
            let persona = conn
                .query_row(
                    &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                    params![id],
                    row_to_persona,
                )
                .optional()?;
            Ok(persona)
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Persona>> {
        let email = email.to_string();
        with_connection(&self.pool, move |conn| {
            let persona = conn
                .query_row(
                    &format!("{SELECT_COLUMNS} WHERE email = ?1"),
                    params![email],
                    row_to_persona,
                )
                .optional()?;
            Ok(persona)
        })
        .await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let email = email.to_string();
        with_connection(&self.pool, move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM personas WHERE email = ?1)",
                params![email],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        with_connection(&self.pool, move |conn| {
            let removed = conn.execute("DELETE FROM personas WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
    }

    async fn count(&self) -> Result<usize> {
        with_connection(&self.pool, |conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM personas", [], |row| row.get(0))?;
            Ok(count as usize)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{initialize_pool, MEMORY_DATABASE};

    fn repository() -> SqlitePersonaRepository {
        SqlitePersonaRepository::new(initialize_pool(MEMORY_DATABASE, 1).unwrap())
    }

    fn input(nombre: &str, email: &str) -> PersonaInput {
        PersonaInput {
            nombre: nombre.to_string(),
            apellido: "Pérez".to_string(),
            email: email.to_string(),
            telefono: None,
            direccion: Some("Calle Mayor 1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repository();
        let stored = repo.insert(&input("Ana", "ana@example.com")).await.unwrap();
        assert!(stored.id > 0);

        let by_id = repo.find_by_id(stored.id).await.unwrap();
        assert_eq!(by_id, Some(stored.clone()));

        let by_email = repo.find_by_email("ana@example.com").await.unwrap();
        assert_eq!(by_email, Some(stored));

        assert!(repo.exists_by_email("ana@example.com").await.unwrap());
        assert!(!repo.exists_by_email("otro@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_duplicate_email_is_domain_error() {
        let repo = repository();
        repo.insert(&input("Ana", "ana@example.com")).await.unwrap();

        let result = repo.insert(&input("Otra Ana", "ana@example.com")).await;
        assert!(matches!(result, Err(AgendaError::DuplicateEmail { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_all_paginates_in_id_order() {
        let repo = repository();
        for i in 1..=5 {
            repo.insert(&input(&format!("P{}", i), &format!("p{}@example.com", i)))
                .await
                .unwrap();
        }

        let page = repo.find_all(1, 2).await.unwrap();
        let names: Vec<&str> = page.iter().map(|p| p.nombre.as_str()).collect();
        assert_eq!(names, vec!["P2", "P3"]);

        let rest = repo.find_all(4, 100).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert!(repo.find_all(10, 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_with_huge_offsets() {
        let repo = repository();
        for i in 1..=3 {
            repo.insert(&input(&format!("P{}", i), &format!("p{}@example.com", i)))
                .await
                .unwrap();
        }

        assert!(repo.find_all(usize::MAX, 10).await.unwrap().is_empty());
        assert!(repo.find_all(usize::MAX, usize::MAX).await.unwrap().is_empty());
        assert_eq!(repo.find_all(0, usize::MAX).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let repo = repository();
        let stored = repo.insert(&input("Ana", "ana@example.com")).await.unwrap();

        let mut changes = input("Ana María", "anamaria@example.com");
        changes.direccion = None;
        changes.telefono = Some("600123456".to_string());

        let updated = repo.update(stored.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.nombre, "Ana María");
        assert_eq!(updated.direccion, None);

        let reloaded = repo.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded, updated);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let repo = repository();
        let result = repo.update(42, &input("Nadie", "nadie@example.com")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_domain_error() {
        let repo = repository();
        repo.insert(&input("Ana", "ana@example.com")).await.unwrap();
        let luis = repo.insert(&input("Luis", "luis@example.com")).await.unwrap();

        let result = repo.update(luis.id, &input("Luis", "ana@example.com")).await;
        assert!(matches!(result, Err(AgendaError::DuplicateEmail { .. })));
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = repository();
        let stored = repo.insert(&input("Ana", "ana@example.com")).await.unwrap();

        assert!(repo.delete_by_id(stored.id).await.unwrap());
        assert!(!repo.delete_by_id(stored.id).await.unwrap());
        assert!(repo.find_by_id(stored.id).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
