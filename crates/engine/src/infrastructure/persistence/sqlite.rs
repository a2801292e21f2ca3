//! SQLite-backed creature storage.
//!
//! One row per creature holding the JSON document. Partial updates are a
//! single `UPDATE` that folds every touched path into the stored document with
//! `json_set`, so untouched fields are never rewritten.

use std::sync::Arc;

use async_trait::async_trait;
use creature_domain::{Creature, CreatureName, CreatureUpdate, FieldUpdate};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{ClockPort, CreatureRepo, RepoError};

/// SQLite implementation of the creature document store.
pub struct SqliteCreatureRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCreatureRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS creatures (
                name TEXT PRIMARY KEY NOT NULL,
                document TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_schema", e))?;

        Ok(Self { pool, clock })
    }
}

/// JSON text for the value written at a field's path.
fn field_json(field: &FieldUpdate) -> Result<String, serde_json::Error> {
    match field {
        FieldUpdate::Level { value } => serde_json::to_string(value),
        FieldUpdate::ProficiencyBonus { value }
        | FieldUpdate::HitPoints { value }
        | FieldUpdate::ArmorClass { value }
        | FieldUpdate::PassivePerception { value } => serde_json::to_string(value),
        FieldUpdate::Ability { slot, .. } => serde_json::to_string(slot),
        FieldUpdate::Skill { entry, .. } => serde_json::to_string(entry),
        FieldUpdate::SavingThrow { save } => serde_json::to_string(save),
    }
}

/// Build the document expression and its numbered parameters.
///
/// Saving throws are stored as a JSON array, so they are appended only when
/// absent instead of being set by key.
fn document_expression(update: &CreatureUpdate) -> Result<(String, Vec<String>), RepoError> {
    let mut expr = String::from("document");
    let mut params: Vec<String> = Vec::with_capacity(update.len() * 2);

    for field in update {
        match field {
            FieldUpdate::SavingThrow { save } => {
                params.push(save.as_str().to_string());
                let save_param = params.len();
                expr = format!(
                    "CASE WHEN EXISTS (SELECT 1 FROM json_each({expr}, '$.saving_throws') \
                     WHERE json_each.value = ?{save_param}) THEN {expr} \
                     ELSE json_insert({expr}, '$.saving_throws[#]', ?{save_param}) END"
                );
            }
            _ => {
                params.push(format!("$.{}", field.path()));
                params.push(field_json(field).map_err(RepoError::serialization)?);
                let value_param = params.len();
                expr = format!(
                    "json_set({expr}, ?{}, json(?{value_param}))",
                    value_param - 1
                );
            }
        }
    }

    Ok((expr, params))
}

#[async_trait]
impl CreatureRepo for SqliteCreatureRepo {
    async fn get(&self, name: &CreatureName) -> Result<Option<Creature>, RepoError> {
        let row = sqlx::query("SELECT document FROM creatures WHERE name = ?")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_creature", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("document");
                let creature = serde_json::from_str(&json)
                    .map_err(|e| RepoError::Serialization(e.to_string()))?;
                Ok(Some(creature))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, creature: &Creature) -> Result<bool, RepoError> {
        let json =
            serde_json::to_string(creature).map_err(|e| RepoError::Serialization(e.to_string()))?;
        let now = self.clock.now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO creatures (name, document, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(creature.name().as_str())
        .bind(json)
        .bind(now.clone())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_creature", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn apply_update(
        &self,
        name: &CreatureName,
        update: &CreatureUpdate,
    ) -> Result<(), RepoError> {
        let (expr, params) = document_expression(update)?;
        let now_param = params.len() + 1;
        let name_param = params.len() + 2;
        let sql = format!(
            "UPDATE creatures SET document = {expr}, updated_at = ?{now_param} \
             WHERE name = ?{name_param}"
        );

        let mut query = sqlx::query(&sql);
        for param in &params {
            query = query.bind(param.as_str());
        }
        let result = query
            .bind(self.clock.now().to_rfc3339())
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("update_creature", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Creature", name));
        }
        Ok(())
    }

    async fn delete(&self, name: &CreatureName) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM creatures WHERE name = ?")
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_creature", e))?;
        Ok(result.rows_affected() > 0)
    }
}
