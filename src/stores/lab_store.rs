use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::LabError;
use crate::types::db::lab::{self, ActiveModel, Entity as Lab};
use crate::types::internal::decimal_to_f64;

/// LabStore manages lab rows and their discount override
pub struct LabStore {}

impl LabStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        lab_id: &str,
    ) -> Result<Option<lab::Model>, InternalError> {
        Lab::find_by_id(lab_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_lab_by_id", e))
    }

    /// Like `find_by_id` but a missing lab is an error
    pub async fn get(
        &self,
        conn: &impl ConnectionTrait,
        lab_id: &str,
    ) -> Result<lab::Model, InternalError> {
        self.find_by_id(conn, lab_id)
            .await?
            .ok_or_else(|| LabError::NotFound(lab_id.to_string()).into())
    }

    pub async fn find_by_code(
        &self,
        conn: &impl ConnectionTrait,
        code: &str,
    ) -> Result<Option<lab::Model>, InternalError> {
        Lab::find()
            .filter(lab::Column::Code.eq(code))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_lab_by_code", e))
    }

    /// Create a lab
    ///
    /// # Arguments
    /// * `code` - Unique short code
    /// * `name` - Display name
    /// * `discount_rate` - Optional override; callers validate the 0-100 range
    ///
    /// # Returns
    /// * `Err(InternalError)` - `DuplicateCode` if the code is taken
    pub async fn insert_lab(
        &self,
        conn: &impl ConnectionTrait,
        code: &str,
        name: &str,
        discount_rate: Option<Decimal>,
    ) -> Result<lab::Model, InternalError> {
        if self.find_by_code(conn, code).await?.is_some() {
            return Err(LabError::DuplicateCode(code.to_string()).into());
        }

        let now = Utc::now().timestamp();
        let new_lab = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            discount_rate: Set(discount_rate.map(decimal_to_f64)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_lab
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_lab", e))?;

        tracing::info!(lab_id = %model.id, code = %model.code, "Lab created");
        Ok(model)
    }

    /// Set or clear the lab override; `None` defers to the global settings
    pub async fn set_discount_rate(
        &self,
        conn: &impl ConnectionTrait,
        lab_id: &str,
        discount_rate: Option<Decimal>,
    ) -> Result<lab::Model, InternalError> {
        let existing = self.get(conn, lab_id).await?;

        let mut active: ActiveModel = existing.into();
        active.discount_rate = Set(discount_rate.map(decimal_to_f64));
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_lab_discount_rate", e))
    }
}

impl Default for LabStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    #[tokio::test]
    async fn test_insert_and_get_lab() {
        let db = setup_test_db().await;
        let store = LabStore::new();

        let created = store
            .insert_lab(&db, "LAB-A", "Central Lab", Some(Decimal::from(20)))
            .await
            .unwrap();
        let loaded = store.get(&db, &created.id).await.unwrap();

        assert_eq!(loaded.code, "LAB-A");
        assert_eq!(loaded.discount_rate, Some(20.0));
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected() {
        let db = setup_test_db().await;
        let store = LabStore::new();
        store.insert_lab(&db, "LAB-A", "One", None).await.unwrap();

        let result = store.insert_lab(&db, "LAB-A", "Two", None).await;
        assert!(matches!(result, Err(InternalError::Lab(LabError::DuplicateCode(_)))));
    }

    #[tokio::test]
    async fn test_get_missing_lab_is_not_found() {
        let db = setup_test_db().await;
        let result = LabStore::new().get(&db, "nope").await;
        assert!(matches!(result, Err(InternalError::Lab(LabError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_set_and_clear_discount_rate() {
        let db = setup_test_db().await;
        let store = LabStore::new();
        let created = store.insert_lab(&db, "LAB-A", "Central", None).await.unwrap();

        let updated = store
            .set_discount_rate(&db, &created.id, Some(Decimal::new(125, 1)))
            .await
            .unwrap();
        assert_eq!(updated.discount_rate, Some(12.5));

        let cleared = store.set_discount_rate(&db, &created.id, None).await.unwrap();
        assert_eq!(cleared.discount_rate, None);
        assert_eq!(store.get(&db, &created.id).await.unwrap().discount_rate, None);
    }
}
