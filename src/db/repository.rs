//! SQLite-backed account repository for chirp.

use async_trait::async_trait;
use sqlx::{QueryBuilder, SqlitePool};
use uuid::Uuid;

use super::account::{Account, AccountUpdate, NewAccount};
use super::store::{AccountStore, StoreError};

/// Repository for account CRUD operations.
#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new AccountRepository with the given database pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_err(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
        _ => StoreError::Database(e.to_string()),
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        // Email lookups are case-sensitive, as stored.
        let result = sqlx::query_as::<_, Account>(
            "SELECT id, full_name, email, password, profile_pic, created_at
             FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;

        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, StoreError> {
        let result = sqlx::query_as::<_, Account>(
            "SELECT id, full_name, email, password, profile_pic, created_at
             FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;

        Ok(result)
    }

    async fn insert(&self, new_account: &NewAccount) -> Result<Account, StoreError> {
        sqlx::query(
            "INSERT INTO accounts (id, full_name, email, password)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&new_account.id)
        .bind(&new_account.full_name)
        .bind(&new_account.email)
        .bind(&new_account.password)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;

        self.find_by_id(&new_account.id)
            .await?
            .ok_or_else(|| StoreError::Database("inserted account not found".to_string()))
    }

    async fn update(
        &self,
        id: &str,
        update: &AccountUpdate,
    ) -> Result<Option<Account>, StoreError> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE accounts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref full_name) = update.full_name {
            separated.push("full_name = ");
            separated.push_bind_unseparated(full_name);
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email);
        }
        if let Some(ref profile_pic) = update.profile_pic {
            separated.push("profile_pic = ");
            separated.push_bind_unseparated(profile_pic);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(&self.pool).await.map_err(map_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}

/// Generate a fresh account identifier.
pub fn new_account_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_store() -> AccountRepository {
        let db = Database::connect_in_memory()
            .await
            .expect("in-memory database");
        AccountRepository::new(db.pool().clone())
    }

    fn sample_account(email: &str) -> NewAccount {
        NewAccount {
            id: new_account_id(),
            full_name: "Test User".to_string(),
            email: email.to_string(),
            password: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = test_store().await;
        let new_account = sample_account("a@example.com");

        let account = store.insert(&new_account).await.unwrap();
        assert_eq!(account.id, new_account.id);
        assert_eq!(account.email, "a@example.com");
        assert_eq!(account.profile_pic, "");
        assert!(!account.created_at.is_empty());

        let by_email = store.find_by_email("a@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, account.id);

        let by_id = store.find_by_id(&account.id).await.unwrap();
        assert_eq!(by_id.unwrap().email, "a@example.com");
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = test_store().await;
        store.insert(&sample_account("Ada@example.com")).await.unwrap();

        assert!(store
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_email("Ada@example.com")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflict() {
        let store = test_store().await;
        store.insert(&sample_account("dup@example.com")).await.unwrap();

        let err = store
            .insert(&sample_account("dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[tokio::test]
    async fn test_partial_update() {
        let store = test_store().await;
        let account = store.insert(&sample_account("u@example.com")).await.unwrap();

        let update = AccountUpdate::new().with_full_name("Renamed");
        let updated = store.update(&account.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.full_name, "Renamed");
        // Untouched fields are preserved
        assert_eq!(updated.email, "u@example.com");
        assert_eq!(updated.profile_pic, "");
        assert_eq!(updated.password, account.password);
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let store = test_store().await;
        let update = AccountUpdate::new().with_full_name("Nobody");
        let result = store.update("no-such-id", &update).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_update_returns_current() {
        let store = test_store().await;
        let account = store.insert(&sample_account("e@example.com")).await.unwrap();

        let result = store
            .update(&account.id, &AccountUpdate::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.full_name, account.full_name);
    }
}
