use async_trait::async_trait;
use auth::CredentialStore;
use auth::StoreError;
use auth::User;
use auth::UserId;
use auth::Username;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, StoreError> {
        let username = Username::new(self.username)
            .map_err(|e| StoreError::Unavailable(format!("Corrupt username in store: {}", e)))?;

        Ok(User {
            id: UserId(self.id),
            username,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(UserRow::into_user)
        .transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(UserRow::into_user)
        .transpose()
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
                {
                    return StoreError::UsernameTaken(user.username.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
