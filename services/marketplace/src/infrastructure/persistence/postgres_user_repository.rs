//! PostgreSQL 用户 Repository 实现

use async_trait::async_trait;
use sharebnb_adapter_postgres::{QueryTimer, map_sqlx_error};
use sharebnb_errors::AppResult;
use sqlx::PgPool;
use tracing::debug;

use crate::domain::repositories::UserRepository;
use crate::domain::user::{NewUser, User, UserCredentials};
use crate::domain::value_objects::HashedPassword;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_credentials(&self, username: &str) -> AppResult<Option<UserCredentials>> {
        let timer = QueryTimer::new("users", "select_credentials");
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT username, password, first_name, last_name, email, phone, image_url
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;

        Ok(timer
            .observe(row)
            .map_err(map_sqlx_error)?
            .map(CredentialsRow::into_credentials))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let timer = QueryTimer::new("users", "select_by_username");
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, first_name, last_name, email, phone, image_url
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;

        Ok(timer.observe(row).map_err(map_sqlx_error)?.map(User::from))
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let timer = QueryTimer::new("users", "exists_by_username");
        let result: Result<(bool,), sqlx::Error> =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await;

        Ok(timer.observe(result).map_err(map_sqlx_error)?.0)
    }

    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let timer = QueryTimer::new("users", "insert");
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password, first_name, last_name, email, phone, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING username, first_name, last_name, email, phone, image_url
            "#,
        )
        .bind(&user.username)
        .bind(user.password_hash.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.image_url)
        .fetch_one(&self.pool)
        .await;

        Ok(timer.observe(row).map_err(map_sqlx_error)?.into())
    }

    async fn update_image_url(&self, username: &str, image_url: &str) -> AppResult<()> {
        let timer = QueryTimer::new("users", "update_image_url");
        let result = sqlx::query("UPDATE users SET image_url = $1 WHERE username = $2")
            .bind(image_url)
            .bind(username)
            .execute(&self.pool)
            .await;

        let result = timer.observe(result).map_err(map_sqlx_error)?;
        debug!(rows_affected = result.rows_affected(), "User image url updated");

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    image_url: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            image_url: row.image_url,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password: String,
}

impl CredentialsRow {
    fn into_credentials(self) -> UserCredentials {
        UserCredentials {
            user: self.user.into(),
            password_hash: HashedPassword::from_hash(self.password),
        }
    }
}
