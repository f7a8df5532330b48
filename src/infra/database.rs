pub mod connection {
    use std::time::Duration;

    use sqlx::{postgres::PgPoolOptions, PgPool};

    use crate::{config::env_var::DatabaseEnv, error::persistence::PersistenceError};

    const SCHEMA: &str = include_str!("../../dbschema.sql");

    pub async fn create_sqlx_pool(env: &DatabaseEnv) -> Result<PgPool, PersistenceError> {
        let options = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .acquire_timeout(Duration::from_millis(1000))
            .idle_timeout(Duration::from_millis(1000 * 30))
            .max_lifetime(Duration::from_millis(1000 * 10));

        #[cfg(feature = "connect_db_on_start")]
        let pool = options.connect(&env.url()).await?;
        #[cfg(not(feature = "connect_db_on_start"))]
        let pool = options.connect_lazy(&env.url())?;

        Ok(pool)
    }

    /// Creates the user table when missing.
    pub async fn apply_schema(pool: &PgPool) -> Result<(), PersistenceError> {
        let mut trx = pool.begin().await?;
        for sttm in SCHEMA.split(';').filter(|sttm| !sttm.trim().is_empty()) {
            sqlx::query(sttm).execute(&mut trx).await?;
        }
        trx.commit().await?;
        Ok(())
    }
}

mod row {
    use sqlx::{postgres::PgRow, FromRow, Row};

    use crate::domain::entity::User;

    impl<'r> FromRow<'r, PgRow> for User {
        fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                age: row.try_get("age")?,
                birthday: row.try_get("birthday")?,
            })
        }
    }
}

pub mod repository {
    use futures::TryStreamExt;
    use sqlx::PgPool;

    use crate::{
        domain::entity::{User, UserId},
        error::persistence::PersistenceError,
    };

    pub async fn find_users(pool: &PgPool) -> Result<Vec<User>, PersistenceError> {
        let mut rows = sqlx::query_as::<_, User>(
            "SELECT id, name, age, birthday FROM directory.user ORDER BY id",
        )
        .fetch(pool);

        let mut users = Vec::new();
        while let Some(user) = rows.try_next().await? {
            users.push(user);
        }

        Ok(users)
    }

    pub async fn find_user(pool: &PgPool, id: UserId) -> Result<Option<User>, PersistenceError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, age, birthday FROM directory.user WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Inserts `user` and returns the id assigned by the database.
    pub async fn insert_user(pool: &PgPool, user: &User) -> Result<UserId, PersistenceError> {
        let id = sqlx::query_scalar::<_, UserId>(concat!(
            "INSERT INTO directory.user (name, age, birthday) ",
            "VALUES ($1, $2, $3) RETURNING id",
        ))
        .bind(user.name.as_str())
        .bind(user.age)
        .bind(user.birthday.as_str())
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Returns whether a row with the user id was updated.
    pub async fn update_user(
        pool: &PgPool,
        id: UserId,
        user: &User,
    ) -> Result<bool, PersistenceError> {
        let result = sqlx::query(
            "UPDATE directory.user SET name = $2, age = $3, birthday = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(user.name.as_str())
        .bind(user.age)
        .bind(user.birthday.as_str())
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_user(pool: &PgPool, id: UserId) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM directory.user WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
