pub mod user {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use sqlx::PgPool;
    use tokio::sync::RwLock;

    use crate::{
        domain::{
            entity::{User, UserId},
            service::UserService,
            validation::Validated,
        },
        error::{persistence::PersistenceError, resource::NotFoundError},
        infra::database::repository,
    };

    #[derive(Debug, Default)]
    struct Store {
        last_id: UserId,
        users: BTreeMap<UserId, User>,
    }

    /// Process-local user storage, ordered by id.
    #[derive(Debug, Default)]
    pub struct InMemoryUserService {
        store: RwLock<Store>,
    }

    impl InMemoryUserService {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl UserService for InMemoryUserService {
        async fn find_all(&self) -> Result<Vec<User>, PersistenceError> {
            Ok(self.store.read().await.users.values().cloned().collect())
        }

        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PersistenceError> {
            Ok(self.store.read().await.users.get(&id).cloned())
        }

        async fn insert_by_user(&self, user: Validated<User>) -> Result<User, PersistenceError> {
            let mut store = self.store.write().await;
            store.last_id += 1;
            let id = store.last_id;
            let user = user.into_inner().with_id(id);
            store.users.insert(id, user.clone());
            Ok(user)
        }

        async fn update(&self, user: Validated<User>) -> Result<User, PersistenceError> {
            let user = user.into_inner();
            let id = user.id.ok_or(PersistenceError::MissingIdentity)?;

            let mut store = self.store.write().await;
            let stored = store
                .users
                .get_mut(&id)
                .ok_or_else(|| NotFoundError::from_resource::<User>(id))?;
            *stored = user.clone();

            Ok(user)
        }

        async fn delete(&self, id: UserId) -> Result<(), PersistenceError> {
            self.store.write().await.users.remove(&id);
            Ok(())
        }
    }

    /// Users stored in the `directory.user` PostgreSQL table.
    #[derive(Debug, Clone)]
    pub struct PgUserService {
        pool: PgPool,
    }

    impl PgUserService {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl UserService for PgUserService {
        async fn find_all(&self) -> Result<Vec<User>, PersistenceError> {
            repository::find_users(&self.pool).await
        }

        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PersistenceError> {
            repository::find_user(&self.pool, id).await
        }

        async fn insert_by_user(&self, user: Validated<User>) -> Result<User, PersistenceError> {
            let user = user.into_inner();
            let id = repository::insert_user(&self.pool, &user).await?;
            Ok(user.with_id(id))
        }

        async fn update(&self, user: Validated<User>) -> Result<User, PersistenceError> {
            let user = user.into_inner();
            let id = user.id.ok_or(PersistenceError::MissingIdentity)?;

            if !repository::update_user(&self.pool, id, &user).await? {
                return Err(NotFoundError::from_resource::<User>(id).into());
            }

            Ok(user)
        }

        async fn delete(&self, id: UserId) -> Result<(), PersistenceError> {
            repository::delete_user(&self.pool, id).await
        }
    }

    #[cfg(test)]
    mod tests {
        use pretty_assertions::assert_eq;

        use super::*;
        use crate::domain::validation::{rules, validate, BindingResult};

        fn valid(user: User) -> Validated<User> {
            validate(BindingResult::new(user), rules::user()).expect("Expect a valid user")
        }

        #[tokio::test]
        async fn insert_assigns_increasing_ids() {
            let service = InMemoryUserService::new();

            let ana = service
                .insert_by_user(valid(User::new("ana", 30, "1994-03-01")))
                .await
                .unwrap();
            let bruno = service
                .insert_by_user(valid(User::new("bruno", 41, "1983-10-12")))
                .await
                .unwrap();

            assert_eq!(ana.id, Some(1));
            assert_eq!(bruno.id, Some(2));
            assert_eq!(service.find_all().await.unwrap(), vec![ana, bruno.clone()]);
            assert_eq!(service.find_by_id(2).await.unwrap(), Some(bruno));
            assert_eq!(service.find_by_id(3).await.unwrap(), None);
        }

        #[tokio::test]
        async fn update_replaces_stored_user() {
            let service = InMemoryUserService::new();
            let ana = service
                .insert_by_user(valid(User::new("ana", 30, "1994-03-01")))
                .await
                .unwrap();

            let changed = User::new("anabel", 31, "1994-03-01").with_id(1);
            service.update(valid(changed.clone())).await.unwrap();

            assert_ne!(service.find_by_id(1).await.unwrap(), Some(ana));
            assert_eq!(service.find_by_id(1).await.unwrap(), Some(changed));
        }

        #[tokio::test]
        async fn update_of_unknown_id_is_not_found() {
            let service = InMemoryUserService::new();

            let err = service
                .update(valid(User::new("ana", 30, "1994-03-01").with_id(4)))
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                PersistenceError::NotFound(NotFoundError { resource_id: 4, .. })
            ));
        }

        #[tokio::test]
        async fn update_without_identity_is_rejected() {
            let service = InMemoryUserService::new();

            let err = service
                .update(valid(User::new("ana", 30, "1994-03-01")))
                .await
                .unwrap_err();

            assert!(matches!(err, PersistenceError::MissingIdentity));
        }

        #[tokio::test]
        async fn delete_is_idempotent() {
            let service = InMemoryUserService::new();
            service
                .insert_by_user(valid(User::new("ana", 30, "1994-03-01")))
                .await
                .unwrap();

            service.delete(1).await.unwrap();
            service.delete(1).await.unwrap();

            assert!(service.find_all().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn ids_are_not_reused_after_delete() {
            let service = InMemoryUserService::new();
            service
                .insert_by_user(valid(User::new("ana", 30, "1994-03-01")))
                .await
                .unwrap();
            service.delete(1).await.unwrap();

            let bruno = service
                .insert_by_user(valid(User::new("bruno", 41, "1983-10-12")))
                .await
                .unwrap();

            assert_eq!(bruno.id, Some(2));
        }
    }
}
