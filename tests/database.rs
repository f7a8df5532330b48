use std::sync::Arc;

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serial_test::serial;
use sqlx::PgPool;
use user_crud::{
    config::env_var,
    domain::{
        entity::User,
        service::UserService,
        validation::{rules, validate, BindingResult, Validated},
    },
    infra::{database::connection, service::user::PgUserService},
};

use crate::setup::{create_client, spawn_with};

mod setup;

/// Fresh `directory` schema, or `None` when no database is configured.
async fn setup_database() -> Option<PgPool> {
    dotenv::dotenv().ok();
    let database = env_var::load().ok()?.database?;

    let pool = connection::create_sqlx_pool(&database).await.unwrap();
    sqlx::query("DROP SCHEMA IF EXISTS directory CASCADE")
        .execute(&pool)
        .await
        .unwrap();
    connection::apply_schema(&pool).await.unwrap();

    Some(pool)
}

fn user(name: &str, age: i32, birthday: &str) -> User {
    User {
        id: None,
        name: name.into(),
        age: Some(age),
        birthday: birthday.into(),
    }
}

fn valid(user: User) -> Validated<User> {
    validate(BindingResult::new(user), rules::user()).unwrap()
}

#[tokio::test]
#[serial]
async fn stores_updates_and_deletes_users() {
    let Some(pool) = setup_database().await else {
        eprintln!("skipping, DATABASE_HOST is not configured");
        return;
    };
    let service = PgUserService::new(pool);

    let ana = service
        .insert_by_user(valid(user("ana", 30, "1994-03-01")))
        .await
        .unwrap();
    let id = ana.id.unwrap();
    assert_eq!(service.find_all().await.unwrap(), vec![ana]);

    let changed = user("anabel", 31, "1994-03-01").with_id(id);
    service.update(valid(changed.clone())).await.unwrap();
    assert_eq!(service.find_by_id(id).await.unwrap(), Some(changed));

    service.delete(id).await.unwrap();
    service.delete(id).await.unwrap();
    assert_eq!(service.find_by_id(id).await.unwrap(), None);
    assert!(service
        .update(valid(user("ana", 30, "1994-03-01").with_id(id)))
        .await
        .is_err());
}

#[tokio::test]
#[serial]
async fn create_form_persists_through_http() {
    let Some(pool) = setup_database().await else {
        eprintln!("skipping, DATABASE_HOST is not configured");
        return;
    };
    let service = Arc::new(PgUserService::new(pool));
    let base = spawn_with(service.clone()).await;
    let client = create_client();

    let res = client
        .post(base.join("/users/create").unwrap())
        .form(&[("name", "ana"), ("age", "30"), ("birthday", "1994-03-01")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    let users = service.find_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "ana");
    assert_eq!(users[0].age, Some(30));
}
