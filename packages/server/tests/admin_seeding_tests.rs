//! Default-admin bootstrap: runs once on an empty user table, then never
//! again.

mod common;

use test_context::test_context;

use classtrack_core::config::Config;
use classtrack_core::data_migrations::seed_default_admin;
use classtrack_core::domains::users::machines::{Role, Status};
use classtrack_core::persistence::EntityKind;

use common::{fixtures, TestHarness};

fn test_config() -> Config {
    Config {
        database_url: String::new(), // unused by seeding
        admin_email: "admin@classtrack.local".to_string(),
        admin_password: "hashed-secret".to_string(),
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn seeds_a_confirmed_admin_on_empty_database(ctx: &TestHarness) {
    let id = seed_default_admin(&ctx.db_pool, &test_config())
        .await
        .unwrap()
        .expect("expected a seeded admin");

    let admin = ctx
        .lookup()
        .get_by_id(EntityKind::User, id)
        .await
        .unwrap()
        .unwrap()
        .into_user()
        .unwrap();
    assert_eq!(admin.email.unwrap().as_str(), "admin@classtrack.local");
    assert_eq!(admin.status, Status::Confirmed);
    assert_eq!(admin.role, Role::Admin);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn seeding_twice_is_idempotent(ctx: &TestHarness) {
    let config = test_config();
    assert!(seed_default_admin(&ctx.db_pool, &config)
        .await
        .unwrap()
        .is_some());
    assert!(seed_default_admin(&ctx.db_pool, &config)
        .await
        .unwrap()
        .is_none());
    assert_eq!(ctx.lookup().count_of_kind(EntityKind::User).await.unwrap(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn existing_users_suppress_the_bootstrap(ctx: &TestHarness) {
    fixtures::create_user(&ctx.db_pool, "ada@example.org")
        .await
        .unwrap();
    assert!(seed_default_admin(&ctx.db_pool, &test_config())
        .await
        .unwrap()
        .is_none());
}
