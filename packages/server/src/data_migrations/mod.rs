//! One-time data seeding run at startup.

use anyhow::{anyhow, Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::common::Email;
use crate::config::Config;
use crate::domains::users::machines::{Role, Status};
use crate::persistence::{Entity, EntityFactory, EntityKind, Lookup, RootWriter};

/// Seed the default admin account on first start.
///
/// Gated by `count_of_kind(User) == 0`, so re-running is a no-op and two
/// racing bootstraps fall back to the unique email constraint. Returns the
/// admin's id when a user was created. The password arrives pre-hashed from
/// the auth layer's config; hashing is not this crate's concern.
pub async fn seed_default_admin(pool: &SqlitePool, config: &Config) -> Result<Option<i64>> {
    let lookup = Lookup::new(pool.clone());
    if lookup.count_of_kind(EntityKind::User).await? > 0 {
        return Ok(None);
    }

    let factory = EntityFactory::new(pool.clone());
    let entity = factory.create(EntityKind::User).await?;
    let mut admin = entity
        .into_user()
        .ok_or_else(|| anyhow!("factory returned a non-user for kind User"))?;

    admin.name = Some("Administrator".to_string());
    admin.email = Some(Email::new(&config.admin_email).context("ADMIN_EMAIL is not valid")?);
    admin.password = Some(config.admin_password.clone());
    admin.advance_status(Status::Confirmed)?;
    admin.change_role(Role::Admin)?;

    let id = admin.id;
    RootWriter::new(pool.clone())
        .write_root(&Entity::User(admin))
        .await?;

    info!(id, "seeded default admin account");
    Ok(Some(id))
}
