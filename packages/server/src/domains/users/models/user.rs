//! User model.
//!
//! Status and role are state-machine values: they enter the struct through
//! `transition_to` (or reconstruction from a stored tag), never by literal
//! assignment from callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::errors::PersistenceError;
use crate::common::time::{from_millis, to_millis};
use crate::common::Email;
use crate::domains::users::machines::{Role, Status};
use crate::persistence::entity::{EntityKind, Persistable, Serializable};
use crate::persistence::fields::{FieldReader, FieldWriter};

/// A user account. Password hashing and token minting happen outside the
/// persistence core; the columns here carry whatever the auth layer hands
/// over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// Identity assigned by the entity factory; 0 until then.
    pub id: i64,
    pub name: Option<String>,
    pub github_username: Option<String>,
    pub email: Option<Email>,
    pub status: Status,
    pub password: Option<String>,
    pub reset_password_token: Option<String>,
    pub reset_password_expire: Option<DateTime<Utc>>,
    pub confirm_email_token: Option<String>,
    pub confirm_email_expire: Option<DateTime<Utc>>,
    pub role: Role,
}

impl User {
    /// Move the account to `target` status through the transition table.
    pub fn advance_status(&mut self, target: Status) -> Result<(), PersistenceError> {
        self.status = self.status.transition_to(target)?;
        Ok(())
    }

    /// Change the account role through the transition table.
    pub fn change_role(&mut self, target: Role) -> Result<(), PersistenceError> {
        self.role = self.role.transition_to(target)?;
        Ok(())
    }
}

impl Serializable for User {
    fn populate(&mut self, reader: &dyn FieldReader) -> Result<(), PersistenceError> {
        self.id = reader.read_number("id")?;
        self.name = reader.read_opt_string("name")?;
        self.github_username = reader.read_opt_string("githubUsername")?;
        self.email = reader
            .read_opt_string("email")?
            .map(|raw| Email::new(&raw))
            .transpose()?;
        self.status = Status::parse(&reader.read_string("status")?)?;
        self.password = reader.read_opt_string("password")?;
        self.reset_password_token = reader.read_opt_string("resetPasswordToken")?;
        self.reset_password_expire = reader
            .read_opt_number("resetPasswordExpire")?
            .map(|m| from_millis("resetPasswordExpire", m))
            .transpose()?;
        self.confirm_email_token = reader.read_opt_string("confirmEmailToken")?;
        self.confirm_email_expire = reader
            .read_opt_number("confirmEmailExpire")?
            .map(|m| from_millis("confirmEmailExpire", m))
            .transpose()?;
        self.role = Role::parse(&reader.read_string("userRole")?)?;
        Ok(())
    }

    fn emit(&self, writer: &mut dyn FieldWriter) {
        writer.write_number("id", self.id);
        writer.write_opt_string("name", self.name.as_deref());
        writer.write_opt_string("githubUsername", self.github_username.as_deref());
        writer.write_opt_string("email", self.email.as_ref().map(Email::as_str));
        writer.write_string("status", self.status.as_str());
        writer.write_opt_string("password", self.password.as_deref());
        writer.write_opt_string("resetPasswordToken", self.reset_password_token.as_deref());
        writer.write_opt_number("resetPasswordExpire", self.reset_password_expire.map(to_millis));
        writer.write_opt_string("confirmEmailToken", self.confirm_email_token.as_deref());
        writer.write_opt_number("confirmEmailExpire", self.confirm_email_expire.map(to_millis));
        writer.write_string("userRole", self.role.as_str());
    }
}

impl Persistable for User {
    fn kind(&self) -> EntityKind {
        EntityKind::User
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
