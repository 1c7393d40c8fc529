use super::{Base, ColumnDef, Entity, EntityDef};
use crate::error::AppError;
use crate::password::hash_password;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static DEF: EntityDef = EntityDef {
    table: "users",
    path: "users",
    label: "user",
    columns: &[
        ColumnDef::text("first_name").required().length(1, 50),
        ColumnDef::text("last_name").required().length(1, 50),
        ColumnDef::text("email").required().email().max_length(120).unique(),
        // Length applies to the plaintext; the stored value is an Argon2 hash.
        ColumnDef::text("password").required().length(6, 128).sensitive(),
    ],
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: Base,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl Entity for User {
    fn def() -> &'static EntityDef {
        &DEF
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn prepare(fields: &mut Map<String, Value>) -> Result<(), AppError> {
        if let Some(Value::String(plain)) = fields.get("password") {
            let hashed = hash_password(plain)?;
            fields.insert("password".into(), Value::String(hashed));
        }
        Ok(())
    }
}
