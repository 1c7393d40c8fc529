//! Entity models. Each entity embeds [`Base`] and exposes a static [`EntityDef`].

mod amenity;
mod base;
mod city;
mod country;
mod definition;
mod place;
mod review;
mod user;

pub use amenity::Amenity;
pub use base::Base;
pub use city::City;
pub use country::Country;
pub use definition::*;
pub use place::Place;
pub use review::Review;
pub use user::User;

use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn def() -> &'static EntityDef;

    fn base(&self) -> &Base;

    fn base_mut(&mut self) -> &mut Base;

    fn id(&self) -> &str {
        self.base().id()
    }

    /// Rewrite incoming field values before they are stored.
    fn prepare(_fields: &mut Map<String, Value>) -> Result<(), AppError> {
        Ok(())
    }

    /// Serialized form for responses, without sensitive columns.
    fn to_response(&self) -> Result<Value, AppError> {
        let mut value = serde_json::to_value(self).map_err(|e| AppError::Internal(e.to_string()))?;
        if let Value::Object(map) = &mut value {
            for col in Self::def().sensitive_columns() {
                map.remove(col);
            }
        }
        Ok(value)
    }
}

/// Every entity, in dependency order (referenced tables first).
pub fn all_definitions() -> [&'static EntityDef; 6] {
    [
        User::def(),
        Country::def(),
        City::def(),
        Amenity::def(),
        Place::def(),
        Review::def(),
    ]
}
