use super::{Base, ColumnDef, Entity, EntityDef};
use serde::{Deserialize, Serialize};

static DEF: EntityDef = EntityDef {
    table: "countries",
    path: "countries",
    label: "country",
    columns: &[
        ColumnDef::text("name").required().length(1, 128),
        ColumnDef::text("code").required().pattern("^[A-Z]{2}$").unique(),
    ],
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Country {
    #[serde(flatten)]
    pub base: Base,
    pub name: String,
    /// Two-letter upper-case code, e.g. `FR`.
    pub code: String,
}

impl Entity for Country {
    fn def() -> &'static EntityDef {
        &DEF
    }

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }
}
