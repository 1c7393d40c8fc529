use super::{Base, ColumnDef, Entity, EntityDef};
use serde::{Deserialize, Serialize};

static DEF: EntityDef = EntityDef {
    table: "cities",
    path: "cities",
    label: "city",
    columns: &[
        ColumnDef::text("name").required().length(1, 128),
        ColumnDef::text("country_id").required().references("countries"),
    ],
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub base: Base,
    pub name: String,
    pub country_id: String,
}

impl Entity for City {
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
