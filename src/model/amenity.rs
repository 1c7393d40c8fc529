use super::{Base, ColumnDef, Entity, EntityDef};
use serde::{Deserialize, Serialize};

static DEF: EntityDef = EntityDef {
    table: "amenities",
    path: "amenities",
    label: "amenity",
    columns: &[ColumnDef::text("name").required().length(1, 128).unique()],
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(flatten)]
    pub base: Base,
    pub name: String,
}

impl Entity for Amenity {
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
