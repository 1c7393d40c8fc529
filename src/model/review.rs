use super::{Base, ColumnDef, Entity, EntityDef};
use serde::{Deserialize, Serialize};

static DEF: EntityDef = EntityDef {
    table: "reviews",
    path: "reviews",
    label: "review",
    columns: &[
        ColumnDef::text("place_id").required().references("places"),
        ColumnDef::text("user_id").required().references("users"),
        ColumnDef::integer("rating").required().range(1.0, 5.0),
        ColumnDef::text("comment").required().length(1, 1024),
    ],
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub base: Base,
    pub place_id: String,
    pub user_id: String,
    pub rating: i64,
    pub comment: String,
}

impl Entity for Review {
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
