use super::{Base, ColumnDef, Entity, EntityDef};
use serde::{Deserialize, Serialize};

static DEF: EntityDef = EntityDef {
    table: "places",
    path: "places",
    label: "place",
    columns: &[
        ColumnDef::text("name").required().length(1, 128),
        ColumnDef::text("description").nullable().max_length(1024),
        ColumnDef::text("address").nullable().max_length(256),
        ColumnDef::text("city_id").required().references("cities"),
        ColumnDef::text("host_id").required().references("users"),
        ColumnDef::integer("number_of_rooms").minimum(0.0),
        ColumnDef::integer("number_of_bathrooms").minimum(0.0),
        ColumnDef::integer("max_guests").minimum(0.0),
        ColumnDef::real("price_per_night").minimum(0.0),
        ColumnDef::real("latitude").nullable().range(-90.0, 90.0),
        ColumnDef::real("longitude").nullable().range(-180.0, 180.0),
    ],
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    pub base: Base,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub city_id: String,
    pub host_id: String,
    #[serde(default)]
    pub number_of_rooms: i64,
    #[serde(default)]
    pub number_of_bathrooms: i64,
    #[serde(default)]
    pub max_guests: i64,
    #[serde(default)]
    pub price_per_night: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Entity for Place {
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
