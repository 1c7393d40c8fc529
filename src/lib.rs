//! HBnB API: CRUD REST backend for users, places, reviews, amenities, countries and cities.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod password;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use app::build_app;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Amenity, Base, City, Country, Entity, Place, Review, User};
pub use routes::{common_routes, entity_routes};
pub use service::{CrudService, DataManager};
pub use settings::{Environment, Settings};
pub use state::AppState;
pub use store::{connect, connect_url};
