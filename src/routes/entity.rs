//! Entity CRUD routes: one collection per entity plus the nested child collections.

use crate::handlers::{country_cities, create, delete, list, place_reviews, read, update};
use crate::model::{Amenity, City, Country, Entity, Place, Review, User};
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET/POST /<path> and GET/PUT/DELETE /<path>/:id for one entity.
fn crud_routes<E: Entity>(router: Router<AppState>) -> Router<AppState> {
    let path = E::def().path;
    router
        .route(&format!("/{}", path), get(list::<E>).post(create::<E>))
        .route(
            &format!("/{}/:id", path),
            get(read::<E>).put(update::<E>).delete(delete::<E>),
        )
}

pub fn entity_routes(state: AppState) -> Router {
    let router = Router::new();
    let router = crud_routes::<User>(router);
    let router = crud_routes::<Country>(router);
    let router = crud_routes::<City>(router);
    let router = crud_routes::<Amenity>(router);
    let router = crud_routes::<Place>(router);
    let router = crud_routes::<Review>(router);
    router
        .route("/countries/:id/cities", get(country_cities))
        .route("/places/:id/reviews", get(place_reviews))
        .with_state(state)
}
