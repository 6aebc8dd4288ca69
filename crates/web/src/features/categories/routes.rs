use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_category, get_category, list_categories};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/categorias/", get(list_categories).post(create_category))
        .route("/categorias/:id", get(get_category))
}
