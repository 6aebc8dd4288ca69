use axum::{
    Router,
    routing::{get, patch, post},
};
use storage::Database;

use super::handlers::{
    create_athlete, delete_athlete, list_athletes, query_athletes, update_athlete,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/atletas/", post(create_athlete).get(query_athletes))
        .route("/atletas/get_all", get(list_athletes))
        .route("/atletas/:id", patch(update_athlete).delete(delete_athlete))
}
