//! The fixed schema description endpoint.

use actix_web::{web, HttpResponse};

use crate::state::AppState;

/// `GET /metadata` — serve the dumped schema description. Independent of the
/// resource endpoints; this is what lazily-configured clients bootstrap from.
pub async fn serve(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.metadata().to_value())
}
