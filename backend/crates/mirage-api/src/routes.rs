//! Route configuration.
//!
//! The endpoint set is uniform across resources, so the routes themselves are
//! parameterized and the per-resource knowledge lives in the
//! [`AppState`](crate::state::AppState) dispatch table. `/metadata` is
//! registered first; the segment is reserved and never resolves as a
//! resource name.

use actix_web::web;

use mirage_commons::METADATA_PATH;

use crate::handlers;

/// Configure the full endpoint set:
/// - `GET /metadata`
/// - `GET /{resource}`
/// - `GET /{resource}/{idspec}`
/// - `GET /{resource}/{id}/{association}`
/// - `GET /{resource}/{id}/{association}/{idxspec}`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(METADATA_PATH, web::get().to(handlers::metadata::serve))
        .route("/{resource}", web::get().to(handlers::resources::index))
        .route("/{resource}/{idspec}", web::get().to(handlers::resources::fetch))
        .route(
            "/{resource}/{id}/{association}",
            web::get().to(handlers::associations::count),
        )
        .route(
            "/{resource}/{id}/{association}/{idxspec}",
            web::get().to(handlers::associations::fetch),
        );
}
