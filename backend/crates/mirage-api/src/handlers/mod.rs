//! Request handlers for the generated endpoint set.

pub mod associations;
pub mod metadata;
pub mod resources;

use actix_web::HttpResponse;
use serde_json::Value;

use mirage_commons::{ResourceMetadata, Selector};

use crate::serializer::object_record;
use crate::state::AppState;
use crate::store::StoreError;

/// Every negative answer looks the same: 404 with a JSON `null` body.
pub(crate) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(Value::Null)
}

pub(crate) fn store_failure(err: StoreError) -> HttpResponse {
    log::error!("graph store failure: {err}");
    HttpResponse::InternalServerError().json(Value::Null)
}

/// Fetch the records for a batch of ids, silently dropping misses and
/// preserving request order.
pub(crate) async fn collect_records(
    state: &AppState,
    resource: &ResourceMetadata,
    selector: &Selector,
) -> Result<Vec<Value>, StoreError> {
    let mut records = Vec::new();
    for id in selector.indices() {
        if let Some(object) = state.store().get(resource.name(), id).await? {
            records.push(object_record(&object, resource));
        }
    }
    Ok(records)
}
