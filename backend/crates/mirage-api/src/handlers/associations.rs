//! Plural association endpoints: counts and element fetches.

use actix_web::{web, HttpResponse};
use log::debug;
use serde_json::{json, Value};

use mirage_commons::{ObjectStub, ResourceMetadata, Selector};

use crate::handlers::{not_found, store_failure};
use crate::serializer::object_record;
use crate::state::AppState;
use crate::store::StoreError;

/// Checks shared by both association endpoints: the association must be
/// declared plural on the resource and the owner must exist.
async fn checked_owner<'a>(
    state: &'a AppState,
    segment: &str,
    id: &str,
    association: &str,
) -> Result<Option<(&'a ResourceMetadata, u64)>, StoreError> {
    let Some(resource) = state.resource(segment) else {
        return Ok(None);
    };
    if resource.plural(association).is_none() {
        debug!("{segment}.{association} is not a declared plural association");
        return Ok(None);
    }
    let Ok(id) = id.parse::<u64>() else {
        return Ok(None);
    };
    if state.store().get(resource.name(), id).await?.is_none() {
        return Ok(None);
    }
    Ok(Some((resource, id)))
}

/// Resolve one association element stub into its full record.
async fn element_record(
    state: &AppState,
    resource: &ResourceMetadata,
    owner_id: u64,
    association: &str,
    index: u64,
) -> Result<Option<Value>, StoreError> {
    let stub = state
        .store()
        .association_stub(resource.name(), owner_id, association, index)
        .await?;
    let Some(ObjectStub { id, kind }) = stub else {
        return Ok(None);
    };
    let Some(target) = state.resource_by_name(&kind) else {
        debug!("association element points at unknown resource type {kind}");
        return Ok(None);
    };
    let Some(object) = state.store().get(&kind, id).await? else {
        return Ok(None);
    };
    Ok(Some(object_record(&object, target)))
}

/// `GET /{resource}/{id}/{association}` — the association's current length
/// as `{count}`.
pub async fn count(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> HttpResponse {
    let (segment, id, association) = path.into_inner();
    let owner = match checked_owner(&state, &segment, &id, &association).await {
        Ok(owner) => owner,
        Err(err) => return store_failure(err),
    };
    let Some((resource, id)) = owner else {
        return not_found();
    };
    match state.store().association_len(resource.name(), id, &association).await {
        Ok(Some(count)) => HttpResponse::Ok().json(json!({ "count": count })),
        Ok(None) => not_found(),
        Err(err) => store_failure(err),
    }
}

/// `GET /{resource}/{id}/{association}/{idxspec}` — selector-addressed
/// element fetch within the association, with the same single/batch split as
/// top-level id fetches.
pub async fn fetch(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String, String)>,
) -> HttpResponse {
    let (segment, id, association, idxspec) = path.into_inner();
    let owner = match checked_owner(&state, &segment, &id, &association).await {
        Ok(owner) => owner,
        Err(err) => return store_failure(err),
    };
    let Some((resource, id)) = owner else {
        return not_found();
    };
    let Ok(selector) = idxspec.parse::<Selector>() else {
        debug!("malformed index selector '{idxspec}' for {segment}.{association}");
        return not_found();
    };

    if let Selector::Single(index) = selector {
        return match element_record(&state, resource, id, &association, index).await {
            Ok(Some(record)) => HttpResponse::Ok().json(record),
            Ok(None) => not_found(),
            Err(err) => store_failure(err),
        };
    }

    let mut records = Vec::new();
    for index in selector.indices() {
        match element_record(&state, resource, id, &association, index).await {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {} // batch misses are dropped, never a batch-wide 404
            Err(err) => return store_failure(err),
        }
    }
    HttpResponse::Ok().json(records)
}
