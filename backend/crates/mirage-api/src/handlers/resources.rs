//! Top-level resource endpoints: counts, indexed finders, and id fetches.

use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use log::debug;
use serde_json::json;

use mirage_commons::Selector;

use crate::handlers::{collect_records, not_found, store_failure};
use crate::serializer::object_record;
use crate::state::AppState;

/// `GET /{resource}` — with no query parameters, the object count; with
/// exactly one `?property=value` pair naming an indexed property, the list of
/// matches (possibly empty). Anything else is 404.
pub async fn index(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let segment = path.into_inner();
    let Some(resource) = state.resource(&segment) else {
        return not_found();
    };

    match query.len() {
        0 => match state.store().count(resource.name()).await {
            Ok(count) => HttpResponse::Ok().json(json!({ "count": count })),
            Err(err) => store_failure(err),
        },
        1 => {
            let (property, value) = query.iter().next().unwrap_or((&segment, &segment));
            let indexed = resource
                .indexed_properties()
                .any(|p| p.name() == property.as_str());
            if !indexed {
                debug!("query on non-indexed property {segment}.{property}");
                return not_found();
            }
            match state.store().find_by(resource.name(), property, value).await {
                Ok(objects) => {
                    let records: Vec<_> = objects
                        .iter()
                        .map(|object| object_record(object, resource))
                        .collect();
                    HttpResponse::Ok().json(records)
                }
                Err(err) => store_failure(err),
            }
        }
        _ => not_found(),
    }
}

/// `GET /{resource}/{idspec}` — selector-addressed fetch. A single id
/// answers with the object or 404; a range or list answers 200 with the
/// surviving records in request order, misses dropped.
pub async fn fetch(state: web::Data<AppState>, path: web::Path<(String, String)>) -> HttpResponse {
    let (segment, idspec) = path.into_inner();
    let Some(resource) = state.resource(&segment) else {
        return not_found();
    };
    let Ok(selector) = idspec.parse::<Selector>() else {
        debug!("malformed id selector '{idspec}' for {segment}");
        return not_found();
    };

    match selector {
        Selector::Single(id) => match state.store().get(resource.name(), id).await {
            Ok(Some(object)) => HttpResponse::Ok().json(object_record(&object, resource)),
            Ok(None) => not_found(),
            Err(err) => store_failure(err),
        },
        batch => match collect_records(&state, resource, &batch).await {
            Ok(records) => HttpResponse::Ok().json(records),
            Err(err) => store_failure(err),
        },
    }
}
