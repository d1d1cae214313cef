//! Wire record construction.
//!
//! A single object always serializes to the same shape: its identity, every
//! declared field verbatim, singular associations as `{id,type}` stubs or
//! null, and plural associations reduced to `{count}` — elements are never
//! inlined.

use serde_json::{json, Map, Value};

use mirage_commons::ResourceMetadata;

use crate::store::StoredObject;

/// Build the wire record for one stored object of the given resource type.
pub fn object_record(object: &StoredObject, resource: &ResourceMetadata) -> Value {
    let mut record = Map::new();
    record.insert("id".to_string(), json!(object.id));
    record.insert("type".to_string(), json!(resource.name()));

    for field in resource.fields() {
        let value = object.fields.get(field.name()).cloned().unwrap_or(Value::Null);
        record.insert(field.name().to_string(), value);
    }

    for association in resource.singular_associations() {
        let value = match object.has_one.get(association.name()) {
            Some(Some(stub)) => json!(stub),
            _ => Value::Null,
        };
        record.insert(association.name().to_string(), value);
    }

    for association in resource.plural_associations() {
        let count = object
            .has_many
            .get(association.name())
            .map_or(0, |stubs| stubs.len() as u64);
        record.insert(association.name().to_string(), json!({ "count": count }));
    }

    Value::Object(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoredObject;
    use mirage_commons::ObjectStub;

    fn car_metadata() -> ResourceMetadata {
        ResourceMetadata::new(
            "Car",
            &json!({
                "fields": [{"name": "brand", "index": true}],
                "has_one": [{"name": "owner"}],
                "has_many": [{"name": "drivers"}],
            }),
        )
        .unwrap()
    }

    #[test]
    fn serializes_all_declared_properties() {
        let object = StoredObject::new(1)
            .with_field("brand", json!("Mercedes 300"))
            .with_one("owner", Some(ObjectStub::new(1, "Person")))
            .with_many(
                "drivers",
                vec![ObjectStub::new(1, "Person"), ObjectStub::new(2, "Person")],
            );
        let record = object_record(&object, &car_metadata());
        assert_eq!(
            record,
            json!({
                "id": 1,
                "type": "Car",
                "brand": "Mercedes 300",
                "owner": {"id": 1, "type": "Person"},
                "drivers": {"count": 2},
            })
        );
    }

    #[test]
    fn absent_values_serialize_as_null_and_zero() {
        let record = object_record(&StoredObject::new(4), &car_metadata());
        assert_eq!(
            record,
            json!({
                "id": 4,
                "type": "Car",
                "brand": null,
                "owner": null,
                "drivers": {"count": 0},
            })
        );
    }
}
