//! WebAssembly bindings
//!
//! JavaScript-friendly wrappers around aggregate rendering and record
//! validation.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { countSql, describeObject, validateRecord } from 'sfbackend';
//!
//! await init();
//!
//! countSql('*', false);            // { success: true, sql: "COUNT()" }
//! countSql('Industry', true);      // { success: true, sql: "COUNT(DISTINCT Industry)" }
//!
//! describeObject('Lead').fields;   // [{ name: "Id", ... }, ...]
//!
//! validateRecord('Account', { Name: 'Acme', Industry: 'Mining' });
//! // { success: false,
//! //   errors: [{ field: "Industry", message: "'Mining' is not a valid choice" }] }
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::standard_schema;
use crate::sql::aggregates::Count;
use crate::sql::schema::SObjectDescribe;

/// Helper to serialize values as plain JS objects (not Maps)
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Render a COUNT aggregate
///
/// Returns `{ success, sql }` or `{ success: false, error }`.
#[wasm_bindgen(js_name = countSql)]
pub fn count_sql(column: &str, distinct: bool) -> JsValue {
    match Count::new(column).distinct(distinct).as_sql() {
        Ok(sql) => to_js_value(&serde_json::json!({ "success": true, "sql": sql })),
        Err(e) => to_js_value(&serde_json::json!({ "success": false, "error": e.to_string() })),
    }
}

/// Describe a bundled object, or `null` when it is unknown
#[wasm_bindgen(js_name = describeObject)]
pub fn describe_object(name: &str) -> JsValue {
    let schema = standard_schema();
    match schema.get_object(name) {
        Some(object) => to_js_value(&describe_json(object)),
        None => JsValue::NULL,
    }
}

/// Validate a record (plain JS object keyed by field API name)
#[wasm_bindgen(js_name = validateRecord)]
pub fn validate_record(object_name: &str, record: JsValue) -> Result<JsValue, JsValue> {
    let schema = standard_schema();
    let object = schema
        .get_object(object_name)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown object: {}", object_name)))?;

    let record: serde_json::Value = serde_wasm_bindgen::from_value(record)
        .map_err(|e| JsValue::from_str(&format!("Invalid record: {}", e)))?;
    let Some(fields) = record.as_object() else {
        return Err(JsValue::from_str("Record must be an object"));
    };

    let result = match object.validate_record(fields) {
        Ok(()) => serde_json::json!({ "success": true, "errors": [] }),
        Err(err) => {
            let errors: Vec<_> = err
                .errors
                .iter()
                .map(|e| serde_json::json!({ "field": e.field, "message": e.kind.to_string() }))
                .collect();
            serde_json::json!({ "success": false, "errors": errors })
        }
    };
    Ok(to_js_value(&result))
}

fn describe_json(object: &SObjectDescribe) -> serde_json::Value {
    let fields: Vec<_> = object
        .fields()
        .map(|f| {
            serde_json::json!({
                "name": f.name,
                "type": f.field_type.as_str(),
                "maxLength": f.max_length,
                "primaryKey": f.primary_key,
                "nillable": f.nillable,
                "picklistValues": f.picklist_values,
            })
        })
        .collect();
    serde_json::json!({
        "name": object.name,
        "label": object.label,
        "managed": object.managed,
        "fields": fields,
    })
}
