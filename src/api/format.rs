//! Legacy wire shapes for the downstream consumer.
//!
//! Documents come out of the store with canonical (CSV header) field names;
//! everything here is mechanical projection into the fixed legacy alias set.
//! Renaming is done per-field on the structured record, never by substring
//! substitution on serialized text.

use serde_json::{json, Map, Value};

/// Canonical-to-legacy field pairs for patient demographics.
const PATIENT_LEGACY_FIELDS: &[(&str, &str)] = &[
    ("address", "CA_ADDRESS"),
    ("city", "CA_CITY"),
    ("birthdate", "CA_DOB"),
    ("first_name", "CA_FIRST_NAME"),
    ("gender", "CA_GENDER"),
    ("last_name", "CA_LAST_NAME"),
    ("postcode", "CA_POSTCODE"),
    ("user_id", "CA_USERID"),
    ("patient_id", "PATIENTID"),
];

/// Key renames applied to prescription documents; unlisted keys pass through.
const PRESCRIPTION_RENAMES: &[(&str, &str)] = &[
    ("drug_name", "CA_DRUG_NAME"),
    ("patient_id", "PATIENT"),
    ("medication_id", "CA_MEDICATION_ID"),
    ("reason", "REASONDESCRIPTION"),
];

/// Storage bookkeeping fields that must never reach clients.
const STORAGE_METADATA_FIELDS: &[&str] = &["_id", "_rev"];

/// Request id constant carried by the nested legacy envelopes.
const LEGACY_REQUEST_ID: &str = "01IPAT";

/// Department label attached to every appointment row.
const DEPARTMENT_LABEL: &str = "GENERAL PRACTICE";

fn field(doc: &Value, name: &str) -> Value {
    doc.get(name).cloned().unwrap_or(Value::Null)
}

/// Remap a patient document into the legacy demographic object.
pub fn patient_legacy(doc: &Value) -> Value {
    let mut out = Map::new();
    for (source, legacy) in PATIENT_LEGACY_FIELDS {
        out.insert((*legacy).to_string(), field(doc, source));
    }
    Value::Object(out)
}

/// Flat result-set envelope shared by login, appointments and observations.
pub fn result_set(items: Vec<Value>) -> Value {
    json!({ "ResultSet Output": items })
}

/// Nested envelope for the patient-info endpoint.
///
/// `CA_RETURN_CODE` is always 0 here: an empty query result is answered with
/// 404 before shaping, so the code-1 branch of the legacy contract never
/// fires. The field stays because the downstream consumer expects it.
pub fn patient_info_envelope(patient: &Value) -> Value {
    json!({
        "HCCMAREA": {
            "CA_REQUEST_ID": LEGACY_REQUEST_ID,
            "CA_RETURN_CODE": 0,
            "CA_PATIENT_ID": field(patient, "patient_id"),
            "CA_PATIENT_REQUEST": patient_legacy(patient),
        }
    })
}

/// Rename prescription keys field-by-field and drop storage metadata.
pub fn prescription_legacy(doc: &Value) -> Value {
    let Some(doc) = doc.as_object() else {
        return doc.clone();
    };
    let mut out = Map::new();
    for (key, value) in doc {
        if STORAGE_METADATA_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let legacy = PRESCRIPTION_RENAMES
            .iter()
            .find(|(source, _)| source == key)
            .map(|(_, legacy)| (*legacy).to_string());
        out.insert(legacy.unwrap_or_else(|| key.clone()), value.clone());
    }
    Value::Object(out)
}

/// Nested envelope for the prescription endpoint.
pub fn prescription_envelope(patient_id: &str, docs: &[Value]) -> Value {
    let medications: Vec<Value> = docs.iter().map(prescription_legacy).collect();
    json!({
        "GETMEDO": {
            "CA_REQUEST_ID": LEGACY_REQUEST_ID,
            "CA_RETURN_CODE": 0,
            "CA_PATIENT_ID": patient_id,
            "CA_LIST_MEDICATION_REQUEST": {
                "CA_MEDICATIONS": medications,
            }
        }
    })
}

/// Project an appointment down to date and time; everything else is
/// discarded and the constant department label attached.
pub fn appointment_legacy(doc: &Value) -> Value {
    json!({
        "APPT_DATE": field(doc, "date"),
        "APPT_TIME": field(doc, "time"),
        "MED_FIELD": DEPARTMENT_LABEL,
    })
}

/// Project an observation. The numeric and character value fields are
/// mutually exclusive in the source data; each is included only when
/// non-empty, so a record never carries both and may carry neither.
pub fn observation_legacy(patient_id: &str, doc: &Value) -> Value {
    let mut out = Map::new();
    out.insert("CODE".to_string(), field(doc, "code"));
    out.insert("DATEOFOBSERVATION".to_string(), field(doc, "date"));
    out.insert("DESCRIPTION".to_string(), field(doc, "description"));
    out.insert("PATIENT".to_string(), Value::String(patient_id.to_string()));
    out.insert("UNITS".to_string(), field(doc, "units"));
    out.insert("id".to_string(), field(doc, "id"));
    if let Some(value) = non_empty(doc, "numeric_value") {
        out.insert("NUMERICVALUE".to_string(), value);
    }
    if let Some(value) = non_empty(doc, "character_value") {
        out.insert("CHARACTERVALUE".to_string(), value);
    }
    Value::Object(out)
}

fn non_empty(doc: &Value, name: &str) -> Option<Value> {
    match doc.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value.clone()),
    }
}
