//! Source (hospital system) order schema.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One requested lab test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Required per element.
    #[serde(rename = "id_test")]
    pub test_id: Option<String>,

    #[serde(rename = "nama_test", skip_serializing_if = "Option::is_none")]
    pub test_name: Option<String>,
}

/// Referring clinician and facility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralDetail {
    /// Required per element.
    #[serde(rename = "id_dokter")]
    pub doctor_id: Option<String>,

    /// Required per element.
    #[serde(rename = "nama_dokter")]
    pub doctor_name: Option<String>,

    #[serde(rename = "phone_dokter", skip_serializing_if = "Option::is_none")]
    pub doctor_phone: Option<String>,

    #[serde(rename = "nik_dokter", skip_serializing_if = "Option::is_none")]
    pub doctor_national_id: Option<String>,

    #[serde(rename = "id_dokter_external", skip_serializing_if = "Option::is_none")]
    pub doctor_external_id: Option<String>,

    #[serde(rename = "id_ward", skip_serializing_if = "Option::is_none")]
    pub ward_id: Option<String>,

    #[serde(rename = "ward", skip_serializing_if = "Option::is_none")]
    pub ward_name: Option<String>,

    #[serde(rename = "id_fasilitas", skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<String>,

    #[serde(rename = "fasilitas", skip_serializing_if = "Option::is_none")]
    pub facility_name: Option<String>,

    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "phone_perujuk", skip_serializing_if = "Option::is_none")]
    pub referrer_phone: Option<String>,

    #[serde(rename = "id_departemen", skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

/// ICD-10 value as sent by the caller: a single code or a list of codes.
///
/// Absence is modelled by the surrounding `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Icd10 {
    Code(String),
    Codes(Vec<String>),
}

impl Default for Icd10 {
    fn default() -> Self {
        Icd10::Codes(Vec::new())
    }
}

/// Order placement request in the hospital system's wire schema.
///
/// Unknown keys are ignored; a declared key carrying the wrong JSON type
/// fails decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOrderRequest {
    #[serde(rename = "no_pendaftaran")]
    pub registration_number: Option<String>,

    #[serde(rename = "no_rm")]
    pub medical_record_number: Option<String>,

    #[serde(rename = "no_order")]
    pub order_number: Option<String>,

    #[serde(rename = "nama_pasien")]
    pub patient_name: Option<String>,

    #[serde(rename = "tempat_lahir", skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    #[serde(rename = "tgl_lahir", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(rename = "jk")]
    pub sex: Option<String>,

    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "nik", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,

    /// `"UMUM"` (or absent) means self-pay; anything else names an insurer.
    #[serde(rename = "id_jenis_pasien", skip_serializing_if = "Option::is_none")]
    pub patient_type_id: Option<String>,

    #[serde(rename = "jenis_pasien", skip_serializing_if = "Option::is_none")]
    pub patient_type_name: Option<String>,

    #[serde(rename = "id_penjamin", skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,

    #[serde(rename = "penjamin", skip_serializing_if = "Option::is_none")]
    pub payer_name: Option<String>,

    #[serde(rename = "rujukan_asal")]
    pub referral_origin: Option<String>,

    #[serde(rename = "detail_rujukan")]
    pub referral_details: Option<Vec<ReferralDetail>>,

    /// Raw urgency flag; only `"1"` and `"true"` mean urgent.
    #[serde(rename = "cito")]
    pub cito_flag: Option<String>,

    #[serde(rename = "diagnose", skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(rename = "code_clinic", skip_serializing_if = "Option::is_none")]
    pub clinic_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_note: Option<String>,

    #[serde(rename = "kategori_kunjungan", skip_serializing_if = "Option::is_none")]
    pub visit_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icd10: Option<Icd10>,

    #[serde(rename = "order")]
    pub order_items: Option<Vec<OrderItem>>,
}

/// Keys whose elements must each be a JSON object.
const OBJECT_LIST_KEYS: [&str; 2] = ["detail_rujukan", "order"];

/// Decode a raw request body into a [`SourceOrderRequest`].
///
/// The body and every `detail_rujukan` / `order` element must be JSON
/// objects; derived struct decoding would otherwise accept arrays
/// positionally.
pub fn decode(body: &[u8]) -> Result<SourceOrderRequest, serde_json::Error> {
    let value: Value = serde_json::from_slice(body)?;
    check_shape(&value)?;
    serde_json::from_value(value)
}

fn check_shape(value: &Value) -> Result<(), serde_json::Error> {
    let root = value
        .as_object()
        .ok_or_else(|| not_an_object("request body", value))?;

    for key in OBJECT_LIST_KEYS {
        if let Some(Value::Array(elements)) = root.get(key) {
            for (i, element) in elements.iter().enumerate() {
                if !element.is_object() {
                    return Err(not_an_object(&format!("{key}[{i}]"), element));
                }
            }
        }
    }
    Ok(())
}

fn not_an_object(what: &str, found: &Value) -> serde_json::Error {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    serde_json::Error::custom(format!("{what} must be a JSON object, found {found}"))
}
