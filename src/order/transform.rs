//! Source → downstream transformation.
//!
//! Derivation rules:
//! - patient type absent or `"UMUM"` → `1 / UMUM`, payer `UMUM / " "`
//! - any other patient type → `2 / ASURANSI`, payer copied from the source patient type
//! - cito is true only for the exact strings `"1"` and `"true"`
//! - missing icd10 becomes an empty list; a present value is passed through

use crate::order::downstream::DownstreamOrderRequest;
use crate::order::source::SourceOrderRequest;

/// Patient type marking a self-paying (non-insured) patient.
pub const GENERAL_PATIENT_TYPE: &str = "UMUM";

const GENERAL_PATIENT_TYPE_ID: &str = "1";
const INSURED_PATIENT_TYPE_ID: &str = "2";
const INSURED_PATIENT_TYPE: &str = "ASURANSI";
const GENERAL_PAYER_NAME: &str = " ";

/// Downstream patient/payer classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub patient_type_id: String,
    pub patient_type_name: String,
    pub payer_id: String,
    pub payer_name: String,
}

/// Classify a patient from the source patient-type fields.
///
/// An insured patient without a type name gets an empty payer name; the
/// validator rejects that input before it gets here.
pub fn classify(patient_type_id: Option<&str>, patient_type_name: Option<&str>) -> Classification {
    match patient_type_id {
        None | Some(GENERAL_PATIENT_TYPE) => Classification {
            patient_type_id: GENERAL_PATIENT_TYPE_ID.to_string(),
            patient_type_name: GENERAL_PATIENT_TYPE.to_string(),
            payer_id: GENERAL_PATIENT_TYPE.to_string(),
            payer_name: GENERAL_PAYER_NAME.to_string(),
        },
        Some(insurer) => Classification {
            patient_type_id: INSURED_PATIENT_TYPE_ID.to_string(),
            patient_type_name: INSURED_PATIENT_TYPE.to_string(),
            payer_id: insurer.to_string(),
            payer_name: patient_type_name.unwrap_or_default().to_string(),
        },
    }
}

/// Coerce the raw cito flag. No trimming, no case folding.
pub fn is_cito(flag: Option<&str>) -> bool {
    matches!(flag, Some("1") | Some("true"))
}

/// Map a validated source order onto the downstream schema.
pub fn transform(source: &SourceOrderRequest) -> DownstreamOrderRequest {
    let Classification {
        patient_type_id,
        patient_type_name,
        payer_id,
        payer_name,
    } = classify(
        source.patient_type_id.as_deref(),
        source.patient_type_name.as_deref(),
    );

    DownstreamOrderRequest {
        registration_number: source.registration_number.clone(),
        medical_record_number: source.medical_record_number.clone(),
        order_number: source.order_number.clone(),
        patient_name: source.patient_name.clone(),
        birth_place: source.birth_place.clone(),
        birth_date: source.birth_date.clone(),
        sex: source.sex.clone(),
        address: source.address.clone(),
        phone: source.phone.clone(),
        national_id: source.national_id.clone(),
        patient_type_id,
        patient_type_name,
        payer_id,
        payer_name,
        referral_origin: source.referral_origin.clone(),
        referral_details: source.referral_details.clone().unwrap_or_default(),
        cito: is_cito(source.cito_flag.as_deref()),
        diagnosis: source.diagnosis.clone(),
        registration_date: source.registration_date.clone(),
        email: source.email.clone(),
        region: source.region.clone(),
        clinic_code: source.clinic_code.clone(),
        clinic_name: source.clinic_name.clone(),
        order_note: source.order_note.clone(),
        visit_category: source.visit_category.clone(),
        icd10: source.icd10.clone().unwrap_or_default(),
        order_items: source.order_items.clone().unwrap_or_default(),
    }
}
