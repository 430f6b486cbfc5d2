//! Structural validation of source orders.
//!
//! # Responsibilities
//! - Presence checks on required top-level fields
//! - Descend into every referral detail and order item
//! - Require the payer name whenever the patient is insurance-backed
//!
//! # Design Decisions
//! - Returns all violations, not just the first
//! - Pure function: SourceOrderRequest → Result<(), Vec<FieldViolation>>
//! - Field paths use wire names so callers can map them back to their payload

use serde::Serialize;
use thiserror::Error;

use crate::order::source::{OrderItem, ReferralDetail, SourceOrderRequest};
use crate::order::transform::GENERAL_PATIENT_TYPE;

/// Which rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationRule {
    /// Field absent or `null`.
    Required,
    /// Field present but an empty string.
    NotEmpty,
    /// Insurance-backed patients must name the insurer.
    RequiredForInsurance,
}

impl std::fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationRule::Required => write!(f, "is required"),
            ViolationRule::NotEmpty => write!(f, "must not be empty"),
            ViolationRule::RequiredForInsurance => {
                write!(f, "is required when id_jenis_pasien is not {}", GENERAL_PATIENT_TYPE)
            }
        }
    }
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field} {rule}")]
pub struct FieldViolation {
    /// Wire path, e.g. `detail_rujukan[1].id_dokter`.
    pub field: String,
    pub rule: ViolationRule,
}

impl FieldViolation {
    fn new(field: impl Into<String>, rule: ViolationRule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }
}

/// Validate a decoded source order.
pub fn validate(request: &SourceOrderRequest) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let required = [
        ("no_pendaftaran", &request.registration_number),
        ("no_rm", &request.medical_record_number),
        ("no_order", &request.order_number),
        ("nama_pasien", &request.patient_name),
        ("jk", &request.sex),
        ("rujukan_asal", &request.referral_origin),
        ("cito", &request.cito_flag),
    ];
    for (field, value) in required {
        require_text(field, value, &mut violations);
    }

    match &request.referral_details {
        Some(details) => {
            for (i, detail) in details.iter().enumerate() {
                validate_referral_detail(i, detail, &mut violations);
            }
        }
        None => violations.push(FieldViolation::new("detail_rujukan", ViolationRule::Required)),
    }

    match &request.order_items {
        Some(items) => {
            for (i, item) in items.iter().enumerate() {
                validate_order_item(i, item, &mut violations);
            }
        }
        None => violations.push(FieldViolation::new("order", ViolationRule::Required)),
    }

    if let Some(patient_type) = &request.patient_type_id {
        if patient_type.is_empty() {
            violations.push(FieldViolation::new("id_jenis_pasien", ViolationRule::NotEmpty));
        } else if patient_type != GENERAL_PATIENT_TYPE
            && request.patient_type_name.as_deref().map_or(true, str::is_empty)
        {
            violations.push(FieldViolation::new(
                "jenis_pasien",
                ViolationRule::RequiredForInsurance,
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn validate_referral_detail(index: usize, detail: &ReferralDetail, out: &mut Vec<FieldViolation>) {
    require_text(
        &format!("detail_rujukan[{}].id_dokter", index),
        &detail.doctor_id,
        out,
    );
    require_text(
        &format!("detail_rujukan[{}].nama_dokter", index),
        &detail.doctor_name,
        out,
    );
}

fn validate_order_item(index: usize, item: &OrderItem, out: &mut Vec<FieldViolation>) {
    require_text(&format!("order[{}].id_test", index), &item.test_id, out);
}

fn require_text(field: &str, value: &Option<String>, out: &mut Vec<FieldViolation>) {
    match value.as_deref() {
        None => out.push(FieldViolation::new(field, ViolationRule::Required)),
        Some("") => out.push(FieldViolation::new(field, ViolationRule::NotEmpty)),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SourceOrderRequest {
        SourceOrderRequest {
            registration_number: Some("REG-001".into()),
            medical_record_number: Some("RM-001".into()),
            order_number: Some("ORD-001".into()),
            patient_name: Some("Siti Aminah".into()),
            sex: Some("P".into()),
            referral_origin: Some("Poli Dalam".into()),
            cito_flag: Some("0".into()),
            referral_details: Some(vec![ReferralDetail {
                doctor_id: Some("D-01".into()),
                doctor_name: Some("dr. Budi".into()),
                ..Default::default()
            }]),
            order_items: Some(vec![OrderItem {
                test_id: Some("HB".into()),
                test_name: Some("Hemoglobin".into()),
            }]),
            ..Default::default()
        }
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&valid_request()).is_ok());
    }

    #[test]
    fn test_empty_collections_are_allowed() {
        let mut req = valid_request();
        req.referral_details = Some(Vec::new());
        req.order_items = Some(Vec::new());
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_each_required_field_is_enforced() {
        let cases: [(&str, fn(&mut SourceOrderRequest)); 9] = [
            ("no_pendaftaran", |r| r.registration_number = None),
            ("no_rm", |r| r.medical_record_number = None),
            ("no_order", |r| r.order_number = None),
            ("nama_pasien", |r| r.patient_name = None),
            ("jk", |r| r.sex = None),
            ("rujukan_asal", |r| r.referral_origin = None),
            ("cito", |r| r.cito_flag = None),
            ("detail_rujukan", |r| r.referral_details = None),
            ("order", |r| r.order_items = None),
        ];

        for (field, strip) in cases {
            let mut req = valid_request();
            strip(&mut req);
            let violations = validate(&req).unwrap_err();
            assert_eq!(fields(&violations), vec![field], "stripping {}", field);
            assert_eq!(violations[0].rule, ViolationRule::Required);
        }
    }

    #[test]
    fn test_empty_string_is_rejected_for_required_field() {
        let mut req = valid_request();
        req.patient_name = Some(String::new());
        let violations = validate(&req).unwrap_err();
        assert_eq!(violations[0].field, "nama_pasien");
        assert_eq!(violations[0].rule, ViolationRule::NotEmpty);
    }

    #[test]
    fn test_one_bad_nested_element_rejects_request() {
        let mut req = valid_request();
        req.referral_details.as_mut().unwrap().push(ReferralDetail {
            doctor_id: Some("D-02".into()),
            ..Default::default()
        });
        req.order_items.as_mut().unwrap().push(OrderItem {
            test_id: None,
            test_name: Some("Glukosa".into()),
        });

        let violations = validate(&req).unwrap_err();
        assert_eq!(
            fields(&violations),
            vec!["detail_rujukan[1].nama_dokter", "order[1].id_test"]
        );
    }

    #[test]
    fn test_violations_are_collected_together() {
        let req = SourceOrderRequest::default();
        let violations = validate(&req).unwrap_err();
        assert_eq!(violations.len(), 9);
    }

    #[test]
    fn test_insurance_requires_payer_name() {
        let mut req = valid_request();
        req.patient_type_id = Some("BPJS".into());
        let violations = validate(&req).unwrap_err();
        assert_eq!(fields(&violations), vec!["jenis_pasien"]);
        assert_eq!(violations[0].rule, ViolationRule::RequiredForInsurance);

        req.patient_type_name = Some("Jaminan Kesehatan".into());
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_general_patient_needs_no_payer_name() {
        let mut req = valid_request();
        req.patient_type_id = Some("UMUM".into());
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_empty_patient_type_is_rejected() {
        let mut req = valid_request();
        req.patient_type_id = Some(String::new());
        let violations = validate(&req).unwrap_err();
        assert_eq!(fields(&violations), vec!["id_jenis_pasien"]);
    }

    #[test]
    fn test_violation_display() {
        let v = FieldViolation::new("order[0].id_test", ViolationRule::Required);
        assert_eq!(v.to_string(), "order[0].id_test is required");
    }
}
