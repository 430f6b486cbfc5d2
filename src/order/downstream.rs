//! Downstream (laboratory system) order schema.

use serde::{Deserialize, Serialize};

use crate::order::source::{Icd10, OrderItem, ReferralDetail};

/// Order placement request in the laboratory system's wire schema.
///
/// Built once from a validated [`SourceOrderRequest`](crate::order::SourceOrderRequest)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownstreamOrderRequest {
    #[serde(rename = "no_pendaftaran", skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,

    #[serde(rename = "no_rm", skip_serializing_if = "Option::is_none")]
    pub medical_record_number: Option<String>,

    #[serde(rename = "no_order", skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    #[serde(rename = "nama_pasien", skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,

    #[serde(rename = "tempat_lahir", skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    #[serde(rename = "tgl_lahir", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(rename = "jk", skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,

    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "nik", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,

    /// `"1"` for self-pay, `"2"` for insurance.
    #[serde(rename = "id_jenis_pasien")]
    pub patient_type_id: String,

    #[serde(rename = "jenis_pasien")]
    pub patient_type_name: String,

    #[serde(rename = "id_penjamin")]
    pub payer_id: String,

    #[serde(rename = "penjamin")]
    pub payer_name: String,

    #[serde(rename = "rujukan_asal", skip_serializing_if = "Option::is_none")]
    pub referral_origin: Option<String>,

    #[serde(rename = "detail_rujukan")]
    pub referral_details: Vec<ReferralDetail>,

    pub cito: bool,

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

    /// Always present on the wire; `[]` when the caller sent none.
    pub icd10: Icd10,

    #[serde(rename = "order")]
    pub order_items: Vec<OrderItem>,
}
