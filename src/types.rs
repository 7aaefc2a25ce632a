//! Record types decoded from TCIA query responses.
//!
//! Every field is optional: the service omits keys freely and is
//! inconsistent about casing, so absent keys decode to `None` and unknown
//! keys are ignored. Numeric attributes arrive either as JSON numbers or as
//! numeric strings; `de_opt_i64` accepts both.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn de_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let t = s.trim();
            t.parse::<i64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, rename = "Collection")]
    pub collection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modality {
    #[serde(default, rename = "Modality")]
    pub modality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPartExamined {
    #[serde(default, rename = "BodyPartExamined")]
    pub body_part_examined: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    #[serde(default, rename = "Manufacturer")]
    pub manufacturer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default, rename = "PatientID")]
    pub patient_id: Option<String>,
    #[serde(default, rename = "PatientName")]
    pub patient_name: Option<String>,
    #[serde(default, rename = "PatientSex")]
    pub patient_sex: Option<String>,
    #[serde(default, rename = "Collection")]
    pub collection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientStudy {
    #[serde(default, rename = "StudyInstanceUID")]
    pub study_instance_uid: Option<String>,
    #[serde(default, rename = "StudyDate")]
    pub study_date: Option<String>,
    #[serde(default, rename = "StudyDescription")]
    pub study_description: Option<String>,
    #[serde(default, rename = "PatientAge")]
    pub patient_age: Option<String>,
    #[serde(default, rename = "PatientID")]
    pub patient_id: Option<String>,
    #[serde(default, rename = "PatientName")]
    pub patient_name: Option<String>,
    #[serde(default, rename = "PatientSex")]
    pub patient_sex: Option<String>,
    #[serde(default, rename = "Collection")]
    pub collection: Option<String>,
    #[serde(default, rename = "SeriesCount", deserialize_with = "de_opt_i64")]
    pub series_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, rename = "SeriesInstanceUID")]
    pub series_instance_uid: Option<String>,
    #[serde(default, rename = "StudyInstanceUID")]
    pub study_instance_uid: Option<String>,
    #[serde(default, rename = "Modality")]
    pub modality: Option<String>,
    #[serde(default, rename = "ProtocolName")]
    pub protocol_name: Option<String>,
    #[serde(default, rename = "SeriesDate")]
    pub series_date: Option<String>,
    #[serde(default, rename = "SeriesDescription")]
    pub series_description: Option<String>,
    #[serde(default, rename = "BodyPartExamined")]
    pub body_part_examined: Option<String>,
    #[serde(default, rename = "SeriesNumber", deserialize_with = "de_opt_i64")]
    pub series_number: Option<i64>,
    #[serde(default, rename = "AnnotationsFlag")]
    pub annotations_flag: Option<String>,
    #[serde(default, rename = "Collection")]
    pub collection: Option<String>,
    #[serde(default, rename = "PatientID")]
    pub patient_id: Option<String>,
    #[serde(default, rename = "Manufacturer")]
    pub manufacturer: Option<String>,
    #[serde(default, rename = "ManufacturerModelName")]
    pub manufacturer_model_name: Option<String>,
    #[serde(default, rename = "SoftwareVersion")]
    pub software_version: Option<String>,
    #[serde(default, rename = "ImageCount", deserialize_with = "de_opt_i64")]
    pub image_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSize {
    #[serde(default, rename = "TotalSizeInBytes", deserialize_with = "de_opt_i64")]
    pub total_size_in_bytes: Option<i64>,
    #[serde(default, rename = "ObjectCount", deserialize_with = "de_opt_i64")]
    pub object_count: Option<i64>,
}

/// The service returns this endpoint's key in lowercase (`sop_instance_uid`)
/// rather than the documented `SOPInstanceUID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SopInstanceUid {
    #[serde(default, rename = "sop_instance_uid")]
    pub sop_instance_uid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatientInCollection {
    #[serde(default, rename = "PatientID")]
    pub patient_id: Option<String>,
    #[serde(default, rename = "Collection")]
    pub collection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudyInPatientCollection {
    #[serde(default, rename = "PatientID")]
    pub patient_id: Option<String>,
    #[serde(default, rename = "Collection")]
    pub collection: Option<String>,
    #[serde(default, rename = "StudyInstanceUID")]
    pub study_instance_uid: Option<String>,
}

/// Documented parameters and result shape of one endpoint, served from
/// `{endpoint}/metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, rename = "QueryName")]
    pub query_name: Option<String>,
    #[serde(default, rename = "Description")]
    pub description: Option<String>,
    #[serde(default, rename = "Parameters")]
    pub parameters: Vec<String>,
    #[serde(default, rename = "Result")]
    pub result: Option<ResultDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDescriptor {
    #[serde(default, rename = "Name")]
    pub name: Option<String>,
    #[serde(default, rename = "Description")]
    pub description: Option<String>,
    #[serde(default, rename = "Attributes")]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default, rename = "Name")]
    pub name: Option<String>,
    #[serde(default, rename = "Description")]
    pub description: Option<String>,
    #[serde(default, rename = "DICOM")]
    pub dicom: Option<String>,
}
