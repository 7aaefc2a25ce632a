//! Declarative descriptors for the fixed set of TCIA endpoints.
//!
//! One `'static` table entry per endpoint: the URL path segment, the wire
//! keys that must be bound before a terminal call, and the accepted
//! parameters as a logical-name → wire-key map. Per-endpoint behavior lives
//! here as data; the request machinery in `resource` is shared.

/// Description of one remote endpoint, fixed at compile time.
#[derive(Debug)]
pub(crate) struct Endpoint {
    /// Resource group in the URL path.
    pub(crate) resource: &'static str,
    /// Endpoint path segment, e.g. `getSeries`.
    pub(crate) name: &'static str,
    /// Wire keys that must be present in the bound state.
    pub(crate) required: &'static [&'static str],
    /// Accepted parameters: logical name → query-string key.
    pub(crate) accepted: &'static [(&'static str, &'static str)],
}

impl Endpoint {
    pub(crate) fn wire_key(&self, logical: &str) -> Option<&'static str> {
        self.accepted
            .iter()
            .find(|(name, _)| *name == logical)
            .map(|(_, key)| *key)
    }

    pub(crate) fn url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/query/{}",
            base_url.trim_end_matches('/'),
            self.resource,
            self.name
        )
    }

    pub(crate) fn metadata_url(&self, base_url: &str) -> String {
        format!("{}/metadata", self.url(base_url))
    }
}

const TCIA: &str = "TCIA";

pub(crate) const COLLECTIONS: Endpoint = Endpoint {
    resource: TCIA,
    name: "getCollectionValues",
    required: &[],
    accepted: &[],
};

pub(crate) const MODALITIES: Endpoint = Endpoint {
    resource: TCIA,
    name: "getModalityValues",
    required: &[],
    accepted: &[
        ("collection", "Collection"),
        ("body_part_examined", "BodyPartExamined"),
    ],
};

pub(crate) const BODY_PARTS: Endpoint = Endpoint {
    resource: TCIA,
    name: "getBodyPartValues",
    required: &[],
    accepted: &[("collection", "Collection"), ("modality", "Modality")],
};

pub(crate) const MANUFACTURERS: Endpoint = Endpoint {
    resource: TCIA,
    name: "getManufacturerValues",
    required: &[],
    accepted: &[
        ("collection", "Collection"),
        ("modality", "Modality"),
        ("body_part_examined", "BodyPartExamined"),
    ],
};

pub(crate) const PATIENTS: Endpoint = Endpoint {
    resource: TCIA,
    name: "getPatient",
    required: &[],
    accepted: &[("collection", "Collection")],
};

pub(crate) const PATIENTS_BY_MODALITY: Endpoint = Endpoint {
    resource: TCIA,
    name: "PatientsByModality",
    required: &["Collection", "Modality"],
    accepted: &[("collection", "Collection"), ("modality", "Modality")],
};

pub(crate) const PATIENT_STUDIES: Endpoint = Endpoint {
    resource: TCIA,
    name: "getPatientStudy",
    required: &[],
    accepted: &[
        ("collection", "Collection"),
        ("patient_id", "PatientID"),
        ("study_instance_uid", "StudyInstanceUID"),
    ],
};

pub(crate) const SERIES: Endpoint = Endpoint {
    resource: TCIA,
    name: "getSeries",
    required: &[],
    accepted: &[
        ("collection", "Collection"),
        ("study_instance_uid", "StudyInstanceUID"),
        ("patient_id", "PatientID"),
        ("series_instance_uid", "SeriesInstanceUID"),
        ("modality", "Modality"),
        ("manufacturer_model_name", "ManufacturerModelName"),
        ("manufacturer", "Manufacturer"),
    ],
};

pub(crate) const SERIES_SIZE: Endpoint = Endpoint {
    resource: TCIA,
    name: "getSeriesSize",
    required: &["SeriesInstanceUID"],
    accepted: &[("series_instance_uid", "SeriesInstanceUID")],
};

pub(crate) const IMAGES: Endpoint = Endpoint {
    resource: TCIA,
    name: "getImage",
    required: &["SeriesInstanceUID"],
    accepted: &[("series_instance_uid", "SeriesInstanceUID")],
};

pub(crate) const NEW_PATIENTS_IN_COLLECTION: Endpoint = Endpoint {
    resource: TCIA,
    name: "NewPatientsInCollection",
    required: &["Date", "Collection"],
    accepted: &[("date", "Date"), ("collection", "Collection")],
};

pub(crate) const NEW_STUDIES_IN_PATIENT_COLLECTION: Endpoint = Endpoint {
    resource: TCIA,
    name: "NewStudiesInPatientCollection",
    required: &["Date", "Collection"],
    accepted: &[
        ("date", "Date"),
        ("collection", "Collection"),
        ("patient_id", "PatientID"),
    ],
};

pub(crate) const SOP_INSTANCE_UIDS: Endpoint = Endpoint {
    resource: TCIA,
    name: "getSOPInstanceUIDs",
    required: &["SeriesInstanceUID"],
    accepted: &[("series_instance_uid", "SeriesInstanceUID")],
};

pub(crate) const SINGLE_IMAGE: Endpoint = Endpoint {
    resource: TCIA,
    name: "getSingleImage",
    required: &["SeriesInstanceUID", "SOPInstanceUID"],
    accepted: &[
        ("series_instance_uid", "SeriesInstanceUID"),
        ("sop_instance_uid", "SOPInstanceUID"),
    ],
};

pub(crate) const CONTENTS_BY_NAME: Endpoint = Endpoint {
    resource: TCIA,
    name: "ContentsByName",
    required: &["name"],
    accepted: &[("name", "name")],
};
