use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::endpoint;
use crate::error::{Error, Result};
use crate::resource::{ImageResource, QueryResource};
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    BodyPartExamined, Collection, Manufacturer, Modality, NewPatientInCollection,
    NewStudyInPatientCollection, Patient, PatientStudy, Series, SeriesSize, SopInstanceUid,
};

/// Production service root.
pub const DEFAULT_BASE_URL: &str = "https://services.cancerimagingarchive.net/services/v3";

/// Environment variable consulted when no explicit API key is supplied.
pub const API_KEY_VAR: &str = "TCIA_API_KEY";

pub(crate) struct ClientInner {
    pub(crate) api_key: String,
    pub(crate) base_url: Url,
    pub(crate) transport: Arc<dyn Transport>,
}

impl fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientInner")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Entry point to the TCIA REST services.
///
/// Holds the API key and base URL; every endpoint accessor returns a fresh,
/// unbound resource, so no query state is ever shared between calls.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Creates a client with an explicit API key, falling back to the
    /// `TCIA_API_KEY` environment variable when `api_key` is `None`.
    ///
    /// Missing credentials fail here, never at the first request.
    pub fn new(api_key: Option<&str>) -> Result<Self> {
        let api_key = resolve_api_key(api_key, std::env::var(API_KEY_VAR).ok())?;
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new()?);
        Ok(Self {
            inner: Arc::new(ClientInner {
                api_key,
                base_url,
                transport,
            }),
        })
    }

    /// Creates a client from the `TCIA_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::new(None)
    }

    /// Overrides the base URL, e.g. for a mock or alternate deployment.
    pub fn with_base_url(self, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                api_key: self.inner.api_key.clone(),
                base_url,
                transport: self.inner.transport.clone(),
            }),
        })
    }

    /// Swaps the transport boundary.
    pub fn with_transport(self, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                api_key: self.inner.api_key.clone(),
                base_url: self.inner.base_url.clone(),
                transport,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    fn query<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &'static endpoint::Endpoint,
    ) -> QueryResource<T> {
        QueryResource::new(self.inner.clone(), endpoint)
    }

    fn image(&self, endpoint: &'static endpoint::Endpoint) -> ImageResource {
        ImageResource::new(self.inner.clone(), endpoint)
    }

    /// Collection names available on the archive.
    pub fn collections(&self) -> QueryResource<Collection> {
        self.query(&endpoint::COLLECTIONS)
    }

    /// Modalities, optionally filtered by `collection` / `body_part_examined`.
    pub fn modalities(&self) -> QueryResource<Modality> {
        self.query(&endpoint::MODALITIES)
    }

    /// Body parts examined, optionally filtered by `collection` / `modality`.
    pub fn body_parts_examined(&self) -> QueryResource<BodyPartExamined> {
        self.query(&endpoint::BODY_PARTS)
    }

    /// Scanner manufacturers, optionally filtered by `collection` /
    /// `modality` / `body_part_examined`.
    pub fn manufacturers(&self) -> QueryResource<Manufacturer> {
        self.query(&endpoint::MANUFACTURERS)
    }

    /// Patients, optionally filtered by `collection`.
    pub fn patients(&self) -> QueryResource<Patient> {
        self.query(&endpoint::PATIENTS)
    }

    /// Patients for a given `collection` and `modality` (both required).
    pub fn patients_by_modality(&self) -> QueryResource<Patient> {
        self.query(&endpoint::PATIENTS_BY_MODALITY)
    }

    /// Studies, optionally filtered by `collection` / `patient_id` /
    /// `study_instance_uid`.
    pub fn patient_studies(&self) -> QueryResource<PatientStudy> {
        self.query(&endpoint::PATIENT_STUDIES)
    }

    /// Series metadata; accepts the full set of series-level filters.
    pub fn series(&self) -> QueryResource<Series> {
        self.query(&endpoint::SERIES)
    }

    /// Byte and object counts for a `series_instance_uid` (required).
    pub fn series_size(&self) -> QueryResource<SeriesSize> {
        self.query(&endpoint::SERIES_SIZE)
    }

    /// ZIP archive of every image in a `series_instance_uid` (required).
    pub fn images(&self) -> ImageResource {
        self.image(&endpoint::IMAGES)
    }

    /// Patients added to a `collection` since `date` (both required).
    pub fn new_patients_in_collection(&self) -> QueryResource<NewPatientInCollection> {
        self.query(&endpoint::NEW_PATIENTS_IN_COLLECTION)
    }

    /// Studies added to a `collection` since `date` (both required),
    /// optionally narrowed to one `patient_id`.
    pub fn new_studies_in_patient_collection(&self) -> QueryResource<NewStudyInPatientCollection> {
        self.query(&endpoint::NEW_STUDIES_IN_PATIENT_COLLECTION)
    }

    /// SOP instance UIDs for a `series_instance_uid` (required).
    pub fn sop_instance_uids(&self) -> QueryResource<SopInstanceUid> {
        self.query(&endpoint::SOP_INSTANCE_UIDS)
    }

    /// One DICOM image, addressed by `series_instance_uid` and
    /// `sop_instance_uid` (both required).
    pub fn single_image(&self) -> ImageResource {
        self.image(&endpoint::SINGLE_IMAGE)
    }

    /// Contents of a shared list by `name` (required). The result shape is
    /// not documented by the service, so elements decode as raw JSON values.
    pub fn contents_by_name(&self) -> QueryResource<serde_json::Value> {
        self.query(&endpoint::CONTENTS_BY_NAME)
    }
}

fn resolve_api_key(explicit: Option<&str>, from_env: Option<String>) -> Result<String> {
    if let Some(key) = explicit {
        return Ok(key.to_string());
    }
    match from_env {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(Error::Configuration(format!(
            "environment variable {API_KEY_VAR} must be set or an explicit api_key supplied"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{resolve_api_key, Client};
    use crate::error::Error;
    use crate::transport::testing::{NoNetworkTransport, StubTransport};

    #[test]
    fn explicit_key_wins_over_environment() {
        assert_eq!(
            resolve_api_key(Some("explicit"), Some("from-env".to_string())).unwrap(),
            "explicit"
        );
    }

    #[test]
    fn environment_key_is_the_fallback() {
        assert_eq!(
            resolve_api_key(None, Some("from-env".to_string())).unwrap(),
            "from-env"
        );
    }

    #[test]
    fn no_key_anywhere_is_a_configuration_error() {
        let err = resolve_api_key(None, None).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("TCIA_API_KEY"));

        // Empty environment values count as absent.
        let err = resolve_api_key(None, Some(String::new())).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn base_url_override_is_validated_at_construction() {
        let client = Client::new(Some("k")).unwrap();
        assert!(matches!(
            client.clone().with_base_url("not a url"),
            Err(Error::Url(_))
        ));
        let client = client.with_base_url("http://localhost:8080/services/v3").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/services/v3");
    }

    #[test]
    fn resources_from_one_client_share_no_bound_state() {
        let stub = Arc::new(StubTransport::new("[]"));
        let client = Client::new(Some("k")).unwrap().with_transport(stub);

        let bound = client
            .patients_by_modality()
            .bind("collection", "TCGA-GBM")
            .unwrap()
            .bind("modality", "MR")
            .unwrap();
        assert!(bound.get().is_ok());

        // A second instance of the same endpoint starts unbound.
        let fresh = client
            .clone()
            .with_transport(Arc::new(NoNetworkTransport))
            .patients_by_modality();
        let err = fresh.get().unwrap_err();
        match err {
            Error::MissingParameters { missing, .. } => {
                assert_eq!(missing, vec!["Collection", "Modality"]);
            }
            other => panic!("expected MissingParameters, got {other:?}"),
        }
    }
}
