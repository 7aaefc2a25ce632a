#![forbid(unsafe_code)]

//! Rust client for the Cancer Imaging Archive (TCIA) REST services.
//!
//! Each TCIA endpoint is exposed as a resource obtained from a [`Client`]:
//! you bind query parameters by name, then issue a terminal call — [`get`]
//! for decoded records, or [`download`] to export the raw response (text
//! endpoints) or stream a binary payload chunk by chunk (image endpoints).
//! Required parameters are enforced before any request is made, and record
//! fields the service omits decode to `None` rather than failing.
//!
//! [`get`]: QueryResource::get
//! [`download`]: QueryResource::download
//!
//! **Quick start**
//! ```no_run
//! use tcia::Client;
//!
//! // Reads the key from TCIA_API_KEY; pass Some("...") to be explicit.
//! let client = Client::from_env()?;
//!
//! // Typed query
//! let series = client
//!     .series()
//!     .bind("collection", "TCGA-GBM")?
//!     .bind("modality", "MR")?
//!     .get()?;
//! println!("{} series", series.len());
//!
//! // Streamed binary download (a ZIP of the whole series)
//! client
//!     .images()
//!     .bind("series_instance_uid", "1.3.6.1.4.1.14519.5.2.1.7695.4001.1")?
//!     .download("series.zip", tcia::DEFAULT_CHUNK_SIZE)?;
//! # Ok::<(), tcia::Error>(())
//! ```
//!
//! Notes:
//! - Requests are synchronous; one bind phase (no I/O) then exactly one GET
//!   per terminal call.
//! - The client itself is cheap to clone and safe to share across threads;
//!   each resource it hands out is an independent single-use value.
//! - Access to the archive requires an API key issued by TCIA.

mod client;
mod endpoint;
mod error;
mod params;
mod resource;
mod transport;
mod types;

pub use crate::client::{API_KEY_VAR, Client, DEFAULT_BASE_URL};
pub use crate::error::{Error, Result};
pub use crate::params::ParamValue;
pub use crate::resource::{DEFAULT_CHUNK_SIZE, ImageResource, QueryResource};
pub use crate::transport::{HttpTransport, Transport};
pub use crate::types::{
    Attribute, BodyPartExamined, Collection, Manufacturer, Metadata, Modality,
    NewPatientInCollection, NewStudyInPatientCollection, Patient, PatientStudy, ResultDescriptor,
    Series, SeriesSize, SopInstanceUid,
};
