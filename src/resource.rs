//! Endpoint resources: parameter binding, required-parameter gating, and
//! the terminal `get`/`download` calls.
//!
//! A resource is a single-use value: the client hands out a fresh, unbound
//! instance per accessor call, `bind` consumes and returns it, and a
//! terminal call performs exactly one GET. Nothing is shared between two
//! resources, so bound parameters can never leak across logically unrelated
//! requests.

use std::fs::File;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::client::ClientInner;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::params::{ParamValue, Params};
use crate::types::Metadata;

/// Sensible chunk size for image downloads when the caller has no reason to
/// pick another.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

const FORMATS: [&str; 4] = ["csv", "html", "xml", "json"];

fn check_format(format: &str) -> Result<()> {
    if FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(Error::UnsupportedFormat(format.to_string()))
    }
}

fn copy_chunks(reader: &mut dyn Read, writer: &mut dyn Write, chunk_size: usize) -> Result<()> {
    // Peak memory stays at one chunk regardless of payload size.
    let mut buf = vec![0u8; chunk_size];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
    }
    Ok(())
}

/// State shared by both resource kinds: client wiring, the endpoint
/// descriptor, the bound query, and the metadata cache.
#[derive(Debug)]
pub(crate) struct ResourceCore {
    inner: Arc<ClientInner>,
    endpoint: &'static Endpoint,
    params: Params,
    metadata: Option<Metadata>,
}

impl ResourceCore {
    fn new(inner: Arc<ClientInner>, endpoint: &'static Endpoint) -> Self {
        Self {
            inner,
            endpoint,
            params: Params::default(),
            metadata: None,
        }
    }

    fn bind(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let Some(wire_key) = self.endpoint.wire_key(name) else {
            return Err(Error::InvalidArgument(format!(
                "{} does not accept parameter {name:?}",
                self.endpoint.name
            )));
        };
        self.params.insert(wire_key, value);
        Ok(())
    }

    fn check_required(&self) -> Result<()> {
        let missing: Vec<&'static str> = self
            .endpoint
            .required
            .iter()
            .filter(|key| !self.params.contains(key))
            .copied()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingParameters {
                endpoint: self.endpoint.name,
                missing,
            })
        }
    }

    fn headers(&self) -> [(&str, &str); 1] {
        [("api_key", self.inner.api_key.as_str())]
    }

    fn fetch_text(&self, format: &str) -> Result<String> {
        self.check_required()?;
        let url = self.endpoint.url(self.inner.base_url.as_str());
        let mut query = self.params.to_query();
        query.push(("format", format.to_string()));
        self.inner.transport.fetch_text(&url, &self.headers(), &query)
    }

    fn fetch_stream(&self) -> Result<Box<dyn Read + Send>> {
        self.check_required()?;
        let url = self.endpoint.url(self.inner.base_url.as_str());
        let query = self.params.to_query();
        self.inner.transport.fetch_bytes(&url, &self.headers(), &query)
    }

    fn metadata(&mut self) -> Result<&Metadata> {
        let meta = match self.metadata.take() {
            Some(meta) => meta,
            None => {
                let url = self.endpoint.metadata_url(self.inner.base_url.as_str());
                let text = self.inner.transport.fetch_text(&url, &self.headers(), &[])?;
                serde_json::from_str(&text)?
            }
        };
        Ok(self.metadata.insert(meta))
    }
}

/// A text-kind endpoint: `get` decodes JSON records, `download` exports the
/// raw body in a requested format.
#[derive(Debug)]
pub struct QueryResource<T> {
    core: ResourceCore,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> QueryResource<T> {
    pub(crate) fn new(inner: Arc<ClientInner>, endpoint: &'static Endpoint) -> Self {
        Self {
            core: ResourceCore::new(inner, endpoint),
            _marker: PhantomData,
        }
    }

    /// Binds one query parameter by its logical name.
    ///
    /// Unknown names fail fast; `None` values merge as a no-op so optional
    /// filters can be forwarded unconditionally.
    pub fn bind(mut self, name: &str, value: impl Into<ParamValue>) -> Result<Self> {
        self.core.bind(name, value.into())?;
        Ok(self)
    }

    /// Binds several parameters at once.
    pub fn bind_all<'a, I, V>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Into<ParamValue>,
    {
        for (name, value) in pairs {
            self.core.bind(name, value.into())?;
        }
        Ok(self)
    }

    /// Performs the query and decodes the JSON array into records.
    ///
    /// Fields absent from an element decode to `None`; a malformed
    /// top-level shape is an error.
    pub fn get(&self) -> Result<Vec<T>> {
        let text = self.core.fetch_text("json")?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Exports the raw response body to `target` in the given format
    /// (csv, html, xml, or json) without decoding it.
    pub fn download(&self, target: impl AsRef<Path>, format: &str) -> Result<()> {
        check_format(format)?;
        let text = self.core.fetch_text(format)?;
        let mut file = File::create(target)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Exports the raw response body to a caller-owned writer.
    ///
    /// The writer is flushed but not closed.
    pub fn download_to<W: Write>(&self, writer: &mut W, format: &str) -> Result<()> {
        check_format(format)?;
        let text = self.core.fetch_text(format)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Documented parameters and result shape for this endpoint, fetched
    /// once per instance and cached.
    pub fn metadata(&mut self) -> Result<&Metadata> {
        self.core.metadata()
    }
}

/// A bytes-kind endpoint: `download` streams the binary payload (a DICOM
/// image or a ZIP archive of a series) chunk by chunk.
#[derive(Debug)]
pub struct ImageResource {
    core: ResourceCore,
}

impl ImageResource {
    pub(crate) fn new(inner: Arc<ClientInner>, endpoint: &'static Endpoint) -> Self {
        Self {
            core: ResourceCore::new(inner, endpoint),
        }
    }

    /// Binds one query parameter by its logical name.
    pub fn bind(mut self, name: &str, value: impl Into<ParamValue>) -> Result<Self> {
        self.core.bind(name, value.into())?;
        Ok(self)
    }

    /// Binds several parameters at once.
    pub fn bind_all<'a, I, V>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Into<ParamValue>,
    {
        for (name, value) in pairs {
            self.core.bind(name, value.into())?;
        }
        Ok(self)
    }

    /// Streams the payload to `target` in reads of `chunk_size` bytes.
    ///
    /// Payloads can be multi-gigabyte archives; nothing is buffered beyond
    /// one chunk. The file is created (truncating any existing content),
    /// flushed, and closed on every exit path.
    pub fn download(&self, target: impl AsRef<Path>, chunk_size: usize) -> Result<()> {
        Self::check_chunk_size(chunk_size)?;
        let mut reader = self.core.fetch_stream()?;
        let mut file = File::create(target)?;
        copy_chunks(&mut reader, &mut file, chunk_size)?;
        file.flush()?;
        Ok(())
    }

    /// Streams the payload to a caller-owned writer.
    ///
    /// The writer is flushed but not closed.
    pub fn download_to<W: Write>(&self, writer: &mut W, chunk_size: usize) -> Result<()> {
        Self::check_chunk_size(chunk_size)?;
        let mut reader = self.core.fetch_stream()?;
        copy_chunks(&mut reader, writer, chunk_size)?;
        writer.flush()?;
        Ok(())
    }

    /// Documented parameters and result shape for this endpoint, fetched
    /// once per instance and cached.
    pub fn metadata(&mut self) -> Result<&Metadata> {
        self.core.metadata()
    }

    fn check_chunk_size(chunk_size: usize) -> Result<()> {
        if chunk_size == 0 {
            return Err(Error::InvalidArgument(
                "chunk size in bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
