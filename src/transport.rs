//! The HTTP boundary: a generic GET-with-headers-and-query primitive.
//!
//! Everything above this trait is transport-agnostic; tests swap in a stub
//! and the default implementation is a thin wrapper over blocking
//! [`reqwest`]. Retry, timeout, or cancellation policy belongs to
//! implementations of this trait, never to the resource layer.

use std::io::Read;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::error::Result;

pub trait Transport: Send + Sync {
    /// Issues one GET and returns the response body as text.
    fn fetch_text(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> Result<String>;

    /// Issues one GET and returns the response body as a lazy byte stream.
    ///
    /// The reader is single-pass and not restartable; callers consume it
    /// incrementally so the payload is never buffered whole.
    fn fetch_bytes(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> Result<Box<dyn Read + Send>>;
}

/// Default transport on a blocking [`reqwest`] client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("tcia-rs/", env!("CARGO_PKG_VERSION"))),
        );

        let http = HttpClient::builder().default_headers(headers).build()?;
        Ok(Self { http })
    }

    fn request(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> Result<reqwest::blocking::Response> {
        let mut req = self.http.get(url).query(query);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        Ok(req.send()?.error_for_status()?)
    }
}

impl Transport for HttpTransport {
    fn fetch_text(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> Result<String> {
        Ok(self.request(url, headers, query)?.text()?)
    }

    fn fetch_bytes(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> Result<Box<dyn Read + Send>> {
        Ok(Box::new(self.request(url, headers, query)?))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::{Cursor, Read};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::Transport;
    use crate::error::Result;

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedRequest {
        pub(crate) url: String,
        pub(crate) headers: Vec<(String, String)>,
        pub(crate) query: Vec<(String, String)>,
    }

    /// Canned-response transport that records every request it serves.
    pub(crate) struct StubTransport {
        body: Vec<u8>,
        calls: AtomicUsize,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl StubTransport {
        pub(crate) fn new(body: impl Into<Vec<u8>>) -> Self {
            Self {
                body: body.into(),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub(crate) fn last_request(&self) -> RecordedRequest {
            self.requests
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("no request was recorded")
        }

        fn record(&self, url: &str, headers: &[(&str, &str)], query: &[(&str, String)]) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                query: query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            });
        }
    }

    impl Transport for StubTransport {
        fn fetch_text(
            &self,
            url: &str,
            headers: &[(&str, &str)],
            query: &[(&str, String)],
        ) -> Result<String> {
            self.record(url, headers, query);
            Ok(String::from_utf8_lossy(&self.body).into_owned())
        }

        fn fetch_bytes(
            &self,
            url: &str,
            headers: &[(&str, &str)],
            query: &[(&str, String)],
        ) -> Result<Box<dyn Read + Send>> {
            self.record(url, headers, query);
            Ok(Box::new(Cursor::new(self.body.clone())))
        }
    }

    /// Panics on any request; used to prove validation happens before I/O.
    pub(crate) struct NoNetworkTransport;

    impl Transport for NoNetworkTransport {
        fn fetch_text(
            &self,
            url: &str,
            _headers: &[(&str, &str)],
            _query: &[(&str, String)],
        ) -> Result<String> {
            panic!("transport reached for {url}; the call should have failed first");
        }

        fn fetch_bytes(
            &self,
            url: &str,
            _headers: &[(&str, &str)],
            _query: &[(&str, String)],
        ) -> Result<Box<dyn Read + Send>> {
            panic!("transport reached for {url}; the call should have failed first");
        }
    }
}
