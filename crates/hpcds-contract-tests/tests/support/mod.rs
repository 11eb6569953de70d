//! Shared in-memory fake server for end-to-end scenario tests.
//!
//! Models just enough of the HTTP surface described by the block addressing
//! model: a metadata GET, a session handshake redirect, and block GET/POST
//! keyed by coordinate suffix. No real network is involved.

use std::cell::RefCell;
use std::collections::HashMap;

use hpcds_transport::{BlockTransport, HttpMethod, HttpResponse, TransportError};

pub struct FakeServer {
    dataset_url: String,
    metadata_json: String,
    elem_size: usize,
    blocks: RefCell<HashMap<String, Vec<u8>>>,
    block_get_calls: RefCell<usize>,
}

impl FakeServer {
    pub fn new(dataset_url: impl Into<String>, metadata_json: impl Into<String>, elem_size: usize) -> Self {
        Self {
            dataset_url: dataset_url.into(),
            metadata_json: metadata_json.into(),
            elem_size,
            blocks: RefCell::new(HashMap::new()),
            block_get_calls: RefCell::new(0),
        }
    }

    /// Number of block-read GET requests issued so far (excludes the
    /// metadata fetch and session handshake).
    pub fn block_get_calls(&self) -> usize {
        *self.block_get_calls.borrow()
    }

    fn session_prefix(&self) -> &'static str {
        "http://session"
    }

    fn split_suffixes(suffix: &str) -> Vec<String> {
        let parts: Vec<&str> = suffix.split('/').filter(|s| !s.is_empty()).collect();
        parts
            .chunks(6)
            .map(|chunk| format!("/{}", chunk.join("/")))
            .collect()
    }

    fn payload_len(&self, payload: &[u8]) -> usize {
        let bx = u32::from_le_bytes(payload[0..4].try_into().unwrap()) as usize;
        let by = u32::from_le_bytes(payload[4..8].try_into().unwrap()) as usize;
        let bz = u32::from_le_bytes(payload[8..12].try_into().unwrap()) as usize;
        12 + bx * by * bz * self.elem_size
    }
}

impl BlockTransport for FakeServer {
    fn request(
        &self,
        url: &str,
        method: HttpMethod,
        body: Option<&[u8]>,
        _headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        if url == self.dataset_url {
            return Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: self.metadata_json.as_bytes().to_vec(),
            });
        }

        if url.starts_with(&self.dataset_url) && url.ends_with("/read-write") {
            return Ok(HttpResponse {
                status: 307,
                headers: vec![(
                    "Location".to_string(),
                    self.session_prefix().to_string(),
                )],
                body: Vec::new(),
            });
        }

        let suffix = url
            .strip_prefix(self.session_prefix())
            .expect("block requests must target the session URL");

        match method {
            HttpMethod::Get => {
                *self.block_get_calls.borrow_mut() += 1;
                let mut out = Vec::new();
                for key in Self::split_suffixes(suffix) {
                    if let Some(payload) = self.blocks.borrow().get(&key) {
                        out.extend_from_slice(payload);
                    }
                }
                Ok(HttpResponse {
                    status: 200,
                    headers: Vec::new(),
                    body: out,
                })
            }
            HttpMethod::Post => {
                let body = body.unwrap_or(&[]);
                let mut offset = 0usize;
                for key in Self::split_suffixes(suffix) {
                    let len = self.payload_len(&body[offset..]);
                    self.blocks
                        .borrow_mut()
                        .insert(key, body[offset..offset + len].to_vec());
                    offset += len;
                }
                Ok(HttpResponse {
                    status: 200,
                    headers: Vec::new(),
                    body: Vec::new(),
                })
            }
        }
    }
}
