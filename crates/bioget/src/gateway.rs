//! HTTP gateway implementation of the query and download capabilities.
//!
//! Endpoints:
//!
//! - `GET  api/v0/objects/{kind}/{id}[?group=-1]` -> object record
//! - `POST api/v0/query/projection` -> rows of ids
//! - `GET  api/v0/files/{id}/content` -> byte stream
//!
//! The session key is attached as a bearer token on every request.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};
use url::Url;

use bioget_core::query::{LookupScope, QueryParams, QueryService, Record};
use bioget_core::transfer::DownloadService;
use bioget_core::{Error, FileId, ObjectKind, Result};

/// Client for the server's HTTP JSON gateway.
#[derive(Debug, Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct ObjectBody {
    id: i64,
    #[serde(default)]
    file_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ProjectionRequest<'a> {
    query: &'a str,
    params: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ProjectionBody {
    rows: Vec<Vec<i64>>,
}

impl Gateway {
    /// Build a gateway client for the given server base URL.
    pub fn new(base: Url, session_key: Option<&str>, connect_timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = session_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| {
                Error::Session {
                    message: "session key contains invalid characters".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(transport_err)?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|e| Error::Transport {
            message: format!("invalid endpoint {path}: {e}"),
        })
    }
}

fn transport_err(e: reqwest::Error) -> Error {
    Error::Transport {
        message: e.to_string(),
    }
}

#[async_trait]
impl QueryService for Gateway {
    async fn get(&self, kind: ObjectKind, id: i64, scope: LookupScope) -> Result<Record> {
        let mut url = self.endpoint(&format!("api/v0/objects/{kind}/{id}"))?;
        if scope == LookupScope::AllGroups {
            url.query_pairs_mut().append_pair("group", "-1");
        }
        debug!(%kind, id, ?scope, "fetching object");

        let resp = self.http.get(url).send().await.map_err(transport_err)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound { kind, id });
        }
        let resp = resp.error_for_status().map_err(transport_err)?;
        let body: ObjectBody = resp.json().await.map_err(transport_err)?;
        Ok(Record {
            id: body.id,
            attached_file: body.file_id.map(FileId),
        })
    }

    async fn projection(&self, query: &str, params: &QueryParams) -> Result<Vec<Vec<i64>>> {
        let url = self.endpoint("api/v0/query/projection")?;
        let mut map = serde_json::Map::new();
        for (name, value) in params.longs() {
            map.insert(name.clone(), (*value).into());
        }
        trace!(query, "running projection");

        let resp = self
            .http
            .post(url)
            .json(&ProjectionRequest { query, params: map })
            .send()
            .await
            .map_err(transport_err)?;
        let resp = resp.error_for_status().map_err(transport_err)?;
        let body: ProjectionBody = resp.json().await.map_err(transport_err)?;
        Ok(body.rows)
    }
}

#[async_trait]
impl DownloadService for Gateway {
    async fn download(
        &self,
        file: FileId,
        dest: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<()> {
        let url = self.endpoint(&format!("api/v0/files/{file}/content"))?;
        debug!(file = %file, "starting download");

        let resp = self.http.get(url).send().await.map_err(transport_err)?;
        if matches!(resp.status(), StatusCode::NOT_FOUND | StatusCode::GONE) {
            // The file was resolved moments ago; it vanished underneath us.
            return Err(Error::Validation {
                message: format!("file {file} no longer exists"),
            });
        }
        let resp = resp.error_for_status().map_err(transport_err)?;

        let mut stream = resp.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(transport_err)?;
            dest.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        debug!(file = %file, bytes = written, "download finished");
        Ok(())
    }
}
