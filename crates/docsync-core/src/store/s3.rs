use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use docsync_types::{ObjectRecord, StoreConfig, StoreError};
use reqwest::{Client, Method, Response, StatusCode};
use std::time::Duration;
use url::Url;

use super::listing;
use super::sigv4::{self, CanonicalRequest, Signer, EMPTY_PAYLOAD_SHA256};
use super::ObjectStore;

/// S3-compatible store using path-style addressing (`{endpoint}/{bucket}/{key}`).
pub struct S3Store {
    client: Client,
    endpoint: String,
    host: String,
    region: String,
    access_key: String,
    secret_key: String,
}

impl S3Store {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let parsed = Url::parse(&config.endpoint).map_err(|e| StoreError::Unavailable {
            message: format!("invalid endpoint '{}': {e}", config.endpoint),
        })?;
        let host_name = parsed.host_str().ok_or_else(|| StoreError::Unavailable {
            message: format!("endpoint '{}' has no host", config.endpoint),
        })?;
        let host = match parsed.port() {
            Some(port) => format!("{host_name}:{port}"),
            None => host_name.to_string(),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Unavailable { message: e.to_string() })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            host,
            region: config.region.clone(),
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    async fn send(
        &self,
        method: Method,
        bucket: &str,
        key: Option<&str>,
        query: &[(&str, &str)],
        body: Option<(Vec<u8>, &str)>,
    ) -> Result<Response, StoreError> {
        let path = match key {
            Some(key) => {
                format!("/{}/{}", sigv4::uri_encode(bucket, false), sigv4::uri_encode(key, true))
            }
            None => format!("/{}", sigv4::uri_encode(bucket, false)),
        };
        let query = sigv4::canonical_query(query);
        let payload_sha256 = match &body {
            Some((bytes, _)) => sigv4::sha256_hex(bytes),
            None => EMPTY_PAYLOAD_SHA256.to_string(),
        };
        let amz_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

        let canonical = CanonicalRequest {
            method: method.as_str(),
            uri: &path,
            query: &query,
            headers: vec![
                ("host".to_string(), self.host.clone()),
                ("x-amz-content-sha256".to_string(), payload_sha256.clone()),
                ("x-amz-date".to_string(), amz_date.clone()),
            ],
            payload_sha256: &payload_sha256,
        };
        let signer = Signer {
            access_key: &self.access_key,
            secret_key: &self.secret_key,
            region: &self.region,
        };
        let authorization = signer.authorization(&canonical, &amz_date);

        let url = if query.is_empty() {
            format!("{}{}", self.endpoint, path)
        } else {
            format!("{}{}?{}", self.endpoint, path, query)
        };

        let mut request = self
            .client
            .request(method, url)
            .header("x-amz-content-sha256", payload_sha256)
            .header("x-amz-date", amz_date)
            .header("Authorization", authorization);
        if let Some((bytes, content_type)) = body {
            request = request.header("Content-Type", content_type).body(bytes);
        }

        request.send().await.map_err(|e| StoreError::Unavailable { message: e.to_string() })
    }

    async fn check(resp: Response, key: &str) -> Result<Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound { key: key.to_string() });
        }
        let message = resp.text().await.unwrap_or_default();
        Err(StoreError::Status { status: status.as_u16(), message })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectRecord>, StoreError> {
        let mut objects = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let mut query = vec![("list-type", "2")];
            if let Some(t) = token.as_deref() {
                query.push(("continuation-token", t));
            }

            let resp = self.send(Method::GET, bucket, None, &query, None).await?;
            let resp = Self::check(resp, bucket).await?;
            let xml = resp
                .text()
                .await
                .map_err(|e| StoreError::InvalidResponse { message: e.to_string() })?;
            let page = listing::parse(&xml)?;

            objects.extend(page.contents.into_iter().map(ObjectRecord::from));

            match page.next_continuation_token {
                Some(next) if page.is_truncated => token = Some(next),
                _ => break,
            }
        }

        tracing::debug!("Listed {} objects in bucket {}", objects.len(), bucket);
        Ok(objects)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let resp = self.send(Method::GET, bucket, Some(key), &[], None).await?;
        let resp = Self::check(resp, key).await?;
        resp.bytes().await.map_err(|e| StoreError::Unavailable { message: e.to_string() })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let resp =
            self.send(Method::PUT, bucket, Some(key), &[], Some((body, content_type))).await?;
        Self::check(resp, key).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> S3Store {
        S3Store::new(&StoreConfig {
            endpoint: server.uri(),
            access_key: "minio".to_string(),
            secret_key: "minio-secret".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn page(keys: &[(&str, &str)], next: Option<&str>) -> String {
        let contents: String = keys
            .iter()
            .map(|(k, e)| {
                format!(
                    "<Contents><Key>{k}</Key><LastModified>2025-01-01T00:00:00.000Z</LastModified>\
                     <ETag>&quot;{e}&quot;</ETag><Size>3</Size></Contents>"
                )
            })
            .collect();
        let truncation = match next {
            Some(t) => format!(
                "<IsTruncated>true</IsTruncated><NextContinuationToken>{t}</NextContinuationToken>"
            ),
            None => "<IsTruncated>false</IsTruncated>".to_string(),
        };
        format!("<ListBucketResult><Name>docs</Name>{truncation}{contents}</ListBucketResult>")
    }

    #[tokio::test]
    async fn test_list_follows_continuation_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/docs"))
            .and(query_param("continuation-token", "page2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page(&[("b.md", "e2")], None)))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/docs"))
            .and(query_param("list-type", "2"))
            .and(header_exists("authorization"))
            .and(header_exists("x-amz-date"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(page(&[("a.md", "e1")], Some("page2"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let objects = store_for(&server).list_objects("docs").await.unwrap();

        let keys: Vec<_> =
            objects.iter().map(|o| (o.key.as_str(), o.fingerprint.as_str())).collect();
        assert_eq!(keys, vec![("a.md", "e1"), ("b.md", "e2")]);
    }

    #[tokio::test]
    async fn test_get_missing_key_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/docs/.docsync-manifest.json"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("<Error><Code>NoSuchKey</Code></Error>"),
            )
            .mount(&server)
            .await;

        let err =
            store_for(&server).get_object("docs", ".docsync-manifest.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_encodes_key_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/docs/infra/my%20notes.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .expect(1)
            .mount(&server)
            .await;

        let body = store_for(&server).get_object("docs", "infra/my notes.md").await.unwrap();
        assert_eq!(&body[..], b"hello");
    }

    #[tokio::test]
    async fn test_put_sends_content_type_and_payload_hash() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/docs/state.json"))
            .and(header("content-type", "application/json"))
            .and(header("x-amz-content-sha256", sigv4::sha256_hex(b"{}").as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server)
            .put_object("docs", "state.json", b"{}".to_vec(), "application/json")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = store_for(&server).get_object("docs", "a.md").await.unwrap_err();
        assert_eq!(err, StoreError::Status { status: 503, message: "slow down".to_string() });
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let cfg = StoreConfig { endpoint: "not a url".to_string(), ..Default::default() };
        assert!(S3Store::new(&cfg).is_err());
    }
}
