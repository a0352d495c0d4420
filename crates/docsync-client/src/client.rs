use crate::error::ClientError;
use crate::messages::{
    CreateByTextRequest, DocumentPage, DocumentResponse, ProcessRule, UpdateByTextRequest,
};
use crate::types::ClientConfig;
use docsync_types::RemoteDocument;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Whether a request may be sent again after an ambiguous failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replay {
    /// Repeating the request cannot change the outcome (list, update).
    Idempotent,
    /// Only resend when the service never received the request (create).
    Undelivered,
}

pub struct KnowledgeClient {
    client: Client,
    config: ClientConfig,
}

impl KnowledgeClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// All documents of a dataset, following `has_more` until the last page.
    pub async fn list_documents(
        &self,
        dataset_id: &str,
    ) -> Result<Vec<RemoteDocument>, ClientError> {
        let mut documents = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.list_documents_page(dataset_id, page).await?;
            let received = batch.data.len();
            documents.extend(batch.data);

            if !batch.has_more || received == 0 {
                break;
            }
            page += 1;
        }

        tracing::debug!(
            "Listed {} documents in dataset {} ({} pages)",
            documents.len(),
            dataset_id,
            page
        );
        Ok(documents)
    }

    pub async fn list_documents_page(
        &self,
        dataset_id: &str,
        page: u32,
    ) -> Result<DocumentPage, ClientError> {
        let url = format!("{}/datasets/{}/documents", self.config.base_url, dataset_id);
        let limit = self.config.page_size;
        self.execute(Replay::Idempotent, || {
            self.client.get(&url).query(&[("page", page), ("limit", limit)])
        })
        .await
    }

    /// Not retried on timeouts or 5xx: the document may already exist, and a
    /// second request would create a duplicate.
    pub async fn create_by_text(
        &self,
        dataset_id: &str,
        name: &str,
        text: &str,
    ) -> Result<DocumentResponse, ClientError> {
        let url =
            format!("{}/datasets/{}/document/create-by-text", self.config.base_url, dataset_id);
        let body = CreateByTextRequest {
            name,
            text,
            indexing_technique: &self.config.indexing_technique,
            process_rule: ProcessRule::automatic(),
        };
        self.execute(Replay::Undelivered, || self.client.post(&url).json(&body)).await
    }

    pub async fn update_by_text(
        &self,
        dataset_id: &str,
        document_id: &str,
        name: &str,
        text: &str,
    ) -> Result<DocumentResponse, ClientError> {
        let url = format!(
            "{}/datasets/{}/documents/{}/update-by-text",
            self.config.base_url, dataset_id, document_id
        );
        let body = UpdateByTextRequest { name, text, process_rule: ProcessRule::automatic() };
        self.execute(Replay::Idempotent, || self.client.post(&url).json(&body)).await
    }

    async fn execute<T, F>(&self, replay: Replay, build: F) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let mut attempts = 0;
        let mut delay = self.config.retry.base_delay_ms;

        loop {
            attempts += 1;
            let err = match self.execute_once(build()).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient()
                    && (replay == Replay::Idempotent || e.is_undelivered()) =>
                {
                    e
                }
                Err(e) => return Err(e),
            };

            if attempts > self.config.retry.max_retries {
                return Err(ClientError::RetriesExhausted { attempts, last: Box::new(err) });
            }

            let wait_ms = match &err {
                ClientError::RateLimited { retry_after: Some(secs) } => {
                    secs.saturating_mul(1000).min(self.config.retry.max_delay_ms)
                }
                _ => delay,
            };
            tracing::debug!("{}, retrying in {}ms (attempt {})", err, wait_ms, attempts);
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;
            delay = delay.saturating_mul(2).min(self.config.retry.max_delay_ms);
        }
    }

    async fn execute_once<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = request
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .send()
            .await?;

        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            return Err(ClientError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServerError { status: status.as_u16(), message });
        }

        resp.json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
