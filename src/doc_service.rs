use anyhow::Result;
use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Serialize)]
struct RetrievalQuery<'a> {
    session_id: &'a str,
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct RetrievalResult {
    top_chunks: Option<Vec<String>>,
}

/// Client for the external document-processing service. Uploads are forwarded
/// to `/upload` and retrieval queries go to `/query`.
#[derive(Debug, Clone)]
pub struct DocServiceClient {
    client: Client,
    base_url: String,
}

impl DocServiceClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Forwards a spooled upload under its original filename and relays the
    /// service's JSON reply without interpreting it.
    pub async fn forward_upload(&self, path: &Path, filename: &str) -> Result<Value> {
        let bytes = tokio::fs::read(path).await?;
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!(
                "document service upload failed: {}",
                error_text
            ));
        }

        Ok(response.json().await?)
    }

    /// Retrieves context chunks for a question. `top_chunks` is optional in
    /// the reply and defaults to no chunks.
    pub async fn query(&self, session_id: &str, question: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .json(&RetrievalQuery {
                session_id,
                question,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!(
                "document service query failed: {}",
                error_text
            ));
        }

        let result: RetrievalResult = response.json().await?;
        Ok(result.top_chunks.unwrap_or_default())
    }
}
