//! Canvas REST client.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use cyclops_core::config::LmsConfig;
use cyclops_core::error::{AppError, ErrorKind};
use cyclops_core::result::AppResult;
use cyclops_core::types::{CourseId, FileId};
use cyclops_entity::lms::{Course, FileRecord, FolderRecord};

use crate::error::{LmsError, error_message};
use crate::pagination::next_link;

/// Client for the Canvas REST API, authenticated with a single API token.
#[derive(Debug, Clone)]
pub struct CanvasClient {
    http: Client,
    api_url: String,
    api_key: String,
    per_page: u32,
}

impl CanvasClient {
    /// Create a client from configuration.
    pub fn new(config: &LmsConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("cyclops/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build LMS client", e)
            })?;

        info!(api_url = %config.api_url, "LMS client configured");

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            per_page: config.per_page,
        })
    }

    /// Base URL of the LMS.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.api_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.api_key)
    }

    async fn send(request: RequestBuilder) -> Result<Response, LmsError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(LmsError::Api {
            status: status.as_u16(),
            message: error_message(status.as_u16(), &body),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LmsError> {
        let response = Self::send(self.authorized(self.http.get(self.endpoint(path)))).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| LmsError::Decode(e.to_string()))
    }

    /// Fetch every page of a list endpoint, following `Link: rel="next"`.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, LmsError> {
        let per_page = self.per_page.to_string();
        let first = self
            .http
            .get(self.endpoint(path))
            .query(&[("per_page", per_page.as_str())])
            .query(query);

        let mut items = Vec::new();
        let mut request = Some(first);
        let mut pages = 0u32;

        while let Some(current) = request.take() {
            let response = Self::send(self.authorized(current)).await?;
            let next = next_link(response.headers());
            let body = response.bytes().await?;
            let mut page: Vec<T> =
                serde_json::from_slice(&body).map_err(|e| LmsError::Decode(e.to_string()))?;
            items.append(&mut page);
            pages += 1;
            request = next.map(|url| self.http.get(url));
        }

        debug!(path, pages, count = items.len(), "Fetched paginated LMS list");
        Ok(items)
    }

    /// Look up a course.
    pub async fn get_course(&self, course_id: CourseId) -> Result<Course, LmsError> {
        self.get_json(&format!("courses/{course_id}")).await
    }

    /// List every folder of a course.
    pub async fn list_folders(&self, course_id: CourseId) -> Result<Vec<FolderRecord>, LmsError> {
        self.get_paginated(&format!("courses/{course_id}/folders"), &[])
            .await
    }

    /// List every image file of a course.
    pub async fn list_image_files(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<FileRecord>, LmsError> {
        self.get_paginated(
            &format!("courses/{course_id}/files"),
            &[("content_types[]", "image")],
        )
        .await
    }

    /// Look up a single file of a course, including its download URL.
    pub async fn get_file(
        &self,
        course_id: CourseId,
        file_id: FileId,
    ) -> Result<FileRecord, LmsError> {
        self.get_json(&format!("courses/{course_id}/files/{file_id}"))
            .await
    }

    /// Download bytes from a file download URL.
    ///
    /// Download URLs are pre-authorized and may redirect to object storage,
    /// so no token is sent.
    pub async fn download(&self, url: &str) -> Result<Bytes, LmsError> {
        let response = Self::send(self.http.get(url)).await?;
        Ok(response.bytes().await?)
    }

    /// Look up a file and download its contents.
    pub async fn download_file(
        &self,
        course_id: CourseId,
        file_id: FileId,
    ) -> Result<(FileRecord, Bytes), LmsError> {
        let file = self.get_file(course_id, file_id).await?;
        let url = file
            .url
            .clone()
            .ok_or(LmsError::MissingDownloadUrl(file_id))?;
        let data = self.download(&url).await?;
        debug!(%file_id, bytes = data.len(), "Downloaded LMS file");
        Ok((file, data))
    }
}
