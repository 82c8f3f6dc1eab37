use std::time::Duration;

use crate::types::DeleteEnvelope;
use crate::{ApiError, ApiErrorKind, PageEnvelope, PageQuery, PlantDraft, PlantRecord};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Scheme and authority of the remote service, no trailing slash.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Seam over the remote catalog service, mockable in tests and in the
/// app's fake backends.
#[async_trait::async_trait]
pub trait PlantApi: Send + Sync {
    async fn list(&self, query: &PageQuery) -> Result<PageEnvelope, ApiError>;
    async fn detail(&self, id: &str) -> Result<PlantRecord, ApiError>;
    async fn create(&self, draft: &PlantDraft) -> Result<(), ApiError>;
    async fn update(&self, id: &str, draft: &PlantDraft) -> Result<(), ApiError>;
    async fn delete_one(&self, id: &str) -> Result<u64, ApiError>;
    async fn delete_many(&self, ids: &[String]) -> Result<u64, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ApiError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiErrorKind::Network, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        let joined = format!("{}{}", self.settings.base_url, path);
        reqwest::Url::parse(&joined)
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl PlantApi for ReqwestApi {
    async fn list(&self, query: &PageQuery) -> Result<PageEnvelope, ApiError> {
        let url = self.endpoint("/api/plants")?;
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
        ];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        if let Some(sort) = &query.sort {
            params.push(("sort", sort.clone()));
        }

        let response = self
            .build_client()?
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_body(response).await
    }

    async fn detail(&self, id: &str) -> Result<PlantRecord, ApiError> {
        let url = self.endpoint(&format!("/api/plants/{id}"))?;
        let response = self
            .build_client()?
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_body(response).await
    }

    async fn create(&self, draft: &PlantDraft) -> Result<(), ApiError> {
        let url = self.endpoint("/api/plants/add")?;
        let response = self
            .build_client()?
            .post(url)
            .multipart(multipart_form(draft))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        expect_success(&response)?;
        Ok(())
    }

    async fn update(&self, id: &str, draft: &PlantDraft) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/plants/update/{id}"))?;
        let response = self
            .build_client()?
            .put(url)
            .multipart(multipart_form(draft))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        expect_success(&response)?;
        Ok(())
    }

    async fn delete_one(&self, id: &str) -> Result<u64, ApiError> {
        let url = self.endpoint("/api/plants/delete")?;
        let response = self
            .build_client()?
            .delete(url)
            .query(&[("id", id)])
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let envelope: DeleteEnvelope = decode_body(response).await?;
        Ok(envelope.deleted_count)
    }

    async fn delete_many(&self, ids: &[String]) -> Result<u64, ApiError> {
        let url = self.endpoint("/api/plants/delete")?;
        let response = self
            .build_client()?
            .delete(url)
            .json(&serde_json::json!({ "ids": ids }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let envelope: DeleteEnvelope = decode_body(response).await?;
        Ok(envelope.deleted_count)
    }
}

/// Builds the multipart body shared by create and update. The image part
/// keeps its client-side filename; the server derives the stored key.
fn multipart_form(draft: &PlantDraft) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new()
        .text("name", draft.name.clone())
        .text("cost", draft.cost.clone())
        .text("category", draft.category.clone())
        .text("status", draft.status.clone())
        .text("description", draft.description.clone());
    if let Some(image) = &draft.image {
        let part =
            reqwest::multipart::Part::bytes(image.bytes.clone()).file_name(image.filename.clone());
        form = form.part("image", part);
    }
    form
}

fn expect_success(response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::new(
            ApiErrorKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

async fn decode_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    expect_success(&response)?;
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::new(ApiErrorKind::MalformedBody, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiErrorKind::Timeout, err.to_string());
    }
    ApiError::new(ApiErrorKind::Network, err.to_string())
}
