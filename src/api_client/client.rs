//! HTTP adapter for the portfolio backend.
//!
//! Credentialed calls go through a client holding a shared cookie jar, so the
//! session cookie set by `/login` is forwarded to every later call. The album
//! list is always fetched without credentials.

use crate::api_client::models::{
    AlbumId, AlbumRecord, AuthStatus, CreateAlbumRequest, CreatedAlbum, LoginRequest, PhotoFile,
    SuccessFlag, UploadedPhoto,
};
use crate::api_client::ApiError;
use crate::configuration::{ApiSettings, CredentialPolicy};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub const LIST_ALBUMS_PATH: &str = "/obtener-datos";
pub const CREATE_ALBUM_PATH: &str = "/crear-album";
pub const UPLOAD_PHOTO_PATH: &str = "/subir-foto";
pub const CHECK_AUTH_PATH: &str = "/check-auth";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";

/// Operations the gallery needs from the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GalleryApi: Send + Sync {
    async fn list_albums(&self) -> Result<Vec<AlbumRecord>, ApiError>;

    async fn create_album(&self, request: &CreateAlbumRequest) -> Result<CreatedAlbum, ApiError>;

    async fn upload_photo(
        &self,
        album_id: &AlbumId,
        photo: PhotoFile,
    ) -> Result<UploadedPhoto, ApiError>;

    async fn check_auth(&self) -> Result<AuthStatus, ApiError>;

    async fn login(&self, password: &str) -> Result<(), ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;
}

pub struct HttpGalleryClient {
    base_url: String,
    anonymous: Client,
    credentialed: Client,
}

impl HttpGalleryClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&settings.api_base_url)?;
        let anonymous = Client::builder().build()?;

        let credentialed = match settings.credentials {
            CredentialPolicy::Include => Client::builder()
                .cookie_provider(Arc::new(Jar::default()))
                .build()?,
            CredentialPolicy::Omit => anonymous.clone(),
        };

        Ok(Self {
            base_url,
            anonymous,
            credentialed,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl GalleryApi for HttpGalleryClient {
    async fn list_albums(&self) -> Result<Vec<AlbumRecord>, ApiError> {
        let url = self.endpoint(LIST_ALBUMS_PATH);
        debug!(%url, "fetching album list");

        let response = self.anonymous.get(&url).send().await?;
        read_json(response).await
    }

    async fn create_album(&self, request: &CreateAlbumRequest) -> Result<CreatedAlbum, ApiError> {
        let url = self.endpoint(CREATE_ALBUM_PATH);
        debug!(%url, title = %request.title, category = %request.category, "creating album");

        let response = self.credentialed.post(&url).json(request).send().await?;
        read_json(response).await
    }

    async fn upload_photo(
        &self,
        album_id: &AlbumId,
        photo: PhotoFile,
    ) -> Result<UploadedPhoto, ApiError> {
        let url = self.endpoint(UPLOAD_PHOTO_PATH);
        debug!(%url, %album_id, file = %photo.file_name, "uploading photo");

        let part = Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(&photo.mime_type)?;
        let form = Form::new()
            .part("foto", part)
            .text("album_id", album_id.to_string());

        let response = self.credentialed.post(&url).multipart(form).send().await?;
        read_json(response).await
    }

    async fn check_auth(&self) -> Result<AuthStatus, ApiError> {
        let url = self.endpoint(CHECK_AUTH_PATH);
        debug!(%url, "checking session");

        let response = self.credentialed.get(&url).send().await?;
        read_json(response).await
    }

    async fn login(&self, password: &str) -> Result<(), ApiError> {
        let url = self.endpoint(LOGIN_PATH);
        debug!(%url, "logging in");

        let response = self
            .credentialed
            .post(&url)
            .json(&LoginRequest { password })
            .send()
            .await?;
        let status = response.status();
        let flag: SuccessFlag = read_json(response).await?;

        if flag.success {
            Ok(())
        } else {
            Err(ApiError::Server {
                status: status.as_u16(),
                message: Some("Login rejected".to_string()),
            })
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint(LOGOUT_PATH);
        debug!(%url, "logging out");

        let response = self.credentialed.post(&url).send().await?;
        let _: SuccessFlag = read_json(response).await?;
        Ok(())
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|_| ApiError::InvalidBaseUrl(raw.to_string()))?;
    Ok(trimmed.to_string())
}

/// Body shape the backend uses to report a failure.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    parse_body(status, &body)
}

fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ApiError> {
    let reported = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|error_body| error_body.error);

    if !status.is_success() || reported.is_some() {
        return Err(ApiError::Server {
            status: status.as_u16(),
            message: reported,
        });
    }

    Ok(serde_json::from_slice(body)?)
}
