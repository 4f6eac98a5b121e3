//! Wire types exchanged with the portfolio backend.
//!
//! Field names follow the backend's JSON (`titulo`, `categoria`, `fotos`, ...);
//! the Rust side uses English names through `serde(rename)`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned album identifier.
///
/// The backend hands out integers, older deployments used timestamp strings.
/// Both are kept in their textual form so `1` and `"1"` name the same album.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AlbumId(String);

impl AlbumId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for AlbumId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Numeric(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Numeric(id) => AlbumId::from(id),
            RawId::Text(id) => AlbumId::from(id.as_str()),
        })
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for AlbumId {
    fn from(id: i64) -> Self {
        AlbumId(id.to_string())
    }
}

impl From<&str> for AlbumId {
    fn from(id: &str) -> Self {
        AlbumId(id.trim().to_string())
    }
}

/// One entry of `GET /obtener-datos`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRecord {
    pub id: AlbumId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "fotos", default)]
    pub photos: Vec<String>,
}

/// Body of `POST /crear-album`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAlbumRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "categoria")]
    pub category: String,
}

/// Reply to `POST /crear-album`. A missing `id` means the album was not created.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedAlbum {
    #[serde(default)]
    pub id: Option<AlbumId>,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}

/// Reply to `POST /subir-foto`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedPhoto {
    pub url: String,
}

/// Reply to `GET /check-auth`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AuthStatus {
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub password: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SuccessFlag {
    #[serde(default)]
    pub success: bool,
}

/// A photo ready to be sent as the `foto` multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
