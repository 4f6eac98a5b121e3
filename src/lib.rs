pub mod api_client;
pub mod configuration;
pub mod foundation;
pub mod gallery;
pub mod session;
pub mod startup;
pub mod upload;

pub use api_client::{AlbumId, ApiError, GalleryApi, HttpGalleryClient};
pub use configuration::*;
pub use session::{resolve_session, NavControls, Session};
pub use upload::upload_photos;
