//! Loads the album list from the backend into the gallery.

use crate::api_client::{ApiError, GalleryApi};
use crate::configuration::ControlVisibility;
use crate::gallery::model::Album;
use crate::gallery::render::render_album;
use crate::gallery::view::Gallery;
use crate::session::Session;
use tracing::{error, info};

pub const LOAD_ERROR_TEXT: &str = "Could not load the albums. Check your connection and try again.";

/// Fetches every album, in the order the server returns them.
pub async fn fetch_albums<A: GalleryApi + ?Sized>(api: &A) -> Result<Vec<Album>, ApiError> {
    let records = api.list_albums().await?;
    Ok(records.into_iter().map(Album::from).collect())
}

/// Fills the gallery from the backend.
///
/// On failure the grid shows [`LOAD_ERROR_TEXT`] instead of any partial
/// result. The call is not retried.
pub async fn sync_gallery<A: GalleryApi + ?Sized>(
    api: &A,
    session: &Session,
    visibility: ControlVisibility,
    gallery: &mut Gallery,
) {
    match fetch_albums(api).await {
        Ok(albums) => {
            info!(count = albums.len(), "albums loaded");
            for album in &albums {
                gallery.insert(render_album(album, session, visibility));
            }
        }
        Err(e) => {
            error!(error = %e, "failed to load albums");
            gallery.show_error(LOAD_ERROR_TEXT);
        }
    }
}

/// Throws the current grid away and loads it again.
pub async fn reload_gallery<A: GalleryApi + ?Sized>(
    api: &A,
    session: &Session,
    visibility: ControlVisibility,
    gallery: &mut Gallery,
) {
    gallery.clear();
    sync_gallery(api, session, visibility, gallery).await;
}
