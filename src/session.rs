//! Viewer privilege for the lifetime of one invocation.
//!
//! The backend owns the session (a cookie the client never inspects); this
//! module only asks it once whether the current viewer is an administrator and
//! hands the answer around as a plain value.

use crate::api_client::{ApiError, GalleryApi};
use crate::configuration::ControlVisibility;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    is_admin: bool,
}

impl Session {
    pub fn visitor() -> Self {
        Self { is_admin: false }
    }

    pub fn admin() -> Self {
        Self { is_admin: true }
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// Resolves the viewer's privilege with a single `check-auth` call.
///
/// Any failure resolves to a visitor session; the failure is logged but never
/// reported to the user and never retried.
pub async fn resolve_session<A: GalleryApi + ?Sized>(api: &A) -> Session {
    match api.check_auth().await {
        Ok(status) if status.is_admin => {
            info!("administrator session confirmed");
            Session::admin()
        }
        Ok(_) => Session::visitor(),
        Err(e) => {
            warn!(error = %e, "session check failed, continuing as visitor");
            Session::visitor()
        }
    }
}

/// Logs in with the configured password so later credentialed calls carry
/// the session cookie.
pub async fn login<A: GalleryApi + ?Sized>(api: &A, password: &str) -> Result<(), ApiError> {
    api.login(password).await?;
    info!("logged in");
    Ok(())
}

/// Ends the server-side session. The caller continues as a visitor.
pub async fn logout<A: GalleryApi + ?Sized>(api: &A) -> Result<Session, ApiError> {
    api.logout().await?;
    info!("logged out");
    Ok(Session::visitor())
}

/// Privileged entries of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub add_album: bool,
    pub logout: bool,
}

impl NavControls {
    pub fn for_session(session: &Session, visibility: ControlVisibility) -> Self {
        Self {
            add_album: visibility.allows(session),
            logout: visibility == ControlVisibility::AdminOnly && session.is_admin(),
        }
    }
}
