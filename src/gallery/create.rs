//! Album creation: ask for a title and category, create the album on the
//! backend, show its empty card.

use crate::api_client::{AlbumId, ApiError, CreateAlbumRequest, GalleryApi};
use crate::configuration::ControlVisibility;
use crate::foundation::utils::non_blank;
use crate::gallery::model::{Album, Category};
use crate::gallery::render::render_album;
use crate::gallery::view::Gallery;
use crate::session::Session;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

pub const TITLE_PROMPT: &str = "Title of the new album:";
pub const CATEGORY_PROMPT: &str = "Category (futbol, basquet, social):";
pub const NOT_AUTHORIZED_TEXT: &str = "Not authorized";
pub const CONNECTION_ERROR_TEXT: &str = "Could not reach the server. Is the backend running?";

/// Source of free-text answers for album creation.
pub trait Prompter {
    /// Returns `None` when the user gives no answer.
    fn ask(&mut self, question: &str) -> Option<String>;
}

/// Reads answers from standard input, one line per question.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str) -> Option<String> {
        print!("\x1b[1m{}\x1b[0m ", question);
        if let Err(e) = io::stdout().flush() {
            warn!(error = %e, "failed to flush prompt");
        }

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()),
            Err(e) => {
                warn!(error = %e, "failed to read answer");
                None
            }
        }
    }
}

/// Values supplied up front; anything missing is asked for.
#[derive(Debug, Clone, Default)]
pub struct AlbumInput {
    pub title: Option<String>,
    pub category: Option<String>,
}

/// A validated album, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumDraft {
    pub title: String,
    pub category: Category,
}

impl AlbumDraft {
    /// `None` when no title was given, which cancels the creation.
    pub fn from_input(title: Option<&str>, category: Option<&str>) -> Option<Self> {
        let title = title.filter(|title| non_blank(Some(*title)).is_some())?;
        Some(Self {
            title: title.to_string(),
            category: Category::new(category.unwrap_or_default()),
        })
    }

    fn to_request(&self) -> CreateAlbumRequest {
        CreateAlbumRequest {
            title: self.title.clone(),
            category: self.category.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(AlbumId),
    /// No title was given; nothing was sent.
    Cancelled,
    /// The backend refused or could not be reached; the text is for the user.
    Rejected(String),
}

pub async fn create_album<A, P>(
    api: &A,
    session: &Session,
    visibility: ControlVisibility,
    gallery: &mut Gallery,
    prompter: &mut P,
    preset: AlbumInput,
) -> CreateOutcome
where
    A: GalleryApi + ?Sized,
    P: Prompter + ?Sized,
{
    let title = preset.title.or_else(|| prompter.ask(TITLE_PROMPT));
    if non_blank(title.as_deref()).is_none() {
        info!("album creation cancelled, no title given");
        return CreateOutcome::Cancelled;
    }

    let category = preset.category.or_else(|| prompter.ask(CATEGORY_PROMPT));
    let Some(draft) = AlbumDraft::from_input(title.as_deref(), category.as_deref()) else {
        return CreateOutcome::Cancelled;
    };

    match api.create_album(&draft.to_request()).await {
        Ok(created) => match created.id {
            Some(id) => {
                info!(album_id = %id, title = %draft.title, "album created");
                let album = Album::empty(id.clone(), &draft.title, draft.category);
                gallery.insert(render_album(&album, session, visibility));
                CreateOutcome::Created(id)
            }
            None => {
                warn!("album creation answered without an id");
                CreateOutcome::Rejected(NOT_AUTHORIZED_TEXT.to_string())
            }
        },
        Err(e) => {
            warn!(error = %e, "album creation failed");
            CreateOutcome::Rejected(rejection_message(&e))
        }
    }
}

fn rejection_message(error: &ApiError) -> String {
    match error {
        ApiError::Connection(_) | ApiError::Io(_) => error.user_message(CONNECTION_ERROR_TEXT),
        _ => error.user_message(NOT_AUTHORIZED_TEXT),
    }
}
