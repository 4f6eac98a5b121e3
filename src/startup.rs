/// # The Main Entry Point of a Gallery Session
///
/// Every invocation behaves like one page load of the portfolio:
/// 1. Loads the configuration
/// 2. Logs in, when an administrator password is configured
/// 3. Resolves the session once
/// 4. Loads the albums into the gallery
/// 5. Performs the requested action and prints the result
///
use crate::api_client::{AlbumId, GalleryApi, HttpGalleryClient};
use crate::configuration::{self, ApiSettings, ConfigFolder, GallerySettings, RefreshMode};
use crate::gallery::{
    self, print_gallery, reload_gallery, sync_gallery, AlbumInput, CardAction, CategoryFilter,
    CreateOutcome, Gallery, Prompter, StdinPrompter,
};
use crate::session::{self, resolve_session, NavControls, Session};
use crate::upload::{collect_photos, create_progress_bar, upload_photos, UploadQueue};
use anyhow::Context;
use std::path::PathBuf;
use tracing::warn;

/// What the user asked this invocation to do.
#[derive(Debug, Clone)]
pub enum Action {
    Show { filter: CategoryFilter },
    Create(AlbumInput),
    Upload { album_id: AlbumId, paths: Vec<PathBuf> },
    Logout,
}

/// State of one "page load": who is looking and what the grid shows.
pub struct Page {
    pub session: Session,
    pub gallery: Gallery,
    pub settings: GallerySettings,
}

impl Page {
    pub fn nav(&self) -> NavControls {
        NavControls::for_session(&self.session, self.settings.privileged_controls)
    }
}

pub async fn run(cfg_folder: ConfigFolder, action: Action) -> anyhow::Result<()> {
    if !cfg_folder.config_file.exists() {
        eprintln!(
            "\x1b[1m\x1b[31mConfiguration file not found. Please run 'albumsync config' first.\x1b[0m"
        );
        return Ok(());
    }

    let config_file = cfg_folder
        .config_file
        .to_str()
        .context("Failed to convert the configuration path to a string")?;
    let config = configuration::get_configuration(config_file)
        .context("Unable to parse configuration file")?;

    let client = HttpGalleryClient::new(&config.api_settings)
        .context("Unable to create the HTTP client")?;

    let mut page = open_page(&client, &config.api_settings, config.gallery_settings).await;
    perform(&client, &mut page, action, &mut StdinPrompter).await
}

/// Logs in if configured, resolves the session and loads the gallery.
pub async fn open_page<A: GalleryApi + ?Sized>(
    api: &A,
    api_settings: &ApiSettings,
    settings: GallerySettings,
) -> Page {
    let password = api_settings
        .admin_password
        .as_deref()
        .filter(|password| !password.is_empty());

    if let Some(password) = password {
        if let Err(e) = session::login(api, password).await {
            warn!(error = %e, "login failed");
            eprintln!("\x1b[31mLogin failed: {}\x1b[0m", e.user_message("check the password"));
        }
    }

    let session = resolve_session(api).await;
    let mut gallery = Gallery::new(settings.refresh);
    sync_gallery(api, &session, settings.privileged_controls, &mut gallery).await;

    Page {
        session,
        gallery,
        settings,
    }
}

pub async fn perform<A, P>(
    api: &A,
    page: &mut Page,
    action: Action,
    prompter: &mut P,
) -> anyhow::Result<()>
where
    A: GalleryApi + ?Sized,
    P: Prompter + ?Sized,
{
    match action {
        Action::Show { filter } => {
            page.gallery.apply_filter(filter);
            print_gallery(&page.gallery, &page.nav());
        }
        Action::Create(input) => create(api, page, input, prompter).await,
        Action::Upload { album_id, paths } => upload(api, page, &album_id, &paths).await,
        Action::Logout => logout(api, page).await,
    }

    Ok(())
}

async fn create<A, P>(api: &A, page: &mut Page, input: AlbumInput, prompter: &mut P)
where
    A: GalleryApi + ?Sized,
    P: Prompter + ?Sized,
{
    if !page.nav().add_album {
        eprintln!("\x1b[31mCreating albums requires an administrator session.\x1b[0m");
        return;
    }

    let outcome = gallery::create_album(
        api,
        &page.session,
        page.settings.privileged_controls,
        &mut page.gallery,
        prompter,
        input,
    )
    .await;

    match outcome {
        CreateOutcome::Created(id) => {
            println!("\x1b[32mAlbum created (id {}).\x1b[0m\n", id);
            print_gallery(&page.gallery, &page.nav());
        }
        CreateOutcome::Cancelled => {}
        CreateOutcome::Rejected(message) => {
            eprintln!("\x1b[1m\x1b[31m{}\x1b[0m", message);
        }
    }
}

async fn upload<A: GalleryApi + ?Sized>(
    api: &A,
    page: &mut Page,
    album_id: &AlbumId,
    paths: &[PathBuf],
) {
    let target = page
        .gallery
        .card(album_id)
        .and_then(|card| card.upload.as_ref())
        .map(|control| control.on_select.clone());

    let Some(CardAction::UploadPhotos { album_id }) = target else {
        eprintln!(
            "\x1b[31mAlbum {} does not offer uploads: it does not exist or requires an administrator session.\x1b[0m",
            album_id
        );
        return;
    };

    let photos = collect_photos(paths);
    if photos.is_empty() {
        println!("\x1b[33mNo image files selected.\x1b[0m");
        return;
    }

    let total = photos.len();
    let progress = create_progress_bar(total as u64);
    let queue = UploadQueue::new(album_id, photos);
    let report = upload_photos(api, &mut page.gallery, queue, &progress).await;

    if page.settings.refresh == RefreshMode::ReloadAfterUpload {
        reload_gallery(
            api,
            &page.session,
            page.settings.privileged_controls,
            &mut page.gallery,
        )
        .await;
    }

    if report.uploaded_count() == total {
        println!("\x1b[32mUploaded {} photo(s).\x1b[0m\n", total);
    } else {
        println!(
            "\x1b[33mUploaded {} of {} photo(s).\x1b[0m",
            report.uploaded_count(),
            total
        );
        for (file, reason) in report.failures() {
            eprintln!("\x1b[31m  {}: {}\x1b[0m", file, reason);
        }
        println!();
    }

    print_gallery(&page.gallery, &page.nav());
}

async fn logout<A: GalleryApi + ?Sized>(api: &A, page: &mut Page) {
    if !page.nav().logout {
        println!("\x1b[33mNo administrator session to close.\x1b[0m");
        return;
    }

    match session::logout(api).await {
        Ok(visitor) => {
            page.session = visitor;
            reload_gallery(
                api,
                &page.session,
                page.settings.privileged_controls,
                &mut page.gallery,
            )
            .await;
            println!("\x1b[32mLogged out.\x1b[0m\n");
            print_gallery(&page.gallery, &page.nav());
        }
        Err(e) => {
            eprintln!("\x1b[31m{}\x1b[0m", e.user_message("Logout failed."));
        }
    }
}
