//! Turns album view-models into cards, and cards into terminal output.

use crate::configuration::ControlVisibility;
use crate::gallery::model::Album;
use crate::gallery::view::{AlbumCard, Gallery, Thumbnail, UploadControl, EMPTY_STATE_TEXT};
use crate::session::{NavControls, Session};

/// Builds the card for an album.
///
/// The upload control is only attached when `visibility` allows it for this
/// session, so a visitor's card carries no way to start an upload.
pub fn render_album(album: &Album, session: &Session, visibility: ControlVisibility) -> AlbumCard {
    AlbumCard {
        album_id: album.id.clone(),
        title: album.title.clone(),
        badge: album.category.badge(),
        filter_key: album.category.clone(),
        thumbnails: album.photos.iter().map(|url| Thumbnail::new(url)).collect(),
        upload: visibility
            .allows(session)
            .then(|| UploadControl::for_album(&album.id)),
        visible: true,
    }
}

/// Prints the navigation and the gallery grid.
pub fn print_gallery(gallery: &Gallery, nav: &NavControls) {
    print_nav(nav);

    if let Some(error) = gallery.error() {
        eprintln!("\x1b[1m\x1b[31m{}\x1b[0m", error);
        return;
    }

    if gallery.shows_empty_state() {
        println!("\x1b[33m{}\x1b[0m", EMPTY_STATE_TEXT);
        return;
    }

    let mut shown = 0;
    for card in gallery.visible_cards() {
        print_card(card);
        shown += 1;
    }

    if shown == 0 {
        println!("\x1b[33mNo albums in this category.\x1b[0m");
    }
}

fn print_nav(nav: &NavControls) {
    let mut entries = Vec::new();
    if nav.add_album {
        entries.push("[+ New album]");
    }
    if nav.logout {
        entries.push("[Logout]");
    }
    if !entries.is_empty() {
        println!("\x1b[1m\x1b[34m{}\x1b[0m\n", entries.join(" "));
    }
}

fn print_card(card: &AlbumCard) {
    println!(
        "\x1b[1m{}\x1b[0m  \x1b[36m{}\x1b[0m  \x1b[2m(id {})\x1b[0m",
        card.title, card.badge, card.album_id
    );

    for thumbnail in &card.thumbnails {
        println!("  🖼  {}", thumbnail.src);
    }

    if card.upload.is_some() {
        println!(
            "  \x1b[32m📷 Add photos: albumsync upload {} <files>\x1b[0m",
            card.album_id
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::{AlbumId, AlbumRecord};
    use crate::gallery::view::CardAction;

    fn boda_perez() -> Album {
        Album::from(AlbumRecord {
            id: AlbumId::from(1),
            title: "Boda Pérez".to_string(),
            category: Some("social".to_string()),
            photos: vec!["a.jpg".to_string(), "b.jpg".to_string()],
        })
    }

    #[test]
    fn test_card_header_and_thumbnails() {
        let card = render_album(&boda_perez(), &Session::visitor(), ControlVisibility::AdminOnly);

        assert_eq!(card.title, "Boda Pérez");
        assert_eq!(card.badge, "SOCIAL");
        assert_eq!(card.filter_key.as_str(), "social");
        let sources: Vec<&str> = card.thumbnails.iter().map(|t| t.src.as_str()).collect();
        assert_eq!(sources, vec!["a.jpg", "b.jpg"]);
        assert_eq!(
            card.thumbnails[0].on_click,
            CardAction::OpenViewer {
                url: "a.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_visitor_card_has_no_upload_control() {
        let card = render_album(&boda_perez(), &Session::visitor(), ControlVisibility::AdminOnly);
        assert!(card.upload.is_none());
    }

    #[test]
    fn test_admin_card_upload_control_bound_to_album() {
        let card = render_album(&boda_perez(), &Session::admin(), ControlVisibility::AdminOnly);
        let upload = card.upload.expect("admin card should offer uploads");

        assert_eq!(upload.accept, "image/*");
        assert!(upload.multiple);
        assert_eq!(
            upload.on_select,
            CardAction::UploadPhotos {
                album_id: AlbumId::from(1)
            }
        );
    }

    #[test]
    fn test_always_visible_controls_ignore_session() {
        let card = render_album(&boda_perez(), &Session::visitor(), ControlVisibility::Always);
        assert!(card.upload.is_some());
    }
}
