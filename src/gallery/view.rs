//! The rendered gallery: a grid of album cards plus its placeholder and
//! error states.
//!
//! Handlers are bound to each element as a [`CardAction`] when it is built,
//! so a thumbnail or upload control always knows which URL or album it
//! belongs to.

use crate::api_client::AlbumId;
use crate::configuration::RefreshMode;
use crate::gallery::model::{Category, CategoryFilter};
use tracing::warn;

pub const EMPTY_STATE_TEXT: &str = "No albums yet.";
pub const IMAGE_ACCEPT: &str = "image/*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Open the full-screen viewer on this photo.
    OpenViewer { url: String },
    /// Pick files and upload them into this album.
    UploadPhotos { album_id: AlbumId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub src: String,
    pub on_click: CardAction,
}

impl Thumbnail {
    pub fn new(url: &str) -> Self {
        Self {
            src: url.to_string(),
            on_click: CardAction::OpenViewer {
                url: url.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadControl {
    pub accept: &'static str,
    pub multiple: bool,
    pub on_select: CardAction,
}

impl UploadControl {
    pub fn for_album(album_id: &AlbumId) -> Self {
        Self {
            accept: IMAGE_ACCEPT,
            multiple: true,
            on_select: CardAction::UploadPhotos {
                album_id: album_id.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumCard {
    pub album_id: AlbumId,
    pub title: String,
    pub badge: String,
    pub filter_key: Category,
    pub thumbnails: Vec<Thumbnail>,
    pub upload: Option<UploadControl>,
    pub visible: bool,
}

impl AlbumCard {
    pub fn append_thumbnail(&mut self, url: &str) {
        self.thumbnails.push(Thumbnail::new(url));
    }
}

#[derive(Debug, Clone)]
pub struct Gallery {
    cards: Vec<AlbumCard>,
    error: Option<String>,
    refresh: RefreshMode,
    filter: CategoryFilter,
}

impl Gallery {
    pub fn new(refresh: RefreshMode) -> Self {
        Self {
            cards: Vec::new(),
            error: None,
            refresh,
            filter: CategoryFilter::All,
        }
    }

    /// Adds a card to the grid.
    ///
    /// Incremental galleries put the newest card first; galleries that reload
    /// after uploads keep server order. A card whose album id is already shown
    /// replaces the old card in place.
    pub fn insert(&mut self, mut card: AlbumCard) {
        self.error = None;
        card.visible = self.filter.matches(&card.filter_key);

        if let Some(existing) = self
            .cards
            .iter_mut()
            .find(|existing| existing.album_id == card.album_id)
        {
            warn!(album_id = %card.album_id, "album already rendered, replacing card");
            *existing = card;
            return;
        }

        match self.refresh {
            RefreshMode::Incremental => self.cards.insert(0, card),
            RefreshMode::ReloadAfterUpload => self.cards.push(card),
        }
    }

    /// Appends a thumbnail to an album's photo strip. Returns `false` when the
    /// album is not on the grid.
    pub fn append_thumbnail(&mut self, album_id: &AlbumId, url: &str) -> bool {
        match self.card_mut(album_id) {
            Some(card) => {
                card.append_thumbnail(url);
                true
            }
            None => false,
        }
    }

    /// Replaces the whole grid with a user-facing error.
    pub fn show_error(&mut self, message: &str) {
        self.cards.clear();
        self.error = Some(message.to_string());
    }

    /// Drops every card and error, as before a full reload.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.error = None;
    }

    pub fn apply_filter(&mut self, filter: CategoryFilter) {
        for card in &mut self.cards {
            card.visible = filter.matches(&card.filter_key);
        }
        self.filter = filter;
    }

    pub fn shows_empty_state(&self) -> bool {
        self.error.is_none() && self.cards.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cards(&self) -> &[AlbumCard] {
        &self.cards
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &AlbumCard> {
        self.cards.iter().filter(|card| card.visible)
    }

    pub fn card(&self, album_id: &AlbumId) -> Option<&AlbumCard> {
        self.cards.iter().find(|card| &card.album_id == album_id)
    }

    fn card_mut(&mut self, album_id: &AlbumId) -> Option<&mut AlbumCard> {
        self.cards.iter_mut().find(|card| &card.album_id == album_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64, category: &str) -> AlbumCard {
        let category = Category::new(category);
        AlbumCard {
            album_id: AlbumId::from(id),
            title: format!("Album {}", id),
            badge: category.badge(),
            filter_key: category,
            thumbnails: Vec::new(),
            upload: None,
            visible: true,
        }
    }

    fn ids(gallery: &Gallery) -> Vec<String> {
        gallery
            .cards()
            .iter()
            .map(|card| card.album_id.to_string())
            .collect()
    }

    #[test]
    fn test_new_gallery_shows_only_empty_state() {
        let gallery = Gallery::new(RefreshMode::Incremental);
        assert!(gallery.shows_empty_state());
        assert!(gallery.cards().is_empty());
        assert!(gallery.error().is_none());
    }

    #[test]
    fn test_first_card_removes_empty_state() {
        let mut gallery = Gallery::new(RefreshMode::Incremental);
        gallery.insert(card(1, "social"));
        assert!(!gallery.shows_empty_state());
    }

    #[test]
    fn test_incremental_prepends_newest_card() {
        let mut gallery = Gallery::new(RefreshMode::Incremental);
        gallery.insert(card(1, "social"));
        gallery.insert(card(2, "futbol"));
        gallery.insert(card(3, "basquet"));
        assert_eq!(ids(&gallery), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_reload_mode_keeps_server_order() {
        let mut gallery = Gallery::new(RefreshMode::ReloadAfterUpload);
        gallery.insert(card(3, "social"));
        gallery.insert(card(2, "social"));
        gallery.insert(card(1, "social"));
        assert_eq!(ids(&gallery), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_duplicate_id_replaces_card_in_place() {
        let mut gallery = Gallery::new(RefreshMode::Incremental);
        gallery.insert(card(1, "social"));
        gallery.insert(card(2, "social"));

        let mut replacement = card(1, "futbol");
        replacement.title = "Renamed".to_string();
        gallery.insert(replacement);

        assert_eq!(ids(&gallery), vec!["2", "1"]);
        assert_eq!(
            gallery.card(&AlbumId::from(1)).unwrap().title,
            "Renamed"
        );
    }

    #[test]
    fn test_numeric_and_text_forms_of_an_id_share_one_card() {
        let mut gallery = Gallery::new(RefreshMode::Incremental);
        gallery.insert(card(1, "social"));

        let mut same_album = card(1, "social");
        same_album.album_id = serde_json::from_str(r#""1""#).unwrap();
        same_album.title = "Renamed".to_string();
        gallery.insert(same_album);

        assert_eq!(gallery.cards().len(), 1);
        assert_eq!(gallery.card(&AlbumId::from("1")).unwrap().title, "Renamed");
    }

    #[test]
    fn test_append_thumbnail_keeps_append_order() {
        let mut gallery = Gallery::new(RefreshMode::Incremental);
        gallery.insert(card(1, "social"));

        assert!(gallery.append_thumbnail(&AlbumId::from(1), "https://cdn/a.jpg"));
        assert!(gallery.append_thumbnail(&AlbumId::from(1), "https://cdn/b.jpg"));
        assert!(!gallery.append_thumbnail(&AlbumId::from(9), "https://cdn/c.jpg"));

        let thumbnails = &gallery.card(&AlbumId::from(1)).unwrap().thumbnails;
        assert_eq!(thumbnails[0].src, "https://cdn/a.jpg");
        assert_eq!(thumbnails[1].src, "https://cdn/b.jpg");
        assert_eq!(
            thumbnails[1].on_click,
            CardAction::OpenViewer {
                url: "https://cdn/b.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_error_replaces_grid() {
        let mut gallery = Gallery::new(RefreshMode::Incremental);
        gallery.insert(card(1, "social"));
        gallery.show_error("Could not load albums");

        assert!(gallery.cards().is_empty());
        assert!(!gallery.shows_empty_state());
        assert_eq!(gallery.error(), Some("Could not load albums"));
    }

    #[test]
    fn test_filter_hides_other_categories() {
        let mut gallery = Gallery::new(RefreshMode::Incremental);
        gallery.insert(card(1, "social"));
        gallery.insert(card(2, "futbol"));
        gallery.insert(card(3, "futbol"));

        gallery.apply_filter(CategoryFilter::parse("futbol"));
        let visible: Vec<String> = gallery
            .visible_cards()
            .map(|card| card.album_id.to_string())
            .collect();
        assert_eq!(visible, vec!["3", "2"]);

        gallery.apply_filter(CategoryFilter::parse("all"));
        assert_eq!(gallery.visible_cards().count(), 3);
    }

    #[test]
    fn test_cards_added_under_filter_respect_it() {
        let mut gallery = Gallery::new(RefreshMode::Incremental);
        gallery.apply_filter(CategoryFilter::parse("futbol"));
        gallery.insert(card(1, "social"));
        gallery.insert(card(2, "futbol"));

        assert_eq!(gallery.visible_cards().count(), 1);
    }
}
