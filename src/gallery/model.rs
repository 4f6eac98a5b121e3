use crate::api_client::{AlbumId, AlbumRecord};
use crate::foundation::utils::normalize_category;
use std::fmt;

/// Normalized album category; doubles as the card's filter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    pub fn new(raw: &str) -> Self {
        Category(normalize_category(raw))
    }

    /// A category exactly as a filter names it, only lower-cased. Unlike
    /// [`Category::new`] a blank value does not fall back to the default.
    pub fn exact(raw: &str) -> Self {
        Category(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased label shown on the card header.
    pub fn badge(&self) -> String {
        self.0.to_uppercase()
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::new("")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Album view-model.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub category: Category,
    /// Photo URLs in display order.
    pub photos: Vec<String>,
}

impl Album {
    /// A freshly created album, before any photo is uploaded.
    pub fn empty(id: AlbumId, title: &str, category: Category) -> Self {
        Self {
            id,
            title: title.to_string(),
            category,
            photos: Vec::new(),
        }
    }
}

impl From<AlbumRecord> for Album {
    fn from(record: AlbumRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            category: Category::new(record.category.as_deref().unwrap_or_default()),
            photos: record.photos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// `all` or an empty value shows every card.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::exact(value))
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}
