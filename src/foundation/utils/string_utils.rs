/// Category used when none is given.
pub const DEFAULT_CATEGORY: &str = "social";

/// Normalizes a category into the key used for filtering.
///
/// Surrounding whitespace is trimmed and the text lower-cased. A blank
/// category falls back to [`DEFAULT_CATEGORY`].
///
/// # Examples
///
/// ```
/// use albumsync::foundation::utils::normalize_category;
///
/// assert_eq!(normalize_category(" FUTBOL "), "futbol");
/// assert_eq!(normalize_category(""), "social");
/// ```
pub fn normalize_category(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// Returns the trimmed text, or `None` when nothing but whitespace was given.
pub fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|value| !value.is_empty())
}
