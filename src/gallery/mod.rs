pub mod create;
pub mod model;
pub mod render;
pub mod sync;
pub mod view;

pub use create::{create_album, AlbumDraft, AlbumInput, CreateOutcome, Prompter, StdinPrompter};
pub use model::{Album, Category, CategoryFilter};
pub use render::{print_gallery, render_album};
pub use sync::{fetch_albums, reload_gallery, sync_gallery};
pub use view::{AlbumCard, CardAction, Gallery, Thumbnail, UploadControl};
