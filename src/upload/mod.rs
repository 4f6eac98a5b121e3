mod pipeline;
mod queue;

pub use pipeline::*;
pub use queue::{collect_photos, PendingPhoto, UploadQueue};
