//! Content module - WordPress records and the export they arrive in

pub mod loader;
mod post;

pub use loader::{ContentError, ContentExport, ContentLoader};
pub use post::{
    parse_wp_date, ContentRecord, FeaturedImage, ImageData, ImageSharp, LocalFile, MediaItem,
    PrivatePost, WpPage, WpPost,
};
