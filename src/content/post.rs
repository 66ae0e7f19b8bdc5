//! WordPress post and page models, as exported by the content pipeline

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Fields shared by every record a grid item can be built from
pub trait ContentRecord {
    /// Record title, if any
    fn title(&self) -> Option<&str>;

    /// Path relative to the record's route, e.g. `/hello-world/`
    fn uri(&self) -> Option<&str>;

    /// Featured image reference
    fn featured_image(&self) -> Option<&FeaturedImage>;

    /// Processed image data of the featured image
    fn image_data(&self) -> Option<&ImageData> {
        self.featured_image()?.node.image_data()
    }

    /// Alt text of the featured image
    fn image_alt_text(&self) -> Option<&str> {
        self.featured_image()?.node.alt_text.as_deref()
    }
}

/// A WordPress post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WpPost {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uri: Option<String>,
    /// Publication date as sent by WordPress (`2023-01-05T10:00:00`)
    pub date: Option<String>,
    pub excerpt: Option<String>,
    /// Rendered HTML body
    pub content: Option<String>,
    pub featured_image: Option<FeaturedImage>,
}

impl WpPost {
    /// Parse the publication date
    pub fn published(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_wp_date)
    }
}

impl ContentRecord for WpPost {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    fn featured_image(&self) -> Option<&FeaturedImage> {
        self.featured_image.as_ref()
    }
}

/// A WordPress page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WpPage {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uri: Option<String>,
    pub date: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<FeaturedImage>,
}

impl ContentRecord for WpPage {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    fn featured_image(&self) -> Option<&FeaturedImage> {
        self.featured_image.as_ref()
    }
}

/// A post that can only be fetched with application credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivatePost {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uri: Option<String>,
}

/// Edge to the media item used as featured image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub node: MediaItem,
}

/// A WordPress media item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    pub alt_text: Option<String>,
    pub source_url: Option<String>,
    pub local_file: Option<LocalFile>,
}

impl MediaItem {
    /// Image data produced by the image pipeline, if the file was processed
    pub fn image_data(&self) -> Option<&ImageData> {
        self.local_file
            .as_ref()?
            .child_image_sharp
            .as_ref()?
            .gatsby_image_data
            .as_ref()
    }
}

/// Downloaded copy of a media item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalFile {
    pub child_image_sharp: Option<ImageSharp>,
}

/// Output of the image pipeline for one file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSharp {
    pub gatsby_image_data: Option<ImageData>,
}

/// A processed, ready-to-display image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawImageData")]
pub struct ImageData {
    pub src: String,
    pub src_set: Option<String>,
    pub sizes: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Wire shape of image data: `{ images: { fallback: { src, srcSet, sizes } }, width, height }`
#[derive(Deserialize)]
struct RawImageData {
    #[serde(default)]
    images: RawImages,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Default, Deserialize)]
struct RawImages {
    #[serde(default)]
    fallback: RawImageSource,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawImageSource {
    src: String,
    src_set: Option<String>,
    sizes: Option<String>,
}

impl From<RawImageData> for ImageData {
    fn from(raw: RawImageData) -> Self {
        let fallback = raw.images.fallback;
        Self {
            src: fallback.src,
            src_set: fallback.src_set,
            sizes: fallback.sizes,
            width: raw.width,
            height: raw.height,
        }
    }
}

/// Parse a WordPress date, with or without a UTC offset
pub fn parse_wp_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}
