//! Content loader - reads the JSON export written by the content pipeline

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{PrivatePost, WpPage, WpPost};
use crate::Site;

/// Errors raised while reading the export
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid content export {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the pipeline exported for one build.
///
/// A list missing from the file stays `None`; an empty array stays `Some(vec![])`.
/// Grids render their fallback only for the former.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentExport {
    pub posts: Option<Vec<WpPost>>,
    pub pages: Option<Vec<WpPage>>,
    pub private_posts: Option<Vec<PrivatePost>>,
}

impl ContentExport {
    /// Parse an export from a JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Loads the content export of a site
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Path of the export file
    pub fn data_path(&self) -> &Path {
        &self.site.data_path
    }

    /// Load the export. A missing file yields an export with every list absent.
    pub fn load(&self) -> Result<ContentExport, ContentError> {
        let path = self.data_path();
        if !path.exists() {
            tracing::warn!("Content export not found: {:?}", path);
            return Ok(ContentExport::default());
        }

        let json = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let export = ContentExport::from_json(&json).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            "Loaded {} posts, {} pages, {} private posts from {:?}",
            export.posts.as_ref().map_or(0, Vec::len),
            export.pages.as_ref().map_or(0, Vec::len),
            export.private_posts.as_ref().map_or(0, Vec::len),
            path
        );

        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_lists() {
        let export = ContentExport::from_json(r#"{ "posts": [] }"#).unwrap();
        assert_eq!(export.posts.map(|p| p.len()), Some(0));
        assert!(export.pages.is_none());
        assert!(export.private_posts.is_none());
    }

    #[test]
    fn test_null_list_is_absent() {
        let export = ContentExport::from_json(r#"{ "pages": null }"#).unwrap();
        assert!(export.pages.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let export = ContentLoader::new(&site).load().unwrap();
        assert!(export.posts.is_none());
        assert!(export.pages.is_none());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("content.json"), "{ not json").unwrap();
        let site = Site::new(dir.path()).unwrap();
        let err = ContentLoader::new(&site).load().unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }

    #[test]
    fn test_load_export() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("content.json"),
            r#"{ "posts": [{ "title": "One", "uri": "/one/" }], "privatePosts": [{ "title": "Secret" }] }"#,
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();
        let export = ContentLoader::new(&site).load().unwrap();
        assert_eq!(export.posts.unwrap()[0].title.as_deref(), Some("One"));
        assert_eq!(export.private_posts.unwrap().len(), 1);
    }
}
