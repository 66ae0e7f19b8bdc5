//! Generator module - writes the rendered site using the built-in templates

use anyhow::Result;
use chrono::Datelike;
use std::fs;
use std::path::{Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::content::{ContentExport, ContentRecord, WpPage, WpPost};
use crate::grid::item::{PAGES_ROUTE, POSTS_ROUTE, ROOT_PROP};
use crate::grid::{page_grid, post_grid, Element, GridItem, Props, View};
use crate::helpers::{full_url_for, uri_segments, url_for};
use crate::templates::{ConfigData, EntryData, MenuItem, TemplateRenderer, GRID_CSS};
use crate::Site;

/// Route of the authorization demo
pub const AUTH_API_ROUTE: &str = "/auth-api";

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, export: &ContentExport) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.write_stylesheet()?;
        self.copy_static_assets()?;

        self.generate_home(export.posts.as_deref())?;
        self.generate_post_listing(export.posts.as_deref())?;
        self.generate_page_listing(export.pages.as_deref())?;

        if let Some(posts) = &export.posts {
            self.generate_post_pages(posts)?;
        }
        if let Some(pages) = &export.pages {
            self.generate_page_pages(pages)?;
        }

        self.generate_auth_api(export)?;

        Ok(())
    }

    /// Build config data for templates
    fn build_config_data(&self) -> ConfigData {
        let config = &self.site.config;
        ConfigData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
            root: config.root.clone(),
            home_title: config.home_title.clone(),
        }
    }

    fn build_nav(&self) -> Vec<MenuItem> {
        [
            ("Home", "/"),
            ("Posts", POSTS_ROUTE),
            ("Pages", PAGES_ROUTE),
            ("API Authorization", AUTH_API_ROUTE),
        ]
        .into_iter()
        .map(|(name, path)| MenuItem {
            name: name.to_string(),
            path: url_for(&self.site.config, &format!("{}/", path.trim_end_matches('/'))),
        })
        .collect()
    }

    /// Create a base context with common variables
    fn create_base_context(&self, page_title: &str, route: &str) -> Context {
        let config = &self.site.config;
        let route = format!("{}/", route.trim_end_matches('/'));
        let current_url = url_for(config, &route);

        let mut context = Context::new();
        context.insert("config", &self.build_config_data());
        context.insert("nav", &self.build_nav());
        context.insert("page_title", page_title);
        context.insert("description", "");
        context.insert("canonical", &full_url_for(config, &route));
        context.insert("current_url", &current_url);
        context.insert("home_url", &url_for(config, "/"));
        context.insert("css_url", &url_for(config, "/css/grid.css"));
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("year", &chrono::Local::now().year());
        context
    }

    /// Props forwarded to every grid item, so card links follow the site root
    fn grid_props(&self) -> Props {
        let mut props = Props::new();
        props.insert(
            ROOT_PROP.to_string(),
            serde_json::Value::from(self.site.config.root.as_str()),
        );
        props
    }

    /// Generate the home page with the post grid
    fn generate_home(&self, posts: Option<&[WpPost]>) -> Result<()> {
        let fallback = || no_content("No posts found.");
        let grid = post_grid().render(posts, Some(&fallback), &self.grid_props());

        let mut context = self.create_base_context("", "/");
        context.insert("grid_html", &grid.to_html());
        context.insert("more_url", &url_for(&self.site.config, "/posts/"));

        let html = self.renderer.render("index.html", &context)?;
        self.write_page(&self.site.public_dir.join("index.html"), &html)
    }

    /// Generate the listing of all posts
    fn generate_post_listing(&self, posts: Option<&[WpPost]>) -> Result<()> {
        let fallback = || no_content("No posts found.");
        let grid = post_grid().render(posts, Some(&fallback), &self.grid_props());
        self.write_listing("Posts", POSTS_ROUTE, &grid)
    }

    /// Generate the listing of all pages
    fn generate_page_listing(&self, pages: Option<&[WpPage]>) -> Result<()> {
        let fallback = || no_content("No pages found.");
        let grid = page_grid().render(pages, Some(&fallback), &self.grid_props());
        self.write_listing("Pages", PAGES_ROUTE, &grid)
    }

    fn write_listing(&self, title: &str, route: &str, grid: &View) -> Result<()> {
        let mut context = self.create_base_context(title, route);
        context.insert("grid_html", &grid.to_html());

        let html = self.renderer.render("listing.html", &context)?;
        let output_path = self
            .site
            .public_dir
            .join(route.trim_matches('/'))
            .join("index.html");
        self.write_page(&output_path, &html)
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[WpPost]) -> Result<()> {
        for post in posts {
            let Some(output_path) = self.detail_path(POSTS_ROUTE, post.uri()) else {
                continue;
            };

            let item = GridItem::from_record(post, POSTS_ROUTE);
            let entry = EntryData {
                title: item.title.clone(),
                date: post.published().map(|d| d.format("%B %-d, %Y").to_string()),
                content: post.content.clone().unwrap_or_default(),
                image: item.image,
                alt_text: item.alt_text,
                back_url: url_for(&self.site.config, "/posts/"),
                back_label: "All posts".to_string(),
            };

            let mut context = self.create_base_context(&item.title, &item.href);
            context.insert("description", post.excerpt.as_deref().unwrap_or_default());
            context.insert("entry", &entry);

            let html = self.renderer.render("single.html", &context)?;
            self.write_page(&output_path, &html)?;
        }

        Ok(())
    }

    /// Generate individual standalone pages
    fn generate_page_pages(&self, pages: &[WpPage]) -> Result<()> {
        for page in pages {
            let Some(output_path) = self.detail_path(PAGES_ROUTE, page.uri()) else {
                continue;
            };

            let item = GridItem::from_record(page, PAGES_ROUTE);
            let entry = EntryData {
                title: item.title.clone(),
                date: None,
                content: page.content.clone().unwrap_or_default(),
                image: item.image,
                alt_text: item.alt_text,
                back_url: url_for(&self.site.config, "/pages/"),
                back_label: "All pages".to_string(),
            };

            let mut context = self.create_base_context(&item.title, &item.href);
            context.insert("entry", &entry);

            let html = self.renderer.render("single.html", &context)?;
            self.write_page(&output_path, &html)?;
        }

        Ok(())
    }

    /// Output file of a detail page, or `None` when the URI cannot be written
    fn detail_path(&self, route: &str, uri: Option<&str>) -> Option<PathBuf> {
        let Some(uri) = uri else {
            tracing::warn!("Skipping {} entry without uri", route);
            return None;
        };

        match uri_segments(uri) {
            Some(segments) if !segments.is_empty() => {
                let mut path = self.site.public_dir.join(route.trim_matches('/'));
                path.extend(segments);
                Some(path.join("index.html"))
            }
            Some(_) => {
                tracing::warn!("Skipping {} entry with empty uri {:?}", route, uri);
                None
            }
            None => {
                tracing::warn!("Skipping {} entry with unsafe uri {:?}", route, uri);
                None
            }
        }
    }

    /// Generate the authorization demo
    fn generate_auth_api(&self, export: &ContentExport) -> Result<()> {
        let private_titles: Vec<String> = export
            .private_posts
            .iter()
            .flatten()
            .map(|p| {
                p.title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Untitled".to_string())
            })
            .collect();
        let authorized = !private_titles.is_empty();
        tracing::debug!("Authorized request succeeded: {}", authorized);

        let mut context = self.create_base_context("API Authorization Example", AUTH_API_ROUTE);
        context.insert("authorized", &authorized);
        context.insert("private_titles", &private_titles);
        context.insert("docs_url", &self.site.config.auth_docs_url);

        let html = self.renderer.render("auth_api.html", &context)?;
        let output_path = self
            .site
            .public_dir
            .join(AUTH_API_ROUTE.trim_matches('/'))
            .join("index.html");
        self.write_page(&output_path, &html)
    }

    fn write_stylesheet(&self) -> Result<()> {
        self.write_page(&self.site.public_dir.join("css/grid.css"), GRID_CSS)
    }

    fn write_page(&self, output_path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, content)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy the static directory into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() {
                let relative = path.strip_prefix(static_dir)?;
                let dest = self.site.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}

/// Fallback shown when a content list was never exported
fn no_content(message: &str) -> View {
    Element::new("p")
        .class("grid-empty")
        .child(View::text(message))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(json: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let export = ContentExport::from_json(json).unwrap();
        Generator::new(&site).unwrap().generate(&export).unwrap();
        let public = site.public_dir.clone();
        (dir, public)
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_generates_home_and_detail_pages() {
        let (_dir, public) = generate(
            r#"{
                "posts": [
                    { "title": "Hello", "uri": "/hello/", "date": "2023-01-05T10:00:00", "content": "<p>Body</p>" },
                    { "title": "Escape", "uri": "/../escape/" }
                ],
                "pages": [{ "title": "About", "uri": "/about/" }]
            }"#,
        );

        let home = read(public.join("index.html"));
        assert!(home.contains(r#"<a href="/posts/hello/" class="grid-card" data-key="0">"#));
        assert!(home.contains("Hello →"));

        let post = read(public.join("posts/hello/index.html"));
        assert!(post.contains("<p>Body</p>"));
        assert!(post.contains("January 5, 2023"));
        assert!(public.join("pages/about/index.html").exists());
        assert!(!public.join("escape").exists());
        assert!(!public.join("posts/escape").exists());
        assert!(public.join("css/grid.css").exists());
    }

    #[test]
    fn test_card_links_follow_site_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "root: /blog/\n").unwrap();
        fs::write(
            dir.path().join("content.json"),
            r#"{ "posts": [{ "title": "Hello", "uri": "/hello/" }], "pages": [{ "title": "About", "uri": "/about/" }] }"#,
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        site.generate().unwrap();

        let home = read(site.public_dir.join("index.html"));
        assert!(home.contains(r#"<a href="/blog/posts/">Posts</a>"#));
        assert!(home.contains(r#"<a href="/blog/posts/hello/" class="grid-card" data-key="0">"#));
        let pages = read(site.public_dir.join("pages/index.html"));
        assert!(pages.contains(r#"<a href="/blog/pages/about/" class="grid-card" data-key="0">"#));

        // Output layout does not depend on the root
        assert!(site.public_dir.join("posts/hello/index.html").exists());
    }

    #[test]
    fn test_percent_encoded_uri_is_decoded_on_disk() {
        let (_dir, public) = generate(r#"{ "posts": [{ "title": "Cafe", "uri": "/caf%c3%a9/" }] }"#);
        assert!(public.join("posts/caf\u{e9}/index.html").exists());
        assert!(!public.join("posts/caf%c3%a9").exists());
    }

    #[test]
    fn test_absent_posts_render_fallback() {
        let (_dir, public) = generate(r#"{ "pages": [] }"#);

        let posts = read(public.join("posts/index.html"));
        assert!(posts.contains("No posts found."));

        let pages = read(public.join("pages/index.html"));
        assert!(pages.contains(r#"<div class="grid-container"></div>"#));
        assert!(!pages.contains("No pages found."));
    }

    #[test]
    fn test_auth_api_page() {
        let (_dir, public) = generate(r#"{ "privatePosts": [] }"#);
        let html = read(public.join("auth-api/index.html"));
        assert!(html.contains("WP_APPLICATION_USERNAME"));

        let (_dir, public) = generate(r#"{ "privatePosts": [{ "title": "Members only" }] }"#);
        let html = read(public.join("auth-api/index.html"));
        assert!(html.contains("successfully make an authenticated request"));
        assert!(html.contains("Members only"));
    }

    #[test]
    fn test_copies_static_assets() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("static/img")).unwrap();
        fs::write(dir.path().join("static/img/logo.svg"), "<svg/>").unwrap();

        let site = Site::new(dir.path()).unwrap();
        Generator::new(&site)
            .unwrap()
            .generate(&ContentExport::default())
            .unwrap();
        assert_eq!(read(site.public_dir.join("img/logo.svg")), "<svg/>");
    }
}
