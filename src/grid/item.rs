//! Grid items for WordPress posts and pages

use super::{with_grid, Element, Grid, ItemProps, Props, View};
use crate::content::{ContentRecord, ImageData, WpPage, WpPost};

/// Route prefix of post detail pages
pub const POSTS_ROUTE: &str = "/posts";
/// Route prefix of page detail pages
pub const PAGES_ROUTE: &str = "/pages";

/// Passthrough prop holding the path the site is served under, e.g. `/blog/`
pub const ROOT_PROP: &str = "root";

pub const CARD_CLASS: &str = "grid-card";
pub const CARD_TITLE_CLASS: &str = "grid-card-title";
pub const MEDIA_CLASS: &str = "grid-item-media";
pub const IMAGE_CLASS: &str = "grid-card-image";
pub const PLACEHOLDER_CLASS: &str = "gradient-placeholder";

/// A content record normalized for display
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    pub href: String,
    pub image: Option<ImageData>,
    pub alt_text: String,
    pub title: String,
}

impl GridItem {
    /// Normalize a record, linking it under `route`
    pub fn from_record<R: ContentRecord>(record: &R, route: &str) -> Self {
        let title = non_empty(record.title()).unwrap_or_default().to_string();
        let image = record.image_data().cloned();
        let alt_text = non_empty(record.image_alt_text())
            .unwrap_or(&title)
            .to_string();
        let href = format!("{}{}", route, record.uri().unwrap_or_default());

        Self {
            href,
            image,
            alt_text,
            title,
        }
    }

    /// Whether the item lacks what it needs to be shown as a link
    pub fn is_incomplete(&self) -> bool {
        self.href.is_empty() || self.alt_text.is_empty() || self.title.is_empty()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn gradient_placeholder() -> View {
    Element::new("div").class(PLACEHOLDER_CLASS).into()
}

fn media(child: View) -> Element {
    Element::new("div").class(MEDIA_CLASS).child(child)
}

/// Render a normalized item.
///
/// Incomplete items become a bare placeholder block. A complete item without
/// an image still renders as a link, with the placeholder inside it.
pub fn grid_item(item: &GridItem) -> View {
    if item.is_incomplete() {
        return media(gradient_placeholder()).into();
    }

    let visual = match &item.image {
        Some(image) => image_view(image, &item.alt_text),
        None => gradient_placeholder(),
    };

    Element::new("a")
        .attr("href", item.href.as_str())
        .class(CARD_CLASS)
        .child(media(visual))
        .child(
            Element::new("h2")
                .class(CARD_TITLE_CLASS)
                .child(View::text(format!("{} \u{2192}", item.title))),
        )
        .into()
}

fn image_view(image: &ImageData, alt: &str) -> View {
    let mut img = Element::new("img")
        .class(IMAGE_CLASS)
        .attr("src", image.src.as_str())
        .attr("alt", alt)
        .attr("style", "height:100%;width:100%;object-fit:fill")
        .attr("loading", "lazy");
    if let Some(src_set) = &image.src_set {
        img = img.attr("srcset", src_set.as_str());
    }
    if let Some(sizes) = &image.sizes {
        img = img.attr("sizes", sizes.as_str());
    }
    if let Some(width) = image.width {
        img = img.attr("width", width.to_string());
    }
    if let Some(height) = image.height {
        img = img.attr("height", height.to_string());
    }
    img.into()
}

/// Route prefix under the site root carried in `props`
fn rooted_route(props: &Props, route: &str) -> String {
    match props.get(ROOT_PROP).and_then(|v| v.as_str()) {
        Some(root) => format!("{}{}", root.trim_end_matches('/'), route),
        None => route.to_string(),
    }
}

/// Grid item for posts
pub fn post_grid_item(props: ItemProps<'_, WpPost>) -> View {
    let route = rooted_route(props.props, POSTS_ROUTE);
    grid_item(&GridItem::from_record(props.content, &route))
}

/// Grid item for pages
pub fn page_grid_item(props: ItemProps<'_, WpPage>) -> View {
    let route = rooted_route(props.props, PAGES_ROUTE);
    grid_item(&GridItem::from_record(props.content, &route))
}

pub type ItemFn<T> = for<'a> fn(ItemProps<'a, T>) -> View;

pub type PostGrid = Grid<WpPost, ItemFn<WpPost>>;
pub type PageGrid = Grid<WpPage, ItemFn<WpPage>>;

/// Grid of posts
pub fn post_grid() -> PostGrid {
    with_grid(post_grid_item as ItemFn<WpPost>)
}

/// Grid of pages
pub fn page_grid() -> PageGrid {
    with_grid(page_grid_item as ItemFn<WpPage>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FeaturedImage, ImageSharp, LocalFile, MediaItem};

    fn image() -> ImageData {
        ImageData {
            src: "/static/hello.jpg".to_string(),
            src_set: None,
            sizes: None,
            width: Some(400),
            height: None,
        }
    }

    fn featured(alt_text: Option<&str>, image: Option<ImageData>) -> FeaturedImage {
        FeaturedImage {
            node: MediaItem {
                alt_text: alt_text.map(str::to_string),
                source_url: None,
                local_file: Some(LocalFile {
                    child_image_sharp: Some(ImageSharp {
                        gatsby_image_data: image,
                    }),
                }),
            },
        }
    }

    fn post(title: Option<&str>, uri: Option<&str>, image: Option<FeaturedImage>) -> WpPost {
        WpPost {
            title: title.map(str::to_string),
            uri: uri.map(str::to_string),
            featured_image: image,
            ..Default::default()
        }
    }

    fn render_post(post: &WpPost) -> View {
        post_grid_item(ItemProps {
            key: 0,
            content: post,
            props: &Props::new(),
        })
    }

    #[test]
    fn test_normalize_defaults() {
        let item = GridItem::from_record(&WpPost::default(), POSTS_ROUTE);
        assert_eq!(
            item,
            GridItem {
                href: "/posts".to_string(),
                image: None,
                alt_text: String::new(),
                title: String::new(),
            }
        );
    }

    #[test]
    fn test_alt_text_falls_back_to_title() {
        let record = post(Some("Hello"), Some("/x"), Some(featured(None, Some(image()))));
        let item = GridItem::from_record(&record, POSTS_ROUTE);
        assert_eq!(item.alt_text, "Hello");
        assert_eq!(item.href, "/posts/x");

        let record = post(Some("Hello"), Some("/x"), Some(featured(Some(""), None)));
        assert_eq!(GridItem::from_record(&record, PAGES_ROUTE).alt_text, "Hello");

        let record = post(Some("Hello"), None, Some(featured(Some("A cat"), None)));
        let item = GridItem::from_record(&record, PAGES_ROUTE);
        assert_eq!(item.alt_text, "A cat");
        assert_eq!(item.href, "/pages");
    }

    #[test]
    fn test_missing_title_renders_placeholder() {
        let record = post(None, Some("/x"), Some(featured(None, Some(image()))));
        let item = GridItem::from_record(&record, POSTS_ROUTE);
        assert_eq!(item.alt_text, "");

        let view = render_post(&record);
        let el = view.as_element().unwrap();
        assert_eq!(el.tag, "div");
        assert_eq!(el.get_attr("class"), Some(MEDIA_CLASS));
        assert_eq!(
            el.children[0].as_element().unwrap().get_attr("class"),
            Some(PLACEHOLDER_CLASS)
        );
    }

    #[test]
    fn test_complete_post_renders_link_with_image() {
        let record = post(Some("Hello"), Some("/x"), Some(featured(None, Some(image()))));
        let view = render_post(&record);

        let link = view.as_element().unwrap();
        assert_eq!(link.tag, "a");
        assert_eq!(link.get_attr("href"), Some("/posts/x"));
        let img = link.children[0].as_element().unwrap().children[0]
            .as_element()
            .unwrap();
        assert_eq!(img.tag, "img");
        assert_eq!(img.get_attr("src"), Some("/static/hello.jpg"));
        assert_eq!(img.get_attr("alt"), Some("Hello"));
        assert_eq!(view.text_content(), "Hello \u{2192}");
    }

    #[test]
    fn test_complete_page_links_under_pages() {
        let record = WpPage {
            title: Some("About".to_string()),
            uri: Some("/about/".to_string()),
            ..Default::default()
        };
        let view = page_grid_item(ItemProps {
            key: 0,
            content: &record,
            props: &Props::new(),
        });
        assert_eq!(
            view.as_element().unwrap().get_attr("href"),
            Some("/pages/about/")
        );
    }

    #[test]
    fn test_missing_image_keeps_link() {
        let record = post(Some("Hello"), Some("/x"), None);
        let view = render_post(&record);
        let link = view.as_element().unwrap();
        assert_eq!(link.tag, "a");
        let inner = link.children[0].as_element().unwrap().children[0]
            .as_element()
            .unwrap();
        assert_eq!(inner.get_attr("class"), Some(PLACEHOLDER_CLASS));
    }

    fn complete_item() -> GridItem {
        GridItem {
            href: "/posts/x".to_string(),
            image: Some(image()),
            alt_text: "A cat".to_string(),
            title: "Hello".to_string(),
        }
    }

    fn assert_placeholder(view: &View) {
        let el = view.as_element().unwrap();
        assert_eq!(el.tag, "div");
        assert_eq!(el.get_attr("class"), Some(MEDIA_CLASS));
        assert_eq!(
            el.children[0].as_element().unwrap().get_attr("class"),
            Some(PLACEHOLDER_CLASS)
        );
    }

    #[test]
    fn test_complete_item_renders_link() {
        let view = grid_item(&complete_item());
        assert_eq!(view.as_element().unwrap().tag, "a");
    }

    #[test]
    fn test_empty_alt_text_renders_placeholder() {
        let item = GridItem {
            alt_text: String::new(),
            ..complete_item()
        };
        assert_placeholder(&grid_item(&item));
    }

    #[test]
    fn test_empty_href_renders_placeholder() {
        let item = GridItem {
            href: String::new(),
            ..complete_item()
        };
        assert_placeholder(&grid_item(&item));
    }

    #[test]
    fn test_empty_title_renders_placeholder() {
        let item = GridItem {
            title: String::new(),
            ..complete_item()
        };
        assert_placeholder(&grid_item(&item));
    }

    #[test]
    fn test_root_prop_prefixes_href() {
        let record = post(Some("Hello"), Some("/hello/"), None);
        let mut props = Props::new();
        props.insert(ROOT_PROP.to_string(), serde_json::json!("/blog/"));
        let view = post_grid_item(ItemProps {
            key: 0,
            content: &record,
            props: &props,
        });
        assert_eq!(
            view.as_element().unwrap().get_attr("href"),
            Some("/blog/posts/hello/")
        );

        props.insert(ROOT_PROP.to_string(), serde_json::json!("/"));
        let page = WpPage {
            title: Some("About".to_string()),
            uri: Some("/about/".to_string()),
            ..Default::default()
        };
        let view = page_grid_item(ItemProps {
            key: 0,
            content: &page,
            props: &props,
        });
        assert_eq!(
            view.as_element().unwrap().get_attr("href"),
            Some("/pages/about/")
        );
    }

    #[test]
    fn test_post_grid_html() {
        let posts = vec![
            post(Some("One"), Some("/one/"), None),
            post(None, None, None),
        ];
        let html = post_grid().render(Some(&posts), None, &Props::new()).to_html();
        assert_eq!(
            html,
            concat!(
                r#"<div class="grid-container">"#,
                r#"<a href="/posts/one/" class="grid-card" data-key="0">"#,
                r#"<div class="grid-item-media"><div class="gradient-placeholder"></div></div>"#,
                r#"<h2 class="grid-card-title">One →</h2></a>"#,
                r#"<div class="grid-item-media" data-key="1"><div class="gradient-placeholder"></div></div>"#,
                r#"</div>"#
            )
        );
    }
}
