//! List exported content

use anyhow::Result;

use crate::content::{ContentExport, ContentLoader, ContentRecord};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let export = ContentLoader::new(site).load()?;
    for line in format_listing(&export, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Lines describing one kind of exported content
pub fn format_listing(export: &ContentExport, content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match content_type {
        "post" | "posts" => match &export.posts {
            Some(posts) => {
                lines.push(format!("Posts ({}):", posts.len()));
                for post in posts {
                    let date = post
                        .published()
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "----------".to_string());
                    lines.push(format!(
                        "  {} - {} [{}]",
                        date,
                        post.title().unwrap_or("(untitled)"),
                        post.uri().unwrap_or("-")
                    ));
                }
            }
            None => lines.push("Posts: not exported".to_string()),
        },
        "page" | "pages" => match &export.pages {
            Some(pages) => {
                lines.push(format!("Pages ({}):", pages.len()));
                for page in pages {
                    lines.push(format!(
                        "  {} [{}]",
                        page.title().unwrap_or("(untitled)"),
                        page.uri().unwrap_or("-")
                    ));
                }
            }
            None => lines.push("Pages: not exported".to_string()),
        },
        "private" => match &export.private_posts {
            Some(posts) => {
                lines.push(format!("Private posts ({}):", posts.len()));
                for post in posts {
                    lines.push(format!(
                        "  {}",
                        post.title.as_deref().unwrap_or("(untitled)")
                    ));
                }
            }
            None => lines.push("Private posts: not exported".to_string()),
        },
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, private",
                content_type
            );
        }
    }

    Ok(lines)
}
