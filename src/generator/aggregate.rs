//! Site-wide artifacts built from every post: home listing, sitemap, robots

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{escape_html, escape_xml, BuildDate};

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Posts ordered newest update first
///
/// Dates are compared as strings, which is chronological only for
/// `YYYY-MM-DD`. Ties keep their file-name order.
pub fn sort_by_updated(posts: &[Post]) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| b.updated.cmp(&a.updated));
    sorted
}

/// Home page content: the most recently updated posts
pub fn home_listing(sorted: &[&Post], config: &SiteConfig) -> String {
    if sorted.is_empty() {
        return format!("<p>{}</p>", escape_html(&config.empty_message));
    }

    sorted
        .iter()
        .take(config.home_limit)
        .map(|post| {
            format!(
                r#"<article><h2><a href="{}">{}</a></h2><p>{}</p><small>{}</small></article>"#,
                post.url,
                escape_html(&post.title),
                escape_html(post.summary()),
                post.date
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sitemap listing the home page and every post, stamped with the build date
pub fn sitemap(sorted: &[&Post], config: &SiteConfig, build_date: &BuildDate) -> String {
    let home = format!("{}/", config.base_url);
    let urls: String = std::iter::once(home.as_str())
        .chain(sorted.iter().map(|post| post.url.as_str()))
        .map(|loc| {
            format!(
                "<url><loc>{}</loc><lastmod>{}</lastmod></url>",
                escape_xml(loc),
                build_date.today
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{}\">\n{}\n</urlset>",
        SITEMAP_NS, urls
    )
}

/// Robots file pointing crawlers at the sitemap
pub fn robots(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml\n",
        config.base_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use chrono::NaiveDate;

    fn build_date() -> BuildDate {
        BuildDate::from_date(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
    }

    fn config() -> SiteConfig {
        SiteConfig {
            base_url: "https://example.com".to_string(),
            ..SiteConfig::default()
        }
    }

    fn post(stem: &str, updated: &str) -> Post {
        let (fm, _) = FrontMatter::parse(&format!(
            "---\ntitle: {stem}\ndate: 2024-01-01\nupdated: {updated}\n---\n"
        ));
        Post::resolve(&format!("{stem}.md"), stem, &fm, "", &config(), &build_date())
    }

    #[test]
    fn test_sort_by_updated_descending() {
        let posts = vec![
            post("a", "2024-01-01"),
            post("b", "2024-03-05"),
            post("c", "2024-02-10"),
        ];
        let order: Vec<_> = sort_by_updated(&posts)
            .iter()
            .map(|p| p.updated.as_str())
            .collect();
        assert_eq!(order, vec!["2024-03-05", "2024-02-10", "2024-01-01"]);
    }

    #[test]
    fn test_sort_ties_are_stable() {
        let posts = vec![post("first", "2024-01-01"), post("second", "2024-01-01")];
        let order: Vec<_> = sort_by_updated(&posts).iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn test_home_listing_limit() {
        let posts: Vec<_> = (1..=12)
            .map(|i| post(&format!("p{i:02}"), &format!("2024-01-{i:02}")))
            .collect();
        let sorted = sort_by_updated(&posts);
        let html = home_listing(&sorted, &config());
        assert_eq!(html.matches("<article>").count(), 10);
        assert!(html.starts_with(
            r#"<article><h2><a href="https://example.com/2024/01/p12/index.html">p12</a></h2>"#
        ));
        assert!(!html.contains(">p02<"));
    }

    #[test]
    fn test_home_listing_empty() {
        assert_eq!(
            home_listing(&[], &config()),
            "<p>No posts yet. Publish your first post.</p>"
        );
    }

    #[test]
    fn test_sitemap() {
        let posts = vec![post("old", "2024-01-01"), post("new", "2024-05-01")];
        let sorted = sort_by_updated(&posts);
        let xml = sitemap(&sorted, &config(), &build_date());
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
             <url><loc>https://example.com/</loc><lastmod>2025-06-30</lastmod></url>\
             <url><loc>https://example.com/2024/01/new/index.html</loc><lastmod>2025-06-30</lastmod></url>\
             <url><loc>https://example.com/2024/01/old/index.html</loc><lastmod>2025-06-30</lastmod></url>\n\
             </urlset>"
        );
    }

    #[test]
    fn test_robots() {
        assert_eq!(
            robots(&config()),
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n"
        );
    }
}
