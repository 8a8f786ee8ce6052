//! JSON-LD structured data blocks

use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::absolute_url;

/// `BlogPosting` and `BreadcrumbList` for one post
pub fn post_json_ld(post: &Post, config: &SiteConfig) -> String {
    let mut posting = json!({
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.summary(),
    });
    if !post.cover.is_empty() {
        posting["image"] = json!({
            "@type": "ImageObject",
            "url": absolute_url(&post.cover, &config.base_url),
        });
    }
    posting["datePublished"] = json!(post.date);
    posting["dateModified"] = json!(post.updated);
    posting["mainEntityOfPage"] = json!({ "@type": "WebPage", "@id": post.url });
    posting["publisher"] = json!({ "@type": "Organization", "name": config.site_name });

    let breadcrumbs = json!({
        "@type": "BreadcrumbList",
        "itemListElement": [
            {
                "@type": "ListItem",
                "position": 1,
                "name": config.site_name,
                "item": format!("{}/", config.base_url),
            },
            {
                "@type": "ListItem",
                "position": 2,
                "name": post.title,
                "item": post.url,
            }
        ]
    });

    script(vec![posting, breadcrumbs])
}

/// `Organization` and `WebSite` entries for every page
pub fn site_json_ld(config: &SiteConfig) -> String {
    script(vec![
        json!({ "@type": "Organization", "name": config.site_name, "url": config.base_url }),
        json!({ "@type": "WebSite", "name": config.site_name, "url": config.base_url }),
    ])
}

/// Wrap a graph in a script tag
///
/// `</` is written as `<\/` so a title cannot close the script element.
fn script(graph: Vec<Value>) -> String {
    let document = json!({
        "@context": "https://schema.org",
        "@graph": graph,
    });
    format!(
        r#"<script type="application/ld+json">{}</script>"#,
        document.to_string().replace("</", "<\\/")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use crate::helpers::BuildDate;
    use chrono::NaiveDate;

    fn config() -> SiteConfig {
        SiteConfig {
            site_name: "Deal Notes".to_string(),
            base_url: "https://example.com".to_string(),
            ..SiteConfig::default()
        }
    }

    fn post(front_matter: &str) -> Post {
        let (fm, _) = FrontMatter::parse(front_matter);
        let date = BuildDate::from_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        Post::resolve("p.md", "p", &fm, "<p>Body</p>", &config(), &date)
    }

    fn graph(script: &str) -> Value {
        let json = script
            .strip_prefix(r#"<script type="application/ld+json">"#)
            .and_then(|s| s.strip_suffix("</script>"))
            .unwrap();
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_post_json_ld() {
        let post = post("---\ntitle: Hi\ndate: 2024-05-01\nupdated: 2024-05-03\ncover: img/c.png\n---\n");
        let doc = graph(&post_json_ld(&post, &config()));
        assert_eq!(doc["@context"], "https://schema.org");

        let posting = &doc["@graph"][0];
        assert_eq!(posting["@type"], "BlogPosting");
        assert_eq!(posting["headline"], "Hi");
        assert_eq!(posting["description"], "Body");
        assert_eq!(posting["image"]["url"], "https://example.com/img/c.png");
        assert_eq!(posting["datePublished"], "2024-05-01");
        assert_eq!(posting["dateModified"], "2024-05-03");
        assert_eq!(
            posting["mainEntityOfPage"]["@id"],
            "https://example.com/2024/05/p/index.html"
        );
        assert_eq!(posting["publisher"]["name"], "Deal Notes");

        let crumbs = &doc["@graph"][1]["itemListElement"];
        assert_eq!(crumbs[0]["item"], "https://example.com/");
        assert_eq!(crumbs[1]["name"], "Hi");
    }

    #[test]
    fn test_key_order_is_stable() {
        let post = post("---\ntitle: Hi\n---\n");
        let script = post_json_ld(&post, &config());
        let headline = script.find("\"headline\"").unwrap();
        let published = script.find("\"datePublished\"").unwrap();
        let publisher = script.find("\"publisher\"").unwrap();
        assert!(headline < published && published < publisher);
    }

    #[test]
    fn test_script_close_is_escaped() {
        let post = post("---\ntitle: </script><b>\n---\n");
        let script = post_json_ld(&post, &config());
        assert_eq!(script.matches("</script>").count(), 1);
        assert_eq!(graph(&script)["@graph"][0]["headline"], "</script><b>");
    }

    #[test]
    fn test_site_json_ld() {
        let doc = graph(&site_json_ld(&config()));
        assert_eq!(doc["@graph"][0]["@type"], "Organization");
        assert_eq!(doc["@graph"][1]["@type"], "WebSite");
        assert_eq!(doc["@graph"][1]["url"], "https://example.com");
    }
}
