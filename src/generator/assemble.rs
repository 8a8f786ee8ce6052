//! Post assembly - one document in, one finished HTML page out

use crate::config::SiteConfig;
use crate::content::{markdown, Document, FrontMatter, Post};
use crate::helpers::{absolute_url, ensure_rel_target, escape_html, BuildDate};
use crate::templates::{Placeholder, Substitutions, Templates};

use super::jsonld::{post_json_ld, site_json_ld};
use super::products::product_cards;

/// Description used for the home page meta tags
pub const HOME_DESCRIPTION: &str = "Latest posts";

/// A post together with its rendered page
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub post: Post,
    pub html: String,
}

/// A parsed document, before any template is involved
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    pub post: Post,
    pub front_matter: FrontMatter,
    /// Rendered body with outbound link attributes applied
    pub body_html: String,
}

/// Parse and render a document into its post record
pub fn resolve_document(
    document: &Document,
    config: &SiteConfig,
    build_date: &BuildDate,
) -> ResolvedDocument {
    let (front_matter, body) = FrontMatter::parse(&document.raw);
    let body_html = ensure_rel_target(&markdown::render(body));
    let post = Post::resolve(
        &document.file_name,
        &document.stem,
        &front_matter,
        &body_html,
        config,
        build_date,
    );

    ResolvedDocument {
        post,
        front_matter,
        body_html,
    }
}

/// Build one post page without keeping an [`Assembler`] around
pub fn assemble(
    document: &Document,
    config: &SiteConfig,
    templates: &Templates,
    build_date: &BuildDate,
) -> RenderedPost {
    Assembler::new(config, templates, build_date).assemble(document)
}

/// Fills the post and layout templates
pub struct Assembler<'a> {
    config: &'a SiteConfig,
    templates: &'a Templates,
    build_date: &'a BuildDate,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a SiteConfig, templates: &'a Templates, build_date: &'a BuildDate) -> Self {
        Self {
            config,
            templates,
            build_date,
        }
    }

    /// Build the complete page for one document
    pub fn assemble(&self, document: &Document) -> RenderedPost {
        let resolved = resolve_document(document, self.config, self.build_date);
        let html = self.post_page(&resolved);
        RenderedPost {
            post: resolved.post,
            html,
        }
    }

    fn post_page(&self, resolved: &ResolvedDocument) -> String {
        let post = &resolved.post;

        let inner = self.templates.post.render(
            &Substitutions::new()
                .set(Placeholder::PostTitle, escape_html(&post.title))
                .set(Placeholder::Date, &post.date)
                .set(Placeholder::Updated, &post.updated)
                .set(
                    Placeholder::ProductCards,
                    product_cards(resolved.front_matter.products(), self.config),
                )
                .set(Placeholder::PostHtml, &resolved.body_html),
        );

        let json_ld = format!(
            "{}\n{}",
            post_json_ld(post, self.config),
            site_json_ld(self.config)
        );

        self.layout(
            self.site_substitutions()
                .set(Placeholder::Title, escape_html(&post.title))
                .set(Placeholder::Description, escape_html(post.summary()))
                .set(Placeholder::Keywords, escape_html(&post.keywords))
                .set(Placeholder::Canonical, &post.url)
                .set(
                    Placeholder::OgImage,
                    absolute_url(&post.cover, &self.config.base_url),
                )
                .set(Placeholder::JsonLd, json_ld)
                .set(Placeholder::Content, inner),
        )
    }

    /// Wrap the home listing in the layout
    pub fn home_page(&self, listing: &str) -> String {
        self.layout(
            self.site_substitutions()
                .set(Placeholder::Title, escape_html(&self.config.site_name))
                .set(Placeholder::Description, escape_html(HOME_DESCRIPTION))
                .set(Placeholder::Keywords, "")
                .set(Placeholder::Canonical, format!("{}/", self.config.base_url))
                .set(
                    Placeholder::OgImage,
                    absolute_url(&self.config.default_image, &self.config.base_url),
                )
                .set(Placeholder::JsonLd, site_json_ld(self.config))
                .set(Placeholder::Content, listing),
        )
    }

    /// Slots that are the same on every page
    fn site_substitutions(&self) -> Substitutions {
        Substitutions::new()
            .set(Placeholder::Base, &self.config.base_url)
            .set(Placeholder::SiteName, escape_html(&self.config.site_name))
            .set(Placeholder::Disclosure, escape_html(&self.config.disclosure))
            .set(Placeholder::Year, &self.build_date.year)
    }

    fn layout(&self, substitutions: Substitutions) -> String {
        self.templates.layout.render(&substitutions)
    }
}
