//! Product cards for posts that declare `products`

use crate::config::SiteConfig;
use crate::content::Product;
use crate::helpers::{escape_html, EXTERNAL_REL};

/// One card per product, joined by newlines; empty when there are none
pub fn product_cards(products: &[Product], config: &SiteConfig) -> String {
    products
        .iter()
        .map(|product| product_card(product, config))
        .collect::<Vec<_>>()
        .join("\n")
}

fn product_card(product: &Product, config: &SiteConfig) -> String {
    let name = escape_html(&product.name().unwrap_or_default());
    let image = escape_html(&product.image().unwrap_or_default());
    let price = escape_html(&product.price().unwrap_or_default());
    let currency = escape_html(
        &product
            .currency()
            .unwrap_or_else(|| config.default_currency.clone()),
    );
    let url = escape_html(&product.url().unwrap_or_else(|| "#".to_string()));

    let image_html = if image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="{}" loading="lazy" width="96" height="96">"#,
            image, name
        )
    };
    let price_html = if price.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="price">{} {}</div>"#, price, currency)
    };

    format!(
        r#"
<div class="product-card">
  {image_html}
  <div class="info">
    <div class="title"><strong>{name}</strong></div>
    {price_html}
    <div class="cta"><a href="{url}" target="_blank" rel="{rel}">{cta}</a></div>
  </div>
</div>"#,
        image_html = image_html,
        name = name,
        price_html = price_html,
        url = url,
        rel = EXTERNAL_REL,
        cta = escape_html(&config.product_cta),
    )
}
