//! List site posts

use anyhow::Result;

use crate::content::Post;
use crate::Site;

/// Print posts in home-listing order
pub fn run(site: &Site) -> Result<()> {
    let build_date = site.build_date()?;
    let posts = site.load_posts(&build_date)?;

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("{}", format_line(post));
    }

    Ok(())
}

fn format_line(post: &Post) -> String {
    format!("  {} - {} [{}]", post.date, post.title, post.source)
}
