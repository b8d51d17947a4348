//! CLI output formatting for the feed.
//!
//! Information-first display: the primary line for a post is its position,
//! author, and prompt; ids, timestamps, and media details are secondary
//! context on indented lines. Each `format_*` function is pure and returns
//! `Vec<String>` for testability; the `print_*` wrappers write to stdout.
//!
//! ```text
//! Feed (2 posts)
//! 001 Ada — a fox in the style of Starry Night
//!     Id: 1756116000123
//!     Created: 2026-08-25 10:00 UTC
//!     Media: image/svg+xml
//! 002 Bea — synthwave sports car driving into the sunset
//!     ...
//! ```

use crate::types::Post;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// One post: header line plus indented context lines.
pub fn format_post(pos: usize, post: &Post) -> Vec<String> {
    vec![
        format!("{} {} — {}", format_index(pos), post.name, post.prompt),
        format!("    Id: {}", post.id),
        format!(
            "    Created: {}",
            post.created_at.format("%Y-%m-%d %H:%M UTC")
        ),
        format!(
            "    Media: {}",
            post.photo.media_type().unwrap_or("unknown")
        ),
    ]
}

/// The whole feed, newest-first, with a count header.
pub fn format_feed(posts: &[Post]) -> Vec<String> {
    let noun = if posts.len() == 1 { "post" } else { "posts" };
    let mut lines = vec![format!("Feed ({} {noun})", posts.len())];
    for (idx, post) in posts.iter().enumerate() {
        lines.extend(format_post(idx + 1, post));
    }
    lines
}

pub fn print_feed(posts: &[Post]) {
    for line in format_feed(posts) {
        println!("{line}");
    }
}

pub fn print_post(post: &Post) {
    for line in format_post(1, post) {
        println!("{line}");
    }
}
