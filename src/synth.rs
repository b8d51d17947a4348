//! Synthetic artwork generation.
//!
//! Stands in for a real inference backend: a pure function from prompt to a
//! self-contained SVG artifact, randomized only in its color styling. The
//! vector document is built with [maud](https://maud.lambda.xyz/) — the same
//! compile-time templating used for HTML elsewhere in this stack — so
//! malformed markup is a build error and prompt text is escaped for free.
//!
//! The result is encoded as `data:image/svg+xml;base64,<payload>`, renderable
//! with no network fetch and embeddable directly as an image source. Apart
//! from the injected random color draw the function is deterministic: same
//! prompt, same seed, same bytes.

use crate::types::ImageResource;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use maud::{Markup, html};
use rand::Rng;
use thiserror::Error;

/// Logical canvas size of generated artwork, in SVG user units.
pub const CANVAS_SIZE: u32 = 512;

/// Maximum prompt characters shown on the artwork before ellipsis.
pub const PROMPT_PREVIEW_CHARS: usize = 30;

/// Fixed caption on the secondary text line of every artifact.
const CAPTION: &str = "(offline studio render)";

/// Gradient color pairs (start, end), drawn uniformly per artifact.
const PALETTE: [(&str, &str); 5] = [
    ("#6469ff", "#323680"), // blue
    ("#ff6464", "#803232"), // red
    ("#64ff64", "#328032"), // green
    ("#ff64ff", "#803280"), // purple
    ("#ffff64", "#808032"), // yellow
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SynthError {
    #[error("prompt must not be blank")]
    BlankPrompt,
}

/// Render a prompt into a self-contained SVG data URI.
///
/// Picks one palette entry at random from `rng`, renders the gradient
/// canvas with the (possibly truncated) prompt, and base64-encodes the
/// document. No I/O, no partial artifacts: any failure leaves nothing
/// behind.
pub fn synthesize<R: Rng>(prompt: &str, rng: &mut R) -> Result<ImageResource, SynthError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(SynthError::BlankPrompt);
    }

    let (start, end) = PALETTE[rng.gen_range(0..PALETTE.len())];
    let svg = render_svg(prompt, start, end);
    let payload = BASE64.encode(svg.into_string());
    Ok(ImageResource::new(format!(
        "data:image/svg+xml;base64,{payload}"
    )))
}

/// Truncate to [`PROMPT_PREVIEW_CHARS`] characters, appending `...` iff the
/// prompt was longer. Char-based so multibyte prompts never split a code
/// point.
fn preview_text(prompt: &str) -> String {
    let mut preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    if prompt.chars().count() > PROMPT_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

/// The SVG document: diagonal gradient fill, prompt line, fixed caption.
fn render_svg(prompt: &str, start: &str, end: &str) -> Markup {
    let size = CANVAS_SIZE.to_string();
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(size) height=(size) {
            defs {
                linearGradient id="bg" x1="0%" y1="0%" x2="100%" y2="100%" {
                    // Empty bodies, not void-element semicolons: SVG is XML
                    // and every element must be closed.
                    stop offset="0%" stop-color=(start) {}
                    stop offset="100%" stop-color=(end) {}
                }
            }
            path fill="url(#bg)" d="M0 0h512v512H0z" {}
            text x="50%" y="45%" font-family="Arial" font-size="18" fill="white" text-anchor="middle" dy=".3em" {
                "AI Generated: " (preview_text(prompt))
            }
            text x="50%" y="55%" font-family="Arial" font-size="12" fill="white" text-anchor="middle" dy=".3em" {
                (CAPTION)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn decoded(prompt: &str, seed: u64) -> String {
        let mut rng = StdRng::seed_from_u64(seed);
        let resource = synthesize(prompt, &mut rng).unwrap();
        String::from_utf8(resource.decode().unwrap()).unwrap()
    }

    #[test]
    fn declares_the_svg_media_type() {
        let mut rng = StdRng::seed_from_u64(0);
        let resource = synthesize("a cat", &mut rng).unwrap();
        assert_eq!(resource.media_type(), Some("image/svg+xml"));
        assert!(resource.as_str().starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(synthesize("   ", &mut rng), Err(SynthError::BlankPrompt));
    }

    #[test]
    fn short_prompt_appears_verbatim_without_ellipsis() {
        let svg = decoded("a cat in a hat", 1);
        assert!(svg.contains("AI Generated: a cat in a hat"));
        assert!(!svg.contains("..."));
    }

    #[test]
    fn long_prompt_is_truncated_to_thirty_chars_with_ellipsis() {
        let prompt = "a very long prompt that keeps going well past thirty characters";
        let svg = decoded(prompt, 1);
        let expected: String = prompt.chars().take(30).collect();
        assert!(svg.contains(&format!("AI Generated: {expected}...")));
        assert!(!svg.contains(prompt));
    }

    #[test]
    fn exactly_thirty_chars_gets_no_ellipsis() {
        let prompt = "123456789012345678901234567890";
        assert_eq!(prompt.chars().count(), 30);
        let svg = decoded(prompt, 1);
        assert!(svg.contains(prompt));
        assert!(!svg.contains("..."));
    }

    #[test]
    fn multibyte_prompt_truncates_on_char_boundaries() {
        let prompt = "é".repeat(40);
        let svg = decoded(&prompt, 1);
        assert!(svg.contains(&format!("{}...", "é".repeat(30))));
    }

    #[test]
    fn prompt_markup_is_escaped() {
        let svg = decoded("<script>alert(1)</script>", 1);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn carries_canvas_size_gradient_and_caption() {
        let svg = decoded("a cat", 2);
        assert!(svg.contains("width=\"512\""));
        assert!(svg.contains("height=\"512\""));
        assert!(svg.contains("linearGradient"));
        assert!(svg.contains(CAPTION));
    }

    #[test]
    fn gradient_colors_come_from_the_palette() {
        let svg = decoded("a cat", 3);
        let used = PALETTE
            .iter()
            .any(|(start, end)| svg.contains(start) && svg.contains(end));
        assert!(used, "no palette pair found in: {svg}");
    }

    #[test]
    fn same_seed_same_bytes() {
        assert_eq!(decoded("a cat", 7), decoded("a cat", 7));
    }

    #[test]
    fn leading_whitespace_is_trimmed_before_rendering() {
        let svg = decoded("  a cat  ", 1);
        assert!(svg.contains("AI Generated: a cat"));
    }
}
