//! The built-in prompt corpus and its file-based override.
//!
//! The suggester treats the corpus as an opaque list; this module owns where
//! that list comes from. The default set ships in the binary. A config-level
//! override points at a plain text file, one prompt per line — blank lines
//! and `#` comments are skipped.

use std::fs;
use std::io;
use std::path::Path;

/// Built-in "surprise me" prompts.
pub const DEFAULT_CORPUS: &[&str] = &[
    "an armchair in the shape of an avocado",
    "a painting of a fox in the style of Starry Night",
    "a bowl of soup that is a portal to another dimension",
    "a photo of a white fur monster standing in a purple room",
    "a pencil and watercolor drawing of a bright city in the future with flying cars",
    "a sunlit indoor lounge area with a pool containing a flamingo",
    "an oil painting of a capybara wearing a medieval royal crown",
    "a fortune-telling shiba inu reading your fate in a giant hamburger",
    "a stained glass window depicting a hamburger and french fries",
    "a pearl earring with a miniature galaxy trapped inside",
    "synthwave sports car driving into the sunset",
    "a Formula 1 car leaving a trail of rainbow flames",
    "a wildlife photography photo of a red panda using chopsticks",
    "an astronaut lounging in a tropical resort in space, vaporwave style",
    "a cyberpunk street market at night in the rain",
    "a teddy bear on a skateboard in Times Square",
    "a watercolor lighthouse on a cliff during a meteor shower",
    "a macro photograph of a snail wearing a tiny wizard hat",
    "a renaissance portrait of a cat dressed as a sea captain",
    "an isometric diorama of a cozy ramen shop in autumn",
    "a topiary garden shaped like chess pieces at dawn",
    "a hot air balloon made of stitched world maps over the Alps",
    "a 3D render of a translucent jellyfish floating through a forest",
    "a mosaic of a phoenix rising, made entirely of autumn leaves",
];

/// Load an override corpus: one prompt per line, blanks and `#` lines
/// skipped. An empty result is the caller's problem (the suggester rejects
/// empty corpora).
pub fn load_corpus_file(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
