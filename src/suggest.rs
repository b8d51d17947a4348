//! Random prompt suggestion with a no-repeat constraint.
//!
//! "Surprise me": draw a uniformly random prompt from the corpus, but never
//! hand back the prompt the user is already looking at. The draw loop is
//! bounded — with a corpus of two or more distinct entries the expected
//! number of draws is O(1), and the cap only matters for pathological
//! corpora (e.g. a single entry equal to the current prompt, or all entries
//! identical). When the cap trips, the last sample is returned even if it
//! equals the current prompt; looping forever over a degenerate corpus helps
//! nobody.

use rand::Rng;
use thiserror::Error;

/// Upper bound on redraws before giving up on finding a different prompt.
pub const MAX_ATTEMPTS: usize = 16;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SuggestError {
    #[error("prompt corpus is empty")]
    EmptyCorpus,
}

/// Pick a random corpus entry different from `current`.
///
/// Uniform over the corpus per draw; resamples while the draw equals
/// `current`, up to [`MAX_ATTEMPTS`]. The random source is injected so
/// callers (and tests) control determinism.
pub fn suggest<S, R>(current: &str, corpus: &[S], rng: &mut R) -> Result<String, SuggestError>
where
    S: AsRef<str>,
    R: Rng,
{
    if corpus.is_empty() {
        return Err(SuggestError::EmptyCorpus);
    }

    let mut pick = corpus[rng.gen_range(0..corpus.len())].as_ref();
    for _ in 1..MAX_ATTEMPTS {
        if pick != current {
            break;
        }
        pick = corpus[rng.gen_range(0..corpus.len())].as_ref();
    }
    Ok(pick.to_string())
}
