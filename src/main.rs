use clap::{Parser, Subcommand};
use muse_feed::config::{self, FeedConfig};
use muse_feed::flow::CreationFlow;
use muse_feed::storage::FileStorage;
use muse_feed::store::PostStore;
use muse_feed::types::PostDraft;
use muse_feed::{corpus, download, output, suggest};
use rand::thread_rng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "muse-feed")]
#[command(about = "Local-first community feed for generated artwork")]
#[command(long_about = "\
Local-first community feed for generated artwork

Posts (name + prompt + synthesized SVG artwork) live in a single JSON feed
under the data directory. There is no server: the storage medium is the
source of truth, and every command reads or writes it directly.

  muse-feed create \"Ada\" \"a cat in a spacesuit\"
  muse-feed create \"Ada\" --surprise-me
  muse-feed list
  muse-feed download 1756116000123 --out ~/Pictures
  muse-feed watch

Run 'muse-feed gen-config' to generate a documented muse-feed.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file
    #[arg(long, default_value = "muse-feed.toml", global = true)]
    config: PathBuf,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate artwork for a prompt and publish it as a post
    Create {
        /// Author display name
        name: String,
        /// Generation prompt (optional with --surprise-me)
        prompt: Option<String>,
        /// Replace the prompt with a random suggestion from the corpus
        #[arg(long)]
        surprise_me: bool,
        /// Skip the simulated generation latency
        #[arg(long)]
        no_wait: bool,
    },
    /// List the feed, newest-first
    List,
    /// Print a random prompt suggestion
    Suggest {
        /// Current prompt to avoid repeating
        current: Option<String>,
    },
    /// Save a post's artwork to a file
    Download {
        /// Post id (see 'list')
        id: String,
        /// Target directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Re-print the feed whenever it changes
    Watch,
    /// Print a stock muse-feed.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = FeedConfig::load(&cli.config)?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data_dir));
    let store = PostStore::new(Arc::new(FileStorage::new(&data_dir)));

    match cli.command {
        Command::Create {
            name,
            prompt,
            surprise_me,
            no_wait,
        } => {
            let corpus = load_corpus(&config)?;
            let mut rng = thread_rng();

            let prompt = match (prompt, surprise_me) {
                (Some(p), true) => suggest::suggest(&p, &corpus, &mut rng)?,
                (None, true) => suggest::suggest("", &corpus, &mut rng)?,
                (Some(p), false) => p,
                (None, false) => {
                    return Err("a prompt is required unless --surprise-me is given".into());
                }
            };

            let latency = if no_wait {
                Duration::ZERO
            } else {
                Duration::from_millis(config.simulated_latency_ms)
            };
            let flow = CreationFlow::new(store, latency);

            println!("==> Generating artwork for: {prompt}");
            let photo = flow.generate(&prompt, &mut rng)?;
            let post = flow.submit(&PostDraft {
                name,
                prompt,
                photo: photo.as_str().to_string(),
            })?;
            println!("==> Shared with the community");
            output::print_post(&post);
        }
        Command::List => {
            output::print_feed(&store.posts_or_empty()?);
        }
        Command::Suggest { current } => {
            let corpus = load_corpus(&config)?;
            let pick = suggest::suggest(current.as_deref().unwrap_or(""), &corpus, &mut thread_rng())?;
            println!("{pick}");
        }
        Command::Download { id, out } => {
            let posts = store.posts_or_empty()?;
            let post = posts
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| format!("no post with id {id}"))?;
            let path = download::save(&post.id, &post.photo, &out)?;
            println!("Saved {}", path.display());
        }
        Command::Watch => {
            watch(&store)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve the prompt corpus: the config's override file, or the built-in
/// set.
fn load_corpus(config: &FeedConfig) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    match &config.corpus_file {
        Some(path) => Ok(corpus::load_corpus_file(Path::new(path))?),
        None => Ok(corpus::DEFAULT_CORPUS.iter().map(|s| s.to_string()).collect()),
    }
}

/// Block forever, re-printing the feed when it changes.
///
/// The subscribe channel only carries writes made in this process, and
/// another process's write cannot reach our hub — so the loop also polls.
/// Either way the feed is re-read from the medium, never trusted from
/// memory.
fn watch(store: &PostStore) -> Result<(), Box<dyn std::error::Error>> {
    let signals = store.subscribe();
    let mut last: Option<Vec<muse_feed::types::Post>> = None;

    loop {
        let posts = store.posts_or_empty()?;
        if last.as_ref() != Some(&posts) {
            output::print_feed(&posts);
            println!();
            last = Some(posts);
        }
        match signals.recv_timeout(Duration::from_secs(1)) {
            Ok(()) | Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}
