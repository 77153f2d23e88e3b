//! arXiv feed snapshot
//!
//! Fetches one page of the arXiv Atom API and prints it to stdout.
//! Logs go to stderr.

use std::time::Duration;

use arxivdash_feed::{render_feed, FeedClient, FeedQuery, DEFAULT_API_URL};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "feed-snapshot", version, about = "Print one page of arXiv query results")]
struct Args {
    /// Query endpoint
    #[arg(long, env = "ARXIV_API_URL", default_value = DEFAULT_API_URL)]
    base_url: String,

    /// arXiv search expression
    #[arg(long, default_value = "all:llm")]
    search_query: String,

    #[arg(long, default_value_t = 0)]
    start: u32,

    #[arg(long, default_value_t = 1)]
    max_results: u32,

    /// Request timeout; unset waits indefinitely
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = FeedClient::new(args.base_url, args.timeout_secs.map(Duration::from_secs))?;
    let query = FeedQuery {
        search_query: args.search_query,
        start: args.start,
        max_results: args.max_results,
    };

    let feed = client.fetch(&query).await?;
    print!("{}", render_feed(&feed));
    Ok(())
}
