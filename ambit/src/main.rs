use ambit_crawler::{Crawler, FrontierKind, LinkCount};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(author, version, about = "Depth-bounded link crawler", long_about = None)]
struct Args {
    /// Seed URL to crawl outward from
    url: String,

    /// Maximum discovery depth; pages at the bound are counted but not
    /// expanded
    #[arg(short = 'd', long, default_value_t = 2)]
    max_depth: usize,

    /// Number of concurrent workers
    #[arg(short = 'w', long, default_value_t = 3)]
    num_workers: usize,

    /// Frontier discipline for the shared work queue
    #[arg(long, value_enum, default_value_t = FrontierArg::Fifo)]
    frontier: FrontierArg,

    /// HTTP timeout per request, in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Emit the summary as JSON instead of the count table
    #[arg(long)]
    json: bool,

    /// Suppress the progress spinner
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FrontierArg {
    Fifo,
    Lifo,
    Priority,
}

impl From<FrontierArg> for FrontierKind {
    fn from(arg: FrontierArg) -> Self {
        match arg {
            FrontierArg::Fifo => FrontierKind::Fifo,
            FrontierArg::Lifo => FrontierKind::Lifo,
            FrontierArg::Priority => FrontierKind::Priority,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.quiet {
            tracing::Level::ERROR
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();
    debug!("crawl args: {:?}", args);

    let spinner = if args.quiet || args.json {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Crawling {} ...", args.url));
        Some(pb)
    };

    let crawler = Crawler::with_timeout(args.timeout)
        .with_max_depth(args.max_depth)
        .with_frontier(args.frontier.into());
    let counts = crawler.crawl(&args.url, args.num_workers).await?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        display(&counts);
    }
    Ok(())
}

fn display(counts: &[LinkCount]) {
    for LinkCount { url, visits } in counts {
        println!("{:>4} {}", visits.to_string().cyan().bold(), url);
    }
    println!("{} distinct URLs", counts.len().to_string().bold());
}
