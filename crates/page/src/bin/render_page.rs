//! Perform one portfolio page load against a running backend and print the
//! resulting page surface.
//!
//! ```text
//! render-page --base-url http://127.0.0.1:8080/ [--username ada] [--quote]
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Offset};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use portfolio_page::{HttpGateway, PageLoad, PageModel, PortfolioGateway, TextChoice};

/// One page load, printed as text.
#[derive(Debug, Parser)]
#[command(name = "render-page", version, about)]
struct Args {
    /// Backend base URL.
    #[arg(long, default_value = "http://127.0.0.1:8080/")]
    base_url: Url,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Log in with this username before loading the page.
    #[arg(long)]
    username: Option<String>,

    /// Password used with `--username`.
    #[arg(long, default_value = "demo")]
    password: String,

    /// Fill the text container from the quote table instead of greetings.
    #[arg(long)]
    quote: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        eprintln!("tracing init failed: {error}");
    }

    let args = Args::parse();
    match run(args).await {
        Ok(fully_loaded) => {
            if fully_loaded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let gateway = HttpGateway::new(args.base_url, Duration::from_secs(args.timeout_secs))?;
    if let Some(username) = &args.username {
        gateway.login(username, &args.password).await?;
    }

    let text_choice = if args.quote {
        TextChoice::Quote
    } else {
        TextChoice::Greeting
    };
    let gateway: Arc<dyn PortfolioGateway> = Arc::new(gateway);
    let load = PageLoad::new(gateway, Local::now().offset().fix()).with_text_choice(text_choice);

    let mut surface = PageModel::new();
    let mut rng = SmallRng::from_entropy();
    let report = load.run(&mut surface, &mut rng).await;

    print!("{}", surface.render());

    for (task, outcome) in [
        ("text", report.text.as_ref().err().map(ToString::to_string)),
        (
            "project",
            report.project.as_ref().err().map(ToString::to_string),
        ),
        (
            "comments",
            report
                .comments_rendered
                .as_ref()
                .err()
                .map(ToString::to_string),
        ),
        (
            "session",
            report.logged_in.as_ref().err().map(ToString::to_string),
        ),
    ] {
        if let Some(error) = outcome {
            warn!(task, %error, "page task failed");
        }
    }

    Ok(report.is_fully_loaded())
}
