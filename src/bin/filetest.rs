//! Run webshell API operations against a live service.
//!
//! Usage:
//!   filetest [--config FILE] [--test a,b,c | --login-only | --connection-only | --smoke] [--list]

use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{EnvFilter, fmt};

use webshell_harness::{HarnessConfig, OperationKind, Preset, TestOrchestrator, TransferProgress};

#[derive(Parser, Debug)]
#[command(name = "filetest", about = "Webshell file API test harness")]
struct Args {
    /// Configuration file (defaults to ./login_config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated operations to run, e.g. `login,list,logout`
    #[arg(short, long, value_delimiter = ',', conflicts_with_all = ["login_only", "connection_only", "smoke"])]
    test: Vec<String>,

    /// Login, list the home directory, logout
    #[arg(long, conflicts_with_all = ["connection_only", "smoke"])]
    login_only: bool,

    /// Login and logout only
    #[arg(long, conflicts_with = "smoke")]
    connection_only: bool,

    /// Exercise the file operations in the test directory
    #[arg(long)]
    smoke: bool,

    /// Print the known operation names and exit
    #[arg(long)]
    list: bool,
}

impl Args {
    fn preset(&self) -> Preset {
        if self.login_only {
            Preset::LoginOnly
        } else if self.connection_only {
            Preset::Connection
        } else if self.smoke {
            Preset::Smoke
        } else {
            Preset::Full
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("webshell_harness=info"));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(1);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    bar
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();

    if args.list {
        for kind in OperationKind::ALL {
            println!("{kind}");
        }
        return;
    }

    let config = match HarnessConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(2);
        }
    };
    let mut client = match config.client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to build client: {}", e);
            process::exit(2);
        }
    };

    let bar = progress_bar();
    let bar_for_cb = bar.clone();
    client.watch_transfers(Box::new(move |progress: &TransferProgress| {
        bar_for_cb.set_length(progress.total.unwrap_or(progress.done).max(1));
        bar_for_cb.set_position(progress.done);
        bar_for_cb.set_message(progress.path.clone());
        if progress.is_complete() {
            bar_for_cb.finish_with_message(format!("{} complete", progress.path));
        }
        true
    }));

    let names: Vec<String> = if args.test.is_empty() {
        args.preset()
            .sequence(config.test.cleanup_on_exit)
            .into_iter()
            .map(|kind| kind.name().to_string())
            .collect()
    } else {
        args.test
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    };

    println!("Server: {}", config.server.base_url);
    println!("Running: {}", names.join(", "));
    println!();

    let report = TestOrchestrator::new(&mut client, &config).run(&names).await;
    bar.finish_and_clear();

    for step in report.steps() {
        println!("{step}");
    }
    println!();
    println!("{}", report.summary());

    if !report.succeeded() {
        process::exit(1);
    }
}
