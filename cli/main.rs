/// digit-net command line
///
/// Trains a one-hidden-layer network on a CSV digit dataset and scores a
/// second dataset, printing live progress and the cumulative accuracy.
///
/// Run with:
///   cargo run --release -- --train mnist_train.csv --test mnist_test.csv --epochs 3
///
/// Both passes run on a worker thread that owns the session; progress counts
/// come back to this thread over a channel.

mod app_config;
mod args;
mod logging;
mod render;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use serde::Serialize;
use tracing::error;

use digit_net::{Network, QuerySummary, RunConfig, RunningStats, Session, TrainSummary};

use app_config::{AppConfig, Settings};
use args::Cli;

#[derive(Serialize)]
struct Report<'a> {
    network: &'a digit_net::NetworkSpec,
    train: &'a TrainSummary,
    query: &'a QuerySummary,
    totals: RunningStats,
    accuracy: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::install_logger() {
        eprintln!("Failed to install logger: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> digit_net::Result<()> {
    let settings = load_settings(cli)?;

    let config = RunConfig::default().with_progress_interval(settings.progress_interval);
    let mut session = Session::with_network(Network::new(settings.spec)?, config);

    // --- Training ---
    let loaded = session.load_training_set(&cli.train, settings.train_records, settings.start_offset)?;
    println!("Dataset loaded with {} records", loaded);

    let epochs = settings.epochs;
    let (mut session, train) = run_on_worker(session, "Training", loaded.saturating_mul(epochs), move |s, tx| {
        s.train(epochs, move |count| {
            let _ = tx.send(count);
        })
    });
    let train = train?;
    println!("{}", train);

    // --- Scoring ---
    let loaded = session.load_evaluation_set(&cli.test, settings.test_records, settings.start_offset)?;
    println!("Dataset loaded with {} records", loaded);

    let (session, query) = run_on_worker(session, "Testing", loaded, |s, tx| {
        s.query(move |count| {
            let _ = tx.send(count);
        })
    });
    let query = query?;
    println!("{}", query);
    println!("Overall net accuracy is: {:.2}%", session.accuracy());

    for &index in &cli.show {
        print_record_info(&session, index);
    }

    for target in &cli.images {
        if render::save_record_image(&session, target)? {
            println!("Record {} written to {}", target.index + 1, target.path.display());
        } else {
            println!("No record found for index {}.", target.index);
        }
    }

    if cli.json {
        let report = Report {
            network: session.network().spec(),
            train: &train,
            query: &query,
            totals: session.stats(),
            accuracy: session.accuracy(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn load_settings(cli: &Cli) -> digit_net::Result<Settings> {
    let file = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    file.merge(AppConfig::from_cli(cli)).resolve()
}

/// Moves `session` onto a worker thread, runs `pass` there, and renders the
/// progress counts it sends until the pass finishes.
fn run_on_worker<T, F>(
    mut session: Session,
    label: &str,
    total: usize,
    pass: F,
) -> (Session, digit_net::Result<T>)
where
    T: Send + 'static,
    F: FnOnce(&mut Session, mpsc::Sender<usize>) -> digit_net::Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<usize>();

    let worker = thread::spawn(move || {
        let result = pass(&mut session, tx);
        (session, result)
    });

    // Ends once the worker drops its sender.
    for count in rx {
        print_progress(label, count, total);
    }
    println!();

    match worker.join() {
        Ok(out) => out,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

fn print_progress(label: &str, count: usize, total: usize) {
    let pct = if total == 0 { 100.0 } else { count as f64 / total as f64 * 100.0 };
    let filled = (pct / 2.5) as usize;
    print!("\r{:<8} [{:<40}] {:>6.2}%", label, "#".repeat(filled.min(40)), pct);
    let _ = io::stdout().flush();
}

fn print_record_info(session: &Session, index: usize) {
    match session.record_info(index) {
        Some(entry) => println!(
            "Record {}:\n  Actual value = {}\n  Network answer = {}",
            index + 1,
            entry.actual,
            entry.predicted
        ),
        None => println!("No record found for the given index ({}).", index),
    }
}
