/*!
 * Command-line interface for repo2wc
 */

use std::io;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;

use repo2wc::collector::Collector;
use repo2wc::config::{Args, CollectMode, Config};
use repo2wc::entry::{select_paths, FsEntry};
use repo2wc::report::{ConversionReport, Reporter};
use repo2wc::session::Session;
use repo2wc::filter::ExcludedPaths;
use repo2wc::utils::{count_entries, count_selection};
use repo2wc::writer::{Output, SnippetWriter};

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        clap_complete::generate(shell, &mut command, "repo2wc", &mut io::stdout());
        return Ok(());
    }

    // Create and validate configuration
    let config = Config::from_args(args);

    let default_level = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    config.validate()?;

    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        log::warn!("Failed to set thread pool size: {}", e);
    }

    // Never read back the snippet a previous run wrote
    let mut excluded = ExcludedPaths::new();
    if let Output::File(path) = &config.output {
        excluded.add(path);
    }

    let start_time = Instant::now();
    let mut session = match config.mode {
        CollectMode::Entries => {
            let entries: Vec<FsEntry> = config.inputs.iter().map(FsEntry::new).collect();
            let progress = create_progress_bar(count_entries(&entries, &excluded));
            let mut session = Session::new(create_collector(&progress, excluded));
            session.convert_entries(&entries)?;
            progress.finish_and_clear();
            session
        }
        CollectMode::Picker => {
            let files = select_paths(&config.inputs)?;
            let progress = create_progress_bar(count_selection(&files, &excluded));
            let mut session = Session::new(create_collector(&progress, excluded));
            session.convert_selection(&files)?;
            progress.finish_and_clear();
            session
        }
    };
    let duration = start_time.elapsed();

    let writer = SnippetWriter::new(config.output.clone());
    session.download(&writer)?;

    if config.clip {
        session.copy_to_clipboard();
    }

    if let Some(conversion) = session.latest() {
        let output = match writer.output() {
            Output::File(path) => path.display().to_string(),
            Output::Stdout => "stdout".to_string(),
        };
        let mut report = ConversionReport::new(conversion, output, duration);
        report.copied = config.clip.then(|| session.copied());
        Reporter::new().print_report(&report);
    }

    Ok(())
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
    {
        Ok(style) => progress.set_style(style),
        Err(e) => log::debug!("Invalid progress template: {}", e),
    }
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("📂 Collecting");
    progress
}

fn create_collector(progress: &ProgressBar, excluded: ExcludedPaths) -> Collector {
    Collector::new(Arc::new(progress.clone())).with_excluded(excluded)
}
