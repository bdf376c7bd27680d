use anyhow::Result;
use clap::Parser;

use flowplot::app::run_viewer;
use flowplot::batch::{self, Collector, FigureSink, ImageSink};
use flowplot::cli::Args;
use flowplot::state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = args.settings();

    let mut images = ImageSink::new(args.out_dir.clone(), args.format);
    images.size = (args.width, args.height);
    let mut collector = Collector::default();

    let mut sinks: Vec<&mut dyn FigureSink> = Vec::new();
    if !args.no_images {
        sinks.push(&mut images);
    }
    if !args.nogui {
        sinks.push(&mut collector);
    }

    let report = batch::run(&settings, &mut sinks, &mut std::io::stdout().lock())?;
    drop(sinks);

    if !report.failed.is_empty() {
        log::warn!("{} file(s) skipped", report.failed.len());
    }
    if !images.written.is_empty() {
        log::info!("Wrote {} image(s)", images.written.len());
    }

    if args.nogui || collector.figures.is_empty() {
        return Ok(());
    }

    let state = AppState::new(settings, collector.figures);
    run_viewer(state).map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
