use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::chart::{output_path, render_figure, OutputFormat, ProfileFigure, DEFAULT_SIZE};
use crate::data::discover::{find_profiles, FilePattern};
use crate::data::loader::load_profile;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Everything a plotting run needs; built from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory searched for profiles.
    pub dir: PathBuf,
    pub pattern: FilePattern,
    /// Skip files that fail to load instead of aborting.
    pub keep_going: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dir: PathBuf::from("statistics"),
            pattern: FilePattern::default(),
            keep_going: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Figure sinks
// ---------------------------------------------------------------------------

/// Receives each figure as soon as it is built.
pub trait FigureSink {
    fn emit(&mut self, source: &Path, figure: &ProfileFigure) -> Result<()>;
}

/// Keeps every figure, in order, for the viewer.
#[derive(Debug, Default)]
pub struct Collector {
    pub figures: Vec<(PathBuf, ProfileFigure)>,
}

impl FigureSink for Collector {
    fn emit(&mut self, source: &Path, figure: &ProfileFigure) -> Result<()> {
        self.figures.push((source.to_path_buf(), figure.clone()));
        Ok(())
    }
}

/// Writes each figure as an image file.
#[derive(Debug, Clone)]
pub struct ImageSink {
    /// Defaults to the directory of each source file.
    pub out_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub size: (u32, u32),
    /// Paths written so far.
    pub written: Vec<PathBuf>,
}

impl ImageSink {
    pub fn new(out_dir: Option<PathBuf>, format: OutputFormat) -> Self {
        ImageSink {
            out_dir,
            format,
            size: DEFAULT_SIZE,
            written: Vec::new(),
        }
    }
}

impl FigureSink for ImageSink {
    fn emit(&mut self, source: &Path, figure: &ProfileFigure) -> Result<()> {
        if let Some(dir) = &self.out_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let path = output_path(source, self.out_dir.as_deref(), self.format);
        render_figure(figure, &path, self.format, self.size)?;
        log::info!("Saved {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

/// Fan a figure out to several sinks, in order.
impl<'a> FigureSink for Vec<&'a mut (dyn FigureSink + 'a)> {
    fn emit(&mut self, source: &Path, figure: &ProfileFigure) -> Result<()> {
        for sink in self.iter_mut() {
            sink.emit(source, figure)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Outcome of one run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchReport {
    /// Files whose figure reached the sink.
    pub plotted: Vec<PathBuf>,
    /// Files skipped under `keep_going`, with the error text.
    pub failed: Vec<(PathBuf, String)>,
}

/// Discover, load and plot every matching profile, one file at a time.
///
/// Progress lines go to `out`; figures go to `sink`.
pub fn run<W: Write>(
    settings: &Settings,
    sink: &mut dyn FigureSink,
    out: &mut W,
) -> Result<BatchReport> {
    let files = find_profiles(&settings.dir, &settings.pattern)?;
    let mut report = BatchReport::default();

    if files.is_empty() {
        writeln!(out, "No CSV files found in {}/", settings.dir.display())?;
        return Ok(report);
    }

    for file in files {
        writeln!(out, "Plotting results from: {}", file.display())?;

        let profile = match load_profile(&file) {
            Ok(profile) => profile,
            Err(e) if settings.keep_going => {
                log::error!("Skipping {}: {e:#}", file.display());
                report.failed.push((file, format!("{e:#}")));
                continue;
            }
            Err(e) => return Err(e),
        };

        let figure = ProfileFigure::from_profile(&profile);
        sink.emit(&file, &figure)
            .with_context(|| format!("plotting {}", file.display()))?;
        report.plotted.push(file);
    }

    Ok(report)
}
