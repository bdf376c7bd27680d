use std::path::PathBuf;

use clap::Parser;

use crate::batch::Settings;
use crate::chart::{OutputFormat, DEFAULT_SIZE};
use crate::data::discover::FilePattern;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Directory holding the statistics files
    #[arg(value_name = "DIR", default_value = "statistics")]
    pub dir: PathBuf,

    /// File name pattern, one `*` wildcard
    #[arg(long, default_value = "flow_profile_it*.csv")]
    pub pattern: FilePattern,

    /// Where to write images (defaults to DIR)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Image format
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Image width in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE.0)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE.1)]
    pub height: u32,

    /// Do not write image files
    #[arg(long, default_value_t = false)]
    pub no_images: bool,

    /// Run without GUI (headless)
    #[arg(long, default_value_t = false)]
    pub nogui: bool,

    /// Skip files that fail to load instead of stopping
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,
}

impl Args {
    pub fn settings(&self) -> Settings {
        Settings {
            dir: self.dir.clone(),
            pattern: self.pattern.clone(),
            keep_going: self.keep_going,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_statistics_layout() {
        let args = Args::try_parse_from(["flowplot"]).unwrap();
        assert_eq!(args.settings(), Settings::default());
        assert_eq!(args.format, OutputFormat::Png);
        assert_eq!((args.width, args.height), DEFAULT_SIZE);
        assert!(!args.nogui && !args.no_images && !args.keep_going);
    }

    #[test]
    fn options_are_parsed() {
        let args = Args::try_parse_from([
            "flowplot",
            "build/statistics",
            "--pattern",
            "profile_*.csv",
            "--format",
            "svg",
            "--out-dir",
            "plots",
            "--nogui",
            "--keep-going",
        ])
        .unwrap();

        let settings = args.settings();
        assert_eq!(settings.dir, PathBuf::from("build/statistics"));
        assert!(settings.pattern.matches("profile_3.csv"));
        assert!(settings.keep_going);
        assert_eq!(args.format, OutputFormat::Svg);
        assert_eq!(args.out_dir, Some(PathBuf::from("plots")));
        assert!(args.nogui);
    }

    #[test]
    fn bad_pattern_is_a_usage_error() {
        assert!(Args::try_parse_from(["flowplot", "--pattern", "a*b*c"]).is_err());
    }
}
