use crate::config::{ConversionOptions, InvalidCoordinatePolicy};
use crate::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ltop-gnss")]
#[command(about = "Convert GNSS session coordinates into LTOP MES and KOO files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every session under a campaign directory
    Convert(ConvertArgs),

    /// List session directories and their qualifying point files
    Sessions {
        #[arg(help = "Campaign directory containing the session folders")]
        root: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[arg(help = "Campaign directory containing the session folders")]
    pub root: PathBuf,

    #[arg(short, long, help = "Options file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Observation file path [default: <ROOT>/GNSS.MES]")]
    pub mes_path: Option<PathBuf>,

    #[arg(long, help = "Coordinate file path [default: <ROOT>/GNSS.KOO]")]
    pub koo_path: Option<PathBuf>,

    #[arg(long, help = "Do not write the observation file")]
    pub no_mes: bool,

    #[arg(long, help = "Do not write the coordinate file")]
    pub no_koo: bool,

    #[arg(short, long, help = "Fixed point file (.json or delimited text)")]
    pub fixed_points: Option<PathBuf>,

    #[arg(short, long, help = "Field separator of the point files [default: tab]")]
    pub separator: Option<String>,

    #[arg(long, help = "Skip sessions with non-numeric coordinates instead of aborting")]
    pub skip_invalid_sessions: bool,

    #[arg(long, help = "Write the aggregation result as JSON")]
    pub report_json: Option<PathBuf>,
}

impl ConvertArgs {
    /// Options from the `--config` file (or defaults), with every flag given
    /// on the command line applied on top.
    pub fn to_options(&self) -> Result<ConversionOptions> {
        let mut options = match &self.config {
            Some(path) => ConversionOptions::from_file(path)?,
            None => ConversionOptions::default(),
        };

        if let Some(path) = &self.mes_path {
            options.path_mes = Some(path.clone());
        }
        if let Some(path) = &self.koo_path {
            options.path_koo = Some(path.clone());
        }
        if self.no_mes {
            options.mes = false;
        }
        if self.no_koo {
            options.koo = false;
        }
        if let Some(path) = &self.fixed_points {
            options.points_fixes_file = Some(path.clone());
        }
        if let Some(separator) = &self.separator {
            options.separator = unescape_separator(separator);
        }
        if self.skip_invalid_sessions {
            options.on_invalid_coordinate = InvalidCoordinatePolicy::SkipSession;
        }

        Ok(options)
    }
}

/// Accept `\t` typed literally on the command line as a tab.
fn unescape_separator(separator: &str) -> String {
    match separator {
        "\\t" | "tab" => "\t".to_string(),
        other => other.to_string(),
    }
}
