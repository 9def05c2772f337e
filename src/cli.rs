use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for report-uploader.
///
/// The report itself comes from the `submit` subcommand; everything about
/// where files live and which endpoints are used comes from the
/// configuration file.
#[derive(Parser, Debug)]
#[clap(name = "report-uploader", about = "Bundle a report with local logs and upload it")]
pub struct Args {
    /// Path to configuration YAML file
    #[clap(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package and upload a report
    Submit {
        /// One-line summary; also names the uploaded archive
        #[clap(short, long)]
        summary: String,

        /// Free-form description
        #[clap(short, long, default_value = "")]
        detail: String,

        /// Bearer token for the storage API (falls back to REPORT_UPLOADER_TOKEN)
        #[clap(long)]
        token: Option<String>,
    },

    /// Create a default configuration file
    InitConfig {
        /// Path to save the configuration file
        #[clap(short, long, default_value = "report_uploader.yaml")]
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let args = Args::parse_from([
            "report-uploader",
            "submit",
            "--summary",
            "Crash on load",
            "--detail",
            "Slot 2",
            "--token",
            "abc",
        ]);

        assert!(!args.verbose);
        match args.command {
            Commands::Submit { summary, detail, token } => {
                assert_eq!(summary, "Crash on load");
                assert_eq!(detail, "Slot 2");
                assert_eq!(token.as_deref(), Some("abc"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "report-uploader",
            "submit",
            "-s",
            "x",
            "--verbose",
            "--config",
            "custom.yaml",
        ]);

        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("custom.yaml")));
        match args.command {
            Commands::Submit { detail, token, .. } => {
                assert_eq!(detail, "");
                assert!(token.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_init_config_default_path() {
        let args = Args::parse_from(["report-uploader", "init-config"]);
        match args.command {
            Commands::InitConfig { path } => {
                assert_eq!(path, PathBuf::from("report_uploader.yaml"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_summary_is_required() {
        assert!(Args::try_parse_from(["report-uploader", "submit"]).is_err());
    }
}
