mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use app::FscViewerApp;
use clap::{Args, Parser, Subcommand};
use config::Config;
use data::error::FscError;
use eframe::egui;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "fsc-panda", version, about = "Extract and plot FSC curves from RELION postprocess.star files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the FSC table as CSV and print the 0.143 / 0.5 resolutions
    Extract {
        /// postprocess.star file (defaults to the config's input_file)
        input: Option<PathBuf>,
        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Open the interactive viewer (default)
    View {
        /// File to open on start-up
        input: Option<PathBuf>,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug, Default)]
struct CommonArgs {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Correlation column used for the crossings (without the _rln prefix)
    #[arg(long)]
    fsc_column: Option<String>,
    /// Resolution column in Å (without the _rln prefix)
    #[arg(long)]
    resolution_column: Option<String>,
}

impl CommonArgs {
    /// Config file (or defaults) with command-line overrides applied.
    fn resolve(&self, input: Option<&Path>, output: Option<&Path>) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(input) = input {
            config.input_file = input.to_path_buf();
        }
        if let Some(output) = output {
            config.output_file = output.to_path_buf();
        }
        if let Some(col) = &self.fsc_column {
            config.fsc_column = col.clone();
        }
        if let Some(col) = &self.resolution_column {
            config.resolution_column = col.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Extract { input, output, common }) => {
            extract(&common.resolve(input.as_deref(), output.as_deref())?)
        }
        Some(Command::View { input, common }) => {
            let config = common.resolve(input.as_deref(), None)?;
            view(&config, input.is_some())
        }
        None => view(&Config::default(), false),
    }
}

/// Headless run: table to CSV, resolutions to stdout.
fn extract(config: &Config) -> Result<()> {
    let dataset = match data::loader::load_file(&config.input_file, &config.columns()) {
        Ok(ds) => ds,
        Err(e) => {
            if let Some(FscError::EmptyTable { rejected }) = e.downcast_ref::<FscError>() {
                println!(
                    "No FSC rows found in {} ({rejected} rows rejected); nothing written",
                    config.input_file.display()
                );
            }
            return Err(e);
        }
    };

    report::write_csv(&config.output_file, &dataset)?;
    for line in report::summary_lines(&dataset, &config.output_file) {
        println!("{line}");
    }
    if dataset.crossings.fsc_0143.is_none() && dataset.crossings.fsc_05.is_none() {
        log::warn!(
            "No threshold crossing found for column '{}' against '{}'",
            config.fsc_column,
            config.resolution_column
        );
    }
    Ok(())
}

fn view(config: &Config, open_input: bool) -> Result<()> {
    let mut state = AppState::new(config.columns());
    if open_input {
        state.load(&config.input_file);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "FSC Panda – Resolution Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(FscViewerApp::new(state)))),
    );
    if let Err(e) = result {
        bail!("viewer failed: {e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{ "output_file": "from_config.csv", "fsc_column": "A" }"#,
        )
        .unwrap();
        let common = CommonArgs {
            config: Some(file.path().to_path_buf()),
            fsc_column: Some("B".into()),
            resolution_column: None,
        };
        let config = common.resolve(Some(Path::new("in.star")), None).unwrap();
        assert_eq!(config.input_file, PathBuf::from("in.star"));
        assert_eq!(config.output_file, PathBuf::from("from_config.csv"));
        assert_eq!(config.fsc_column, "B");
        assert_eq!(config.resolution_column, "AngstromResolution");
    }

    #[test]
    fn extract_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("postprocess.star");
        std::fs::write(
            &input,
            "data_fsc\nloop_\n_rlnAngstromResolution #1\n_rlnCorrectedFourierShellCorrelationPhaseRandomizedMaskedMaps #2\n10.0 0.9\n5.0 0.3\n2.0 0.05\ndata_guinier\n",
        )
        .unwrap();
        let config = Config {
            input_file: input,
            output_file: dir.path().join("out.csv"),
            ..Config::default()
        };
        extract(&config).unwrap();
        let csv = std::fs::read_to_string(&config.output_file).unwrap();
        assert!(csv.contains("# FSC=0.5 Resolution (Å): 6.67"));
    }

    #[test]
    fn extract_refuses_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("postprocess.star");
        std::fs::write(&input, "data_general\n_rlnFinalResolution 3.0\n").unwrap();
        let config = Config {
            input_file: input,
            output_file: dir.path().join("out.csv"),
            ..Config::default()
        };
        assert!(extract(&config).is_err());
        assert!(!config.output_file.exists());
    }
}
