use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cloud_architect::report::{self, OutputFormat};
use cloud_architect::{ArchConfig, Configuration, Dashboard, Slider};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cloud_architect")]
#[command(about = "Simulate a multi-cloud architecture: topology, explanation and FMEA table")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration file
    Init {
        /// Path to save the config file
        #[arg(short, long, default_value = "cloud_architect.toml")]
        config: PathBuf,
    },
    /// List slider keys, ranges and defaults
    Sliders,
    /// Print the architecture topology
    Graph {
        #[command(flatten)]
        input: SliderInput,
        /// Output format: text, dot or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the FMEA risk table
    Fmea {
        #[command(flatten)]
        input: SliderInput,
        /// Sort rows by descending RPN
        #[arg(long)]
        ranked: bool,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the architecture explanation
    Explain {
        #[command(flatten)]
        input: SliderInput,
    },
    /// Print every output of one dashboard refresh
    Dashboard {
        #[command(flatten)]
        input: SliderInput,
        /// Demo scenario label (shown in the report, does not change sliders)
        #[arg(long)]
        scenario: Option<String>,
        /// Output format: text, json or dot
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct SliderInput {
    /// Path to the config file
    #[arg(short, long, default_value = "cloud_architect.toml")]
    config: PathBuf,
    /// Dashboard variant overriding the config file: compact, standard or extended
    #[arg(long)]
    variant: Option<cloud_architect::Variant>,
    /// Slider values as key=value pairs
    #[arg(short = 's', long = "set")]
    set: Vec<String>,
    /// TOML file containing slider values
    #[arg(short = 't', long = "toml")]
    toml_file: Option<PathBuf>,
    /// JSON file containing slider values
    #[arg(short = 'j', long = "json")]
    json_file: Option<PathBuf>,
}

impl SliderInput {
    /// Resolve the dashboard and slider values. Later sources win:
    /// config file, TOML file, JSON file, then `--set` pairs.
    fn resolve(&self) -> Result<(Dashboard, Configuration)> {
        let mut arch: ArchConfig = cloud_architect::config::load_config(&self.config)?;
        if let Some(variant) = self.variant {
            arch.variant = variant;
        }
        let dashboard = Dashboard::new(&arch)
            .with_context(|| format!("Invalid config: {}", self.config.display()))?;

        let sliders = cloud_architect::config::merge_slider_sources(
            arch.sliders,
            self.toml_file.as_deref(),
            self.json_file.as_deref(),
            &self.set,
        )?;
        Ok((dashboard, sliders))
    }
}

fn print_sliders() {
    println!("{:<14} {:<28} {:>5} {:>5} {:>8}", "KEY", "LABEL", "MIN", "MAX", "DEFAULT");
    for slider in Slider::ALL {
        let (min, max) = slider.bounds();
        println!(
            "{:<14} {:<28} {:>5} {:>5} {:>8}",
            slider.key(),
            slider.label(),
            min,
            max,
            slider.default_value()
        );
    }
}

fn emit(rendered: &str) {
    println!("{}", rendered.trim_end());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cloud_architect::logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Init { config } => {
            let default_config = cloud_architect::config::create_default_config();
            cloud_architect::config::save_config(&default_config, &config)?;
            println!("Configuration file created at: {}", config.display());
            println!("Edit the file to change the variant, default sliders, stages or FMEA rules.");
        }

        Commands::Sliders => print_sliders(),

        Commands::Graph { input, format } => {
            let (dashboard, sliders) = input.resolve()?;
            let graph = dashboard.topology(&sliders);
            emit(&report::render_graph(&graph, format)?);
        }

        Commands::Fmea { input, ranked, format } => {
            let (dashboard, sliders) = input.resolve()?;
            let mut table = dashboard.risk(&sliders);
            if ranked {
                table = table.ranked();
            }
            emit(&report::render_risk(&table, format)?);
        }

        Commands::Explain { input } => {
            let (_, sliders) = input.resolve()?;
            emit(&report::explanation(&sliders));
        }

        Commands::Dashboard { input, scenario, format } => {
            let (dashboard, sliders) = input.resolve()?;
            if let Some(name) = &scenario {
                cloud_architect::log_warn!(
                    "Scenario '{}' has no slider presets; using the given slider values",
                    name
                );
            }
            let snapshot = dashboard.refresh(&sliders).with_scenario(scenario);
            emit(&report::render_snapshot(&snapshot, format)?);
        }
    }

    Ok(())
}
