use clap::{Args, Parser, Subcommand};
use patch_core::*;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "patchsim")]
#[command(about = "Transdermal patch concentration simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference curve (JSON array of hourly values), overrides the config
    #[arg(long, global = true)]
    curve: Option<PathBuf>,
}

/// Regimen overrides; anything left out comes from the config file
#[derive(Args, Default)]
struct ParamArgs {
    /// Multiplier per application (e.g. patches applied at once)
    #[arg(long)]
    strength: Option<f64>,

    /// Hours between applications
    #[arg(long)]
    spacing: Option<u32>,

    /// Total hours to simulate
    #[arg(long)]
    horizon: Option<u32>,

    /// Hours each patch is worn
    #[arg(long)]
    wear: Option<u32>,
}

impl ParamArgs {
    /// Merge overrides onto `base` and reject values the generator must not see
    fn apply(&self, base: &SimulationParameters) -> Result<SimulationParameters> {
        let params = SimulationParameters {
            patch_strength: self.strength.unwrap_or(base.patch_strength),
            application_spacing: self.spacing.unwrap_or(base.application_spacing),
            horizon: self.horizon.unwrap_or(base.horizon),
            wear_duration: self.wear.unwrap_or(base.wear_duration),
        };
        params.validate()?;
        Ok(params)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the hourly series (default)
    Generate {
        #[command(flatten)]
        params: ParamArgs,

        /// Output format (csv, json, table)
        #[arg(long)]
        format: Option<String>,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print peak, trough and mean of the series
    Summary {
        #[command(flatten)]
        params: ParamArgs,

        /// Ignore the first N hours (loading phase)
        #[arg(long, default_value_t = 0)]
        skip_hours: u32,
    },

    /// Describe the reference curve in use
    Curve {
        /// Print every hourly value
        #[arg(long)]
        dump: bool,
    },

    /// Write a config file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    patch_core::logging::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            params,
            format,
            output,
        }) => {
            let (config, curve) = load_inputs(&cli.config, &cli.curve)?;
            cmd_generate(&config, &curve, &params, format, output)
        }
        Some(Commands::Summary { params, skip_hours }) => {
            let (config, curve) = load_inputs(&cli.config, &cli.curve)?;
            cmd_summary(&config, &curve, &params, skip_hours)
        }
        Some(Commands::Curve { dump }) => {
            let (_, curve) = load_inputs(&cli.config, &cli.curve)?;
            cmd_curve(&curve, dump)
        }
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config.as_deref(), force),
        None => {
            // Default to "generate" with configured values
            let (config, curve) = load_inputs(&cli.config, &cli.curve)?;
            cmd_generate(&config, &curve, &ParamArgs::default(), None, None)
        }
    }
}

/// Load the config file and the reference curve (`--curve` wins over `[curve] path`)
fn load_inputs(
    config_path: &Option<PathBuf>,
    curve_path: &Option<PathBuf>,
) -> Result<(Config, ReferenceCurve)> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let curve = match curve_path {
        Some(path) => ReferenceCurve::load(path)?,
        None => config.curve.load()?,
    };

    Ok((config, curve))
}

fn cmd_generate(
    config: &Config,
    curve: &ReferenceCurve,
    params: &ParamArgs,
    format: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let params = params.apply(&config.simulation)?;
    let format = match format {
        Some(f) => f.parse::<SeriesFormat>()?,
        None => config.output.format,
    };

    tracing::debug!("Generating with {:?} over a {}h reference curve", params, curve.len());
    let series = generate(&params, curve)?;

    match output {
        Some(path) => {
            export_to_path(&series, format, &path)?;
            eprintln!("✓ Wrote {} hours to {}", series.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            write_series(&series, format, stdout.lock())?;
        }
    }

    Ok(())
}

fn cmd_summary(
    config: &Config,
    curve: &ReferenceCurve,
    params: &ParamArgs,
    skip_hours: u32,
) -> Result<()> {
    let params = params.apply(&config.simulation)?;
    let series = generate(&params, curve)?;

    let Some(summary) = summarize_from(&series, skip_hours) else {
        println!("No samples to summarize.");
        return Ok(());
    };

    println!(
        "Regimen: {} x patch every {}h, worn {}h, over {}h",
        params.patch_strength, params.application_spacing, params.wear_duration, params.horizon
    );
    if skip_hours > 0 {
        println!("  (first {} hours skipped)", skip_hours);
    }
    println!();
    println!("  Peak:    {:.3} at hour {}", summary.peak_value, summary.peak_time);
    println!("  Trough:  {:.3} at hour {}", summary.trough_value, summary.trough_time);
    println!("  Mean:    {:.3}", summary.mean_value);
    println!("  Patches: up to {}", summary.max_patches);

    Ok(())
}

fn cmd_curve(curve: &ReferenceCurve, dump: bool) -> Result<()> {
    let (peak_hour, peak_value) = curve.peak();

    println!("Reference curve: {} hours", curve.len());
    println!("  Peak:  {:.3} at hour {}", peak_value, peak_hour);
    println!("  Final: {:.3}", curve.last());

    if dump {
        println!();
        for (hour, value) in curve.values().iter().enumerate() {
            println!("{}\t{}", hour, value);
        }
    }

    Ok(())
}

fn cmd_init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };

    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    println!("✓ Wrote default config to {}", path.display());

    Ok(())
}
