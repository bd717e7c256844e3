use anyhow::{Context, Result};
use arcsurf::{
    generator_stamp, init_logging, Config, GcodeWriter, LayerOutcome, Position, ProgramAssembler,
    StatsCalculator, SweepPattern, VERSION,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "arcsurf")]
#[command(about = "Layered G-code generator for circular arc surfaces", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the machining program
    Generate {
        /// Configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the sweep pattern
        #[arg(long)]
        pattern: Option<SweepPattern>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Gcode)]
        format: OutputFormat,
        /// Omit banner and layer comments
        #[arg(long)]
        no_comments: bool,
    },
    /// Print the layer schedule and program statistics
    Layers {
        /// Configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Destination (.toml or .json)
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Gcode,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Generate {
            config,
            output,
            pattern,
            format,
            no_comments,
        } => generate(config.as_deref(), output.as_deref(), pattern, format, no_comments),
        Commands::Layers { config } => show_layers(config.as_deref()),
        Commands::InitConfig { file } => init_config(&file),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load_or_default(path).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load default configuration".to_string(),
    })
}

fn generate(
    config: Option<&Path>,
    output: Option<&Path>,
    pattern: Option<SweepPattern>,
    format: OutputFormat,
    no_comments: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(pattern) = pattern {
        config.surface.pattern = pattern;
    }
    if no_comments {
        config.output.include_comments = false;
    }

    let assembler = ProgramAssembler::new(config.surface.clone())?;
    let program = assembler.assemble();

    let text = match format {
        OutputFormat::Gcode => {
            let mut settings = config.output.writer_settings();
            settings.generator = Some(generator_stamp());
            GcodeWriter::new(settings).write(&program, &config.surface)
        }
        OutputFormat::Json => program.to_json()?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "Program written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn show_layers(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let params = &config.surface;
    let assembler = ProgramAssembler::new(params.clone())?;

    println!("{}", generator_stamp());
    println!(
        "{} layers, {:.3} mm per layer, pattern {}",
        params.layer_count, params.depth_per_layer, params.pattern
    );
    println!();

    for outcome in assembler.plan_layers() {
        match outcome {
            LayerOutcome::Planned(plan) => println!(
                "Layer {:>3}: Z = {:.3}  R = {:.3}  X = {}  ({} cuts)",
                plan.layer.index,
                plan.layer.depth,
                plan.layer.radius,
                plan.range,
                plan.cutting_samples().count()
            ),
            LayerOutcome::Skipped(skipped) => println!("{}", skipped),
        }
    }

    let program = assembler.assemble();
    let stats = StatsCalculator::calculate(
        &program,
        Position::new(params.apex_x, params.y_start, params.safe_height),
    );
    println!();
    println!(
        "Layers: {} planned, {} skipped",
        stats.planned_layers, stats.skipped_layers
    );
    println!(
        "Moves: {} feed, {} rapid",
        stats.feed_moves, stats.rapid_moves
    );
    println!(
        "Path: {:.1} mm feed, {:.1} mm rapid",
        stats.feed_length, stats.rapid_length
    );
    println!("Estimated cutting time: {:.1} min", stats.estimated_cut_minutes);

    Ok(())
}

fn init_config(file: &Path) -> Result<()> {
    Config::default()
        .save_to_file(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    println!("Wrote default configuration to {}", file.display());
    Ok(())
}
