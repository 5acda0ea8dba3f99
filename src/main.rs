// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::app_controller::Controller;

mod app_config;
mod app_controller;
mod assembly;
mod errors;
mod file_utils;
mod image_generator;
mod providers;
mod render;
mod script_writer;
mod voice_generator;
mod voice_timing;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a video from a paper text file (default command)
    Generate(GenerateArgs),

    /// Assemble a video from pre-existing artifacts (audio, timing JSON, images)
    Assemble(AssembleArgs),

    /// Generate shell completions for papertok
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Paper text file to process
    #[arg(value_name = "PAPER_PATH")]
    paper_path: PathBuf,

    /// Output video path
    #[arg(short, long, default_value = "output/video.mp4")]
    output: PathBuf,

    /// Preset voice name or raw ElevenLabs voice id
    #[arg(long)]
    voice: Option<String>,

    /// Model name to use for script generation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct AssembleArgs {
    /// Narration audio file
    #[arg(long)]
    audio: PathBuf,

    /// Word timing JSON file
    #[arg(long)]
    timing: PathBuf,

    /// Directory of ordered scene images
    #[arg(long)]
    images: PathBuf,

    /// Output video path
    #[arg(short, long, default_value = "output/video.mp4")]
    output: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// papertok - research papers into short vertical videos
///
/// Generates a narrated, captioned vertical video from a research paper
/// using AI providers for scripting, narration, timing and images.
#[derive(Parser, Debug)]
#[command(name = "papertok")]
#[command(version = "0.1.0")]
#[command(about = "Create engaging short videos from research papers")]
#[command(long_about = "papertok turns a research paper into a short vertical video: an LLM \
writes the script, a TTS service narrates it, a transcription service times every word, an \
image model illustrates each script segment, and ffmpeg muxes captions, images and narration \
into the final video.

EXAMPLES:
    papertok paper.txt                          # Generate using default config
    papertok paper.txt -o output/demo.mp4       # Custom output path
    papertok --log-level debug paper.txt        # Verbose logging
    papertok assemble --audio narration.mp3 --timing timing.json --images assets/images
    papertok completions bash > papertok.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file does
    not exist, a default one is created automatically. API keys may live in
    the config file or in MISTRAL_API_KEY, ELEVENLABS_API_KEY, GROQ_API_KEY
    and FAL_KEY environment variables.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Paper text file to process
    #[arg(value_name = "PAPER_PATH")]
    paper_path: Option<PathBuf>,

    /// Output video path
    #[arg(short, long, default_value = "output/video.mp4")]
    output: PathBuf,

    /// Preset voice name or raw ElevenLabs voice id
    #[arg(long)]
    voice: Option<String>,

    /// Model name to use for script generation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger { level });
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the configuration file, creating a default one when missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if std::path::Path::new(config_path).exists() {
        Config::from_file(config_path)
    } else {
        let config = Config::default();
        config
            .write_to_file(config_path)
            .with_context(|| format!("Failed to create default config at {}", config_path))?;
        Ok(config)
    }
}

fn init_logging(config: &Config, cli_level: Option<CliLogLevel>) {
    let level = cli_level
        .map(app_config::LogLevel::from)
        .unwrap_or_else(|| config.log_level.clone());
    if CustomLogger::init(level_filter(&level)).is_err() {
        eprintln!("Warning: logger was already initialized");
    }
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut config = load_or_create_config(&args.config_path)?;
    init_logging(&config, args.log_level);

    // CLI flags override the configuration file
    if let Some(voice) = args.voice {
        config.voice.voice = voice;
    }
    if let Some(model) = args.model {
        config.script.model = model;
    }

    let controller = Controller::with_config(config)?;
    let video = controller.run_generate(&args.paper_path, &args.output).await?;
    info!("Video created at: {}", video.display());
    Ok(())
}

async fn run_assemble(args: AssembleArgs) -> Result<()> {
    let config = load_or_create_config(&args.config_path)?;
    init_logging(&config, args.log_level);

    let controller = Controller::with_config(config)?;
    let video = controller
        .run_assemble(&args.audio, &args.timing, &args.images, &args.output)
        .await?;
    info!("Video created at: {}", video.display());
    Ok(())
}


#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    match options.command {
        Some(Commands::Generate(args)) => run_generate(args).await,
        Some(Commands::Assemble(args)) => run_assemble(args).await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => {
            // Bare invocation: treat top-level args as the generate command
            let paper_path = options.paper_path.ok_or_else(|| {
                anyhow::anyhow!("No paper file provided. Run 'papertok --help' for usage.")
            })?;
            run_generate(GenerateArgs {
                paper_path,
                output: options.output,
                voice: options.voice,
                model: options.model,
                config_path: options.config_path,
                log_level: options.log_level,
            })
            .await
        }
    }
}
