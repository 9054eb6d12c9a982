// src/main.rs

use anyhow::Context;
use clap::Parser;
use healthclaims::config::{ArtifactPaths, Command};
use healthclaims::dataset::read_rows;
use healthclaims::{
    run_pipeline, run_stage, summarize, CommandLineInput, LiveServices, PipelineConfig,
    ServiceSettings, Stage, StageIo, StageReport,
};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::PathBuf;

/// Sets up logging configuration.
fn setup_logging(verbose: bool, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("healthclaims.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stdout", Box::new(stdout_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Prints the one-line outcome of a stage.
fn report_stage(report: &StageReport) {
    let icon = match report.stage {
        Stage::Collect => "🔎",
        Stage::Filter => "🖼️ ",
        Stage::Ocr => "🔤",
        Stage::Label => "🏷️ ",
        Stage::Download => "📥",
    };
    let what = match report.stage {
        Stage::Collect => "post(s) collected",
        Stage::Filter => "post(s) with images",
        Stage::Ocr => "row(s) OCR'd",
        Stage::Label => "row(s) newly labeled",
        Stage::Download => "row(s) with local images",
    };
    println!(
        "{} {} {} → {}",
        icon,
        report.processed,
        what,
        report.output.display()
    );
}

/// Runs one stage with its own paths and parameters.
fn execute_single(
    stage: Stage,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: &PipelineConfig,
    services: &LiveServices,
) -> anyhow::Result<()> {
    let io = StageIo::defaults(stage, &config.paths).with_overrides(input, output);
    let report = run_stage(stage, &io, config, services)
        .with_context(|| format!("{} stage failed", stage))?;
    report_stage(&report);
    Ok(())
}

fn execute(cli: CommandLineInput) -> anyhow::Result<()> {
    let mut config = PipelineConfig {
        paths: ArtifactPaths::under(&cli.data_dir),
        ..PipelineConfig::default()
    };
    let services = LiveServices::new(ServiceSettings::from_env());

    match cli.command {
        Command::Collect { params, output } => {
            config.query = params.query().to_string();
            config.collect = params.options();
            execute_single(Stage::Collect, None, output, &config, &services)
        }
        Command::Filter { input, output } => {
            execute_single(Stage::Filter, input, output, &config, &services)
        }
        Command::Ocr {
            input,
            output,
            params,
        } => {
            config.extract = params.options();
            execute_single(Stage::Ocr, input, output, &config, &services)
        }
        Command::Label {
            input,
            output,
            params,
        } => {
            config.classify = params.options();
            execute_single(Stage::Label, input, output, &config, &services)
        }
        Command::Download {
            input,
            output,
            params,
            image_dir,
            index,
        } => {
            config.materialize = params.options();
            if let Some(image_dir) = image_dir {
                config.paths.image_dir = image_dir;
            }
            if let Some(index) = index {
                config.paths.image_index = index;
            }
            execute_single(Stage::Download, input, output, &config, &services)
        }
        Command::Run {
            from,
            collect,
            ocr,
            label,
            download,
        } => {
            let from = match from {
                Some(name) => name.parse::<Stage>()?,
                None => Stage::Collect,
            };
            let config = PipelineConfig::resolve(&cli.data_dir, &collect, &ocr, &label, &download);
            let reports = run_pipeline(from, &config, &services)?;
            for report in &reports {
                report_stage(report);
            }
            println!("✓ Pipeline finished ({} stage(s))", reports.len());
            Ok(())
        }
        Command::Stats { file } => {
            let rows = read_rows(&file)?;
            println!("📊 {}", file.display());
            println!("{}", summarize(&rows));
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let env_file = dotenvy::dotenv().ok();
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose, cli.quiet)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;
    if let Some(path) = env_file {
        log::debug!("Loaded environment from {}", path.display());
    }

    execute(cli)
}
