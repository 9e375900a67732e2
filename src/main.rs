mod cli;

use temposync::config::{self, Config};
use temposync::error::SyncError;
use temposync::pipeline::{self, ProgressCallback, SyncOutcome, SyncPipeline, SyncRequest};
use temposync::plan::{self, Segment};

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use temposync_av::{get_tool_path, FfmpegTool};

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", info);
        eprintln!("The program exited unexpectedly.");
        std::process::exit(2);
    }));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "temposync=debug,temposync_av=debug".to_string()
        } else {
            "temposync=warn,temposync_av=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    let (result, notice) = match cli.command {
        Commands::Sync {
            video,
            audio,
            points,
            force,
            dry_run,
            json,
        } => {
            let request = SyncRequest::new(video, audio, points)
                .force(force)
                .dry_run(dry_run);
            (run_sync(&request, config_path, json), "Failed to sync.")
        }
        Commands::Extract {
            video,
            audio_extension,
            force,
        } => (
            run_extract(&video, &audio_extension, force, config_path),
            "Failed to extract.",
        ),
        Commands::CheckTools => (check_tools(config_path), "Failed to check tools."),
        Commands::Validate { file } => {
            let path = file.or(cli.config.clone());
            (validate_config(path.as_deref()), "Invalid configuration.")
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = match err.downcast_ref::<SyncError>() {
                Some(sync_err) => {
                    eprintln!("{}", sync_err);
                    sync_err.exit_code()
                }
                None => {
                    eprintln!("{:#}", err);
                    1
                }
            };
            eprintln!("{}", notice);
            ExitCode::from(code as u8)
        }
    }
}

/// Load the configuration, reporting failures as a setup error.
fn load_config(path: Option<&Path>) -> std::result::Result<Config, SyncError> {
    config::load_config_or_default(path).map_err(|e| SyncError::Config(format!("{:#}", e)))
}

fn ffmpeg_tool(config: &Config) -> FfmpegTool {
    let program = get_tool_path("ffmpeg", config.tools.ffmpeg_path.as_deref())
        .unwrap_or_else(|_| PathBuf::from("ffmpeg"));
    FfmpegTool::new(program).with_options((&config.ffmpeg).into())
}

/// Prints the stage banners between ffmpeg runs.
fn banner_callback() -> ProgressCallback {
    let first = AtomicBool::new(true);
    Box::new(move |_progress, step| {
        let bar = "#".repeat(60);
        if !first.swap(false, Ordering::Relaxed) {
            println!("\n\n");
        }
        println!("{}\n{}\n{}", bar, step, bar);
    })
}

fn run_sync(request: &SyncRequest, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let unit = config.sync.offset_unit;

    let mut sync = SyncPipeline::new(ffmpeg_tool(&config), config.sync.clone());
    if !json {
        sync = sync.with_progress_callback(banner_callback());
    }

    match sync.run(request)? {
        SyncOutcome::Planned {
            output_dir,
            segments,
        } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&segments)?);
            } else {
                print_plan(&output_dir, &segments, unit.label());
            }
        }
        SyncOutcome::Completed(report) => {
            tracing::debug!("Final output: {:?}", report.output);
            println!("Successfully generated {}/", report.output_dir.display());
        }
    }

    Ok(())
}

fn print_plan(output_dir: &Path, segments: &[Segment], unit: &str) {
    println!("\n[DRY RUN] Output directory: {}", output_dir.display());
    println!("Segments: {}", segments.len());
    println!(
        "  {:>4}  {:>12}  {:>12}  {:>6}  {:>12}",
        "#", "start", "length", "tempo", "output"
    );

    for segment in segments {
        let (length, output) = match (segment.length, segment.output_length()) {
            (Some(length), Some(output)) => (
                format!("{:.3} {}", length, unit),
                format!("{:.3} {}", output, unit),
            ),
            _ => ("to end".to_string(), "-".to_string()),
        };
        println!(
            "  {:>4}  {:>12}  {:>12}  {:>6}  {:>12}",
            segment.index,
            format!("{:.3} {}", segment.start, unit),
            length,
            segment.tempo,
            output
        );
    }

    println!(
        "\nBounded part of the output: {:.3} {} (plus the re-timed tail)",
        plan::bounded_output_length(segments),
        unit
    );
    if plan::changes_tempo(segments) {
        println!("Note: the video track keeps its original speed and will drift from the audio.");
    }
}

fn run_extract(
    video: &Path,
    audio_extension: &str,
    force: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let tool = ffmpeg_tool(&config);
    let progress = banner_callback();

    let report = pipeline::extract(&tool, video, audio_extension, force, Some(&progress))?;

    println!(
        "See files {} and {}",
        report.video.display(),
        report.audio.display()
    );
    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = load_config(config_path)?;
    let tools = temposync_av::check_tools(config.tools.ffmpeg_path.as_deref());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("ffmpeg is missing. Install it to run `temposync sync`.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    match config.tools.ffmpeg_path {
        Some(ref path) => println!("  ffmpeg: {}", path.display()),
        None => println!("  ffmpeg: looked up on PATH"),
    }
    println!("  Offset unit: {:?}", config.sync.offset_unit);
    println!("  Output suffix: {}", config.sync.output_suffix);
    println!("  Tempo suffix: {}", config.sync.tempo_suffix);
    println!("  Manifest: {}", config.sync.manifest_name);
    println!(
        "  Strict experimental: {}",
        config.ffmpeg.strict_experimental
    );
}
