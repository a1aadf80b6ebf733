use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use alphabar::{analyze, BarConfig, BarError};
use clap::Parser;

/// Insert bar lines into AlphaTex notation wherever a measure fills up.
#[derive(Parser, Debug)]
#[command(name = "alphabar")]
#[command(about = "Automatic bar lines for AlphaTex")]
struct Args {
    /// Input file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pass the source through without injecting bars
    #[arg(long)]
    no_auto_bar: bool,

    /// Print the injection report (YAML) to stderr
    #[arg(long)]
    report: bool,

    /// Log bar placement decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), BarError> {
    let mut config = match &args.config {
        Some(path) => BarConfig::load(path)?,
        None => BarConfig::default(),
    };
    if args.no_auto_bar {
        config.auto_bar = false;
    }

    let source = read_source(args.input.as_deref())?;

    let (text, report) = render(source, &config, args.report)?;
    if let Some(yaml) = report {
        eprint!("{}", yaml);
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &text).map_err(|source| BarError::Io {
                path: path.clone(),
                source,
            })?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// Injected text plus, when asked for, the YAML report.
///
/// With auto-bar off the source passes through and there is no report.
fn render(
    source: String,
    config: &BarConfig,
    want_report: bool,
) -> Result<(String, Option<String>), BarError> {
    if !config.auto_bar {
        if want_report {
            log::warn!("--report has no effect while auto-bar is off");
        }
        return Ok((source, None));
    }

    let injection = analyze(&source, config);
    for diagnostic in &injection.report.diagnostics {
        log::warn!(
            "line {}, token {}: {} ({})",
            diagnostic.line,
            diagnostic.column,
            diagnostic.kind,
            diagnostic.token
        );
    }

    let report = if want_report {
        let yaml = serde_yaml::to_string(&injection.report)
            .map_err(|e| BarError::ReportError(e.to_string()))?;
        Some(yaml)
    } else {
        None
    };
    Ok((injection.output, report))
}

fn read_source(input: Option<&Path>) -> Result<String, BarError> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| BarError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| BarError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(buffer)
        }
    }
}
