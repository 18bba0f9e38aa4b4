use anyhow::{Context, Result};
use clap::Parser;
use quarry::{cli, config, models, reporter, scanner};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Scan(args) => scan_command(args)?,
        cli::Commands::Config(args) => config_command(args)?,
    }

    Ok(())
}

fn scan_command(args: cli::ScanArgs) -> Result<()> {
    let config =
        config::load_config(args.config.as_deref()).context("failed to load configuration")?;

    if args.verbose {
        println!("Scanning {} files", args.paths.len());
        let markers: Vec<&str> = config
            .categories
            .iter()
            .map(|c| c.marker.as_str())
            .collect();
        println!("Using markers: {:?}", markers);
    }

    let scanner = scanner::Scanner::new(config.registry(), config.categories.clone());
    let results = scanner.scan_files(&args.paths);

    // Per-file errors are recoverable: report and move on, unless the
    // run is strict
    let mut records = Vec::new();
    for (path, result) in args.paths.iter().zip(results) {
        match result {
            Ok(record) => records.push(record),
            Err(err) if args.strict => {
                return Err(err).with_context(|| format!("failed to scan {}", path.display()));
            }
            Err(err) => eprintln!("skipping {}: {}", path.display(), err),
        }
    }

    if args.verbose {
        println!("Scanned {} of {} files", records.len(), args.paths.len());
    }

    let report = models::ScanReport::new(records);

    reporter::generate_report(&report, args.format, args.output.as_deref(), args.all)
        .context("failed to generate report")?;

    Ok(())
}

fn config_command(args: cli::ConfigArgs) -> Result<()> {
    match args.command {
        cli::ConfigCommands::Init { path, force } => {
            config::init_config(&path, force)?;
            println!("Config written to {}", path.display());
        }
    }

    Ok(())
}
