use chrono::Local;
use clap::Parser;
use elixir2txt::{
    logging, Cli, Elixir2Txt, Elixir2TxtError, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::path::PathBuf;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet);

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match Elixir2Txt::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&cli, &e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&app);
    }

    match app.run() {
        // Per-file failures are recorded in the log and do not change the exit code
        Ok(report) => {
            app.output_formatter().print_conversion_report(&report);
            0
        }
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &Elixir2TxtError) -> i32 {
    match error {
        Elixir2TxtError::Config { .. } | Elixir2TxtError::InvalidPath { .. } => 2,
        Elixir2TxtError::OutputDirectory { .. } => 3,
        Elixir2TxtError::LogFile { .. } => 4,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("elixir2txt.toml"));

    match Elixir2Txt::generate_sample_config(&config_path) {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!("  elixir2txt --config {}", config_path.display());
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(app: &Elixir2Txt) -> i32 {
    let formatter = app.output_formatter();
    let config = app.config();
    let plan = app.plan();

    if formatter.mode() == OutputMode::Json {
        formatter.print_plan(&plan);
        return 0;
    }

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    formatter.info("Configuration that would be used:");
    println!("  Source directory: {}", config.source.directory.display());
    println!("  Extensions: {}", config.source.extensions.join(", "));
    println!(
        "  Output directory: {}",
        config.output_directory_for(&Local::now()).display()
    );

    formatter.print_separator();

    if plan.is_empty() {
        formatter.warning("No Elixir files found; a real run would only write the log");
    } else {
        formatter.info(&format!("{} file(s) would be converted:", plan.len()));
        formatter.print_plan(&plan);
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to perform the actual conversion");

    0
}

fn print_startup_error(cli: &Cli, error: &Elixir2TxtError) {
    let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
    formatter.print_user_friendly_error(error);
}
