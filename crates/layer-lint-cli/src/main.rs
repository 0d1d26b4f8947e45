use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use layer_lint_core::config::RuleConfig;
use layer_lint_core::snapshot::DocumentSnapshot;
use layer_lint_core::{LayerLintError, Orchestrator, Outcome, Result, RuleIndex, Summary};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);
    tracing::debug!(base_dir = %base_dir.display(), "resolved base directory");

    let result = match cli.command {
        Commands::Run {
            document,
            json,
            write,
        } => handle_run(&base_dir, &document, json, write, cli.quiet),
        Commands::Categories => handle_categories(&base_dir),
        Commands::Config { action } => handle_config(action, &base_dir),
        Commands::Completions { shell } => {
            handle_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

/// Logs go to stderr. `LAYER_LINT_LOG` overrides the level.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("LAYER_LINT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("LAYER_LINT_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".layer-lint"))
        .unwrap_or_else(|| PathBuf::from(".layer-lint"))
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "layer-lint", &mut io::stdout());
}

fn handle_run(
    base_dir: &Path,
    document_path: &Path,
    json: bool,
    write: bool,
    quiet: bool,
) -> Result<()> {
    let config = RuleConfig::load(base_dir)?;
    let mut document = DocumentSnapshot::load(document_path)?;
    let mut elements = document.candidates();
    let mut renamer = document.renamer();

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let report = {
        let mut orchestrator = Orchestrator::new(config, document.provider());
        runtime.block_on(orchestrator.run(&mut elements, &mut renamer))
    };
    let Some(report) = report else {
        return Ok(());
    };

    let summary = Summary::new(&report);

    if json {
        let output = serde_json::json!({
            "summary": summary,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !quiet {
        println!();
        match summary.outcome {
            Outcome::Mismatched => println!("{} {}", "Mismatch:".yellow().bold(), summary),
            Outcome::RenamedOnly => println!("{} {}", "Renamed:".green(), summary),
            Outcome::NothingToDo => println!("{}", summary),
        }

        if !report.mismatched.is_empty() {
            println!();
            println!("Selected:");
            for element in &report.mismatched {
                println!("  {} {}", element.id.cyan(), element.name);
            }
        }
        println!();
    }

    if write {
        let changed = document.apply_names(&elements);
        if changed > 0 {
            document.save(document_path)?;
        }
        if !quiet && !json {
            println!(
                "{} {} ({} changed)",
                "Written:".green(),
                document_path.display(),
                changed
            );
        }
    }

    Ok(())
}

fn handle_categories(base_dir: &Path) -> Result<()> {
    let config = RuleConfig::load(base_dir)?;
    let index = RuleIndex::from_config(&config);

    println!();
    for (key, entry) in index.categories.iter() {
        println!("{} -> {}", key.cyan().bold(), entry.new_name);
        for color in &entry.color {
            println!("    {}", color);
        }
    }
    println!();
    println!("Always allowed:");
    for allowed in &config.always_allowed_colors {
        println!("    {} ({})", allowed.color, allowed.name.dimmed());
    }
    println!();
    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = RuleConfig::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(LayerLintError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = RuleConfig::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            let stored = config.get(&key).unwrap_or(value);
            println!("{} {} = {}", "Set:".green(), key, stored);
        }
        ConfigAction::List => {
            let config = RuleConfig::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = RuleConfig::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = RuleConfig::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
        ConfigAction::Normalize => {
            let config = RuleConfig::load(base_dir)?;
            config.save(base_dir)?;
            println!(
                "{} {}",
                "Normalized:".green(),
                RuleConfig::path(base_dir).display()
            );
        }
    }

    Ok(())
}
