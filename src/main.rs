use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use kac::cli::{self, BumpWorkflowArgs, InitWorkflowArgs};
use kac::clock::SystemClock;
use kac::config::{self, Config};
use kac::domain::identifier::validate_token;
use kac::domain::VersionNumber;
use kac::git::{Git2Repository, Repository};
use kac::{ui, Changelog};

#[derive(Parser)]
#[command(
    name = "kac",
    version,
    about = "Bump and export Keep-a-Changelog CHANGELOG files"
)]
struct Args {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Move Unreleased changes into a new dated release (default)
    Bump(BumpCommand),

    /// Print the change text of a release, e.g. for release notes
    Copy(CopyCommand),

    /// Create a new CHANGELOG file
    Init(InitCommand),

    /// List the releases in the CHANGELOG
    List(ListCommand),
}

fn parse_token(s: &str) -> Result<String, String> {
    validate_token(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

#[derive(clap::Args, Default)]
struct BumpCommand {
    /// CHANGELOG file (defaults to the configured name)
    file: Option<PathBuf>,

    #[arg(long, help = "Version to bump to instead of choosing interactively")]
    to: Option<VersionNumber>,

    #[arg(long, value_parser = parse_token, help = "Token for prerelease bumps (e.g. rc)")]
    prerelease_token: Option<String>,

    #[arg(long, value_parser = parse_token, help = "Token for build bumps (e.g. build)")]
    build_token: Option<String>,

    #[arg(short, long, help = "Skip confirmation prompts")]
    yes: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Bump even if the Unreleased section has no changes")]
    allow_empty: bool,
}

#[derive(clap::Args)]
struct CopyCommand {
    /// CHANGELOG file (defaults to the configured name)
    file: Option<PathBuf>,

    #[arg(long = "release", help = "Release to export (defaults to the latest)")]
    release: Option<VersionNumber>,

    #[arg(short, long, help = "Write the text to a file instead of stdout")]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct InitCommand {
    /// CHANGELOG file (defaults to the configured name)
    file: Option<PathBuf>,

    #[arg(long = "initial-version", default_value = "0.1.0", help = "First release version")]
    initial_version: VersionNumber,

    #[arg(long, help = "Project URL (defaults to the first git remote)")]
    url: Option<String>,

    #[arg(short, long, help = "Overwrite an existing file")]
    force: bool,

    #[arg(short, long, help = "Never prompt")]
    yes: bool,
}

#[derive(clap::Args)]
struct ListCommand {
    /// CHANGELOG file (defaults to the configured name)
    file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;

    match args.command.unwrap_or(Command::Bump(BumpCommand::default())) {
        Command::Bump(cmd) => bump(cmd, &config),
        Command::Copy(cmd) => copy(cmd, &config),
        Command::Init(cmd) => init(cmd, &config),
        Command::List(cmd) => list(cmd, &config),
    }
}

fn changelog_path(file: Option<PathBuf>, config: &Config) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(&config.changelog))
}

fn bump(cmd: BumpCommand, config: &Config) -> Result<()> {
    let workflow_args = BumpWorkflowArgs {
        path: changelog_path(cmd.file, config),
        to: cmd.to,
        prerelease_token: cmd
            .prerelease_token
            .unwrap_or_else(|| config.versions.prerelease_token.clone()),
        build_token: cmd
            .build_token
            .unwrap_or_else(|| config.versions.build_token.clone()),
        yes: cmd.yes,
        dry_run: cmd.dry_run,
        allow_empty: cmd.allow_empty || config.behavior.allow_empty_release,
    };

    match cli::run_bump_workflow(&workflow_args, &SystemClock)? {
        None => println!("Not bumping Changelog."),
        Some(outcome) if !outcome.written => {
            ui::display_status("Dry run, CHANGELOG not written. New release section:");
            if let Some(release) = outcome.changelog.latest_release() {
                println!("\n{}\n\n{}", release.heading(), release.change_text());
            }
        }
        Some(outcome) => {
            ui::display_success(&format!("Bumped to {}!", outcome.version.format(true)));
        }
    }
    Ok(())
}

fn copy(cmd: CopyCommand, config: &Config) -> Result<()> {
    let path = changelog_path(cmd.file, config);
    let (version, text) = cli::run_copy_workflow(&path, cmd.release.as_ref())?;

    match cmd.output {
        Some(output) => {
            kac::storage::write_all(&output, &format!("{}\n", text))?;
            ui::display_success(&format!(
                "{} release text written to {}",
                version.format(true),
                output.display()
            ));
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn init(cmd: InitCommand, config: &Config) -> Result<()> {
    let path = changelog_path(cmd.file, config);
    let workflow_args = InitWorkflowArgs {
        path: path.clone(),
        version: cmd.initial_version,
        url: cmd.url,
        force: cmd.force,
        yes: cmd.yes,
    };

    let repo = Git2Repository::open(".").ok();
    let repo_ref = repo.as_ref().map(|r| r as &dyn Repository);
    cli::run_init_workflow(&workflow_args, &SystemClock, repo_ref)?;

    ui::display_success(&format!("Created CHANGELOG file at: {}", path.display()));
    Ok(())
}

fn list(cmd: ListCommand, config: &Config) -> Result<()> {
    let changelog = Changelog::load(changelog_path(cmd.file, config))?;
    if changelog.unreleased().has_changes() {
        ui::display_status(&format!(
            "{} unreleased change(s) pending",
            changelog.unreleased().changes.len()
        ));
    }
    ui::display_releases(changelog.releases());
    Ok(())
}
