// crates/bounty-judge-cli/src/main.rs
// ============================================================================
// Module: Bounty Judge CLI Entry Point
// Description: Command dispatcher for simulation and score-word utilities.
// Purpose: Provide a localized CLI for offline adjudication simulation.
// Dependencies: clap, bounty-judge-config, bounty-judge-core, bounty-judge-provider, bounty-judge-sim, thiserror.
// ============================================================================

//! ## Overview
//! The bounty-judge CLI drives the offline simulation harness for the
//! adjudication unit and provides score-word decoding and config validation
//! utilities. All user-facing strings are routed through the i18n catalog to
//! prepare for future localization. The provider credential is read from the
//! environment ahead of any network activity and is never echoed back.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use bounty_judge_cli::i18n::Locale;
use bounty_judge_cli::i18n::set_locale;
use bounty_judge_cli::t;
use bounty_judge_config::CREDENTIAL_ENV_VAR;
use bounty_judge_config::ProviderSettings;
use bounty_judge_config::SimulationConfig;
use bounty_judge_config::resolve_credential;
use bounty_judge_core::ScoreWord;
use bounty_judge_provider::CompletionClientConfig;
use bounty_judge_provider::OpenAiCompletionClient;
use bounty_judge_sim::FIXTURE_CRITERIA;
use bounty_judge_sim::FIXTURE_SUBMISSION;
use bounty_judge_sim::Sandbox;
use bounty_judge_sim::SourceArtifact;
use bounty_judge_sim::fixture_invocation;
use bounty_judge_sim::fixture_secrets;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "BOUNTY_JUDGE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "bounty-judge", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `BOUNTY_JUDGE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the adjudication unit inside the offline simulation harness.
    Simulate(SimulateCommand),
    /// Decode a 32-byte score word from its wire hex form.
    Decode(DecodeCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the simulation harness.
#[derive(Args, Debug)]
struct SimulateCommand {
    /// Optional config file path (defaults to bounty-judge.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Optional override for the adjudication unit source path.
    #[arg(long, value_name = "PATH")]
    source: Option<PathBuf>,
}

/// Arguments for score word decoding.
#[derive(Args, Debug)]
struct DecodeCommand {
    /// Score word as `0x`-prefixed or bare hex.
    #[arg(value_name = "HEX")]
    word: String,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a bounty-judge configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to bounty-judge.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    // A bare invocation runs the simulation end to end.
    let command = match cli.command {
        Some(command) => command,
        None => Commands::Simulate(SimulateCommand {
            config: None,
            source: None,
        }),
    };

    match command {
        Commands::Simulate(command) => command_simulate(&command),
        Commands::Decode(command) => command_decode(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Simulate Command
// ============================================================================

/// Executes the `simulate` command.
///
/// The provider credential is checked before any output or network activity;
/// a missing credential aborts with a hint instead of a usage error.
fn command_simulate(command: &SimulateCommand) -> CliResult<ExitCode> {
    let config = SimulationConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let credential = match resolve_credential() {
        Ok(credential) => credential,
        Err(err) => {
            write_stderr_line(&t!("simulate.credential_missing", error = err))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            write_stderr_line(&t!("simulate.credential_hint", env = CREDENTIAL_ENV_VAR))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            return Ok(ExitCode::FAILURE);
        }
    };

    write_stdout_line(&t!("simulate.banner"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("simulate.separator"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("simulate.prompt", criteria = FIXTURE_CRITERIA))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("simulate.submission", submission = FIXTURE_SUBMISSION))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("simulate.separator"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    let source_path =
        command.source.clone().unwrap_or_else(|| config.simulation.source_path.clone());
    let artifact = SourceArtifact::load(&source_path).map_err(|err| {
        CliError::new(t!("simulate.source.load_failed", path = source_path.display(), error = err))
    })?;
    write_stdout_line(&t!(
        "simulate.source.loaded",
        path = artifact.path().display(),
        bytes = artifact.byte_len(),
        digest = artifact.digest()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    let client = OpenAiCompletionClient::new(client_config(&config.provider))
        .map_err(|err| CliError::new(t!("simulate.client_failed", error = err)))?;
    let sandbox = Sandbox::new(fixture_invocation(), fixture_secrets(credential));
    let report = sandbox
        .execute(&client)
        .map_err(|err| CliError::new(t!("simulate.failed", error = err)))?;

    write_stdout_line(&t!("simulate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    if !report.captured_output.is_empty() {
        write_stdout_line(&t!("simulate.logs.header"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        for line in &report.captured_output {
            write_stdout_line(line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    write_stdout_line(&t!("simulate.hex_output", hex = report.wire_hex))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("simulate.decoded", score = report.score))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Maps validated provider settings onto the completion client configuration.
fn client_config(settings: &ProviderSettings) -> CompletionClientConfig {
    CompletionClientConfig {
        endpoint: settings.endpoint.clone(),
        model: settings.model.clone(),
        timeout_ms: settings.timeout_ms,
        max_response_bytes: settings.max_response_bytes,
        allow_http: settings.allow_http,
    }
}

// ============================================================================
// SECTION: Decode Command
// ============================================================================

/// Executes the `decode` command.
fn command_decode(command: &DecodeCommand) -> CliResult<ExitCode> {
    let score = ScoreWord::decode_wire_hex(&command.word)
        .map_err(|err| CliError::new(t!("decode.failed", error = err)))?;
    write_stdout_line(&t!("decode.ok", score = score))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = SimulationConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Converts CLI language selections into locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
