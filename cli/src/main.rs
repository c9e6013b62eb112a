use std::fs;
use std::path::{Path, PathBuf};

use authsync::{
    AuthSyncEvent, ConfigError, IdentityNotification, LoginHints, ReturnPath, SyncConfig, SyncDecision, SyncSettings,
    build_login_url, decode_auth_sync_event, return_path_for, sanitize_return_to,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod sim;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fallback path `{0}`")]
    InvalidFallback(String),
    #[error("origin context {origin} out of range; {count} context(s) given")]
    UnknownContext { origin: usize, count: usize },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "authsync-cli", about = "Inspect and simulate cross-tab auth session sync")]
struct Cli {
    /// JSON settings file; `AUTHSYNC_*` variables override its values.
    #[arg(long, env = "AUTHSYNC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sanitize a `returnTo` candidate.
    Sanitize {
        candidate: String,
        /// Fallback path; defaults to the configured landing path.
        #[arg(long)]
        fallback: Option<String>,
    },
    /// Validate a cross-context message.
    Decode { json: String },
    /// Decide whether a context at `--path` is sent to the login page.
    Decide {
        #[arg(long)]
        path: String,
        #[arg(long, value_enum)]
        event: EventArg,
    },
    /// Build the login URL a context at `--path` would be sent to.
    LoginUrl {
        #[arg(long)]
        path: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum)]
        event: Option<EventArg>,
        #[arg(long)]
        provider: Option<String>,
    },
    /// Run several contexts on one in-process channel and report what each did.
    Simulate {
        /// Location of one context (`/path` or `/path?query`); repeat per context.
        #[arg(long = "context", required = true)]
        contexts: Vec<String>,
        /// Index of the context whose identity layer reports the change.
        #[arg(long, default_value_t = 0)]
        origin: usize,
        #[arg(long, value_enum, default_value_t = KindArg::SignedOut)]
        kind: KindArg,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EventArg {
    SignedOut,
    SessionExpired,
}

impl From<EventArg> for AuthSyncEvent {
    fn from(arg: EventArg) -> Self {
        match arg {
            EventArg::SignedOut => Self::SignedOut,
            EventArg::SessionExpired => Self::SessionExpired,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    SignedOut,
    RefreshFailed,
}

impl From<KindArg> for IdentityNotification {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::SignedOut => Self::signed_out(),
            KindArg::RefreshFailed => Self::refresh_failed(),
        }
    }
}

fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), |key| std::env::var(key).ok())?;
    let output = run(&config, cli.command)?;
    print_json(&output)
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Settings from `path` (or defaults), overlaid with `lookup`, then validated.
fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<SyncConfig, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig { path: path.to_owned(), source })?;
            SyncSettings::from_json(&text)?
        }
        None => SyncSettings::default(),
    };
    let config = SyncConfig::from_settings(settings.overlay(lookup))?;
    tracing::debug!(channel = %config.channel_name, login = %config.login_route, "configuration loaded");
    Ok(config)
}

fn run(config: &SyncConfig, command: Command) -> Result<Value, CliError> {
    match command {
        Command::Sanitize { candidate, fallback } => run_sanitize(config, &candidate, fallback.as_deref()),
        Command::Decode { json } => Ok(run_decode(&json)),
        Command::Decide { path, event } => Ok(run_decide(config, &path, event.into())),
        Command::LoginUrl { path, search, event, provider } => {
            Ok(run_login_url(config, &path, &search, event.map(AuthSyncEvent::from), provider.as_deref()))
        }
        Command::Simulate { contexts, origin, kind } => run_simulate(config, &contexts, origin, kind.into()),
    }
}

fn run_sanitize(config: &SyncConfig, candidate: &str, fallback: Option<&str>) -> Result<Value, CliError> {
    let fallback = match fallback {
        Some(raw) => ReturnPath::parse(raw).map_err(|e| CliError::InvalidFallback(e.0))?,
        None => config.default_landing.clone(),
    };
    let sanitized = sanitize_return_to(Some(candidate), &fallback);
    Ok(json!({
        "input": candidate,
        "sanitized": sanitized.as_str(),
        "accepted": sanitized.as_str() == candidate,
    }))
}

fn run_decode(text: &str) -> Value {
    let event = decode_auth_sync_event(text);
    json!({ "event": event.map(AuthSyncEvent::wire_tag) })
}

fn run_decide(config: &SyncConfig, path: &str, event: AuthSyncEvent) -> Value {
    let redirect = config.policy.should_force_login_redirect(path, event);
    let url = redirect.then(|| {
        let hints = LoginHints::for_event(event, config.provider_hint.as_deref());
        build_login_url(config, path, "", &hints)
    });
    json!({
        "path": path,
        "event": event.wire_tag(),
        "redirect": redirect,
        "url": url,
    })
}

fn run_login_url(
    config: &SyncConfig,
    path: &str,
    search: &str,
    event: Option<AuthSyncEvent>,
    provider: Option<&str>,
) -> Value {
    let mut hints = match event {
        Some(event) => LoginHints::for_event(event, config.provider_hint.as_deref()),
        None => LoginHints { error: None, provider: config.provider_hint.clone() },
    };
    if let Some(provider) = provider {
        hints.provider = Some(provider.to_owned());
    }
    json!({
        "return_to": return_path_for(config, path, search).as_str(),
        "url": build_login_url(config, path, search, &hints),
    })
}

fn run_simulate(
    config: &SyncConfig,
    contexts: &[String],
    origin: usize,
    notification: IdentityNotification,
) -> Result<Value, CliError> {
    let report = sim::simulate(config, contexts, origin, notification)
        .ok_or(CliError::UnknownContext { origin, count: contexts.len() })?;
    let contexts: Vec<Value> = report
        .contexts
        .iter()
        .enumerate()
        .map(|(index, ctx)| {
            json!({
                "index": index,
                "location": ctx.location,
                "decisions": ctx.decisions.iter().map(decision_json).collect::<Vec<_>>(),
                "navigations": ctx.navigations,
            })
        })
        .collect();
    Ok(json!({
        "contexts": contexts,
        "active_rounds": report.active_rounds,
        "settled": report.settled,
    }))
}

fn decision_json(decision: &SyncDecision) -> Value {
    match decision {
        SyncDecision::Ignored => json!({ "outcome": "ignored" }),
        SyncDecision::Suppressed(event) => json!({ "outcome": "suppressed", "event": event.wire_tag() }),
        SyncDecision::Redirected { event, url } => {
            json!({ "outcome": "redirected", "event": event.wire_tag(), "url": url })
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
