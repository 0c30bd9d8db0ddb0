use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{FormBindings, FormValues, HttpTransport, RequestSubmitter, SubmitterOptions};
use shared::domain::{DisablePolicy, Identifier};
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, Settings};
use terminal::TerminalInteraction;

/// Submit commands to the telescope control server.
#[derive(Parser, Debug)]
#[command(name = "tcs-request", version)]
struct Cli {
    /// Settings file; defaults to ./tcs-request.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// URL of the control page that request.cgi lives next to.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Submit without asking first.
    #[arg(long, short = 'y', global = true, conflicts_with = "confirm")]
    yes: bool,
    /// Ask before submitting even if settings say otherwise.
    #[arg(long, global = true)]
    confirm: bool,
    /// legacy | require-selection
    #[arg(long, global = true)]
    disable_policy: Option<DisablePolicy>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// selector enablealert <IDENTIFIER>
    EnableAlert { identifier: Option<String> },
    /// selector disablealert <IDENTIFIER>
    DisableAlert { identifier: Option<String> },
    /// telescope move <ARGS...>
    Move {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, allow_negative_numbers = true)]
        args: Vec<String>,
    },
    /// Send a command line as typed.
    Send {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

impl Cli {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(v) = &self.base_url {
            settings.base_url = v.clone();
        }
        if self.yes {
            settings.confirm_requests = false;
        }
        if self.confirm {
            settings.confirm_requests = true;
        }
        if let Some(v) = self.disable_policy {
            settings.disable_policy = v;
        }
        if let Some(v) = self.timeout_secs {
            settings.request_timeout_secs = (v > 0).then_some(v);
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    cli.apply_overrides(&mut settings);

    let transport = HttpTransport::new(&settings.base_url, settings.request_timeout())?;
    let submitter = RequestSubmitter::new(
        Arc::new(transport),
        Arc::new(TerminalInteraction::stdio()),
        SubmitterOptions {
            confirm_requests: settings.confirm_requests,
        },
    );
    let forms = FormBindings::bind(submitter, settings.disable_policy);

    let handled = match cli.command {
        Command::EnableAlert { identifier } => forms.alert_enable(&selection(identifier)),
        Command::DisableAlert { identifier } => forms.alert_disable(&selection(identifier)),
        Command::Move { args } => forms.telescope_move(&FormValues::with_move_args(args.join(" "))),
        Command::Send { words } => Some(
            forms
                .submitter()
                .submit_command(shared::protocol::Command::raw(words.join(" "))),
        ),
    };

    let outcomes = forms.submitter().wait_idle().await;
    if handled.is_none() {
        return Ok(ExitCode::from(2));
    }
    if outcomes.iter().any(|outcome| outcome.is_err()) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn selection(identifier: Option<String>) -> FormValues {
    FormValues {
        identifier: identifier.map(Identifier::new),
        ..FormValues::default()
    }
}
