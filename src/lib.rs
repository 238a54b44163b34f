pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod printer;

use std::future::Future;
use std::time::Duration;

use crate::http::{HttpBackend, ReqwestBackend};
use api::export::split_ids;
use api::{Dispatcher, ExportOptions, ImageFormat};
use clap::{Parser, ValueEnum};
use config::{Config, TlsVerification};
use error::FigmaError;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use printer::print_json;

/// Operation selected by the first positional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Fetch a file's document tree
    GetFile,
    /// List the comments on a file
    GetComments,
    /// Render layers of a file to images
    #[value(alias = "export-images")]
    Export,
    /// Show the user the token belongs to
    GetMe,
    /// List the projects of a team
    GetTeamProjects,
    /// List the files of a project
    GetProjectFiles,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::GetFile => "get-file",
            Action::GetComments => "get-comments",
            Action::Export => "export",
            Action::GetMe => "get-me",
            Action::GetTeamProjects => "get-team-projects",
            Action::GetProjectFiles => "get-project-files",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "figma-tool")]
#[command(author, version, about = "Read-only command-line client for the Figma REST API", long_about = None)]
pub struct Cli {
    /// Operation to perform
    pub action: Action,
    /// File key, team id or project id (not used by get-me)
    pub id: Option<String>,
    /// Comma-separated layer ids to export
    #[arg(long)]
    pub ids: Option<String>,
    /// Image format for export
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,
    /// Image scale factor for export
    #[arg(long, default_value_t = 1.0, value_parser = parse_scale)]
    pub scale: f64,
    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn tls(&self) -> TlsVerification {
        if self.insecure {
            TlsVerification::Disabled
        } else {
            TlsVerification::Strict
        }
    }

    fn export_options(&self) -> ExportOptions {
        let ids = self.ids.as_deref().map(split_ids).unwrap_or_default();
        ExportOptions::new(ids, self.format, self.scale)
    }
}

/// Parses `--scale`, accepting only positive finite numbers
pub fn parse_scale(s: &str) -> Result<f64, String> {
    let scale: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(format!("scale must be a positive number, got '{s}'"))
    }
}

pub async fn run_with_spinner<F, T>(message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    // Try to set a fancy template, fall back to simple spinner if it fails
    let style_result = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner} {msg}");

    match style_result {
        Ok(style) => pb.set_style(style),
        Err(_) => pb.set_style(ProgressStyle::default_spinner()),
    }

    let result = fut.await;
    pb.finish_and_clear();
    result
}

/// Runs the selected action against a dispatcher and returns the decoded body
pub async fn execute<B>(dispatcher: &Dispatcher<B>, cli: &Cli) -> Result<serde_json::Value, FigmaError>
where
    B: HttpBackend + Send + Sync,
{
    let id = cli.id.as_deref().unwrap_or_default();
    match cli.action {
        Action::GetFile => dispatcher.get_file(id).await,
        Action::GetComments => dispatcher.get_comments(id).await,
        Action::Export => dispatcher.export_images(id, &cli.export_options()).await,
        Action::GetMe => dispatcher.get_me().await,
        Action::GetTeamProjects => dispatcher.get_team_projects(id).await,
        Action::GetProjectFiles => dispatcher.get_project_files(id).await,
    }
}

/// Loads configuration, performs one request and prints the result
///
/// # Errors
/// Any [`FigmaError`]; the token is checked before anything else happens.
pub async fn run(cli: &Cli) -> Result<(), FigmaError> {
    let config = Config::from_env(cli.tls())?;
    let backend = ReqwestBackend::new(config.tls)?;
    let dispatcher = Dispatcher::new(backend, config.api);

    info!("running {}", cli.action.name());
    let spinner_msg = match &cli.id {
        Some(id) => format!("{} {id}", cli.action.name()),
        None => cli.action.name().to_string(),
    };
    let value = run_with_spinner(&spinner_msg, execute(&dispatcher, cli)).await?;
    print_json(&value, cli.compact);
    Ok(())
}
