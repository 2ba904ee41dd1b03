//! Command dispatch and handlers.

pub mod browse;
pub mod info;
pub mod listing;
pub mod map;

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command, GlobalArgs};
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::directory::Catalog;
use crate::error::Error;
use crate::map_query::MapQueryBuilder;

/// Everything a command needs once the directory has loaded.
pub struct App<'a> {
    /// Resolved configuration.
    pub config: &'a AppConfig,
    /// Port adapters.
    pub ctx: &'a ServiceContext,
    /// The loaded directory and its index.
    pub catalog: Catalog,
    /// Query builder for the configured map page.
    pub queries: MapQueryBuilder,
}

impl<'a> App<'a> {
    /// Loads the directory named by `config.source` through `ctx`.
    ///
    /// # Errors
    ///
    /// Returns the load failure, or [`Error::SourceMalformed`] when the
    /// document lists no places.
    pub async fn load(config: &'a AppConfig, ctx: &'a ServiceContext) -> Result<Self, Error> {
        let queries = config.query_builder()?;
        let catalog = Catalog::load(ctx.source.as_ref(), &config.source).await?;
        if catalog.directory().is_empty() {
            return Err(Error::SourceMalformed {
                reason: "the directory lists no places".to_string(),
            });
        }
        Ok(Self {
            config,
            ctx,
            catalog,
            queries,
        })
    }
}

/// Renders a library error as the text of its user-facing notice.
pub(crate) fn report(err: &Error) -> String {
    if err.is_fatal() {
        tracing::error!(error = %err, "cannot continue without the campus directory");
    } else {
        tracing::debug!(error = %err, "command failed");
    }
    err.notice().to_string()
}

/// Resolves configuration for `cli`: defaults, file, environment, then flags.
///
/// # Errors
///
/// Returns the notice text of a configuration failure.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig, String> {
    let GlobalArgs {
        source,
        config,
        maps_page,
    } = &cli.global;
    let mut resolved = AppConfig::load(config.as_deref()).map_err(|e| report(&e))?;
    if let Some(source) = source {
        resolved.source.clone_from(source);
    }
    if let Some(page) = maps_page {
        resolved.maps_page.clone_from(page);
    }
    if let Command::Here { at: Some(at), .. } = &cli.command {
        resolved.location.fix = Some(at.to_string());
    }
    Ok(resolved)
}

/// Dispatch a parsed command to its handler.
///
/// When `VTQUEST_REPLAY` is set, ports are served from the named cassette.
/// When `VTQUEST_RECORD` is set to a directory path, all port interactions
/// are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = resolve_config(cli)?;
    let (ctx, session) = ServiceContext::from_env(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let result = runtime.block_on(dispatch_with_context(&cli.command, &config, &ctx));

    // Cassettes are written whether or not the command succeeded.
    if let Some(session) = session {
        // The recording adapters hold the recorders until the context is gone.
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given configuration and service context.
async fn dispatch_with_context(
    command: &Command,
    config: &AppConfig,
    ctx: &ServiceContext,
) -> Result<(), String> {
    eprintln!("Loading campus directory from {}...", config.source);
    let app = App::load(config, ctx).await.map_err(|e| report(&e))?;

    match command {
        Command::Places => listing::places(&app),
        Command::Letters => listing::letters(&app),
        Command::Info { name, save_image } => info::run(&app, name, save_image.as_deref()).await,
        Command::Show { name, map_type } => map::show(&app, name, *map_type),
        Command::Campus { map_type } => map::campus(&app, *map_type),
        Command::Address { address, map_type } => map::address(&app, address, *map_type),
        Command::Here { map_type, .. } => map::here(&app, *map_type),
        Command::Directions { from, to, travel } => map::directions(&app, from, to, *travel),
        Command::Route { from, to, travel } => map::route(&app, from.clone(), to.clone(), *travel),
        Command::Browse => browse::run(&app).await,
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
