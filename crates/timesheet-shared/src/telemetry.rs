//! Tracing setup for the native clients

use anyhow::Context;
use std::{
    fs::{create_dir_all, File},
    path::{Path, PathBuf},
};
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Folder trace files are created in, relative to the working directory
pub const TRACE_FOLDER: &str = "traces";

/// Where the traces ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceDestination {
    File(PathBuf),
    Stderr,
}

/// Compose the bunyan JSON layers into a subscriber writing to `sink`.
///
/// `RUST_LOG` takes precedence over `default_directive`. For acceptable
/// directives see <https://docs.rs/tracing-subscriber/0.3.19/tracing_subscriber/filter/struct.EnvFilter.html#directives>
pub fn get_subscriber<Sink, S>(
    name: String,
    default_directive: S,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    S: AsRef<str>,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name, sink))
}

/// Register a subscriber as global default to process span data.
///
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to set logger")?;
    set_global_default(subscriber).context("Failed to set subscriber")?;
    Ok(())
}

/// Sends traces to a new file in [`TRACE_FOLDER`], or to stderr if asked to or
/// if the file cannot be set up
pub fn init_tracing(
    app_name: &str,
    default_directive: &str,
    prefer_stderr: bool,
) -> anyhow::Result<TraceDestination> {
    if !prefer_stderr {
        match init_to_file(app_name, default_directive) {
            Ok(path) => return Ok(TraceDestination::File(path)),
            // Fall through to stderr
            Err(e) => eprintln!("Failed to start logging to file: {e:?}"),
        }
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to start tracing. Error: {e}"))?;
    Ok(TraceDestination::Stderr)
}

fn init_to_file(app_name: &str, default_directive: &str) -> anyhow::Result<PathBuf> {
    let (file, path) = create_trace_file(Path::new(TRACE_FOLDER), app_name)?;
    init_subscriber(get_subscriber(app_name.into(), default_directive, file))
        .context("Failed to start tracing to file")?;
    Ok(path)
}

fn gen_log_filename(app_name: &str) -> String {
    format!(
        "{}_{app_name}.log",
        chrono::Local::now().format("%Y-%m-%dT%H-%M-%S")
    )
}

/// Returns a handle to the file created and the file path
pub fn create_trace_file(log_folder: &Path, app_name: &str) -> anyhow::Result<(File, PathBuf)> {
    create_dir_all(log_folder)
        .with_context(|| format!("Failed to create logging folder: {log_folder:?}"))?;
    let file_path = log_folder.join(gen_log_filename(app_name));
    let file = File::create(&file_path)
        .with_context(|| format!("Failed to create log file: {file_path:?}"))?;
    Ok((file, file_path))
}
