use timesheet_shared::telemetry::{self, TraceDestination};

const APP_NAME: &str = "timesheet_cli";

/// Quieter than `info` for the http stack so a trace file stays readable
const DEFAULT_DIRECTIVE: &str = "info,hyper=warn,reqwest=warn";

pub fn init(cli: &super::cli::Cli) -> anyhow::Result<()> {
    let destination = telemetry::init_tracing(APP_NAME, DEFAULT_DIRECTIVE, cli.is_to_std_out)?;
    if let TraceDestination::File(path) = destination {
        eprintln!("Tracing started to file {path:?}");
    }
    Ok(())
}
