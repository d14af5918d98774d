/// Logs the error of a `Result` as a warning and carries on
///
/// For failures that can happen under normal operation (for example storage
/// that cannot be written) but that should show up in the traces
#[macro_export]
macro_rules! log_err_as_warn {
    ($arg: expr) => {
        if let Err(mishap) = $arg {
            tracing::warn!(?mishap);
        }
    };
    ($arg: expr, $msg: literal) => {
        if let Err(mishap) = $arg {
            tracing::warn!(?mishap, $msg);
        }
    };
}
