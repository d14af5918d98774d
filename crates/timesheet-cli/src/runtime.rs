use anyhow::Context as _;
use tokio::runtime::{Builder, Handle};

/// Starts the runtime requests are sent from and keeps it running on its own
/// thread for the rest of the process, so responses keep arriving while the
/// main thread blocks waiting for them
pub fn start() -> anyhow::Result<Handle> {
    let rt = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("unable to create runtime")?;
    let handle = rt.handle().clone();
    std::thread::Builder::new()
        .name("runtime".into())
        .spawn(move || {
            tracing::info!("Runtime thread started");
            rt.block_on(std::future::pending::<()>())
        })
        .context("unable to spawn runtime thread")?;
    Ok(handle)
}
