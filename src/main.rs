//! qrlocal entrypoint

use qrlocal::{QrEmitter, QrLocalConfig, Result, confirmation, logging};

fn main() -> Result<()> {
    let config = QrLocalConfig::load()?;
    let _log_guard = logging::init(&config.logging)?;
    config.report();

    let path = QrEmitter::new().emit()?;
    tracing::debug!(path = %path.display(), "Emit complete");

    println!("{}", confirmation());
    Ok(())
}
