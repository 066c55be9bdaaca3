use std::sync::LazyLock;
use std::time::Instant;

use anyhow::Result;

/// Process start, used to prefix log lines with an elapsed-time stamp
/// rather than a wall-clock one.
pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Configure the global logger: leveled, `[HH:MM:SS]`-prefixed (elapsed
/// since process start), to stdout.
pub fn init_logger() -> Result<()> {
    LazyLock::force(&EPOCH);
    fern::Dispatch::new()
        .format(|out, message, record| {
            let elapsed = EPOCH.elapsed();
            let h = elapsed.as_secs() / 3600;
            let m = (elapsed.as_secs() % 3600) / 60;
            let s = elapsed.as_secs() % 60;
            out.finish(format_args!(
                "[{h:02}:{m:02}:{s:02}] {:<5} {}",
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()?;
    log::info!("hyperpack-cli starting at {}", jiff::Timestamp::now());
    Ok(())
}
