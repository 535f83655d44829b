#[cfg(not(target_arch = "wasm32"))]
pub fn init_native_log(level: &str) {
    use tracing_subscriber::{filter::LevelFilter, prelude::*};

    let (level, unknown) = match level.parse::<LevelFilter>() {
        Ok(level) => (level, false),
        Err(_) => (LevelFilter::INFO, true),
    };

    let stdout_log = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .pretty()
        .with_filter(level);

    tracing_subscriber::registry().with(stdout_log).init();

    if unknown {
        ::log::warn!("unknown log level, falling back to info");
    }
}

/// Forwards `log` records to the current tracing subscriber.
///
/// `init_native_log` gets this from `tracing_subscriber`'s `init`, the web
/// build has to install it itself.
pub fn bridge_log_records() -> Result<(), ::log::SetLoggerError> {
    tracing_log::LogTracer::init()
}

#[cfg(target_arch = "wasm32")]
pub fn init_web_log() {
    // Make sure panics are logged using `console.error`.
    console_error_panic_hook::set_once();
    // Redirect tracing to console.log and friends:
    tracing_wasm::set_as_global_default();
    // only fails when another logger is already installed
    bridge_log_records().ok();
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing_subscriber::util::SubscriberInitExt;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn log_records_reach_the_tracing_subscriber() {
        let captured = Captured::default();
        let writer = captured.clone();
        let _guard = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish()
            .set_default();

        super::bridge_log_records().ok();
        ::log::warn!("row 2 was rejected");

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("row 2 was rejected"));
    }
}
