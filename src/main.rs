use std::process::ExitCode;
use std::sync::Mutex;

use sheets_diagnostics::adapters::config::app_config::AppConfig;
use sheets_diagnostics::prettyprint::prettyprint::PrettyFormatter;
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod cli_adapter;

use cli_adapter::Command;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let options = match cli_adapter::parse_args(std::env::args().skip(1)) {
        Ok(Command::Diagnose(options)) => options,
        Ok(Command::Help) => {
            println!("{}", cli_adapter::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}\n\n{}", e, cli_adapter::USAGE);
            return ExitCode::from(2);
        }
    };

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            println!("❌ Failed to read configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_tracing(&config) {
        eprintln!("Logging disabled: {}", e);
    }
    setup_panic_hook();
    tracing::debug!("Loaded {:?}", config);

    cli_adapter::run(options, &config).await
}

fn setup_tracing(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let level: tracing::Level = config.log_level.parse()?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = match &config.log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(PrettyFormatter::new(false))
                .with_writer(Mutex::new(std::fs::File::create(path)?))
                .with_ansi(false),
        ),
        None => None,
    };

    Registry::default()
        .with(Targets::new().with_target("sheets_diagnostics", level))
        .with(log_file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

/// Logs panics through tracing, then hands them to the previous hook so the
/// message still reaches stderr when no subscriber is installed.
fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("panic: {info}");
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    static PREVIOUS_HOOK_CALLED: AtomicBool = AtomicBool::new(false);

    #[test]
    fn test_panic_hook_chains_to_previous_hook() {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| PREVIOUS_HOOK_CALLED.store(true, Ordering::SeqCst)));

        setup_panic_hook();
        let result = std::panic::catch_unwind(|| panic!("boom"));

        let _ = std::panic::take_hook();
        std::panic::set_hook(original);

        assert!(result.is_err());
        assert!(PREVIOUS_HOOK_CALLED.load(Ordering::SeqCst));
    }
}
