use taskboard::{commands::Cli, libs::messages::macros::is_debug_mode, msg_error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    if is_debug_mode() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "taskboard=debug".into()))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    if let Err(err) = Cli::menu() {
        msg_error!(format!("{err:#}"));
        std::process::exit(1);
    }
}
