// SPDX-License-Identifier: MPL-2.0
use iced_compressor::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "iced_compressor=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> iced::Result {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();

    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|error| {
        tracing::warn!(%error, "ignoring invalid --lang argument");
        None
    });
    let config_dir = args
        .opt_value_from_str("--config-dir")
        .unwrap_or_else(|error| {
            tracing::warn!(%error, "ignoring invalid --config-dir argument");
            None
        });
    let i18n_dir = args.opt_value_from_str("--i18n-dir").unwrap_or_else(|error| {
        tracing::warn!(%error, "ignoring invalid --i18n-dir argument");
        None
    });

    let flags = Flags {
        lang,
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
        i18n_dir,
        config_dir,
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    tracing::info!("starting image compressor");

    app::run(flags)
}
