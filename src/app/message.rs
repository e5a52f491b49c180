// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::media::CompressedOutput;
use crate::ui::{comparison, compression_options, download, file_intake, header_controls};

/// Top-level messages consumed by `App::update`. The variants forward
/// panel messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Header(header_controls::Message),
    Intake(file_intake::Message),
    Options(compression_options::Message),
    Comparison(comparison::Message),
    Download(download::Message),
    /// Result of the compression started at `generation`.
    CompressionFinished {
        generation: u64,
        result: Result<CompressedOutput, Error>,
    },
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `id`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to preload on startup.
    pub file_path: Option<String>,
    /// Optional directory containing Fluent `.ftl` files overriding the
    /// embedded translations.
    pub i18n_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_COMPRESSOR_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
