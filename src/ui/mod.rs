// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Every panel follows the Elm-style "state down, messages up" pattern: it
//! renders from a `ViewContext`, handles its own `Message`s and reports
//! anything the orchestrator must act on through an `Event`.
//!
//! # Panels
//!
//! - [`file_intake`] - Drop zone, open dialog and thumbnail of the loaded image
//! - [`compression_options`] - Quality slider and dimension switches
//! - [`comparison`] - Split view of original and compressed image
//! - [`download`] - Save dialogs and savings summary
//! - [`header_controls`] - Language and theme pickers
//!
//! # Shared Infrastructure
//!
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod comparison;
pub mod compression_options;
pub mod design_tokens;
pub mod download;
pub mod file_intake;
pub mod header_controls;
pub mod styles;
pub mod theming;
