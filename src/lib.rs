// SPDX-License-Identifier: MPL-2.0
//! `iced_compressor` is a desktop image compressor built with the Iced GUI framework.
//!
//! Load an image, pick a quality and optional dimension limits, then compare
//! the compressed result against the original before saving it. The interface
//! is localized with Fluent and remembers its preferences between sessions.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;
