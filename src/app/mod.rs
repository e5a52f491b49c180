// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the panels.
//!
//! The `App` struct wires together the panels, localization and the
//! compression [`Session`](session::Session), and translates panel events into
//! side effects like compression runs or config persistence. No panel talks to
//! another directly.

mod message;
pub mod paths;
mod persistence;
pub mod session;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config;
use crate::i18n::fluent::I18n;
use crate::media::{Compressor, DimensionToggles, ImageCompressor, PreviewRegistry};
use crate::ui::theming::ThemeMode;
use crate::ui::{comparison, compression_options, file_intake, header_controls};
use iced::{window, Element, Subscription, Task, Theme};
use session::Session;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme_mode: ThemeMode,
    /// Effective theme, resolved when the mode changes.
    theme: Theme,
    session: Session,
    previews: PreviewRegistry,
    compressor: Arc<dyn Compressor>,
    header: header_controls::State,
    intake: file_intake::State,
    options: compression_options::State,
    comparison: comparison::State,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("theme_mode", &self.theme_mode)
            .field("has_original", &self.session.original().is_some())
            .field("busy", &self.session.busy())
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot function; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            theme_mode: ThemeMode::System,
            theme: ThemeMode::System.resolve(),
            session: Session::default(),
            previews: PreviewRegistry::new(),
            compressor: Arc::new(ImageCompressor::default()),
            header: header_controls::State::default(),
            intake: file_intake::State::default(),
            options: compression_options::State::default(),
            comparison: comparison::State::default(),
        }
    }
}

impl App {
    /// Initializes state from the config file and optionally preloads the
    /// image passed on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), flags.i18n_dir.clone(), &config);

        if let Some(key) = config_warning {
            tracing::warn!(message = %i18n.tr(&key), "using default settings");
        }

        let toggles = DimensionToggles {
            limit_dimensions: config.compression.limit_dimensions,
            specific_dimensions: config.compression.specific_dimensions,
        };
        let app = App {
            i18n,
            theme_mode: config.general.theme_mode,
            theme: config.general.theme_mode.resolve(),
            options: compression_options::State::new(config.compression.to_settings(), toggles),
            ..Self::default()
        };

        let task = match flags.file_path {
            Some(path) => Task::done(Message::Intake(file_intake::Message::FileDropped(
                PathBuf::from(path),
            ))),
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        self.theme = mode.resolve();
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::dispatch(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
