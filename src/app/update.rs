// SPDX-License-Identifier: MPL-2.0
//! Update dispatch: routes panel messages and turns their events into
//! session changes, background compression and config writes.

use super::persistence;
use super::{App, Message};
use crate::media::compressor::compress_in_background;
use crate::media::CompressOptions;
use crate::ui::{comparison, compression_options, download, file_intake, header_controls};
use iced::Task;
use std::sync::Arc;

pub(super) fn dispatch(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Header(message) => handle_header(app, message),
        Message::Intake(message) => handle_intake(app, message),
        Message::Options(message) => handle_options(app, message),
        Message::Comparison(message) => {
            comparison::update(&mut app.comparison, message);
            Task::none()
        }
        Message::Download(message) => {
            let ctx = download::ViewContext {
                i18n: &app.i18n,
                original: app.session.original(),
                compressed: app.session.compressed(),
            };
            download::update(message, &ctx).map(Message::Download)
        }
        Message::CompressionFinished { generation, result } => {
            let completion = app
                .session
                .complete_compression(generation, result, &mut app.previews);
            tracing::debug!(?completion, generation, "compression completion applied");
            Task::none()
        }
    }
}

fn handle_header(app: &mut App, message: header_controls::Message) -> Task<Message> {
    match header_controls::update(&mut app.header, message) {
        header_controls::Event::None => {}
        header_controls::Event::LanguageSelected(locale) => {
            persistence::apply_language_change(&mut app.i18n, locale);
        }
        header_controls::Event::ThemeSelected(mode) => {
            app.set_theme_mode(mode);
            persistence::persist_theme_mode(mode);
        }
    }
    Task::none()
}

fn handle_intake(app: &mut App, message: file_intake::Message) -> Task<Message> {
    let (event, task) =
        file_intake::update(&mut app.intake, message, &mut app.previews, &app.i18n);
    match event {
        file_intake::Event::None => {}
        file_intake::Event::Accepted(record) => {
            app.session.replace_original(record, &mut app.previews);
            app.comparison = comparison::State::default();
        }
        file_intake::Event::Cleared => app.session.clear(&mut app.previews),
    }
    task.map(Message::Intake)
}

fn handle_options(app: &mut App, message: compression_options::Message) -> Task<Message> {
    let disabled = app.session.is_disabled();
    match compression_options::update(&mut app.options, message, disabled) {
        compression_options::Event::None => Task::none(),
        compression_options::Event::SettingsChanged => {
            persistence::persist_compression_settings(&app.options);
            Task::none()
        }
        compression_options::Event::CompressRequested(options) => start_compression(app, options),
    }
}

fn start_compression(app: &mut App, options: CompressOptions) -> Task<Message> {
    let Some(job) = app.session.begin_compression(options) else {
        return Task::none();
    };
    tracing::info!(
        generation = job.generation,
        quality = job.options.quality,
        "starting compression"
    );

    let generation = job.generation;
    Task::perform(
        compress_in_background(Arc::clone(&app.compressor), job.input, job.options),
        move |result| Message::CompressionFinished { generation, result },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::media::{CompressedOutput, ImageRecord};

    fn load_original(app: &mut App) {
        let record = ImageRecord::new(
            "photo.png",
            "image/png",
            Arc::from(&[3u8; 200][..]),
            &mut app.previews,
        );
        app.session.replace_original(record, &mut app.previews);
    }

    #[test]
    fn compress_request_without_original_keeps_idle() {
        let mut app = App::default();
        let _ = dispatch(
            &mut app,
            Message::Options(compression_options::Message::Compress),
        );
        assert!(!app.session.is_busy());
    }

    #[test]
    fn compress_request_marks_session_busy() {
        let mut app = App::default();
        load_original(&mut app);
        let _ = dispatch(
            &mut app,
            Message::Options(compression_options::Message::Compress),
        );
        assert!(app.session.is_busy());
    }

    #[test]
    fn options_are_frozen_while_busy() {
        let mut app = App::default();
        load_original(&mut app);
        let _ = dispatch(
            &mut app,
            Message::Options(compression_options::Message::Compress),
        );
        let before = app.options.clone();
        let _ = dispatch(
            &mut app,
            Message::Options(compression_options::Message::QualityChanged(0.1)),
        );
        assert_eq!(app.options, before);
    }

    #[test]
    fn finished_compression_is_stored() {
        let mut app = App::default();
        load_original(&mut app);
        let generation = app.session.generation();
        let _ = dispatch(
            &mut app,
            Message::Options(compression_options::Message::Compress),
        );
        let _ = dispatch(
            &mut app,
            Message::CompressionFinished {
                generation,
                result: Ok(CompressedOutput {
                    bytes: Arc::from(&[1u8; 80][..]),
                    mime_type: "image/jpeg".into(),
                    width: 4,
                    height: 4,
                }),
            },
        );
        assert!(!app.session.is_busy());
        assert_eq!(app.session.compressed().map(|c| c.record.size), Some(80));
    }

    #[test]
    fn failed_compression_falls_back() {
        let mut app = App::default();
        load_original(&mut app);
        let generation = app.session.generation();
        let _ = dispatch(
            &mut app,
            Message::Options(compression_options::Message::Compress),
        );
        let _ = dispatch(
            &mut app,
            Message::CompressionFinished {
                generation,
                result: Err(Error::Encode("unsupported".into())),
            },
        );
        assert!(app.session.compressed().is_some_and(|c| c.is_fallback()));
    }

    #[test]
    fn theme_selection_updates_mode() {
        let mut app = App::default();
        let _ = dispatch(
            &mut app,
            Message::Header(header_controls::Message::SelectTheme(
                crate::ui::theming::ThemeMode::Dark,
            )),
        );
        assert_eq!(app.theme_mode, crate::ui::theming::ThemeMode::Dark);
        assert_eq!(app.theme(), iced::Theme::Dark);
    }

    #[test]
    fn clearing_intake_empties_session() {
        let mut app = App::default();
        load_original(&mut app);
        let _ = dispatch(&mut app, Message::Intake(file_intake::Message::Clear));
        assert!(app.session.original().is_none());
    }
}
