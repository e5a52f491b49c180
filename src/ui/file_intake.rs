// SPDX-License-Identifier: MPL-2.0
//! File intake panel.
//!
//! Accepts one image at a time from a drop on the window or from the native
//! open dialog. Files whose media type is not `image/*` are ignored without
//! feedback. The panel owns the preview handle of the accepted file and
//! releases it when the file is cleared or replaced.

use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::{intake, ImageRecord, IncomingFile, PreviewHandle, PreviewRegistry};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, image, mouse_area, text, Column, Container, Row};
use iced::{alignment::Horizontal, Alignment, ContentFit, Element, Length, Task};
use std::path::PathBuf;

/// Extensions offered by the open dialog.
pub const DIALOG_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "webp", "gif"];

#[derive(Debug, Default)]
pub struct State {
    preview: Option<PreviewHandle>,
    file_name: Option<String>,
    drag_active: bool,
    /// A path of the current drop gesture is already being loaded.
    drop_taken: bool,
}

impl State {
    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    fn release_preview(&mut self, registry: &mut PreviewRegistry) {
        if let Some(preview) = self.preview.take() {
            registry.release(&preview);
        }
        self.file_name = None;
    }
}

/// Contextual data needed to render the panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenDialog,
    DialogClosed(Option<PathBuf>),
    FileDropped(PathBuf),
    FileHovered,
    FilesHoveredLeft,
    FileLoaded(Result<IncomingFile, Error>),
    Clear,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// A new original image was accepted.
    Accepted(ImageRecord),
    Cleared,
}

fn load(path: PathBuf) -> Task<Message> {
    Task::perform(intake::read_file(path), Message::FileLoaded)
}

fn open_dialog(title: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(&title)
                .add_filter("Images", DIALOG_EXTENSIONS)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::DialogClosed,
    )
}

/// Process an intake message.
pub fn update(
    state: &mut State,
    message: Message,
    registry: &mut PreviewRegistry,
    i18n: &I18n,
) -> (Event, Task<Message>) {
    match message {
        Message::OpenDialog => (Event::None, open_dialog(i18n.tr("upload-dialog-title"))),
        Message::DialogClosed(Some(path)) => (Event::None, load(path)),
        Message::DialogClosed(None) => (Event::None, Task::none()),
        Message::FileDropped(path) => {
            state.drag_active = false;
            // One event arrives per dropped file; only the first one counts.
            if state.drop_taken {
                tracing::debug!(path = %path.display(), "ignoring extra dropped file");
                return (Event::None, Task::none());
            }
            state.drop_taken = true;
            (Event::None, load(path))
        }
        Message::FileHovered => {
            if !state.drag_active {
                state.drop_taken = false;
            }
            state.drag_active = true;
            (Event::None, Task::none())
        }
        Message::FilesHoveredLeft => {
            state.drag_active = false;
            state.drop_taken = false;
            (Event::None, Task::none())
        }
        Message::FileLoaded(Ok(file)) => {
            if !file.is_image() {
                tracing::debug!(name = %file.name, mime_type = %file.mime_type, "ignoring non-image file");
                return (Event::None, Task::none());
            }
            state.release_preview(registry);
            let record = ImageRecord::from_file(file, registry);
            tracing::info!(name = %record.name, size = record.size, "accepted image");
            state.preview = Some(record.preview.clone());
            state.file_name = Some(record.name.clone());
            (Event::Accepted(record), Task::none())
        }
        Message::FileLoaded(Err(error)) => {
            tracing::warn!(%error, "could not read file");
            (Event::None, Task::none())
        }
        Message::Clear => {
            state.release_preview(registry);
            (Event::Cleared, Task::none())
        }
    }
}

/// Render the intake panel.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = text(ctx.i18n.tr("upload-title")).size(typography::TITLE_SM);

    let body = match (&ctx.state.preview, &ctx.state.file_name) {
        (Some(preview), Some(name)) => build_loaded(&ctx, preview, name),
        _ => build_drop_zone(&ctx),
    };

    Container::new(
        Column::new()
            .spacing(spacing::MD)
            .push(title)
            .push(body),
    )
    .padding(spacing::LG)
    .width(Length::Fill)
    .style(styles::container::panel)
    .into()
}

fn build_drop_zone<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let headline = if ctx.state.drag_active {
        ctx.i18n.tr("upload-drop-here")
    } else {
        ctx.i18n.tr("upload-drag-drop")
    };

    let content = Column::new()
        .spacing(spacing::XS)
        .align_x(Alignment::Center)
        .push(text(headline).size(typography::BODY_LG))
        .push(text(ctx.i18n.tr("upload-supports")).size(typography::CAPTION));

    let zone = container(content)
        .padding(spacing::LG)
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .center_y(Length::Fixed(sizing::PREVIEW_HEIGHT))
        .style(styles::container::drop_zone(ctx.state.drag_active));

    mouse_area(zone).on_press(Message::OpenDialog).into()
}

fn build_loaded<'a>(
    ctx: &ViewContext<'a>,
    preview: &'a PreviewHandle,
    name: &'a str,
) -> Element<'a, Message> {
    let thumbnail = image(preview.handle().clone())
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::PREVIEW_HEIGHT));

    let footer = Row::new()
        .spacing(spacing::SM)
        .align_y(Alignment::Center)
        .push(
            Column::new()
                .spacing(spacing::XXS)
                .width(Length::Fill)
                .push(text(name).size(typography::BODY))
                .push(text(ctx.i18n.tr("upload-ready-to-compress")).size(typography::CAPTION)),
        )
        .push(
            button(text(ctx.i18n.tr("upload-clear-button")))
                .on_press(Message::Clear)
                .style(styles::button::secondary),
        );

    Column::new()
        .spacing(spacing::SM)
        .push(thumbnail)
        .push(footer)
        .into()
}
