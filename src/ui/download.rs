// SPDX-License-Identifier: MPL-2.0
//! Download panel.
//!
//! Offers each available image for saving through the native save dialog and
//! summarizes how much space the compression saved.

use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::intake;
use crate::media::metrics::{format_file_size, Savings};
use crate::media::{CompressedImage, ImageRecord};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, Column, Container, Row};
use iced::{Alignment, Element, Length, Task};
use std::path::PathBuf;
use std::sync::Arc;

/// Which image a download refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Original,
    Compressed,
}

#[derive(Debug, Clone)]
pub enum Message {
    Download(Target),
    /// `Ok(None)` when the dialog was dismissed.
    Saved(Result<Option<PathBuf>, Error>),
}

/// Contextual data needed to render the panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub original: Option<&'a ImageRecord>,
    pub compressed: Option<&'a CompressedImage>,
}

impl<'a> ViewContext<'a> {
    fn record(&self, target: Target) -> Option<&'a ImageRecord> {
        match target {
            Target::Original => self.original,
            Target::Compressed => self.compressed.map(|compressed| &compressed.record),
        }
    }
}

fn save(title: String, file_name: String, payload: Arc<[u8]>) -> Task<Message> {
    Task::perform(
        async move {
            let Some(handle) = rfd::AsyncFileDialog::new()
                .set_title(&title)
                .set_file_name(&file_name)
                .save_file()
                .await
            else {
                return Ok(None);
            };
            intake::write_file(handle.path().to_path_buf(), payload)
                .await
                .map(Some)
        },
        Message::Saved,
    )
}

/// Process a download message.
pub fn update(message: Message, ctx: &ViewContext<'_>) -> Task<Message> {
    match message {
        Message::Download(target) => match ctx.record(target) {
            Some(record) => save(
                ctx.i18n.tr("download-dialog-title"),
                record.name.clone(),
                Arc::clone(&record.payload),
            ),
            None => Task::none(),
        },
        Message::Saved(Ok(Some(_))) | Message::Saved(Ok(None)) => Task::none(),
        Message::Saved(Err(error)) => {
            tracing::error!(%error, "failed to save image");
            Task::none()
        }
    }
}

fn record_row<'a>(
    ctx: &ViewContext<'a>,
    label_key: &str,
    record: &'a ImageRecord,
    target: Target,
) -> Element<'a, Message> {
    let details = format!("{} • {}", record.name, format_file_size(record.size as i64));
    let (button_style, tile_style): (
        fn(&iced::Theme, button::Status) -> button::Style,
        fn(&iced::Theme) -> container::Style,
    ) = match target {
        Target::Original => (styles::button::secondary, styles::container::tile),
        Target::Compressed => (styles::button::primary, styles::container::success_tile),
    };

    container(
        Row::new()
            .spacing(spacing::MD)
            .align_y(Alignment::Center)
            .push(
                Column::new()
                    .spacing(spacing::XXS)
                    .width(Length::Fill)
                    .push(text(ctx.i18n.tr(label_key)).size(typography::BODY))
                    .push(text(details).size(typography::CAPTION)),
            )
            .push(
                button(text(ctx.i18n.tr("download-download")))
                    .on_press(Message::Download(target))
                    .style(button_style),
            ),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(tile_style)
    .into()
}

/// Render the download panel.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(spacing::MD)
        .push(text(ctx.i18n.tr("download-title")).size(typography::TITLE_SM));

    let Some(original) = ctx.original else {
        content = content.push(
            container(text(ctx.i18n.tr("download-no-images")).size(typography::BODY))
                .padding(spacing::LG)
                .center_x(Length::Fill),
        );
        return wrap(content);
    };

    content = content.push(record_row(
        &ctx,
        "download-original-image",
        original,
        Target::Original,
    ));

    if let Some(compressed) = ctx.compressed {
        content = content.push(record_row(
            &ctx,
            "download-compressed-image",
            &compressed.record,
            Target::Compressed,
        ));

        if compressed.is_fallback() {
            content = content.push(
                text(ctx.i18n.tr("download-fallback-notice"))
                    .size(typography::CAPTION)
                    .color(palette::WARNING_500),
            );
        }

        if let Some(savings) = Savings::between(original.size, Some(compressed.record.size)) {
            content = content.push(
                container(
                    Row::new()
                        .spacing(spacing::XXS)
                        .push(text(ctx.i18n.tr("download-saved")).size(typography::BODY))
                        .push(
                            text(format_file_size(savings.bytes_saved))
                                .size(typography::BODY)
                                .color(palette::SUCCESS_500),
                        )
                        .push(
                            text(format!("({}%)", savings.percent_saved)).size(typography::BODY),
                        ),
                )
                .center_x(Length::Fill),
            );
        }
    }

    wrap(content)
}

fn wrap<'a>(content: Column<'a, Message>) -> Element<'a, Message> {
    Container::new(content)
        .padding(spacing::LG)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}
