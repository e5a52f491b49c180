// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Lays the panels out in two columns on wide windows and stacks them on
//! narrow ones.

use super::{App, Message};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::{comparison, compression_options, download, file_intake, header_controls};
use iced::widget::{responsive, text, Column, Container, Row, Scrollable};
use iced::{Alignment, Element, Length, Size};

/// Below this width the panels are stacked in a single column.
pub const TWO_COLUMN_MIN_WIDTH: f32 = 900.0;

pub fn uses_two_columns(available: Size) -> bool {
    available.width >= TWO_COLUMN_MIN_WIDTH
}

fn header(app: &App) -> Element<'_, Message> {
    let titles = Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fill)
        .push(text(app.i18n.tr("app-title")).size(typography::TITLE_LG))
        .push(text(app.i18n.tr("app-subtitle")).size(typography::BODY_LG));

    let controls = header_controls::view(header_controls::ViewContext {
        i18n: &app.i18n,
        state: &app.header,
        theme_mode: app.theme_mode,
    })
    .map(Message::Header);

    Row::new()
        .spacing(spacing::MD)
        .align_y(Alignment::Start)
        .push(titles)
        .push(controls)
        .into()
}

fn input_panels(app: &App) -> Column<'_, Message> {
    let intake = file_intake::view(file_intake::ViewContext {
        i18n: &app.i18n,
        state: &app.intake,
    })
    .map(Message::Intake);

    let options = compression_options::view(compression_options::ViewContext {
        i18n: &app.i18n,
        state: &app.options,
        disabled: app.session.is_disabled(),
        busy: app.session.is_busy(),
    })
    .map(Message::Options);

    Column::new().spacing(spacing::LG).push(intake).push(options)
}

fn result_panels(app: &App) -> Column<'_, Message> {
    let comparison = comparison::view(comparison::ViewContext {
        i18n: &app.i18n,
        state: &app.comparison,
        original: app.session.original(),
        compressed: app.session.compressed(),
        busy: app.session.is_busy(),
    })
    .map(Message::Comparison);

    let download = download::view(download::ViewContext {
        i18n: &app.i18n,
        original: app.session.original(),
        compressed: app.session.compressed(),
    })
    .map(Message::Download);

    Column::new().spacing(spacing::LG).push(comparison).push(download)
}

fn body(app: &App, available: Size) -> Element<'_, Message> {
    let content: Element<'_, Message> = if uses_two_columns(available) {
        Row::new()
            .spacing(spacing::LG)
            .push(input_panels(app).width(Length::FillPortion(1)))
            .push(result_panels(app).width(Length::FillPortion(1)))
            .into()
    } else {
        Column::new()
            .spacing(spacing::LG)
            .push(input_panels(app))
            .push(result_panels(app))
            .into()
    };

    Scrollable::new(
        Container::new(
            Column::new()
                .spacing(spacing::LG)
                .push(header(app))
                .push(content),
        )
        .padding(spacing::LG)
        .width(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}

/// Renders the whole window.
pub fn view(app: &App) -> Element<'_, Message> {
    responsive(move |available| body(app, available)).into()
}
