// SPDX-License-Identifier: MPL-2.0
//! Compression options panel.
//!
//! Edits the quality and the two independent dimension switches, and emits
//! the compress request. Every input is inert while no image is loaded or a
//! compression is running.

use crate::config::defaults::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, MAX_QUALITY, MIN_QUALITY, PLACEHOLDER_HEIGHT,
    PLACEHOLDER_WIDTH, QUALITY_STEP,
};
use crate::i18n::fluent::I18n;
use crate::media::{CompressOptions, CompressionSettings, DimensionToggles};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, slider, text, text_input, toggler, Column, Container, Row};
use iced::{Element, Length};

/// Parses a dimension the way a lenient form field would: leading digits
/// only; empty, zero, or invalid input means "unset".
pub fn parse_dimension(input: &str) -> Option<u32> {
    let trimmed = input.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u32>().ok().filter(|value| *value > 0)
}

/// Snaps a slider value onto the quality grid.
fn snap_quality(value: f32) -> f32 {
    ((value / QUALITY_STEP).round() * QUALITY_STEP).clamp(MIN_QUALITY, MAX_QUALITY)
}

/// Quality as a whole percentage for display.
pub fn quality_percent(quality: f32) -> i64 {
    (quality * 100.0).round() as i64
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub settings: CompressionSettings,
    pub toggles: DimensionToggles,
}

impl State {
    pub fn new(settings: CompressionSettings, toggles: DimensionToggles) -> Self {
        Self { settings, toggles }
    }

    /// Options for the compressor from the current panel state.
    pub fn options(&self) -> CompressOptions {
        CompressOptions::from_settings(&self.settings, self.toggles)
    }
}

/// Contextual data needed to render the panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    /// No original loaded, or a compression is running.
    pub disabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    QualityChanged(f32),
    LimitDimensionsToggled(bool),
    SpecificDimensionsToggled(bool),
    MaxWidthChanged(String),
    MaxHeightChanged(String),
    WidthChanged(String),
    HeightChanged(String),
    Compress,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Settings changed and should be persisted.
    SettingsChanged,
    CompressRequested(CompressOptions),
}

/// Process an options message. Ignored entirely while `disabled`.
pub fn update(state: &mut State, message: Message, disabled: bool) -> Event {
    if disabled {
        return Event::None;
    }

    let settings = &mut state.settings;
    match message {
        Message::QualityChanged(value) => settings.quality = snap_quality(value),
        Message::LimitDimensionsToggled(on) => state.toggles.limit_dimensions = on,
        Message::SpecificDimensionsToggled(on) => state.toggles.specific_dimensions = on,
        Message::MaxWidthChanged(value) => settings.max_width = parse_dimension(&value),
        Message::MaxHeightChanged(value) => settings.max_height = parse_dimension(&value),
        Message::WidthChanged(value) => settings.width = parse_dimension(&value),
        Message::HeightChanged(value) => settings.height = parse_dimension(&value),
        Message::Compress => return Event::CompressRequested(state.options()),
    }
    Event::SettingsChanged
}

fn dimension_value(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn dimension_input<'a>(
    label: String,
    placeholder: u32,
    value: Option<u32>,
    on_input: fn(String) -> Message,
    disabled: bool,
) -> Element<'a, Message> {
    let placeholder = placeholder.to_string();
    let value = dimension_value(value);
    Column::new()
        .spacing(spacing::XXS)
        .push(text(label).size(typography::CAPTION))
        .push(
            text_input(&placeholder, &value)
                .on_input_maybe((!disabled).then_some(on_input))
                .width(Length::Fixed(sizing::DIMENSION_INPUT_WIDTH)),
        )
        .into()
}

/// Render the options panel.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let settings = &ctx.state.settings;
    let toggles = ctx.state.toggles;

    let quality_label = i18n.tr_with_args(
        "compression-quality-label",
        &[("percent", quality_percent(settings.quality))],
    );
    let quality = Column::new()
        .spacing(spacing::XS)
        .push(text(quality_label).size(typography::BODY))
        .push(
            slider(MIN_QUALITY..=MAX_QUALITY, settings.quality, Message::QualityChanged)
                .step(QUALITY_STEP),
        )
        .push(text(i18n.tr("compression-quality-note")).size(typography::CAPTION));

    let mut content = Column::new()
        .spacing(spacing::MD)
        .push(text(i18n.tr("compression-title")).size(typography::TITLE_SM))
        .push(quality)
        .push(
            toggler(toggles.limit_dimensions)
                .label(i18n.tr("compression-limit-dimensions"))
                .on_toggle_maybe((!ctx.disabled).then_some(Message::LimitDimensionsToggled)),
        );

    if toggles.limit_dimensions {
        content = content.push(
            Row::new()
                .spacing(spacing::MD)
                .push(dimension_input(
                    i18n.tr("compression-max-width"),
                    DEFAULT_MAX_WIDTH,
                    settings.max_width,
                    Message::MaxWidthChanged,
                    ctx.disabled,
                ))
                .push(dimension_input(
                    i18n.tr("compression-max-height"),
                    DEFAULT_MAX_HEIGHT,
                    settings.max_height,
                    Message::MaxHeightChanged,
                    ctx.disabled,
                )),
        );
    }

    content = content.push(
        toggler(toggles.specific_dimensions)
            .label(i18n.tr("compression-specific-dimensions"))
            .on_toggle_maybe((!ctx.disabled).then_some(Message::SpecificDimensionsToggled)),
    );

    if toggles.specific_dimensions {
        content = content.push(
            Row::new()
                .spacing(spacing::MD)
                .push(dimension_input(
                    i18n.tr("compression-width"),
                    PLACEHOLDER_WIDTH,
                    settings.width,
                    Message::WidthChanged,
                    ctx.disabled,
                ))
                .push(dimension_input(
                    i18n.tr("compression-height"),
                    PLACEHOLDER_HEIGHT,
                    settings.height,
                    Message::HeightChanged,
                    ctx.disabled,
                )),
        );
    }

    let label = if ctx.busy {
        i18n.tr("compression-compressing")
    } else {
        i18n.tr("compression-compress")
    };
    content = content.push(
        button(text(label).width(Length::Fill).center())
            .width(Length::Fill)
            .padding(spacing::SM)
            .on_press_maybe((!ctx.disabled).then_some(Message::Compress))
            .style(styles::button::primary),
    );

    Container::new(content)
        .padding(spacing::LG)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_dimension_reads_leading_digits() {
        assert_eq!(parse_dimension("800"), Some(800));
        assert_eq!(parse_dimension("  640px"), Some(640));
        assert_eq!(parse_dimension("12a34"), Some(12));
        assert_eq!(parse_dimension("+5"), Some(5));
    }

    #[test]
    fn parse_dimension_treats_empty_zero_and_garbage_as_unset() {
        assert_eq!(parse_dimension(""), None);
        assert_eq!(parse_dimension("0"), None);
        assert_eq!(parse_dimension("abc"), None);
        assert_eq!(parse_dimension("-5"), None);
        assert_eq!(parse_dimension("99999999999"), None);
    }

    #[test]
    fn quality_snaps_to_tenths() {
        let mut state = State::default();
        update(&mut state, Message::QualityChanged(0.34), false);
        assert_relative_eq!(state.settings.quality, 0.3, epsilon = 1e-6);

        update(&mut state, Message::QualityChanged(0.0), false);
        assert_relative_eq!(state.settings.quality, MIN_QUALITY, epsilon = 1e-6);
    }

    #[test]
    fn quality_percent_rounds() {
        assert_eq!(quality_percent(0.8), 80);
        assert_eq!(quality_percent(0.3), 30);
    }

    #[test]
    fn editing_reports_settings_change() {
        let mut state = State::default();
        let event = update(&mut state, Message::WidthChanged("1024".into()), false);
        assert_eq!(event, Event::SettingsChanged);
        assert_eq!(state.settings.width, Some(1024));
    }

    #[test]
    fn clearing_a_dimension_unsets_it() {
        let mut state = State::default();
        update(&mut state, Message::MaxWidthChanged(String::new()), false);
        assert_eq!(state.settings.max_width, None);
    }

    #[test]
    fn toggles_are_independent() {
        let mut state = State::default();
        update(&mut state, Message::SpecificDimensionsToggled(true), false);
        assert!(state.toggles.limit_dimensions);
        assert!(state.toggles.specific_dimensions);

        update(&mut state, Message::LimitDimensionsToggled(false), false);
        assert!(!state.toggles.limit_dimensions);
        assert!(state.toggles.specific_dimensions);
    }

    #[test]
    fn compress_emits_mapped_options() {
        let mut state = State::default();
        update(&mut state, Message::WidthChanged("800".into()), false);
        update(&mut state, Message::HeightChanged("600".into()), false);
        update(&mut state, Message::SpecificDimensionsToggled(true), false);

        match update(&mut state, Message::Compress, false) {
            Event::CompressRequested(options) => {
                assert_eq!(options.max_width, Some(1920));
                assert_eq!((options.width, options.height), (Some(800), Some(600)));
            }
            other => panic!("expected CompressRequested, got {other:?}"),
        }
    }

    #[test]
    fn disabled_panel_ignores_everything() {
        let mut state = State::default();
        let before = state.clone();
        assert_eq!(update(&mut state, Message::Compress, true), Event::None);
        assert_eq!(update(&mut state, Message::QualityChanged(0.2), true), Event::None);
        assert_eq!(
            update(&mut state, Message::LimitDimensionsToggled(false), true),
            Event::None
        );
        assert_eq!(state, before);
    }
}
