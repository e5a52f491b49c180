// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Card surface shared by the four panels.
///
/// Derived from the active theme background so panels stay readable in both
/// light and dark modes.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.base.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            width: 1.0,
            color: palette.background.strong.color,
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Dashed-look drop zone; highlighted while files hover over the window.
pub fn drop_zone(active: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let extended = theme.extended_palette();
        let (border_color, background) = if active {
            (
                palette::PRIMARY_500,
                Some(Background::Color(Color {
                    a: 0.1,
                    ..palette::PRIMARY_500
                })),
            )
        } else {
            (extended.background.strong.color, None)
        };
        container::Style {
            background,
            border: Border {
                radius: radius::MD.into(),
                width: 2.0,
                color: border_color,
            },
            ..Default::default()
        }
    }
}

/// Muted tile used for size statistics and placeholders.
pub fn tile(theme: &Theme) -> container::Style {
    let extended = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(extended.background.weak.color)),
        text_color: Some(extended.background.weak.text),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Highlighted tile for the savings summary.
pub fn success_tile(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.15,
            ..palette::SUCCESS_500
        })),
        border: Border {
            radius: radius::MD.into(),
            width: 1.0,
            color: palette::SUCCESS_500,
        },
        ..Default::default()
    }
}

/// Dropdown menu surface.
pub fn menu(theme: &Theme) -> container::Style {
    let extended = theme.extended_palette();
    container::Style {
        background: Some(extended.background.weak.color.into()),
        border: Border {
            radius: radius::SM.into(),
            width: 1.0,
            color: extended.background.strong.color,
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Dark translucent badge drawn over images.
pub fn overlay_badge(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
