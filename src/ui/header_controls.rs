// SPDX-License-Identifier: MPL-2.0
//! Header controls: language and theme pickers.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{button, text, Column, Container, Row};
use iced::{Alignment, Element, Length, Theme};
use unic_langid::LanguageIdentifier;

/// A selectable interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub locale: &'static str,
    /// Short code shown on the trigger button.
    pub short_label: &'static str,
    pub i18n_key: &'static str,
}

pub const LANGUAGES: [LanguageOption; 2] = [
    LanguageOption {
        locale: "en-US",
        short_label: "EN",
        i18n_key: "language-english",
    },
    LanguageOption {
        locale: "id",
        short_label: "ID",
        i18n_key: "language-indonesian",
    },
];

/// Short label of the language matching `locale`.
pub fn short_label(locale: &LanguageIdentifier) -> String {
    LANGUAGES
        .iter()
        .find(|option| {
            option
                .locale
                .parse::<LanguageIdentifier>()
                .is_ok_and(|candidate| candidate.language == locale.language)
        })
        .map(|option| option.short_label.to_string())
        .unwrap_or_else(|| locale.language.as_str().to_uppercase())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenMenu {
    #[default]
    None,
    Language,
    Theme,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct State {
    open: OpenMenu,
}

impl State {
    pub fn open_menu(&self) -> OpenMenu {
        self.open
    }
}

/// Contextual data needed to render the controls.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub theme_mode: ThemeMode,
}

#[derive(Debug, Clone)]
pub enum Message {
    ToggleLanguageMenu,
    ToggleThemeMenu,
    SelectLanguage(&'static str),
    SelectTheme(ThemeMode),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    LanguageSelected(LanguageIdentifier),
    ThemeSelected(ThemeMode),
}

fn toggle(current: OpenMenu, menu: OpenMenu) -> OpenMenu {
    if current == menu {
        OpenMenu::None
    } else {
        menu
    }
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::ToggleLanguageMenu => {
            state.open = toggle(state.open, OpenMenu::Language);
            Event::None
        }
        Message::ToggleThemeMenu => {
            state.open = toggle(state.open, OpenMenu::Theme);
            Event::None
        }
        Message::SelectLanguage(locale) => {
            state.open = OpenMenu::None;
            match locale.parse::<LanguageIdentifier>() {
                Ok(locale) => Event::LanguageSelected(locale),
                Err(error) => {
                    tracing::warn!(%locale, %error, "invalid language identifier");
                    Event::None
                }
            }
        }
        Message::SelectTheme(mode) => {
            state.open = OpenMenu::None;
            Event::ThemeSelected(mode)
        }
    }
}

fn menu<'a>(items: Vec<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(Column::with_children(items).spacing(spacing::XXS))
        .padding(spacing::XS)
        .style(styles::container::menu)
        .into()
}

fn menu_item<'a>(label: String, selected: bool, message: Message) -> Element<'a, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if selected {
        styles::button::selected
    } else {
        styles::button::ghost
    };
    button(text(label).size(typography::BODY))
        .width(Length::Fill)
        .on_press(message)
        .style(style)
        .into()
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let current = ctx.i18n.current_locale();

    let language_trigger = button(text(short_label(current)).size(typography::BODY))
        .on_press(Message::ToggleLanguageMenu)
        .style(styles::button::secondary);
    let theme_trigger = button(text(ctx.i18n.tr(ctx.theme_mode.i18n_key())).size(typography::BODY))
        .on_press(Message::ToggleThemeMenu)
        .style(styles::button::secondary);

    let mut language_column = Column::new().spacing(spacing::XXS).push(language_trigger);
    if ctx.state.open == OpenMenu::Language {
        let items = LANGUAGES
            .iter()
            .map(|option| {
                let selected = short_label(current) == option.short_label;
                menu_item(
                    ctx.i18n.tr(option.i18n_key),
                    selected,
                    Message::SelectLanguage(option.locale),
                )
            })
            .collect();
        language_column = language_column.push(menu(items));
    }

    let mut theme_column = Column::new().spacing(spacing::XXS).push(theme_trigger);
    if ctx.state.open == OpenMenu::Theme {
        let items = ThemeMode::ALL
            .iter()
            .map(|mode| {
                menu_item(
                    ctx.i18n.tr(mode.i18n_key()),
                    *mode == ctx.theme_mode,
                    Message::SelectTheme(*mode),
                )
            })
            .collect();
        theme_column = theme_column.push(menu(items));
    }

    Row::new()
        .spacing(spacing::XS)
        .align_y(Alignment::Start)
        .push(language_column)
        .push(theme_column)
        .into()
}
