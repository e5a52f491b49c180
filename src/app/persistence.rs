// SPDX-License-Identifier: MPL-2.0
//! Configuration persistence logic.
//!
//! Each preference is written as soon as it changes: the file is re-read,
//! the one section is updated and the result saved.

use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::ui::compression_options;
use crate::ui::theming::ThemeMode;
use unic_langid::LanguageIdentifier;

fn update_config(apply: impl FnOnce(&mut Config)) {
    // Unit tests exercise the callers without touching the user's settings.
    if cfg!(test) {
        return;
    }

    let (mut cfg, _) = config::load();
    apply(&mut cfg);

    if let Err(error) = config::save(&cfg) {
        tracing::error!(%error, "failed to save config");
    }
}

/// Applies the newly selected locale and persists it.
pub fn apply_language_change(i18n: &mut I18n, locale: LanguageIdentifier) {
    i18n.set_locale(locale.clone());
    tracing::info!(locale = %locale, "language changed");
    update_config(|cfg| cfg.general.language = Some(locale.to_string()));
}

pub fn persist_theme_mode(mode: ThemeMode) {
    update_config(|cfg| cfg.general.theme_mode = mode);
}

/// Persists the options panel so the next session starts with the same settings.
pub fn persist_compression_settings(options: &compression_options::State) {
    update_config(|cfg| {
        cfg.compression.store(
            &options.settings,
            options.toggles.limit_dimensions,
            options.toggles.specific_dimensions,
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_change_switches_locale() {
        let mut i18n = I18n::default();
        let locale: LanguageIdentifier = "id".parse().unwrap();
        apply_language_change(&mut i18n, locale.clone());
        assert_eq!(i18n.current_locale(), &locale);
    }
}
