use bevy::prelude::*;
use std::collections::HashMap;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Reply message ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    NoPermission,
    Syntax,
    SaveSuccess,
    SaveFailed,
    SetDefaultSuccess,
    ResetSuccess,
}

impl Message {
    pub const fn key(self) -> &'static str {
        match self {
            Message::NoPermission => "Error.NoPermission",
            Message::Syntax => "Error.Syntax",
            Message::SaveSuccess => "Command.Save.Success",
            Message::SaveFailed => "Command.Save.Failed",
            Message::SetDefaultSuccess => "Command.SetDefault.Success",
            Message::ResetSuccess => "Command.Reset.Success",
        }
    }
}

/// Message templates per language, English as fallback
#[derive(Resource, Debug)]
pub struct Messages {
    languages: HashMap<String, HashMap<String, String>>,
}

impl Default for Messages {
    fn default() -> Self {
        let mut messages = Self {
            languages: HashMap::new(),
        };
        messages.register(
            DEFAULT_LANGUAGE,
            [
                (Message::NoPermission.key(), "You don't have permission to do that."),
                (Message::Syntax.key(), "Error: Invalid syntax."),
                (
                    Message::SaveSuccess.key(),
                    "Loadout was <color=#bfff00>successfully saved!</color>",
                ),
                (Message::SaveFailed.key(), "Loadout could not be saved."),
                (
                    Message::SetDefaultSuccess.key(),
                    "Default loadout has <color=#bfff00>successfully been set!</color>",
                ),
                (
                    Message::ResetSuccess.key(),
                    "Loadout was <color=#bfff00>successfully reset!</color>",
                ),
            ],
        );
        messages
    }
}

impl Messages {
    /// Adds or replaces templates for `language`
    pub fn register<'a>(
        &mut self,
        language: &str,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        let table = self.languages.entry(language.to_owned()).or_default();
        table.extend(entries.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())));
    }

    /// Template for `message` in `language`; falls back to English, then to the key itself
    pub fn get(&self, message: Message, language: &str) -> &str {
        let key = message.key();
        [language, DEFAULT_LANGUAGE]
            .iter()
            .filter_map(|lang| self.languages.get(*lang))
            .find_map(|table| table.get(key))
            .map_or(key, String::as_str)
    }
}
