//! Per-session render context.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::Result;
use crate::navigation::{NavItem, Navigation};
use crate::resolve::ContentService;

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Returns the other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// State shared by the views of one browsing session.
///
/// Created when the layout mounts and dropped when it unmounts; passed to
/// views explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewContext {
    pub theme: Theme,
    pub navigation: Navigation,
    pub active_path: String,
}

impl ViewContext {
    /// Creates a context at `active_path` with the default theme.
    pub fn new(navigation: Navigation, active_path: impl Into<String>) -> Self {
        Self {
            theme: Theme::default(),
            navigation,
            active_path: active_path.into(),
        }
    }

    /// Fetches the navigation and creates a context at `active_path`.
    pub async fn mount(service: &ContentService, active_path: impl Into<String>) -> Result<Self> {
        Ok(Self::new(service.navigation().await?, active_path))
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Switches between light and dark, returning the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Records a client-side navigation.
    pub fn navigate(&mut self, path: impl Into<String>) {
        self.active_path = path.into();
    }

    /// Returns the menu entry for the active path.
    pub fn active_item(&self) -> Option<&NavItem> {
        self.navigation.active_item(&self.active_path)
    }
}
