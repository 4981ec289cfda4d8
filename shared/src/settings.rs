//! Settings form state: the local editable copy of the backend-owned
//! settings plus its load/save lifecycle. One value with explicit
//! transitions, applied reducer-style so a transition always runs against
//! the current form, never a render-time snapshot.

use crate::UserSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    /// Local editable copy; the server's echo replaces it when a save lands
    pub settings: UserSettings,
    /// Initial fetch outstanding
    pub loading: bool,
    /// Save outstanding; at most one at a time
    pub saving: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    Loaded(UserSettings),
    LoadFailed(String),
    Edit(UserSettings),
    BeginSave,
    SaveSucceeded(UserSettings),
    SaveFailed(String),
    DismissError,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsForm {
    pub fn new() -> Self {
        Self {
            settings: UserSettings::default(),
            loading: true,
            saving: false,
            error: None,
        }
    }

    /// Single reducer entry point. Load and save completions only land
    /// while their request is actually outstanding; anything later is
    /// stale and dropped.
    pub fn apply(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::Loaded(settings) => {
                if self.loading {
                    self.settings = settings;
                    self.loading = false;
                    self.error = None;
                }
            }
            SettingsAction::LoadFailed(message) => {
                if self.loading {
                    // Defaults keep the form usable; the alert says why
                    self.settings = UserSettings::default();
                    self.loading = false;
                    self.error = Some(message);
                }
            }
            SettingsAction::Edit(settings) => self.settings = settings,
            SettingsAction::BeginSave => {
                if !self.saving && !self.loading {
                    self.saving = true;
                    self.error = None;
                }
            }
            SettingsAction::SaveSucceeded(echo) => {
                if self.saving {
                    self.settings = echo;
                    self.saving = false;
                    self.error = None;
                }
            }
            SettingsAction::SaveFailed(message) => {
                if self.saving {
                    self.saving = false;
                    self.error = Some(message);
                }
            }
            SettingsAction::DismissError => self.error = None,
        }
    }
}
