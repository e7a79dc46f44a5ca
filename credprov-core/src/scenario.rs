//! Usage scenarios and the per-session scenario state machine.

use strum::{Display, EnumString};

use crate::error::{ProviderError, ProviderResult};

/// Authentication context the host is about to display tiles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, uniffi::Enum)]
#[strum(serialize_all = "snake_case")]
pub enum UsageScenario {
    /// Interactive logon.
    Logon,
    /// Unlocking a locked workstation.
    UnlockWorkstation,
    /// Changing the password of an account.
    ChangePassword,
    /// Credential prompts raised by applications (stored-credential UI).
    CredUi,
}

impl UsageScenario {
    /// Whether the provider enumerates tiles for this scenario.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Logon | Self::UnlockWorkstation)
    }
}

/// Decodes the numeric scenario tag used by the host.
///
/// Tag `0` (no scenario) and tags the provider does not know about, such as
/// pre-logon access providers, are rejected as invalid arguments.
impl TryFrom<u32> for UsageScenario {
    type Error = ProviderError;

    fn try_from(tag: u32) -> ProviderResult<Self> {
        match tag {
            1 => Ok(Self::Logon),
            2 => Ok(Self::UnlockWorkstation),
            3 => Ok(Self::ChangePassword),
            4 => Ok(Self::CredUi),
            other => Err(ProviderError::invalid_argument(format!(
                "unrecognized usage scenario tag {other}"
            ))),
        }
    }
}

/// Where the registry stands in the scenario lifecycle.
///
/// ```text
/// Uninitialized --Logon/Unlock--> Logon | Unlock <--Logon/Unlock--> ...
/// Uninitialized --ChangePassword/CredUi--> Unsupported (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, uniffi::Enum)]
#[strum(serialize_all = "snake_case")]
pub enum ScenarioState {
    /// No scenario selected yet.
    #[default]
    Uninitialized,
    /// Enumerating tiles for interactive logon.
    Logon,
    /// Enumerating tiles for workstation unlock.
    Unlock,
    /// The provider declined the session; no tiles are ever enumerated.
    Unsupported,
}

impl ScenarioState {
    /// Scenario passed to the credential factory, if this state enumerates.
    #[must_use]
    pub const fn enumeration_scenario(self) -> Option<UsageScenario> {
        match self {
            Self::Logon => Some(UsageScenario::Logon),
            Self::Unlock => Some(UsageScenario::UnlockWorkstation),
            Self::Uninitialized | Self::Unsupported => None,
        }
    }

    /// Applies a scenario selection.
    ///
    /// Returns the next state together with the outcome reported to the host.
    /// A rejected selection only moves the state when it is the first one of
    /// the session, which makes the session permanently `Unsupported`.
    pub(crate) fn select(self, scenario: UsageScenario) -> (Self, ProviderResult<()>) {
        if self == Self::Unsupported {
            return (
                self,
                Err(ProviderError::not_supported(
                    "session was already declined by the provider",
                )),
            );
        }

        if !scenario.is_supported() {
            let next = if self == Self::Uninitialized {
                Self::Unsupported
            } else {
                self
            };
            return (
                next,
                Err(ProviderError::not_supported(format!(
                    "usage scenario {scenario}"
                ))),
            );
        }

        let next = if scenario == UsageScenario::UnlockWorkstation {
            Self::Unlock
        } else {
            Self::Logon
        };
        (next, Ok(()))
    }
}
