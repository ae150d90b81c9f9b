//! Room booking rules.

use serde::{Deserialize, Serialize};

/// Room provisioning and presentation settings.
///
/// The per-user quota is fixed and cannot be configured; unknown keys in
/// this section are rejected so a stale `max_bookings_per_user` fails loudly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Number of rooms provisioned at startup, numbered `1..=room_count`.
    #[serde(default = "default_room_count")]
    pub room_count: u32,
    /// Placeholder shown to anonymous viewers instead of a tenant's login.
    #[serde(default = "default_redaction_marker")]
    pub redaction_marker: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            room_count: default_room_count(),
            redaction_marker: default_redaction_marker(),
        }
    }
}

fn default_room_count() -> u32 {
    100
}

fn default_redaction_marker() -> String {
    "Reserved".to_string()
}
