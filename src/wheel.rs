use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub const MAX_PARTICIPANTS: usize = 50;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_PARTICIPANT_ID_LENGTH: usize = 20;
pub const MAX_COLOR_LENGTH: usize = 20;

pub const MIN_TIMER_SECS: u32 = 10;
pub const MAX_TIMER_SECS: u32 = 3600;
pub const DEFAULT_TIMER_SECS: u32 = 120;

/// One entry on the wheel.
///
/// `active == false` means the participant was already picked. It keeps its
/// slice for display but is never drawn again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Default,
    Rainbow,
    Pastel,
    Ocean,
    Sunset,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 5] = [
        ColorScheme::Default,
        ColorScheme::Rainbow,
        ColorScheme::Pastel,
        ColorScheme::Ocean,
        ColorScheme::Sunset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Pastel => "pastel",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Sunset => "sunset",
        }
    }

    /// Exact, case-sensitive match against the wire names.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scheme| scheme.as_str() == value)
    }
}

/// A persisted wheel. Serialized verbatim (camelCase JSON) as the value
/// stored under its `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelConfig {
    pub id: String,
    pub participants: Vec<Participant>,
    pub timer_duration: u32,
    pub timer_enabled: bool,
    pub dark_mode: bool,
    pub fast_mode: bool,
    pub sound_enabled: bool,
    // Older records were written without this flag.
    #[serde(default)]
    pub idle_spin_enabled: bool,
    pub color_scheme: ColorScheme,
    pub created_at: i64,
    pub last_accessed_at: i64,
}

impl WheelConfig {
    pub fn active_participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.active)
    }

    /// Mark the record as accessed now. Never moves `last_accessed_at` behind
    /// `created_at`.
    pub fn touch(&mut self, now_ms: i64) {
        self.last_accessed_at = now_ms.max(self.created_at);
    }
}

/// Outcome of a single draw. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinResult {
    pub participant: Participant,
    /// Final resting rotation in degrees, including the extra full turns.
    pub angle: f64,
    /// Position of the winner in the full participant list.
    #[serde(skip)]
    pub slot: usize,
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
