//! Anomaly detection types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event category a timestamp can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Z-score above the upper bound
    Peak,
    /// Z-score below the lower bound
    Trough,
}

impl EventKind {
    /// Both categories, in reporting order
    pub const ALL: [EventKind; 2] = [EventKind::Peak, EventKind::Trough];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Peak => "peak",
            EventKind::Trough => "trough",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "peak" => Ok(EventKind::Peak),
            "trough" => Ok(EventKind::Trough),
            other => Err(format!("unknown event kind '{other}', expected peak or trough")),
        }
    }
}

/// Classification of a single timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventFlag {
    Peak,
    Trough,
    #[default]
    None,
}

impl EventFlag {
    /// The event category, if this flag is an event
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            EventFlag::Peak => Some(EventKind::Peak),
            EventFlag::Trough => Some(EventKind::Trough),
            EventFlag::None => None,
        }
    }

    pub fn is(&self, kind: EventKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn is_event(&self) -> bool {
        self.kind().is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventFlag::Peak => "peak",
            EventFlag::Trough => "trough",
            EventFlag::None => "none",
        }
    }
}

impl fmt::Display for EventFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rolling z-score and resulting flag at one index
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Detection {
    /// `None` until the window is full, or when the window has zero spread
    pub zscore: Option<f64>,
    pub flag: EventFlag,
}
