use std::fmt::{Display, Formatter};

use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Charging,
    Discharging,
}

impl Mode {
    pub const fn from_is_charging(is_charging: bool) -> Self {
        if is_charging { Self::Charging } else { Self::Discharging }
    }

    pub const fn is_charging(self) -> bool {
        matches!(self, Self::Charging)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Charging => write!(f, "charging"),
            Self::Discharging => write!(f, "discharging"),
        }
    }
}
