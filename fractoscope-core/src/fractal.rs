use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which of the two escape-time families is being explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Mandelbrot,
    Julia,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Mandelbrot, Mode::Julia];

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Mandelbrot => Self::Julia,
            Self::Julia => Self::Mandelbrot,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters handed to the renderer alongside the viewport.
///
/// `iteration_budget` caps iterations per pixel; `power` is the exponent of
/// the iterated map `z ↦ z^power + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub iteration_budget: u32,
    pub power: u32,
}

impl RenderSettings {
    pub const DEFAULT_ITERATION_BUDGET: u32 = 100;
    pub const DEFAULT_POWER: u32 = 2;

    pub fn new(iteration_budget: u32, power: u32) -> crate::Result<Self> {
        let settings = Self {
            iteration_budget,
            power,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject a zero budget or power, e.g. after deserializing.
    pub fn validate(&self) -> crate::Result<()> {
        if self.iteration_budget < 1 {
            return Err(CoreError::InvalidParameters {
                reason: format!(
                    "iteration budget must be >= 1, got {}",
                    self.iteration_budget
                ),
            });
        }
        if self.power < 1 {
            return Err(CoreError::InvalidParameters {
                reason: format!("power must be >= 1, got {}", self.power),
            });
        }
        Ok(())
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            iteration_budget: Self::DEFAULT_ITERATION_BUDGET,
            power: Self::DEFAULT_POWER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        for m in Mode::ALL {
            assert_ne!(m.toggled(), m);
            assert_eq!(m.toggled().toggled(), m);
        }
    }

    #[test]
    fn default_settings() {
        let s = RenderSettings::default();
        assert_eq!(s.iteration_budget, 100);
        assert_eq!(s.power, 2);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn zero_budget_or_power_rejected() {
        assert!(matches!(
            RenderSettings::new(0, 2),
            Err(CoreError::InvalidParameters { .. })
        ));
        assert!(matches!(
            RenderSettings::new(100, 0),
            Err(CoreError::InvalidParameters { .. })
        ));
        assert!(RenderSettings::new(1, 1).is_ok());
    }

    #[test]
    fn mode_serializes_snake_case() {
        let json = serde_json::to_string(&Mode::Mandelbrot).unwrap();
        assert_eq!(json, "\"mandelbrot\"");
        let back: Mode = serde_json::from_str("\"julia\"").unwrap();
        assert_eq!(back, Mode::Julia);
    }
}
