use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;

/// Staged ramp-up: start at `initial_concurrency` slots and grow to
/// `target_concurrency` in `step_count` steps, one every `step_duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RampUp {
    pub initial_concurrency: usize,
    pub target_concurrency: usize,
    pub step_count: usize,
    pub step_duration: u64,
}

impl RampUp {
    /// # Errors
    ///
    /// Returns an error for invalid JSON or a zero field.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ramp: Self = serde_json::from_str(text).map_err(|err| ConfigError::InvalidRampUp {
            reason: err.to_string(),
        })?;
        for (field, value) in [
            ("initial_concurrency", ramp.initial_concurrency),
            ("target_concurrency", ramp.target_concurrency),
            ("step_count", ramp.step_count),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidRampUp {
                    reason: format!("{} must be >= 1", field),
                });
            }
        }
        if ramp.step_duration == 0 {
            return Err(ConfigError::InvalidRampUp {
                reason: "step_duration must be >= 1".to_owned(),
            });
        }
        Ok(ramp)
    }

    /// Concrete slot schedule with every level capped by `concurrency`.
    #[must_use]
    pub fn schedule(&self, concurrency: usize) -> RampSchedule {
        let cap = concurrency.max(1);
        let initial = self.initial_concurrency.clamp(1, cap);
        if self.target_concurrency < initial {
            warn!(
                "Ramp-up target {} is below the starting level {}; running flat",
                self.target_concurrency, initial
            );
        }
        let target = self.target_concurrency.clamp(initial, cap);
        let growth = target.saturating_sub(initial);

        let mut increments = Vec::with_capacity(self.step_count);
        let mut level = initial;
        for step in 1..=self.step_count {
            let reached = growth
                .saturating_mul(step)
                .checked_div(self.step_count)
                .unwrap_or(growth);
            let goal = initial.saturating_add(reached);
            increments.push(goal.saturating_sub(level));
            level = goal;
        }

        RampSchedule {
            initial,
            increments,
            interval: Duration::from_secs(self.step_duration),
        }
    }
}

/// Slot counts the worker pool starts with and adds over time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RampSchedule {
    pub initial: usize,
    pub increments: Vec<usize>,
    pub interval: Duration,
}

impl RampSchedule {
    #[must_use]
    pub fn flat(concurrency: usize) -> Self {
        Self {
            initial: concurrency.max(1),
            increments: Vec::new(),
            interval: Duration::ZERO,
        }
    }

    /// Resolves an optional ramp-up string; bad input falls back to flat.
    #[must_use]
    pub fn resolve(ramp_up: Option<&str>, concurrency: usize) -> Self {
        ramp_up
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map_or_else(
                || Self::flat(concurrency),
                |text| {
                    RampUp::parse(text).map_or_else(
                        |err| {
                            warn!("{}; using flat concurrency {}", err, concurrency);
                            Self::flat(concurrency)
                        },
                        |ramp| ramp.schedule(concurrency),
                    )
                },
            )
    }

    #[must_use]
    pub fn peak(&self) -> usize {
        self.increments
            .iter()
            .fold(self.initial, |level, step| level.saturating_add(*step))
    }
}
