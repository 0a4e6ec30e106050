use crate::asteroid::constants::{batch, travel};
use crate::lattice::travel::TravelModel;

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Batches at least this long run on the rayon pool
    pub parallel_threshold: usize,
    /// Hopper cruise speed in km/s
    pub travel_max_speed: f64,
    /// Hopper acceleration in km/s²
    pub travel_acceleration: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: batch::PARALLEL_THRESHOLD,
            travel_max_speed: travel::MAX_SPEED,
            travel_acceleration: travel::ACCELERATION,
        }
    }
}

fn positive_f64(name: &str, raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        Ok(_) => {
            tracing::warn!("{} must be a positive finite number, using default", name);
            None
        }
        Err(_) => {
            tracing::warn!("Invalid {} '{}', using default", name, raw);
            None
        }
    }
}

impl EngineConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(threshold) = std::env::var("LOTS_PARALLEL_THRESHOLD") {
            if let Ok(parsed) = threshold.parse::<usize>() {
                if parsed > 0 {
                    config.parallel_threshold = parsed;
                } else {
                    tracing::warn!("LOTS_PARALLEL_THRESHOLD must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid LOTS_PARALLEL_THRESHOLD '{}', using default", threshold);
            }
        }

        if let Ok(speed) = std::env::var("LOTS_TRAVEL_MAX_SPEED") {
            if let Some(parsed) = positive_f64("LOTS_TRAVEL_MAX_SPEED", &speed) {
                config.travel_max_speed = parsed;
            }
        }

        if let Ok(accel) = std::env::var("LOTS_TRAVEL_ACCELERATION") {
            if let Some(parsed) = positive_f64("LOTS_TRAVEL_ACCELERATION", &accel) {
                config.travel_acceleration = parsed;
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        if self.parallel_threshold == 0 {
            return Err("parallel_threshold must be at least 1".to_string());
        }
        if !(self.travel_max_speed.is_finite() && self.travel_max_speed > 0.0) {
            return Err("travel_max_speed must be positive".to_string());
        }
        if !(self.travel_acceleration.is_finite() && self.travel_acceleration > 0.0) {
            return Err("travel_acceleration must be positive".to_string());
        }
        Ok(())
    }

    /// Kinematic profile used for travel-time estimates
    pub fn travel_model(&self) -> TravelModel {
        TravelModel {
            max_speed: self.travel_max_speed,
            acceleration: self.travel_acceleration,
        }
    }
}
