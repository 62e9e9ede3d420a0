//! Runtime configuration of the slideshow engine.

use thiserror::Error;

/// Default window capacity (pictures kept in memory per room)
pub const DEFAULT_MEMORY_SIZE: usize = 200;
/// Default number of ticks between two auto-advances
pub const DEFAULT_COUNTDOWN_DURATION: i64 = 20;
/// Default idle-expiry threshold: a room is evicted once its countdown drops
/// below this value, roughly one hour of unwatched ticks.
pub const DEFAULT_IDLE_EXPIRY_THRESHOLD: i64 = -3598;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("memory size must be at least 1")]
    ZeroMemorySize,

    #[error("countdown duration must be positive, got {0}")]
    NonPositiveCountdown(i64),

    #[error("idle expiry threshold must be negative, got {0}")]
    NonNegativeIdleExpiry(i64),
}

/// Process-wide, read-only after startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideshowConfig {
    /// Window capacity, also the page size of the backing store
    pub memory_size: usize,
    /// Ticks per auto-advance cycle
    pub countdown_duration: i64,
    /// Rooms whose countdown falls below this value are evicted
    pub idle_expiry_threshold: i64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            countdown_duration: DEFAULT_COUNTDOWN_DURATION,
            idle_expiry_threshold: DEFAULT_IDLE_EXPIRY_THRESHOLD,
        }
    }
}

impl SlideshowConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.memory_size == 0 {
            return Err(ConfigError::ZeroMemorySize);
        }
        if self.countdown_duration <= 0 {
            return Err(ConfigError::NonPositiveCountdown(self.countdown_duration));
        }
        if self.idle_expiry_threshold >= 0 {
            return Err(ConfigError::NonNegativeIdleExpiry(
                self.idle_expiry_threshold,
            ));
        }
        Ok(self)
    }
}
