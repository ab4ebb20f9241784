use chrono::Duration;

/// Token lifetime policy shared by issuer and validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSettings {
    /// Lifetime stamped into every issued token.
    pub ttl: Duration,
    /// Clock skew tolerated past `exp`.
    pub leeway: Duration,
}

impl TokenSettings {
    pub const DEFAULT_TTL_MINUTES: i64 = 30;

    pub fn new(ttl: Duration, leeway: Duration) -> Self {
        Self { ttl, leeway }
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(Self::DEFAULT_TTL_MINUTES),
            leeway: Duration::zero(),
        }
    }
}
