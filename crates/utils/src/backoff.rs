use std::time::Duration;

use rand::{thread_rng, Rng};

/// Retry pacing policy: fixed, or exponential with a cap.
pub struct Backoff {
    base: Duration,
    current_multiplier: f32,
    multiplier: f32,
    max_sleep: Duration,
    jitter: bool,
}

impl Backoff {
    /// Exponential backoff with jitter, capped at 32x the base.
    pub fn exponential(base: Duration) -> Self {
        Self {
            base,
            current_multiplier: 1.0,
            multiplier: 2.0,
            max_sleep: base * 32,
            jitter: true,
        }
    }

    /// Fixed-delay policy: every sleep is exactly `base`.
    pub fn fixed(base: Duration) -> Self {
        Self {
            base,
            current_multiplier: 1.0,
            multiplier: 1.0,
            max_sleep: base,
            jitter: false,
        }
    }

    pub fn next_sleep(&mut self) -> Duration {
        let t = self.base.mul_f32(self.current_multiplier);
        let t = if t >= self.max_sleep {
            self.max_sleep
        } else {
            self.current_multiplier *= self.multiplier;
            t
        };
        if self.jitter && !t.is_zero() {
            // https://aws.amazon.com/cn/blogs/architecture/exponential-backoff-and-jitter/
            thread_rng().gen_range(Duration::ZERO..t)
        } else {
            t
        }
    }

    pub fn reset(&mut self) {
        self.current_multiplier = 1.0;
    }

    pub fn with_multiplier(self, multiplier: f32) -> Self {
        Self { multiplier, ..self }
    }

    pub fn with_max_sleep(self, max_sleep: Duration) -> Self {
        Self { max_sleep, ..self }
    }

    pub fn with_jitter(self, jitter: bool) -> Self {
        Self { jitter, ..self }
    }
}
