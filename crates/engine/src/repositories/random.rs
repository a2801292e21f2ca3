//! Random number generation wrapper.

use std::sync::Arc;

use crate::infrastructure::ports::RandomPort;

/// Random service wrapper for use cases.
pub struct RandomService {
    random: Arc<dyn RandomPort>,
}

impl RandomService {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    /// Roller closure in the shape the domain dice functions expect.
    pub fn roller(&self) -> impl FnMut(u32) -> u32 + '_ {
        move |sides| {
            let max = i32::try_from(sides).unwrap_or(i32::MAX);
            self.random.gen_range(1, max).max(1) as u32
        }
    }
}
