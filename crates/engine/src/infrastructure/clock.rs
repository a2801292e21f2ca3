//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - thread-local generator seeded once per thread from OS entropy.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, _min: i32, _max: i32) -> i32 {
        self.0
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[cfg(test)]
pub struct ScriptedRandom {
    faces: Vec<i32>,
    next: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(faces: Vec<i32>) -> Self {
        Self {
            faces,
            next: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn gen_range(&self, _min: i32, _max: i32) -> i32 {
        let i = self
            .next
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.faces[i % self.faces.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom::new();
        let mut seen = [false; 6];
        for _ in 0..10_000 {
            let face = random.gen_range(1, 6);
            assert!((1..=6).contains(&face));
            seen[(face - 1) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn scripted_random_cycles() {
        let random = ScriptedRandom::new(vec![3, 5]);
        assert_eq!(random.gen_range(1, 6), 3);
        assert_eq!(random.gen_range(1, 6), 5);
        assert_eq!(random.gen_range(1, 6), 3);
    }
}
