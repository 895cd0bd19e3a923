//! Animated Summary Counters
//!
//! Each counter eases from whatever it currently shows to its target with
//! `1 - (1 - p)^3`. The host calls `tick(now)` once per animation frame.

use std::time::{Duration, Instant};

use super::types::LevelCounts;
use crate::constants::{COUNTER_HIGH_ID, COUNTER_LOW_ID, COUNTER_MEDIUM_ID, COUNTER_TOTAL_ID};
use crate::logic::markup::{format_count, parse_count};

/// Ease-out cubic over `p` clamped to [0, 1]
pub fn ease_out_cubic(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

#[derive(Debug, Clone)]
struct Animation {
    from: i64,
    started: Instant,
}

/// One displayed number
#[derive(Debug, Clone)]
pub struct AnimatedCounter {
    id: String,
    displayed: i64,
    target: i64,
    duration: Duration,
    animation: Option<Animation>,
}

impl AnimatedCounter {
    pub fn new(id: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: id.into(),
            displayed: 0,
            target: 0,
            duration,
            animation: None,
        }
    }

    /// Counter seeded from the server-rendered text (`"1,204"`)
    pub fn from_text(id: impl Into<String>, text: &str, duration: Duration) -> Self {
        let value = parse_count(text);
        Self {
            displayed: value,
            target: value,
            ..Self::new(id, duration)
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn displayed(&self) -> i64 {
        self.displayed
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Displayed value as text
    pub fn text(&self) -> String {
        format_count(self.displayed)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Start animating towards `target` from the value currently on screen
    pub fn retarget(&mut self, target: i64, now: Instant) {
        self.sample(now);
        self.target = target;
        if self.displayed == target {
            self.animation = None;
            return;
        }
        self.animation = Some(Animation {
            from: self.displayed,
            started: now,
        });
    }

    /// Advance to `now`; returns the displayed value
    pub fn sample(&mut self, now: Instant) -> i64 {
        let Some(Animation { from, started }) = self.animation.clone() else {
            return self.displayed;
        };

        let elapsed = now.saturating_duration_since(started);
        let p = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };

        if p >= 1.0 {
            self.displayed = self.target;
            self.animation = None;
        } else {
            let delta = (self.target - from) as f64;
            self.displayed = (from as f64 + delta * ease_out_cubic(p)).round() as i64;
        }
        self.displayed
    }
}

/// The four summary counters above the table
///
/// Counters whose element is not on the page are simply absent.
#[derive(Debug, Clone)]
pub struct CounterBoard {
    counters: Vec<AnimatedCounter>,
}

impl CounterBoard {
    /// Board with all four counters starting at 0
    pub fn new(duration: Duration) -> Self {
        Self::with_ids(
            &[COUNTER_TOTAL_ID, COUNTER_HIGH_ID, COUNTER_MEDIUM_ID, COUNTER_LOW_ID],
            duration,
        )
    }

    pub fn with_ids(ids: &[&str], duration: Duration) -> Self {
        Self {
            counters: ids.iter().map(|id| AnimatedCounter::new(*id, duration)).collect(),
        }
    }

    pub fn from_counters(counters: Vec<AnimatedCounter>) -> Self {
        Self { counters }
    }

    pub fn get(&self, id: &str) -> Option<&AnimatedCounter> {
        self.counters.iter().find(|c| c.id == id)
    }

    pub fn counters(&self) -> &[AnimatedCounter] {
        &self.counters
    }

    pub fn retarget(&mut self, counts: &LevelCounts, now: Instant) {
        let targets = [
            (COUNTER_TOTAL_ID, counts.total),
            (COUNTER_HIGH_ID, counts.high),
            (COUNTER_MEDIUM_ID, counts.medium),
            (COUNTER_LOW_ID, counts.low),
        ];
        for (id, target) in targets {
            if let Some(counter) = self.counters.iter_mut().find(|c| c.id == id) {
                counter.retarget(target as i64, now);
            }
        }
    }

    /// One animation frame; true while any counter is still moving
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut animating = false;
        for counter in &mut self.counters {
            counter.sample(now);
            animating |= counter.is_animating();
        }
        animating
    }

    /// `(id, text)` pairs for the host to write into the page
    pub fn texts(&self) -> Vec<(String, String)> {
        self.counters.iter().map(|c| (c.id.clone(), c.text())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(300);

    #[test]
    fn test_ease_curve() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_animation_lands_on_target() {
        let t0 = Instant::now();
        let mut counter = AnimatedCounter::new("cnt-total", DURATION);
        counter.retarget(1000, t0);

        let mid = counter.sample(t0 + Duration::from_millis(150));
        assert_eq!(mid, 875);
        assert!(counter.is_animating());

        assert_eq!(counter.sample(t0 + DURATION), 1000);
        assert!(!counter.is_animating());
        assert_eq!(counter.text(), "1,000");
    }

    #[test]
    fn test_retarget_restarts_from_displayed_value() {
        let t0 = Instant::now();
        let mut counter = AnimatedCounter::from_text("cnt-high", "0", DURATION);
        counter.retarget(1000, t0);

        let t1 = t0 + Duration::from_millis(150);
        counter.retarget(200, t1);
        assert_eq!(counter.displayed(), 875);

        // No jump back to 0
        let early = counter.sample(t1 + Duration::from_millis(1));
        assert!(early <= 875 && early > 800);

        assert_eq!(counter.sample(t1 + DURATION), 200);
    }

    #[test]
    fn test_many_retriggers_still_terminate() {
        let t0 = Instant::now();
        let mut board = CounterBoard::new(DURATION);
        let mut now = t0;
        for total in [10usize, 3, 7, 1, 4] {
            board.retarget(&LevelCounts { total, high: total / 2, medium: 0, low: 0 }, now);
            now += Duration::from_millis(40);
            board.tick(now);
        }

        let mut frames = 0;
        while board.tick(now) {
            now += Duration::from_millis(16);
            frames += 1;
            assert!(frames < 100);
        }
        assert!(now - t0 <= Duration::from_millis(160) + DURATION + Duration::from_millis(16));
        assert_eq!(board.get("cnt-total").unwrap().displayed(), 4);
        assert_eq!(board.get("cnt-high").unwrap().displayed(), 2);
    }

    #[test]
    fn test_missing_counter_is_skipped() {
        let t0 = Instant::now();
        let mut board = CounterBoard::with_ids(&["cnt-total"], DURATION);
        board.retarget(&LevelCounts { total: 5, high: 5, medium: 0, low: 0 }, t0);
        board.tick(t0 + DURATION);
        assert_eq!(board.texts(), vec![("cnt-total".to_string(), "5".to_string())]);
        assert!(board.get("cnt-high").is_none());
    }
}
