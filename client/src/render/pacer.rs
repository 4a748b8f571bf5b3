use std::time::{Duration, Instant};

/// Holds redraws to a fixed cadence. Pacing against an absolute deadline
/// absorbs however long the draw itself took.
pub struct FramePacer {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
        }
    }

    pub fn pace(&mut self) {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);

        if deadline > now {
            spin_sleep::sleep(deadline - now);
        }

        // A frame that overran its whole slot restarts the schedule instead
        // of chasing the backlog with a burst of late frames.
        self.next_deadline = if now > deadline + self.period {
            Some(Instant::now() + self.period)
        } else {
            Some(deadline + self.period)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_frame_waits_for_the_period() {
        let mut pacer = FramePacer::new(Duration::from_millis(20));

        let start = Instant::now();
        pacer.pace();
        pacer.pace();

        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn first_frame_is_not_delayed() {
        let mut pacer = FramePacer::new(Duration::from_secs(60));

        let start = Instant::now();
        pacer.pace();

        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
