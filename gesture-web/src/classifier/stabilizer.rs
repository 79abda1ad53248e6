//! Gesture debouncing state machine
//!
//! A new gesture must be seen for `entry_frames` consecutive frames before it
//! is confirmed. Leaving a gesture for `none` is faster: once the raw stream
//! has switched candidates `exit_frames` times and the latest raw label is
//! `none`, the confirmed gesture is dropped immediately.

use log::debug;

use super::gesture::GestureLabel;

/// Stabilizer state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StabilizerState {
    /// No gesture confirmed, nothing pending
    Idle,
    /// A gesture is confirmed and the raw stream agrees with it
    Confirmed(GestureLabel),
    /// The raw stream disagrees with the confirmed gesture
    Pending {
        /// Gesture still reported while the candidate builds up
        confirmed: GestureLabel,
        /// Raw label being counted
        candidate: GestureLabel,
        /// Consecutive frames of `candidate`
        frames: u32,
        /// Candidate switches since the raw stream last agreed with `confirmed`
        exits: u32,
    },
}

impl StabilizerState {
    /// Gesture currently reported downstream
    pub fn current(&self) -> GestureLabel {
        match *self {
            StabilizerState::Idle => GestureLabel::None,
            StabilizerState::Confirmed(label) => label,
            StabilizerState::Pending { confirmed, .. } => confirmed,
        }
    }
}

/// Frame-counting debouncer over raw gesture labels
pub struct GestureStabilizer {
    state: StabilizerState,
    entry_frames: u32,
    exit_frames: u32,
}

impl GestureStabilizer {
    pub fn new(entry_frames: u32, exit_frames: u32) -> Self {
        Self {
            state: StabilizerState::Idle,
            entry_frames: entry_frames.max(1),
            exit_frames: exit_frames.max(1),
        }
    }

    /// Feed one raw label, returns the stabilized gesture
    pub fn update(&mut self, raw: GestureLabel) -> GestureLabel {
        let previous = self.state.current();
        self.state = self.transition(raw);

        let current = self.state.current();
        if current != previous {
            debug!("gesture {} -> {} (raw {})", previous, current, raw);
        }
        current
    }

    fn transition(&self, raw: GestureLabel) -> StabilizerState {
        let current = self.state.current();
        if raw == current {
            return Self::settle(raw);
        }

        let (candidate, frames, exits) = match self.state {
            StabilizerState::Pending {
                candidate,
                frames,
                exits,
                ..
            } if candidate == raw => (candidate, frames + 1, exits),
            StabilizerState::Pending { exits, .. } => (raw, 1, exits + 1),
            StabilizerState::Idle | StabilizerState::Confirmed(_) => (raw, 1, 1),
        };

        if frames >= self.entry_frames {
            return Self::settle(candidate);
        }
        if exits >= self.exit_frames && !current.is_none() && raw.is_none() {
            return StabilizerState::Idle;
        }

        StabilizerState::Pending {
            confirmed: current,
            candidate,
            frames,
            exits,
        }
    }

    fn settle(label: GestureLabel) -> StabilizerState {
        if label.is_none() {
            StabilizerState::Idle
        } else {
            StabilizerState::Confirmed(label)
        }
    }

    pub fn current(&self) -> GestureLabel {
        self.state.current()
    }

    pub fn state(&self) -> StabilizerState {
        self.state
    }

    /// Force `none` and discard all counters
    pub fn reset(&mut self) {
        self.state = StabilizerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GestureLabel::*;

    fn feed(stabilizer: &mut GestureStabilizer, labels: &[GestureLabel]) -> Vec<GestureLabel> {
        labels.iter().map(|&l| stabilizer.update(l)).collect()
    }

    #[test]
    fn test_starts_idle() {
        let s = GestureStabilizer::new(3, 2);
        assert_eq!(s.state(), StabilizerState::Idle);
        assert_eq!(s.current(), None);
    }

    #[test]
    fn test_entry_needs_consecutive_frames() {
        let mut s = GestureStabilizer::new(3, 2);
        assert_eq!(feed(&mut s, &[Open, Open, Open, Open]), vec![None, None, Open, Open]);
        assert_eq!(s.state(), StabilizerState::Confirmed(Open));
    }

    #[test]
    fn test_single_frame_blip_ignored() {
        let mut s = GestureStabilizer::new(3, 2);
        let mut stream = vec![Open; 5];
        stream.push(Pinch);
        stream.extend(vec![Open; 5]);
        let out = feed(&mut s, &stream);
        assert!(out[2..].iter().all(|&g| g == Open), "{out:?}");
    }

    #[test]
    fn test_interrupted_candidate_restarts() {
        let mut s = GestureStabilizer::new(3, 5);
        feed(&mut s, &[Fist, Fist, Fist]);
        // Point, Point, Open, Point, Point never reaches 3 in a row
        let out = feed(&mut s, &[Point, Point, Open, Point, Point]);
        assert!(out.iter().all(|&g| g == Fist));
        assert_eq!(s.update(Point), Point);
    }

    #[test]
    fn test_fast_exit_to_none() {
        let mut s = GestureStabilizer::new(4, 2);
        feed(&mut s, &[Pinch; 4]);
        assert_eq!(s.current(), Pinch);

        // First switch (to Point) counts one exit, the switch to None a second
        assert_eq!(s.update(Point), Pinch);
        assert_eq!(s.update(None), None);
        assert_eq!(s.state(), StabilizerState::Idle);
    }

    #[test]
    fn test_fast_exit_only_on_none() {
        let mut s = GestureStabilizer::new(4, 2);
        feed(&mut s, &[Pinch; 4]);
        // Two switches but the raw label is not none: keep pinch
        assert_eq!(s.update(Point), Pinch);
        assert_eq!(s.update(Open), Pinch);
        assert!(matches!(s.state(), StabilizerState::Pending { exits: 2, .. }));
    }

    #[test]
    fn test_plain_exit_without_switches() {
        // A clean drop to none still needs the entry count
        let mut s = GestureStabilizer::new(3, 3);
        feed(&mut s, &[Open; 3]);
        assert_eq!(feed(&mut s, &[None, None, None]), vec![Open, Open, None]);
    }

    #[test]
    fn test_agreement_clears_exits() {
        let mut s = GestureStabilizer::new(4, 2);
        feed(&mut s, &[Open; 4]);
        s.update(Point);
        s.update(Open);
        assert_eq!(s.state(), StabilizerState::Confirmed(Open));
        // exit counter restarted: a single none is not enough
        assert_eq!(s.update(None), Open);
    }

    #[test]
    fn test_single_frame_entry() {
        let mut s = GestureStabilizer::new(1, 1);
        assert_eq!(feed(&mut s, &[Point, Pinch, None]), vec![Point, Pinch, None]);
    }

    #[test]
    fn test_reset_forces_none() {
        let mut s = GestureStabilizer::new(2, 2);
        feed(&mut s, &[Fist, Fist, Open]);
        s.reset();
        assert_eq!(s.state(), StabilizerState::Idle);
        assert_eq!(feed(&mut s, &[Open, Open]), vec![None, Open]);
    }
}
