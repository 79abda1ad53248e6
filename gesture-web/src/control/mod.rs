//! Control module - continuous and discrete outputs from the stable gesture
//!
//! - pinch: zoom deltas from pinch distance change
//! - open: smoothed wrist position (rotation) and velocity swipes

mod position;
mod zoom;

pub use position::{PositionMapper, CENTER};
pub use zoom::{ZoomLevel, ZoomMapper};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::classifier::{FeatureSet, GestureLabel};
use crate::config::GestureConfig;
use crate::landmarks::LandmarkPoint;
use crate::physics::{SwipeDetector, SwipeDirection};

/// Output event, tagged with the stable gesture that produced it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlEvent {
    /// Advisory zoom change; consumers clamp the absolute level
    Zoom { delta: f32, gesture: GestureLabel },
    /// Smoothed hand position in normalized image space
    Position { x: f32, y: f32, gesture: GestureLabel },
    /// Fast horizontal hand movement
    Swipe {
        direction: SwipeDirection,
        gesture: GestureLabel,
    },
}

/// Per-gesture control state carried across frames
pub struct ControlMapper {
    zoom: ZoomMapper,
    position: PositionMapper,
    swipe: SwipeDetector,
}

impl ControlMapper {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            zoom: ZoomMapper::new(config),
            position: PositionMapper::new(config.position_noise),
            swipe: SwipeDetector::new(
                config.swipe_window,
                config.swipe_velocity_threshold,
                config.swipe_cooldown_secs(),
            ),
        }
    }

    /// Map one frame to control events
    ///
    /// `wrist` is the smoothed wrist landmark, `t` the frame time in seconds.
    pub fn update(
        &mut self,
        gesture: GestureLabel,
        features: &FeatureSet,
        wrist: LandmarkPoint,
        t: f64,
    ) -> Vec<ControlEvent> {
        let mut events = Vec::new();

        if gesture == GestureLabel::Pinch {
            if let Some(delta) = self.zoom.update(features.normalized_pinch) {
                events.push(ControlEvent::Zoom { delta, gesture });
            }
        } else {
            self.zoom.release();
        }

        if gesture == GestureLabel::Open {
            let (x, y) = self.position.update((wrist.x, wrist.y));
            events.push(ControlEvent::Position { x, y, gesture });

            if let Some(direction) = self.swipe.update(wrist.x, t) {
                debug!("swipe {} at t={:.3}s", direction.as_str(), t);
                events.push(ControlEvent::Swipe { direction, gesture });
            }
        } else {
            self.position.recenter();
            self.swipe.clear();
        }

        events
    }

    /// Hand lost: clear swipe window, zero zoom baseline, recenter position
    ///
    /// The swipe cooldown deadline is wall-clock based and survives.
    pub fn reset(&mut self) {
        self.zoom.release();
        self.position.recenter();
        self.swipe.clear();
    }

    pub fn position(&self) -> (f32, f32) {
        self.position.position()
    }

    pub fn swipe_window_len(&self) -> usize {
        self.swipe.window_len()
    }

    pub fn last_pinch(&self) -> f32 {
        self.zoom.last_pinch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(pinch: f32) -> FeatureSet {
        FeatureSet {
            palm_size: 0.2,
            normalized_pinch: pinch,
            curl_angles: [3.0; 4],
            extended: [true; 4],
            thumb_extended: true,
        }
    }

    fn wrist(x: f32) -> LandmarkPoint {
        LandmarkPoint::new(x, 0.5, 0.0)
    }

    #[test]
    fn test_zoom_only_while_pinching() {
        let mut mapper = ControlMapper::new(&GestureConfig::default());
        assert!(mapper.update(GestureLabel::Pinch, &features(0.2), wrist(0.5), 0.0).is_empty());
        let events = mapper.update(GestureLabel::Pinch, &features(0.3), wrist(0.5), 0.033);
        assert!(matches!(
            events.as_slice(),
            [ControlEvent::Zoom { delta, gesture: GestureLabel::Pinch }] if *delta > 0.0
        ));

        // point releases the baseline and emits nothing
        assert!(mapper.update(GestureLabel::Point, &features(0.4), wrist(0.5), 0.066).is_empty());
        assert_eq!(mapper.last_pinch(), 0.0);
    }

    #[test]
    fn test_open_emits_position() {
        let mut mapper = ControlMapper::new(&GestureConfig::default());
        let events = mapper.update(GestureLabel::Open, &features(1.0), wrist(0.7), 0.0);
        assert_eq!(events.len(), 1);
        match &events[0] {
            ControlEvent::Position { x, gesture, .. } => {
                assert!(*x > 0.5);
                assert_eq!(*gesture, GestureLabel::Open);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_leaving_open_recenters() {
        let mut mapper = ControlMapper::new(&GestureConfig::default());
        for i in 0..5 {
            mapper.update(GestureLabel::Open, &features(1.0), wrist(0.8), i as f64 * 0.1);
        }
        assert!(mapper.swipe_window_len() > 0);
        mapper.update(GestureLabel::Fist, &features(1.0), wrist(0.8), 0.6);
        assert_eq!(mapper.position(), CENTER);
        assert_eq!(mapper.swipe_window_len(), 0);
    }

    #[test]
    fn test_swipe_event() {
        let mut mapper = ControlMapper::new(&GestureConfig::default());
        mapper.update(GestureLabel::Open, &features(1.0), wrist(0.3), 0.0);
        let events = mapper.update(GestureLabel::Open, &features(1.0), wrist(0.45), 0.1);
        assert!(events.contains(&ControlEvent::Swipe {
            direction: SwipeDirection::Right,
            gesture: GestureLabel::Open,
        }));
    }

    #[test]
    fn test_reset_mid_pinch_drops_zoom_baseline() {
        let mut mapper = ControlMapper::new(&GestureConfig::default());
        mapper.update(GestureLabel::Pinch, &features(0.2), wrist(0.5), 0.0);
        mapper.update(GestureLabel::Pinch, &features(0.3), wrist(0.5), 0.033);
        assert_eq!(mapper.last_pinch(), 0.3);

        mapper.reset();
        assert_eq!(mapper.last_pinch(), 0.0);
        // first pinch frame after re-entry is a baseline again
        assert!(mapper.update(GestureLabel::Pinch, &features(0.4), wrist(0.5), 1.0).is_empty());
    }

    #[test]
    fn test_reset_mid_open_recenters_and_clears_window() {
        let mut mapper = ControlMapper::new(&GestureConfig::default());
        for i in 0..3 {
            mapper.update(GestureLabel::Open, &features(1.0), wrist(0.8), i as f64 * 0.033);
        }
        assert_ne!(mapper.position(), CENTER);
        assert_eq!(mapper.swipe_window_len(), 3);

        mapper.reset();
        assert_eq!(mapper.position(), CENTER);
        assert_eq!(mapper.swipe_window_len(), 0);
    }

    #[test]
    fn test_event_serialization() {
        let event = ControlEvent::Swipe {
            direction: SwipeDirection::Left,
            gesture: GestureLabel::Open,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"swipe","direction":"left","gesture":"open"}"#);
    }
}
