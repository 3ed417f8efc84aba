use serde::{Deserialize, Serialize};

/// Easing curves used by tweens and scrubbed timelines.
/// Every curve maps 0 to 0 and 1 to 1; input is clamped to [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    Power2In,
    Power2Out,
    Power3Out,
    Power4In,
    Power4Out,
    Power4InOut,
    /// Overshooting ease-out; the value is the overshoot amount.
    BackOut(f64),
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power4In => t.powi(5),
            Ease::Power4Out => 1.0 - (1.0 - t).powi(5),
            Ease::Power4InOut => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Ease::BackOut(s) => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
        }
    }

    /// True for curves whose output never decreases.
    pub fn is_monotonic(self) -> bool {
        !matches!(self, Ease::BackOut(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 8] = [
        Ease::Linear,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::Power4In,
        Ease::Power4Out,
        Ease::Power4InOut,
        Ease::BackOut(1.2),
    ];

    #[test]
    fn endpoints_are_fixed() {
        for e in ALL {
            assert!(e.apply(0.0).abs() < 1e-12, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Ease::Power3Out.apply(-3.0), 0.0);
        assert_eq!(Ease::Power3Out.apply(7.0), 1.0);
        assert_eq!(Ease::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn monotonic_curves_never_decrease() {
        for e in ALL.into_iter().filter(|e| e.is_monotonic()) {
            let mut prev = 0.0;
            for i in 0..=200 {
                let v = e.apply(i as f64 / 200.0);
                assert!(v + 1e-12 >= prev, "{e:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (0..=100)
            .map(|i| Ease::BackOut(1.2).apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }
}
