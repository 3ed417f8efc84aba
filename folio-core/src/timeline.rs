//! Scrubbed timelines.
//!
//! A timeline places tracks on a time axis and is sampled by normalised
//! progress instead of by a clock. Sampling has no side effects, so
//! scrubbing backward replays every track exactly in reverse.

use crate::ease::Ease;
use crate::style::Style;

/// Values a track can interpolate.
pub trait Lerp: Copy {
    fn lerp(&self, to: &Self, t: f64) -> Self;
}

impl Lerp for Style {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Style::lerp(self, to, t)
    }
}

/// Where a new track starts, relative to the tracks already placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the end of the timeline so far.
    Append,
    /// `gap` after the end of the timeline so far (`"+=gap"`).
    AfterGap(f64),
    /// `offset` after the start of the previously added track (`"<offset"`).
    WithPrevious(f64),
    /// Absolute time.
    At(f64),
}

#[derive(Clone, Debug)]
struct Track<K, V> {
    target: K,
    from: V,
    to: V,
    start: f64,
    duration: f64,
    ease: Ease,
}

impl<K, V: Lerp> Track<K, V> {
    fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn value_at(&self, time: f64) -> V {
        let t = if self.duration <= 0.0 {
            if time >= self.start { 1.0 } else { 0.0 }
        } else {
            ((time - self.start) / self.duration).clamp(0.0, 1.0)
        };
        self.from.lerp(&self.to, self.ease.apply(t))
    }
}

#[derive(Clone, Debug)]
pub struct Timeline<K, V> {
    bases: Vec<(K, V)>,
    tracks: Vec<Track<K, V>>,
    end: f64,
    last_start: f64,
}

impl<K: Copy + PartialEq, V: Lerp> Default for Timeline<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + PartialEq, V: Lerp> Timeline<K, V> {
    pub fn new() -> Self {
        Timeline {
            bases: Vec::new(),
            tracks: Vec::new(),
            end: 0.0,
            last_start: 0.0,
        }
    }

    /// Initial value of a target before any of its tracks start.
    pub fn set(mut self, target: K, value: V) -> Self {
        if let Some(slot) = self.bases.iter_mut().find(|(k, _)| *k == target) {
            slot.1 = value;
        } else {
            self.bases.push((target, value));
        }
        self
    }

    /// Animate from the target's current end value to `to`.
    pub fn to(self, target: K, to: V, duration: f64, ease: Ease, at: Position) -> Self {
        let from = self.end_value(target).unwrap_or(to);
        self.from_to(target, from, to, duration, ease, at)
    }

    pub fn from_to(
        mut self,
        target: K,
        from: V,
        to: V,
        duration: f64,
        ease: Ease,
        at: Position,
    ) -> Self {
        let start = match at {
            Position::Append => self.end,
            Position::AfterGap(gap) => self.end + gap,
            Position::WithPrevious(offset) => self.last_start + offset,
            Position::At(t) => t,
        }
        .max(0.0);
        let track = Track {
            target,
            from,
            to,
            start,
            duration: duration.max(0.0),
            ease,
        };
        self.end = self.end.max(track.end());
        self.last_start = start;
        self.tracks.push(track);
        self
    }

    pub fn duration(&self) -> f64 {
        self.end
    }

    /// Start and end time of the `n`th track added for `target`.
    pub fn span_of(&self, target: K, n: usize) -> Option<(f64, f64)> {
        self.tracks
            .iter()
            .filter(|t| t.target == target)
            .nth(n)
            .map(|t| (t.start, t.end()))
    }

    fn end_value(&self, target: K) -> Option<V> {
        self.tracks
            .iter()
            .filter(|t| t.target == target)
            .max_by(|a, b| a.end().total_cmp(&b.end()))
            .map(|t| t.to)
            .or_else(|| self.base(target))
    }

    fn base(&self, target: K) -> Option<V> {
        self.bases
            .iter()
            .find(|(k, _)| *k == target)
            .map(|(_, v)| *v)
    }

    /// Value of `target` at absolute time `time`.
    pub fn value_at(&self, target: K, time: f64) -> Option<V> {
        let mut own: Vec<&Track<K, V>> =
            self.tracks.iter().filter(|t| t.target == target).collect();
        own.sort_by(|a, b| a.start.total_cmp(&b.start));
        let mut value = self.base(target).or_else(|| own.first().map(|t| t.from))?;
        for track in own {
            if time >= track.start {
                value = track.value_at(time);
            } else {
                break;
            }
        }
        Some(value)
    }

    /// Value of `target` at normalised progress in [0, 1].
    pub fn sample(&self, target: K, progress: f64) -> Option<V> {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.value_at(target, p * self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum T {
        A,
        B,
    }

    fn sample_timeline() -> Timeline<T, Style> {
        Timeline::new()
            .set(T::A, Style::IDENTITY.with_y_percent(100.0))
            .to(T::A, Style::IDENTITY, 1.0, Ease::Linear, Position::Append)
            .from_to(
                T::B,
                Style::HIDDEN,
                Style::IDENTITY,
                1.0,
                Ease::Linear,
                Position::AfterGap(0.5),
            )
    }

    #[test]
    fn positions_resolve_like_gsap() {
        let tl = sample_timeline()
            .to(T::A, Style::HIDDEN, 0.5, Ease::Linear, Position::WithPrevious(0.2));
        let close = |got: Option<(f64, f64)>, want: (f64, f64)| {
            let (s, e) = got.expect("track exists");
            assert!((s - want.0).abs() < 1e-9 && (e - want.1).abs() < 1e-9, "{s}..{e}");
        };
        close(tl.span_of(T::A, 0), (0.0, 1.0));
        close(tl.span_of(T::B, 0), (1.5, 2.5));
        close(tl.span_of(T::A, 1), (1.7, 2.2));
        assert!((tl.duration() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn sample_before_and_after_tracks() {
        let tl = sample_timeline();
        assert_eq!(tl.sample(T::A, 0.0).map(|s| s.y_percent), Some(100.0));
        assert_eq!(tl.sample(T::B, 0.0), Some(Style::HIDDEN));
        assert_eq!(tl.sample(T::B, 0.5), Some(Style::HIDDEN));
        assert_eq!(tl.sample(T::A, 1.0), Some(Style::IDENTITY));
        assert_eq!(tl.sample(T::B, 1.0), Some(Style::IDENTITY));
    }

    #[test]
    fn scrubbing_back_reverses_exactly() {
        let tl = sample_timeline();
        let forward: Vec<Style> = (0..=50)
            .map(|i| tl.sample(T::B, i as f64 / 50.0).unwrap())
            .collect();
        let backward: Vec<Style> = (0..=50)
            .rev()
            .map(|i| tl.sample(T::B, i as f64 / 50.0).unwrap())
            .collect();
        let mut reversed = backward;
        reversed.reverse();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn unknown_target_has_no_value() {
        let tl: Timeline<T, Style> = Timeline::new().set(T::A, Style::IDENTITY);
        assert_eq!(tl.sample(T::B, 0.3), None);
        assert_eq!(tl.sample(T::A, 0.3), Some(Style::IDENTITY));
    }
}
