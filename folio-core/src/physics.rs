//! Floating and falling label toys on top of rapier2d.
//!
//! Coordinates are CSS pixels relative to the toy container, y down.
//! The simulation is the single source of truth: the browser layer reads
//! `transforms()` once per frame and writes nothing back except pointer
//! input.

use rand::Rng;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{ForceTuning, PhysicsConfig, ViewportClass};
use crate::constants::{
    CENTER_OBSTACLE_H, CENTER_OBSTACLE_W, FALLBACK_LABEL_H, FALLBACK_LABEL_W, LABEL_CORNER_RADIUS,
    PHYSICS_DT, WALL_THICKNESS,
};
use crate::error::{FolioError, Result};

const LABEL_DENSITY: f32 = 0.01;
/// Per-second linear damping, roughly a 3 % velocity loss per 60 Hz tick.
const AIR_DAMPING: f32 = 1.8;
/// Initial speed range, in px/s, on each axis.
const START_SPEED: f32 = 240.0;
/// Horizontal nudge applied when the mobile toy starts settling (px/s).
const SETTLE_NUDGE: f32 = 120.0;
/// Falling labels spawn this far above the container top (px).
const DROP_HEIGHT: std::ops::Range<f32> = 100.0..600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToyKind {
    /// Primary labels drifting in a walled, gravity-free box.
    Floating,
    /// Secondary labels dropped from above onto a floor.
    Falling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    Floating,
    Settling,
    Falling,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// True when either side moved by at least a whole pixel since `built`.
    pub fn resized_from(&self, built: &Bounds) -> bool {
        (self.width - built.width).abs() >= 1.0 || (self.height - built.height).abs() >= 1.0
    }
}

/// Rendered box of one label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

impl LabelSize {
    /// Zero-sized measurements (not laid out yet) fall back to a default box.
    pub fn measured(width: f64, height: f64) -> Self {
        LabelSize {
            width: if width > 0.0 { width } else { FALLBACK_LABEL_W },
            height: if height > 0.0 { height } else { FALLBACK_LABEL_H },
        }
    }
}

/// Where to draw one label: top-left offset plus rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelTransform {
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

impl LabelTransform {
    pub fn css(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) rotate({:.2}deg)",
            self.x, self.y, self.rotation_deg
        )
    }
}

/// Region the centre of every dynamic body must stay in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Containment {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Containment {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

struct Label {
    handle: RigidBodyHandle,
    size: LabelSize,
    mass: f32,
}

struct Grab {
    index: usize,
    offset: Vector<Real>,
}

pub struct PhysicsToy {
    kind: ToyKind,
    regime: Regime,
    viewport: ViewportClass,
    config: PhysicsConfig,
    tuning: ForceTuning,
    containment: Containment,
    labels: Vec<Label>,
    pointer: Option<Vector<Real>>,
    grab: Option<Grab>,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

fn add_wall(
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    cx: f32,
    cy: f32,
    w: f32,
    h: f32,
) {
    let body = RigidBodyBuilder::fixed().translation(vector![cx, cy]).build();
    let handle = bodies.insert(body);
    let collider = ColliderBuilder::cuboid(w / 2.0, h / 2.0)
        .restitution(1.0)
        .friction(0.0)
        .build();
    colliders.insert_with_parent(collider, handle, bodies);
}

/// Uniform sample in `[lo, hi]`, or the midpoint when the range is empty.
fn sample_between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

impl PhysicsToy {
    pub fn new(
        kind: ToyKind,
        bounds: Bounds,
        sizes: &[LabelSize],
        viewport: ViewportClass,
        config: &PhysicsConfig,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        if !(bounds.width > 0.0 && bounds.height > 0.0) {
            return Err(FolioError::InvalidLayout(format!(
                "toy bounds {}x{}",
                bounds.width, bounds.height
            )));
        }
        let w = bounds.width as f32;
        let h = bounds.height as f32;
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let t = WALL_THICKNESS;

        let (regime, tuning, gravity, containment) = match kind {
            ToyKind::Floating => {
                // Keep at least half the box usable on tiny containers.
                let pad_x = config.pad_x.min(w / 4.0);
                let pad_y = config.pad_y.min(h / 4.0);
                add_wall(&mut bodies, &mut colliders, w / 2.0, pad_y - t / 2.0, w, t);
                add_wall(&mut bodies, &mut colliders, w / 2.0, h - pad_y + t / 2.0, w, t);
                add_wall(&mut bodies, &mut colliders, pad_x - t / 2.0, h / 2.0, t, h);
                add_wall(&mut bodies, &mut colliders, w - pad_x + t / 2.0, h / 2.0, t, h);
                if viewport == ViewportClass::Desktop {
                    add_wall(
                        &mut bodies,
                        &mut colliders,
                        w / 2.0,
                        h / 2.0,
                        CENTER_OBSTACLE_W.min(w / 3.0),
                        CENTER_OBSTACLE_H.min(h / 4.0),
                    );
                }
                (
                    Regime::Floating,
                    config.floating,
                    vector![0.0, 0.0],
                    Containment {
                        min_x: pad_x,
                        max_x: w - pad_x,
                        min_y: pad_y,
                        max_y: h - pad_y,
                    },
                )
            }
            ToyKind::Falling => {
                add_wall(&mut bodies, &mut colliders, w / 2.0, h + 25.0, w * 2.0, 50.0);
                add_wall(&mut bodies, &mut colliders, -t / 2.0, h / 2.0, t, h * 4.0);
                add_wall(&mut bodies, &mut colliders, w + t / 2.0, h / 2.0, t, h * 4.0);
                (
                    Regime::Falling,
                    config.falling,
                    vector![0.0, config.falling_gravity],
                    Containment {
                        min_x: 0.0,
                        max_x: w,
                        min_y: -DROP_HEIGHT.end - h,
                        max_y: h,
                    },
                )
            }
        };

        let obstacle = (viewport == ViewportClass::Desktop && kind == ToyKind::Floating).then(|| {
            let hw = CENTER_OBSTACLE_W.min(w / 3.0) / 2.0;
            let hh = CENTER_OBSTACLE_H.min(h / 4.0) / 2.0;
            (w / 2.0 - hw, w / 2.0 + hw, h / 2.0 - hh, h / 2.0 + hh)
        });

        let mut labels = Vec::with_capacity(sizes.len());
        for size in sizes {
            let hw = (size.width / 2.0) as f32;
            let hh = (size.height / 2.0) as f32;
            let (x, y) = match kind {
                ToyKind::Floating => {
                    let x = sample_between(rng, containment.min_x + hw, containment.max_x - hw);
                    let mut y = sample_between(rng, containment.min_y + hh, containment.max_y - hh);
                    if let Some((l, r, top, bottom)) = obstacle
                        && x + hw > l
                        && x - hw < r
                        && y + hh > top
                        && y - hh < bottom
                    {
                        // Move out of the obstacle towards the nearer free side.
                        y = if y < h / 2.0 {
                            (top - hh).max(containment.min_y + hh)
                        } else {
                            (bottom + hh).min(containment.max_y - hh)
                        };
                    }
                    (x, y)
                }
                ToyKind::Falling => (
                    sample_between(rng, 50.0_f32.min(w / 2.0), (w - 50.0).max(w / 2.0)),
                    -rng.gen_range(DROP_HEIGHT),
                ),
            };
            let v = match kind {
                ToyKind::Floating => vector![
                    rng.gen_range(-START_SPEED..=START_SPEED) / 2.0,
                    rng.gen_range(-START_SPEED..=START_SPEED) / 2.0
                ],
                ToyKind::Falling => vector![0.0, 0.0],
            };
            let body = RigidBodyBuilder::dynamic()
                .translation(vector![x, y])
                .linvel(v)
                .linear_damping(if kind == ToyKind::Floating { AIR_DAMPING } else { 0.0 })
                .ccd_enabled(true)
                .build();
            let handle = bodies.insert(body);
            let radius = LABEL_CORNER_RADIUS.min(hw.min(hh) * 0.9);
            let (restitution, friction) = match kind {
                ToyKind::Floating => (0.8, 0.0),
                ToyKind::Falling => (0.5, 0.5),
            };
            let collider = ColliderBuilder::round_cuboid(
                (hw - radius).max(0.5),
                (hh - radius).max(0.5),
                radius,
            )
            .density(LABEL_DENSITY)
            .restitution(restitution)
            .friction(friction)
            .build();
            colliders.insert_with_parent(collider, handle, &mut bodies);
            labels.push(Label {
                handle,
                size: *size,
                mass: LABEL_DENSITY * (size.width * size.height) as f32,
            });
        }
        debug!(?kind, labels = labels.len(), ?viewport, "physics toy created");

        Ok(PhysicsToy {
            kind,
            regime,
            viewport,
            config: config.clone(),
            tuning,
            containment,
            labels,
            pointer: None,
            grab: None,
            gravity,
            integration_parameters: IntegrationParameters {
                dt: PHYSICS_DT,
                ..IntegrationParameters::default()
            },
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        })
    }

    pub fn kind(&self) -> ToyKind {
        self.kind
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn tuning(&self) -> ForceTuning {
        self.tuning
    }

    pub fn containment(&self) -> Containment {
        self.containment
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn gravity(&self) -> (f32, f32) {
        (self.gravity.x, self.gravity.y)
    }

    /// Delay before the settle regime kicks in; only the floating toy on
    /// mobile viewports settles.
    pub fn settle_delay_ms(&self) -> Option<u32> {
        (self.kind == ToyKind::Floating && self.viewport == ViewportClass::Mobile)
            .then_some(self.config.settle_delay_ms)
    }

    /// Pointer position in container coordinates (mouse and touch alike).
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some(vector![x as f32, y as f32]);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Index of the label under `(x, y)`, topmost (last added) first.
    pub fn label_at(&self, x: f64, y: f64) -> Option<usize> {
        let p = point![x as f32, y as f32];
        self.labels.iter().enumerate().rev().find_map(|(i, label)| {
            let rb = &self.bodies[label.handle];
            let local = rb.position().inverse_transform_point(&p);
            let hw = (label.size.width / 2.0) as f32;
            let hh = (label.size.height / 2.0) as f32;
            (local.x.abs() <= hw && local.y.abs() <= hh).then_some(i)
        })
    }

    /// Start dragging the label under the pointer. Returns the grabbed index.
    pub fn grab(&mut self, x: f64, y: f64) -> Option<usize> {
        self.set_pointer(x, y);
        let index = self.label_at(x, y)?;
        let centre = *self.bodies[self.labels[index].handle].translation();
        let offset = centre - vector![x as f32, y as f32];
        trace!(index, "label grabbed");
        self.grab = Some(Grab { index, offset });
        Some(index)
    }

    pub fn release(&mut self) {
        self.grab = None;
    }

    pub fn grabbed(&self) -> Option<usize> {
        self.grab.as_ref().map(|g| g.index)
    }

    /// Switch the mobile floating toy into the settle regime: gravity on,
    /// one small random sideways nudge per label, gentler forces.
    /// Returns false when nothing changed.
    pub fn settle(&mut self, rng: &mut impl Rng) -> bool {
        if self.regime != Regime::Floating || self.viewport != ViewportClass::Mobile {
            return false;
        }
        self.regime = Regime::Settling;
        self.tuning = self.config.settling;
        self.gravity = vector![0.0, self.config.settle_gravity];
        for label in &self.labels {
            if let Some(rb) = self.bodies.get_mut(label.handle) {
                let nudge = rng.gen_range(-SETTLE_NUDGE..=SETTLE_NUDGE) * label.mass;
                rb.apply_impulse(vector![nudge, 0.0], true);
            }
        }
        debug!("physics toy settling");
        true
    }

    fn apply_forces(&mut self, now_secs: f64) {
        let tuning = self.tuning;
        let damping = match self.regime {
            Regime::Falling => 0.0,
            _ => self.config.angular_damping,
        };
        let grabbed = self.grabbed();
        let time = now_secs as f32;
        for (i, label) in self.labels.iter().enumerate() {
            let Some(rb) = self.bodies.get_mut(label.handle) else {
                continue;
            };
            rb.reset_forces(false);
            if grabbed == Some(i) {
                continue;
            }
            let pos = *rb.translation();
            let mut force = vector![0.0, 0.0];
            if let Some(pointer) = self.pointer {
                let away = pos - pointer;
                let dist = away.norm();
                if dist < tuning.repel_radius && dist > f32::EPSILON {
                    let magnitude = (1.0 - dist / tuning.repel_radius) * tuning.repel_strength;
                    force += away / dist * magnitude * label.mass;
                }
            }
            if tuning.ambient_strength > 0.0 {
                let phase = i as f32;
                force += vector![
                    (time + phase * 10.0).sin(),
                    (time + phase * 15.0).cos()
                ] * tuning.ambient_strength
                    * label.mass;
            }
            if force.norm_squared() > 0.0 {
                rb.add_force(force, true);
            }
            if damping > 0.0 {
                let w = rb.angvel();
                rb.set_angvel(w * (1.0 - damping), false);
            }
        }
        if let (Some(grab), Some(pointer)) = (self.grab.as_ref(), self.pointer)
            && let Some(label) = self.labels.get(grab.index)
            && let Some(rb) = self.bodies.get_mut(label.handle)
        {
            let target = pointer + grab.offset;
            let v = (target - *rb.translation()) * self.config.grab_stiffness;
            rb.set_linvel(v, true);
        }
    }

    fn contain(&mut self) {
        let c = self.containment;
        for label in &self.labels {
            let Some(rb) = self.bodies.get_mut(label.handle) else {
                continue;
            };
            let pos = *rb.translation();
            if c.contains(pos.x, pos.y) {
                continue;
            }
            let mut v = *rb.linvel();
            let x = pos.x.clamp(c.min_x, c.max_x);
            let y = pos.y.clamp(c.min_y, c.max_y);
            if x != pos.x {
                v.x = 0.0;
            }
            if y != pos.y {
                v.y = 0.0;
            }
            rb.set_translation(vector![x, y], true);
            rb.set_linvel(v, true);
        }
    }

    /// One fixed simulation step at wall-clock time `now_secs`.
    pub fn step(&mut self, now_secs: f64) {
        self.apply_forces(now_secs);
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.contain();
    }

    /// Body centres, in label order.
    pub fn centres(&self) -> Vec<(f32, f32)> {
        self.labels
            .iter()
            .map(|l| {
                let t = self.bodies[l.handle].translation();
                (t.x, t.y)
            })
            .collect()
    }

    /// Per-label draw transforms: body centre minus half the label size,
    /// so the body centre lines up with the label's visual centre.
    pub fn transforms(&self) -> Vec<LabelTransform> {
        self.labels
            .iter()
            .map(|l| {
                let rb = &self.bodies[l.handle];
                let t = rb.translation();
                LabelTransform {
                    x: t.x as f64 - l.size.width / 2.0,
                    y: t.y as f64 - l.size.height / 2.0,
                    rotation_deg: (rb.rotation().angle() as f64).to_degrees(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sizes(n: usize) -> Vec<LabelSize> {
        (0..n)
            .map(|i| LabelSize::measured(90.0 + 10.0 * i as f64, 40.0))
            .collect()
    }

    fn toy(kind: ToyKind, viewport: ViewportClass, seed: u64) -> PhysicsToy {
        let mut rng = SmallRng::seed_from_u64(seed);
        PhysicsToy::new(
            kind,
            Bounds {
                width: 1200.0,
                height: 800.0,
            },
            &sizes(7),
            viewport,
            &PhysicsConfig::default(),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn only_real_size_changes_count_as_resize() {
        let built = Bounds {
            width: 1200.0,
            height: 800.0,
        };
        assert!(!built.resized_from(&built));
        let same = Bounds {
            width: 1200.4,
            height: 800.0,
        };
        assert!(!same.resized_from(&built));
        let narrower = Bounds {
            width: 1100.0,
            height: 800.0,
        };
        assert!(narrower.resized_from(&built));
    }

    #[test]
    fn zero_measurements_use_fallback_box() {
        let s = LabelSize::measured(0.0, -1.0);
        assert_eq!(s.width, FALLBACK_LABEL_W);
        assert_eq!(s.height, FALLBACK_LABEL_H);
    }

    #[test]
    fn rejects_empty_container() {
        let mut rng = SmallRng::seed_from_u64(1);
        let res = PhysicsToy::new(
            ToyKind::Floating,
            Bounds {
                width: 0.0,
                height: 600.0,
            },
            &sizes(3),
            ViewportClass::Desktop,
            &PhysicsConfig::default(),
            &mut rng,
        );
        assert!(res.is_err());
    }

    #[test]
    fn spawns_inside_padded_bounds() {
        let t = toy(ToyKind::Floating, ViewportClass::Desktop, 7);
        let c = t.containment();
        assert_eq!(t.len(), 7);
        for (x, y) in t.centres() {
            assert!(c.contains(x, y), "({x}, {y}) outside {c:?}");
        }
    }

    #[test]
    fn transforms_offset_by_half_size() {
        let t = toy(ToyKind::Floating, ViewportClass::Desktop, 3);
        let centres = t.centres();
        for (i, tr) in t.transforms().iter().enumerate() {
            let w = 90.0 + 10.0 * i as f64;
            assert!((tr.x + w / 2.0 - centres[i].0 as f64).abs() < 1e-3);
            assert!((tr.y + 20.0 - centres[i].1 as f64).abs() < 1e-3);
        }
    }

    #[test]
    fn pointer_pushes_nearby_label_away() {
        // Mobile: no centre obstacle in the way.
        let mut pushed = toy(ToyKind::Floating, ViewportClass::Mobile, 11);
        let mut reference = toy(ToyKind::Floating, ViewportClass::Mobile, 11);
        let (x0, y0) = pushed.centres()[0];
        // Pointer on the wall side of the label, so the push points inwards.
        let side = if x0 < 600.0 { -1.0 } else { 1.0 };
        pushed.set_pointer(x0 as f64 + side * 30.0, y0 as f64);
        for i in 0..10 {
            pushed.step(i as f64 * PHYSICS_DT as f64);
            reference.step(i as f64 * PHYSICS_DT as f64);
        }
        let moved = (pushed.centres()[0].0 - reference.centres()[0].0) as f64 * -side;
        assert!(moved > 0.0, "label moved {moved} px away from the pointer");
    }

    #[test]
    fn grab_drags_label_towards_pointer() {
        let mut t = toy(ToyKind::Floating, ViewportClass::Mobile, 5);
        let (x0, y0) = t.centres()[2];
        // Grab by the centre; an overlapping label on top may win.
        let idx = t.grab(x0 as f64, y0 as f64).expect("label under pointer");
        let c = t.containment();
        let target = ((c.min_x + c.max_x) / 2.0, (c.min_y + c.max_y) / 2.0);
        t.set_pointer(target.0 as f64, target.1 as f64);
        let before = {
            let (x, y) = t.centres()[idx];
            ((x - target.0).powi(2) + (y - target.1).powi(2)).sqrt()
        };
        for i in 0..30 {
            t.step(i as f64 / 60.0);
        }
        let (x, y) = t.centres()[idx];
        let after = ((x - target.0).powi(2) + (y - target.1).powi(2)).sqrt();
        assert!(after < before || before < 1.0, "{before} -> {after}");
        t.release();
        assert_eq!(t.grabbed(), None);
    }

    #[test]
    fn settle_only_on_mobile_floating() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut desktop = toy(ToyKind::Floating, ViewportClass::Desktop, 2);
        assert_eq!(desktop.settle_delay_ms(), None);
        assert!(!desktop.settle(&mut rng));
        assert_eq!(desktop.gravity(), (0.0, 0.0));

        let mut falling = toy(ToyKind::Falling, ViewportClass::Mobile, 2);
        assert_eq!(falling.settle_delay_ms(), None);
        assert!(!falling.settle(&mut rng));

        let mut mobile = toy(ToyKind::Floating, ViewportClass::Mobile, 2);
        assert_eq!(mobile.settle_delay_ms(), Some(3000));
        assert!(mobile.settle(&mut rng));
        assert_eq!(mobile.regime(), Regime::Settling);
        assert!(mobile.gravity().1 > 0.0);
        assert!(mobile.tuning().repel_radius < PhysicsConfig::default().floating.repel_radius);
        // Only once.
        assert!(!mobile.settle(&mut rng));
    }

    #[test]
    fn settled_labels_sink() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut t = toy(ToyKind::Floating, ViewportClass::Mobile, 9);
        t.settle(&mut rng);
        for i in 0..240 {
            t.step(i as f64 / 60.0);
        }
        let c = t.containment();
        let mean_y: f32 = t.centres().iter().map(|p| p.1).sum::<f32>() / t.len() as f32;
        assert!(mean_y > (c.min_y + c.max_y) / 2.0, "mean y {mean_y}");
    }

    #[test]
    fn falling_labels_start_above_and_land() {
        let mut t = toy(ToyKind::Falling, ViewportClass::Desktop, 4);
        assert!(t.centres().iter().all(|&(_, y)| y < 0.0));
        for i in 0..600 {
            t.step(i as f64 / 60.0);
        }
        let c = t.containment();
        for (x, y) in t.centres() {
            assert!(y > 0.0 && y <= c.max_y, "y {y}");
            assert!(x >= c.min_x && x <= c.max_x);
        }
    }
}
