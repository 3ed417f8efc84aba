use folio_core::config::{PhysicsConfig, ViewportClass};
use folio_core::physics::{Bounds, LabelSize, PhysicsToy, Regime, ToyKind};
use folio_core::Content;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn label_sizes(labels: &[&str]) -> Vec<LabelSize> {
    // Roughly what the stylesheet produces: 9px per glyph plus padding.
    labels
        .iter()
        .map(|l| LabelSize::measured(l.len() as f64 * 9.0 + 32.0, 40.0))
        .collect()
}

#[test]
fn both_toys_build_from_bundled_labels() {
    let content = Content::bundled().expect("bundled content");
    let cfg = PhysicsConfig::default();
    let mut rng = SmallRng::seed_from_u64(11);
    let bounds = Bounds {
        width: 1280.0,
        height: 720.0,
    };
    let floating = PhysicsToy::new(
        ToyKind::Floating,
        bounds,
        &label_sizes(&content.primary_labels()),
        ViewportClass::Desktop,
        &cfg,
        &mut rng,
    )
    .expect("floating toy");
    let falling = PhysicsToy::new(
        ToyKind::Falling,
        bounds,
        &label_sizes(&content.secondary_labels()),
        ViewportClass::Desktop,
        &cfg,
        &mut rng,
    )
    .expect("falling toy");
    assert_eq!(floating.len(), content.primary_stack.len());
    assert_eq!(falling.len(), content.secondary_stack.len());
    assert_eq!(floating.settle_delay_ms(), None);
}

#[test]
fn mobile_toy_settles_after_delay() {
    let cfg = PhysicsConfig::default();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut toy = PhysicsToy::new(
        ToyKind::Floating,
        Bounds {
            width: 390.0,
            height: 700.0,
        },
        &label_sizes(&["Rust", "WASM", "rapier"]),
        ViewportClass::Mobile,
        &cfg,
        &mut rng,
    )
    .expect("mobile toy");
    assert_eq!(toy.settle_delay_ms(), Some(cfg.settle_delay_ms));
    for tick in 0..30 {
        toy.step(tick as f64 / 60.0);
    }
    assert!(toy.settle(&mut rng));
    assert_eq!(toy.regime(), Regime::Settling);
    assert!(!toy.settle(&mut rng), "settling happens once");
}

#[test]
fn settled_labels_can_still_be_dragged() {
    let cfg = PhysicsConfig::default();
    let mut rng = SmallRng::seed_from_u64(5);
    let mut toy = PhysicsToy::new(
        ToyKind::Floating,
        Bounds {
            width: 390.0,
            height: 700.0,
        },
        &label_sizes(&["Rust", "WASM", "rapier"]),
        ViewportClass::Mobile,
        &cfg,
        &mut rng,
    )
    .expect("mobile toy");
    assert!(toy.settle(&mut rng));
    for tick in 0..20 {
        toy.step(tick as f64 / 60.0);
    }
    // A finger landing on a label both moves the pointer and grabs.
    let (x, y) = toy.centres()[1];
    let (x, y) = (x as f64, y as f64);
    toy.set_pointer(x, y);
    assert!(toy.grab(x, y).is_some());
    toy.set_pointer(x + 40.0, y);
    for tick in 20..40 {
        toy.step(tick as f64 / 60.0);
    }
    assert!(toy.grabbed().is_some());
    toy.release();
    toy.clear_pointer();
    assert_eq!(toy.grabbed(), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn bodies_never_leave_the_container(
        seed in any::<u64>(),
        width in 320.0f64..1600.0,
        height in 360.0f64..1000.0,
        falling in any::<bool>(),
        pointer in (0.0f64..1.0, 0.0f64..1.0),
    ) {
        let kind = if falling { ToyKind::Falling } else { ToyKind::Floating };
        let viewport = ViewportClass::from_width(width, 768.0);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut toy = PhysicsToy::new(
            kind,
            Bounds { width, height },
            &label_sizes(&["Next.Js", "React", "TypeScript", "Prisma", "GSAP"]),
            viewport,
            &PhysicsConfig::default(),
            &mut rng,
        )
        .expect("toy");
        toy.set_pointer(pointer.0 * width, pointer.1 * height);
        let area = toy.containment();
        for tick in 0..90 {
            toy.step(tick as f64 / 60.0);
            for (x, y) in toy.centres() {
                prop_assert!(area.contains(x, y), "({x}, {y}) escaped on tick {tick}");
            }
        }
    }
}
