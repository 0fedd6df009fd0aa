use glsteps::transform::{CubeScene, Oscillation, Rotation};

const EPSILON: f32 = 1e-4;

#[test]
fn offset_stays_within_one_increment_of_the_bound() {
    for &max_offset in &[0.1_f32, 0.5, 0.7, 1.0] {
        for &increment in &[0.0005_f32, 0.005, 0.03, 0.11, 0.25] {
            let mut osc = Oscillation::new(increment, max_offset);
            let bound = max_offset + increment + EPSILON;
            for frame in 0..20_000 {
                osc.step();
                assert!(
                    osc.offset.abs() <= bound,
                    "frame {frame}: offset {} escaped ±{bound} (increment {increment})",
                    osc.offset
                );
            }
        }
    }
}

#[test]
fn offset_reaches_both_sides() {
    let mut osc = Oscillation::new(0.01, 0.5);
    let (mut low, mut high) = (0.0_f32, 0.0_f32);
    let mut flips = 0;
    for _ in 0..1_000 {
        if osc.step() {
            flips += 1;
        }
        low = low.min(osc.offset);
        high = high.max(osc.offset);
    }
    assert!(high >= 0.5 - EPSILON);
    assert!(low <= -0.5 + EPSILON);
    // 50 frames out, then 100 frames per crossing.
    assert!((9..=11).contains(&flips), "flips: {flips}");
}

#[test]
fn angle_after_wrap_stays_below_a_full_turn() {
    for &step in &[0.01_f32, 0.7, 13.0, 90.0, 359.0] {
        let mut rot = Rotation::new(step);
        for frame in 0..50_000 {
            let transient = rot.angle + step;
            assert!(transient < Rotation::FULL_TURN + step + EPSILON);
            rot.advance();
            assert!(
                (0.0..Rotation::FULL_TURN).contains(&rot.angle),
                "frame {frame}: angle {} with step {step}",
                rot.angle
            );
        }
    }
}

#[test]
fn hundredth_degree_steps_wrap_exactly_once_in_36000_frames() {
    let step = 0.01_f32;

    let mut accumulated = 0.0_f32;
    let mut first_full_turn = None;
    for frame in 1..=36_000 {
        accumulated += step;
        if accumulated >= 360.0 {
            first_full_turn = Some(frame);
            break;
        }
    }
    let first_full_turn = first_full_turn.expect("accumulator never reached 360");

    let mut rot = Rotation::new(step);
    let wraps: Vec<u32> = (1..=36_000).filter(|_| rot.advance()).collect();

    assert_eq!(wraps, vec![first_full_turn]);
    assert!(rot.angle < 1.0);
}

#[test]
fn reversed_rotation_wraps_at_minus_full_turn() {
    let mut rot = Rotation {
        angle: 0.0,
        step: 45.0,
        direction: -1.0,
    };
    let wraps = (0..16).filter(|_| rot.advance()).count();
    assert_eq!(wraps, 2);
    assert_eq!(rot.angle, 0.0);
}

#[test]
fn cube_bounce_advances_while_the_sliders_place_the_cube() {
    let mut scene = CubeScene::default();
    scene.controls.angles = [30.0, 45.0, 60.0];
    scene.controls.scale = 1.5;
    let placed = scene.controls.model_matrix();

    let mut previous = scene.oscillation.offset;
    let mut flips = 0;
    for frame in 0..1_000 {
        let direction = scene.oscillation.direction;
        assert_eq!(scene.advance(), placed, "frame {frame}");
        assert_ne!(scene.oscillation.offset, previous, "frame {frame}");
        if scene.oscillation.direction != direction {
            flips += 1;
        }
        previous = scene.oscillation.offset;
    }
    assert!(flips >= 3, "flips: {flips}");
}
