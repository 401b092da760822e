//! Randomized checks of simulation invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use die_again::Tuning;
use die_again::sim::{
    Difficulty, HazardKind, LevelDefinition, LevelObject, Session, SimPhase, SimulationPolicy,
    TickInput, generate_level_with, tick,
};

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left, right, jump, fly_up, fly_down)| TickInput {
            left,
            right,
            jump,
            fly_up,
            fly_down,
            ..Default::default()
        },
    )
}

fn policy_strategy() -> impl Strategy<Value = SimulationPolicy> {
    (0u8..32).prop_map(SimulationPolicy::from_bits_truncate)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn player_never_leaves_canvas_horizontally(
        level_id in 4u32..40,
        seed in any::<u64>(),
        policy in policy_strategy(),
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let level = generate_level_with(level_id, &mut Pcg32::seed_from_u64(seed));
        let mut session = Session::new(level, Tuning::default(), seed);
        session.start();
        let max_x = session.tuning().canvas_width - session.tuning().player_size;
        for input in &inputs {
            tick(&mut session, input, policy);
            let x = session.player().pos.x;
            prop_assert!((0.0..=max_x).contains(&x), "x = {}", x);
        }
    }

    #[test]
    fn generated_levels_are_playable(level_id in 1u32..=1000, seed in any::<u64>()) {
        let level = generate_level_with(level_id, &mut Pcg32::seed_from_u64(seed));
        prop_assert_eq!(level.goal_count(), 1);
        prop_assert!(level.validate().is_ok());
        prop_assert!(
            level.count_of(HazardKind::Wall) + level.count_of(HazardKind::OpeningFloor) >= 1
        );
        prop_assert!(level.objects.iter().all(|o| o.pos.x >= 0.0 && o.pos.x < 1000.0));
    }

    #[test]
    fn landing_rests_exactly_on_surface(
        floor_y in 300i32..650,
        drop in 1i32..200,
        x in 0i32..900,
    ) {
        let floor_y = floor_y as f32;
        let level = LevelDefinition {
            id: 1,
            name: "Drop".to_string(),
            difficulty: Difficulty::Hard,
            hint: String::new(),
            player_start: Vec2::new(x as f32, floor_y - 30.0 - drop as f32),
            objects: vec![
                LevelObject::wall(0.0, floor_y, 1000.0, 50.0),
                LevelObject::goal(960.0, 10.0),
            ],
        };
        let mut session = Session::new(level, Tuning::default(), 1);
        session.start();
        for _ in 0..120 {
            tick(&mut session, &TickInput::default(), SimulationPolicy::standard());
        }
        prop_assert_eq!(session.phase(), SimPhase::Running);
        prop_assert!(session.player().grounded);
        prop_assert_eq!(session.player().pos.y + 30.0, floor_y);
        prop_assert_eq!(session.player().vel.y, 0.0);
    }
}
