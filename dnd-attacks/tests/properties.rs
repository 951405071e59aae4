//! Property tests for attack resolution invariants.

use dnd_attacks::items::{get_shield, get_weapon, WEAPONS};
use dnd_attacks::testing::{assert_no_duplicate_modes, assert_pool_conserved};
use dnd_attacks::{
    create_sample_crossbow_ranger, create_sample_fighter, create_sample_monk,
    create_sample_polearm_fighter, ActionType, AttackResolver, Character, EquippedItem,
    ExtraAttackRule, RuleCatalog, TestHarness,
};
use proptest::prelude::*;

const RULES: [&str; 6] = [
    "Bow Mastery",
    "Ranged Expert",
    "Polearm Expert",
    "Shield Expert",
    "Martial Arts",
    "Flurry Of Blows",
];

fn sample(index: usize) -> Character {
    match index % 4 {
        0 => create_sample_fighter("Roland"),
        1 => create_sample_crossbow_ranger("Vex"),
        2 => create_sample_polearm_fighter("Gwen"),
        _ => create_sample_monk("Li"),
    }
}

fn hand_item(index: Option<usize>) -> Option<EquippedItem> {
    let index = index?;
    if index == WEAPONS.len() {
        return get_shield("Sentinel Shield +1").map(Into::into);
    }
    get_weapon(&WEAPONS[index % WEAPONS.len()].base.name).map(Into::into)
}

prop_compose! {
    fn arb_character()(
        sample_index in 0usize..4,
        main in proptest::option::of(0..=WEAPONS.len()),
        off in proptest::option::of(0..=WEAPONS.len()),
        attacked in any::<bool>(),
    ) -> Character {
        let mut character = sample(sample_index);
        character.equipment.main_hand = hand_item(main);
        character.equipment.off_hand = hand_item(off);
        if attacked {
            character.record_attack();
        }
        character
    }
}

#[derive(Debug, Clone)]
enum Op {
    Refresh,
    Apply(usize),
    Attack,
    NextTurn,
    SwapMainHand(Option<usize>),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Refresh),
        (0..RULES.len()).prop_map(Op::Apply),
        Just(Op::Attack),
        Just(Op::NextTurn),
        proptest::option::of(0..=WEAPONS.len()).prop_map(Op::SwapMainHand),
    ]
}

proptest! {
    #[test]
    fn test_applying_any_rule_twice_is_idempotent(character in arb_character(), rule in 0..RULES.len()) {
        let catalog = RuleCatalog::standard().unwrap();
        let rule = catalog.get(RULES[rule]).unwrap();
        let mut character = character;
        let mut resolver = AttackResolver::default();
        resolver.refresh_attack_modes(&mut character, &catalog);

        resolver.try_add_extra_attack(&mut character, rule);
        let once = character.attack_modes.clone();
        let outcome = resolver.try_add_extra_attack(&mut character, rule);

        // A clearing rule re-creates what it just purged
        if let (Some(summary), false) = (outcome.summary(), rule.clears_same_action_type()) {
            prop_assert_eq!(summary.appended, 0);
        }
        prop_assert_eq!(character.attack_modes, once);
    }

    #[test]
    fn test_equality_ignores_only_attack_count(character in arb_character(), a in 0u32..10, b in 0u32..10) {
        let catalog = RuleCatalog::standard().unwrap();
        let mut character = character;
        let mut resolver = AttackResolver::default();
        resolver.refresh_attack_modes(&mut character, &catalog);

        let mut left = character.attack_modes[0].clone();
        let mut right = left.clone();
        left.attacks_number = a;
        right.attacks_number = b;
        prop_assert!(left.equals_ignoring_attack_count(&right));
        prop_assert!(right.equals_ignoring_attack_count(&left));

        right.to_hit_bonus += 1;
        prop_assert!(!left.equals_ignoring_attack_count(&right));
        prop_assert!(!right.equals_ignoring_attack_count(&left));
    }

    #[test]
    fn test_merge_keeps_the_larger_count(existing in 1u32..6) {
        let mut monk = create_sample_monk("Li");
        let rule = ExtraAttackRule::unarmed("Martial Arts", ActionType::Bonus);
        let mut resolver = AttackResolver::default();

        resolver.try_add_extra_attack(&mut monk, &rule);
        monk.attack_modes[0].attacks_number = existing;
        resolver.try_add_extra_attack(&mut monk, &rule);

        prop_assert_eq!(monk.attack_modes.len(), 1);
        prop_assert_eq!(monk.attack_modes[0].attacks_number, existing.max(1));
    }

    #[test]
    fn test_pool_is_conserved(character in arb_character(), ops in prop::collection::vec(arb_op(), 1..24)) {
        let mut harness = TestHarness::with_character(character);
        for op in ops {
            match op {
                Op::Refresh => {
                    harness.refresh();
                }
                Op::Apply(rule) => {
                    harness.apply(RULES[rule]);
                }
                Op::Attack => {
                    harness.attack();
                }
                Op::NextTurn => {
                    harness.next_turn();
                }
                Op::SwapMainHand(item) => {
                    harness.character.equipment.main_hand = hand_item(item);
                    harness.refresh();
                }
            }
            assert_pool_conserved(&harness);
        }
    }

    #[test]
    fn test_refresh_never_duplicates(character in arb_character()) {
        let mut harness = TestHarness::with_character(character);
        for feature in RULES {
            harness.character.add_feature(feature);
        }
        harness.refresh();
        assert_no_duplicate_modes(&harness);
        prop_assert_eq!(harness.modes_of(ActionType::Main).len(), 1);
    }
}
