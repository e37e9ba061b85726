use proptest::prelude::*;
use r2int::automaton::neighborhood::RULE_SPACE;
use r2int::automaton::symmetry::{lowest_canonical_index, symmetry_orbit};
use r2int::{Neighborhood, RuleTable, World};

prop_compose! {
    fn arb_neighborhood()(index in 0..RULE_SPACE as u32) -> Neighborhood {
        Neighborhood::from_index(index)
    }
}

prop_compose! {
    fn arb_paint()(x in -150i32..150, y in -150i32..150, state in 0u8..2) -> (i32, i32, u8) {
        (x, y, state)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn index_roundtrip(index in 0..RULE_SPACE as u32) {
        prop_assert_eq!(Neighborhood::from_index(index).to_index(), index as u64);
    }

    #[test]
    fn rotation_has_order_four(n in arb_neighborhood()) {
        let turned = n.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
        prop_assert_eq!(turned, n);
        prop_assert_eq!(n.rotate_cw().rotate_ccw(), n);
    }

    #[test]
    fn mirrors_are_involutions(n in arb_neighborhood()) {
        prop_assert_eq!(n.mirror_horizontal().mirror_horizontal(), n);
        prop_assert_eq!(n.mirror_vertical().mirror_vertical(), n);
    }

    #[test]
    fn canonical_index_is_shared_by_orbit(n in arb_neighborhood()) {
        let lowest = lowest_canonical_index(&n);
        for index in symmetry_orbit(&n) {
            let member = Neighborhood::from_index(index as u32);
            prop_assert_eq!(lowest_canonical_index(&member), lowest);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn isotropic_toggle_touches_only_the_orbit(
        n in arb_neighborhood(),
        sentinels in prop::collection::vec(0..RULE_SPACE, 1..16),
    ) {
        let orbit = symmetry_orbit(&n);
        let mut table = RuleTable::new();
        let outside: Vec<u64> = sentinels
            .into_iter()
            .filter(|index| !orbit.contains(index))
            .collect();
        for &index in &outside {
            table.set(index, true);
        }
        let before = table.count_set();

        table.toggle_isotropic(&n);

        let value = table.get(orbit[0]);
        for index in orbit {
            prop_assert_eq!(table.get(index), value);
        }
        for &index in &outside {
            prop_assert!(table.get(index));
        }

        let mut distinct = orbit.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(table.count_set(), before + distinct.len() as u64);
    }

    #[test]
    fn painting_is_deterministic(paints in prop::collection::vec(arb_paint(), 0..64)) {
        let mut a = World::new();
        let mut b = World::new();
        for &(x, y, state) in &paints {
            a.paint_cell(x, y, state);
            b.paint_cell(x, y, state);
        }
        prop_assert_eq!(&a, &b);

        // The last write to a coordinate wins.
        for &(x, y, _) in &paints {
            let last = paints.iter().rev().find(|p| p.0 == x && p.1 == y).map(|p| p.2);
            prop_assert_eq!(Some(a.cell_at(x, y)), last);
        }
    }
}
