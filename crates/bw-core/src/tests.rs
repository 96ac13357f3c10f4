//! Unit tests for bw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentName, BlockKey, ObjectId};

    #[test]
    fn block_key_index_roundtrip() {
        let key = BlockKey(2);
        assert_eq!(key.index(), 2);
        assert_eq!(BlockKey::try_from(2usize).unwrap(), key);
        assert!(BlockKey::try_from(300usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(BlockKey(1).to_string(), "block1");
        assert_eq!(AgentName::new("agent1").to_string(), "agent1");
        assert_eq!(ObjectId::from("Door_3").as_str(), "Door_3");
    }

    #[test]
    fn names_order_lexically() {
        assert!(AgentName::from("alice") < AgentName::from("bob"));
    }
}

#[cfg(test)]
mod geo {
    use crate::{Direction, Location};

    #[test]
    fn manhattan_is_symmetric() {
        let a = Location::new(2, 3);
        let b = Location::new(-1, 7);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn north_decreases_y() {
        let p = Location::new(5, 5);
        assert_eq!(p.step(Direction::North), Location::new(5, 4));
        assert_eq!(p.step(Direction::East), Location::new(6, 5));
        assert_eq!(p.step(Direction::South), Location::new(5, 6));
        assert_eq!(p.step(Direction::West), Location::new(4, 5));
    }

    #[test]
    fn closest_keeps_first_minimum() {
        let origin = Location::new(0, 0);
        let pts = [Location::new(3, 0), Location::new(0, 1), Location::new(1, 0)];
        assert_eq!(origin.closest(pts), Some(1));
        assert_eq!(origin.closest(std::iter::empty()), None);
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(Location::new(10, 4).to_string(), "(10, 4)");
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(t.next(), Tick(11));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn since_saturates() {
        assert_eq!(Tick(3).since(Tick(8)), 0);
        assert_eq!(Tick(8).since(Tick(3)), 5);
    }
}

#[cfg(test)]
mod block {
    use proptest::prelude::*;

    use crate::{Colour, Visualization, visualizations_match};

    fn red_cube() -> Visualization {
        Visualization::new(1, 0.5, Some(Colour::new("#ff0000")))
    }

    #[test]
    fn colour_ignored_when_unknown() {
        let seen = red_cube().without_colour();
        assert!(visualizations_match(&seen, &red_cube()));
        assert!(visualizations_match(&red_cube(), &seen));
    }

    #[test]
    fn colour_compared_when_both_known() {
        let blue = Visualization::new(1, 0.5, Some(Colour::new("#0000ff")));
        assert!(!visualizations_match(&blue, &red_cube()));
    }

    #[test]
    fn shape_and_size_always_required() {
        let other_shape = Visualization::new(2, 0.5, None);
        let other_size = Visualization::new(1, 1.0, None);
        assert!(!visualizations_match(&other_shape, &red_cube()));
        assert!(!visualizations_match(&other_size, &red_cube()));
    }

    fn any_vis() -> impl Strategy<Value = Visualization> {
        (
            0u8..4,
            prop_oneof![Just(0.5f64), Just(1.0f64), any::<f64>()],
            proptest::option::of("#[0-9a-f]{6}"),
        )
            .prop_map(|(shape, size, colour)| Visualization::new(shape, size, colour.map(Colour)))
    }

    proptest! {
        #[test]
        fn match_is_reflexive(v in any_vis()) {
            prop_assert!(visualizations_match(&v, &v));
        }

        #[test]
        fn unknown_colour_matches_any_colour(v in any_vis(), c in "#[0-9a-f]{6}") {
            let blind = v.without_colour();
            let recoloured = Visualization { colour: Some(Colour(c)), ..v.clone() };
            prop_assert!(visualizations_match(&blind, &recoloured));
            prop_assert!(visualizations_match(&recoloured, &blind));
        }

        #[test]
        fn unknown_colour_still_needs_shape(v in any_vis()) {
            let blind = v.without_colour();
            let reshaped = Visualization { shape: v.shape.wrapping_add(1), ..v.clone() };
            prop_assert!(!visualizations_match(&blind, &reshaped));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn legacy_none_colour_deserializes_as_unknown() {
        let v: Visualization =
            serde_json::from_str(r#"{"size": 0.5, "shape": 1, "colour": "None"}"#).unwrap();
        assert_eq!(v.colour, None);
        let v: Visualization = serde_json::from_str(r#"{"size": 0.5, "shape": 1}"#).unwrap();
        assert_eq!(v.colour, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn wire_field_order() {
        let json = serde_json::to_string(&red_cube()).unwrap();
        assert_eq!(json, r##"{"size":0.5,"shape":1,"colour":"#ff0000"}"##);
    }
}

#[cfg(test)]
mod score {
    use proptest::prelude::*;

    use crate::{AgentName, Ledger, Score, TrustRecord};

    #[test]
    fn new_repairs_invalid_samples() {
        assert_eq!(Score::new(5, 2), Score::new(2, 2));
        assert_eq!(Score::new(0, 0), Score::new(0, 1));
    }

    #[test]
    fn increase_and_decrease() {
        let mut s = Score::new(1, 1);
        s.increase();
        assert_eq!((s.accurate(), s.total()), (2, 2));
        s.decrease();
        assert_eq!((s.accurate(), s.total()), (2, 3));
        assert!((s.ratio() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn merge_ignores_thin_remote_sample() {
        let mut local = Score::new(20, 25);
        local.merge(Score::new(0, 10), 0.8);
        assert_eq!(local, Score::new(20, 25));
    }

    #[test]
    fn merge_rescales_to_larger_denominator() {
        // local 3/4 rescaled to 6/8, averaged with remote 2/8 -> 4/8.
        let mut local = Score::new(3, 4);
        local.merge(Score::new(2, 8), 0.8);
        assert_eq!(local, Score::new(4, 8));

        // local keeps its denominator when it is the larger one.
        let mut local = Score::new(8, 10);
        local.merge(Score::new(4, 8), 0.8);
        assert_eq!(local, Score::new(6, 10));
    }

    #[test]
    fn ledger_entry_or_uses_prior() {
        let mut ledger = Ledger::new();
        let prior = TrustRecord::new(Score::new(0, 1), Score::new(1, 1));
        ledger.entry_or(&AgentName::from("bob"), prior).reliability.increase();
        assert_eq!(ledger.get("bob").unwrap().reliability, Score::new(1, 2));
        assert_eq!(ledger.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ledger_json_shape() {
        let mut ledger = Ledger::new();
        ledger.insert(
            AgentName::from("bob"),
            TrustRecord::new(Score::new(3, 4), Score::new(1, 1)),
        );
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"bob":{"reliability":[3,4],"competence":[1,1]}}"#);

        let back: Ledger =
            serde_json::from_str(r#"{"bob":{"reliability":[9,4],"competence":[0,0]}}"#).unwrap();
        assert_eq!(back.get("bob").unwrap().reliability, Score::new(4, 4));
        assert_eq!(back.get("bob").unwrap().competence, Score::new(0, 1));
    }

    fn any_score() -> impl Strategy<Value = Score> {
        (0u32..500, 1u32..500).prop_map(|(a, t)| Score::new(a, t))
    }

    proptest! {
        #[test]
        fn updates_preserve_invariant(start in any_score(), ops in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut s = start;
            for up in ops {
                let before = s.total();
                if up { s.increase() } else { s.decrease() }
                prop_assert!(s.accurate() <= s.total());
                prop_assert_eq!(s.total(), before + 1);
            }
        }

        #[test]
        fn merge_with_self_is_identity(s in any_score()) {
            let mut m = s;
            m.merge(s, 0.8);
            prop_assert_eq!(m, s);
        }

        #[test]
        fn merge_preserves_invariant(a in any_score(), b in any_score()) {
            let mut m = a;
            m.merge(b, 0.8);
            prop_assert!(m.accurate() <= m.total());
            prop_assert!(m.total() >= a.total());
        }
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentName, AgentRng};

    #[test]
    fn same_name_same_stream() {
        let name = AgentName::from("agent1");
        let mut a = AgentRng::for_name(7, &name);
        let mut b = AgentRng::for_name(7, &name);
        let xs: Vec<u32> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut r = AgentRng::new(1, 0);
        assert!(r.gen_bool(1.0));
        assert!(!r.gen_bool(0.0));
        assert!(r.gen_bool(2.0));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut r = AgentRng::new(1, 0);
        let empty: [u8; 0] = [];
        assert!(r.choose(&empty).is_none());
    }
}
