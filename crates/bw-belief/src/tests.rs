//! Unit tests for bw-belief.

#[cfg(test)]
fn red() -> bw_core::Visualization {
    bw_core::Visualization::new(1, 0.5, Some(bw_core::Colour::new("#ff0000")))
}

#[cfg(test)]
fn blue() -> bw_core::Visualization {
    bw_core::Visualization::new(0, 0.5, Some(bw_core::Colour::new("#0000ff")))
}

#[cfg(test)]
fn two_goal_store() -> crate::BeliefStore {
    crate::BeliefStoreBuilder::new()
        .goal_block(red(), bw_core::Location::new(12, 22))
        .goal_block(blue(), bw_core::Location::new(12, 23))
        .build()
        .unwrap()
}

#[cfg(test)]
mod builder_tests {
    use bw_core::BlockKey;

    use super::*;
    use crate::{BeliefError, BeliefStoreBuilder, DoorFilter};

    #[test]
    fn empty_goal_list_is_an_error() {
        assert!(matches!(BeliefStoreBuilder::new().build(), Err(BeliefError::NoGoalBlocks)));
    }

    #[test]
    fn keys_follow_insertion_order() {
        let store = two_goal_store();
        assert_eq!(store.goal_blocks()[0].key(), BlockKey(0));
        assert_eq!(store.goal_blocks()[1].key(), BlockKey(1));
        assert!(store.is_pending(BlockKey(0)) && store.is_pending(BlockKey(1)));
        assert_eq!(store.door_filter(), DoorFilter::UnvisitedByTeam);
    }

    #[test]
    fn colour_blind_build_strips_goal_colours() {
        let store = BeliefStoreBuilder::new()
            .goal_block(red(), bw_core::Location::new(1, 1))
            .colour_blind(true)
            .build()
            .unwrap();
        assert_eq!(store.goal_blocks()[0].visualization().colour, None);
    }
}

#[cfg(test)]
mod candidate_tests {
    use bw_core::{BlockKey, Location, ObjectId};

    use super::*;

    #[test]
    fn sighting_records_only_matching_blocks() {
        let mut store = two_goal_store();
        let added = store.record_sighting(&red(), Location::new(10, 4), Some(ObjectId::from("b7")));
        assert_eq!(added, vec![BlockKey(0)]);
        assert_eq!(store.goal_blocks()[0].candidate_locations(), &[Location::new(10, 4)]);
        assert!(!store.goal_blocks()[1].has_candidates());
    }

    #[test]
    fn repeat_sightings_are_not_duplicated() {
        let mut store = two_goal_store();
        let id = Some(ObjectId::from("b7"));
        assert!(store.record_candidate(BlockKey(0), Location::new(3, 3), id.clone()).unwrap());
        assert!(!store.record_candidate(BlockKey(0), Location::new(3, 3), id).unwrap());
        assert!(!store.record_candidate(BlockKey(0), Location::new(3, 3), None).unwrap());
        assert_eq!(store.goal_blocks()[0].candidate_ids().len(), 1);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let mut store = two_goal_store();
        assert!(store.record_candidate(BlockKey(9), Location::new(0, 0), None).is_err());
    }

    #[test]
    fn stale_candidate_removal_keeps_alignment() {
        let mut store = two_goal_store();
        store.record_candidate(BlockKey(0), Location::new(1, 1), Some("a".into())).unwrap();
        store.record_candidate(BlockKey(0), Location::new(2, 2), Some("b".into())).unwrap();
        store.record_candidate(BlockKey(0), Location::new(3, 3), None).unwrap();

        assert_eq!(store.remove_candidate(BlockKey(0), Location::new(2, 2)).unwrap(), 1);
        let gb = &store.goal_blocks()[0];
        assert_eq!(gb.candidate_locations(), &[Location::new(1, 1), Location::new(3, 3)]);
        assert_eq!(gb.candidate_ids(), &[Some(ObjectId::from("a")), None]);
    }

    #[test]
    fn pending_candidates_skip_carried_blocks() {
        let mut store = two_goal_store();
        store.record_sighting(&red(), Location::new(1, 1), None);
        store.record_sighting(&blue(), Location::new(2, 2), None);
        store.mark_carrying(BlockKey(0), ObjectId::from("a"));
        let pending: Vec<_> = store.pending_candidates().map(|(k, c)| (k, c.location)).collect();
        assert_eq!(pending, vec![(BlockKey(1), Location::new(2, 2))]);
    }

    #[test]
    fn drop_off_lookup() {
        let store = two_goal_store();
        assert_eq!(store.drop_off_at(Location::new(12, 23)), Some(BlockKey(1)));
        assert!(!store.is_drop_off(Location::new(0, 0)));
    }
}

#[cfg(test)]
mod progress_tests {
    use bw_core::{BlockKey, ObjectId};

    use super::*;
    use crate::DoorFilter;

    #[test]
    fn carry_release_and_reopen() {
        let mut store = two_goal_store();
        store.mark_carrying(BlockKey(1), ObjectId::from("b"));
        store.mark_carrying(BlockKey(0), ObjectId::from("a"));
        assert_eq!(store.carrying_count(), 2);
        assert_eq!(store.next_delivery().map(|(k, _)| k), Some(BlockKey(0)));

        assert_eq!(store.release(BlockKey(0)), Some(ObjectId::from("a")));
        assert!(!store.is_carrying(BlockKey(0)));
        store.reopen(BlockKey(0));
        assert!(store.is_pending(BlockKey(0)));
        assert!(!store.all_delivered());
    }

    #[test]
    fn delivered_blocks_leave_the_pending_set() {
        let mut store = two_goal_store();
        assert!(store.mark_delivered(BlockKey(0)));
        assert!(!store.mark_delivered(BlockKey(0)));
        assert!(store.mark_delivered(BlockKey(1)));
        assert!(store.all_delivered());
    }

    #[test]
    fn door_filters() {
        let mut store = two_goal_store();
        store.visit_self("room_1");
        store.visit_reported("room_2");

        assert!(store.admits(DoorFilter::None, "room_1"));
        assert!(!store.admits(DoorFilter::UnvisitedBySelf, "room_1"));
        assert!(store.admits(DoorFilter::UnvisitedBySelf, "room_2"));
        assert!(!store.admits(DoorFilter::UnvisitedByTeam, "room_2"));
        assert!(store.admits(DoorFilter::UnvisitedByTeam, "room_3"));
    }
}

#[cfg(test)]
mod alignment_props {
    use bw_core::{BlockKey, Location, ObjectId};
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Record(u8, i32, i32, Option<u8>),
        Sight(bool, i32, i32),
        Remove(u8, i32, i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..2, 0i32..5, 0i32..5, proptest::option::of(0u8..4))
                .prop_map(|(k, x, y, id)| Op::Record(k, x, y, id)),
            (any::<bool>(), 0i32..5, 0i32..5).prop_map(|(r, x, y)| Op::Sight(r, x, y)),
            (0u8..2, 0i32..5, 0i32..5).prop_map(|(k, x, y)| Op::Remove(k, x, y)),
        ]
    }

    proptest! {
        #[test]
        fn candidate_lists_stay_aligned(ops in proptest::collection::vec(op(), 0..80)) {
            let mut store = two_goal_store();
            for op in ops {
                match op {
                    Op::Record(k, x, y, id) => {
                        let id = id.map(|i| ObjectId::new(format!("obj{i}")));
                        store.record_candidate(BlockKey(k), Location::new(x, y), id).unwrap();
                    }
                    Op::Sight(is_red, x, y) => {
                        let vis = if is_red { red() } else { blue() };
                        store.record_sighting(&vis, Location::new(x, y), None);
                    }
                    Op::Remove(k, x, y) => {
                        store.remove_candidate(BlockKey(k), Location::new(x, y)).unwrap();
                    }
                }
                for gb in store.goal_blocks() {
                    prop_assert_eq!(gb.candidate_locations().len(), gb.candidate_ids().len());
                }
            }
        }
    }
}
