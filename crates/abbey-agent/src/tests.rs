//! Unit tests for abbey-agent.

#[cfg(test)]
mod builder {
    use abbey_core::{AgentId, Point, SimRng};

    use crate::{AgentStoreBuilder, BROTHER_NAMES, Needs};

    #[test]
    fn builds_parallel_arrays() {
        let (store, rngs) = AgentStoreBuilder::new(7)
            .brother("Brother Simon", Point::new(0, 0))
            .brother_with_effort("Brother Paul", Point::new(3, 4), 2.5)
            .build();

        assert_eq!(store.count, 2);
        assert_eq!(rngs.len(), 2);
        assert_eq!(store.name.len(), 2);
        assert_eq!(store.position_of(AgentId(1)), Point::new(3, 4));
        assert_eq!(store.effort, vec![1.0, 2.5]);
        assert_eq!(store.needs[0], Needs::default());
    }

    #[test]
    fn default_effort_applies_to_unspecified_brothers() {
        let (store, _) = AgentStoreBuilder::new(0)
            .default_effort(3.0)
            .brother("Brother John", Point::new(0, 0))
            .build();
        assert_eq!(store.effort[0], 3.0);
    }

    #[test]
    fn random_brothers_stand_on_diagonal() {
        let mut rng = SimRng::new(1);
        let (store, _) = AgentStoreBuilder::new(1).random_brothers(5, &mut rng).build();
        assert_eq!(store.count, 5);
        for (i, p) in store.position.iter().enumerate() {
            assert_eq!(*p, Point::new(i as i32, i as i32));
        }
        for name in &store.name {
            let given = name.strip_prefix("Brother ").expect("prefixed");
            assert!(BROTHER_NAMES.contains(&given), "unexpected name {name}");
        }
    }

    #[test]
    fn empty_roster() {
        let (store, rngs) = AgentStoreBuilder::new(0).build();
        assert!(store.is_empty());
        assert!(rngs.is_empty());
        assert_eq!(store.agent_ids().count(), 0);
    }
}

#[cfg(test)]
mod store {
    use abbey_core::{AbbeyError, AgentId, Point};

    use crate::AgentStoreBuilder;

    #[test]
    fn agent_at_finds_lowest_id() {
        let (store, _) = AgentStoreBuilder::new(0)
            .brother("a", Point::new(1, 1))
            .brother("b", Point::new(2, 2))
            .brother("c", Point::new(2, 2))
            .build();
        assert_eq!(store.agent_at(Point::new(2, 2)), Some(AgentId(1)));
        assert_eq!(store.agent_at(Point::new(9, 9)), None);
    }

    #[test]
    fn check_rejects_out_of_range() {
        let (store, _) = AgentStoreBuilder::new(0).brother("a", Point::new(0, 0)).build();
        assert!(store.check(AgentId(0)).is_ok());
        assert!(matches!(store.check(AgentId(1)), Err(AbbeyError::AgentNotFound(AgentId(1)))));
    }

    #[test]
    fn decay_applies_to_everyone() {
        let (mut store, _) = AgentStoreBuilder::new(0)
            .brother("a", Point::new(0, 0))
            .brother("b", Point::new(1, 1))
            .build();
        store.decay_needs(1.0, 2.0);
        for n in &store.needs {
            assert_eq!(n.hunger, 1.0);
            assert_eq!(n.energy, 98.0);
        }
    }
}

#[cfg(test)]
mod needs {
    use crate::needs::{NEED_MAX, RESTED_AT, SATED_AT};
    use crate::{Need, Needs};

    #[test]
    fn values_are_clamped() {
        let mut n = Needs { hunger: 99.5, energy: 0.5 };
        n.decay(10.0, 10.0);
        assert_eq!(n.hunger, NEED_MAX);
        assert_eq!(n.energy, 0.0);
        n.restore(Need::Hunger, 500.0);
        n.restore(Need::Energy, 500.0);
        assert_eq!(n.hunger, 0.0);
        assert_eq!(n.energy, NEED_MAX);
    }

    #[test]
    fn satisfaction_thresholds() {
        let n = Needs { hunger: SATED_AT, energy: RESTED_AT };
        assert!(n.is_satisfied(Need::Hunger));
        assert!(n.is_satisfied(Need::Energy));
        let n = Needs { hunger: SATED_AT + 1.0, energy: RESTED_AT - 1.0 };
        assert!(!n.is_satisfied(Need::Hunger));
        assert!(!n.is_satisfied(Need::Energy));
    }
}
