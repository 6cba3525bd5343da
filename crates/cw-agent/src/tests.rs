//! Unit tests for cw-agent.

#[cfg(test)]
mod helpers {
    use cw_core::{AgentId, EdgeId, KindId, Point, RoadId};
    use cw_network::{DijkstraRouter, RoadGraph, RoadGraphBuilder, Route, Router, Traversal};

    use crate::{Agent, MovementProfile};

    /// Roads 1, 2, 3 laid end to end along the x axis, 100 m each.
    pub fn line() -> RoadGraph {
        let mut b = RoadGraphBuilder::new();
        for (i, road) in [1, 2, 3].into_iter().enumerate() {
            let x = i as f64 * 100.0;
            b.add_segment(RoadId(road), vec![Point::new(x, 0.0), Point::new(x + 100.0, 0.0)])
                .unwrap();
        }
        b.build().unwrap()
    }

    pub fn route(g: &RoadGraph, start: EdgeId, goal: EdgeId) -> Route {
        let mid = DijkstraRouter
            .route(g, g.edge(start).to, g.edge(goal).from)
            .unwrap();
        let mut steps = vec![Traversal::forward(start)];
        steps.extend(mid.steps);
        steps.push(Traversal::forward(goal));
        Route::from_steps(g, steps)
    }

    pub fn commuter(g: &RoadGraph) -> Agent {
        let start = g.edge_id(RoadId(1)).unwrap();
        let goal = g.edge_id(RoadId(3)).unwrap();
        Agent::new(
            AgentId::INVALID,
            KindId(0),
            "home".into(),
            "work".into(),
            start,
            goal,
            route(g, start, goal),
            MovementProfile::default(),
        )
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent {
    use cw_core::{AgentId, KindId, RoadId};

    use crate::{AgentRef, Position};
    use super::helpers::{commuter, line};

    #[test]
    fn starts_on_start_edge() {
        let g = line();
        let a = commuter(&g);
        assert_eq!(a.current_edge(), a.start_edge);
        assert!(!a.reached_destination);
        assert_eq!(a.route.len(), 3);
        assert_eq!(a.route.length_m, 300.0);
    }

    #[test]
    fn flip_swaps_and_restarts_on_old_goal() {
        let g = line();
        let mut a = commuter(&g);
        let (start, goal) = (a.start_edge, a.goal_edge);
        a.position = Position { step: 2, offset_m: 100.0 };
        a.reached_destination = true;
        assert_eq!(a.current_edge(), goal);

        a.flip();
        assert_eq!(a.start_edge, goal);
        assert_eq!(a.goal_edge, start);
        assert!(!a.reached_destination);
        assert_eq!(a.position, Position::default());
        assert_eq!(a.current_edge(), goal);
        assert_eq!(a.route.steps.last().map(|t| t.edge), Some(start));
        assert_eq!(g.edge(a.goal_edge).road_id, RoadId(1));
    }

    #[test]
    fn double_flip_restores_route() {
        let g = line();
        let mut a = commuter(&g);
        let original = a.route.clone();
        a.flip();
        a.flip();
        assert_eq!(a.route, original);
    }

    #[test]
    fn refs_order_by_kind_then_id() {
        let mut refs = vec![
            AgentRef::new(KindId(1), AgentId(0)),
            AgentRef::new(KindId(0), AgentId(5)),
            AgentRef::new(KindId(0), AgentId(2)),
        ];
        refs.sort();
        assert_eq!(refs[0], AgentRef::new(KindId(0), AgentId(2)));
        assert_eq!(refs[2].kind, KindId(1));
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population {
    use cw_core::{AgentId, KindId, RoadId};

    use crate::{Direction, KindSpec, Population};
    use super::helpers::{commuter, line};

    fn pop() -> Population {
        Population::new(KindId(2), KindSpec::new("elderly", vec![RoadId(3)]))
    }

    #[test]
    fn push_assigns_dense_ids_and_kind() {
        let g = line();
        let mut p = pop();
        assert_eq!(p.push(commuter(&g)), AgentId(0));
        assert_eq!(p.push(commuter(&g)), AgentId(1));
        assert_eq!(p.len(), 2);
        assert!(p.agents.iter().all(|a| a.kind == KindId(2)));
        assert_eq!(p.agent(AgentId(1)).map(|a| a.id), Some(AgentId(1)));
        assert!(p.agent(AgentId(2)).is_none());
    }

    #[test]
    fn empty_population_has_all_arrived() {
        assert!(pop().all_arrived());
        assert!(pop().is_empty());
    }

    #[test]
    fn all_arrived_requires_every_member() {
        let g = line();
        let mut p = pop();
        p.push(commuter(&g));
        p.push(commuter(&g));
        p.agents[0].reached_destination = true;
        assert!(!p.all_arrived());
        assert_eq!(p.arrived_count(), 1);
        p.agents[1].reached_destination = true;
        assert!(p.all_arrived());
    }

    #[test]
    fn flip_toggles_direction_and_members() {
        let g = line();
        let mut p = pop();
        p.push(commuter(&g));
        assert_eq!(p.direction, Direction::ToGoal);
        assert!(p.direction.to_goal());
        p.agents[0].reached_destination = true;
        p.flip();
        assert_eq!(p.direction, Direction::ToHome);
        assert!(!p.agents[0].reached_destination);
        p.flip();
        assert_eq!(p.direction, Direction::ToGoal);
    }
}

// ── KindSpec ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kind_spec {
    use cw_core::RoadId;

    use crate::{AgentError, KindSpec, MovementProfile};

    #[test]
    fn validate_accepts_defaults() {
        assert!(KindSpec::new("main", vec![RoadId(18081), RoadId(519)]).validate().is_ok());
    }

    #[test]
    fn empty_goal_set_rejected() {
        assert_eq!(
            KindSpec::new("ngo", vec![]).validate(),
            Err(AgentError::EmptyGoalSet { kind: "ngo".into() })
        );
    }

    #[test]
    fn bad_profile_rejected() {
        let spec = KindSpec::new("x", vec![RoadId(1)])
            .with_profile(MovementProfile { speed_m_per_tick: 0.0, traffic_sensitivity: 0.0 });
        assert!(matches!(spec.validate(), Err(AgentError::InvalidSpeed { .. })));

        let spec = KindSpec::new("x", vec![RoadId(1)])
            .with_profile(MovementProfile { speed_m_per_tick: 1.0, traffic_sensitivity: -1.0 });
        assert!(matches!(spec.validate(), Err(AgentError::InvalidSensitivity { .. })));
    }

    #[test]
    fn congestion_slows_walkers() {
        let p = MovementProfile { speed_m_per_tick: 60.0, traffic_sensitivity: 0.5 };
        assert_eq!(p.effective_speed(0), 60.0);
        assert_eq!(p.effective_speed(2), 30.0);
    }
}
