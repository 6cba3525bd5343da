//! Unit tests for cw-mobility.

use cw_agent::{Agent, AgentRef, MovementProfile};
use cw_core::{AgentId, EdgeId, KindId, Point, RoadId};
use cw_network::{DijkstraRouter, RoadGraph, RoadGraphBuilder, Traversal};

use crate::{EdgeWalker, Walker};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Roads 1, 2, 3 end to end, 100 m each; road 9 is detached.
fn line_with_island() -> RoadGraph {
    let mut b = RoadGraphBuilder::new();
    b.add_segment(RoadId(1), vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]).unwrap();
    b.add_segment(RoadId(2), vec![Point::new(100.0, 0.0), Point::new(200.0, 0.0)]).unwrap();
    b.add_segment(RoadId(3), vec![Point::new(200.0, 0.0), Point::new(300.0, 0.0)]).unwrap();
    b.add_segment(RoadId(9), vec![Point::new(0.0, 500.0), Point::new(50.0, 500.0)]).unwrap();
    b.build().unwrap()
}

fn edge(g: &RoadGraph, road: i64) -> EdgeId {
    g.edge_id(RoadId(road)).unwrap()
}

fn walker() -> EdgeWalker<DijkstraRouter> {
    EdgeWalker::new(DijkstraRouter)
}

fn agent(g: &RoadGraph, from: i64, to: i64, speed: f64, sensitivity: f64) -> Agent {
    let (start, goal) = (edge(g, from), edge(g, to));
    let route = walker().plan_route(g, start, goal).unwrap();
    let profile = MovementProfile { speed_m_per_tick: speed, traffic_sensitivity: sensitivity };
    Agent::new(AgentId(0), KindId(0), "h".into(), "w".into(), start, goal, route, profile)
}

fn r(kind: u16, agent: u32) -> AgentRef {
    AgentRef::new(KindId(kind), AgentId(agent))
}

// ── EdgeOccupancy ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use super::*;
    use crate::{EdgeOccupancy, OccupancyError};

    #[test]
    fn new_edges_are_empty() {
        let occ = EdgeOccupancy::new();
        assert!(occ.occupants(EdgeId(0)).is_empty());
        assert_eq!(occ.count(EdgeId(7)), 0);
        assert!(occ.is_empty());
    }

    #[test]
    fn enter_and_leave() {
        let mut occ = EdgeOccupancy::new();
        occ.enter(EdgeId(1), r(0, 0)).unwrap();
        assert_eq!(occ.occupants(EdgeId(1)), &[r(0, 0)]);
        assert_eq!(occ.edge_of(r(0, 0)), Some(EdgeId(1)));
        occ.leave(EdgeId(1), r(0, 0)).unwrap();
        assert!(occ.occupants(EdgeId(1)).is_empty());
        assert_eq!(occ.edge_of(r(0, 0)), None);
        assert_eq!(occ.occupied_edges(), 0);
    }

    #[test]
    fn lists_are_sorted_regardless_of_insertion_order() {
        let mut a = EdgeOccupancy::new();
        let mut b = EdgeOccupancy::new();
        let refs = [r(1, 0), r(0, 3), r(0, 1), r(2, 0)];
        for &x in &refs {
            a.enter(EdgeId(4), x).unwrap();
        }
        for &x in refs.iter().rev() {
            b.enter(EdgeId(4), x).unwrap();
        }
        assert_eq!(a.occupants(EdgeId(4)), b.occupants(EdgeId(4)));
        assert_eq!(a.occupants(EdgeId(4)), &[r(0, 1), r(0, 3), r(1, 0), r(2, 0)]);
    }

    #[test]
    fn agent_on_at_most_one_edge() {
        let mut occ = EdgeOccupancy::new();
        occ.enter(EdgeId(1), r(0, 0)).unwrap();
        assert_eq!(
            occ.enter(EdgeId(2), r(0, 0)),
            Err(OccupancyError::AlreadyPlaced { agent: r(0, 0), edge: EdgeId(1) })
        );
        assert_eq!(occ.count(EdgeId(2)), 0);
        assert_eq!(occ.len(), 1);
    }

    #[test]
    fn leave_wrong_edge_is_error() {
        let mut occ = EdgeOccupancy::new();
        occ.enter(EdgeId(1), r(0, 0)).unwrap();
        assert_eq!(
            occ.leave(EdgeId(2), r(0, 0)),
            Err(OccupancyError::NotOnEdge { agent: r(0, 0), edge: EdgeId(2) })
        );
        assert_eq!(occ.count(EdgeId(1)), 1);
    }

    #[test]
    fn transfer_moves_between_lists() {
        let mut occ = EdgeOccupancy::new();
        occ.enter(EdgeId(1), r(0, 0)).unwrap();
        occ.enter(EdgeId(1), r(0, 1)).unwrap();
        occ.transfer(r(0, 0), EdgeId(2)).unwrap();
        assert_eq!(occ.occupants(EdgeId(1)), &[r(0, 1)]);
        assert_eq!(occ.occupants(EdgeId(2)), &[r(0, 0)]);
        occ.transfer(r(0, 0), EdgeId(2)).unwrap();
        assert_eq!(occ.count(EdgeId(2)), 1);
        assert_eq!(occ.transfer(r(5, 5), EdgeId(2)), Err(OccupancyError::NotPlaced(r(5, 5))));
    }

    #[test]
    fn others_on_excludes_self() {
        let mut occ = EdgeOccupancy::new();
        occ.enter(EdgeId(1), r(0, 0)).unwrap();
        occ.enter(EdgeId(1), r(1, 0)).unwrap();
        assert_eq!(occ.others_on(EdgeId(1), r(0, 0)), 1);
        assert_eq!(occ.others_on(EdgeId(1), r(3, 3)), 2);
    }
}

// ── Route planning ────────────────────────────────────────────────────────────

#[cfg(test)]
mod plan_route {
    use super::*;

    #[test]
    fn start_equals_goal_is_single_step() {
        let g = line_with_island();
        let route = walker().plan_route(&g, edge(&g, 2), edge(&g, 2)).unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(route.length_m, 100.0);
    }

    #[test]
    fn route_spans_start_to_goal() {
        let g = line_with_island();
        let route = walker().plan_route(&g, edge(&g, 1), edge(&g, 3)).unwrap();
        let edges: Vec<_> = route.steps.iter().map(|t| t.edge).collect();
        assert_eq!(edges, vec![edge(&g, 1), edge(&g, 2), edge(&g, 3)]);
        assert_eq!(route.length_m, 300.0);
    }

    #[test]
    fn adjacent_edges_need_no_middle() {
        let g = line_with_island();
        let route = walker().plan_route(&g, edge(&g, 1), edge(&g, 2)).unwrap();
        assert_eq!(route.len(), 2);
    }

    /// Roads 1 and 4 meet head to head at (100,0); roads 6 and 7 leave
    /// (0,500) together.
    fn shared_endpoints() -> RoadGraph {
        let mut b = RoadGraphBuilder::new();
        b.add_segment(RoadId(1), vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]).unwrap();
        b.add_segment(RoadId(4), vec![Point::new(200.0, 0.0), Point::new(100.0, 0.0)]).unwrap();
        b.add_segment(RoadId(6), vec![Point::new(0.0, 500.0), Point::new(100.0, 500.0)]).unwrap();
        b.add_segment(RoadId(7), vec![Point::new(0.0, 500.0), Point::new(0.0, 600.0)]).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn goal_ending_at_start_end_is_walked_backward() {
        let g = shared_endpoints();
        let route = walker().plan_route(&g, edge(&g, 1), edge(&g, 4)).unwrap();
        assert_eq!(
            route.steps,
            vec![Traversal::forward(edge(&g, 1)), Traversal::backward(edge(&g, 4))]
        );
        assert_eq!(route.length_m, 200.0);
    }

    #[test]
    fn start_sharing_goal_origin_is_walked_backward() {
        let g = shared_endpoints();
        let route = walker().plan_route(&g, edge(&g, 6), edge(&g, 7)).unwrap();
        assert_eq!(
            route.steps,
            vec![Traversal::backward(edge(&g, 6)), Traversal::forward(edge(&g, 7))]
        );
        assert_eq!(route.length_m, 200.0);
    }

    #[test]
    fn backward_goal_is_completed_at_its_origin() {
        let g = shared_endpoints();
        let mut a = agent(&g, 1, 4, 1000.0, 0.0);
        let adv = walker().advance(&g, &a, 0);
        assert!(adv.reached);
        assert_eq!(adv.edge, edge(&g, 4));
        a.position = adv.position;
        let t = a.route.steps[a.position.step];
        assert_eq!(g.point_along(t, a.position.offset_m), Point::new(200.0, 0.0));
    }

    #[test]
    fn disconnected_goal_fails() {
        let g = line_with_island();
        let err = walker().plan_route(&g, edge(&g, 1), edge(&g, 9)).unwrap_err();
        assert_eq!(err.start, RoadId(1));
        assert_eq!(err.goal, RoadId(9));
    }
}

// ── Advance ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod advance {
    use super::*;

    #[test]
    fn moves_within_edge() {
        let g = line_with_island();
        let a = agent(&g, 1, 3, 40.0, 0.0);
        let adv = walker().advance(&g, &a, 0);
        assert_eq!(adv.position.step, 0);
        assert_eq!(adv.position.offset_m, 40.0);
        assert_eq!(adv.edge, edge(&g, 1));
        assert!(!adv.reached);
    }

    #[test]
    fn crosses_into_next_edge() {
        let g = line_with_island();
        let mut a = agent(&g, 1, 3, 50.0, 0.0);
        a.position.offset_m = 80.0;
        let adv = walker().advance(&g, &a, 0);
        assert_eq!(adv.position.step, 1);
        assert_eq!(adv.position.offset_m, 30.0);
        assert_eq!(adv.edge, edge(&g, 2));
    }

    #[test]
    fn reaches_goal_and_stops_at_its_end() {
        let g = line_with_island();
        let a = agent(&g, 1, 3, 1000.0, 0.0);
        let adv = walker().advance(&g, &a, 0);
        assert!(adv.reached);
        assert_eq!(adv.position.step, 2);
        assert_eq!(adv.position.offset_m, 100.0);
        assert_eq!(adv.edge, edge(&g, 3));
    }

    #[test]
    fn arrived_agents_stay_put() {
        let g = line_with_island();
        let mut a = agent(&g, 1, 3, 50.0, 0.0);
        a.reached_destination = true;
        a.position.step = 2;
        a.position.offset_m = 100.0;
        let adv = walker().advance(&g, &a, 0);
        assert!(adv.reached);
        assert_eq!(adv.position, a.position);
    }

    #[test]
    fn congestion_slows_movement() {
        let g = line_with_island();
        let a = agent(&g, 1, 3, 60.0, 1.0);
        assert_eq!(walker().advance(&g, &a, 0).position.offset_m, 60.0);
        assert_eq!(walker().advance(&g, &a, 2).position.offset_m, 20.0);
    }

    #[test]
    fn flipped_agent_walks_back() {
        let g = line_with_island();
        let mut a = agent(&g, 1, 3, 1000.0, 0.0);
        let adv = walker().advance(&g, &a, 0);
        a.position = adv.position;
        a.reached_destination = adv.reached;
        a.flip();
        assert_eq!(a.current_edge(), edge(&g, 3));
        let back = walker().advance(&g, &a, 0);
        assert!(back.reached);
        assert_eq!(back.edge, edge(&g, 1));
    }
}
