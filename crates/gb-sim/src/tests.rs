//! Unit tests for gb-sim.

use gb_core::{AgentId, CellId, SimRng, Turn};
use gb_grid::{BoardBuilder, ContentKind, GridQuery};
use gb_path::PathPolicy;
use gb_resolve::{Agent, AgentKind};

use crate::{
    BoardObserver, NoopObserver, PlacementPlanner, PlacementRequest, Sim, SimBuilder, SimConfig,
    SimError, TurnPhase, replenish_count,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// An observer that records every callback it receives.
#[derive(Default)]
struct Recorder {
    reached: Vec<(AgentId, CellId)>,
    blocked: Vec<AgentId>,
    content_removed: Vec<(CellId, ContentKind)>,
    agents_removed: Vec<(AgentId, CellId)>,
    turns: Vec<(Turn, usize)>,
}

impl BoardObserver for Recorder {
    fn on_agent_reached_destination(&mut self, agent: AgentId, cell: CellId) {
        self.reached.push((agent, cell));
    }
    fn on_agent_blocked(&mut self, agent: AgentId) {
        self.blocked.push(agent);
    }
    fn on_content_removed(&mut self, cell: CellId, kind: ContentKind) {
        self.content_removed.push((cell, kind));
    }
    fn on_agent_removed(&mut self, agent: AgentId, cell: CellId) {
        self.agents_removed.push((agent, cell));
    }
    fn on_turn_end(&mut self, turn: Turn, moved: usize) {
        self.turns.push((turn, moved));
    }
}

fn looper(cells: &[u16]) -> Agent {
    let cells: Vec<CellId> = cells.iter().map(|&c| CellId(c)).collect();
    Agent::new(cells[0], PathPolicy::Loop { cells })
}

/// 3×3 sim with the given agents.
fn sim_3x3(agents: Vec<Agent>) -> Sim {
    SimBuilder::new(SimConfig::new(7, 10), BoardBuilder::new(3, 3).unwrap().build())
        .agents(agents)
        .build()
        .unwrap()
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn places_agents_on_the_board() {
        let sim = sim_3x3(vec![looper(&[0, 1]), looper(&[4, 5])]);
        assert_eq!(sim.board.occupant_or_incoming(CellId(0)), Some(AgentId(0)));
        assert_eq!(sim.board.occupant_or_incoming(CellId(4)), Some(AgentId(1)));
        assert_eq!(sim.roster.len(), 2);
    }

    #[test]
    fn rejects_double_occupancy() {
        let result = SimBuilder::new(SimConfig::new(7, 10), BoardBuilder::new(3, 3).unwrap().build())
            .agent(looper(&[4, 5]))
            .agent(looper(&[4, 5]))
            .build();
        assert!(matches!(result, Err(SimError::Grid(_))));
    }

    #[test]
    fn rejects_out_of_bounds_placement() {
        let result = SimBuilder::new(SimConfig::new(7, 10), BoardBuilder::new(3, 3).unwrap().build())
            .agent(looper(&[40, 41]))
            .build();
        assert!(matches!(result, Err(SimError::Grid(_))));
    }
}

// ── Phase machine ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod phases {
    use super::*;

    #[test]
    fn a_turn_walks_every_phase_in_order() {
        let mut sim = sim_3x3(vec![looper(&[0, 1, 2])]);
        let mut obs = NoopObserver;

        let expected = [
            TurnPhase::CollectIntents,
            TurnPhase::Resolve,
            TurnPhase::Vacate,
            TurnPhase::Occupy,
            TurnPhase::Complete,
        ];
        for want in expected {
            assert_eq!(sim.step(&mut obs).unwrap(), want);
        }
        assert_eq!(sim.clock.current_turn, Turn(1));
    }

    #[test]
    fn await_settle_repolls_while_an_agent_is_busy() {
        let mut sim = sim_3x3(vec![looper(&[0, 1])]);
        sim.roster[AgentId(0)].is_under_attack = true;

        let mut obs = NoopObserver;
        assert_eq!(sim.step(&mut obs).unwrap(), TurnPhase::AwaitSettle);
        assert!(matches!(sim.run_turn(&mut obs), Err(SimError::AgentsUnsettled)));

        sim.roster[AgentId(0)].is_under_attack = false;
        assert!(sim.run_turn(&mut obs).is_ok());
    }

    #[test]
    fn destination_is_reserved_between_resolve_and_occupy() {
        let mut sim = sim_3x3(vec![looper(&[0, 1, 2])]);
        let mut obs = NoopObserver;

        sim.step(&mut obs).unwrap(); // CollectIntents pending
        sim.step(&mut obs).unwrap(); // Resolve pending
        sim.step(&mut obs).unwrap(); // Vacate pending; reservations placed
        assert_eq!(sim.board.occupant_or_incoming(CellId(1)), Some(AgentId(0)));

        sim.step(&mut obs).unwrap(); // Occupy pending; origin vacated
        assert!(sim.board.is_empty(CellId(0)));
        assert!(sim.roster[AgentId(0)].is_moving);

        sim.step(&mut obs).unwrap(); // Complete
        assert_eq!(sim.board.occupant_or_incoming(CellId(1)), Some(AgentId(0)));
        assert!(sim.board.reserved_by(CellId(1)).is_none());
        assert!(!sim.roster[AgentId(0)].is_moving);
    }
}

// ── Turn execution ────────────────────────────────────────────────────────────

#[cfg(test)]
mod turns {
    use super::*;

    #[test]
    fn loop_agent_advances_along_its_path_turn_by_turn() {
        let mut sim = sim_3x3(vec![looper(&[0, 1, 2])]);
        let mut obs = NoopObserver;

        let expected = [1u16, 2, 0, 1];
        for (i, &cell) in expected.iter().enumerate() {
            sim.run_turn(&mut obs).unwrap();
            assert_eq!(sim.roster[AgentId(0)].cell, CellId(cell), "turn {}", i + 1);
            assert_eq!(sim.board.occupant_or_incoming(CellId(cell)), Some(AgentId(0)));
        }
    }

    #[test]
    fn a_ring_of_agents_rotates_every_turn() {
        // 0 → 1 → 4 → 3 → 0 as two-cell loops closing the ring.
        let mut sim = sim_3x3(vec![
            looper(&[0, 1]),
            looper(&[1, 4]),
            looper(&[4, 3]),
            looper(&[3, 0]),
        ]);
        let mut rec = Recorder::default();

        sim.run_turn(&mut rec).unwrap();
        assert_eq!(sim.roster[AgentId(0)].cell, CellId(1));
        assert_eq!(sim.roster[AgentId(1)].cell, CellId(4));
        assert_eq!(sim.roster[AgentId(2)].cell, CellId(3));
        assert_eq!(sim.roster[AgentId(3)].cell, CellId(0));
        assert_eq!(rec.turns, vec![(Turn(0), 4)]);
    }

    #[test]
    fn blocked_agent_reports_and_holds_position() {
        let board = BoardBuilder::new(3, 3).unwrap().obstacle(CellId(1)).unwrap().build();
        let mut sim = SimBuilder::new(SimConfig::new(7, 10), board)
            .agent(looper(&[0, 1]))
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        sim.run_turn(&mut rec).unwrap();
        assert_eq!(sim.roster[AgentId(0)].cell, CellId(0));
        assert_eq!(rec.blocked, vec![AgentId(0)]);
        assert_eq!(rec.turns, vec![(Turn(0), 0)]);
        // A blocked turn does not advance the path cursor: the agent tries
        // the same cell again next turn.
        assert_eq!(sim.roster[AgentId(0)].progress.cursor, 0);
    }

    #[test]
    fn arriving_agent_displaces_plain_content() {
        let board = BoardBuilder::new(3, 3).unwrap()
            .content(CellId(1), ContentKind::Plain(2))
            .unwrap()
            .build();
        let mut sim = SimBuilder::new(SimConfig::new(7, 10), board)
            .agent(looper(&[0, 1]))
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        sim.run_turn(&mut rec).unwrap();
        assert_eq!(sim.roster[AgentId(0)].cell, CellId(1));
        assert_eq!(rec.content_removed, vec![(CellId(1), ContentKind::Plain(2))]);
        assert!(rec.agents_removed.is_empty());
    }

    #[test]
    fn stomping_special_content_destroys_a_lv1_agent() {
        let board = BoardBuilder::new(3, 3).unwrap()
            .content(CellId(1), ContentKind::Special)
            .unwrap()
            .build();
        let mut sim = SimBuilder::new(SimConfig::new(7, 10), board)
            .agent(looper(&[0, 1]))
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        sim.run_turn(&mut rec).unwrap();
        assert_eq!(rec.agents_removed, vec![(AgentId(0), CellId(1))]);
        assert!(sim.roster.is_empty());
        // Both the origin and the contested cell end the turn empty.
        assert!(sim.board.is_empty(CellId(0)));
        assert!(sim.board.is_empty(CellId(1)));
        assert!(sim.board.reserved_by(CellId(1)).is_none());
    }

    #[test]
    fn stomping_special_content_degrades_a_tougher_agent() {
        let board = BoardBuilder::new(3, 3).unwrap()
            .content(CellId(1), ContentKind::Special)
            .unwrap()
            .build();
        let mut sim = SimBuilder::new(SimConfig::new(7, 10), board)
            .agent(looper(&[0, 1]).with_kind(AgentKind::Lv2))
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        sim.run_turn(&mut rec).unwrap();
        assert_eq!(sim.roster[AgentId(0)].cell, CellId(1));
        assert_eq!(sim.roster[AgentId(0)].kind, AgentKind::Lv1);
        assert!(rec.agents_removed.is_empty());
        assert_eq!(rec.content_removed, vec![(CellId(1), ContentKind::Special)]);
    }

    #[test]
    fn same_seed_reproduces_a_run() {
        let walkers = || {
            vec![
                Agent::new(CellId(0), PathPolicy::random()),
                Agent::new(CellId(4), PathPolicy::random()),
                Agent::new(CellId(8), PathPolicy::random()),
            ]
        };
        let mut a = sim_3x3(walkers());
        let mut b = sim_3x3(walkers());
        a.run_turns(10, &mut NoopObserver).unwrap();
        b.run_turns(10, &mut NoopObserver).unwrap();

        for id in a.roster.ids() {
            assert_eq!(a.roster[id].cell, b.roster[id].cell);
        }
    }

    #[test]
    fn random_walkers_never_collide_over_many_turns() {
        for seed in 0..20u64 {
            let mut sim = SimBuilder::new(
                SimConfig::new(seed, 10),
                BoardBuilder::new(3, 3).unwrap().build(),
            )
            .agent(Agent::new(CellId(0), PathPolicy::random()))
            .agent(Agent::new(CellId(4), PathPolicy::random()))
            .agent(Agent::new(CellId(8), PathPolicy::random()))
            .build()
            .unwrap();
            sim.run(&mut NoopObserver).unwrap();

            let mut cells: Vec<CellId> =
                sim.roster.ids().map(|id| sim.roster[id].cell).collect();
            cells.sort_unstable();
            cells.dedup();
            assert_eq!(cells.len(), 3, "seed {seed}");
        }
    }
}

// ── Teardown ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod teardown {
    use super::*;

    #[test]
    fn mid_turn_teardown_leaves_a_consistent_board() {
        let mut sim = sim_3x3(vec![looper(&[0, 1, 2]), looper(&[4, 5])]);
        let mut obs = NoopObserver;

        // Stop after Vacate: origins cleared, reservations live, busy flags up.
        sim.step(&mut obs).unwrap();
        sim.step(&mut obs).unwrap();
        sim.step(&mut obs).unwrap();
        sim.step(&mut obs).unwrap();
        assert!(sim.roster[AgentId(0)].is_moving);

        sim.teardown();
        assert!(sim.roster.all_settled());
        assert_eq!(sim.phase(), TurnPhase::AwaitSettle);
        for cell in [1u16, 5] {
            assert!(sim.board.reserved_by(CellId(cell)).is_none());
        }
        for id in [AgentId(0), AgentId(1)] {
            assert!(sim.roster[id].next_cell.is_none());
        }
        // The next turn runs cleanly from the torn-down state.
        assert!(sim.run_turn(&mut obs).is_ok());
    }
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod placement {
    use super::*;

    #[test]
    fn tier_one_prefers_cells_beside_special_content() {
        let board = BoardBuilder::new(3, 3).unwrap()
            .content(CellId(4), ContentKind::Special)
            .unwrap()
            .build();
        let planner = PlacementPlanner::default();
        let mut rng = SimRng::new(9);

        // Pool mixes the four orthogonal neighbors of the special with the
        // four corners; only neighbors may win.
        for _ in 0..20 {
            let mut pool: Vec<CellId> =
                [0u16, 1, 2, 3, 5, 6, 7, 8].iter().map(|&c| CellId(c)).collect();
            let picked = planner
                .assign(&board, &mut pool, &PlacementRequest::default(), &mut rng)
                .unwrap();
            assert!([CellId(1), CellId(3), CellId(5), CellId(7)].contains(&picked));
            assert!(!pool.contains(&picked));
        }
    }

    #[test]
    fn tier_two_counts_matching_attributes() {
        // Cell 4's full neighborhood carries color 3; threshold 5 is met
        // there and nowhere else in the pool.
        let mut builder = BoardBuilder::new(3, 3).unwrap();
        for cell in [0u16, 1, 2, 3, 5] {
            builder = builder.content(CellId(cell), ContentKind::Plain(3)).unwrap();
        }
        let board = builder.build();
        let planner = PlacementPlanner::default();
        let mut rng = SimRng::new(9);

        let request = PlacementRequest { attribute: 3, last_cell: None };
        for _ in 0..20 {
            let mut pool = vec![CellId(4), CellId(6), CellId(7), CellId(8)];
            assert_eq!(planner.assign(&board, &mut pool, &request, &mut rng), Some(CellId(4)));
        }
    }

    #[test]
    fn tier_three_avoids_the_previous_cell() {
        let board = BoardBuilder::new(3, 3).unwrap().build();
        let planner = PlacementPlanner::default();
        let mut rng = SimRng::new(9);
        let request = PlacementRequest { attribute: 0, last_cell: Some(CellId(6)) };

        for _ in 0..20 {
            let mut pool = vec![CellId(6), CellId(7)];
            assert_eq!(planner.assign(&board, &mut pool, &request, &mut rng), Some(CellId(7)));
        }
    }

    #[test]
    fn last_tier_accepts_the_previous_cell_when_nothing_else_is_left() {
        let board = BoardBuilder::new(3, 3).unwrap().build();
        let planner = PlacementPlanner::default();
        let mut rng = SimRng::new(9);
        let request = PlacementRequest { attribute: 0, last_cell: Some(CellId(6)) };

        let mut pool = vec![CellId(6)];
        assert_eq!(planner.assign(&board, &mut pool, &request, &mut rng), Some(CellId(6)));
        assert!(pool.is_empty());
    }

    #[test]
    fn occupied_and_blocked_cells_never_qualify() {
        let mut board = BoardBuilder::new(3, 3).unwrap()
            .obstacle(CellId(1))
            .unwrap()
            .unstable(CellId(2))
            .unwrap()
            .build();
        board.place_agent(CellId(0), AgentId(0)).unwrap();
        let planner = PlacementPlanner::default();
        let mut rng = SimRng::new(9);

        let mut pool = vec![CellId(0), CellId(1), CellId(2)];
        assert_eq!(
            planner.assign(&board, &mut pool, &PlacementRequest::default(), &mut rng),
            None
        );
    }

    #[test]
    fn plan_consumes_the_pool_without_duplicates() {
        let board = BoardBuilder::new(3, 3).unwrap().build();
        let planner = PlacementPlanner::default();
        let mut rng = SimRng::new(9);
        let requests = vec![PlacementRequest::default(); 4];
        let pool: Vec<CellId> = (0..4).map(CellId).collect();

        let mut placed: Vec<CellId> = planner
            .plan(&board, pool, &requests, &mut rng)
            .into_iter()
            .flatten()
            .collect();
        placed.sort_unstable();
        placed.dedup();
        assert_eq!(placed.len(), 4);
    }

    #[test]
    fn replenish_tops_up_to_the_smaller_bound() {
        // Goal 10, cap 3, 1 on board: top up by 2.
        assert_eq!(replenish_count(1, 10, 3, 8), 2);
        // Goal below the cap binds instead.
        assert_eq!(replenish_count(1, 2, 3, 8), 1);
        // Already at or above the bound: nothing to add.
        assert_eq!(replenish_count(3, 10, 3, 8), 0);
        assert_eq!(replenish_count(5, 10, 3, 8), 0);
        // Open spawn cells cap the answer.
        assert_eq!(replenish_count(0, 10, 8, 2), 2);
    }
}
