//! Unit tests for gb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, CellId};

    #[test]
    fn index_cast() {
        assert_eq!(AgentId(42).index(), 42);
        assert_eq!(CellId(9).index(), 9);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(CellId(100) > CellId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(CellId::INVALID.0, u16::MAX);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(CellId::default(), CellId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(CellId(3).to_string(), "CellId(3)");
    }
}

#[cfg(test)]
mod turn {
    use crate::{Turn, TurnClock};

    #[test]
    fn offset() {
        assert_eq!(Turn(10).offset(3), Turn(13));
    }

    #[test]
    fn clock_advances() {
        let mut clock = TurnClock::new();
        assert_eq!(clock.current_turn, Turn::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_turn, Turn(2));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1000);
            let b: u32 = r2.gen_range(0..1000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u32 = r0.gen_range(0..u32::MAX);
        let b: u32 = r1.gen_range(0..u32::MAX);
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn choose_is_uniform_enough() {
        // Over many draws every element of a small slice should come up.
        let mut rng = SimRng::new(7);
        let items = [0usize, 1, 2, 3];
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[*rng.choose(&items).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn child_streams_diverge() {
        let mut root = SimRng::new(99);
        let mut a = root.child(1);
        let mut b = root.child(2);
        let x: u64 = a.gen_range(0..u64::MAX);
        let y: u64 = b.gen_range(0..u64::MAX);
        assert_ne!(x, y);
    }
}
