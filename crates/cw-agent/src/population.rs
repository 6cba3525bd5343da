//! Per-kind agent collections.

use cw_core::{AgentId, KindId};

use crate::{Agent, KindSpec};

/// Which way a population is currently commuting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Heading from the home roads to the goal roads.
    #[default]
    ToGoal,
    /// Heading back to the home roads.
    ToHome,
}

impl Direction {
    #[inline]
    pub fn to_goal(self) -> bool {
        self == Direction::ToGoal
    }

    #[inline]
    pub fn toggled(self) -> Direction {
        match self {
            Direction::ToGoal => Direction::ToHome,
            Direction::ToHome => Direction::ToGoal,
        }
    }
}

/// All agents of one kind plus the kind's shared direction flag.
///
/// `agents[i].id == AgentId(i)` for every member.
#[derive(Debug, Clone)]
pub struct Population {
    pub kind: KindId,
    pub spec: KindSpec,
    pub agents: Vec<Agent>,
    pub direction: Direction,
}

impl Population {
    pub fn new(kind: KindId, spec: KindSpec) -> Self {
        Self {
            kind,
            spec,
            agents: Vec::new(),
            direction: Direction::ToGoal,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// The id the next pushed agent will receive.
    pub fn next_id(&self) -> AgentId {
        AgentId(self.agents.len() as u32)
    }

    /// Append an agent, assigning it the next dense id.
    pub fn push(&mut self, mut agent: Agent) -> AgentId {
        let id = self.next_id();
        agent.id = id;
        agent.kind = self.kind;
        self.agents.push(agent);
        id
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    /// `true` if every member has reached its destination (vacuously true
    /// for an empty population).
    pub fn all_arrived(&self) -> bool {
        self.agents.iter().all(|a| a.reached_destination)
    }

    /// Number of members that have reached their destination.
    pub fn arrived_count(&self) -> usize {
        self.agents.iter().filter(|a| a.reached_destination).count()
    }

    /// Reverse the direction of the whole population.
    pub fn flip(&mut self) {
        self.direction = self.direction.toggled();
        for agent in &mut self.agents {
            agent.flip();
        }
    }
}
