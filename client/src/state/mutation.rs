use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Toggle,
    Delete,
}

/// `Pending → Confirmed | RolledBack`. Settled phases are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
    Pending,
    Confirmed,
    RolledBack,
}

/// An optimistic change that has been applied locally and sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub seq: u64,
    pub kind: MutationKind,
    /// For creates, the provisional id shown until the server assigns one.
    pub task_id: Uuid,
    phase: MutationPhase,
}

impl PendingMutation {
    pub fn new(seq: u64, kind: MutationKind, task_id: Uuid) -> Self {
        Self { seq, kind, task_id, phase: MutationPhase::Pending }
    }

    pub fn phase(&self) -> MutationPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == MutationPhase::Pending
    }

    /// Returns false if the mutation had already settled.
    pub fn confirm(&mut self) -> bool {
        self.settle(MutationPhase::Confirmed)
    }

    /// Returns false if the mutation had already settled.
    pub fn roll_back(&mut self) -> bool {
        self.settle(MutationPhase::RolledBack)
    }

    fn settle(&mut self, outcome: MutationPhase) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.phase = outcome;
        true
    }
}
