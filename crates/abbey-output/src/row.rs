//! Plain data row types written by output backends.

/// One brother's state at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub x:        i32,
    pub y:        i32,
    /// Name of the job being pursued; empty when idle.
    pub job:      String,
    /// Fraction of the job done, for effort-based jobs only.
    pub progress: Option<f32>,
    pub phase:    &'static str,
    pub hunger:   f32,
    pub energy:   f32,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub day:               u64,
    /// `HH:MM` wall-clock time.
    pub time_of_day:       String,
    pub moved:             u64,
    pub rejected_moves:    u64,
    pub working:           u64,
    pub idle:              u64,
    pub obligations_fired: u64,
    pub actions:           u64,
    pub pool_len:          u64,
}
