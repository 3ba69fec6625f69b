use std::time::Duration;

use crate::TabId;

/// Side effects the host must execute on behalf of the mediator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ObserveTab(TabId),
    UnobserveTab(TabId),
    /// Deliver `Msg::SimulatorTick { generation }` after `delay`.
    ScheduleSimulatorTick { generation: u64, delay: Duration },
    /// Drop the pending simulator tick, if any.
    CancelSimulatorTick,
}
