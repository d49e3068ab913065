mod stat;
pub use stat::{find_stat, upgrade_stats, StatFormat, StatKey, UpgradeStat};

mod cost;
pub use cost::{clamp_pending_steps, max_affordable_steps, simulate_steps, step_cost, StepSimulation};

mod preview;
pub use preview::{total_pending_cost, BlockIndicator, UpgradePreview, TOTAL_BLOCKS};
