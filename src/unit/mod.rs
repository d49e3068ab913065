mod unit_state;
pub use unit_state::UnitInitialState;

mod suit_stats;
pub use suit_stats::SuitStats;

mod weapon;
pub use weapon::Weapon;

/// `max_en` を持たない機体に仮定する最大EN。
pub const DEFAULT_MAX_EN: u32 = 1000;
