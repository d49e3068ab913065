mod vector;
pub use vector::Vector3;

mod log_event;
pub use log_event::{ActionType, BattleLogEvent};

pub mod canonical;
pub use canonical::{CanonicalEvent, EventKind};

mod snapshot;
pub use snapshot::{reconstruct, BattleReplay, UnitSnapshot, Warning, EN_WARNING_THRESHOLD};

mod event_effect;
pub use event_effect::{turn_effects, EffectKind, EventEffect};

mod hp_band;
pub use hp_band::HpBand;
