/// フロントエンドとの境界でやり取りする型を定義する。
/// このモジュールで公開される構造体は、シリアライズ/デシリアライズ可能でなければならない。
/// また、それらのメソッドは単なるゲッターに限定し、原則的にロジックを含めてはならない。
pub use crate::battle::{
    ActionType, BattleLogEvent, EffectKind, EventEffect, HpBand, UnitSnapshot, Vector3, Warning,
};
pub use crate::garage::{DiffSign, WeaponDiff};
pub use crate::rank::{Rank, RankTable};
pub use crate::unit::{SuitStats, UnitInitialState, Weapon};
pub use crate::upgrade::{BlockIndicator, StatKey, StepSimulation, UpgradePreview, UpgradeStat};
