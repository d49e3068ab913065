mod weapon_diff;
pub use weapon_diff::{diff_text, weapon_diff, DiffSign, WeaponDiff};
