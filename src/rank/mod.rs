mod threshold;
pub use threshold::{rank_progress, RankTable};

use serde::{Deserialize, Serialize};

/// ステータス値の格付け。表示専用で、フロントエンドが永続化することはない。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    S,
    A,
    B,
    C,
    D,
    E,
}

impl Rank {
    /// 上限値に対する割合から格付けする。名前付きの閾値テーブルを持たないステータス向け。
    pub fn by_ratio(value: f64, cap: f64) -> Self {
        if cap <= 0.0 {
            return Rank::D;
        }
        let ratio = value / cap;
        if ratio >= 0.9 {
            Rank::S
        } else if ratio >= 0.7 {
            Rank::A
        } else if ratio >= 0.5 {
            Rank::B
        } else if ratio >= 0.3 {
            Rank::C
        } else {
            Rank::D
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rank::S => "S",
            Rank::A => "A",
            Rank::B => "B",
            Rank::C => "C",
            Rank::D => "D",
            Rank::E => "E",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_buckets() {
        assert_eq!(Rank::by_ratio(1.8, 2.0), Rank::S);
        assert_eq!(Rank::by_ratio(1.4, 2.0), Rank::A);
        assert_eq!(Rank::by_ratio(5.0, 10.0), Rank::B);
        assert_eq!(Rank::by_ratio(3.0, 10.0), Rank::C);
        assert_eq!(Rank::by_ratio(0.5, 10.0), Rank::D);
        assert_eq!(Rank::by_ratio(5.0, 0.0), Rank::D);
    }

    #[test]
    fn serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Rank::B).unwrap(), "\"B\"");
        assert_eq!(Rank::S.to_string(), "S");
    }
}
