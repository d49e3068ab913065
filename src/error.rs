use thiserror::Error;

/// 静的な設定テーブルの検証エラー。
/// テーブルは初回利用時に一度だけ検証され、呼び出しごとには再検証しない。
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("{table}: thresholds must be strictly descending ({upper} then {lower})")]
    ThresholdOrder {
        table: &'static str,
        upper: f64,
        lower: f64,
    },
    #[error("{table}: lowest threshold must be 0 (got {min})")]
    ThresholdFloor { table: &'static str, min: f64 },
    #[error("{stat}: {field} must be positive (got {value})")]
    NonPositive {
        stat: &'static str,
        field: &'static str,
        value: f64,
    },
}
