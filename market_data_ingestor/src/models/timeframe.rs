use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeFrameError {
    #[error("Invalid amount for {:?}: {}", unit, message)]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },

    #[error("Invalid input: {}", message)]
    InvalidInput { message: String },
}

/// Bar interval unit.
///
/// Only end-of-day granularities are modelled; adjusted closing prices are not
/// meaningful for intraday bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrameUnit {
    Day,
    Week,
    Month,
}

/// The sampling interval of a bar series (amount × unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub fn new(amount: u32, unit: TimeFrameUnit) -> Result<Self, TimeFrameError> {
        Self::validate(amount, unit)?;
        Ok(Self { amount, unit })
    }

    /// One bar per trading day.
    pub fn day() -> Self {
        Self {
            amount: 1,
            unit: TimeFrameUnit::Day,
        }
    }

    pub fn week() -> Self {
        Self {
            amount: 1,
            unit: TimeFrameUnit::Week,
        }
    }

    pub fn months(amount: u32) -> Result<Self, TimeFrameError> {
        Self::new(amount, TimeFrameUnit::Month)
    }

    fn validate(amount: u32, unit: TimeFrameUnit) -> Result<(), TimeFrameError> {
        match unit {
            TimeFrameUnit::Day | TimeFrameUnit::Week if amount != 1 => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Day and Week units can only be used with amount 1".into(),
                })
            }
            TimeFrameUnit::Month if ![1, 2, 3, 6, 12].contains(&amount) => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Month units can only be used with amount 1, 2, 3, 6 and 12".into(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for TimeFrame {
    fn default() -> Self {
        Self::day()
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            TimeFrameUnit::Day => "d",
            TimeFrameUnit::Week => "w",
            TimeFrameUnit::Month => "mo",
        };
        write!(f, "{}{}", self.amount, unit)
    }
}

/// Parses compact interval strings such as `1d`, `1w`, `3mo`.
impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TimeFrameError::InvalidInput {
                message: format!("missing timeframe unit in '{s}'"),
            })?;
        let (amount, unit) = s.split_at(split);
        let amount = if amount.is_empty() {
            1
        } else {
            amount.parse::<u32>().map_err(|e| TimeFrameError::InvalidInput {
                message: format!("invalid timeframe amount '{amount}': {e}"),
            })?
        };
        let unit = match unit {
            "d" | "day" => TimeFrameUnit::Day,
            "w" | "wk" | "week" => TimeFrameUnit::Week,
            "mo" | "month" => TimeFrameUnit::Month,
            _ => {
                return Err(TimeFrameError::InvalidInput {
                    message: format!("Invalid timeframe unit: {unit}"),
                });
            }
        };
        Self::new(amount, unit)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_valid_day_timeframe() {
        let tf = TimeFrame::new(1, TimeFrameUnit::Day);
        assert!(tf.is_ok());
        assert_eq!(tf.unwrap(), TimeFrame::day());
    }

    #[test]
    fn test_valid_month_timeframes() {
        for amount in [1, 2, 3, 6, 12] {
            let tf = TimeFrame::months(amount);
            assert!(tf.is_ok(), "Month with amount {} should be valid", amount);
        }
    }

    #[test]
    fn test_invalid_day_and_week_timeframe() {
        assert!(TimeFrame::new(2, TimeFrameUnit::Day).is_err());
        assert!(TimeFrame::new(2, TimeFrameUnit::Week).is_err());
    }

    #[test]
    fn test_invalid_month_timeframe() {
        for amount in [0, 4, 5, 7, 13] {
            assert!(
                TimeFrame::months(amount).is_err(),
                "Month with amount {} should be invalid",
                amount
            );
        }
    }

    #[test]
    fn test_parse_compact_strings() {
        assert_eq!("1d".parse::<TimeFrame>().unwrap(), TimeFrame::day());
        assert_eq!("wk".parse::<TimeFrame>().unwrap(), TimeFrame::week());
        assert_eq!(
            "3mo".parse::<TimeFrame>().unwrap(),
            TimeFrame::months(3).unwrap()
        );
        assert!("5m".parse::<TimeFrame>().is_err());
        assert!("12".parse::<TimeFrame>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let tf = TimeFrame::months(6).unwrap();
        assert_eq!(tf.to_string(), "6mo");
        assert_eq!(tf.to_string().parse::<TimeFrame>().unwrap(), tf);
    }

    #[test]
    fn test_error_messages() {
        match TimeFrame::new(2, TimeFrameUnit::Week) {
            Err(TimeFrameError::InvalidAmount { unit, message }) => {
                assert_eq!(unit, TimeFrameUnit::Week);
                assert!(message.contains("Day and Week"));
            }
            _ => panic!("Expected InvalidAmount error"),
        }
    }
}
