use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{PairTradeError, PairTradeResult};

/// One adjusted closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// An ordered adjusted-close series for a single instrument.
///
/// Construction enforces the input contract: non-empty, dates strictly
/// increasing (no duplicates), all prices finite and positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Ticker symbol
    pub symbol: String,
    /// Observations in date order
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a validated series from dated observations.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> PairTradeResult<Self> {
        let symbol = symbol.into();
        if points.is_empty() {
            return Err(PairTradeError::InputAlignment {
                reason: format!("price series '{}' is empty", symbol),
            });
        }
        for window in points.windows(2) {
            if window[1].date <= window[0].date {
                return Err(PairTradeError::InputAlignment {
                    reason: format!(
                        "price series '{}' dates not strictly increasing at {}",
                        symbol, window[1].date
                    ),
                });
            }
        }
        for p in &points {
            if !p.close.is_finite() || p.close <= 0.0 {
                return Err(PairTradeError::InputAlignment {
                    reason: format!(
                        "price series '{}' has non-positive or non-finite price at {}",
                        symbol, p.date
                    ),
                });
            }
        }
        Ok(Self { symbol, points })
    }

    /// Build a series from bare closes, assigning consecutive calendar days
    /// starting at `start`. Used for inline price input where no dates are
    /// supplied.
    pub fn from_closes(
        symbol: impl Into<String>,
        start: NaiveDate,
        closes: &[f64],
    ) -> PairTradeResult<Self> {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + Duration::days(i as i64),
                close,
            })
            .collect();
        Self::new(symbol, points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Keep only observations inside `[start, end]` (inclusive).
    pub fn clipped(&self, start: NaiveDate, end: NaiveDate) -> PairTradeResult<Self> {
        if end < start {
            return Err(PairTradeError::DateError(format!(
                "end date {} precedes start date {}",
                end, start
            )));
        }
        let points: Vec<PricePoint> = self
            .points
            .iter()
            .copied()
            .filter(|p| p.date >= start && p.date <= end)
            .collect();
        if points.is_empty() {
            return Err(PairTradeError::DataSource(format!(
                "'{}' has no observations between {} and {}",
                self.symbol, start, end
            )));
        }
        Ok(Self {
            symbol: self.symbol.clone(),
            points,
        })
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}

/// Two price series inner-joined on their common date index.
///
/// All downstream sequences (spread, z-score, signals, returns) are aligned
/// to `dates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub symbol_a: String,
    pub symbol_b: String,
    pub dates: Vec<NaiveDate>,
    pub closes_a: Vec<f64>,
    pub closes_b: Vec<f64>,
}

impl AlignedPair {
    /// Inner-join two validated series by date.
    ///
    /// Dates present in only one series are dropped; an empty intersection
    /// is an alignment error.
    pub fn align(a: &PriceSeries, b: &PriceSeries) -> PairTradeResult<Self> {
        let mut dates = Vec::new();
        let mut closes_a = Vec::new();
        let mut closes_b = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < a.points.len() && j < b.points.len() {
            let (pa, pb) = (&a.points[i], &b.points[j]);
            match pa.date.cmp(&pb.date) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dates.push(pa.date);
                    closes_a.push(pa.close);
                    closes_b.push(pb.close);
                    i += 1;
                    j += 1;
                }
            }
        }

        if dates.is_empty() {
            return Err(PairTradeError::InputAlignment {
                reason: format!(
                    "'{}' and '{}' share no common dates",
                    a.symbol, b.symbol
                ),
            });
        }

        Ok(Self {
            symbol_a: a.symbol.clone(),
            symbol_b: b.symbol.clone(),
            dates,
            closes_a,
            closes_b,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_series_rejects_empty() {
        assert!(PriceSeries::new("X", vec![]).is_err());
    }

    #[test]
    fn test_series_rejects_duplicate_dates() {
        let points = vec![
            PricePoint { date: d("2022-01-03"), close: 100.0 },
            PricePoint { date: d("2022-01-03"), close: 101.0 },
        ];
        assert!(PriceSeries::new("X", points).is_err());
    }

    #[test]
    fn test_series_rejects_backwards_dates() {
        let points = vec![
            PricePoint { date: d("2022-01-04"), close: 100.0 },
            PricePoint { date: d("2022-01-03"), close: 101.0 },
        ];
        assert!(PriceSeries::new("X", points).is_err());
    }

    #[test]
    fn test_series_rejects_non_finite_price() {
        let points = vec![
            PricePoint { date: d("2022-01-03"), close: 100.0 },
            PricePoint { date: d("2022-01-04"), close: f64::NAN },
        ];
        assert!(PriceSeries::new("X", points).is_err());
    }

    #[test]
    fn test_series_rejects_zero_price() {
        let points = vec![PricePoint { date: d("2022-01-03"), close: 0.0 }];
        assert!(PriceSeries::new("X", points).is_err());
    }

    #[test]
    fn test_from_closes_assigns_consecutive_days() {
        let s = PriceSeries::from_closes("X", d("2022-01-01"), &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s.points[0].date, d("2022-01-01"));
        assert_eq!(s.points[2].date, d("2022-01-03"));
        assert_eq!(s.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_clipped_filters_inclusive() {
        let s = PriceSeries::from_closes("X", d("2022-01-01"), &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let clipped = s.clipped(d("2022-01-02"), d("2022-01-03")).unwrap();
        assert_eq!(clipped.closes(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_clipped_empty_range_is_data_error() {
        let s = PriceSeries::from_closes("X", d("2022-01-01"), &[1.0, 2.0]).unwrap();
        let err = s.clipped(d("2023-01-01"), d("2023-02-01")).unwrap_err();
        assert!(matches!(err, PairTradeError::DataSource(_)));
    }

    #[test]
    fn test_clipped_inverted_range_is_date_error() {
        let s = PriceSeries::from_closes("X", d("2022-01-01"), &[1.0, 2.0]).unwrap();
        let err = s.clipped(d("2022-01-02"), d("2022-01-01")).unwrap_err();
        assert!(matches!(err, PairTradeError::DateError(_)));
    }

    #[test]
    fn test_align_inner_joins_on_dates() {
        let a = PriceSeries::new(
            "A",
            vec![
                PricePoint { date: d("2022-01-03"), close: 100.0 },
                PricePoint { date: d("2022-01-04"), close: 101.0 },
                PricePoint { date: d("2022-01-06"), close: 102.0 },
            ],
        )
        .unwrap();
        let b = PriceSeries::new(
            "B",
            vec![
                PricePoint { date: d("2022-01-04"), close: 50.0 },
                PricePoint { date: d("2022-01-05"), close: 51.0 },
                PricePoint { date: d("2022-01-06"), close: 52.0 },
            ],
        )
        .unwrap();

        let pair = AlignedPair::align(&a, &b).unwrap();
        assert_eq!(pair.dates, vec![d("2022-01-04"), d("2022-01-06")]);
        assert_eq!(pair.closes_a, vec![101.0, 102.0]);
        assert_eq!(pair.closes_b, vec![50.0, 52.0]);
    }

    #[test]
    fn test_align_disjoint_dates_fails() {
        let a = PriceSeries::from_closes("A", d("2022-01-01"), &[1.0, 2.0]).unwrap();
        let b = PriceSeries::from_closes("B", d("2022-06-01"), &[1.0, 2.0]).unwrap();
        let err = AlignedPair::align(&a, &b).unwrap_err();
        assert!(matches!(err, PairTradeError::InputAlignment { .. }));
    }
}
