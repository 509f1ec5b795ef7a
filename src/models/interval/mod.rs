// Interval module
// Half-open time intervals and the endpoint ordering used by every layout decision

use chrono::NaiveDateTime;
use std::cmp::Ordering;

use crate::utils::date::minutes_since_epoch;

/// One end of an interval, located on the minute axis.
///
/// Endpoints order by `location`; on a tie an end point sorts before a
/// start point, so `[5,10)` and `[10,15)` never overlap and a zero-length
/// boundary is never counted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndPoint {
    pub location: i64,
    pub is_end: bool,
}

impl EndPoint {
    pub fn start(location: i64) -> Self {
        Self {
            location,
            is_end: false,
        }
    }

    pub fn end(location: i64) -> Self {
        Self {
            location,
            is_end: true,
        }
    }
}

impl Ord for EndPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.location
            .cmp(&other.location)
            .then_with(|| other.is_end.cmp(&self.is_end))
    }
}

impl PartialOrd for EndPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Half-open interval `[start, end)` on the minute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: EndPoint,
    pub end: EndPoint,
}

impl Interval {
    /// Build an interval from raw minute locations. Inverted bounds are swapped.
    pub fn new(start: i64, end: i64) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        Self {
            start: EndPoint::start(start),
            end: EndPoint::end(end),
        }
    }

    pub fn from_datetimes(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(minutes_since_epoch(start), minutes_since_epoch(end))
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if `location` falls inside `[start, end)`.
    pub fn contains(&self, location: i64) -> bool {
        self.start.location <= location && location < self.end.location
    }

    pub fn length(&self) -> i64 {
        self.end.location - self.start.location
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_sorts_before_start_at_same_location() {
        assert!(EndPoint::end(10) < EndPoint::start(10));
        assert!(EndPoint::start(9) < EndPoint::end(10));
    }

    #[test]
    fn test_back_to_back_intervals_do_not_overlap() {
        let a = Interval::new(5, 10);
        let b = Interval::new(10, 15);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_partial_overlap_is_symmetric() {
        let a = Interval::new(0, 60);
        let b = Interval::new(30, 90);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_zero_length_slots_at_same_instant_do_not_overlap() {
        let a = Interval::new(10, 10);
        let b = Interval::new(10, 10);
        assert!(!a.overlaps(&b));
        assert!(a.is_empty());
    }

    #[test]
    fn test_zero_length_inside_longer_interval_overlaps() {
        let point = Interval::new(20, 20);
        let span = Interval::new(10, 30);
        assert!(point.overlaps(&span));
    }

    #[test]
    fn test_inverted_bounds_are_swapped() {
        let interval = Interval::new(30, 10);
        assert_eq!(interval.start.location, 10);
        assert_eq!(interval.end.location, 30);
        assert_eq!(interval.length(), 20);
    }

    #[test]
    fn test_contains_is_half_open() {
        let interval = Interval::new(10, 20);
        assert!(interval.contains(10));
        assert!(interval.contains(19));
        assert!(!interval.contains(20));
    }
}
