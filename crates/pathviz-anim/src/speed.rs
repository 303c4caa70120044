use std::fmt;
use std::time::Duration;

/// Playback speed on a 1 (slowest) to 5 (fastest) scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Speed(u8);

// (visited ms, path ms, label), indexed by level − 1.
const TABLE: [(u64, u64, &str); 5] = [
    (50, 100, "Slow"),
    (25, 50, "Medium"),
    (10, 25, "Normal"),
    (5, 10, "Fast"),
    (1, 5, "Very Fast"),
];

impl Speed {
    pub const MIN: Speed = Speed(1);
    pub const MAX: Speed = Speed(5);

    /// Returns `None` unless `level` is in `1..=5`.
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN.0 && level <= Self::MAX.0 {
            Some(Speed(level))
        } else {
            None
        }
    }

    #[inline]
    pub const fn level(self) -> u8 {
        self.0
    }

    #[inline]
    const fn row(self) -> (u64, u64, &'static str) {
        TABLE[(self.0 - 1) as usize]
    }

    /// Delay between two visited-cell reveals.
    pub const fn visited_delay(self) -> Duration {
        Duration::from_millis(self.row().0)
    }

    /// Delay between two path-cell reveals.
    pub const fn path_delay(self) -> Duration {
        Duration::from_millis(self.row().1)
    }

    pub const fn label(self) -> &'static str {
        self.row().2
    }

    /// One step faster, saturating at [`Speed::MAX`].
    pub const fn faster(self) -> Self {
        if self.0 < Self::MAX.0 { Speed(self.0 + 1) } else { self }
    }

    /// One step slower, saturating at [`Speed::MIN`].
    pub const fn slower(self) -> Self {
        if self.0 > Self::MIN.0 { Speed(self.0 - 1) } else { self }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(3)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.0)
    }
}

/// A speed level outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSpeed(pub u8);

impl fmt::Display for InvalidSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "speed must be between 1 and 5, got {}", self.0)
    }
}

impl std::error::Error for InvalidSpeed {}

impl TryFrom<u8> for Speed {
    type Error = InvalidSpeed;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Speed::new(level).ok_or(InvalidSpeed(level))
    }
}

impl From<Speed> for u8 {
    fn from(s: Speed) -> u8 {
        s.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(Speed::new(0), None);
        assert_eq!(Speed::new(6), None);
        assert_eq!(Speed::new(1), Some(Speed::MIN));
        assert_eq!(Speed::try_from(9), Err(InvalidSpeed(9)));
    }

    #[test]
    fn delays_match_table() {
        let s = Speed::default();
        assert_eq!(s.level(), 3);
        assert_eq!(s.visited_delay(), Duration::from_millis(10));
        assert_eq!(s.path_delay(), Duration::from_millis(25));
        assert_eq!(s.label(), "Normal");
        assert_eq!(Speed::MAX.visited_delay(), Duration::from_millis(1));
        assert_eq!(Speed::MIN.path_delay(), Duration::from_millis(100));
    }

    #[test]
    fn delays_decrease_with_level() {
        let mut s = Speed::MIN;
        while s != Speed::MAX {
            let next = s.faster();
            assert!(next.visited_delay() < s.visited_delay());
            assert!(next.path_delay() < s.path_delay());
            s = next;
        }
    }

    #[test]
    fn steps_saturate() {
        assert_eq!(Speed::MAX.faster(), Speed::MAX);
        assert_eq!(Speed::MIN.slower(), Speed::MIN);
        assert_eq!(Speed::default().slower().level(), 2);
        assert_eq!(Speed::MAX.to_string(), "Very Fast (5)");
    }
}
