//! Binning statistics.

use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;
use core::time::Duration;
#[cfg(feature = "std")]
use std::time::Instant;

/// Collects and accumulates binning statistics.
///
/// One assignment pass yields one `Stats` value; values for consecutive
/// frames can be summed with `+=` to aggregate over a whole run.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Time spent assigning.
    ///
    /// Only measured if the `std` feature is enabled; zero otherwise.
    pub time: Duration,
    /// Number of frames assigned.
    pub frames: usize,
    /// Triangles processed / triangles recorded into at least one cell.
    pub tris: Throughput,
    /// Candidate triangle–cell pairs examined / pairs recorded.
    pub pairs: Throughput,
    /// Pairs lost because the cell was already at capacity.
    ///
    /// A nonzero count means some triangles are missing from some cells'
    /// index lists and the frame is visually incomplete.
    pub dropped: usize,

    #[cfg(feature = "std")]
    start: Option<Instant>,
}

/// An input/output pair of counts.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Throughput {
    /// Count of items considered.
    pub i: usize,
    /// Count of items that passed.
    pub o: usize,
}

impl Stats {
    /// Creates a new zeroed `Stats` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Stats` instance that records the time of its creation.
    ///
    /// Call [`finish`][Self::finish] to write the elapsed time to
    /// `self.time`. Equivalent to [`Stats::new`] if the `std` feature is
    /// not enabled.
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            start: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Stops the timer and records the elapsed time to `self.time`.
    ///
    /// No-op if the timer was not running. This method is also no-op
    /// unless the `std` feature is enabled.
    pub fn finish(self) -> Self {
        Self {
            #[cfg(feature = "std")]
            time: self.start.map(|st| st.elapsed()).unwrap_or(self.time),
            ..self
        }
    }
}

impl AddAssign for Stats {
    /// Appends the stats of `other` to `self`.
    fn add_assign(&mut self, other: Self) {
        self.time += other.time;
        self.frames += other.frames;
        self.tris += other.tris;
        self.pairs += other.pairs;
        self.dropped += other.dropped;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, rhs: Self) {
        self.i += rhs.i;
        self.o += rhs.o;
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let w = f.width().unwrap_or(12);
        writeln!(f, " BINS    {:>w$}", "IN / OUT")?;
        writeln!(f, " time    {:>w$}", human_time(self.time))?;
        writeln!(f, " frames  {:>w$}", self.frames)?;
        writeln!(f, " tris    {:>w$}", self.tris)?;
        writeln!(f, " pairs   {:>w$}", self.pairs)?;
        writeln!(f, " dropped {:>w$}", self.dropped)
    }
}

impl Display for Throughput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let w = f.width().unwrap_or(0);
        let &Self { i, o } = self;
        let digits = |mut n: usize| {
            let mut d = 1;
            while n >= 10 {
                n /= 10;
                d += 1;
            }
            d
        };
        let pad = (digits(i) + digits(o) + 3).max(w);
        write!(f, "{:>pad$}", "", pad = pad - digits(i) - digits(o) - 3)?;
        write!(f, "{i} / {o}")
    }
}

fn human_time(d: Duration) -> HumanTime {
    HumanTime(d)
}

struct HumanTime(Duration);

impl Display for HumanTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs_f32();
        let w = f.width().unwrap_or(0);
        if secs < 1e-3 {
            write!(f, "{:>w$.1}μs", secs * 1_000_000.0)
        } else if secs < 1.0 {
            write!(f, "{:>w$.1}ms", secs * 1_000.0)
        } else {
            write!(f, "{:>w$.1}s", secs)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn accumulation() {
        let mut total = Stats::new();
        let frame = Stats {
            frames: 1,
            tris: Throughput { i: 10, o: 8 },
            pairs: Throughput { i: 40, o: 30 },
            dropped: 2,
            ..Stats::default()
        };
        total += frame.clone();
        total += frame;

        assert_eq!(total.frames, 2);
        assert_eq!(total.tris, Throughput { i: 20, o: 16 });
        assert_eq!(total.pairs, Throughput { i: 80, o: 60 });
        assert_eq!(total.dropped, 4);
    }

    #[test]
    fn throughput_display() {
        let tp = Throughput { i: 1234, o: 56 };
        assert_eq!(format!("{tp}"), "1234 / 56");
        assert_eq!(format!("{tp:12}"), "   1234 / 56");
    }

    #[test]
    fn stats_display() {
        let stats = Stats {
            frames: 3,
            tris: Throughput { i: 100, o: 90 },
            pairs: Throughput { i: 400, o: 321 },
            dropped: 0,
            ..Stats::default()
        };
        let s = format!("{stats}");
        assert!(s.contains("tris"));
        assert!(s.contains("100 / 90"));
        assert!(s.contains("400 / 321"));
        assert!(s.contains("dropped"));
    }
}
