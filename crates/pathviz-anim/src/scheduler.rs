use std::time::{Duration, Instant};

use pathviz_core::{Context, Pos};
use pathviz_search::{Outcome, SearchResult, path_cost};

use crate::speed::Speed;
use crate::timeline::Timeline;

// ---------------------------------------------------------------------------
// Playback plan
// ---------------------------------------------------------------------------

/// Everything one run will reveal, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    pub visited: Vec<Pos>,
    pub path: Vec<Pos>,
    pub outcome: Outcome,
}

impl Playback {
    fn finish(&self) -> Finish {
        match self.outcome {
            Outcome::Found => Finish::Found {
                steps: path_cost(&self.path),
            },
            Outcome::Unreachable => Finish::Unreachable,
        }
    }
}

impl From<&SearchResult> for Playback {
    fn from(res: &SearchResult) -> Self {
        Self {
            visited: res.visited.clone(),
            path: res.path(),
            outcome: res.outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// Ticks and states
// ---------------------------------------------------------------------------

/// How a run reported its end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Finish {
    Found { steps: usize },
    Unreachable,
}

/// One scheduled playback event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Reveal a finalised cell.
    Visit(Pos),
    /// Reveal a cell of the reconstructed route.
    PathStep(Pos),
    /// Final event of a run that was not stopped.
    Finished(Finish),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Visited,
    Path,
}

/// Why the scheduler went back to idle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Complete,
    Unreachable,
    Cancelled,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// Nothing has run yet.
    #[default]
    Idle,
    Running(Phase),
    /// Idle after a run.
    Done(Ending),
}

impl State {
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, State::Running(_))
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Timed, cancellable playback of a [`Playback`].
///
/// The scheduler never sleeps or spawns: a driver calls [`poll`](Self::poll)
/// with the current instant and receives every tick that has come due, in
/// order. Each run gets a fresh [`Context`]; cancelling it (through
/// [`stop`](Self::stop) or a clone obtained from
/// [`context`](Self::context)) guarantees no further tick of that run is
/// emitted.
#[derive(Debug, Default)]
pub struct Scheduler {
    timeline: Timeline<Tick>,
    state: State,
    started: Option<Instant>,
    ctx: Context,
    revealed: usize,
    total: usize,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `playback` starting at `now`.
    ///
    /// Visited reveal `i` fires at `i × visited_delay`; the path phase begins
    /// once every visited cell has been revealed and path reveal `j` fires
    /// `j × path_delay` after that. Returns `false` if a run is already in
    /// progress.
    pub fn start(&mut self, playback: Playback, speed: Speed, now: Instant) -> bool {
        if self.state.is_running() {
            log::debug!("scheduler: start rejected, already running");
            return false;
        }
        self.timeline.clear();
        self.ctx = Context::new();

        let vd = speed.visited_delay();
        let pd = speed.path_delay();
        let mut last = Duration::ZERO;
        for (i, &p) in playback.visited.iter().enumerate() {
            last = vd * i as u32;
            self.timeline.push(Tick::Visit(p), last);
        }
        if playback.outcome == Outcome::Found {
            let phase_start = vd * playback.visited.len() as u32;
            for (j, &p) in playback.path.iter().enumerate() {
                last = phase_start + pd * j as u32;
                self.timeline.push(Tick::PathStep(p), last);
            }
        }
        // Same offset as the last reveal, pushed later so it fires after it.
        self.timeline.push(Tick::Finished(playback.finish()), last);

        self.total = match playback.outcome {
            Outcome::Found => playback.visited.len() + playback.path.len(),
            Outcome::Unreachable => playback.visited.len(),
        };
        self.revealed = 0;
        self.started = Some(now);
        self.state = State::Running(Phase::Visited);
        log::debug!(
            "scheduler: playing {} reveals at {speed}, outcome {:?}",
            self.total,
            playback.outcome
        );
        true
    }

    /// Emit every tick due at `now`, in order.
    ///
    /// The run's token is checked before each tick; a cancelled run emits
    /// nothing further and the scheduler goes idle.
    pub fn poll(&mut self, now: Instant) -> Vec<Tick> {
        let mut out = Vec::new();
        let (State::Running(_), Some(started)) = (self.state, self.started) else {
            return out;
        };
        let elapsed = now.saturating_duration_since(started);
        loop {
            if self.ctx.is_done() {
                self.halt();
                break;
            }
            let Some(tick) = self.timeline.pop_due(elapsed) else {
                break;
            };
            match tick {
                Tick::Visit(_) => self.revealed += 1,
                Tick::PathStep(_) => {
                    self.revealed += 1;
                    self.state = State::Running(Phase::Path);
                }
                Tick::Finished(finish) => {
                    let ending = match finish {
                        Finish::Found { .. } => Ending::Complete,
                        Finish::Unreachable => Ending::Unreachable,
                    };
                    self.state = State::Done(ending);
                    self.started = None;
                    self.timeline.clear();
                    log::debug!("scheduler: finished, {finish:?}");
                }
            }
            out.push(tick);
            if !self.state.is_running() {
                break;
            }
        }
        out
    }

    /// Cancel the current run and drop every pending tick.
    ///
    /// Idempotent; does nothing when no run is in progress.
    pub fn stop(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.ctx.cancel();
        self.halt();
    }

    fn halt(&mut self) {
        let pending = self.timeline.len();
        self.timeline.clear();
        self.started = None;
        self.state = State::Done(Ending::Cancelled);
        log::debug!(
            "scheduler: cancelled after {}/{} reveals, dropped {pending} ticks",
            self.revealed,
            self.total
        );
    }

    /// When the next tick comes due, if a run is in progress.
    pub fn next_deadline(&self) -> Option<Instant> {
        let started = self.started?;
        if self.ctx.is_done() {
            return None;
        }
        self.timeline.peek_offset().map(|at| started + at)
    }

    /// A clone of the current run's cancellation token.
    pub fn context(&self) -> Context {
        self.ctx.clone()
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.state.is_running()
    }

    /// `(revealed, total)` reveals of the current or last run.
    pub fn progress(&self) -> (usize, usize) {
        (self.revealed, self.total)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Grid;
    use pathviz_search::{Algorithm, search};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn corridor() -> Playback {
        let grid = Grid::from_ascii("S.E").unwrap();
        Playback::from(&search(Algorithm::Bfs, &grid).unwrap())
    }

    fn unreachable() -> Playback {
        let grid = Grid::from_ascii("S.#E").unwrap();
        Playback::from(&search(Algorithm::Bfs, &grid).unwrap())
    }

    #[test]
    fn ticks_follow_schedule() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        assert!(s.start(corridor(), Speed::default(), t0));
        assert_eq!(s.state(), State::Running(Phase::Visited));

        // Visited at 0, 10, 20; path at 30, 55, 80 (speed 3: 10ms / 25ms).
        assert_eq!(s.poll(t0), vec![Tick::Visit(Pos::new(0, 0))]);
        assert_eq!(s.poll(t0 + ms(9)), vec![]);
        assert_eq!(
            s.poll(t0 + ms(20)),
            vec![Tick::Visit(Pos::new(0, 1)), Tick::Visit(Pos::new(0, 2))]
        );
        assert_eq!(s.next_deadline(), Some(t0 + ms(30)));
        assert_eq!(s.poll(t0 + ms(30)), vec![Tick::PathStep(Pos::new(0, 0))]);
        assert_eq!(s.state(), State::Running(Phase::Path));
        assert_eq!(s.poll(t0 + ms(55)), vec![Tick::PathStep(Pos::new(0, 1))]);
        assert_eq!(
            s.poll(t0 + ms(80)),
            vec![
                Tick::PathStep(Pos::new(0, 2)),
                Tick::Finished(Finish::Found { steps: 2 })
            ]
        );
        assert_eq!(s.state(), State::Done(Ending::Complete));
        assert_eq!(s.progress(), (6, 6));
        assert!(s.poll(t0 + ms(1000)).is_empty());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn late_poll_preserves_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let plan = corridor();
        s.start(plan.clone(), Speed::MIN, t0);
        let ticks = s.poll(t0 + Duration::from_secs(10));
        let mut expected: Vec<Tick> = plan.visited.iter().map(|&p| Tick::Visit(p)).collect();
        expected.extend(plan.path.iter().map(|&p| Tick::PathStep(p)));
        expected.push(Tick::Finished(Finish::Found { steps: 2 }));
        assert_eq!(ticks, expected);
    }

    #[test]
    fn unreachable_skips_path_phase() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(unreachable(), Speed::default(), t0);
        let ticks = s.poll(t0 + ms(10));
        assert_eq!(
            ticks,
            vec![
                Tick::Visit(Pos::new(0, 0)),
                Tick::Visit(Pos::new(0, 1)),
                Tick::Finished(Finish::Unreachable)
            ]
        );
        assert_eq!(s.state(), State::Done(Ending::Unreachable));
        assert_eq!(s.progress(), (2, 2));
    }

    #[test]
    fn stop_drops_pending_ticks() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(corridor(), Speed::default(), t0);
        assert_eq!(s.poll(t0 + ms(10)).len(), 2);
        s.stop();
        assert_eq!(s.state(), State::Done(Ending::Cancelled));
        assert!(s.is_idle());
        assert!(s.poll(t0 + Duration::from_secs(10)).is_empty());
        assert_eq!(s.progress(), (2, 6));
        s.stop();
        assert_eq!(s.state(), State::Done(Ending::Cancelled));
    }

    #[test]
    fn external_cancel_is_honoured() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.start(corridor(), Speed::default(), t0);
        let token = s.context();
        token.cancel();
        assert!(s.poll(t0 + Duration::from_secs(1)).is_empty());
        assert_eq!(s.state(), State::Done(Ending::Cancelled));
    }

    #[test]
    fn start_rejected_while_running_but_allowed_after_stop() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        assert!(s.start(corridor(), Speed::default(), t0));
        assert!(!s.start(unreachable(), Speed::default(), t0));
        let old = s.context();
        s.stop();
        assert!(s.start(unreachable(), Speed::MAX, t0 + ms(5)));
        assert!(old.is_done());
        assert!(!s.context().is_done());
        // Only the new run's ticks come out.
        let ticks = s.poll(t0 + ms(100));
        assert_eq!(ticks.last(), Some(&Tick::Finished(Finish::Unreachable)));
        assert_eq!(ticks.len(), 3);
    }

    #[test]
    fn dropping_cancels_token() {
        let mut s = Scheduler::new();
        s.start(corridor(), Speed::default(), Instant::now());
        let token = s.context();
        drop(s);
        assert!(token.is_done());
    }

    #[test]
    fn poll_before_start_is_empty() {
        let mut s = Scheduler::new();
        assert!(s.poll(Instant::now()).is_empty());
        assert_eq!(s.state(), State::Idle);
        s.stop();
        assert_eq!(s.state(), State::Idle);
    }
}
