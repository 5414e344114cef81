//! Serialized simulation driver.
//!
//! A [`Simulation`] supplies `setup` and `go` procedures over a
//! [`Model`]. [`Runner`] owns one simulation behind a single mutex, so
//! every entry point (stepping, snapshots, ad hoc model access) runs one
//! at a time even when called from several threads.
//!
//! ```text
//! caller(s)                 Runner
//!     |--setup()------------>| sim.setup(), history <- snapshot
//!     |--step()------------->| sim.go(), model.tick(), history <- snapshot
//!     |--run(&cancel)------->| loop { cancelled? stop()? max_ticks?
//!     |                      |        step; sleep(period - elapsed) }
//!     |--history(tick)------>| bounded ring of recent snapshots
//! ```

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use patchwork_core::TickId;

use crate::config::{ConfigError, RunnerConfig};
use crate::error::ModelError;
use crate::model::Model;
use crate::snapshot::WorldSnapshot;

// ── Simulation ──────────────────────────────────────────────────

/// A model plus the procedures that drive it.
pub trait Simulation {
    /// Build the initial population. Called once before stepping, and
    /// again to restart.
    fn setup(&mut self) -> Result<(), ModelError>;

    /// Advance the simulation by one step. The runner advances the tick
    /// counter afterwards.
    fn go(&mut self) -> Result<(), ModelError>;

    /// The driven model.
    fn model(&self) -> &Model;

    /// The driven model, mutably.
    fn model_mut(&mut self) -> &mut Model;

    /// Whether the simulation has reached its end condition.
    fn stop(&self) -> bool {
        false
    }

    /// Named statistics to report, such as population counts.
    fn stats(&self) -> Vec<(String, f64)> {
        Vec::new()
    }
}

// ── Errors and reports ──────────────────────────────────────────

/// Errors from [`Runner`] operations.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The runner configuration is invalid.
    Config(ConfigError),
    /// [`Simulation::setup`] failed.
    Setup(ModelError),
    /// [`Simulation::go`] failed.
    Step(ModelError),
    /// Stepping was requested before a successful setup.
    NotSetUp,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Setup(e) => write!(f, "setup failed: {e}"),
            Self::Step(e) => write!(f, "step failed: {e}"),
            Self::NotSetUp => write!(f, "simulation has not been set up"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Setup(e) | Self::Step(e) => Some(e),
            Self::NotSetUp => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Why [`Runner::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The cancellation flag was raised.
    Cancelled,
    /// [`Simulation::stop`] returned `true`.
    Finished,
    /// The configured tick limit was reached.
    TickLimit,
}

/// Summary of one [`Runner::run`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Steps taken during this run.
    pub steps: u64,
    /// Tick counter when the run ended.
    pub final_tick: TickId,
    /// Why the run ended.
    pub reason: StopReason,
}

// ── Runner ──────────────────────────────────────────────────────

struct RunnerState<S> {
    sim: S,
    set_up: bool,
    history: VecDeque<WorldSnapshot>,
}

/// Drives a [`Simulation`] with every call serialized behind one lock.
pub struct Runner<S> {
    state: Mutex<RunnerState<S>>,
    config: RunnerConfig,
}

impl<S: Simulation> Runner<S> {
    /// Wrap `sim` after validating `config`.
    pub fn new(sim: S, config: RunnerConfig) -> Result<Self, RunError> {
        config.validate()?;
        Ok(Self {
            state: Mutex::new(RunnerState {
                sim,
                set_up: false,
                history: VecDeque::with_capacity(config.history_capacity),
            }),
            config,
        })
    }

    /// The runner configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, RunnerState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, state: &mut RunnerState<S>) {
        if state.history.len() == self.config.history_capacity {
            state.history.pop_front();
        }
        state.history.push_back(state.sim.model().snapshot());
    }

    /// Run the simulation's setup and start a fresh history.
    pub fn setup(&self) -> Result<(), RunError> {
        let mut state = self.lock();
        state.set_up = false;
        state.sim.setup().map_err(RunError::Setup)?;
        state.set_up = true;
        state.history.clear();
        self.record(&mut state);
        log::debug!("simulation set up at tick {}", state.sim.model().ticks());
        Ok(())
    }

    /// Run one `go` and advance the tick counter. Returns the new tick.
    pub fn step(&self) -> Result<TickId, RunError> {
        let mut state = self.lock();
        self.step_locked(&mut state)
    }

    fn step_locked(&self, state: &mut RunnerState<S>) -> Result<TickId, RunError> {
        if !state.set_up {
            return Err(RunError::NotSetUp);
        }
        state.sim.go().map_err(RunError::Step)?;
        state.sim.model_mut().tick();
        self.record(state);
        Ok(state.sim.model().tick_id())
    }

    /// Step repeatedly until cancelled, finished, or at the tick limit.
    ///
    /// `cancel` is checked before every step. With a tick rate set, each
    /// step is scheduled `1 / tick_rate_hz` seconds after the previous
    /// one; a slow step is not made up for.
    pub fn run(&self, cancel: &AtomicBool) -> Result<RunReport, RunError> {
        let period = self.config.tick_rate_hz.map(|hz| Duration::from_secs_f64(1.0 / hz));
        log::info!(
            "run started: rate {:?} Hz, limit {:?} ticks",
            self.config.tick_rate_hz,
            self.config.max_ticks
        );
        let mut steps = 0u64;
        let reason = loop {
            if cancel.load(Ordering::Acquire) {
                break StopReason::Cancelled;
            }
            if self.config.max_ticks.is_some_and(|max| steps >= max) {
                break StopReason::TickLimit;
            }
            let started = Instant::now();
            {
                let mut state = self.lock();
                if state.sim.stop() {
                    break StopReason::Finished;
                }
                self.step_locked(&mut state)?;
            }
            steps += 1;
            if let Some(period) = period {
                let elapsed = started.elapsed();
                if elapsed < period {
                    thread::sleep(period - elapsed);
                }
            }
        };
        let final_tick = self.lock().sim.model().tick_id();
        log::info!("run stopped after {steps} steps at tick {final_tick}: {reason:?}");
        Ok(RunReport {
            steps,
            final_tick,
            reason,
        })
    }

    /// Whether setup has completed.
    pub fn is_set_up(&self) -> bool {
        self.lock().set_up
    }

    /// A fresh snapshot of the current state.
    pub fn snapshot(&self) -> WorldSnapshot {
        self.lock().sim.model().snapshot()
    }

    /// The most recently recorded snapshot.
    pub fn latest(&self) -> Option<WorldSnapshot> {
        self.lock().history.back().cloned()
    }

    /// The recorded snapshot for `tick`, if still retained.
    pub fn history(&self, tick: TickId) -> Option<WorldSnapshot> {
        self.lock()
            .history
            .iter()
            .rev()
            .find(|s| s.tick == tick)
            .cloned()
    }

    /// Number of retained snapshots.
    pub fn history_len(&self) -> usize {
        self.lock().history.len()
    }

    /// The simulation's current statistics.
    pub fn stats(&self) -> Vec<(String, f64)> {
        self.lock().sim.stats()
    }

    /// Read the model under the lock.
    pub fn with_model<R>(&self, f: impl FnOnce(&Model) -> R) -> R {
        f(self.lock().sim.model())
    }

    /// Mutate the simulation under the lock.
    pub fn with_simulation<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.lock().sim)
    }

    /// Give back the simulation.
    pub fn into_inner(self) -> S {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;

    struct Walkers {
        model: Model,
        limit: Option<usize>,
        fail_at: Option<u64>,
    }

    impl Walkers {
        fn new() -> Self {
            Self {
                model: Model::new(ModelConfig::default().seed(7)).unwrap(),
                limit: None,
                fail_at: None,
            }
        }
    }

    impl Simulation for Walkers {
        fn setup(&mut self) -> Result<(), ModelError> {
            self.model.clear_all();
            self.model.create_turtles(5, "")?;
            Ok(())
        }

        fn go(&mut self) -> Result<(), ModelError> {
            if self.fail_at == Some(self.model.ticks()) {
                return Err(ModelError::ZeroLengthHeading);
            }
            let all = self.model.turtles().clone();
            self.model.try_ask(&all, |m, t| m.forward(t, 1.0))?;
            if self.limit.is_some() {
                self.model.create_turtles(1, "")?;
            }
            Ok(())
        }

        fn model(&self) -> &Model {
            &self.model
        }

        fn model_mut(&mut self) -> &mut Model {
            &mut self.model
        }

        fn stop(&self) -> bool {
            self.limit.is_some_and(|n| self.model.turtle_count() >= n)
        }

        fn stats(&self) -> Vec<(String, f64)> {
            vec![("turtles".into(), self.model.turtle_count() as f64)]
        }
    }

    fn unpaced(max_ticks: Option<u64>) -> RunnerConfig {
        RunnerConfig {
            tick_rate_hz: None,
            max_ticks,
            history_capacity: 4,
        }
    }

    // ── Lifecycle tests ─────────────────────────────────────────

    #[test]
    fn step_requires_setup() {
        let runner = Runner::new(Walkers::new(), unpaced(None)).unwrap();
        assert_eq!(runner.step(), Err(RunError::NotSetUp));
        runner.setup().unwrap();
        assert_eq!(runner.step(), Ok(TickId(1)));
        assert_eq!(runner.stats(), vec![("turtles".to_string(), 5.0)]);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = RunnerConfig {
            history_capacity: 0,
            ..RunnerConfig::default()
        };
        assert!(matches!(
            Runner::new(Walkers::new(), cfg),
            Err(RunError::Config(ConfigError::HistoryCapacityZero))
        ));
    }

    #[test]
    fn step_error_propagates() {
        let mut sim = Walkers::new();
        sim.fail_at = Some(2);
        let runner = Runner::new(sim, unpaced(None)).unwrap();
        runner.setup().unwrap();
        runner.step().unwrap();
        runner.step().unwrap();
        assert_eq!(runner.step(), Err(RunError::Step(ModelError::ZeroLengthHeading)));
        assert_eq!(runner.with_model(|m| m.ticks()), 2);
    }

    // ── History tests ───────────────────────────────────────────

    #[test]
    fn history_is_bounded() {
        let runner = Runner::new(Walkers::new(), unpaced(None)).unwrap();
        runner.setup().unwrap();
        for _ in 0..6 {
            runner.step().unwrap();
        }
        assert_eq!(runner.history_len(), 4);
        assert!(runner.history(TickId(0)).is_none());
        assert_eq!(runner.history(TickId(5)).unwrap().tick, TickId(5));
        assert_eq!(runner.latest().unwrap(), runner.snapshot());
    }

    // ── Run loop tests ──────────────────────────────────────────

    #[test]
    fn run_stops_at_tick_limit() {
        let runner = Runner::new(Walkers::new(), unpaced(Some(10))).unwrap();
        runner.setup().unwrap();
        let report = runner.run(&AtomicBool::new(false)).unwrap();
        assert_eq!(report.steps, 10);
        assert_eq!(report.final_tick, TickId(10));
        assert_eq!(report.reason, StopReason::TickLimit);
    }

    #[test]
    fn run_honours_stop_condition() {
        let mut sim = Walkers::new();
        sim.limit = Some(8);
        let runner = Runner::new(sim, unpaced(Some(100))).unwrap();
        runner.setup().unwrap();
        let report = runner.run(&AtomicBool::new(false)).unwrap();
        assert_eq!(report.reason, StopReason::Finished);
        assert_eq!(report.steps, 3);
    }

    #[test]
    fn run_checks_cancel_first() {
        let runner = Runner::new(Walkers::new(), unpaced(None)).unwrap();
        runner.setup().unwrap();
        let report = runner.run(&AtomicBool::new(true)).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(report.reason, StopReason::Cancelled);
    }

    #[test]
    fn cancel_from_another_thread() {
        let cfg = RunnerConfig {
            tick_rate_hz: Some(200.0),
            max_ticks: None,
            history_capacity: 2,
        };
        let runner = Runner::new(Walkers::new(), cfg).unwrap();
        runner.setup().unwrap();
        let cancel = AtomicBool::new(false);
        let report = thread::scope(|s| {
            let handle = s.spawn(|| runner.run(&cancel));
            thread::sleep(Duration::from_millis(50));
            assert!(runner.with_model(|m| m.turtle_count()) == 5);
            cancel.store(true, Ordering::Release);
            handle.join().unwrap()
        })
        .unwrap();
        assert_eq!(report.reason, StopReason::Cancelled);
        assert!(report.steps >= 1);
    }

    #[test]
    fn into_inner_returns_simulation() {
        let runner = Runner::new(Walkers::new(), unpaced(None)).unwrap();
        runner.setup().unwrap();
        runner.step().unwrap();
        let sim = runner.into_inner();
        assert_eq!(sim.model().ticks(), 1);
    }
}
