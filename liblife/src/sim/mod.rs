use std::{
    sync::{
        Arc, RwLock, Weak,
        mpsc::{self, Receiver, Sender},
    },
    time::Duration,
};

use crate::{Life, grid::Grid, pos::Position, rule::Rule};
use ticker::TickerHost;

pub mod ticker;

/// Period between generations while the simulation is running.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEvent {
    GridUpdated,
    StateChanged(SimulationState),
}

/// Owns the live grid and drives it while running.
///
/// Handles are cheap to clone and every clone operates on the same
/// simulation. All mutation goes through methods that check the state inside
/// the write lock, so the ticker thread and user intents cannot race: an
/// edit rejected because the simulation is running was rejected atomically,
/// and a tick that loses the race against `stop` observes Stopped and leaves
/// the grid alone.
#[derive(Clone)]
pub struct SimulationController {
    shared: Arc<RwLock<Shared>>,
    tick_interval: Duration,
}

struct Shared {
    life: Life,
    state: SimulationState,
    ticker: Option<TickerHost>,
    observers: Vec<Sender<SimulationEvent>>,
}

impl SimulationController {
    pub fn new(size: usize) -> anyhow::Result<Self> {
        Self::with_tick_interval(size, TICK_INTERVAL)
    }

    pub fn with_tick_interval(size: usize, tick_interval: Duration) -> anyhow::Result<Self> {
        let shared = Shared {
            life: Life::new(Grid::new(size)?, Rule::default()),
            state: SimulationState::Stopped,
            ticker: None,
            observers: Vec::new(),
        };

        Ok(Self {
            shared: Arc::new(RwLock::new(shared)),
            tick_interval,
        })
    }

    pub fn state(&self) -> SimulationState {
        self.shared.read().unwrap().state
    }

    pub fn with_grid<R>(&self, f: impl FnOnce(&Grid) -> R) -> R {
        f(&self.shared.read().unwrap().life.grid)
    }

    /// Events are delivered for every grid replacement and state change;
    /// receivers that have gone away are dropped on the next emission.
    pub fn subscribe(&self) -> Receiver<SimulationEvent> {
        let (sender, receiver) = mpsc::channel();
        self.shared.write().unwrap().observers.push(sender);
        receiver
    }

    /// Starts the periodic generation loop. A no-op returning false while
    /// already running; in particular it never starts a second ticker.
    pub fn run(&self) -> bool {
        let mut shared = self.shared.write().unwrap();

        if shared.state == SimulationState::Running {
            return false;
        }

        shared.state = SimulationState::Running;
        shared.ticker = Some(self.start_ticker());
        shared.notify(SimulationEvent::StateChanged(SimulationState::Running));

        true
    }

    /// Halts the generation loop. Once this returns, no further tick can
    /// mutate the grid or emit an event. A no-op returning false while
    /// already stopped.
    pub fn stop(&self) -> bool {
        let mut shared = self.shared.write().unwrap();

        if shared.state == SimulationState::Stopped {
            return false;
        }

        shared.state = SimulationState::Stopped;
        let ticker = shared.ticker.take();
        shared.notify(SimulationEvent::StateChanged(SimulationState::Stopped));
        drop(shared);

        // A tick that already woke up re-checks the state under the write
        // lock; the stop message only spares the thread one more sleep cycle.
        if let Some(ticker) = ticker {
            ticker.stop();
        }

        true
    }

    /// Replaces the grid with a fresh random field. Rejected while running.
    pub fn randomize(&self) -> bool {
        let mut shared = self.shared.write().unwrap();

        if shared.state == SimulationState::Running {
            return false;
        }

        shared.life.grid = shared.life.grid.randomized();
        shared.notify(SimulationEvent::GridUpdated);

        true
    }

    /// Flips a single cell. Rejected while running or out of bounds.
    pub fn toggle_cell<P>(&self, pos: P) -> bool
    where
        P: Into<Position>,
    {
        let mut shared = self.shared.write().unwrap();

        if shared.state == SimulationState::Running {
            return false;
        }

        if shared.life.grid.toggle(pos).is_none() {
            return false;
        }

        shared.notify(SimulationEvent::GridUpdated);

        true
    }

    fn start_ticker(&self) -> TickerHost {
        let shared = Arc::downgrade(&self.shared);

        TickerHost::start(self.tick_interval, Box::new(move || tick(&shared)))
    }
}

fn tick(shared: &Weak<RwLock<Shared>>) -> bool {
    // The controller may have been dropped out from under its ticker.
    let Some(shared) = shared.upgrade() else {
        return false;
    };

    let mut shared = shared.write().unwrap();

    if shared.state != SimulationState::Running {
        return false;
    }

    shared.life.advance();
    shared.notify(SimulationEvent::GridUpdated);

    true
}

impl Shared {
    fn notify(&mut self, event: SimulationEvent) {
        self.observers.retain(|observer| observer.send(event).is_ok());
    }
}
