//! Fluent builder for constructing a [`Sim`].

use shop_agents::{CustomerPool, Employee};
use shop_core::{CounterLayout, SimClock, SimConfig, SimRng};
use shop_dispatch::Dispatcher;
use shop_world::{
    CashLedger, Ledger, LineNavFactory, NavigatorFactory, NoopFx, SceneFx, Station,
    StationRegistry,
};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<F, X, L>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — seed, spawn interval, tick duration, tuning, …
/// - [`CounterLayout`] — queue/interact anchors, spawn/exit/home points
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                           |
/// |------------------|-----------------------------------|
/// | `.stations(v)`   | No stations (nothing deliverable) |
/// | `.navigator(f)`  | [`LineNavFactory::walking()`]     |
/// | `.scene_fx(x)`   | [`NoopFx`]                        |
/// | `.ledger(l)`     | [`CashLedger`]                    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, layout)
///     .stations(load_stations_csv("stations.csv")?)
///     .build()?;
/// sim.run_ticks(10_000, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<F: NavigatorFactory, X: SceneFx, L: Ledger> {
    config:      SimConfig,
    layout:      CounterLayout,
    stations:    Vec<Station>,
    nav_factory: F,
    fx:          X,
    ledger:      L,
}

impl SimBuilder<LineNavFactory, NoopFx, CashLedger> {
    /// Create a builder with all required inputs and default collaborators.
    pub fn new(config: SimConfig, layout: CounterLayout) -> Self {
        Self {
            config,
            layout,
            stations:    Vec::new(),
            nav_factory: LineNavFactory::walking(),
            fx:          NoopFx,
            ledger:      CashLedger::new(),
        }
    }
}

impl<F: NavigatorFactory, X: SceneFx, L: Ledger> SimBuilder<F, X, L> {
    /// Supply the service stations, in registration order.
    ///
    /// Registration order is the tie-break order of the nearest-station
    /// query; ids are reassigned to match it.
    pub fn stations(mut self, stations: Vec<Station>) -> Self {
        self.stations = stations;
        self
    }

    /// Swap in a different locomotion engine.
    pub fn navigator<F2: NavigatorFactory>(self, factory: F2) -> SimBuilder<F2, X, L> {
        SimBuilder {
            config:      self.config,
            layout:      self.layout,
            stations:    self.stations,
            nav_factory: factory,
            fx:          self.fx,
            ledger:      self.ledger,
        }
    }

    /// Swap in a scene effects sink (facing, props, progress rings).
    pub fn scene_fx<X2: SceneFx>(self, fx: X2) -> SimBuilder<F, X2, L> {
        SimBuilder {
            config:      self.config,
            layout:      self.layout,
            stations:    self.stations,
            nav_factory: self.nav_factory,
            fx,
            ledger:      self.ledger,
        }
    }

    /// Swap in a different economy ledger.
    pub fn ledger<L2: Ledger>(self, ledger: L2) -> SimBuilder<F, X, L2> {
        SimBuilder {
            config:      self.config,
            layout:      self.layout,
            stations:    self.stations,
            nav_factory: self.nav_factory,
            fx:          self.fx,
            ledger,
        }
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    ///
    /// The employee starts standing at the layout's home point with no
    /// customers present; the first spawn attempt happens one full spawn
    /// interval into the run.
    pub fn build(self) -> SimResult<Sim<F, X, L>> {
        self.config.validate()?;

        let dispatcher = Dispatcher::new(
            &self.layout,
            self.config.spawn_interval_secs,
            self.config.max_customers,
        )?;

        let mut registry = StationRegistry::new();
        for station in self.stations {
            registry.register(station);
        }

        let employee = Employee::new(
            self.nav_factory.spawn(self.layout.home_point),
            self.layout.home_point,
        );

        Ok(Sim {
            clock: SimClock::new(),
            rng: SimRng::new(self.config.seed),
            config: self.config,
            dispatcher,
            customers: CustomerPool::new(),
            employee,
            registry,
            nav_factory: self.nav_factory,
            fx: self.fx,
            ledger: self.ledger,
        })
    }
}
