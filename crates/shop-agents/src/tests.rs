//! Unit tests for shop-agents.

#[cfg(test)]
mod support {
    use shop_core::{StationId, WorldPoint};
    use shop_world::{Navigator, PropHandle, PropKind, SceneFx};

    /// Records every cosmetic call so tests can assert on prop lifetimes and
    /// progress reporting.
    #[derive(Default)]
    pub struct RecordingFx {
        next_handle:  u64,
        pub live:     Vec<PropHandle>,
        pub spawned:  Vec<PropKind>,
        pub progress: Vec<(StationId, f32)>,
        pub hidden:   Vec<StationId>,
    }

    impl SceneFx for RecordingFx {
        fn spawn_prop(&mut self, kind: PropKind) -> Option<PropHandle> {
            let handle = PropHandle(self.next_handle);
            self.next_handle += 1;
            self.live.push(handle);
            self.spawned.push(kind);
            Some(handle)
        }

        fn despawn_prop(&mut self, handle: PropHandle) {
            self.live.retain(|&h| h != handle);
        }

        fn show_progress(&mut self, station: StationId, fraction: f32) {
            self.progress.push((station, fraction));
        }

        fn hide_progress(&mut self, station: StationId) {
            self.hidden.push(station);
        }
    }

    /// A navigator that drifts off its position every tick while it has no
    /// path, modelling collision nudges against a standing agent.
    pub struct DriftNav<N: Navigator> {
        pub inner: N,
        pub drift: f32,
    }

    impl<N: Navigator> Navigator for DriftNav<N> {
        fn position(&self) -> WorldPoint {
            self.inner.position()
        }
        fn set_destination(&mut self, pos: WorldPoint) {
            self.inner.set_destination(pos);
        }
        fn has_pending_path(&self) -> bool {
            self.inner.has_pending_path()
        }
        fn has_path(&self) -> bool {
            self.inner.has_path()
        }
        fn remaining_distance(&self) -> f32 {
            self.inner.remaining_distance()
        }
        fn stopping_distance(&self) -> f32 {
            self.inner.stopping_distance()
        }
        fn warp_to(&mut self, pos: WorldPoint) {
            self.inner.warp_to(pos);
        }
        fn stop(&mut self) {
            self.inner.stop();
        }
        fn advance(&mut self, dt: f32) {
            self.inner.advance(dt);
            if !self.inner.has_path() && !self.inner.has_pending_path() {
                let p = self.inner.position();
                self.inner.warp_to(WorldPoint::new(p.x + self.drift, p.z));
            }
        }
    }
}

#[cfg(test)]
mod customer {
    use shop_core::{CustomerId, SlotIndex, Tuning, WorldPoint};
    use shop_world::{LineNavFactory, NavigatorFactory};

    use super::support::{DriftNav, RecordingFx};
    use crate::{Customer, CustomerEvent, CustomerState};

    const DT: f32 = 0.1;

    const QUEUE: WorldPoint = WorldPoint { x: 0.0, z: 0.0 };
    const INTERACT: WorldPoint = WorldPoint { x: 0.0, z: -1.0 };
    const EXIT: WorldPoint = WorldPoint { x: 4.0, z: 4.0 };
    const SPAWN: WorldPoint = WorldPoint { x: -3.0, z: 2.0 };

    fn spawned_customer() -> (Customer<shop_world::LineNavigator>, RecordingFx, Tuning) {
        let mut fx = RecordingFx::default();
        let tuning = Tuning::default();
        let nav = LineNavFactory::instant().spawn(SPAWN);
        let mut c = Customer::new(CustomerId(0), SlotIndex(0), nav);
        c.assign_slot(QUEUE, INTERACT, EXIT, true, 0.0, &tuning, &mut fx);
        (c, fx, tuning)
    }

    #[test]
    fn reaches_slot_and_snaps_onto_anchor() {
        let (mut c, mut fx, tuning) = spawned_customer();
        assert_eq!(c.state(), CustomerState::MoveToQueue);

        let event = c.tick(DT as f64, DT, &tuning, &mut fx);
        assert_eq!(event, None);
        assert_eq!(c.state(), CustomerState::Waiting);
        assert!(c.is_waiting());
        assert_eq!(c.position(), QUEUE);
    }

    #[test]
    fn unassigned_customer_ticks_as_noop() {
        let mut fx = RecordingFx::default();
        let tuning = Tuning::default();
        let nav = LineNavFactory::instant().spawn(SPAWN);
        let mut c = Customer::new(CustomerId(0), SlotIndex(0), nav);

        for i in 0..5 {
            assert_eq!(c.tick(i as f64 * DT as f64, DT, &tuning, &mut fx), None);
        }
        assert_eq!(c.state(), CustomerState::MoveToQueue);
        assert_eq!(c.position(), SPAWN);
    }

    #[test]
    fn leave_before_assignment_is_noop() {
        let mut fx = RecordingFx::default();
        let tuning = Tuning::default();
        let nav = LineNavFactory::instant().spawn(SPAWN);
        let mut c = Customer::new(CustomerId(0), SlotIndex(0), nav);

        c.leave(0.0, &tuning, &mut fx);
        assert_eq!(c.state(), CustomerState::MoveToQueue);
    }

    #[test]
    fn waiting_customer_resnaps_after_drift() {
        let mut fx = RecordingFx::default();
        let tuning = Tuning::default();
        // Drift well past keep_snap_distance every tick.
        let nav = DriftNav { inner: LineNavFactory::instant().spawn(SPAWN), drift: 0.05 };
        let mut c = Customer::new(CustomerId(0), SlotIndex(0), nav);
        c.assign_slot(QUEUE, INTERACT, EXIT, true, 0.0, &tuning, &mut fx);

        c.tick(DT as f64, DT, &tuning, &mut fx);
        assert_eq!(c.state(), CustomerState::Waiting);

        // Every subsequent tick the nudge is undone by a re-snap.
        for i in 2..10 {
            c.tick(i as f64 * DT as f64, DT, &tuning, &mut fx);
            assert_eq!(c.position(), QUEUE);
        }
    }

    #[test]
    fn request_bubble_spawns_and_despawns() {
        let (mut c, mut fx, _tuning) = spawned_customer();

        c.show_request(shop_core::ProductId(3), &mut fx);
        assert!(c.has_request_visible());
        assert_eq!(c.requested_product(), Some(shop_core::ProductId(3)));
        assert_eq!(fx.live.len(), 1);

        // Replacing the request despawns the old bubble first.
        c.show_request(shop_core::ProductId(5), &mut fx);
        assert_eq!(fx.live.len(), 1);
        assert_eq!(c.requested_product(), Some(shop_core::ProductId(5)));

        c.hide_request(&mut fx);
        assert!(!c.has_request_visible());
        assert!(fx.live.is_empty());
    }

    #[test]
    fn exits_after_leave() {
        let (mut c, mut fx, tuning) = spawned_customer();
        c.tick(DT as f64, DT, &tuning, &mut fx);
        assert!(c.is_waiting());

        c.leave(0.2, &tuning, &mut fx);
        assert_eq!(c.state(), CustomerState::Leaving);
        assert!(!c.is_waiting());

        let event = c.tick(0.3, DT, &tuning, &mut fx);
        assert_eq!(event, Some(CustomerEvent::Exited));
    }
}

#[cfg(test)]
mod employee {
    use shop_core::{
        CounterLayout, CustomerId, ProductId, SimRng, SlotIndex, StationId, Tuning, WorldPoint,
    };
    use shop_dispatch::Dispatcher;
    use shop_world::{
        CashLedger, LineNavFactory, LineNavigator, NavigatorFactory, Station, StationRegistry,
    };

    use super::support::RecordingFx;
    use crate::{Customer, CustomerState, Delivery, Employee, EmployeeCtx, EmployeeState};

    const DT: f32 = 0.1;
    const HOME: WorldPoint = WorldPoint { x: 0.0, z: -2.0 };

    struct Harness {
        dispatcher: Dispatcher,
        pool:       crate::CustomerPool<LineNavigator>,
        registry:   StationRegistry,
        fx:         RecordingFx,
        ledger:     CashLedger,
        rng:        SimRng,
        tuning:     Tuning,
        unlocked:   Vec<ProductId>,
        ids:        Vec<CustomerId>,
        now:        f64,
    }

    impl Harness {
        fn new(unlocked: Vec<ProductId>) -> Self {
            let layout = CounterLayout {
                queue_anchors:    vec![
                    WorldPoint::new(0.0, 0.0),
                    WorldPoint::new(0.8, 0.0),
                ],
                interact_anchors: vec![
                    WorldPoint::new(0.0, -1.0),
                    WorldPoint::new(0.8, -1.0),
                ],
                spawn_point: WorldPoint::new(-3.0, 2.0),
                exit_point:  WorldPoint::new(4.0, 4.0),
                home_point:  HOME,
            };
            Self {
                dispatcher: Dispatcher::new(&layout, 5.0, 6).unwrap(),
                pool:       crate::CustomerPool::new(),
                registry:   StationRegistry::new(),
                fx:         RecordingFx::default(),
                ledger:     CashLedger::new(),
                rng:        SimRng::new(7),
                tuning:     Tuning::default(),
                unlocked,
                ids:        Vec::new(),
                now:        0.0,
            }
        }

        fn add_station(&mut self, product: ProductId, anchor: WorldPoint, gather_secs: f32, price: u32) -> StationId {
            self.registry.register(Station {
                id: StationId::INVALID,
                product,
                anchor,
                gather_secs,
                price,
            })
        }

        /// Spawn a customer straight into `Waiting` on `slot`.
        fn spawn_waiting(&mut self, slot: SlotIndex) -> CustomerId {
            let id = self.dispatcher.allocate_customer_id();
            self.dispatcher.bind(id, slot).unwrap();

            let nav = LineNavFactory::instant().spawn(self.dispatcher.spawn_point());
            let mut c = Customer::new(id, slot, nav);
            c.assign_slot(
                self.dispatcher.queue_anchor(slot).unwrap(),
                self.dispatcher.interact_anchor(slot).unwrap(),
                self.dispatcher.exit_point(),
                true,
                self.now,
                &self.tuning,
                &mut self.fx,
            );
            c.tick(self.now, DT, &self.tuning, &mut self.fx);
            assert!(c.is_waiting());

            self.pool.insert(c);
            self.ids.push(id);
            id
        }

        fn ctx(&mut self) -> EmployeeCtx<'_, LineNavigator, RecordingFx, CashLedger> {
            EmployeeCtx {
                now:        self.now,
                dt:         DT,
                tuning:     &self.tuning,
                unlocked:   &self.unlocked,
                dispatcher: &self.dispatcher,
                customers:  &mut self.pool,
                registry:   &self.registry,
                fx:         &mut self.fx,
                ledger:     &mut self.ledger,
                rng:        &mut self.rng,
            }
        }

        /// One tick: customers first, then the employee.
        fn step(&mut self, employee: &mut Employee<LineNavigator>) -> Option<Delivery> {
            self.now += DT as f64;
            let ids = self.ids.clone();
            for id in ids {
                if let Some(c) = self.pool.get_mut(id) {
                    c.tick(self.now, DT, &self.tuning, &mut self.fx);
                }
            }
            let mut ctx = self.ctx();
            employee.tick(&mut ctx)
        }

        fn run(&mut self, employee: &mut Employee<LineNavigator>, ticks: usize) -> Vec<Delivery> {
            let mut out = Vec::new();
            for _ in 0..ticks {
                if let Some(d) = self.step(employee) {
                    out.push(d);
                }
            }
            out
        }
    }

    fn employee() -> Employee<LineNavigator> {
        Employee::new(LineNavFactory::instant().spawn(HOME), HOME)
    }

    #[test]
    fn idle_with_nobody_waiting() {
        let mut h = Harness::new(vec![ProductId(0)]);
        h.add_station(ProductId(0), WorldPoint::new(5.0, 0.0), 0.3, 12);
        let mut e = employee();

        let deliveries = h.run(&mut e, 10);
        assert!(deliveries.is_empty());
        assert_eq!(e.state(), EmployeeState::IdleAtHome);
        assert_eq!(e.target_customer(), None);
        assert_eq!(h.ledger.balance(), 0);
    }

    #[test]
    fn idle_employee_walks_back_home() {
        let mut h = Harness::new(vec![ProductId(0)]);
        let mut e = Employee::new(
            LineNavFactory::instant().spawn(WorldPoint::new(3.0, 3.0)),
            HOME,
        );

        h.run(&mut e, 5);
        assert!(e.position().distance(HOME) <= h.tuning.near_home_distance);
    }

    #[test]
    fn targets_lowest_occupied_slot_first() {
        let mut h = Harness::new(vec![ProductId(0)]);
        h.add_station(ProductId(0), WorldPoint::new(5.0, 0.0), 0.3, 12);
        // Insertion order deliberately reversed; slot order must win.
        let back = h.spawn_waiting(SlotIndex(1));
        let front = h.spawn_waiting(SlotIndex(0));
        let mut e = employee();

        h.step(&mut e);
        assert_eq!(e.target_customer(), Some(front));
        assert_ne!(e.target_customer(), Some(back));
    }

    #[test]
    fn full_cycle_delivers_exactly_once() {
        let mut h = Harness::new(vec![ProductId(0)]);
        let station = h.add_station(ProductId(0), WorldPoint::new(5.0, 0.0), 0.3, 12);
        let customer = h.spawn_waiting(SlotIndex(0));
        let mut e = employee();

        let deliveries = h.run(&mut e, 30);
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0], Delivery {
            customer,
            station,
            product: ProductId(0),
            price:   12,
        });

        assert_eq!(h.ledger.balance(), 12);
        let c = h.pool.get(customer).unwrap();
        assert_eq!(c.state(), CustomerState::Leaving);
        assert!(!c.has_request_visible());

        // Bubble and carried item were both despawned.
        assert!(h.fx.live.is_empty());
        assert_eq!(h.fx.spawned.len(), 2);

        // Progress was shown at the station and hidden when gathering ended.
        assert!(h.fx.progress.iter().all(|&(s, f)| s == station && (0.0..=1.0).contains(&f)));
        assert_eq!(h.fx.hidden, vec![station]);

        assert_eq!(e.state(), EmployeeState::IdleAtHome);
    }

    #[test]
    fn gather_duration_reached_exactly_transitions_once() {
        let mut h = Harness::new(vec![ProductId(0)]);
        let station = h.add_station(ProductId(0), WorldPoint::new(5.0, 0.0), 0.3, 1);
        h.spawn_waiting(SlotIndex(0));
        let mut e = employee();

        // Walk the machine up to the first Gathering tick.
        while !matches!(e.state(), EmployeeState::Gathering { .. }) {
            h.step(&mut e);
        }

        // 0.3s at 0.1s/tick: two accumulating ticks, the third hits the
        // duration exactly and leaves the station.
        h.step(&mut e);
        h.step(&mut e);
        assert!(matches!(e.state(), EmployeeState::Gathering { .. }));
        h.step(&mut e);
        assert!(matches!(e.state(), EmployeeState::ReturnToCustomer { .. }));
        assert_eq!(h.fx.hidden, vec![station]);
    }

    #[test]
    fn missing_station_degrades_to_idle() {
        // No station registered at all.
        let mut h = Harness::new(vec![ProductId(9)]);
        h.spawn_waiting(SlotIndex(0));
        let mut e = employee();

        // GoToInteract → ActivateRequest → no station → fall back home.
        h.step(&mut e);
        h.step(&mut e);
        assert!(matches!(e.state(), EmployeeState::ActivateRequest { .. }));
        assert_eq!(h.step(&mut e), None);
        assert_eq!(e.state(), EmployeeState::IdleAtHome);

        // The customer is still waiting, so the employee keeps retrying, but
        // never reaches a station and never delivers.
        let deliveries = h.run(&mut e, 12);
        assert!(deliveries.is_empty());
        assert!(h.fx.progress.is_empty());
        assert_eq!(h.ledger.balance(), 0);
    }

    #[test]
    fn after_delivery_next_waiting_customer_is_taken() {
        let mut h = Harness::new(vec![ProductId(0)]);
        h.add_station(ProductId(0), WorldPoint::new(5.0, 0.0), 0.3, 8);
        let first = h.spawn_waiting(SlotIndex(0));
        let second = h.spawn_waiting(SlotIndex(1));
        let mut e = employee();

        // Step until the first delivery lands.
        let mut delivered = None;
        for _ in 0..30 {
            if let Some(d) = h.step(&mut e) {
                delivered = Some(d);
                break;
            }
        }
        assert_eq!(delivered.map(|d| d.customer), Some(first));

        // The employee rebinds to the second customer in the same tick.
        assert_eq!(e.target_customer(), Some(second));
        assert!(matches!(e.state(), EmployeeState::GoToInteract { .. }));

        // And eventually serves it too.
        let rest = h.run(&mut e, 30);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].customer, second);
        assert_eq!(h.ledger.balance(), 16);
    }
}
