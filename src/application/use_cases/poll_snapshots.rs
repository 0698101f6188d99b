use crate::application::dashboard::{ChartProjection, DashboardState, PollOutcome, PollTicket};
use crate::config::DashboardConfig;
use crate::domain::{
    chart::{DeviceClass, PointerInput},
    gex::{Currency, SnapshotRepository},
    logging::LogComponent,
};
use crate::log_info;
use gloo::timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

/// Use Case: keep the dashboard fed with snapshots and route user input.
///
/// Polls overlap freely; the dashboard's ticket check decides which
/// response is allowed to land.
pub struct PollSnapshotsUseCase<R> {
    repository: Rc<R>,
    state: Rc<RefCell<DashboardState>>,
    on_change: Rc<dyn Fn(ChartProjection)>,
}

impl<R> Clone for PollSnapshotsUseCase<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Rc::clone(&self.repository),
            state: Rc::clone(&self.state),
            on_change: Rc::clone(&self.on_change),
        }
    }
}

impl<R> PollSnapshotsUseCase<R>
where
    R: SnapshotRepository + 'static,
{
    pub fn new(repository: Rc<R>, state: Rc<RefCell<DashboardState>>, on_change: Rc<dyn Fn(ChartProjection)>) -> Self {
        Self { repository, state, on_change }
    }

    pub fn state(&self) -> Rc<RefCell<DashboardState>> {
        Rc::clone(&self.state)
    }

    /// Issue a poll and wait for its response.
    pub async fn poll_once(&self) -> PollOutcome {
        let ticket = self.state.borrow_mut().begin_poll();
        self.notify();
        self.resolve(ticket).await
    }

    /// Fetch for an already issued ticket and hand the result to the dashboard.
    pub async fn resolve(&self, ticket: PollTicket) -> PollOutcome {
        let result = self.repository.fetch_snapshot(ticket.currency()).await;
        let outcome = self.state.borrow_mut().complete_poll(ticket, result);
        if outcome != PollOutcome::Stale {
            self.notify();
        }
        outcome
    }

    /// Fire-and-forget poll on the browser event loop
    pub fn spawn_poll(&self) {
        let this = self.clone();
        spawn_local(async move {
            this.poll_once().await;
        });
    }

    /// Poll now, then every `interval_ms`. Dropping the handle stops the timer.
    pub fn start(&self, interval_ms: u32) -> Interval {
        log_info!(LogComponent::Application("PollSnapshots"), "polling every {} ms", interval_ms);
        self.spawn_poll();
        let this = self.clone();
        Interval::new(interval_ms, move || this.spawn_poll())
    }

    /// Manual refresh; goes through the same stale guard as scheduled polls.
    pub fn refresh(&self) {
        self.spawn_poll();
    }

    pub fn select_currency(&self, currency: Currency) {
        let changed = self.state.borrow_mut().select_currency(currency);
        if changed {
            self.notify();
            self.spawn_poll();
        }
    }

    pub fn handle_input(&self, input: PointerInput) -> bool {
        let changed = self.state.borrow_mut().handle_input(input);
        if changed {
            self.notify();
        }
        changed
    }

    /// Surface resized; may switch device class and tick density.
    pub fn reclassify_surface(&self, config: &DashboardConfig, device_class: DeviceClass) {
        let before = self.state.borrow().gestures().device_class();
        if before == device_class {
            return;
        }
        self.state.borrow_mut().reclassify_surface(config, device_class);
        log_info!(LogComponent::Application("PollSnapshots"), "surface {} -> {}", before, device_class);
        self.notify();
    }

    pub fn notify(&self) {
        let projection = self.state.borrow().projection();
        (self.on_change)(projection);
    }
}
