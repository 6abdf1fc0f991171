//! Drives an [`ExplorerController`] against real collaborators.
//!
//! Location requests run inline. Route fetches run on the rayon pool and
//! post their tagged responses to a channel, so they can come back in any
//! order; the planner drops the ones that no longer match.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::explorer::ExplorerController;
use crate::planner::Command;
use crate::route::{RouteData, RouteFetchError, RouteRequest};
use crate::traits::{LocationProvider, RouteProvider};

/// A routing response tagged with the request it answers.
#[derive(Debug)]
pub struct RouteResponse {
    pub request: RouteRequest,
    pub result: Result<Vec<RouteData>, RouteFetchError>,
}

pub struct Session<L, R> {
    controller: ExplorerController,
    locator: L,
    router: Arc<R>,
    tx: Sender<RouteResponse>,
    rx: Receiver<RouteResponse>,
}

impl<L, R> Session<L, R>
where
    L: LocationProvider,
    R: RouteProvider + Send + Sync + 'static,
{
    pub fn new(controller: ExplorerController, locator: L, router: R) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            controller,
            locator,
            router: Arc::new(router),
            tx,
            rx,
        }
    }

    pub fn controller(&self) -> &ExplorerController {
        &self.controller
    }

    /// Runs `action` on the controller and carries out the commands it returns.
    pub fn update<F>(&mut self, action: F)
    where
        F: FnOnce(&mut ExplorerController) -> Vec<Command>,
    {
        let commands = action(&mut self.controller);
        self.dispatch(commands);
    }

    /// Applies every route response that has already arrived.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(response) = self.rx.try_recv() {
            if self.apply(response) {
                applied += 1;
            }
        }
        applied
    }

    /// Blocks until no fetch is pending or `timeout` elapses. Returns false on timeout.
    pub fn wait_for_routes(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.controller.planner().is_fetching() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(response) => {
                    self.apply(response);
                }
                Err(RecvTimeoutError::Timeout) => return false,
                // unreachable while `self.tx` is alive
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    fn apply(&mut self, response: RouteResponse) -> bool {
        self.controller.routes_loaded(&response.request, response.result)
    }

    fn dispatch(&mut self, commands: Vec<Command>) {
        let mut queue = commands;
        while let Some(command) = queue.pop() {
            match command {
                Command::RequestLocation => {
                    let result = self.locator.current_position();
                    queue.extend(self.controller.location_resolved(result));
                }
                Command::FetchRoute(request) => self.spawn_fetch(request),
            }
        }
    }

    fn spawn_fetch(&self, request: RouteRequest) {
        debug!(request = request.id, "dispatching route fetch");
        let router = Arc::clone(&self.router);
        let tx = self.tx.clone();
        rayon::spawn(move || {
            let result = router.routes_between(request.origin, request.destination.coordinate);
            // the session may already be gone
            let _ = tx.send(RouteResponse { request, result });
        });
    }
}
