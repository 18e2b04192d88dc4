//! Frame-paced clock driver
//!
//! The host calls [`FrameDriver::fire`] from its display-refresh callback
//! with the request it was handed. Each request carries the generation it was
//! issued under; stopping bumps the generation, so a request that was already
//! queued when the driver stopped is rejected when it finally arrives.

/// Handle to one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    generation: u64,
}

/// Clock reading for one accepted frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Clock time of this frame (ms)
    pub now: f64,
    /// Time since the previous accepted frame (ms)
    pub delta: f64,
}

/// Start/stop scheduler for simulation steps
#[derive(Debug, Default)]
pub struct FrameDriver {
    running: bool,
    generation: u64,
    last_time: f64,
    pending: Option<FrameRequest>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The request the host should fire on its next refresh
    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Begin scheduling frames, measuring deltas from `now`.
    ///
    /// Starting an already running driver keeps the current schedule.
    pub fn start(&mut self, now: f64) -> FrameRequest {
        if let (true, Some(request)) = (self.running, self.pending) {
            return request;
        }
        self.running = true;
        self.generation = self.generation.wrapping_add(1);
        self.last_time = now;
        let request = FrameRequest {
            generation: self.generation,
        };
        self.pending = Some(request);
        log::debug!("Frame driver started (generation {})", self.generation);
        request
    }

    /// Stop scheduling. Any request issued before this call becomes stale.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        log::debug!("Frame driver stopped");
    }

    /// Accept a scheduled frame at `now`.
    ///
    /// Returns `None` for a stale request or a stopped driver. On success the
    /// next request is scheduled and available from [`pending`](Self::pending).
    pub fn fire(&mut self, request: FrameRequest, now: f64) -> Option<Frame> {
        if !self.running || request.generation != self.generation || self.pending != Some(request) {
            log::trace!("Dropped stale frame request");
            return None;
        }
        let delta = (now - self.last_time).max(0.0);
        self.last_time = now;
        // Same generation, so the next refresh reuses the token
        self.pending = Some(request);
        Some(Frame { now, delta })
    }
}
