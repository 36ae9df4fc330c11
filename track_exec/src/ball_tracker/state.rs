//! Implementations for the BallTracker state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace};
use serde::Serialize;

// Internal
use super::{
    exceeds_deadband, fov_error, transition,
    BallTrackerError, HeldCandidate, Params, PdController, TrackStatus,
};
use comms_if::{
    eqpt::{detection::Candidate, head::HeadDems},
    tc::ball_tracker::TrackCmd,
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::Session,
    time::elapsed_since,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Ball tracker module state
pub struct BallTracker {

    params: Params,

    /// PD filter applied to both axes
    pd: PdController,

    /// False until parameters have been loaded
    initialised: bool,

    /// True while tracking is enabled
    tracking: bool,

    /// Status resolved on the last cycle
    status: TrackStatus,

    memory: ControllerMemory,

    /// Candidate reported since the last cycle
    ball: HeldCandidate,

    report: StatusReport,
    arch_report: Archiver,
}

/// Controller state carried between cycles.
///
/// The errors stored are the raw errors, before filtering, so that they can be used for the next
/// derivative and for decaying while waiting.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ControllerMemory {
    /// Last pan error
    ///
    /// Units: radians
    pub current_pan: f64,

    /// Last tilt error
    ///
    /// Units: radians
    pub current_tilt: f64,

    /// Last ball size
    pub current_scale: f64,

    /// Number of consecutive cycles without a detection
    pub not_found_count: u64,

    /// Time of the last cycle which ran the controller
    ///
    /// Units: seconds
    pub prev_time_s: Option<f64>,
}

/// Input data to the BallTracker.
#[derive(Debug, Default, Copy, Clone)]
pub struct InputData {
    /// Current time.
    ///
    /// Units: seconds
    pub now_s: f64,
}

/// Output from the BallTracker for the head.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct OutputData {
    /// Demand to send to the head this cycle, if any.
    pub dems: Option<HeadDems>,
}

/// Status report for BallTracker processing.
#[derive(Debug, Default, Copy, Clone, Serialize)]
pub struct StatusReport {
    /// Time of the cycle
    pub time_s: f64,

    pub tracking: bool,

    pub status: TrackStatus,

    pub not_found_count: u64,

    /// Size of the ball used this cycle
    pub ball_size: f64,

    /// Raw pan error
    pub pan_error_rad: f64,

    /// Raw tilt error
    pub tilt_error_rad: f64,

    /// Filtered pan demand
    pub pan_dem_rad: f64,

    /// Filtered tilt demand
    pub tilt_dem_rad: f64,

    /// Time since the previous controller cycle, zero if there was none.
    pub dt_s: f64,

    /// True if a scan was requested this cycle
    pub scan_requested: bool,

    /// True if a demand was computed but was inside the deadband
    pub dems_suppressed: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for BallTracker {
    type InitData = &'static str;
    type InitError = BallTrackerError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = BallTrackerError;

    /// Initialise the BallTracker module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load and check the parameters
        let params: Params = params::load(init_data)
            .map_err(BallTrackerError::ParamLoadError)?;
        self.set_params(params)?;

        // Initialise the archiver
        self.arch_report = Archiver::from_path(
            session, "ball_tracker/status_report.csv"
        ).map_err(BallTrackerError::ArchiveError)?;

        Ok(())
    }

    /// Perform cyclic processing of the BallTracker.
    ///
    /// Routine conditions, such as a missing ball or a bad time step, never
    /// produce an error. The only error is processing before initialisation.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        if !self.initialised {
            return Err(BallTrackerError::NotInitialised);
        }

        let now_s = input_data.now_s;

        // Clear the status report
        self.report = StatusReport {
            time_s: now_s,
            tracking: self.tracking,
            ..Default::default()
        };

        let mut output = OutputData::default();

        // Not tracking, discard anything that was reported and hold in not
        // found
        if !self.tracking {
            self.ball.clear_size();
            self.memory.not_found_count = 0;
            self.set_status(TrackStatus::NotFound);
            return Ok((output, self.finish_report()));
        }

        let ball = self.ball.peek();

        let trans = transition(
            self.status,
            self.memory.not_found_count,
            ball.is_detection(),
            &self.params,
        );
        self.memory.not_found_count = trans.not_found_count;

        if trans.search_triggered {
            if self.params.use_search_on_loss {
                info!(
                    "Ball lost for more than {} cycles, requesting scan",
                    self.params.not_found_threshold
                );
                output.dems = Some(HeadDems::Scan);
                self.report.scan_requested = true;
            }
            else {
                debug!("Ball lost, search is disabled");
            }
        }

        // Get the target error for this cycle.
        //
        // Image positions: top-left is (-1, -1), bottom-right is (+1, +1).
        // Errors: top-left is (+, +), bottom-right is (-, -).
        let (pan_err_rad, tilt_err_rad, scale) = match trans.status {
            TrackStatus::NotFound => {
                self.set_status(TrackStatus::NotFound);
                return Ok((output, self.finish_report()));
            },
            TrackStatus::Waiting => (
                self.memory.current_pan * self.params.waiting_decay,
                self.memory.current_tilt * self.params.waiting_decay,
                self.memory.current_scale,
            ),
            TrackStatus::Found => (
                fov_error(ball.x, self.params.half_fov_width_rad),
                fov_error(ball.y, self.params.half_fov_height_rad),
                ball.size,
            ),
        };

        // Filter the error
        let dt_s = elapsed_since(self.memory.prev_time_s, now_s);
        self.memory.prev_time_s = Some(now_s);

        let pan_dem_rad = self.pd.get(pan_err_rad, self.memory.current_pan, dt_s);
        let tilt_dem_rad = self.pd.get(tilt_err_rad, self.memory.current_tilt, dt_s);

        trace!(
            "Ball ({:.3}, {:.3}), error ({:.3}, {:.3}) deg, demand ({:.3}, {:.3}) deg, dt {:?}",
            ball.x, ball.y,
            pan_err_rad.to_degrees(), tilt_err_rad.to_degrees(),
            pan_dem_rad.to_degrees(), tilt_dem_rad.to_degrees(),
            dt_s
        );

        output.dems = self.deadband(pan_dem_rad, tilt_dem_rad);
        self.report.dems_suppressed = output.dems.is_none();

        // Remember the raw error for the next cycle
        self.memory.current_pan = pan_err_rad;
        self.memory.current_tilt = tilt_err_rad;
        self.memory.current_scale = scale;

        // The candidate has been used, so an empty next cycle must be seen as
        // no detection
        self.ball.clear_size();

        self.report.ball_size = scale;
        self.report.pan_error_rad = pan_err_rad;
        self.report.tilt_error_rad = tilt_err_rad;
        self.report.pan_dem_rad = pan_dem_rad;
        self.report.tilt_dem_rad = tilt_dem_rad;
        self.report.dt_s = dt_s.unwrap_or(0.0);

        self.set_status(trans.status);

        Ok((output, self.finish_report()))
    }
}

impl Archived for BallTracker {
    fn write(&mut self) -> Result<(), ArchiveError> {
        // Nothing to do if no session archive was set up
        if !self.arch_report.is_init() {
            return Ok(());
        }

        self.arch_report.serialise(self.report)
    }
}

impl Default for BallTracker {
    fn default() -> Self {
        let params = Params::default();

        BallTracker {
            pd: PdController::new(params.p_gain, params.d_gain),
            params,
            initialised: false,
            tracking: false,
            status: TrackStatus::NotFound,
            memory: ControllerMemory::default(),
            ball: HeldCandidate::default(),
            report: StatusReport::default(),
            arch_report: Archiver::default(),
        }
    }
}

impl ControllerMemory {
    /// Return to the start-up values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl BallTracker {

    /// Create a new tracker with the given parameters, without archiving.
    pub fn new(params: Params) -> Result<Self, BallTrackerError> {
        let mut tracker = Self::default();
        tracker.set_params(params)?;
        Ok(tracker)
    }

    /// Report the candidates found by the detector.
    ///
    /// May be called any number of times between cycles. The largest
    /// candidate reported since the last cycle is used.
    pub fn report_detections(&mut self, candidates: &[Candidate]) {
        if self.ball.offer_all(candidates) {
            trace!("Held candidate now {:?}", self.ball.peek());
        }
    }

    /// Execute a tracking command.
    ///
    /// Returns the final correction for the head when tracking is stopped.
    pub fn command(&mut self, cmd: TrackCmd) -> Option<HeadDems> {
        match cmd {
            TrackCmd::Start => {
                self.start();
                None
            },
            TrackCmd::Stop => self.stop(),
            TrackCmd::Toggle => self.toggle(),
        }
    }

    /// Start tracking. Has no effect if already tracking.
    pub fn start(&mut self) {
        if !self.tracking {
            info!("Start ball tracking");
            self.tracking = true;
        }
    }

    /// Stop tracking.
    ///
    /// Returns one last correction towards the raw position of the last ball
    /// reported, without filtering. This is still subject to the deadband.
    pub fn stop(&mut self) -> Option<HeadDems> {
        if self.tracking {
            info!("Stop ball tracking");
        }

        self.tracking = false;
        self.memory.reset();
        self.set_status(TrackStatus::NotFound);

        let ball = self.ball.peek();
        let dems = self.deadband(
            fov_error(ball.x, self.params.half_fov_width_rad),
            fov_error(ball.y, self.params.half_fov_height_rad),
        );

        debug!("Final correction on stop: {:?}", dems);

        dems
    }

    /// Start tracking if stopped, otherwise stop.
    pub fn toggle(&mut self) -> Option<HeadDems> {
        if self.tracking {
            self.stop()
        }
        else {
            self.start();
            None
        }
    }

    /// Enable or disable scanning when the ball is lost.
    ///
    /// Overrides `use_search_on_loss` from the parameters. The not found count
    /// is left alone.
    pub fn set_use_search(&mut self, use_search: bool) {
        if use_search != self.params.use_search_on_loss {
            info!("Search on loss {}", if use_search { "enabled" } else { "disabled" });
        }
        self.params.use_search_on_loss = use_search;
    }

    /// True while tracking is enabled.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Status resolved on the last cycle.
    pub fn status(&self) -> TrackStatus {
        self.status
    }

    /// Number of consecutive cycles without a detection.
    pub fn not_found_count(&self) -> u64 {
        self.memory.not_found_count
    }

    pub fn memory(&self) -> &ControllerMemory {
        &self.memory
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The candidate currently held for the next cycle.
    pub fn held_candidate(&self) -> Candidate {
        self.ball.peek()
    }

    /// Validate and apply a new set of parameters.
    fn set_params(&mut self, params: Params) -> Result<(), BallTrackerError> {
        params.validate().map_err(BallTrackerError::InvalidParams)?;

        self.pd = PdController::new(params.p_gain, params.d_gain);
        self.params = params;
        self.initialised = true;

        Ok(())
    }

    /// Turn a demand into a head command if it's outside the deadband.
    fn deadband(&self, pan_rad: f64, tilt_rad: f64) -> Option<HeadDems> {
        if exceeds_deadband(pan_rad, tilt_rad, self.params.min_command_angle_rad) {
            Some(HeadDems::AngleOffset { pan_rad, tilt_rad })
        }
        else {
            None
        }
    }

    fn set_status(&mut self, status: TrackStatus) {
        if status != self.status {
            debug!("Tracking status {:?} -> {:?}", self.status, status);
        }
        self.status = status;
    }

    fn finish_report(&mut self) -> StatusReport {
        self.report.status = self.status;
        self.report.not_found_count = self.memory.not_found_count;
        self.report
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DT: f64 = 0.1;

    fn tracker() -> BallTracker {
        BallTracker::new(Params::default()).unwrap()
    }

    fn ball(x: f64, y: f64, size: f64) -> [Candidate; 1] {
        [Candidate::new(x, y, size)]
    }

    /// Run one cycle at the given time.
    fn tick(t: &mut BallTracker, now_s: f64) -> Option<HeadDems> {
        t.proc(&InputData { now_s }).unwrap().0.dems
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_not_initialised() {
        let mut t = BallTracker::default();
        match t.proc(&InputData { now_s: 0.0 }) {
            Err(BallTrackerError::NotInitialised) => (),
            r => panic!("Expected NotInitialised, got {:?}", r.map(|(o, _)| o))
        }
    }

    #[test]
    fn test_invalid_params_fail_at_construction() {
        let mut p = Params::default();
        p.p_gain = -1.0;
        match BallTracker::new(p) {
            Err(BallTrackerError::InvalidParams(_)) => (),
            _ => panic!("Expected invalid params")
        }
    }

    #[test]
    fn test_inactive_ticks() {
        let mut t = tracker();

        for i in 0..20 {
            if i % 2 == 0 {
                t.report_detections(&ball(0.5, 0.5, 10.0));
            }
            assert_eq!(tick(&mut t, i as f64 * DT), None);
            assert_eq!(t.status(), TrackStatus::NotFound);
            assert_eq!(*t.memory(), ControllerMemory::default());
            assert!(!t.held_candidate().is_detection());
        }
    }

    #[test]
    fn test_found_command_is_proportional_on_first_cycle() {
        let mut t = tracker();
        let p = t.params().clone();
        t.start();

        t.report_detections(&ball(0.5, 0.0, 10.0));
        let (out, rpt) = t.proc(&InputData { now_s: 1.0 }).unwrap();

        let pan_err = -(0.5 * p.half_fov_width_rad.tan()).atan();
        assert_eq!(t.status(), TrackStatus::Found);
        assert_eq!(rpt.status, TrackStatus::Found);
        assert_close(rpt.pan_error_rad, pan_err);
        assert_eq!(rpt.dt_s, 0.0);

        match out.dems {
            Some(HeadDems::AngleOffset { pan_rad, tilt_rad }) => {
                assert_close(pan_rad, p.p_gain * pan_err);
                assert_close(tilt_rad, 0.0);
            },
            d => panic!("Expected an angle offset, got {:?}", d)
        }

        // The raw error is remembered, not the demand
        assert_close(t.memory().current_pan, pan_err);
        assert_eq!(t.memory().current_scale, 10.0);
        assert_eq!(t.memory().prev_time_s, Some(1.0));
    }

    #[test]
    fn test_derivative_term() {
        let mut t = tracker();
        let p = t.params().clone();
        t.start();

        t.report_detections(&ball(0.2, -0.4, 4.0));
        tick(&mut t, 0.0);
        t.report_detections(&ball(0.6, -0.4, 4.0));
        let dems = tick(&mut t, DT);

        let e0 = fov_error(0.2, p.half_fov_width_rad);
        let e1 = fov_error(0.6, p.half_fov_width_rad);
        let tilt = fov_error(-0.4, p.half_fov_height_rad);

        match dems {
            Some(HeadDems::AngleOffset { pan_rad, tilt_rad }) => {
                assert_close(pan_rad, p.p_gain * e1 + p.d_gain * (e1 - e0) / DT);
                assert_close(tilt_rad, p.p_gain * tilt);
            },
            d => panic!("Expected an angle offset, got {:?}", d)
        }
    }

    #[test]
    fn test_clock_jump_back_drops_derivative() {
        let mut t = tracker();
        let p = t.params().clone();
        t.start();

        t.report_detections(&ball(0.2, 0.0, 4.0));
        tick(&mut t, 5.0);
        t.report_detections(&ball(0.6, 0.0, 4.0));
        let (out, rpt) = t.proc(&InputData { now_s: 4.0 }).unwrap();

        assert_eq!(rpt.dt_s, 0.0);
        match out.dems {
            Some(HeadDems::AngleOffset { pan_rad, .. }) =>
                assert_close(pan_rad, p.p_gain * fov_error(0.6, p.half_fov_width_rad)),
            d => panic!("Expected an angle offset, got {:?}", d)
        }
    }

    #[test]
    fn test_not_found_count_and_waiting() {
        let mut t = tracker();
        let p = t.params().clone();
        t.start();

        t.report_detections(&ball(0.5, 0.3, 8.0));
        tick(&mut t, 0.0);
        assert_eq!(t.not_found_count(), 0);

        let mut prev_pan = t.memory().current_pan;

        // Waiting for every k below the waiting threshold, with the error
        // decaying each cycle
        for k in 1..p.waiting_threshold {
            tick(&mut t, k as f64 * DT);
            assert_eq!(t.status(), TrackStatus::Waiting);
            assert_eq!(t.not_found_count(), k);
            assert_close(t.memory().current_pan, prev_pan * p.waiting_decay);
            assert_eq!(t.memory().current_scale, 8.0);
            prev_pan = t.memory().current_pan;
        }

        // Then not found, leaving the memory alone
        let mem = *t.memory();
        assert_eq!(tick(&mut t, 10.0), None);
        assert_eq!(t.status(), TrackStatus::NotFound);
        assert_eq!(t.not_found_count(), p.waiting_threshold);
        assert_eq!(t.memory().current_pan, mem.current_pan);
        assert_eq!(t.memory().prev_time_s, mem.prev_time_s);

        // A detection resets the count on that cycle
        t.report_detections(&ball(0.1, 0.1, 2.0));
        tick(&mut t, 11.0);
        assert_eq!(t.status(), TrackStatus::Found);
        assert_eq!(t.not_found_count(), 0);
    }

    #[test]
    fn test_waiting_demand() {
        let mut t = tracker();
        let p = t.params().clone();
        t.start();

        t.report_detections(&ball(-0.8, 0.0, 8.0));
        tick(&mut t, 0.0);
        let e = t.memory().current_pan;

        let (out, rpt) = t.proc(&InputData { now_s: DT }).unwrap();
        assert_eq!(rpt.status, TrackStatus::Waiting);
        assert_eq!(rpt.ball_size, 8.0);

        let target = e * p.waiting_decay;
        match out.dems {
            Some(HeadDems::AngleOffset { pan_rad, .. }) =>
                assert_close(pan_rad, p.p_gain * target + p.d_gain * (target - e) / DT),
            d => panic!("Expected an angle offset, got {:?}", d)
        }
    }

    #[test]
    fn test_never_seen_does_not_wait() {
        let mut t = tracker();
        t.start();

        for i in 0..4 {
            assert_eq!(tick(&mut t, i as f64 * DT), None);
            assert_eq!(t.status(), TrackStatus::NotFound);
        }
    }

    #[test]
    fn test_search_on_loss() {
        let mut t = tracker();
        let threshold = t.params().not_found_threshold;
        t.start();

        let mut scans = vec![];
        for i in 0..(2 * (threshold + 1)) {
            if let Some(HeadDems::Scan) = tick(&mut t, i as f64 * DT) {
                scans.push(i);
                assert_eq!(t.not_found_count(), 0);
                assert_eq!(t.status(), TrackStatus::NotFound);
            }
        }

        // Fires once the count exceeds the threshold, then has to climb back
        assert_eq!(scans, vec![threshold, 2 * threshold + 1]);
    }

    #[test]
    fn test_search_disabled() {
        let mut p = Params::default();
        p.use_search_on_loss = false;
        let threshold = p.not_found_threshold;
        let mut t = BallTracker::new(p).unwrap();
        t.start();

        for i in 0..threshold {
            tick(&mut t, i as f64 * DT);
        }
        assert_eq!(t.not_found_count(), threshold);

        let (out, rpt) = t.proc(&InputData { now_s: 100.0 }).unwrap();
        assert_eq!(out.dems, None);
        assert!(!rpt.scan_requested);
        assert_eq!(t.not_found_count(), 0);
    }

    #[test]
    fn test_deadband_suppresses_small_demands() {
        let mut t = tracker();
        t.start();

        // Around 0.5 deg of demand on each axis
        t.report_detections(&ball(0.05, 0.05, 3.0));
        let (out, rpt) = t.proc(&InputData { now_s: 0.0 }).unwrap();

        assert_eq!(out.dems, None);
        assert!(rpt.dems_suppressed);
        assert_eq!(rpt.status, TrackStatus::Found);

        // The memory is still updated
        assert!(t.memory().current_pan != 0.0);
    }

    #[test]
    fn test_deadband_applies_while_waiting() {
        let mut t = tracker();
        let p = t.params().clone();
        t.start();

        // Around 1.2 deg of demand, enough to be sent
        t.report_detections(&ball(0.12, 0.0, 3.0));
        assert!(tick(&mut t, 0.0).is_some());
        let e = t.memory().current_pan;

        // Decayed to around 0.85 deg, which is inside the deadband
        let (out, rpt) = t.proc(&InputData { now_s: 1.0 }).unwrap();
        assert_eq!(rpt.status, TrackStatus::Waiting);
        assert_eq!(out.dems, None);
        assert!(rpt.dems_suppressed);
        assert!(rpt.pan_dem_rad.abs() < p.min_command_angle_rad);

        assert_close(t.memory().current_pan, e * p.waiting_decay);
    }

    #[test]
    fn test_non_finite_position_is_not_a_detection() {
        let mut t = tracker();
        t.start();

        t.report_detections(&ball(f64::NAN, 0.2, 5.0));
        t.report_detections(&ball(0.2, f64::INFINITY, 6.0));

        for i in 0..2 {
            assert_eq!(tick(&mut t, i as f64 * DT), None);
            assert_eq!(t.status(), TrackStatus::NotFound);
        }
        assert_eq!(t.memory().current_pan, 0.0);
        assert_eq!(t.memory().current_tilt, 0.0);

        // A good report afterwards is still tracked
        t.report_detections(&ball(0.4, 0.2, 1.0));
        match tick(&mut t, 2.0 * DT) {
            Some(HeadDems::AngleOffset { pan_rad, tilt_rad }) =>
                assert!(pan_rad.is_finite() && tilt_rad.is_finite()),
            d => panic!("Expected an angle offset, got {:?}", d)
        }
    }

    #[test]
    fn test_search_switched_at_runtime() {
        let mut t = tracker();
        let threshold = t.params().not_found_threshold;
        t.start();

        for i in 0..threshold {
            assert_eq!(tick(&mut t, i as f64 * DT), None);
        }

        // Disabled just before it would fire, so the streak resets silently
        t.set_use_search(false);
        let (out, rpt) = t.proc(&InputData { now_s: 10.0 }).unwrap();
        assert_eq!(out.dems, None);
        assert!(!rpt.scan_requested);
        assert_eq!(t.not_found_count(), 0);

        // Enabled again, the next loss fires
        t.set_use_search(true);
        let mut scans = 0;
        for i in 0..=threshold {
            if let Some(HeadDems::Scan) = tick(&mut t, 11.0 + i as f64 * DT) {
                scans += 1;
            }
        }
        assert_eq!(scans, 1);
    }

    #[test]
    fn test_largest_candidate_in_window_is_used() {
        let mut t = tracker();
        let p = t.params().clone();
        t.start();

        t.report_detections(&[Candidate::new(0.9, 0.9, 2.0), Candidate::new(0.3, 0.0, 6.0)]);
        t.report_detections(&ball(-0.9, -0.9, 6.0));
        t.report_detections(&ball(-0.5, 0.5, 1.0));
        tick(&mut t, 0.0);

        assert_close(t.memory().current_pan, fov_error(0.3, p.half_fov_width_rad));
        assert_eq!(t.memory().current_scale, 6.0);
    }

    #[test]
    fn test_stop_final_correction() {
        let mut t = tracker();
        let p = t.params().clone();
        t.start();

        t.report_detections(&ball(-0.3, 0.1, 5.0));
        tick(&mut t, 0.0);
        tick(&mut t, DT);
        assert_eq!(t.status(), TrackStatus::Waiting);

        // Unfiltered, from the raw position of the last ball
        match t.command(TrackCmd::Stop) {
            Some(HeadDems::AngleOffset { pan_rad, tilt_rad }) => {
                assert_close(pan_rad, fov_error(-0.3, p.half_fov_width_rad));
                assert_close(tilt_rad, fov_error(0.1, p.half_fov_height_rad));
            },
            d => panic!("Expected an angle offset, got {:?}", d)
        }

        assert!(!t.is_tracking());
        assert_eq!(t.status(), TrackStatus::NotFound);
        assert_eq!(*t.memory(), ControllerMemory::default());
        assert_eq!(tick(&mut t, 2.0 * DT), None);
    }

    #[test]
    fn test_stop_without_ball_sends_nothing() {
        let mut t = tracker();
        t.start();
        assert_eq!(t.stop(), None);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut t = tracker();
        t.report_detections(&ball(0.4, 0.4, 3.0));

        t.start();
        let mem = *t.memory();
        let held = t.held_candidate();
        t.start();

        assert!(t.is_tracking());
        assert_eq!(t.status(), TrackStatus::NotFound);
        assert_eq!(*t.memory(), mem);
        assert_eq!(t.held_candidate(), held);
        assert_eq!(t.command(TrackCmd::Start), None);
    }

    #[test]
    fn test_toggle() {
        let mut t = tracker();

        assert_eq!(t.command(TrackCmd::Toggle), None);
        assert!(t.is_tracking());

        t.report_detections(&ball(0.7, 0.0, 3.0));
        tick(&mut t, 0.0);

        match t.command(TrackCmd::Toggle) {
            Some(HeadDems::AngleOffset { .. }) => (),
            d => panic!("Expected the final correction, got {:?}", d)
        }
        assert!(!t.is_tracking());
    }

    #[test]
    fn test_restart_starts_from_reset_memory() {
        let mut t = tracker();
        t.start();

        t.report_detections(&ball(0.5, 0.5, 3.0));
        tick(&mut t, 0.0);
        t.stop();
        t.start();

        // No waiting after a restart, there is nothing to coast on
        tick(&mut t, DT);
        assert_eq!(t.status(), TrackStatus::NotFound);
        assert_eq!(t.not_found_count(), 1);
        assert_eq!(t.memory().prev_time_s, None);
    }

    #[test]
    fn test_archive_without_session_is_noop() {
        let mut t = tracker();
        tick(&mut t, 0.0);
        assert!(t.write().is_ok());
    }
}
