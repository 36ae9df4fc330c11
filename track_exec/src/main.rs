//! Ball tracking executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the tracker
//!     - Main loop:
//!         - Telecommand processing (detections and tracking commands)
//!         - Ball tracker processing
//!         - Head demand output
//!         - Archiving
//!
//! The transport carrying detections in and demands out is provided by the
//! surrounding system. This executable replays a telecommand script and logs
//! the demands it would send to the head.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::{WrapErr, eyre}};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use comms_if::eqpt::head::HeadDems;
use track_lib::{data_store::DataStore, params::TrackExecParams, tc_processor};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "track_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // ---- LOAD PARAMETERS ----

    let exec_params: TrackExecParams = util::params::load(
        "track_exec.toml"
    ).wrap_err("Could not load exec params")?;

    let tick_level: LevelFilter = exec_params.tick_log_level.parse()
        .map_err(|e| eyre!("Invalid tick log level {:?}: {}", exec_params.tick_log_level, e))?;

    // Initialise logger
    logger_init(LevelFilter::Trace, tick_level, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Ball Tracking Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    info!("Exec parameters loaded: {:?}", exec_params);

    if !(exec_params.cycle_period_s > 0.0) {
        return Err(eyre!(
            "Cycle period must be positive, found {}", exec_params.cycle_period_s
        ));
    }

    // ---- INITIALISE TC SOURCE ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let script_arg = get_script_arg(&args)?;

    info!("Loading script from \"{}\"", script_arg);

    let mut script = ScriptInterpreter::new(script_arg)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script {:?} lasts {:.02} s and contains {} TCs\n",
        script.script_path(),
        script.get_duration(),
        script.get_num_tcs()
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    ds.tracker.init("ball_tracker.toml", &session)
        .wrap_err("Failed to initialise BallTracker")?;
    info!("BallTracker init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(session::get_elapsed_seconds());

        // ---- TELECOMMAND PROCESSING ----

        match script.get_pending_tcs_at(ds.time_s) {
            PendingTcs::None => (),
            PendingTcs::Some(tc_vec) => {
                for tc in tc_vec.iter() {
                    tc_processor::exec(&mut ds, tc);
                }
            },
            // Exit if end of script reached
            PendingTcs::EndOfScript => {
                info!("End of TC script reached, stopping");
                break
            }
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        match ds.tracker.proc(&ds.tracker_input) {
            Ok((o, r)) => {
                ds.tracker_output = o;
                ds.tracker_status_rpt = r;
            },
            Err(e) => return Err(e).wrap_err("Error during BallTracker processing")
        };

        // ---- HEAD DEMANDS ----

        for dems in ds.take_dems() {
            send_head_dems(&dems);
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.tracker.write() {
            warn!("Could not archive BallTracker status: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("End of execution after {} cycles", ds.num_cycles);

    session.exit();

    Ok(())
}

/// Get the script path from the command line arguments, including the
/// executable name.
fn get_script_arg(args: &[String]) -> Result<&str, Report> {
    match args {
        [_, path] => Ok(path.as_str()),
        _ => Err(eyre!(
            "Expected one argument (the script path), found {}",
            args.len().saturating_sub(1)
        ))
    }
}

/// Hand a demand to the head.
fn send_head_dems(dems: &HeadDems) {
    match dems {
        HeadDems::AngleOffset { .. } => {
            let offsets: Vec<String> = dems
                .joint_offsets()
                .iter()
                .map(|(id, rad)| format!("{} {:+.3} deg", id.joint_name(), rad.to_degrees()))
                .collect();

            info!("Head offset: {}", offsets.join(", "));
        },
        HeadDems::Scan => info!("Head scan requested"),
    }
}
