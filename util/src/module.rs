//! Cyclic processing interface
//!
//! Anything run once per control cycle by an executable is driven through
//! [`State`]: it is set up once from a parameter source, then stepped with the
//! cycle's input until the executable exits.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::session::Session;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A component stepped once per control cycle.
pub trait State {
    /// Where to get configuration from, usually a parameter file name.
    type InitData;
    type InitError;

    /// What the cycle provides, such as the current time.
    type InputData;
    /// Commands produced for other parts of the system.
    type OutputData;
    /// Per-cycle diagnostics, suitable for archiving.
    type StatusReport;
    type ProcError;

    /// Load configuration and prepare any session outputs (archives etc).
    ///
    /// Must succeed before the first call to [`State::proc`].
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Advance by one cycle.
    ///
    /// Returns this cycle's output together with the status report
    /// describing how it was produced.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
