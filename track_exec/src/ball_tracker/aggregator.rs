//! Reduction of the detector's candidates to a single target

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::detection::Candidate;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The candidate held for the current cycle.
///
/// Reports may arrive at any point between two cycles. The held candidate is only replaced by
/// one with a strictly larger size, so after any number of reports it holds the same candidate
/// [`best_candidate`] would pick from all of them.
///
/// Clearing only zeroes the size. The position is kept so the final correction on stopping can
/// still point at the last place the ball was seen.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct HeldCandidate(Candidate);

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Select the candidate with the largest size.
///
/// Ties go to the first candidate seen. Candidates with a non-finite size or position are ignored,
/// and `None` is returned if there is nothing left to choose from.
pub fn best_candidate(candidates: &[Candidate]) -> Option<Candidate> {
    candidates
        .iter()
        .filter(|c| c.is_finite())
        .fold(None, |best, c| match best {
            Some(b) if b.size >= c.size => Some(b),
            _ => Some(*c),
        })
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl HeldCandidate {
    /// Offer a candidate, returning true if it replaced the held one.
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        if candidate.is_finite() && candidate.size > self.0.size {
            self.0 = candidate;
            true
        } else {
            false
        }
    }

    /// Offer the best of a set of candidates, returning true if it replaced the held one.
    pub fn offer_all(&mut self, candidates: &[Candidate]) -> bool {
        match best_candidate(candidates) {
            Some(c) => self.offer(c),
            None => false,
        }
    }

    /// Get a copy of the held candidate.
    pub fn peek(&self) -> Candidate {
        self.0
    }

    /// Mark the held candidate as used so that it isn't seen as a detection next cycle.
    pub fn clear_size(&mut self) {
        self.0.size = 0.0;
    }
}
