//! Font-size resolver — bounded binary search over integer sizes.
//!
//! A candidate size *fits* when the oracle's rendered height is within
//! `box_height + HEIGHT_TOLERANCE` and, if a line ceiling is set, the line
//! count is at most `max_lines`. The search keeps the largest size that fits.
//!
//! ## Two-pass policy
//!
//! ```text
//! pass 1: [min_size, max_size]      ──hit──► FittedWithinRange
//!            │ miss
//!            ▼  (max_lines set, min_size > 1)
//! pass 2: [1, min_size - 1]         ──hit──► FittedBelowRange
//!            │ miss
//!            ▼
//!         min_size                  ───────► Unsatisfiable
//! ```
//!
//! The minimum size is a soft readability preference; the line ceiling is a
//! hard guarantee against clipped text, so it wins when both can't hold.

use log::{debug, trace, warn};

use crate::oracle::{MeasureError, MeasureOracle};
use crate::request::{FitOutcome, FitRequest, FitResult};

/// Slack on the height comparison, absorbing sub-pixel rounding in layout.
pub const HEIGHT_TOLERANCE: f32 = 1.0;

/// Upper bound on probes per search pass. A realistic size range converges
/// in about nine.
pub const MAX_SEARCH_ITERATIONS: u32 = 20;

/// Owns an oracle and resolves requests against it.
pub struct FontSizeResolver<O> {
    oracle: O,
}

impl<O: MeasureOracle> FontSizeResolver<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    pub fn into_inner(self) -> O {
        self.oracle
    }

    pub fn resolve(&mut self, request: &FitRequest) -> FitResult {
        resolve(&mut self.oracle, request)
    }
}

/// Resolve the largest font size that fits `request`.
///
/// Total over all inputs: empty text, a collapsed box, or an unavailable
/// oracle all return `min_size` with [`FitOutcome::FittedWithinRange`].
pub fn resolve<O: MeasureOracle + ?Sized>(oracle: &mut O, request: &FitRequest) -> FitResult {
    let bounds = request.bounds().normalized();
    if bounds != request.bounds() {
        warn!(
            "resolve: size bounds [{}, {}] normalized to [{}, {}]",
            request.min_size, request.max_size, bounds.min_size, bounds.max_size
        );
    }

    if request.is_degenerate() {
        debug!(
            "resolve: nothing to measure (text len {}, box {}x{}), using min size {}",
            request.text.len(),
            request.box_width,
            request.box_height,
            bounds.min_size
        );
        return FitResult {
            font_size: bounds.min_size,
            outcome: FitOutcome::FittedWithinRange,
            probes: 0,
        };
    }

    let mut search = Search {
        oracle,
        request,
        probes: 0,
    };

    match search.range(bounds.min_size, bounds.max_size) {
        Ok(0) => {}
        Ok(size) => return search.finish(size, FitOutcome::FittedWithinRange),
        Err(err) => return search.short_circuit(bounds.min_size, &err),
    }

    if request.max_lines.is_some() && bounds.min_size > 1 {
        debug!(
            "resolve: nothing in [{}, {}] keeps {:?} lines, relaxing the minimum",
            bounds.min_size, bounds.max_size, request.max_lines
        );
        match search.range(1, bounds.min_size - 1) {
            Ok(0) => {}
            Ok(size) => return search.finish(size, FitOutcome::FittedBelowRange),
            Err(err) => return search.short_circuit(bounds.min_size, &err),
        }
    }

    search.finish(bounds.min_size, FitOutcome::Unsatisfiable)
}

/// State of one resolution: the borrowed oracle and a probe counter.
struct Search<'a, O: ?Sized> {
    oracle: &'a mut O,
    request: &'a FitRequest,
    probes: u32,
}

impl<O: MeasureOracle + ?Sized> Search<'_, O> {
    /// Largest fitting size in `[lower, upper]`, or 0 if none fits.
    ///
    /// Only [`MeasureError::Unavailable`] escapes; layout failures count as
    /// a size that doesn't fit.
    fn range(&mut self, lower: u32, upper: u32) -> Result<u32, MeasureError> {
        let mut lo = i64::from(lower);
        let mut hi = i64::from(upper);
        let mut best = 0u32;
        let mut iterations = 0u32;

        while lo <= hi && iterations < MAX_SEARCH_ITERATIONS {
            iterations += 1;
            let mid = lo + (hi - lo) / 2;
            if mid <= 0 {
                lo += 1;
                continue;
            }
            if self.fits(mid as u32)? {
                best = mid as u32;
                lo = mid + 1;
            } else {
                hi = mid - 1;
            }
        }

        if lo <= hi {
            debug!(
                "search [{lower}, {upper}]: iteration cap hit with [{lo}, {hi}] unexplored, best {best}"
            );
        } else {
            debug!("search [{lower}, {upper}]: best {best} after {iterations} iterations");
        }
        Ok(best)
    }

    fn fits(&mut self, size: u32) -> Result<bool, MeasureError> {
        let req = self.request;
        self.probes += 1;
        match self.oracle.measure(&req.text, req.box_width, size, &req.style) {
            Ok(m) => {
                let height_ok = m.rendered_height <= req.box_height + HEIGHT_TOLERANCE;
                let lines_ok = req.max_lines.map_or(true, |max| m.line_count <= max);
                trace!(
                    "probe size {size}: height {:.2}/{:.2}, lines {}/{:?} -> {}",
                    m.rendered_height,
                    req.box_height,
                    m.line_count,
                    req.max_lines,
                    if height_ok && lines_ok { "fits" } else { "overflows" }
                );
                Ok(height_ok && lines_ok)
            }
            Err(MeasureError::Layout(msg)) => {
                warn!("probe size {size}: layout failed ({msg}), treating as overflow");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn finish(&self, font_size: u32, outcome: FitOutcome) -> FitResult {
        debug!(
            "resolve: size {font_size} ({outcome:?}) after {} probes",
            self.probes
        );
        FitResult {
            font_size,
            outcome,
            probes: self.probes,
        }
    }

    fn short_circuit(&self, min_size: u32, err: &MeasureError) -> FitResult {
        debug!("resolve: {err}, using min size {min_size}");
        FitResult {
            font_size: min_size,
            outcome: FitOutcome::FittedWithinRange,
            probes: self.probes,
        }
    }
}

// ===================================================================
// Tests
// ===================================================================
