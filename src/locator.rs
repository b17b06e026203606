//! Single-symbol corruption locator for the `M=2` (P/Q) case.
//!
//! Given a stripe's stored P and Q parity chunks and freshly recomputed P'/Q'
//! from the (possibly corrupted) data rows, classifies which single disk -
//! data, P, or Q - diverged, per the classic RAID-6 `deltaP`/`deltaQ`
//! reasoning: `deltaP = P xor P'`, `deltaQ = Q xor Q'`; if both are zero the
//! stripe is clean; if exactly one is zero the corruption is confined to the
//! other parity disk; if both are nonzero, `deltaQ / deltaP` is the
//! Vandermonde base `j+1` of the corrupted data disk `j`.

use crate::field::Field;

/// Health of one stripe as the locator understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeHealth {
    /// No divergence found in any byte scanned so far.
    Clean,
    /// Every diverging byte agreed on the same disk index.
    Located(usize),
    /// Diverging bytes implicated more than one disk, or a `deltaQ/deltaP`
    /// ratio did not correspond to any disk in range - the single-symbol
    /// assumption this locator relies on does not hold for this stripe.
    Unlocatable,
}

/// Incremental scan over one stripe's bytes. Exists so a caller streaming a
/// large chunk from a [`Store`](crate::store::Store) can feed bytes as they
/// arrive without buffering the whole chunk twice.
pub struct Locator<'f> {
    field: &'f Field,
    /// Number of data disks; the P disk is index `n`, the Q disk is `n+1`.
    n: usize,
    candidate: Option<usize>,
    conflict: bool,
}

impl<'f> Locator<'f> {
    pub fn new(field: &'f Field, n: usize) -> Self {
        Locator {
            field,
            n,
            candidate: None,
            conflict: false,
        }
    }

    /// Feed one byte offset's stored/recomputed P and Q values.
    pub fn observe(&mut self, p: u8, p_prime: u8, q: u8, q_prime: u8) {
        if self.conflict {
            return;
        }
        let dp = self.field.sub(p, p_prime);
        let dq = self.field.sub(q, q_prime);
        if dp == 0 && dq == 0 {
            return;
        }
        let this = self.classify_byte(dp, dq);
        match (self.candidate, this) {
            (None, Some(d)) => self.candidate = Some(d),
            (Some(prev), Some(d)) if prev == d => {}
            _ => self.conflict = true,
        }
    }

    /// Classify a single byte's deltas to a disk index, or `None` if the
    /// implied ratio does not correspond to any disk.
    fn classify_byte(&self, dp: u8, dq: u8) -> Option<usize> {
        if dp != 0 && dq == 0 {
            return Some(self.n); // P disk itself
        }
        if dp == 0 && dq != 0 {
            return Some(self.n + 1); // Q disk itself
        }
        // Both nonzero: deltaQ/deltaP = (j+1)^1 / (j+1)^0 ... but our
        // Vandermonde's row 1 is the base itself, so the ratio directly
        // yields `j+1`.
        let ratio = self.field.div(dq, dp).ok()?;
        if ratio == 0 {
            return None;
        }
        let j = ratio as usize - 1;
        if j < self.n {
            Some(j)
        } else {
            None
        }
    }

    /// Current classification after all observed bytes.
    pub fn state(&self) -> StripeHealth {
        if self.conflict {
            return StripeHealth::Unlocatable;
        }
        match self.candidate {
            None => StripeHealth::Clean,
            Some(d) => StripeHealth::Located(d),
        }
    }
}

/// Scan a whole stripe's P/P'/Q/Q' chunks (equal length) to a final classification.
pub fn locate_stripe(field: &Field, n: usize, p: &[u8], p_prime: &[u8], q: &[u8], q_prime: &[u8]) -> StripeHealth {
    let mut locator = Locator::new(field, n);
    let len = p.len();
    for k in 0..len {
        locator.observe(p[k], p_prime[k], q[k], q_prime[k]);
    }
    locator.state()
}
