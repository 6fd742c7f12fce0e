/// Timing and normalized length of one cue, as the mapper consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub start_ms: i64,
    pub end_ms: i64,
    /// Character count of the normalized cue text, separator included. Never zero.
    pub length: usize,
}

impl LedgerEntry {
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Forward-only queue of cue entries.
///
/// Popping moves an index cursor; entries behind it are never handed out again,
/// so a ledger can be read end to end exactly once.
#[derive(Debug, Clone, Default)]
pub struct CueLedger {
    entries: Vec<LedgerEntry>,
    next: usize,
}

impl CueLedger {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries, next: 0 }
    }

    pub fn pop(&mut self) -> Option<LedgerEntry> {
        let entry = self.entries.get(self.next).copied()?;
        self.next += 1;
        Some(entry)
    }

    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.next
    }

    #[cfg(test)]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Sum of all entry lengths, consumed or not.
    #[cfg(test)]
    pub fn total_length(&self) -> usize {
        self.entries.iter().map(|e| e.length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start_ms: i64, end_ms: i64, length: usize) -> LedgerEntry {
        LedgerEntry {
            start_ms,
            end_ms,
            length,
        }
    }

    #[test]
    fn pops_in_order_then_exhausts() {
        let mut ledger = CueLedger::new(vec![entry(0, 10, 3), entry(10, 20, 4)]);
        assert_eq!(ledger.remaining(), 2);
        assert_eq!(ledger.pop(), Some(entry(0, 10, 3)));
        assert_eq!(ledger.pop(), Some(entry(10, 20, 4)));
        assert!(ledger.is_exhausted());
        assert_eq!(ledger.pop(), None);
        assert_eq!(ledger.pop(), None);
    }

    #[test]
    fn total_length_ignores_cursor() {
        let mut ledger = CueLedger::new(vec![entry(0, 10, 3), entry(10, 20, 4)]);
        ledger.pop();
        assert_eq!(ledger.total_length(), 7);
    }
}
