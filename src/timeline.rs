use crate::{
    assemble::Assembly,
    error::{RealignError, Result},
    ledger::{CueLedger, LedgerEntry},
    model::{CharSpan, Segment},
};

/// Merge-join of sentence spans against cue intervals.
///
/// Yields one segment per span, lazily. Each boundary time is interpolated
/// linearly inside the cue that contains the span's last character. The
/// iterator fuses after the first error.
pub struct TimelineMapper<'a, I> {
    assembly: &'a Assembly,
    spans: I,
    ledger: CueLedger,
    current: Option<LedgerEntry>,
    cursor: usize,
    last_boundary_ms: i64,
    emitted: usize,
    failed: bool,
}

impl<'a, I> TimelineMapper<'a, I>
where
    I: Iterator<Item = CharSpan>,
{
    pub fn new(assembly: &'a Assembly, spans: impl IntoIterator<IntoIter = I>) -> Self {
        let mut ledger = assembly.ledger().clone();
        let current = ledger.pop();
        Self {
            assembly,
            spans: spans.into_iter(),
            ledger,
            current,
            cursor: 0,
            last_boundary_ms: current.map(|c| c.start_ms).unwrap_or(0),
            emitted: 0,
            failed: false,
        }
    }

    fn resolve(&mut self, span: CharSpan) -> Result<Segment> {
        let offset = span.end;
        if offset < self.cursor {
            return Err(RealignError::SpanOutOfOrder {
                offset,
                cursor: self.cursor,
            });
        }

        let cue = loop {
            let Some(cue) = self.current else {
                return Err(RealignError::LedgerExhausted {
                    offset,
                    emitted: self.emitted,
                });
            };
            if offset < self.cursor + cue.length {
                break cue;
            }
            self.cursor += cue.length;
            self.current = self.ledger.pop();
        };

        let consumed = (offset - self.cursor + 1) as i64;
        let end_ms = cue.start_ms + consumed * cue.duration_ms() / cue.length as i64;

        let segment = Segment::new(
            self.last_boundary_ms,
            end_ms,
            self.assembly.slice(span).trim(),
        );
        self.last_boundary_ms = end_ms;
        self.emitted += 1;
        Ok(segment)
    }
}

impl<I> Iterator for TimelineMapper<'_, I>
where
    I: Iterator<Item = CharSpan>,
{
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let span = self.spans.next()?;
        let out = self.resolve(span);
        if out.is_err() {
            self.failed = true;
        }
        Some(out)
    }
}

/// Map every span, failing the whole run on the first fault.
pub fn map_timeline(assembly: &Assembly, spans: Vec<CharSpan>) -> Result<Vec<Segment>> {
    TimelineMapper::new(assembly, spans).collect()
}
