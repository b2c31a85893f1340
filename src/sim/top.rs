use std::io::{BufRead, Write};

use log::{debug, info};

use crate::base::{AccessRecord, AccessResult};
use crate::cache::config::{HierarchyConfig, InclusionPolicy};
use crate::cache::hierarchy::InclusionController;
use crate::cache::stats::HierarchyStats;
use crate::error::SimResult;
use crate::sim::trace::TraceReader;

/// Feeds an access stream through the hierarchy, strictly in order, and
/// hands back one result per access.
#[derive(Debug)]
pub struct TraceRunner {
    controller: InclusionController,
    processed: u64,
}

impl TraceRunner {
    pub fn new(config: &HierarchyConfig, policy: InclusionPolicy) -> SimResult<Self> {
        Ok(Self {
            controller: InclusionController::new(config, policy)?,
            processed: 0,
        })
    }

    pub fn controller(&self) -> &InclusionController {
        &self.controller
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn stats(&self) -> HierarchyStats {
        self.controller.stats()
    }

    pub fn step(&mut self, record: &AccessRecord) -> AccessResult {
        self.processed += 1;
        self.controller.access(record)
    }

    /// Applies `records` in order, passing each result to `sink`.
    ///
    /// Stops at the first error, whether from the record stream or the
    /// sink; results for earlier records have already been delivered.
    /// Returns how many records this call processed.
    pub fn run<I, F>(&mut self, records: I, mut sink: F) -> SimResult<u64>
    where
        I: IntoIterator<Item = SimResult<AccessRecord>>,
        F: FnMut(AccessResult) -> SimResult<()>,
    {
        let start = self.processed;
        for record in records {
            let record = record?;
            let result = self.step(&record);
            sink(result)?;
        }
        let count = self.processed - start;
        debug!("applied {} accesses", count);
        Ok(count)
    }

    /// Parses the trace from `reader` and writes one `"<l1> <l2>"` line per
    /// access to `writer`. The writer is flushed even when the trace is cut
    /// short by a malformed line.
    pub fn run_to_writer<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        mut writer: W,
    ) -> SimResult<u64> {
        let outcome = self.run(TraceReader::new(reader), |result| {
            writeln!(writer, "{}", result)?;
            Ok(())
        });
        writer.flush()?;
        if let Err(err) = &outcome {
            info!("trace stopped after {} accesses: {}", self.processed, err);
        }
        outcome
    }

    pub fn collect<I>(&mut self, records: I) -> SimResult<Vec<AccessResult>>
    where
        I: IntoIterator<Item = SimResult<AccessRecord>>,
    {
        let mut results = Vec::new();
        self.run(records, |result| {
            results.push(result);
            Ok(())
        })?;
        Ok(results)
    }
}
