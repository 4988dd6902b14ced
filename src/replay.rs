//! # Call Replay
//!
//! This module reconstructs the recorded history of an instrumented
//! operation and renders it as a human-readable transcript.
//!
//! ## 🎯 What Replay Reads
//!
//! For an [`OperationId`], replay reads the three keys the instrumentation
//! wrappers write - the counter, the inputs log and the outputs log - and
//! pairs the log entries positionally: entry `i` of the inputs belongs to
//! the same invocation as entry `i` of the outputs.
//!
//! When a wrapped operation failed mid-call the two logs diverge in length
//! (see [`crate::instrument`](mod@crate::instrument)). Replay never treats
//! that as an error: it pairs the overlapping prefix and reports the
//! surplus entries separately.
//!
//! ## 🔒 Consistency
//!
//! Replay is read-only and safe to run concurrently with live
//! instrumentation. The three reads are issued together but are not a
//! transaction, so a transcript taken mid-traffic is a point-in-time
//! approximation: the counter may run slightly ahead of the logs.

use crate::error::{RecallError, RecallResult};
use crate::instrument::OperationId;
use crate::store::StoreAdapter;
use std::fmt;

/// One paired invocation: rendered input tuple and rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    /// The rendered argument tuple, e.g. `("a",)`
    pub input: String,

    /// The rendered result
    pub output: String,
}

/// The reconstructed history of one instrumented operation
///
/// Render it with `Display`:
///
/// ```text
/// Cache::store was called 3 times:
/// Cache::store(*("a",)) -> 47405d4e-8d5a-41aa-b6a3-7d2b7c3f4a5e
/// ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTranscript {
    id: OperationId,
    count: i64,
    calls: Vec<CallRecord>,
    unpaired_inputs: Vec<String>,
    unpaired_outputs: Vec<String>,
}

impl CallTranscript {
    /// The operation this transcript describes
    pub fn id(&self) -> &OperationId {
        &self.id
    }

    /// Recorded invocation count (absent counter reads as 0)
    pub fn count(&self) -> i64 {
        self.count
    }

    /// The paired invocations, in recorded order
    pub fn calls(&self) -> &[CallRecord] {
        &self.calls
    }

    /// Input entries with no matching output entry
    ///
    /// Non-empty when an invocation failed after its input was logged but
    /// before its output was.
    pub fn unpaired_inputs(&self) -> &[String] {
        &self.unpaired_inputs
    }

    /// Output entries with no matching input entry
    ///
    /// Only possible when something other than the instrumentation wrappers
    /// wrote to the logs; kept visible rather than silently dropped.
    pub fn unpaired_outputs(&self) -> &[String] {
        &self.unpaired_outputs
    }
}

impl fmt::Display for CallTranscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.id, self.count)?;
        for call in &self.calls {
            write!(f, "\n{}(*{}) -> {}", self.id, call.input, call.output)?;
        }
        Ok(())
    }
}

/// Reconstruct the transcript of the operation named by `id`.
///
/// Reads the counter (absent reads as 0) and both logs in full, then pairs
/// log entries over the overlapping prefix. Issues no writes.
pub async fn replay(store: &dyn StoreAdapter, id: &OperationId) -> RecallResult<CallTranscript> {
    let inputs_key = id.inputs_key();
    let outputs_key = id.outputs_key();

    let (counter, raw_inputs, raw_outputs) = futures::try_join!(
        store.get(id.counter_key()),
        store.list_range(&inputs_key, 0, -1),
        store.list_range(&outputs_key, 0, -1),
    )?;

    let count = match counter {
        None => 0,
        Some(raw) => {
            let text = String::from_utf8_lossy(&raw).into_owned();
            text.parse::<i64>().map_err(|_| {
                RecallError::format(format!(
                    "counter for '{id}' is not a decimal integer: '{text}'"
                ))
            })?
        }
    };

    let mut inputs: Vec<String> = raw_inputs
        .into_iter()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .collect();
    let mut outputs: Vec<String> = raw_outputs
        .into_iter()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .collect();

    let paired = inputs.len().min(outputs.len());
    let unpaired_inputs = inputs.split_off(paired);
    let unpaired_outputs = outputs.split_off(paired);

    let calls = inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| CallRecord { input, output })
        .collect();

    Ok(CallTranscript {
        id: id.clone(),
        count,
        calls,
        unpaired_inputs,
        unpaired_outputs,
    })
}
