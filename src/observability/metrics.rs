//! Metrics collection.
//!
//! # Metrics
//! - `chain_stage_executions_total` (counter): stages that accepted a request, by stage
//! - `chain_stage_halts_total` (counter): stages that halted a request, by stage and reason
//! - `chain_invocations_total` (counter): finished invocations, by outcome (`completed`, `halted`)
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! host process installs a recorder.

pub const STAGE_EXECUTIONS: &str = "chain_stage_executions_total";
pub const STAGE_HALTS: &str = "chain_stage_halts_total";
pub const INVOCATIONS: &str = "chain_invocations_total";

pub fn record_stage_executed(stage: &str) {
    ::metrics::counter!(STAGE_EXECUTIONS, "stage" => stage.to_string()).increment(1);
}

pub fn record_stage_halted(stage: &str, reason: &'static str) {
    ::metrics::counter!(STAGE_HALTS, "stage" => stage.to_string(), "reason" => reason).increment(1);
}

pub fn record_invocation(outcome: &'static str) {
    ::metrics::counter!(INVOCATIONS, "outcome" => outcome).increment(1);
}
