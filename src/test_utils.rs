//! Shared test utilities and arbitrary generators for property-based testing.

use crate::types::JobKey;
use proptest::prelude::*;

pub fn arb_job_key() -> impl Strategy<Value = JobKey> {
    // A small alphabet keeps duplicate keys likely, which is what coalescing
    // properties want to see.
    "[a-d]{1,2}-[0-9]{1,2}".prop_map(JobKey::new)
}

pub fn arb_status_code() -> impl Strategy<Value = u16> {
    100u16..600
}
