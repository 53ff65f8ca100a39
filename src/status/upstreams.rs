//! Upstream usage lookup

use std::collections::HashMap;

use crate::admin::types::UpstreamRecord;

/// Request counters for one upstream address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpstreamStats {
    pub num_requests: u64,
    pub fails: u64,
}

/// Index records by address; a repeated address keeps the last record
pub fn index_upstreams(records: Vec<UpstreamRecord>) -> HashMap<String, UpstreamStats> {
    records
        .into_iter()
        .map(|record| {
            (
                record.address,
                UpstreamStats {
                    num_requests: record.num_requests,
                    fails: record.fails,
                },
            )
        })
        .collect()
}
