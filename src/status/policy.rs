//! Health verdict: active checks beat passive inference

/// Which signal decided a service's health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthSource {
    /// The proxy's own health gauge
    Active,
    /// No gauge for this backend; reachability stands in
    Inferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthVerdict {
    pub healthy: bool,
    pub source: HealthSource,
}

pub fn resolve_health(active: Option<bool>, reachable: bool) -> HealthVerdict {
    match (active, reachable) {
        (Some(true), _) => HealthVerdict {
            healthy: true,
            source: HealthSource::Active,
        },
        (Some(false), _) => HealthVerdict {
            healthy: false,
            source: HealthSource::Active,
        },
        (None, true) => HealthVerdict {
            healthy: true,
            source: HealthSource::Inferred,
        },
        (None, false) => HealthVerdict {
            healthy: false,
            source: HealthSource::Inferred,
        },
    }
}
