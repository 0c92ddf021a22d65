use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// UDP listener knobs for the detection service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:5806`.
    pub bind: String,
    /// Receive buffer size; one datagram never exceeds this.
    pub max_datagram: usize,
    /// Socket read timeout, also the latency of cancellation.
    pub poll_interval_ms: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5806".to_string(),
            max_datagram: 65507,
            poll_interval_ms: 100,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
}
