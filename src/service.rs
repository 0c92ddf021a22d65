//! Thin transport adapter: UDP datagrams in, localization reports out.
//!
//! The geometry core is stateless; everything here is plumbing around it.
//! [`process_payload`] is the pure part (text in, report out) and
//! [`DetectionListener`] wraps it in a blocking receive loop that stops when
//! its [`CancelToken`] is cancelled.
use crate::config::ListenerConfig;
use crate::locator::TorusLocator;
use crate::payload::{parse_payload, PayloadError, RowError};
use crate::types::{Detection, Localization};
use log::{debug, info, warn};
use serde::Serialize;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared stop flag for the listen loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Located { localization: Localization },
    Failed { kind: &'static str, message: String },
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub detection: Detection,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadReport {
    pub reports: Vec<DetectionReport>,
    pub rejected_rows: Vec<RowError>,
}

impl PayloadReport {
    pub fn located(&self) -> impl Iterator<Item = &Localization> {
        self.reports.iter().filter_map(|r| match &r.outcome {
            Outcome::Located { localization } => Some(localization),
            Outcome::Failed { .. } => None,
        })
    }

    pub fn failure_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed { .. }))
            .count()
    }
}

/// Parse a CSV payload and localize every detection in it.
pub fn process_payload(locator: &TorusLocator, text: &str) -> Result<PayloadReport, PayloadError> {
    let parsed = parse_payload(text)?;
    let results = locator.locate_batch(&parsed.detections);
    let reports = parsed
        .detections
        .into_iter()
        .zip(results)
        .map(|(detection, result)| DetectionReport {
            detection,
            outcome: match result {
                Ok(localization) => Outcome::Located { localization },
                Err(err) => Outcome::Failed {
                    kind: err.kind(),
                    message: err.to_string(),
                },
            },
        })
        .collect();
    Ok(PayloadReport {
        reports,
        rejected_rows: parsed.rejected,
    })
}

/// Emit one log line per detection in the report.
pub fn log_report(report: &PayloadReport) {
    for r in &report.reports {
        let label = r.detection.label.as_deref().unwrap_or("-");
        match &r.outcome {
            Outcome::Located { localization: l } => info!(
                "torus [{}] range={:.2} orientation={:.2}deg confidence={:.2} bearing={:.2}deg position=({:.2}, {:.2}, {:.2})",
                label,
                l.estimate.distance,
                l.estimate.orientation.to_degrees(),
                l.estimate.confidence,
                l.bearing.to_degrees(),
                l.position.x,
                l.position.y,
                l.position.z
            ),
            Outcome::Failed { kind, message } => {
                warn!("torus [{}] rejected ({}): {}", label, kind, message)
            }
        }
    }
}

/// Counters accumulated by [`DetectionListener::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerStats {
    pub datagrams: usize,
    pub malformed: usize,
    pub located: usize,
    pub failed: usize,
}

/// Blocking UDP receiver feeding payloads into a [`TorusLocator`].
pub struct DetectionListener {
    socket: UdpSocket,
    buffer: Vec<u8>,
    locator: TorusLocator,
}

impl DetectionListener {
    pub fn bind(config: &ListenerConfig, locator: TorusLocator) -> io::Result<Self> {
        let socket = UdpSocket::bind(config.bind.as_str())?;
        let poll = Duration::from_millis(config.poll_interval_ms.max(1));
        socket.set_read_timeout(Some(poll))?;
        Ok(Self {
            socket,
            buffer: vec![0u8; config.max_datagram.max(1)],
            locator,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive and process datagrams until `token` is cancelled.
    ///
    /// `on_report` sees every successfully parsed payload.
    pub fn run<F>(&mut self, token: &CancelToken, mut on_report: F) -> io::Result<ListenerStats>
    where
        F: FnMut(&PayloadReport),
    {
        let mut stats = ListenerStats::default();
        info!("listening for detections on {}", self.local_addr()?);
        while !token.is_cancelled() {
            let (len, peer) = match self.socket.recv_from(&mut self.buffer) {
                Ok(v) => v,
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                    continue
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            stats.datagrams += 1;
            debug!("datagram of {} bytes from {}", len, peer);

            let text = match std::str::from_utf8(&self.buffer[..len]) {
                Ok(t) => t,
                Err(e) => {
                    warn!("dropping non UTF-8 datagram from {}: {}", peer, e);
                    stats.malformed += 1;
                    continue;
                }
            };
            match process_payload(&self.locator, text) {
                Ok(report) => {
                    let failed = report.failure_count();
                    stats.failed += failed;
                    stats.located += report.reports.len() - failed;
                    on_report(&report);
                }
                Err(e) => {
                    warn!("dropping payload from {}: {}", peer, e);
                    stats.malformed += 1;
                }
            }
        }
        info!(
            "listener stopped: {} datagrams, {} located, {} failed, {} malformed",
            stats.datagrams, stats.located, stats.failed, stats.malformed
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;

    fn locator() -> TorusLocator {
        RuntimeConfig::default().build_locator().unwrap()
    }

    #[test]
    fn payload_report_keeps_order_and_failures() {
        let text = "xmin,ymin,xmax,ymax,confidence,class,name\n\
                    270,200,370,260,0.9,0,a\n\
                    270,200,370,200,0.9,0,b\n\
                    1,2\n\
                    600,100,700,200,0.9,0,c\n";
        let report = process_payload(&locator(), text).unwrap();
        assert_eq!(report.reports.len(), 3);
        assert_eq!(report.rejected_rows.len(), 1);
        assert_eq!(report.located().count(), 1);
        assert_eq!(report.failure_count(), 2);
        assert!(matches!(
            report.reports[1].outcome,
            Outcome::Failed {
                kind: "degenerate_geometry",
                ..
            }
        ));
        assert!(matches!(
            report.reports[2].outcome,
            Outcome::Failed {
                kind: "out_of_bounds",
                ..
            }
        ));
        log_report(&report);
    }

    #[test]
    fn report_serializes_with_status_tag() {
        let report =
            process_payload(&locator(), "xmin,ymin,xmax,ymax,confidence,class\n270,200,370,260,0.9,0")
                .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        let first = &json["reports"][0];
        assert_eq!(first["status"], "located");
        assert!(first["localization"]["estimate"]["distance"].as_f64().unwrap() > 0.0);
        assert_eq!(first["detection"]["xmin"], 270.0);
    }

    #[test]
    fn cancelled_token_stops_listener_immediately() {
        let cfg = ListenerConfig {
            bind: "127.0.0.1:0".to_string(),
            poll_interval_ms: 10,
            ..Default::default()
        };
        let mut listener = DetectionListener::bind(&cfg, locator()).unwrap();
        let token = CancelToken::new();
        token.cancel();
        let stats = listener.run(&token, |_| {}).unwrap();
        assert_eq!(stats, ListenerStats::default());
    }
}
