//! # Bridge Module
//!
//! Wires the pure converters to their collaborators.
//!
//! This module handles:
//! - Stamping converted records with the configured frame ids
//! - Notifying flight status observers (tracing, recording) after mapping
//! - Replaying JSON Lines telemetry snapshots into a [`Publisher`]
//!
//! ## Input Format
//!
//! One snapshot per line, tagged by `kind`:
//!
//! ```text
//! {"kind":"log","mvo":{"pos_x":100.0,...},"imu":{"q0":1.0,...}}
//! {"kind":"flight","battery_low":0,"battery_percentage":87,...}
//! ```

pub mod observer;
pub mod publisher;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::config::FramesConfig;
use crate::convert::{convert_imu, convert_pose, convert_transform, map_flight_status};
use crate::error::Result;
use crate::messages::Time;
use crate::telemetry::types::{FlightStatusLog, TelemetryLog};

use observer::StatusObserver;
use publisher::{OutputMessage, Publisher};

/// Frame ids used to tag output records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameIds {
    /// Frame of the pose and parent of the transform
    pub odom: String,
    /// Frame of the IMU record
    pub imu: String,
    /// Child frame of the transform
    pub drone: String,
}

impl FrameIds {
    pub fn new(odom: impl Into<String>, imu: impl Into<String>, drone: impl Into<String>) -> Self {
        Self {
            odom: odom.into(),
            imu: imu.into(),
            drone: drone.into(),
        }
    }
}

impl From<&FramesConfig> for FrameIds {
    fn from(config: &FramesConfig) -> Self {
        Self::new(
            config.odom_frame_id.clone(),
            config.imu_frame_id.clone(),
            config.drone_frame_id.clone(),
        )
    }
}

/// One line of replay input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Snapshot {
    Log(TelemetryLog),
    Flight(FlightStatusLog),
}

/// Counters returned by [`replay`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    /// Telemetry snapshots converted
    pub logs: u64,
    /// Flight status snapshots mapped
    pub flight_status: u64,
    /// Malformed or unmappable lines
    pub skipped: u64,
}

/// Converts snapshots into output records for a fixed set of frames.
///
/// # Examples
///
/// ```
/// use tello_bridge::bridge::{Bridge, FrameIds};
/// use tello_bridge::messages::Time;
/// use tello_bridge::telemetry::types::TelemetryLog;
///
/// let bridge = Bridge::new(FrameIds::new("odom", "imu", "base_link"));
/// let [pose, imu, tf] = bridge.handle_log(Time::default(), &TelemetryLog::default());
/// assert_eq!(pose.kind(), "pose");
/// assert_eq!(imu.kind(), "imu");
/// assert_eq!(tf.kind(), "transform");
/// ```
pub struct Bridge {
    frames: FrameIds,
    observers: Vec<Box<dyn StatusObserver>>,
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("frames", &self.frames)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Bridge {
    /// Creates a bridge with no observers.
    pub fn new(frames: FrameIds) -> Self {
        Self {
            frames,
            observers: Vec::new(),
        }
    }

    /// Adds a flight status observer, builder style.
    #[must_use]
    pub fn with_observer(mut self, observer: impl StatusObserver + 'static) -> Self {
        self.add_observer(Box::new(observer));
        self
    }

    /// Adds a flight status observer.
    pub fn add_observer(&mut self, observer: Box<dyn StatusObserver>) {
        self.observers.push(observer);
    }

    pub fn frames(&self) -> &FrameIds {
        &self.frames
    }

    /// Converts a telemetry snapshot into pose, IMU and odom -> drone transform.
    #[must_use]
    pub fn handle_log(&self, stamp: Time, log: &TelemetryLog) -> [OutputMessage; 3] {
        [
            OutputMessage::Pose(convert_pose(stamp, &self.frames.odom, log)),
            OutputMessage::Imu(convert_imu(stamp, &self.frames.imu, log)),
            OutputMessage::Transform(convert_transform(
                stamp,
                &self.frames.odom,
                &self.frames.drone,
                log,
            )),
        ]
    }

    /// Maps a flight status snapshot, then notifies every observer.
    ///
    /// Observers are not called when mapping fails.
    ///
    /// # Errors
    ///
    /// Propagates mapping errors from [`map_flight_status`]
    pub fn handle_flight_status(&mut self, log: &FlightStatusLog) -> Result<OutputMessage> {
        let record = map_flight_status(log)?;
        for observer in &mut self.observers {
            observer.observe(&record);
        }
        Ok(OutputMessage::FlightStatus(record))
    }
}

/// Replays JSON Lines snapshots from `reader` through `bridge` into `publisher`.
///
/// Blank lines are ignored. Malformed lines and flight status snapshots that
/// fail to map are logged and counted as skipped. `clock` stamps each
/// telemetry snapshot.
///
/// # Errors
///
/// Returns error if reading the input or publishing fails
pub async fn replay<R, P, C>(
    reader: R,
    bridge: &mut Bridge,
    publisher: &mut P,
    mut clock: C,
) -> Result<ReplayStats>
where
    R: AsyncBufRead + Unpin,
    P: Publisher + ?Sized,
    C: FnMut() -> Time,
{
    let mut lines = reader.lines();
    let mut stats = ReplayStats::default();
    let mut line_no: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let snapshot: Snapshot = match serde_json::from_str(trimmed) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Skipping malformed snapshot on line {}: {}", line_no, e);
                stats.skipped += 1;
                continue;
            }
        };

        match snapshot {
            Snapshot::Log(log) => {
                for message in bridge.handle_log(clock(), &log) {
                    publisher.publish(&message)?;
                }
                stats.logs += 1;
            }
            Snapshot::Flight(log) => match bridge.handle_flight_status(&log) {
                Ok(message) => {
                    publisher.publish(&message)?;
                    stats.flight_status += 1;
                }
                Err(e) => {
                    warn!("Skipping flight status on line {}: {}", line_no, e);
                    stats.skipped += 1;
                }
            },
        }
    }

    debug!(
        "Replay finished: {} logs, {} flight status, {} skipped",
        stats.logs, stats.flight_status, stats.skipped
    );
    Ok(stats)
}
