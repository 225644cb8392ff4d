//! Output side of the bridge: hands converted records to the messaging layer.

use serde::Serialize;
use std::io::Write;
use tracing::trace;

use crate::convert::FlightStatusRecord;
use crate::error::Result;
use crate::messages::{ImuEstimate, PoseEstimate, RigidTransform};

#[cfg(test)]
use mockall::automock;

/// Any record produced by the bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputMessage {
    Pose(PoseEstimate),
    Imu(ImuEstimate),
    Transform(RigidTransform),
    FlightStatus(FlightStatusRecord),
}

impl OutputMessage {
    /// Short name matching the serialized `kind` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            OutputMessage::Pose(_) => "pose",
            OutputMessage::Imu(_) => "imu",
            OutputMessage::Transform(_) => "transform",
            OutputMessage::FlightStatus(_) => "flight_status",
        }
    }
}

/// Sink for converted records.
#[cfg_attr(test, automock)]
pub trait Publisher: Send {
    /// Publishes one record.
    ///
    /// # Errors
    ///
    /// Returns error if the record cannot be delivered
    fn publish(&mut self, message: &OutputMessage) -> Result<()>;
}

/// Writes each record as one JSON object per line.
///
/// Non-finite vector and quaternion components are written as `"NaN"`,
/// `"inf"` or `"-inf"` (see [`crate::messages`]).
///
/// # Examples
///
/// ```
/// use tello_bridge::bridge::publisher::{JsonlPublisher, OutputMessage, Publisher};
/// use tello_bridge::convert::convert_pose;
/// use tello_bridge::messages::Time;
/// use tello_bridge::telemetry::types::TelemetryLog;
///
/// let mut publisher = JsonlPublisher::new(Vec::new());
/// let pose = convert_pose(Time::default(), "odom", &TelemetryLog::default());
/// publisher.publish(&OutputMessage::Pose(pose))?;
///
/// let out = String::from_utf8(publisher.into_inner()).unwrap();
/// assert!(out.starts_with(r#"{"kind":"pose""#));
/// # Ok::<(), tello_bridge::error::TelloBridgeError>(())
/// ```
#[derive(Debug)]
pub struct JsonlPublisher<W: Write> {
    writer: W,
    published: u64,
}

impl<W: Write> JsonlPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            published: 0,
        }
    }

    /// Number of records written so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Consumes the publisher, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Publisher for JsonlPublisher<W> {
    fn publish(&mut self, message: &OutputMessage) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        self.published += 1;
        trace!("Published {} record", message.kind());
        Ok(())
    }
}
