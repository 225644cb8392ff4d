//! Observers notified with every mapped flight status record.
//!
//! Mapping itself never logs; diagnostics hang off the [`Bridge`](super::Bridge)
//! through this trait so the converters stay pure.

use tracing::debug;

use crate::convert::FlightStatusRecord;

#[cfg(test)]
use mockall::automock;

/// Receives each successfully mapped [`FlightStatusRecord`].
#[cfg_attr(test, automock)]
pub trait StatusObserver: Send {
    fn observe(&mut self, record: &FlightStatusRecord);
}

/// Emits one `debug!` event per flight status field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn observe(&mut self, record: &FlightStatusRecord) {
        for (name, value) in record.fields() {
            debug!(field = name, %value, "flight status");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::flight_status::{map_flight_status, FieldKind, FLIGHT_STATUS_FIELDS};
    use crate::telemetry::types::{FieldValue, FlightStatusLog};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sample_record() -> FlightStatusRecord {
        let log: FlightStatusLog = FLIGHT_STATUS_FIELDS
            .iter()
            .map(|f| {
                let value = match f.kind {
                    FieldKind::Bool => FieldValue::Bool(false),
                    FieldKind::Int => FieldValue::Int(7),
                    FieldKind::Float => FieldValue::Float(0.5),
                };
                (f.input, value)
            })
            .collect();
        map_flight_status(&log).unwrap()
    }

    #[test]
    fn test_tracing_observer_logs_every_field() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingObserver.observe(&sample_record());
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().count(), FLIGHT_STATUS_FIELDS.len());
        for f in FLIGHT_STATUS_FIELDS {
            assert!(output.contains(f.output), "no log line for {}", f.output);
        }
        assert!(output.contains("value=7"));
    }

    #[test]
    fn test_tracing_observer_silent_above_debug() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingObserver.observe(&sample_record());
        });

        assert!(capture.0.lock().unwrap().is_empty());
    }
}
