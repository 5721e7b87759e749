use crate::error::{Field, PlanError, Result, SampleFault};
use crate::geo::GeoSample;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Raw text collected for one `trkpt` before it is converted.
#[derive(Debug, Default)]
struct PendingPoint {
    lat: Option<String>,
    lon: Option<String>,
    ele: Option<String>,
    in_ele: bool,
}

impl PendingPoint {
    fn open(start: &BytesStart) -> Self {
        let mut point = PendingPoint::default();
        for attr in start.attributes().flatten() {
            let value = String::from_utf8_lossy(&attr.value).into_owned();
            match attr.key.local_name().as_ref() {
                b"lat" => point.lat = Some(value),
                b"lon" => point.lon = Some(value),
                _ => {}
            }
        }
        point
    }

    fn finish(self, index: usize) -> Result<GeoSample> {
        Ok(GeoSample {
            lat: numeric(self.lat.as_deref(), Field::Latitude, index)?,
            lon: numeric(self.lon.as_deref(), Field::Longitude, index)?,
            ele: numeric(self.ele.as_deref(), Field::Elevation, index)?,
        })
    }
}

fn numeric(raw: Option<&str>, field: Field, index: usize) -> Result<f64> {
    let fault = match raw.map(|s| s.trim().parse::<f64>()) {
        None => SampleFault::Missing(field),
        Some(Ok(value)) if value.is_finite() => return Ok(value),
        Some(_) => SampleFault::NotNumeric(field),
    };
    Err(PlanError::MalformedTrack { index, fault })
}

/// Reads every `trkpt` of a GPX document, in document order.
///
/// Each point needs numeric `lat`/`lon` attributes and an `ele` child; the
/// first offending point aborts the whole read. Only the first `ele` of a
/// point is used.
pub fn extract_samples(input: &[u8]) -> Result<Vec<GeoSample>> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut samples = Vec::new();
    let mut current: Option<PendingPoint> = None;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Err(e) => {
                return Err(PlanError::InvalidDocument(format!(
                    "Error at position {}: {:?}",
                    reader.buffer_position(),
                    e
                )));
            }
            Ok(Event::Eof) => break,
            Ok(event) => event.into_owned(),
        };

        match event {
            Event::Start(ref e) => {
                if e.local_name().as_ref() == b"trkpt" {
                    current = Some(PendingPoint::open(e));
                } else if let Some(point) = current.as_mut()
                    && e.local_name().as_ref() == b"ele"
                    && point.ele.is_none()
                {
                    point.in_ele = true;
                    point.ele = Some(String::new());
                }
            }

            Event::Empty(ref e) => {
                if e.local_name().as_ref() == b"trkpt" {
                    let index = samples.len();
                    samples.push(PendingPoint::open(e).finish(index)?);
                } else if let Some(point) = current.as_mut()
                    && e.local_name().as_ref() == b"ele"
                    && point.ele.is_none()
                {
                    point.ele = Some(String::new());
                }
            }

            Event::End(ref e) => {
                if e.local_name().as_ref() == b"trkpt" {
                    if let Some(point) = current.take() {
                        let index = samples.len();
                        samples.push(point.finish(index)?);
                    }
                } else if let Some(point) = current.as_mut()
                    && e.local_name().as_ref() == b"ele"
                {
                    point.in_ele = false;
                }
            }

            Event::Text(ref e) => {
                if let Some(point) = current.as_mut()
                    && point.in_ele
                    && let Some(text) = point.ele.as_mut()
                {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }

            Event::CData(ref e) => {
                if let Some(point) = current.as_mut()
                    && point.in_ele
                    && let Some(text) = point.ele.as_mut()
                {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }

            _ => {}
        }

        buf.clear();
    }

    log::debug!("extracted {} track points", samples.len());
    Ok(samples)
}
