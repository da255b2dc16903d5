use nalgebra::Vector3;
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::tracker_errors::TrackerResult;

use super::{Ephemeris, EphemerisHeader, EphemerisMetadata, StateVector};

// Layout of the NDM/OEM XML document:
// <ndm><oem><header/><body><segment><metadata/><data>COMMENT* stateVector*</data></segment></body></oem></ndm>

#[derive(Debug, Deserialize)]
struct Ndm {
    oem: Oem,
}

#[derive(Debug, Deserialize)]
struct Oem {
    header: EphemerisHeader,
    body: Body,
}

#[derive(Debug, Deserialize)]
struct Body {
    segment: Segment,
}

#[derive(Debug, Deserialize)]
struct Segment {
    metadata: EphemerisMetadata,
    data: SegmentData,
}

#[derive(Debug, Deserialize)]
struct SegmentData {
    #[serde(rename = "COMMENT", default)]
    comments: Vec<String>,

    #[serde(rename = "stateVector", default)]
    state_vectors: Vec<XmlStateVector>,
}

/// Numeric element carrying a `units` attribute, e.g. `<X units="km">-4255.5</X>`
#[derive(Debug, Deserialize)]
struct Component {
    #[serde(rename = "$text")]
    value: f64,
}

#[derive(Debug, Deserialize)]
struct XmlStateVector {
    #[serde(rename = "EPOCH")]
    epoch: String,
    #[serde(rename = "X")]
    x: Component,
    #[serde(rename = "Y")]
    y: Component,
    #[serde(rename = "Z")]
    z: Component,
    #[serde(rename = "X_DOT")]
    x_dot: Component,
    #[serde(rename = "Y_DOT")]
    y_dot: Component,
    #[serde(rename = "Z_DOT")]
    z_dot: Component,
}

impl XmlStateVector {
    fn to_state_vector(&self) -> TrackerResult<StateVector> {
        StateVector::new(
            self.epoch.trim(),
            Vector3::new(self.x.value, self.y.value, self.z.value),
            Vector3::new(self.x_dot.value, self.y_dot.value, self.z_dot.value),
        )
    }
}

/// Parse an OEM XML document into an [`Ephemeris`].
///
/// Arguments
/// ---------
/// * `xml`: the raw NDM/OEM document
///
/// Return
/// ------
/// * the parsed data set; blank `COMMENT` elements become `None` entries
/// * [`crate::tracker_errors::TrackerError::XmlParse`] if the document does not have the
///   expected structure, or [`crate::tracker_errors::TrackerError::InvalidEpoch`] if a state
///   vector carries an unparsable epoch
pub fn parse_oem(xml: &str) -> TrackerResult<Ephemeris> {
    let ndm: Ndm = from_str(xml)?;
    let segment = ndm.oem.body.segment;

    let comments = segment
        .data
        .comments
        .into_iter()
        .map(|comment| {
            let trimmed = comment.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect();

    let state_vectors = segment
        .data
        .state_vectors
        .iter()
        .map(XmlStateVector::to_state_vector)
        .collect::<TrackerResult<Vec<_>>>()?;

    if !state_vectors
        .windows(2)
        .all(|pair| pair[0].instant() <= pair[1].instant())
    {
        tracing::warn!("OEM state vectors are not in ascending epoch order");
    }

    Ok(Ephemeris {
        header: ndm.oem.header,
        metadata: segment.metadata,
        comments,
        state_vectors,
    })
}
