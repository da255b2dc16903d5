use hifitime::{efmt::Format, Epoch};
use regex::Regex;
use std::{str::FromStr, sync::LazyLock};

use crate::{
    constants::Seconds,
    tracker_errors::{TrackerError, TrackerResult},
};

/// CCSDS day-of-year timestamps, e.g. `2023-063T12:00:00.000Z`
static OEM_EPOCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-\d{3}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z?$")
        .expect("OEM epoch regex must compile")
});

static OEM_FORMAT: LazyLock<Format> =
    LazyLock::new(|| Format::from_str("%Y-%jT%H:%M:%S").expect("OEM format must be valid"));

static OEM_FORMAT_SUBSECOND: LazyLock<Format> = LazyLock::new(|| {
    Format::from_str("%Y-%jT%H:%M:%S.%f").expect("OEM format must be valid")
});

/// Parse an OEM epoch string in the day-of-year format into a UTC [`Epoch`].
///
/// Arguments
/// ---------
/// * `epoch`: a timestamp formatted as `YYYY-DDDTHH:MM:SS[.fff][Z]`
///
/// Return
/// ------
/// * the corresponding epoch in the UTC time scale
/// * [`TrackerError::InvalidEpoch`] if the string is malformed or names a non-existent date
pub fn parse_oem_epoch(epoch: &str) -> TrackerResult<Epoch> {
    let invalid = || TrackerError::InvalidEpoch(epoch.to_string());

    let trimmed = epoch.trim();
    let caps = OEM_EPOCH_REGEX.captures(trimmed).ok_or_else(invalid)?;
    let year: i32 = caps[1].parse().map_err(|_| invalid())?;

    let format = if caps.get(2).is_some() {
        *OEM_FORMAT_SUBSECOND
    } else {
        *OEM_FORMAT
    };
    let body = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    let parsed = Epoch::from_str_with_format(body, format).map_err(|_| invalid())?;

    // hifitime rolls an out-of-range day of year into a neighbouring year
    if parsed.to_gregorian_utc().0 != year {
        return Err(invalid());
    }
    Ok(parsed)
}

/// Signed number of SI seconds elapsed from `from` to `to`.
///
/// The result is positive when `to` is later than `from`.
pub fn seconds_between(from: Epoch, to: Epoch) -> Seconds {
    (to - from).to_seconds()
}

/// Current wall-clock instant in UTC.
pub fn now_utc() -> TrackerResult<Epoch> {
    Ok(Epoch::now()?)
}
