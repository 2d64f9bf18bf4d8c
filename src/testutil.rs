//! Shared test fixtures: canonical element sets and epochs.

pub const ISS_NAME: &str = "ISS (ZARYA)";
pub const ISS_LINE1: &str =
    "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
pub const ISS_LINE2: &str =
    "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

pub const MOLNIYA_NAME: &str = "MOLNIYA 2-14";
pub const MOLNIYA_LINE1: &str =
    "1 08195U 75081A   06176.33215444  .00000099  00000-0  11873-3 0   813";
pub const MOLNIYA_LINE2: &str =
    "2 08195  64.1586 279.0717 6877146 264.7651  20.2257  2.00491383225656";

pub fn iss_text() -> String {
    format!("{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\n")
}

pub fn molniya_text() -> String {
    format!("{MOLNIYA_NAME}\n{MOLNIYA_LINE1}\n{MOLNIYA_LINE2}\n")
}

pub fn iss_tle() -> satkit::TLE {
    satkit::TLE::load_2line(ISS_LINE1, ISS_LINE2).unwrap()
}

/// Day 264.51782528 of 2008.
pub fn iss_epoch() -> satkit::Instant {
    satkit::Instant::from_datetime(2008, 9, 20, 12, 25, 40.0).unwrap()
}
