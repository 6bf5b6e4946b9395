//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::geometry::Geometry;
use crate::transport::mock::MockTransport;
use crate::types::KeyA;
use crate::{Result, device};

/// Initialize a Reader<Initialized> backed by a clone of `mock`. The caller
/// keeps `mock` for assertions.
#[doc(hidden)]
pub fn initialized_mock_reader(
    mock: &MockTransport,
    geometry: Geometry,
) -> Result<device::Reader<device::Initialized>> {
    device::Reader::new_with_transport(Box::new(mock.clone()), geometry).initialize()
}

/// Small three-sector layout: {1,2} under trailer 3, {8,9,10} under
/// trailer 11 and {12,13} under trailer 15. The default layout config fits
/// it, with five text blocks from #8.
#[doc(hidden)]
pub fn small_geometry() -> Result<Geometry> {
    Geometry::builder()
        .sector(3, &[1, 2], KeyA::DEFAULT)
        .sector(11, &[8, 9, 10], KeyA::DEFAULT)
        .sector(15, &[12, 13], KeyA::DEFAULT)
        .build()
}
