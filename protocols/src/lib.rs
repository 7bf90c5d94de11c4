//! Wire formats the drone speaks: nikto XML reports in, Lair JSON over HTTP out.

pub mod lair;
pub mod nikto;
