use crate::entities::*;

/// Position of a gate inside the terminal building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateLocation {
    pub building: String,
    pub floor: String,
    pub map_url: Option<String>,
}

pub trait IndoorMapGateway {
    fn locate_gate(&self, airport: &IataCode, terminal: &str, gate: &str) -> Option<GateLocation>;
}
