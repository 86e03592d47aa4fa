use rassid_entities::airport::IataCode;

pub use rassid_core::gateways::indoor_map::{GateLocation, IndoorMapGateway};

/// Terminal layout entry loaded from the deployment configuration.
#[derive(Debug, Clone)]
pub struct TerminalLocation {
    pub airport: IataCode,
    pub terminal: String,
    pub building: String,
    pub floor: String,
}

/// Indoor positioning backed by a static table of terminal layouts.
///
/// Airports rarely rebuild their terminals, so a config table covers
/// what an external wayfinding service would. Unknown gates simply
/// have no location.
#[derive(Debug, Clone, Default)]
pub struct StaticIndoorMap {
    pub map_viewer_url: Option<String>,
    pub entries: Vec<TerminalLocation>,
}

impl IndoorMapGateway for StaticIndoorMap {
    fn locate_gate(&self, airport: &IataCode, terminal: &str, gate: &str) -> Option<GateLocation> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.airport == *airport && entry.terminal == terminal)?;
        let map_url = self
            .map_viewer_url
            .as_ref()
            .map(|base| format!("{}/{}/{}/{}", base.trim_end_matches('/'), airport, terminal, gate));
        Some(GateLocation {
            building: entry.building.clone(),
            floor: entry.floor.clone(),
            map_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> StaticIndoorMap {
        StaticIndoorMap {
            map_viewer_url: Some("https://maps.rassid.example.com".into()),
            entries: vec![
                TerminalLocation {
                    airport: "RUH".parse().unwrap(),
                    terminal: "T1".into(),
                    building: "Terminal 1".into(),
                    floor: "2".into(),
                },
                TerminalLocation {
                    airport: "RUH".parse().unwrap(),
                    terminal: "T5".into(),
                    building: "Terminal 5".into(),
                    floor: "1".into(),
                },
            ],
        }
    }

    #[test]
    fn known_terminal_resolves_with_viewer_link() {
        let ruh = "RUH".parse().unwrap();
        let location = map().locate_gate(&ruh, "T5", "B7").unwrap();
        assert_eq!(location.building, "Terminal 5");
        assert_eq!(location.floor, "1");
        assert_eq!(
            location.map_url.as_deref(),
            Some("https://maps.rassid.example.com/RUH/T5/B7")
        );
    }

    #[test]
    fn unknown_terminal_has_no_location() {
        let jed = "JED".parse().unwrap();
        assert!(map().locate_gate(&jed, "T1", "A1").is_none());
    }
}
