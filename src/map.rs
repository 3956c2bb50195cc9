//! HTML map rendering of one day's routes (Leaflet).

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::model::{Day, Depot};
use crate::projection::DayPolylines;
use crate::traits::MapRenderer;

const ROUTE_COLORS: [&str; 5] = ["blue", "green", "red", "purple", "orange"];

/// Everything drawn on a single day's map.
#[derive(Debug, Clone, Copy)]
pub struct DayMap<'a> {
    pub day: Day,
    pub routes: &'a DayPolylines,
    pub depot: &'a Depot,
    /// Annotated on the depot marker when present.
    pub weekly_length_km: Option<f64>,
}

impl DayMap<'_> {
    pub fn day_length_km(&self) -> f64 {
        self.routes
            .values()
            .map(|route| route.length_km())
            .fold(0.0, |total, km| total + km)
    }

    pub fn file_name(&self) -> String {
        format!("map_day_{}.html", self.day.ordinal())
    }
}

#[derive(Serialize)]
struct RouteLayer<'a> {
    color: &'static str,
    popup: String,
    points: &'a [(f64, f64)],
}

#[derive(Serialize)]
struct MapData<'a> {
    center: (f64, f64),
    zoom: u8,
    depot_popup: String,
    routes: Vec<RouteLayer<'a>>,
}

/// Renders a standalone Leaflet page with one polyline per truck.
#[derive(Debug, Clone)]
pub struct LeafletMap {
    pub zoom: u8,
}

impl Default for LeafletMap {
    fn default() -> Self {
        Self { zoom: 12 }
    }
}

impl LeafletMap {
    fn map_data<'a>(&self, map: &DayMap<'a>) -> MapData<'a> {
        let routes = map
            .routes
            .iter()
            .map(|(&truck, route)| RouteLayer {
                color: ROUTE_COLORS[truck % ROUTE_COLORS.len()],
                popup: format!("Truck ID: {}, Length: {:.2} km", truck + 1, route.length_km()),
                points: route.points(),
            })
            .collect();

        let mut depot_popup = format!(
            "Total Route Length for Day {}: {:.2} km",
            map.day.ordinal(),
            map.day_length_km()
        );
        if let Some(weekly) = map.weekly_length_km {
            depot_popup.push_str(&format!("<br>Total Length for the Week: {weekly:.2} km"));
        }

        MapData {
            center: map.depot.location(),
            zoom: self.zoom,
            depot_popup,
            routes,
        }
    }
}

impl MapRenderer for LeafletMap {
    fn render(&self, map: &DayMap<'_>) -> Result<String> {
        let data = serde_json::to_string(&self.map_data(map))?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Routes for {day}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const data = {data};
const map = L.map("map").setView(data.center, data.zoom);
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
for (const route of data.routes) {{
  L.polyline(route.points, {{ color: route.color, weight: 2.5 }}).bindPopup(route.popup).addTo(map);
}}
L.marker(data.center).bindPopup(data.depot_popup).addTo(map);
</script>
</body>
</html>
"#,
            day = map.day,
        ))
    }
}

/// Renders the map and writes it as `map_day_<n>.html` inside `dir`.
pub fn save_day_map<M>(renderer: &M, map: &DayMap<'_>, dir: &Path) -> Result<PathBuf>
where
    M: MapRenderer + ?Sized,
{
    let html = renderer.render(map)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(map.file_name());
    std::fs::write(&path, html)?;

    info!(path = %path.display(), day = %map.day, "map saved");
    Ok(path)
}
