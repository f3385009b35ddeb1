use crate::classify::color_for_elevation;
use crate::config::MapConfig;
use crate::landmarks::{self, Landmark, TOOLTIP};
use crate::types::{FeatureGroup, MapDocument, Marker, MarkerColor, MarkerStyle, Popup, TileLayer, VolcanoRecord};
use anyhow::Result;
use geo::Point;
use tracing::info;

pub const VOLCANO_CLUSTER: &str = "Volcano Cluster";
/// Schools plus the Seven Wonders. The volcano pin that once shared this
/// layer (as "School & Volcano Markers") lives in [`FAMOUS_VOLCANOES`].
pub const SCHOOLS_AND_LANDMARKS: &str = "Schools & Landmarks";
pub const FAMOUS_VOLCANOES: &str = "Famous Volcanoes";
pub const VOLCANO_CIRCLES: &str = "Volcano Circles";
pub const RIVERS: &str = "Rivers";

const CIRCLE_RADIUS: f64 = 12.0;
const CIRCLE_FILL_OPACITY: f64 = 0.7;
const POPUP_FRAME: (u32, u32) = (200, 100);

/// Turns the volcano records and the fixed landmarks into a layered map.
///
/// Layer order is the order Leaflet draws and lists them: the clustered
/// volcanoes first, then the plain groups.
pub fn process_data(config: &MapConfig, volcanoes: &[VolcanoRecord]) -> Result<MapDocument> {
    info!("Assembling map from {} volcanoes...", volcanoes.len());

    let [lat, lon] = config.center;
    let tiles = TileLayer {
        url: config.tiles.clone(),
        attribution: config.attribution.clone(),
    };
    let mut map = MapDocument::new(Point::new(lon, lat), config.zoom_start, tiles);

    map.add_group(volcano_cluster(volcanoes))?;
    map.add_group(schools_and_landmarks())?;
    map.add_group(landmark_group(FAMOUS_VOLCANOES, &[landmarks::FAMOUS_VOLCANO]))?;
    map.add_group(volcano_circles(volcanoes))?;
    map.add_group(landmark_group(RIVERS, &landmarks::RIVERS))?;
    map.layer_control = true;

    for (name, count) in map.marker_counts() {
        info!("Layer '{}': {} markers", name, count);
    }

    Ok(map)
}

fn volcano_cluster(volcanoes: &[VolcanoRecord]) -> FeatureGroup {
    let mut group = FeatureGroup::clustered(VOLCANO_CLUSTER);
    for volcano in volcanoes {
        group.add_marker(Marker {
            point: volcano.point,
            popup: Popup::text(format!("Elevation: {} m", elevation_text(volcano.elevation))),
            tooltip: TOOLTIP.to_string(),
            style: MarkerStyle::Pin {
                color: color_for_elevation(volcano.elevation),
            },
        });
    }
    group
}

fn volcano_circles(volcanoes: &[VolcanoRecord]) -> FeatureGroup {
    let (width, height) = POPUP_FRAME;
    let mut group = FeatureGroup::new(VOLCANO_CIRCLES);
    for volcano in volcanoes {
        group.add_marker(Marker {
            point: volcano.point,
            popup: Popup::Frame {
                html: volcano_info_html(volcano.elevation),
                width,
                height,
            },
            tooltip: TOOLTIP.to_string(),
            style: MarkerStyle::Circle {
                radius: CIRCLE_RADIUS,
                color: MarkerColor::Grey,
                fill_color: color_for_elevation(volcano.elevation),
                fill_opacity: CIRCLE_FILL_OPACITY,
            },
        });
    }
    group
}

fn volcano_info_html(elevation: f64) -> String {
    format!(
        "<h4><strong>Volcano Information:</strong></h4><p>🌋 Elevation: {} m</p>",
        elevation_text(elevation)
    )
}

/// Always keeps a decimal point: `3285.0`, `1188.5`.
fn elevation_text(elevation: f64) -> String {
    format!("{:?}", elevation)
}

fn schools_and_landmarks() -> FeatureGroup {
    let mut group = landmark_group(SCHOOLS_AND_LANDMARKS, &landmarks::SCHOOLS);
    group.add_marker(landmark_pin(&landmarks::NAMED_SCHOOL, landmarks::NAMED_SCHOOL.name.to_string()));
    for wonder in &landmarks::SEVEN_WONDERS {
        group.add_marker(landmark_pin(wonder, landmarks::wonder_popup(wonder)));
    }
    group
}

fn landmark_group(name: &str, places: &[Landmark]) -> FeatureGroup {
    let mut group = FeatureGroup::new(name);
    for place in places {
        group.add_marker(landmark_pin(place, place.name.to_string()));
    }
    group
}

fn landmark_pin(place: &Landmark, popup: String) -> Marker {
    Marker {
        point: Point::new(place.lon, place.lat),
        popup: Popup::text(popup),
        tooltip: TOOLTIP.to_string(),
        style: MarkerStyle::Pin { color: place.color },
    }
}
