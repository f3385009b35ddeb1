use anyhow::{bail, Result};
use geo::Point;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoRecord {
    pub point: Point<f64>,
    pub elevation: f64, // metres
}

impl VolcanoRecord {
    pub fn new(lat: f64, lon: f64, elevation: f64) -> Self {
        Self {
            point: Point::new(lon, lat),
            elevation,
        }
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }
}

/// Leaflet.awesome-markers palette, plus the plain CSS colors used for circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Orange,
    Green,
    Purple,
    Blue,
    CadetBlue,
    Grey,
}

impl MarkerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerColor::Red => "red",
            MarkerColor::Orange => "orange",
            MarkerColor::Green => "green",
            MarkerColor::Purple => "purple",
            MarkerColor::Blue => "blue",
            MarkerColor::CadetBlue => "cadetblue",
            MarkerColor::Grey => "grey",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Popup {
    Text { text: String },
    /// HTML shown inside a fixed-size iframe.
    Frame { html: String, width: u32, height: u32 },
}

impl Popup {
    pub fn text(text: impl Into<String>) -> Self {
        Popup::Text { text: text.into() }
    }

    pub fn content(&self) -> &str {
        match self {
            Popup::Text { text } => text,
            Popup::Frame { html, .. } => html,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum MarkerStyle {
    Pin {
        color: MarkerColor,
    },
    Circle {
        radius: f64,
        color: MarkerColor,
        fill_color: MarkerColor,
        fill_opacity: f64,
    },
}

impl MarkerStyle {
    /// The color a reader associates with the marker: the pin color or the circle fill.
    pub fn display_color(&self) -> MarkerColor {
        match self {
            MarkerStyle::Pin { color } => *color,
            MarkerStyle::Circle { fill_color, .. } => *fill_color,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkerStyle::Pin { .. } => "pin",
            MarkerStyle::Circle { .. } => "circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    #[serde(rename = "location", serialize_with = "serialize_lat_lon")]
    pub point: Point<f64>,
    pub popup: Popup,
    pub tooltip: String,
    #[serde(flatten)]
    pub style: MarkerStyle,
}

impl Marker {
    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureGroup {
    pub name: String,
    pub clustered: bool,
    pub markers: Vec<Marker>,
}

impl FeatureGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clustered: false,
            markers: Vec::new(),
        }
    }

    pub fn clustered(name: impl Into<String>) -> Self {
        Self {
            clustered: true,
            ..Self::new(name)
        }
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    #[serde(serialize_with = "serialize_lat_lon")]
    pub center: Point<f64>,
    pub zoom: u8,
    pub tiles: TileLayer,
    pub groups: Vec<FeatureGroup>,
    pub layer_control: bool,
}

impl MapDocument {
    pub fn new(center: Point<f64>, zoom: u8, tiles: TileLayer) -> Self {
        Self {
            center,
            zoom,
            tiles,
            groups: Vec::new(),
            layer_control: false,
        }
    }

    /// Appends a group; names double as layer-control labels so they must be unique.
    pub fn add_group(&mut self, group: FeatureGroup) -> Result<()> {
        if self.group(&group.name).is_some() {
            bail!("Feature group '{}' already exists on this map", group.name);
        }
        self.groups.push(group);
        Ok(())
    }

    pub fn group(&self, name: &str) -> Option<&FeatureGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn marker_counts(&self) -> Vec<(&str, usize)> {
        self.groups
            .iter()
            .map(|g| (g.name.as_str(), g.markers.len()))
            .collect()
    }

    pub fn total_markers(&self) -> usize {
        self.groups.iter().map(|g| g.markers.len()).sum()
    }
}

// Leaflet wants [lat, lon]; geo stores (x = lon, y = lat).
fn serialize_lat_lon<S: Serializer>(point: &Point<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    [point.y(), point.x()].serialize(serializer)
}
