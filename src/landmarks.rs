//! Fixed points of interest drawn alongside the volcano data.

use crate::types::MarkerColor;

pub const TOOLTIP: &str = "Click me!";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub color: MarkerColor,
}

const fn landmark(name: &'static str, lat: f64, lon: f64, color: MarkerColor) -> Landmark {
    Landmark { name, lat, lon, color }
}

/// Unnamed schools, all labelled "School".
pub const SCHOOLS: [Landmark; 3] = [
    landmark("School", -43.52, -79.64, MarkerColor::Red),
    landmark("School", -42.31, -78.41, MarkerColor::Red),
    landmark("School", -43.01, -79.12, MarkerColor::Red),
];

pub const NAMED_SCHOOL: Landmark = landmark("Iona CSS", 43.5212, -79.6473, MarkerColor::CadetBlue);

pub const FAMOUS_VOLCANO: Landmark =
    landmark("Mount Vesuvius 🌋", 40.8213, 14.4263, MarkerColor::Purple);

// Marked at Cairo.
pub const RIVERS: [Landmark; 1] = [landmark("Nile River 🌊", 30.0444, 31.2357, MarkerColor::Blue)];

pub const SEVEN_WONDERS: [Landmark; 7] = [
    landmark("Great Wall of China", 40.4319, 116.5704, MarkerColor::Purple),
    landmark("Petra, Jordan", 30.3285, 35.4444, MarkerColor::Purple),
    landmark("Christ the Redeemer, Brazil", -22.9519, -43.2105, MarkerColor::Purple),
    landmark("Machu Picchu, Peru", -13.1631, -72.5450, MarkerColor::Purple),
    landmark("Chichen Itza, Mexico", 20.6829, -88.5678, MarkerColor::Purple),
    landmark("Roman Colosseum, Italy", 41.8902, 12.4922, MarkerColor::Purple),
    landmark("Taj Mahal, India", 27.1751, 78.0421, MarkerColor::Purple),
];

/// Popup text for a wonder carries a globe suffix.
pub fn wonder_popup(wonder: &Landmark) -> String {
    format!("{} 🌍", wonder.name)
}
