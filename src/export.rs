use crate::types::{MapDocument, Marker};
use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use std::fs;
use std::path::Path;
use tracing::info;

/// Flattens every group into Point features, tagging each with its layer name.
pub fn to_feature_collection(doc: &MapDocument) -> FeatureCollection {
    let features = doc
        .groups
        .iter()
        .flat_map(|group| group.markers.iter().map(move |m| marker_feature(&group.name, m)))
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn marker_feature(layer: &str, marker: &Marker) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("layer".to_string(), JsonValue::from(layer));
    properties.insert("tooltip".to_string(), JsonValue::from(marker.tooltip.as_str()));
    properties.insert("popup".to_string(), JsonValue::from(marker.popup.content()));
    properties.insert("color".to_string(), JsonValue::from(marker.style.display_color().as_str()));
    properties.insert("style".to_string(), JsonValue::from(marker.style.name()));

    Feature {
        bbox: None,
        // GeoJSON positions are [lon, lat]
        geometry: Some(Geometry::new(Value::Point(vec![marker.lon(), marker.lat()]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn write_geojson(doc: &MapDocument, path: &Path) -> Result<()> {
    let collection = to_feature_collection(doc);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    fs::write(path, collection.to_string())
        .with_context(|| format!("Failed to write GeoJSON: {:?}", path))?;

    info!("Wrote {} features to {:?}", collection.features.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::processing::{process_data, RIVERS, VOLCANO_CIRCLES};
    use crate::types::VolcanoRecord;
    use geojson::GeoJson;
    use pretty_assertions::assert_eq;

    fn doc() -> MapDocument {
        let volcanoes = vec![
            VolcanoRecord::new(46.2057991, -121.4909973, 3742.0),
            VolcanoRecord::new(41.5797997, -121.5709991, 2412.0),
        ];
        process_data(&MapConfig::default(), &volcanoes).unwrap()
    }

    fn features_in<'a>(collection: &'a FeatureCollection, layer: &str) -> Vec<&'a Feature> {
        collection
            .features
            .iter()
            .filter(|f| f.property("layer").and_then(|v| v.as_str()) == Some(layer))
            .collect()
    }

    #[test]
    fn one_feature_per_marker() {
        let doc = doc();
        let collection = to_feature_collection(&doc);
        assert_eq!(collection.features.len(), doc.total_markers());
        for (name, count) in doc.marker_counts() {
            assert_eq!(features_in(&collection, name).len(), count, "{name}");
        }
    }

    #[test]
    fn positions_are_lon_lat() {
        let collection = to_feature_collection(&doc());
        let nile = features_in(&collection, RIVERS)[0];
        let geometry = nile.geometry.as_ref().unwrap();
        assert_eq!(geometry.value, Value::Point(vec![31.2357, 30.0444]));
    }

    #[test]
    fn circle_properties() {
        let collection = to_feature_collection(&doc());
        let circle = features_in(&collection, VOLCANO_CIRCLES)[1];
        assert_eq!(circle.property("color").and_then(|v| v.as_str()), Some("orange"));
        assert_eq!(circle.property("style").and_then(|v| v.as_str()), Some("circle"));
        assert!(circle
            .property("popup")
            .and_then(|v| v.as_str())
            .unwrap()
            .contains("2412.0 m"));
    }

    #[test]
    fn written_file_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layers.geojson");
        let doc = doc();

        write_geojson(&doc, &path).unwrap();

        let parsed: GeoJson = fs::read_to_string(&path).unwrap().parse().unwrap();
        match parsed {
            GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), doc.total_markers()),
            other => panic!("expected a FeatureCollection, got {other:?}"),
        }
    }
}
