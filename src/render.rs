use crate::types::MapDocument;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

const PAYLOAD_SLOT: &str = "__MAP_DATA__";

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>mapify</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous"
    referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"
    referrerpolicy="no-referrer"></script>

  <!-- Leaflet.markercluster 1.4.1 -->
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.css" />
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.Default.css" />
  <script src="https://unpkg.com/leaflet.markercluster@1.4.1/dist/leaflet.markercluster.js"></script>

  <!-- Leaflet.awesome-markers 2.0.2 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
  <link rel="stylesheet" href="https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>

  <style>
    html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
    #map { position: absolute; inset: 0; }
  </style>
</head>

<body>
  <div id="map"></div>

  <script type="application/json" id="map-data">__MAP_DATA__</script>
  <script>
    (function () {
      const data = JSON.parse(document.getElementById('map-data').textContent);

      const map = L.map('map', {center: data.center, zoom: data.zoom});
      L.tileLayer(data.tiles.url, {maxZoom: 19, attribution: data.tiles.attribution}).addTo(map);

      function popupFor(popup) {
        if (popup.kind === 'frame') {
          const frame = document.createElement('iframe');
          frame.srcdoc = popup.html;
          frame.width = popup.width;
          frame.height = popup.height;
          frame.style.border = 'none';
          return frame;
        }
        const text = document.createElement('span');
        text.textContent = popup.text;
        return text;
      }

      function layerFor(marker) {
        if (marker.style === 'circle') {
          return L.circleMarker(marker.location, {
            radius: marker.radius,
            color: marker.color,
            fillColor: marker.fill_color,
            fillOpacity: marker.fill_opacity,
            fill: true
          });
        }
        const icon = L.AwesomeMarkers.icon({icon: 'info-sign', prefix: 'glyphicon', markerColor: marker.color});
        return L.marker(marker.location, {icon: icon});
      }

      const overlays = {};
      for (const group of data.groups) {
        const layer = group.clustered ? L.markerClusterGroup() : L.featureGroup();
        for (const marker of group.markers) {
          layerFor(marker)
            .bindPopup(popupFor(marker.popup))
            .bindTooltip(marker.tooltip, {sticky: true})
            .addTo(layer);
        }
        layer.addTo(map);
        overlays[group.name] = layer;
      }

      if (data.layer_control) {
        L.control.layers(null, overlays, {collapsed: true}).addTo(map);
      }
    })();
  </script>
</body>
</html>
"#;

/// JSON payload embedded in the page. `</` is escaped so marker text can never
/// close the surrounding `<script>` element.
pub fn payload_json(doc: &MapDocument) -> Result<String> {
    let json = serde_json::to_string(doc).context("Failed to serialize map document")?;
    Ok(json.replace("</", "<\\/"))
}

pub fn render_html(doc: &MapDocument) -> Result<String> {
    Ok(PAGE_TEMPLATE.replacen(PAYLOAD_SLOT, &payload_json(doc)?, 1))
}

pub fn write_html(doc: &MapDocument, path: &Path) -> Result<()> {
    let html = render_html(doc)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write map: {:?}", path))?;

    info!("Wrote {} markers across {} layers to {:?}", doc.total_markers(), doc.groups.len(), path);
    Ok(())
}
