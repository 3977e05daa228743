pub mod cases;
pub mod codes;
pub mod feeds;
pub mod series;

use std::fs;
use std::path::Path;

use anyhow::Result;
use geojson::{GeoJson, Geometry, Value};

/// A country outline (sequence of lon/lat coordinates).
pub type LineString = Vec<(f64, f64)>;

/// Load country outline geometry from a Natural Earth style admin-0
/// GeoJSON file, keyed by alpha-3 code. Features without a usable code
/// property are skipped with a warning, same as every other unmapped
/// entity in the pipeline.
pub fn load_world_shapes(path: &Path) -> Result<Vec<(String, Vec<LineString>)>> {
    let content = fs::read_to_string(path)?;
    let geojson: GeoJson = content.parse()?;

    let mut shapes = Vec::new();
    if let GeoJson::FeatureCollection(fc) = geojson {
        for feature in fc.features {
            let code = feature.properties.as_ref().and_then(|p| {
                p.get("ISO_A3")
                    .or_else(|| p.get("iso_a3"))
                    .or_else(|| p.get("ADM0_A3"))
                    .or_else(|| p.get("alpha3Code"))
                    .and_then(|v| v.as_str())
                    .map(str::to_uppercase)
            });

            let Some(code) = code else {
                eprintln!("Warning: feature without alpha-3 code in {}", path.display());
                continue;
            };
            // Natural Earth marks disputed areas with "-99".
            if code == "-99" {
                continue;
            }

            let mut outlines = Vec::new();
            if let Some(ref geometry) = feature.geometry {
                collect_outlines(geometry, &mut outlines);
            }
            if !outlines.is_empty() {
                shapes.push((code, outlines));
            }
        }
    }

    Ok(shapes)
}

/// Extract drawable outlines from a geometry: linestrings as-is, polygon
/// exterior rings only.
fn collect_outlines(geometry: &Geometry, outlines: &mut Vec<LineString>) {
    match &geometry.value {
        Value::LineString(coords) => {
            outlines.push(coords.iter().map(|c| (c[0], c[1])).collect());
        }
        Value::MultiLineString(lines) => {
            for coords in lines {
                outlines.push(coords.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                outlines.push(exterior.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                if let Some(exterior) = rings.first() {
                    outlines.push(exterior.iter().map(|c| (c[0], c[1])).collect());
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_outlines(g, outlines);
            }
        }
        _ => {}
    }
}
