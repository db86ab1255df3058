//! JSON level packs.
//!
//! A pack is an object with a `levels` array. Every entry mirrors a
//! [`LevelTemplate`]; its `on_load` is either an array of placement steps or an
//! object naming a registered generator:
//!
//! ```json
//! {
//!   "levels": [
//!     {
//!       "id": "33",
//!       "name": "Bonus",
//!       "start": { "x": 1, "y": 1 },
//!       "on_load": [
//!         { "kind": "target", "at": [{ "cell": { "x": 5, "y": 5 } }] }
//!       ]
//!     },
//!     { "id": "34", "name": "Remix", "start": { "x": 3, "y": 1 },
//!       "on_load": { "generator": "npc-pair" } }
//!   ]
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;
use walkie_core::{CellCoord, CellRect, Footprint, Item, LevelId};
use walkie_world::{Level, DEFAULT_CELL_SIZE};

use crate::{Catalog, CatalogError, LevelTemplate, OnLoad, Placement, DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackFile {
    levels: Vec<PackLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackLevel {
    id: LevelId,
    name: String,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default = "default_cell_size")]
    cell_size: u32,
    start: CellCoord,
    #[serde(default)]
    carry: Option<Item>,
    #[serde(default)]
    on_load: Value,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_cell_size() -> u32 {
    DEFAULT_CELL_SIZE
}

/// Parses a pack into templates, resolving generator names against `catalog`.
///
/// Board layouts are checked here so that errors surface while loading rather
/// than on first play.
pub fn parse(json: &str, catalog: &Catalog) -> Result<Vec<LevelTemplate>, CatalogError> {
    let file: PackFile = serde_json::from_str(json)?;
    let mut templates: Vec<LevelTemplate> = Vec::with_capacity(file.levels.len());

    for entry in file.levels {
        if templates.iter().any(|template| template.id == entry.id) {
            return Err(CatalogError::DuplicateLevel(entry.id));
        }
        let on_load = on_load(&entry.id, entry.on_load, catalog)?;
        let template = LevelTemplate {
            id: entry.id,
            name: entry.name,
            caption: entry.caption,
            width: entry.width,
            height: entry.height,
            cell_size: entry.cell_size,
            start: entry.start,
            carry: entry.carry,
            on_load,
        };
        validate(&template)?;
        templates.push(template);
    }
    Ok(templates)
}

fn on_load(level: &LevelId, value: Value, catalog: &Catalog) -> Result<OnLoad, CatalogError> {
    match value {
        Value::Null => Ok(OnLoad::Script(Vec::new())),
        Value::Array(_) => {
            let steps: Vec<Placement> = serde_json::from_value(value)?;
            Ok(OnLoad::Script(steps.into_iter().map(normalized).collect()))
        }
        Value::Object(map) => match map.get("generator") {
            Some(Value::String(name)) if map.len() == 1 => catalog
                .generator(name)
                .map(OnLoad::Procedural)
                .ok_or_else(|| CatalogError::UnknownGenerator {
                    level: level.clone(),
                    name: name.clone(),
                }),
            _ => Err(unrecognized(level, "object")),
        },
        Value::Bool(_) => Err(unrecognized(level, "boolean")),
        Value::Number(_) => Err(unrecognized(level, "number")),
        Value::String(_) => Err(unrecognized(level, "string")),
    }
}

fn unrecognized(level: &LevelId, found: &'static str) -> CatalogError {
    tracing::warn!("level pack entry '{level}' has an on_load of type {found}");
    CatalogError::UnrecognizedOnLoad {
        level: level.clone(),
        found,
    }
}

/// Reorders rectangle corners written in any order.
fn normalized(mut step: Placement) -> Placement {
    for footprint in &mut step.at {
        if let Footprint::Rect(rect) = footprint {
            *rect = CellRect::from_corners(rect.min(), rect.max());
        }
    }
    step
}

fn validate(template: &LevelTemplate) -> Result<(), CatalogError> {
    let _ = Level::new(template.layout(), 0)?;
    Ok(())
}
