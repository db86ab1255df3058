#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level definition catalog for Walkie.
//!
//! A [`Catalog`] holds ordered [`LevelTemplate`] values. Starting a template
//! always builds a fresh [`Level`]: the object list begins empty, the
//! template's [`OnLoad`] routine is replayed and the carry slot is reset to the
//! template's initial carry.

use std::{collections::BTreeMap, fmt};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkie_core::{CellCoord, Footprint, GridObject, Item, LevelId, ObjectKind};
use walkie_world::{Level, LayoutError, LevelLayout, PlayerState, DEFAULT_CELL_SIZE};

pub mod levels;
pub mod pack;
pub mod sampling;

pub use sampling::{choose_n, shuffle};

/// Default number of board columns.
pub const DEFAULT_WIDTH: u32 = 7;

/// Default number of board rows.
pub const DEFAULT_HEIGHT: u32 = 7;

/// Procedural level loader.
///
/// Generators may only add objects and adjust the caption; the player state is
/// fixed by the template.
pub type Generator = fn(&mut Level, &mut dyn RngCore) -> Result<(), CatalogError>;

/// Errors raised while building or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No template carries the requested identifier.
    #[error("unknown level '{0}'")]
    UnknownLevel(LevelId),
    /// A sample asked for more distinct elements than available.
    #[error("cannot choose {requested} of {available}")]
    SampleTooLarge {
        /// Number of elements requested.
        requested: usize,
        /// Number of elements available.
        available: usize,
    },
    /// A level pack entry carries an `on_load` of an unsupported JSON type.
    #[error("level '{level}' has an on_load of type {found}; expected an array of placements or a generator object")]
    UnrecognizedOnLoad {
        /// Level declaring the loader.
        level: LevelId,
        /// JSON type found instead.
        found: &'static str,
    },
    /// A level pack entry names a generator that is not registered.
    #[error("level '{level}' names unknown generator '{name}'")]
    UnknownGenerator {
        /// Level declaring the loader.
        level: LevelId,
        /// Generator name.
        name: String,
    },
    /// Two templates share the same identifier.
    #[error("level '{0}' is defined more than once")]
    DuplicateLevel(LevelId),
    /// A level pack could not be parsed.
    #[error("malformed level pack")]
    Pack(#[from] serde_json::Error),
    /// The template describes an impossible board.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Ordered instruction placing one kind of object at several footprints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Kind of every placed object.
    pub kind: ObjectKind,
    /// Footprints to occupy, appended in order.
    pub at: Vec<Footprint>,
}

impl Placement {
    /// Places `kind` on every listed single cell.
    #[must_use]
    pub fn cells(kind: ObjectKind, cells: &[(i32, i32)]) -> Self {
        Self {
            kind,
            at: cells
                .iter()
                .map(|&(x, y)| Footprint::cell(x, y))
                .collect(),
        }
    }

    /// Places `kind` on one rectangle spanning `(x, y)` to `(xx, yy)`.
    #[must_use]
    pub fn rect(kind: ObjectKind, x: i32, y: i32, xx: i32, yy: i32) -> Self {
        Self {
            kind,
            at: vec![Footprint::rect(x, y, xx, yy)],
        }
    }

    fn apply(&self, level: &mut Level) {
        for footprint in &self.at {
            level.push_object(GridObject::new(*footprint, self.kind.clone()));
        }
    }
}

/// Routine populating a freshly created level.
#[derive(Clone)]
pub enum OnLoad {
    /// Ordered placement steps.
    Script(Vec<Placement>),
    /// Procedural loader drawing from the game's random number generator.
    Procedural(Generator),
}

impl fmt::Debug for OnLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script(steps) => f.debug_tuple("Script").field(steps).finish(),
            Self::Procedural(_) => f.write_str("Procedural(..)"),
        }
    }
}

/// Static definition of a catalog level.
#[derive(Clone, Debug)]
pub struct LevelTemplate {
    /// Stable identifier.
    pub id: LevelId,
    /// Human readable title.
    pub name: String,
    /// Optional text shown alongside the board.
    pub caption: Option<String>,
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Edge length of a cell in presentation units.
    pub cell_size: u32,
    /// Starting cell of the player.
    pub start: CellCoord,
    /// Item carried when the level starts.
    pub carry: Option<Item>,
    /// Routine populating the board.
    pub on_load: OnLoad,
}

impl LevelTemplate {
    /// Creates a 7x7 template with an empty-handed player.
    #[must_use]
    pub fn new(id: impl Into<LevelId>, name: impl Into<String>, start: CellCoord, on_load: OnLoad) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            caption: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            start,
            carry: None,
            on_load,
        }
    }

    /// Overrides the number of rows.
    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Attaches a caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Starts the player holding the provided item.
    #[must_use]
    pub fn with_carry(mut self, carry: Item) -> Self {
        self.carry = Some(carry);
        self
    }

    fn layout(&self) -> LevelLayout {
        LevelLayout {
            id: self.id.clone(),
            name: self.name.clone(),
            caption: self.caption.clone(),
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            player: PlayerState {
                cell: self.start,
                carry: self.carry,
            },
        }
    }

    /// Builds a fresh level instance from the template.
    pub fn instantiate(&self, generation: u64, rng: &mut dyn RngCore) -> Result<Level, CatalogError> {
        let mut level = Level::new(self.layout(), generation)?;
        match &self.on_load {
            OnLoad::Script(steps) => {
                for step in steps {
                    step.apply(&mut level);
                }
            }
            OnLoad::Procedural(generate) => generate(&mut level, rng)?,
        }
        tracing::debug!(
            "level {} populated with {} objects",
            self.id,
            level.objects().len()
        );
        Ok(level)
    }
}

/// Ordered collection of level templates plus named generators for packs.
#[derive(Clone)]
pub struct Catalog {
    templates: Vec<LevelTemplate>,
    generators: BTreeMap<String, Generator>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("templates", &self.templates)
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Catalog {
    /// Catalog holding every built-in level and generator.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            templates: levels::builtin(),
            generators: levels::GENERATORS
                .iter()
                .map(|(name, generator)| ((*name).to_owned(), *generator))
                .collect(),
        }
    }

    /// Template with the provided identifier.
    pub fn get(&self, id: &LevelId) -> Result<&LevelTemplate, CatalogError> {
        self.templates
            .iter()
            .find(|template| &template.id == id)
            .ok_or_else(|| CatalogError::UnknownLevel(id.clone()))
    }

    /// Reports whether a template carries the identifier.
    #[must_use]
    pub fn contains(&self, id: &LevelId) -> bool {
        self.templates.iter().any(|template| &template.id == id)
    }

    /// Identifiers in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &LevelId> {
        self.templates.iter().map(|template| &template.id)
    }

    /// Templates in catalog order.
    #[must_use]
    pub fn templates(&self) -> &[LevelTemplate] {
        &self.templates
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Reports whether the catalog has no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// First level of the catalog.
    #[must_use]
    pub fn first(&self) -> Option<&LevelId> {
        self.templates.first().map(|template| &template.id)
    }

    /// Level following `id` in catalog order; `None` for the terminal level.
    pub fn next_after(&self, id: &LevelId) -> Result<Option<&LevelId>, CatalogError> {
        let position = self
            .templates
            .iter()
            .position(|template| &template.id == id)
            .ok_or_else(|| CatalogError::UnknownLevel(id.clone()))?;
        Ok(self.templates.get(position + 1).map(|template| &template.id))
    }

    /// Named generator usable by level packs.
    #[must_use]
    pub fn generator(&self, name: &str) -> Option<Generator> {
        self.generators.get(name).copied()
    }

    /// Registers a generator under the provided name, replacing any previous one.
    pub fn register_generator(&mut self, name: impl Into<String>, generator: Generator) {
        let name = name.into();
        if self.generators.insert(name.clone(), generator).is_some() {
            tracing::warn!("generator '{name}' replaced");
        }
    }

    /// Appends a template; identifiers must be unique.
    pub fn push(&mut self, template: LevelTemplate) -> Result<(), CatalogError> {
        if self.contains(&template.id) {
            return Err(CatalogError::DuplicateLevel(template.id));
        }
        self.templates.push(template);
        Ok(())
    }

    /// Appends every level of a JSON level pack.
    pub fn with_pack_json(mut self, json: &str) -> Result<Self, CatalogError> {
        let templates = pack::parse(json, &self)?;
        let count = templates.len();
        for template in templates {
            self.push(template)?;
        }
        tracing::info!("level pack added {count} levels");
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use walkie_core::ObjectCategory;

    #[test]
    fn builtin_catalog_is_ordered_one_to_thirty_two() {
        let catalog = Catalog::builtin();
        let ids: Vec<_> = catalog.ids().map(LevelId::as_str).collect();
        let expected: Vec<String> = (1..=32).map(|n| n.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn next_after_follows_catalog_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.next_after(&LevelId::new("1")).expect("known"),
            Some(&LevelId::new("2"))
        );
        assert_eq!(catalog.next_after(&LevelId::new("32")).expect("known"), None);
        assert!(matches!(
            catalog.next_after(&LevelId::new("99")),
            Err(CatalogError::UnknownLevel(_))
        ));
    }

    #[test]
    fn restart_discards_previous_objects() {
        let catalog = Catalog::builtin();
        let template = catalog.get(&LevelId::new("2")).expect("level 2");
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let first = template.instantiate(1, &mut rng).expect("start");
        let second = template.instantiate(2, &mut rng).expect("restart");
        assert_eq!(first.objects(), second.objects());
        assert_eq!(second.count(ObjectCategory::Target), 1);
        assert_eq!(second.generation(), 2);
    }

    #[test]
    fn duplicate_push_is_rejected() {
        let mut catalog = Catalog::builtin();
        let template = LevelTemplate::new("3", "again", CellCoord::new(0, 0), OnLoad::Script(Vec::new()));
        assert!(matches!(
            catalog.push(template),
            Err(CatalogError::DuplicateLevel(id)) if id.as_str() == "3"
        ));
    }
}
