#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Walkie engine.
//!
//! This crate defines the message surface that connects adapters, the level
//! runtime, and the progression system. Adapters submit [`Command`] values
//! describing player input, the runtime resolves those commands against the
//! active level, and then reports [`Event`] values together with declarative
//! [`Effect`] hints that adapters are free to animate however they like.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Walkie.";

/// Cooldown applied before popover and interstitial actions become available.
pub const DEFAULT_INPUT_COOLDOWN: Duration = Duration::from_millis(600);

/// Delay before the win interstitial reveals the level browser.
pub const DEFAULT_BROWSE_DELAY: Duration = Duration::from_millis(2_000);

/// Clamps `value` into the inclusive range `[low, high]`.
///
/// Unlike [`Ord::clamp`] this never panics when `low > high`; `low` wins, so
/// a zero-sized board collapses every coordinate onto the origin.
#[must_use]
pub fn clamp(value: i32, low: i32, high: i32) -> i32 {
    if value < low {
        low
    } else if value > high {
        high.max(low)
    } else {
        value
    }
}

/// Reports whether a point lies inside the provided footprint.
#[must_use]
pub fn is_collision(point: CellCoord, footprint: &Footprint) -> bool {
    footprint.contains(point)
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Column and row delta of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Parses a direction from its lowercase name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Location of a single grid cell.
///
/// Coordinates are signed so that a proposed move may step off the board
/// before it is clamped back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring cell in the provided direction, unclamped.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Clamps the cell onto a board of the provided dimensions.
    #[must_use]
    pub fn clamped(self, width: u32, height: u32) -> Self {
        let max_x = i32::try_from(width).unwrap_or(i32::MAX) - 1;
        let max_y = i32::try_from(height).unwrap_or(i32::MAX) - 1;
        Self::new(clamp(self.x, 0, max_x), clamp(self.y, 0, max_y))
    }

    /// Reports whether the cell lies on a board of the provided dimensions.
    #[must_use]
    pub fn is_within(self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && i64::from(self.x) < i64::from(width)
            && i64::from(self.y) < i64::from(height)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle spanning two inclusive corner cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    min: CellCoord,
    max: CellCoord,
}

impl CellRect {
    /// Constructs a rectangle from any two opposite corners.
    #[must_use]
    pub fn from_corners(a: CellCoord, b: CellCoord) -> Self {
        Self {
            min: CellCoord::new(a.x().min(b.x()), a.y().min(b.y())),
            max: CellCoord::new(a.x().max(b.x()), a.y().max(b.y())),
        }
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn min(&self) -> CellCoord {
        self.min
    }

    /// Lower-right corner of the rectangle.
    #[must_use]
    pub const fn max(&self) -> CellCoord {
        self.max
    }

    /// Reports whether the cell lies inside the rectangle, edges included.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.x() >= self.min.x()
            && cell.x() <= self.max.x()
            && cell.y() >= self.min.y()
            && cell.y() <= self.max.y()
    }

    /// Iterates every cell covered by the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let (min, max) = (self.min, self.max);
        (min.y()..=max.y()).flat_map(move |y| (min.x()..=max.x()).map(move |x| CellCoord::new(x, y)))
    }
}

/// Cells occupied by a grid object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Footprint {
    /// A single cell.
    Cell(CellCoord),
    /// A rectangle of cells.
    Rect(CellRect),
}

impl Footprint {
    /// Convenience constructor for a single-cell footprint.
    #[must_use]
    pub const fn cell(x: i32, y: i32) -> Self {
        Self::Cell(CellCoord::new(x, y))
    }

    /// Convenience constructor for a rectangle spanning `(x, y)` to `(xx, yy)`.
    #[must_use]
    pub fn rect(x: i32, y: i32, xx: i32, yy: i32) -> Self {
        Self::Rect(CellRect::from_corners(
            CellCoord::new(x, y),
            CellCoord::new(xx, yy),
        ))
    }

    /// Anchor cell used when presenting the footprint.
    #[must_use]
    pub const fn anchor(&self) -> CellCoord {
        match self {
            Self::Cell(cell) => *cell,
            Self::Rect(rect) => rect.min(),
        }
    }

    /// Reports whether the footprint covers the provided cell.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        match self {
            Self::Cell(own) => own.x() == cell.x() && own.y() == cell.y(),
            Self::Rect(rect) => rect.contains(cell),
        }
    }
}

/// Colour assigned to a figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

/// Outline drawn for a figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Filled square.
    Square,
    /// Filled circle.
    Circle,
    /// Upward-pointing triangle.
    Triangle,
    /// Square rotated by 45 degrees.
    Diamond,
    /// Five-pointed star.
    Star,
}

impl Shape {
    /// Every shape in a stable order.
    pub const ALL: [Shape; 5] = [
        Shape::Square,
        Shape::Circle,
        Shape::Triangle,
        Shape::Diamond,
        Shape::Star,
    ];

    /// Lowercase name of the shape.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Diamond => "diamond",
            Self::Star => "star",
        }
    }
}

/// Decorative pickable item described by colour and shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Figure {
    /// Fill colour of the figure.
    pub color: Color,
    /// Outline of the figure.
    pub shape: Shape,
}

impl Figure {
    /// Creates a figure with an explicit colour and shape.
    #[must_use]
    pub const fn new(color: Color, shape: Shape) -> Self {
        Self { color, shape }
    }

    /// Creates a square figure, the classic colour-matching token.
    #[must_use]
    pub const fn square(color: Color) -> Self {
        Self::new(color, Shape::Square)
    }
}

/// Item the player can hold in the single carry slot.
///
/// Items compare by value, so independently constructed figures of the same
/// colour and shape satisfy the same requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    /// Opens locks.
    Key,
    /// Colour/shape token wanted by NPCs.
    Figure(Figure),
}

impl Item {
    /// Object kind placed on the board when the item is dropped.
    #[must_use]
    pub const fn into_object_kind(self) -> ObjectKind {
        match self {
            Self::Key => ObjectKind::Key,
            Self::Figure(figure) => ObjectKind::Figure(figure),
        }
    }
}

/// Display category shared by every object of a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectCategory {
    /// Collectible goal cell.
    Target,
    /// Obstacle.
    Wall,
    /// Barrier opened by a carried item.
    Lock,
    /// Pickable key.
    Key,
    /// Pickable figure.
    Figure,
    /// Character requesting an item.
    Npc,
    /// Portal.
    Door,
    /// Barrier opened by a numeric code.
    NumpadLock,
}

impl ObjectCategory {
    /// Every category in a stable order.
    pub const ALL: [ObjectCategory; 8] = [
        ObjectCategory::Target,
        ObjectCategory::Wall,
        ObjectCategory::Lock,
        ObjectCategory::Key,
        ObjectCategory::Figure,
        ObjectCategory::Npc,
        ObjectCategory::Door,
        ObjectCategory::NumpadLock,
    ];

    /// Stable kebab-case name of the category.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Wall => "wall",
            Self::Lock => "lock",
            Self::Key => "key",
            Self::Figure => "figure",
            Self::Npc => "npc",
            Self::Door => "door",
            Self::NumpadLock => "numpad-lock",
        }
    }
}

/// Behaviour attached to a grid object together with its per-instance payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Consumed on contact; clearing every target completes the level.
    Target,
    /// Blocks movement.
    Wall {
        /// Remaining hits before a destructible wall crumbles; `None` is solid.
        hp: Option<u32>,
        /// Backdrop walls block silently and expose no interaction.
        backdrop: bool,
    },
    /// Opens when the player carries the matching item.
    Lock {
        /// Item consumed to open the lock.
        opens_with: Item,
    },
    /// Pickable key.
    Key,
    /// Pickable figure.
    Figure(Figure),
    /// Accepts one carried item and otherwise explains what it wants.
    Npc {
        /// Item the character asks for.
        wants: Item,
    },
    /// Teleports the player next to a paired exit.
    Door {
        /// Cell of the paired exit door.
        out: CellCoord,
        /// Cell the player lands on after passing through.
        exit: CellCoord,
    },
    /// Opens after the correct digits are entered.
    NumpadLock {
        /// Decimal digits expected by the lock.
        code: String,
    },
}

impl ObjectKind {
    /// Solid, indestructible wall.
    pub const WALL: ObjectKind = ObjectKind::Wall {
        hp: None,
        backdrop: false,
    };

    /// Silent backdrop wall.
    pub const BACKDROP: ObjectKind = ObjectKind::Wall {
        hp: None,
        backdrop: true,
    };

    /// Lock opened by a key.
    pub const LOCK: ObjectKind = ObjectKind::Lock {
        opens_with: Item::Key,
    };

    /// Destructible wall that survives `hp - 1` hits.
    #[must_use]
    pub const fn cracked_wall(hp: u32) -> Self {
        Self::Wall {
            hp: Some(hp),
            backdrop: false,
        }
    }

    /// Display category of the kind.
    #[must_use]
    pub const fn category(&self) -> ObjectCategory {
        match self {
            Self::Target => ObjectCategory::Target,
            Self::Wall { .. } => ObjectCategory::Wall,
            Self::Lock { .. } => ObjectCategory::Lock,
            Self::Key => ObjectCategory::Key,
            Self::Figure(_) => ObjectCategory::Figure,
            Self::Npc { .. } => ObjectCategory::Npc,
            Self::Door { .. } => ObjectCategory::Door,
            Self::NumpadLock { .. } => ObjectCategory::NumpadLock,
        }
    }

    /// Item obtained by picking the object up, if it is pickable.
    #[must_use]
    pub const fn as_item(&self) -> Option<Item> {
        match self {
            Self::Key => Some(Item::Key),
            Self::Figure(figure) => Some(Item::Figure(*figure)),
            _ => None,
        }
    }

    /// Reports whether colliding with the kind invokes an interaction.
    #[must_use]
    pub const fn interacts(&self) -> bool {
        !matches!(self, Self::Wall { backdrop: true, .. })
    }
}

/// Typed entity occupying one cell or a rectangle of cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridObject {
    /// Cells covered by the object.
    pub footprint: Footprint,
    /// Behaviour and payload of the object.
    pub kind: ObjectKind,
}

impl GridObject {
    /// Creates a new grid object.
    #[must_use]
    pub const fn new(footprint: Footprint, kind: ObjectKind) -> Self {
        Self { footprint, kind }
    }

    /// Creates a single-cell grid object.
    #[must_use]
    pub const fn at(cell: CellCoord, kind: ObjectKind) -> Self {
        Self::new(Footprint::Cell(cell), kind)
    }

    /// Reports whether the object covers the provided cell.
    #[must_use]
    pub const fn covers(&self, cell: CellCoord) -> bool {
        self.footprint.contains(cell)
    }
}

/// Declarative animation hint returned alongside a state update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Something was consumed or picked up.
    Eat,
    /// The move was rejected.
    Shake,
    /// The carried item was put down.
    Drop,
    /// The player passed through a door.
    Teleport {
        /// Starting cell, door cell, paired exit door and landing cell.
        path: [CellCoord; 4],
    },
    /// The numpad entry was wrong.
    CodeRejected,
}

/// Modal interaction that suspends movement until it is dismissed or solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopoverKind {
    /// A character explains which item it wants.
    Request {
        /// Item the character asks for.
        wants: Item,
    },
    /// Numeric code entry for a numpad lock.
    Numpad,
}

/// Reason an input was ignored without changing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// A popover is open, so movement input is suspended.
    PopoverPending,
    /// The action was attempted before its cooldown elapsed.
    CooldownActive,
    /// The action needs a popover that is not open.
    NoPopover,
    /// The action does not apply to the current stage.
    WrongStage,
}

/// Stable identifier of a catalog level.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(String);

impl LevelId {
    /// Creates a new level identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// String form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the identifier when it is made of ASCII digits only.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        if self.0.is_empty() || !self.0.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LevelId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Coarse state of the progression controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// A level is being played.
    Playing,
    /// The win interstitial is shown.
    Win,
    /// The level chooser is shown.
    ChooseLevel,
}

/// Delays gating popover and interstitial actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Minimum time a popover or the win screen stays open before acting.
    #[serde(rename = "input_cooldown_ms", with = "millis")]
    pub input_cooldown: Duration,
    /// Time before the win screen offers the level browser.
    #[serde(rename = "browse_delay_ms", with = "millis")]
    pub browse_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            input_cooldown: DEFAULT_INPUT_COOLDOWN,
            browse_delay: DEFAULT_BROWSE_DELAY,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Commands that express every permissible input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulated clock by the provided delta time.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves the player one cell in the given direction.
    Move {
        /// Direction of travel.
        direction: Direction,
    },
    /// Puts the carried item down on the player's cell.
    Drop,
    /// Submits digits to the open numpad popover.
    SubmitCode {
        /// Digits typed by the player.
        digits: String,
    },
    /// Closes the open popover.
    DismissPopover,
    /// Leaves the win interstitial for the next level.
    Continue,
    /// Leaves the win interstitial for the level chooser.
    BrowseLevels,
    /// Opens the level chooser from any stage.
    OpenLevelChooser,
    /// Starts the level with the provided identifier.
    ChooseLevel {
        /// Identifier of the level to start.
        id: LevelId,
    },
    /// Restarts the current level from scratch.
    Restart,
}

/// Events reported after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// A fresh level instance was created.
    LevelStarted {
        /// Identifier of the level.
        id: LevelId,
        /// Instance number assigned to the level.
        generation: u64,
    },
    /// The player moved between two cells.
    PlayerMoved {
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// The carry slot changed.
    CarryChanged {
        /// Item now carried, if any.
        carry: Option<Item>,
    },
    /// The level score changed.
    ScoreChanged {
        /// New score.
        score: u32,
    },
    /// An animation hint was produced.
    EffectDeclared {
        /// Effect to present.
        effect: Effect,
    },
    /// A popover opened.
    PopoverOpened {
        /// Kind of popover.
        popover: PopoverKind,
    },
    /// The open popover's cooldown elapsed.
    PopoverReady,
    /// The popover closed.
    PopoverClosed,
    /// The numpad accepted the entered code.
    CodeAccepted,
    /// Every target of the level was consumed.
    LevelCleared {
        /// Identifier of the cleared level.
        id: LevelId,
        /// Final score of the level.
        score: u32,
    },
    /// The progression stage changed.
    StageChanged {
        /// Stage that became active.
        stage: StageKind,
    },
    /// The win interstitial now accepts [`Command::Continue`].
    ContinueAvailable,
    /// The win interstitial now accepts [`Command::BrowseLevels`].
    LevelBrowserAvailable,
    /// The navigable location changed.
    LocationChanged {
        /// Path of the active level, absent for pseudo-levels.
        location: Option<String>,
    },
    /// An input was ignored without changing state.
    InputIgnored {
        /// Why the input was ignored.
        reason: IgnoreReason,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn clamp_limits_to_inclusive_range() {
        assert_eq!(clamp(-1, 0, 6), 0);
        assert_eq!(clamp(7, 0, 6), 6);
        assert_eq!(clamp(3, 0, 6), 3);
        assert_eq!(clamp(5, 0, -1), 0);
    }

    #[test]
    fn cell_clamps_onto_board() {
        assert_eq!(CellCoord::new(-1, 9).clamped(7, 8), CellCoord::new(0, 7));
        assert_eq!(CellCoord::new(3, 3).clamped(7, 7), CellCoord::new(3, 3));
    }

    #[test]
    fn point_collides_only_with_same_cell() {
        let footprint = Footprint::cell(4, 3);
        assert!(is_collision(CellCoord::new(4, 3), &footprint));
        assert!(!is_collision(CellCoord::new(3, 4), &footprint));
    }

    #[test]
    fn rectangle_contains_edges_regardless_of_corner_order() {
        let footprint = Footprint::rect(5, 4, 1, 2);
        assert!(footprint.contains(CellCoord::new(1, 2)));
        assert!(footprint.contains(CellCoord::new(5, 4)));
        assert!(footprint.contains(CellCoord::new(3, 3)));
        assert!(!footprint.contains(CellCoord::new(0, 3)));
        assert!(!footprint.contains(CellCoord::new(3, 5)));
        assert_eq!(footprint.anchor(), CellCoord::new(1, 2));
    }

    #[test]
    fn rectangle_enumerates_cells_row_major() {
        let rect = CellRect::from_corners(CellCoord::new(0, 0), CellCoord::new(1, 1));
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn step_follows_direction_offsets() {
        let origin = CellCoord::new(2, 3);
        assert_eq!(origin.step(Direction::Up), CellCoord::new(2, 2));
        assert_eq!(origin.step(Direction::Down), CellCoord::new(2, 4));
        assert_eq!(origin.step(Direction::Left), CellCoord::new(1, 3));
        assert_eq!(origin.step(Direction::Right), CellCoord::new(3, 3));
    }

    #[test]
    fn items_compare_by_value() {
        let red = Color::from_rgb(169, 0, 0);
        assert_eq!(
            Item::Figure(Figure::square(red)),
            ObjectKind::Figure(Figure::new(red, Shape::Square))
                .as_item()
                .expect("figure is pickable")
        );
        assert_ne!(
            Item::Figure(Figure::square(red)),
            Item::Figure(Figure::new(red, Shape::Star))
        );
    }

    #[test]
    fn backdrop_walls_have_no_interaction() {
        assert!(!ObjectKind::BACKDROP.interacts());
        assert!(ObjectKind::WALL.interacts());
        assert!(ObjectKind::cracked_wall(2).interacts());
        assert_eq!(ObjectKind::BACKDROP.category(), ObjectCategory::Wall);
    }

    #[test]
    fn numeric_level_ids_parse() {
        assert_eq!(LevelId::new("12").number(), Some(12));
        assert_eq!(LevelId::new("win").number(), None);
        assert_eq!(LevelId::new("").number(), None);
        assert_eq!(LevelId::new("-3").number(), None);
    }

    #[test]
    fn object_kind_round_trips_through_bincode() {
        assert_round_trip(&ObjectKind::Door {
            out: CellCoord::new(4, 3),
            exit: CellCoord::new(5, 3),
        });
        assert_round_trip(&GridObject::new(
            Footprint::rect(0, 3, 5, 3),
            ObjectKind::BACKDROP,
        ));
    }

    #[test]
    fn timings_default_to_documented_delays() {
        let timings = Timings::default();
        assert_eq!(timings.input_cooldown, Duration::from_millis(600));
        assert_eq!(timings.browse_delay, Duration::from_millis(2_000));
    }
}
