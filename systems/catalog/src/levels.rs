//! Built-in levels.
//!
//! Levels 1 to 12 form the tutorial set: movement, walls, locks and keys and
//! colour matching NPCs. Levels 13 to 32 introduce doors, numpad locks,
//! destructible walls, backdrop rectangles, shapes and their combinations.

use rand::{Rng, RngCore};
use walkie_core::{
    CellCoord, Color, Figure, Footprint, GridObject, Item, ObjectKind, Shape,
};
use walkie_world::Level;

use crate::{choose_n, shuffle, CatalogError, Generator, LevelTemplate, OnLoad, Placement};

/// Colours used by randomised levels, darker tones first.
pub const PALETTE: [Color; 10] = [
    Color::from_rgb(169, 0, 0),
    Color::from_rgb(77, 71, 0),
    Color::from_rgb(0, 106, 46),
    Color::from_rgb(0, 82, 158),
    Color::from_rgb(129, 0, 130),
    Color::from_rgb(255, 175, 0),
    Color::from_rgb(0, 218, 231),
    Color::from_rgb(255, 121, 216),
    Color::from_rgb(255, 184, 38),
    Color::from_rgb(0, 255, 45),
];

/// Pastel colours used by the eleven-figure level.
pub const PASTELS: [Color; 11] = [
    Color::from_rgb(255, 111, 189),
    Color::from_rgb(255, 118, 24),
    Color::from_rgb(255, 146, 0),
    Color::from_rgb(227, 177, 0),
    Color::from_rgb(120, 202, 0),
    Color::from_rgb(0, 217, 129),
    Color::from_rgb(0, 220, 223),
    Color::from_rgb(0, 211, 255),
    Color::from_rgb(0, 190, 255),
    Color::from_rgb(182, 161, 255),
    Color::from_rgb(255, 130, 255),
];

/// Generators available to level packs by name.
pub const GENERATORS: &[(&str, Generator)] = &[
    ("npc-pair", npc_pair),
    ("npc-gates", npc_gates),
    ("pastels", pastels),
    ("numpad-intro", numpad_intro),
    ("shape-match", shape_match),
    ("npc-series", npc_series),
    ("numpad-and-npc", numpad_and_npc),
    ("four-corners", four_corners),
    ("colour-and-shape", colour_and_shape),
    ("two-numpads", two_numpads),
    ("drop-corridor", drop_corridor),
    ("doors-numpad-crack", doors_numpad_crack),
    ("rainbow-column", rainbow_column),
    ("finale", finale),
];

const TALL: u32 = 8;

const TEAL: Color = Color::from_rgb(0, 220, 184);

/// Every built-in level in catalog order.
#[must_use]
pub fn builtin() -> Vec<LevelTemplate> {
    vec![
        script("1", "First steps", (2, 3), vec![target(&[(4, 3)])]).with_carry(Item::Key),
        script(
            "2",
            "Around the corner",
            (1, 1),
            vec![
                target(&[(5, 5)]),
                walls(&[(4, 1), (5, 1), (5, 2), (1, 4), (1, 5), (2, 5)]),
            ],
        ),
        script(
            "3",
            "Detour",
            (1, 3),
            vec![target(&[(5, 3)]), walls(&[(3, 2), (3, 3), (3, 4)])],
        ),
        script(
            "4",
            "The long way",
            (2, 1),
            vec![
                target(&[(2, 5)]),
                walls(&[(0, 3), (1, 3), (2, 3), (3, 3), (4, 3)]),
            ],
        ),
        script(
            "5",
            "Four corners",
            (3, 3),
            vec![
                target(&[(1, 1), (1, 5), (5, 1), (5, 5)]),
                walls(&[
                    (1, 3),
                    (3, 1),
                    (5, 3),
                    (3, 5),
                    (0, 3),
                    (3, 0),
                    (6, 3),
                    (3, 6),
                ]),
            ],
        ),
        script(
            "6",
            "Spiral",
            (1, 1),
            vec![
                target(&[(5, 1)]),
                walls(&[
                    (3, 0),
                    (3, 1),
                    (3, 2),
                    (3, 3),
                    (1, 3),
                    (1, 4),
                    (1, 5),
                    (5, 3),
                    (5, 4),
                    (5, 5),
                    (2, 5),
                    (3, 5),
                    (4, 5),
                ]),
            ],
        ),
        script(
            "7",
            "Lock and key",
            (1, 3),
            vec![
                target(&[(5, 1)]),
                locks(&[(3, 2)]),
                keys(&[(5, 5)]),
                walls(&[(3, 0), (3, 1), (3, 3), (4, 3), (5, 3), (6, 3)]),
            ],
        ),
        procedural("8", "Pick one", (3, 1), npc_pair),
        script(
            "9",
            "Many locks",
            (1, 1),
            vec![
                target(&[(5, 1)]),
                keys(&[(5, 5)]),
                locks(&[(3, 0), (3, 1), (3, 2), (4, 3), (5, 3), (6, 3)]),
                walls(&[(3, 3)]),
            ],
        ),
        procedural("10", "Gatekeepers", (2, 3), npc_gates),
        script(
            "11",
            "Choices",
            (1, 2),
            vec![
                target(&[(5, 6)]),
                locks(&[(5, 4)]),
                Placement::cells(npc(TEAL), &[(1, 4)]),
                walls(&[
                    (1, 0),
                    (3, 0),
                    (5, 0),
                    (0, 4),
                    (2, 4),
                    (3, 4),
                    (4, 4),
                    (6, 4),
                    (3, 5),
                    (3, 6),
                ]),
                keys(&[(1, 6)]),
                Placement::cells(figure(Color::from_rgb(255, 111, 189)), &[(0, 0)]),
                Placement::cells(figure(Color::from_rgb(244, 170, 0)), &[(2, 0)]),
                Placement::cells(figure(TEAL), &[(4, 0)]),
                Placement::cells(figure(Color::from_rgb(55, 183, 255)), &[(6, 0)]),
            ],
        ),
        procedural("12", "Pastels", (3, 2), pastels),
        script(
            "13",
            "Doors",
            (1, 3),
            vec![
                Placement::cells(door((4, 3), (5, 3)), &[(2, 3)]),
                Placement::cells(door((2, 3), (1, 3)), &[(4, 3)]),
                Placement::rect(ObjectKind::BACKDROP, 3, 0, 3, 6),
                target(&[(6, 0), (6, 6)]),
            ],
        ),
        script(
            "14",
            "Downstairs",
            (3, 1),
            vec![
                Placement::cells(door((3, 5), (3, 6)), &[(3, 3)]),
                Placement::cells(door((3, 3), (3, 2)), &[(3, 5)]),
                Placement::rect(ObjectKind::BACKDROP, 0, 4, 6, 4),
                keys(&[(0, 0)]),
                locks(&[(6, 6)]),
                walls(&[(5, 7)]),
                target(&[(6, 7), (0, 7)]),
            ],
        )
        .with_height(TALL),
        procedural("15", "Numpad", (3, 5), numpad_intro),
        script(
            "16",
            "Cracks",
            (0, 3),
            vec![
                Placement::rect(ObjectKind::BACKDROP, 2, 0, 2, 2),
                Placement::rect(ObjectKind::BACKDROP, 2, 4, 2, 6),
                Placement::cells(ObjectKind::cracked_wall(3), &[(2, 3)]),
                target(&[(5, 1), (5, 5)]),
            ],
        ),
        procedural("17", "Shapes", (3, 1), shape_match),
        procedural("18", "Two in a row", (3, 0), npc_series),
        script(
            "19",
            "One way",
            (0, 0),
            vec![
                Placement::cells(door((0, 6), (1, 6)), &[(0, 4)]),
                Placement::cells(door((6, 4), (6, 3)), &[(6, 6)]),
                Placement::rect(ObjectKind::BACKDROP, 0, 5, 6, 5),
                keys(&[(3, 7)]),
                locks(&[(5, 0)]),
                walls(&[(6, 1)]),
                target(&[(6, 0)]),
            ],
        )
        .with_height(TALL),
        procedural("20", "Code and colour", (3, 0), numpad_and_npc),
        script(
            "21",
            "Ring",
            (0, 0),
            vec![
                Placement::cells(
                    ObjectKind::cracked_wall(2),
                    &[
                        (2, 2),
                        (3, 2),
                        (4, 2),
                        (2, 3),
                        (4, 3),
                        (2, 4),
                        (3, 4),
                        (4, 4),
                    ],
                ),
                target(&[(3, 3), (6, 6)]),
            ],
        ),
        procedural("22", "Four gates", (3, 3), four_corners),
        script(
            "23",
            "Three locks",
            (1, 3),
            vec![
                walls(&[(3, 2), (4, 2), (5, 2), (6, 2), (3, 4), (4, 4), (5, 4), (6, 4)]),
                locks(&[(3, 3), (4, 3), (5, 3)]),
                keys(&[(0, 0), (0, 6), (6, 6)]),
                target(&[(6, 3)]),
            ],
        ),
        procedural("24", "Colour and shape", (3, 1), colour_and_shape),
        procedural("25", "Two codes", (3, 0), two_numpads),
        script(
            "26",
            "Three rooms",
            (0, 0),
            vec![
                Placement::cells(door((3, 2), (3, 3)), &[(1, 2)]),
                Placement::cells(door((1, 2), (1, 3)), &[(3, 2)]),
                Placement::cells(door((5, 6), (6, 6)), &[(3, 6)]),
                Placement::cells(door((3, 6), (3, 5)), &[(5, 6)]),
                Placement::rect(ObjectKind::BACKDROP, 2, 0, 2, 7),
                Placement::rect(ObjectKind::BACKDROP, 4, 0, 4, 7),
                target(&[(0, 7), (3, 4), (6, 0)]),
            ],
        )
        .with_height(TALL),
        script(
            "27",
            "Crack, key, lock",
            (0, 0),
            vec![
                Placement::cells(ObjectKind::cracked_wall(3), &[(1, 6)]),
                walls(&[(0, 5), (6, 5)]),
                keys(&[(0, 6)]),
                locks(&[(5, 6)]),
                target(&[(6, 6), (3, 3)]),
            ],
        ),
        script(
            "28",
            "Key for a friend",
            (3, 1),
            vec![
                Placement::cells(ObjectKind::Npc { wants: Item::Key }, &[(3, 3)]),
                walls(&[(0, 3), (1, 3), (2, 3), (4, 3), (5, 3), (6, 3), (2, 6), (4, 6)]),
                locks(&[(3, 5)]),
                keys(&[(0, 0), (6, 0)]),
                target(&[(3, 6)]),
            ],
        ),
        procedural("29", "Make room", (3, 0), drop_corridor),
        procedural("30", "Everything at once", (0, 3), doors_numpad_crack),
        procedural("31", "Rainbow", (3, 0), rainbow_column).with_height(TALL),
        procedural("32", "Finale", (0, 0), finale).with_height(TALL),
    ]
}

fn script(id: &str, name: &str, (x, y): (i32, i32), steps: Vec<Placement>) -> LevelTemplate {
    LevelTemplate::new(id, name, CellCoord::new(x, y), OnLoad::Script(steps))
}

fn procedural(id: &str, name: &str, (x, y): (i32, i32), generator: Generator) -> LevelTemplate {
    LevelTemplate::new(id, name, CellCoord::new(x, y), OnLoad::Procedural(generator))
}

fn target(cells: &[(i32, i32)]) -> Placement {
    Placement::cells(ObjectKind::Target, cells)
}

fn walls(cells: &[(i32, i32)]) -> Placement {
    Placement::cells(ObjectKind::WALL, cells)
}

fn locks(cells: &[(i32, i32)]) -> Placement {
    Placement::cells(ObjectKind::LOCK, cells)
}

fn keys(cells: &[(i32, i32)]) -> Placement {
    Placement::cells(ObjectKind::Key, cells)
}

fn figure(color: Color) -> ObjectKind {
    ObjectKind::Figure(Figure::square(color))
}

fn npc(color: Color) -> ObjectKind {
    ObjectKind::Npc {
        wants: Item::Figure(Figure::square(color)),
    }
}

fn door((ox, oy): (i32, i32), (ex, ey): (i32, i32)) -> ObjectKind {
    ObjectKind::Door {
        out: CellCoord::new(ox, oy),
        exit: CellCoord::new(ex, ey),
    }
}

fn add(level: &mut Level, kind: &ObjectKind, cells: &[(i32, i32)]) {
    for &(x, y) in cells {
        level.push_object(GridObject::at(CellCoord::new(x, y), kind.clone()));
    }
}

fn add_rect(level: &mut Level, kind: ObjectKind, (x, y): (i32, i32), (xx, yy): (i32, i32)) {
    level.push_object(GridObject::new(Footprint::rect(x, y, xx, yy), kind));
}

/// Horizontal wall row with a single gap at `gap`.
fn wall_row(level: &mut Level, y: i32, gap: i32) {
    for x in (0..7).filter(|&x| x != gap) {
        add(level, &ObjectKind::WALL, &[(x, y)]);
    }
}

fn numpad_code(rng: &mut dyn RngCore, digits: usize) -> String {
    (0..digits)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

fn pick<T: Copy>(items: &[T], rng: &mut dyn RngCore) -> T {
    items[rng.gen_range(0..items.len())]
}

fn npc_pair(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    add(level, &ObjectKind::Target, &[(3, 5)]);
    let colors = choose_n(&PALETTE, 2, rng)?;
    let wanted = pick(&colors, rng);
    add(level, &npc(wanted), &[(3, 3)]);
    add(level, &figure(colors[0]), &[(1, 1)]);
    add(level, &figure(colors[1]), &[(5, 1)]);
    wall_row(level, 3, 3);
    Ok(())
}

fn npc_gates(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let mut colors = choose_n(&PALETTE, 2, rng)?;
    add(level, &ObjectKind::Target, &[(6, 0), (6, 3), (6, 6)]);
    add(level, &ObjectKind::LOCK, &[(4, 3)]);
    add(level, &npc(colors[0]), &[(4, 1)]);
    add(level, &npc(colors[1]), &[(4, 5)]);
    add(
        level,
        &ObjectKind::WALL,
        &[
            (0, 0),
            (0, 2),
            (0, 4),
            (0, 6),
            (4, 0),
            (4, 6),
            (4, 2),
            (5, 2),
            (6, 2),
            (4, 4),
            (5, 4),
            (6, 4),
        ],
    );
    add(level, &ObjectKind::Key, &[(0, 1)]);
    shuffle(&mut colors, rng);
    add(level, &figure(colors[0]), &[(0, 3)]);
    add(level, &figure(colors[1]), &[(0, 5)]);
    Ok(())
}

fn pastels(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    const SPOTS: [(i32, i32); 11] = [
        (1, 0),
        (3, 0),
        (5, 0),
        (0, 1),
        (0, 3),
        (0, 5),
        (6, 1),
        (6, 3),
        (6, 5),
        (1, 6),
        (5, 6),
    ];

    add(level, &ObjectKind::Target, &[(3, 6)]);
    add(
        level,
        &ObjectKind::WALL,
        &[
            (2, 4),
            (2, 5),
            (2, 6),
            (4, 4),
            (4, 5),
            (4, 6),
            (0, 0),
            (0, 2),
            (0, 4),
            (0, 6),
            (6, 0),
            (6, 2),
            (6, 4),
            (6, 6),
            (2, 0),
            (4, 0),
        ],
    );
    let mut colors = PASTELS;
    shuffle(&mut colors, rng);
    for (&spot, &color) in SPOTS.iter().zip(colors.iter()) {
        add(level, &figure(color), &[spot]);
    }
    add(level, &npc(pick(&colors, rng)), &[(3, 4)]);
    Ok(())
}

fn numpad_intro(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let code = numpad_code(rng, 4);
    level.set_caption(format!("The code is {code}."));
    add(level, &ObjectKind::NumpadLock { code }, &[(3, 3)]);
    wall_row(level, 3, 3);
    add(level, &ObjectKind::Target, &[(3, 0)]);
    Ok(())
}

fn shape_match(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let color = pick(&PALETTE, rng);
    let shapes = choose_n(&Shape::ALL, 3, rng)?;
    let wanted = Figure::new(color, pick(&shapes, rng));

    add(level, &ObjectKind::Target, &[(3, 5)]);
    add(
        level,
        &ObjectKind::Npc {
            wants: Item::Figure(wanted),
        },
        &[(3, 3)],
    );
    wall_row(level, 3, 3);
    for (shape, spot) in shapes.into_iter().zip([(1, 0), (3, 0), (5, 0)]) {
        add(level, &ObjectKind::Figure(Figure::new(color, shape)), &[spot]);
    }
    Ok(())
}

fn npc_series(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let colors = choose_n(&PALETTE, 2, rng)?;
    let mut spots = [(0, 0), (6, 0)];
    shuffle(&mut spots, rng);

    add(level, &npc(colors[0]), &[(3, 2)]);
    wall_row(level, 2, 3);
    add(level, &npc(colors[1]), &[(3, 4)]);
    wall_row(level, 4, 3);
    add(level, &figure(colors[0]), &[spots[0]]);
    add(level, &figure(colors[1]), &[spots[1]]);
    add(level, &ObjectKind::Target, &[(3, 6)]);
    Ok(())
}

fn numpad_and_npc(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let code = numpad_code(rng, 4);
    level.set_caption(format!("The code is {code}."));
    let colors = choose_n(&PALETTE, 2, rng)?;

    add(level, &ObjectKind::NumpadLock { code }, &[(3, 2)]);
    wall_row(level, 2, 3);
    add(level, &npc(pick(&colors, rng)), &[(3, 4)]);
    wall_row(level, 4, 3);
    add(level, &figure(colors[0]), &[(0, 3)]);
    add(level, &figure(colors[1]), &[(6, 3)]);
    add(level, &ObjectKind::Target, &[(3, 6)]);
    Ok(())
}

fn four_corners(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let mut colors = choose_n(&PALETTE, 4, rng)?;

    add(level, &ObjectKind::Target, &[(0, 0), (6, 0), (0, 6), (6, 6)]);
    for (&color, gate) in colors.iter().zip([(1, 0), (5, 0), (1, 6), (5, 6)]) {
        add(level, &npc(color), &[gate]);
    }
    add(level, &ObjectKind::WALL, &[(0, 1), (6, 1), (0, 5), (6, 5)]);
    shuffle(&mut colors, rng);
    for (&color, spot) in colors.iter().zip([(3, 1), (1, 3), (5, 3), (3, 5)]) {
        add(level, &figure(color), &[spot]);
    }
    Ok(())
}

fn colour_and_shape(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let colors = choose_n(&PALETTE, 2, rng)?;
    let shapes = choose_n(&Shape::ALL, 2, rng)?;
    let mut figures: Vec<Figure> = colors
        .iter()
        .flat_map(|&color| shapes.iter().map(move |&shape| Figure::new(color, shape)))
        .collect();
    shuffle(&mut figures, rng);
    let wanted = pick(&figures, rng);

    add(level, &ObjectKind::Target, &[(3, 6)]);
    add(
        level,
        &ObjectKind::Npc {
            wants: Item::Figure(wanted),
        },
        &[(3, 3)],
    );
    wall_row(level, 3, 3);
    for (&candidate, spot) in figures.iter().zip([(0, 0), (2, 0), (4, 0), (6, 0)]) {
        add(level, &ObjectKind::Figure(candidate), &[spot]);
    }
    Ok(())
}

fn two_numpads(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let upper = numpad_code(rng, 3);
    let lower = numpad_code(rng, 3);
    level.set_caption(format!("Upper lock: {upper}. Lower lock: {lower}."));

    add(level, &ObjectKind::NumpadLock { code: upper }, &[(3, 2)]);
    wall_row(level, 2, 3);
    add(level, &ObjectKind::NumpadLock { code: lower }, &[(3, 4)]);
    wall_row(level, 4, 3);
    add(level, &ObjectKind::Target, &[(3, 6)]);
    Ok(())
}

fn drop_corridor(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let colors = choose_n(&PALETTE, 2, rng)?;

    add(level, &figure(colors[1]), &[(3, 1)]);
    add(level, &figure(colors[0]), &[(3, 3)]);
    add(
        level,
        &ObjectKind::WALL,
        &[
            (2, 1),
            (2, 2),
            (2, 3),
            (2, 4),
            (4, 1),
            (4, 2),
            (4, 3),
            (4, 4),
        ],
    );
    add(level, &npc(colors[0]), &[(3, 5)]);
    wall_row(level, 5, 3);
    add(level, &ObjectKind::Target, &[(3, 6)]);
    Ok(())
}

fn doors_numpad_crack(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let code = numpad_code(rng, 4);
    level.set_caption(format!("The code is {code}."));

    add(level, &door((4, 3), (5, 3)), &[(2, 3)]);
    add(level, &door((2, 3), (1, 3)), &[(4, 3)]);
    add_rect(level, ObjectKind::BACKDROP, (3, 0), (3, 6));
    add(level, &ObjectKind::NumpadLock { code }, &[(5, 1)]);
    add(level, &ObjectKind::cracked_wall(2), &[(5, 5)]);
    add(level, &ObjectKind::WALL, &[(4, 0), (6, 0), (4, 6), (6, 6)]);
    add(level, &ObjectKind::Target, &[(5, 0), (5, 6)]);
    Ok(())
}

fn rainbow_column(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let colors = choose_n(&PALETTE, 5, rng)?;
    let mut spots = [(0, 0), (1, 0), (5, 0), (6, 0), (6, 1)];
    shuffle(&mut spots, rng);

    for (&color, y) in colors.iter().zip(2..) {
        add(level, &npc(color), &[(3, y)]);
    }
    for y in 2..7 {
        add(level, &ObjectKind::WALL, &[(2, y), (4, y)]);
    }
    for (&color, &spot) in colors.iter().zip(spots.iter()) {
        add(level, &figure(color), &[spot]);
    }
    add(level, &ObjectKind::Target, &[(3, 7)]);
    Ok(())
}

fn finale(level: &mut Level, rng: &mut dyn RngCore) -> Result<(), CatalogError> {
    let colors = choose_n(&PALETTE, 2, rng)?;
    let code = numpad_code(rng, 4);
    level.set_caption(format!("The code is {code}."));
    let mut spots = [(3, 0), (4, 1)];
    shuffle(&mut spots, rng);

    add(level, &ObjectKind::WALL, &[(0, 1)]);
    add(level, &npc(colors[0]), &[(1, 2)]);
    add(level, &ObjectKind::Key, &[(0, 2)]);
    add(level, &figure(colors[0]), &[spots[0]]);
    add(level, &figure(colors[1]), &[spots[1]]);
    add(level, &ObjectKind::LOCK, &[(6, 2)]);
    add(level, &door((0, 4), (1, 4)), &[(6, 3)]);
    add(level, &door((6, 3), (6, 2)), &[(0, 4)]);
    add_rect(level, ObjectKind::BACKDROP, (0, 3), (5, 3));
    add(level, &ObjectKind::cracked_wall(2), &[(5, 4)]);
    add(level, &ObjectKind::WALL, &[(6, 5)]);
    add(level, &ObjectKind::NumpadLock { code }, &[(3, 6)]);
    wall_row(level, 6, 3);
    add(level, &ObjectKind::Target, &[(6, 4), (3, 7), (0, 7), (6, 7)]);
    Ok(())
}
