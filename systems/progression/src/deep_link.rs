//! Mapping between catalog levels and navigable paths.

use walkie_core::LevelId;
use walkie_system_catalog::Catalog;

/// Path of a level, `"/<id>"` for numeric identifiers.
#[must_use]
pub fn location_for(id: &LevelId) -> Option<String> {
    id.number().map(|_| format!("/{id}"))
}

/// Resolves a path segment such as `"7"` or `"/7"` to a catalog level.
///
/// The segment is matched verbatim first, then by its numeric value, so
/// `"/07"` opens a level named `07` when there is one and level `7` otherwise.
#[must_use]
pub fn resolve_deep_link(segment: &str, catalog: &Catalog) -> Option<LevelId> {
    let trimmed = segment.trim();
    let exact = LevelId::new(trimmed.strip_prefix('/').unwrap_or(trimmed));
    let number = exact.number()?;
    if catalog.contains(&exact) {
        return Some(exact);
    }
    let id = LevelId::new(number.to_string());
    catalog.contains(&id).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_levels_have_paths() {
        assert_eq!(location_for(&LevelId::new("12")), Some("/12".to_owned()));
        assert_eq!(location_for(&LevelId::new("bonus")), None);
    }

    #[test]
    fn deep_links_resolve_only_known_levels() {
        let catalog = Catalog::builtin();
        assert_eq!(resolve_deep_link("7", &catalog), Some(LevelId::new("7")));
        assert_eq!(resolve_deep_link("/7", &catalog), Some(LevelId::new("7")));
        assert_eq!(resolve_deep_link("/07", &catalog), Some(LevelId::new("7")));
        assert_eq!(resolve_deep_link("/99", &catalog), None);
        assert_eq!(resolve_deep_link("/win", &catalog), None);
        assert_eq!(resolve_deep_link("", &catalog), None);
    }

    #[test]
    fn zero_padded_pack_levels_keep_their_path() {
        let json = r#"{ "levels": [{ "id": "07", "name": "Padded", "start": { "x": 0, "y": 0 } }] }"#;
        let catalog = Catalog::builtin().with_pack_json(json).expect("pack loads");
        let id = LevelId::new("07");
        let path = location_for(&id).expect("numeric id");
        assert_eq!(path, "/07");
        assert_eq!(resolve_deep_link(&path, &catalog), Some(id));
        assert_eq!(resolve_deep_link("/7", &catalog), Some(LevelId::new("7")));
    }
}
