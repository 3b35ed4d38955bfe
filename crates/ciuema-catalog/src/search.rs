use ciuema_core::models::collection::Collection;
use ciuema_core::models::species::Species;

/// Species whose code contains `term`, ignoring case. An empty term matches
/// everything. Order is preserved.
pub fn filter_by_code<'a, I>(species: I, term: &str) -> impl Iterator<Item = &'a Species>
where
    I: IntoIterator<Item = &'a Species>,
{
    let needle = term.to_lowercase();
    species
        .into_iter()
        .filter(move |s| needle.is_empty() || s.id.to_lowercase().contains(&needle))
}

/// [`filter_by_code`] over a collection's species.
pub fn filter_species_by_code<'a>(
    collection: &'a Collection,
    term: &str,
) -> impl Iterator<Item = &'a Species> {
    filter_by_code(&collection.species, term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Collection {
        let mut col = Collection::new("Reef Fish".into(), "jsilva".into(), None);
        col.species = vec![
            Species::new("GUP-001", "Guppy", "Poecilia reticulata"),
            Species::new("TET-001", "Neon tetra", "Paracheirodon innesi"),
            Species::new("GUP-002", "Endler", "Poecilia wingei"),
        ];
        col
    }

    fn codes<'a>(species: impl Iterator<Item = &'a Species>) -> Vec<&'a str> {
        species.map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_lowercase_term_matches() {
        let col = collection();
        assert_eq!(
            codes(filter_species_by_code(&col, "gup")),
            vec!["GUP-001", "GUP-002"]
        );
    }

    #[test]
    fn test_empty_term_returns_everything() {
        let col = collection();
        let all: Vec<&Species> = filter_species_by_code(&col, "").collect();
        let expected: Vec<&Species> = col.species.iter().collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let col = collection();
        let once: Vec<&Species> = filter_species_by_code(&col, "-001").collect();
        let twice: Vec<&Species> = filter_by_code(once.iter().copied(), "-001").collect();
        assert_eq!(once, twice);
        assert_eq!(codes(once.into_iter()), vec!["GUP-001", "TET-001"]);
    }

    #[test]
    fn test_no_match() {
        let col = collection();
        assert_eq!(filter_species_by_code(&col, "zzz").count(), 0);
    }
}
