//! Sorted street index mapping normalized street names to their addresses.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::model::{Address, StreetKey};

/// Split an address on its first whitespace boundary.
///
/// Returns the first token and the remainder with internal whitespace runs
/// collapsed to single spaces. Either half may be empty.
#[must_use]
pub fn split_on_first_space(input: &str) -> (String, String) {
    let mut parts = input.split_whitespace();
    let street = parts.next().unwrap_or_default().to_owned();
    let rest = parts.collect::<Vec<&str>>().join(" ");
    (street, rest)
}

#[derive(Debug, Default)]
/// Ordered mapping from [`StreetKey`] to the addresses on that street.
///
/// The map stays sorted by comparison key at all times, which is what makes
/// prefix range scans possible. Within one street the addresses keep the
/// insertion order of the source file.
pub struct AddressIndex {
    streets: BTreeMap<StreetKey, Vec<Address>>,
}

impl AddressIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one full address label (street plus specifier) with its area.
    ///
    /// The label is split on the first whitespace boundary; the first token
    /// becomes the street, the remainder the specifier. Labels without a
    /// street token are ignored.
    pub fn insert(&mut self, address_label: &str, area: &str) {
        let (street, specifier) = split_on_first_space(address_label);
        if street.is_empty() {
            return;
        }
        self.streets
            .entry(StreetKey::new(street))
            .or_default()
            .push(Address::new(specifier, area));
    }

    /// Resolve a full address to its area code.
    ///
    /// Case-insensitive on both the street name and the specifier; the
    /// specifier must match exactly (not as a prefix). Any miss is `None`.
    #[must_use]
    pub fn lookup_area(&self, address: &str) -> Option<&str> {
        if address.trim().is_empty() {
            return None;
        }
        let (street, specifier) = split_on_first_space(address);
        let street_key = street.to_lowercase();
        let specifier_key = specifier.to_lowercase();
        let addresses = self.streets.get(street_key.as_str())?;
        addresses
            .iter()
            .find(|candidate| candidate.key() == specifier_key)
            .map(Address::area)
    }

    /// Street entry matching the given lowercase comparison key exactly.
    #[must_use]
    pub fn street(&self, key: &str) -> Option<(&StreetKey, &[Address])> {
        self.streets
            .get_key_value(key)
            .map(|(street, addresses)| (street, addresses.as_slice()))
    }

    /// Streets whose comparison key starts with the given lowercase prefix,
    /// in sort order.
    ///
    /// Scans forward from the prefix insertion point and stops at the first
    /// non-matching key, which the sorted-map invariant makes correct.
    pub fn streets_with_prefix<'index>(
        &'index self,
        prefix: &'index str,
    ) -> impl Iterator<Item = &'index StreetKey> {
        self.streets
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(street, _addresses)| street)
            .take_while(move |street| street.key().starts_with(prefix))
    }

    /// Iterate over all streets and their addresses in sort order.
    pub fn iter(&self) -> impl Iterator<Item = (&StreetKey, &[Address])> {
        self.streets
            .iter()
            .map(|(street, addresses)| (street, addresses.as_slice()))
    }

    /// Number of distinct streets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.streets.len()
    }

    /// Whether the index holds no streets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> AddressIndex {
        let mut index = AddressIndex::new();
        index.insert("Laugavegur 12", "V2");
        index.insert("Laugavegur 14A", "V2");
        index.insert("Aegisgata 3", "V1");
        index.insert("Skolavordustigur 8", "A1");
        index
    }

    #[test]
    fn split_keeps_first_token_and_joins_remainder() {
        assert_eq!(
            split_on_first_space("Laugavegur 12  b"),
            ("Laugavegur".to_owned(), "12 b".to_owned())
        );
        assert_eq!(
            split_on_first_space("Laugavegur"),
            ("Laugavegur".to_owned(), String::new())
        );
        assert_eq!(split_on_first_space("   "), (String::new(), String::new()));
    }

    #[test]
    fn index_stays_sorted_regardless_of_insertion_order() {
        let index = sample_index();
        let keys: Vec<&str> = index.iter().map(|(street, _)| street.key()).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted, "street keys in sort order");
    }

    #[test]
    fn addresses_keep_insertion_order_within_a_street() {
        let index = sample_index();
        let (_, addresses) = index.street("laugavegur").expect("street exists");
        let specifiers: Vec<&str> = addresses.iter().map(Address::specifier).collect();
        assert_eq!(specifiers, vec!["12", "14A"], "source-file order");
    }

    #[test]
    fn lookup_area_is_case_insensitive_on_both_halves() {
        let index = sample_index();
        for address in ["Laugavegur 14A", "laugavegur 14a", "LAUGAVEGUR 14A"] {
            assert_eq!(index.lookup_area(address), Some("V2"), "{address}");
        }
    }

    #[test]
    fn lookup_area_requires_exact_specifier() {
        let index = sample_index();
        assert_eq!(index.lookup_area("Laugavegur 1"), None, "prefix is no hit");
        assert_eq!(index.lookup_area("Laugavegur"), None, "missing specifier");
        assert_eq!(index.lookup_area("Baronsstigur 2"), None, "unknown street");
        assert_eq!(index.lookup_area("   "), None, "blank input");
    }

    #[test]
    fn prefix_scan_stops_at_first_non_match() {
        let index = sample_index();
        let labels: Vec<&str> = index
            .streets_with_prefix("la")
            .map(StreetKey::label)
            .collect();
        assert_eq!(labels, vec!["Laugavegur"]);

        let all: Vec<&str> = index.streets_with_prefix("").map(StreetKey::label).collect();
        assert_eq!(all, vec!["Aegisgata", "Laugavegur", "Skolavordustigur"]);
    }
}
