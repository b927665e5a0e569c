//! Prefix search over the address index producing autocomplete suggestions.

use std::collections::HashMap;

use crate::index::{AddressIndex, split_on_first_space};
use crate::model::{AddressInfo, LabelValue};

/// Search the index for suggestions matching a partially typed address.
///
/// The term is lowercased and split on its first whitespace boundary into a
/// street prefix and a specifier prefix. An exact street hit drills down into
/// that street's specifiers; otherwise every street whose key starts with the
/// prefix yields one suggestion, in sort order.
///
/// With `suppress_exact` set, a drill-down that produced exactly one
/// suggestion whose specifier equals the typed specifier returns nothing:
/// the address is already fully typed and re-showing the menu would only
/// annoy. Suggestions keep the index's natural street order and, within a
/// street, the source-file order of specifiers.
#[must_use]
pub fn search(
    index: &AddressIndex,
    info: &HashMap<String, AddressInfo>,
    term: &str,
    suppress_exact: bool,
) -> Vec<LabelValue> {
    let lowered = term.to_lowercase();
    let (street_prefix, specifier_prefix) = split_on_first_space(&lowered);

    let mut suggestions = Vec::new();

    if let Some((street, addresses)) = index.street(&street_prefix) {
        let mut exact_match = false;
        for address in addresses {
            if address.key().starts_with(&specifier_prefix) {
                let info_key = format!("{street_prefix} {}", address.key());
                let enrichment = info.get(info_key.trim()).cloned();
                suggestions.push(LabelValue {
                    label: format!("{} {}", street.label(), address.specifier()),
                    info: enrichment,
                });
                exact_match = address.key() == specifier_prefix;
            }
        }

        // One exact hit means the menu would only repeat the input.
        if suggestions.len() == 1 && exact_match && suppress_exact {
            suggestions.clear();
        }
    } else {
        suggestions.extend(
            index
                .streets_with_prefix(&street_prefix)
                .map(|street| LabelValue {
                    label: street.label().to_owned(),
                    info: None,
                }),
        );
    }

    suggestions
}
