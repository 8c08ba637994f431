//! London borough resolution from organisation and address text

use plaques_common::RawRecord;

use crate::record::Region;

/// Borough tokens in match priority order
///
/// The first token found wins, so this order is the tie-break when several
/// names appear in the same text. Keep it as is.
pub const GAZETTEER: [&str; 34] = [
    "city of london",
    "westminster",
    "camden",
    "islington",
    "hackney",
    "tower hamlets",
    "southwark",
    "lambeth",
    "wandsworth",
    "hammersmith",
    "kensington",
    "chelsea",
    "fulham",
    "barnet",
    "enfield",
    "haringey",
    "brent",
    "ealing",
    "harrow",
    "hillingdon",
    "richmond",
    "kingston",
    "merton",
    "sutton",
    "croydon",
    "bromley",
    "lewisham",
    "greenwich",
    "bexley",
    "newham",
    "redbridge",
    "barking",
    "dagenham",
    "havering",
];

/// Resolve the borough of a record
pub fn resolve_region(record: &RawRecord) -> Region {
    let attrs = record.attributes();
    resolve_region_text(&attrs.organisations, &attrs.address)
}

/// Resolve a borough from organisation and address text
pub fn resolve_region_text(organisations: &str, address: &str) -> Region {
    let haystack = format!("{} {}", organisations, address).to_lowercase();
    GAZETTEER
        .iter()
        .find(|token| haystack.contains(*token))
        .map(|token| Region::Borough(title_case(token)))
        .unwrap_or(Region::Unknown)
}

/// Upper-case the first letter of every space-separated word
pub fn title_case(token: &str) -> String {
    token
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
