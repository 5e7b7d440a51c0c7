//! Type categories the list can be filtered by

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Concrete types offered by the picker. Declaration order is the merge order
/// used when every type is fetched at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Fire,
    Water,
    Grass,
    Electric,
    Dragon,
    Psychic,
    Ghost,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    pub const ALL: [PokemonType; 10] = [
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Grass,
        PokemonType::Electric,
        PokemonType::Dragon,
        PokemonType::Psychic,
        PokemonType::Ghost,
        PokemonType::Dark,
        PokemonType::Steel,
        PokemonType::Fairy,
    ];

    /// Path segment used by `GET /type/<slug>`.
    pub fn slug(self) -> &'static str {
        match self {
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Grass => "grass",
            PokemonType::Electric => "electric",
            PokemonType::Dragon => "dragon",
            PokemonType::Psychic => "psychic",
            PokemonType::Ghost => "ghost",
            PokemonType::Dark => "dark",
            PokemonType::Steel => "steel",
            PokemonType::Fairy => "fairy",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(slug))
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Selected list filter: one concrete type, or the union of all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    All,
    Type(PokemonType),
}

impl Category {
    /// Picker order: the sentinel first, then every concrete type.
    pub fn options() -> Vec<Category> {
        std::iter::once(Category::All)
            .chain(PokemonType::ALL.into_iter().map(Category::Type))
            .collect()
    }

    pub fn position(self) -> usize {
        match self {
            Category::All => 0,
            Category::Type(kind) => PokemonType::ALL
                .iter()
                .position(|item| *item == kind)
                .map(|idx| idx + 1)
                .unwrap_or(0),
        }
    }

    /// Steps through `options()` with wrap-around.
    pub fn cycle(self, step: i16) -> Category {
        let options = Self::options();
        let len = options.len() as i16;
        let next = (self.position() as i16 + step).rem_euclid(len);
        options[next as usize]
    }

    pub fn label(self) -> String {
        match self {
            Category::All => "ALL TYPES".to_string(),
            Category::Type(kind) => kind.slug().to_ascii_uppercase(),
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Type(PokemonType::Fire)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::All => f.write_str("all"),
            Category::Type(kind) => f.write_str(kind.slug()),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(Category::All);
        }
        PokemonType::from_slug(value)
            .map(Category::Type)
            .ok_or_else(|| format!("unknown type '{value}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slugs_case_insensitively() {
        assert_eq!("all".parse::<Category>(), Ok(Category::All));
        assert_eq!(
            " Ghost ".parse::<Category>(),
            Ok(Category::Type(PokemonType::Ghost))
        );
        assert!("shadow".parse::<Category>().is_err());
    }

    #[test]
    fn cycle_wraps_through_sentinel() {
        let last = Category::Type(PokemonType::Fairy);
        assert_eq!(last.cycle(1), Category::All);
        assert_eq!(Category::All.cycle(-1), last);
        assert_eq!(Category::All.cycle(1), Category::Type(PokemonType::Fire));
    }

    #[test]
    fn labels() {
        assert_eq!(Category::All.label(), "ALL TYPES");
        assert_eq!(Category::Type(PokemonType::Steel).label(), "STEEL");
        assert_eq!(Category::Type(PokemonType::Steel).to_string(), "steel");
    }
}
