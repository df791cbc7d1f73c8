//! Card definitions - static card metadata.
//!
//! A `Card` is one printing as described by the client's data files.
//! Cards are created once while the index is built and never change.

use serde::{Deserialize, Serialize};

/// Client-assigned card identifier (the data files call it `grpid`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u64);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CardId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Card rarity.
///
/// The client encodes rarity as an integer; `Token` and `Basic` cover the
/// codes below common so lands and tokens in a collection still resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Token,
    Basic,
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    /// Rarities a wildcard can be redeemed for, in pick order.
    pub const WILDCARD: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Mythic,
    ];

    /// Map the client's numeric rarity code. Unknown codes are tokens.
    #[must_use]
    pub const fn from_code(code: u64) -> Self {
        match code {
            1 => Rarity::Basic,
            2 => Rarity::Common,
            3 => Rarity::Uncommon,
            4 => Rarity::Rare,
            5 => Rarity::Mythic,
            _ => Rarity::Token,
        }
    }

    #[must_use]
    pub const fn code(self) -> u64 {
        match self {
            Rarity::Token => 0,
            Rarity::Basic => 1,
            Rarity::Common => 2,
            Rarity::Uncommon => 3,
            Rarity::Rare => 4,
            Rarity::Mythic => 5,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rarity::Token => "token",
            Rarity::Basic => "basic",
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static card metadata.
///
/// ```
/// use arena_assistant::cards::{Card, CardId, Rarity};
///
/// let bear = Card::new(CardId::new(101), "Grizzly Bears", "M21", "190", Rarity::Common)
///     .primary();
///
/// assert!(bear.is_primary_card);
/// assert_eq!(bear.set, "M21");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub set: String,
    pub collector_number: String,
    pub rarity: Rarity,
    /// Canonical printing, as opposed to a reprint or alternate art.
    pub is_primary_card: bool,
}

impl Card {
    /// Create a non-primary card.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        set: impl Into<String>,
        collector_number: impl Into<String>,
        rarity: Rarity,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            set: set.into(),
            collector_number: collector_number.into(),
            rarity,
            is_primary_card: false,
        }
    }

    /// Mark as the primary printing (builder pattern).
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.is_primary_card = true;
        self
    }
}
