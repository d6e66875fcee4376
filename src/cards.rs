use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The thirteen standard ranks, declared in single-play order (Three low, Two high).
///
/// Discriminants are the 1-based single-play values; run order is a separate
/// function ([`Rank::run_value`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
    Two = 13,
}

impl Rank {
    /// All ranks in single-play order.
    pub const ALL: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    /// Value in single-play order: Three = 1 .. Ace = 12, Two = 13.
    pub const fn single_value(self) -> u8 {
        self as u8
    }

    /// Value in run order: Two = 1 .. King = 12, Ace = 13.
    ///
    /// An Ace may also anchor the low end of a run, see [`ACE_LOW_RUN_VALUE`].
    pub const fn run_value(self) -> u8 {
        match self {
            Rank::Two => 1,
            other => other as u8 + 1,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            Rank::Two => '2',
        }
    }
}

/// Run-order value of an Ace used as the low anchor (A-2-3-4-5).
pub const ACE_LOW_RUN_VALUE: u8 = 0;

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c).map_err(|_| RankParseError::Invalid(s.to_string())),
            _ => Err(RankParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            '2' => Ok(Rank::Two),
            _ => Err(RankParseError::Invalid(c.to_string())),
        }
    }
}

/// Four suits. Suits carry no strength; the order C < D < H < S only fixes a
/// canonical sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        match t.to_ascii_lowercase().as_str() {
            "clubs" => Ok(Suit::Clubs),
            "diamonds" => Ok(Suit::Diamonds),
            "hearts" => Ok(Suit::Hearts),
            "spades" => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'C' => Ok(Suit::Clubs),
            'D' => Ok(Suit::Diamonds),
            'H' => Ok(Suit::Hearts),
            'S' => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

/// The two joker kinds. Jokers have no suit and no run value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Joker {
    Small,
    Big,
}

impl Joker {
    pub const fn single_value(self) -> u8 {
        match self {
            Joker::Small => 14,
            Joker::Big => 15,
        }
    }

    pub const fn notation(self) -> &'static str {
        match self {
            Joker::Small => "SJ",
            Joker::Big => "BJ",
        }
    }
}

/// Single-play value of the distinguished card; nothing else reaches it.
pub const DISTINGUISHED_VALUE: u8 = 16;

/// A playing card: a suited standard card or a suitless joker.
///
/// ```
/// use shedding_rs::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ten, Suit::Spades);
/// assert_eq!(card.to_string(), "TS");
/// assert_eq!("5H".parse::<Card>().unwrap(), Card::DISTINGUISHED);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Card {
    Standard { rank: Rank, suit: Suit },
    Joker(Joker),
}

impl Card {
    /// The Five of Hearts outranks every other single.
    pub const DISTINGUISHED: Card = Card::new(Rank::Five, Suit::Hearts);
    /// Holder of this card leads the first round.
    pub const STARTER: Card = Card::new(Rank::Three, Suit::Diamonds);
    pub const SMALL_JOKER: Card = Card::Joker(Joker::Small);
    pub const BIG_JOKER: Card = Card::Joker(Joker::Big);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card::Standard { rank, suit }
    }

    pub const fn joker(kind: Joker) -> Self {
        Card::Joker(kind)
    }

    /// Standard rank, `None` for jokers.
    pub const fn rank(self) -> Option<Rank> {
        match self {
            Card::Standard { rank, .. } => Some(rank),
            Card::Joker(_) => None,
        }
    }

    /// Suit, `None` for jokers.
    pub const fn suit(self) -> Option<Suit> {
        match self {
            Card::Standard { suit, .. } => Some(suit),
            Card::Joker(_) => None,
        }
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Card::Joker(_))
    }

    pub const fn is_distinguished(self) -> bool {
        matches!(self, Card::Standard { rank: Rank::Five, suit: Suit::Hearts })
    }

    /// Strength of this card played alone.
    pub const fn single_value(self) -> u8 {
        match self {
            _ if self.is_distinguished() => DISTINGUISHED_VALUE,
            Card::Standard { rank, .. } => rank.single_value(),
            Card::Joker(kind) => kind.single_value(),
        }
    }

    /// Run-order value with Ace high; jokers have none.
    pub const fn run_value(self) -> Option<u8> {
        match self {
            Card::Standard { rank, .. } => Some(rank.run_value()),
            Card::Joker(_) => None,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Standard { rank, suit } => write!(f, "{rank}{suit}"),
            Card::Joker(kind) => f.write_str(kind.notation()),
        }
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.to_ascii_uppercase().as_str() {
            "SJ" => return Ok(Card::SMALL_JOKER),
            "BJ" => return Ok(Card::BIG_JOKER),
            _ => {}
        }
        let suit_ch = match t.chars().last() {
            Some(c) if t.len() >= 2 && t.is_ascii() => c,
            _ => return Err(CardParseError::Invalid(s.to_string())),
        };
        // rank is everything before the suit char ("10H" is accepted for TH)
        let rank = Rank::from_str(&t[..t.len() - 1])?;
        let suit = Suit::try_from(suit_ch)?;
        Ok(Card::new(rank, suit))
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Card::from_str(&s)
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use shedding_rs::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("3D, 5h BJ").unwrap();
/// assert_eq!(cards[0], Card::STARTER);
/// assert_eq!(cards[1], Card::new(Rank::Five, Suit::Hearts));
/// assert_eq!(cards[2], Card::BIG_JOKER);
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_display_and_from_str() {
        assert_eq!(Rank::Ace.to_string(), "A");
        assert_eq!(Rank::from_str("T").unwrap(), Rank::Ten);
        assert_eq!(Rank::from_str("10").unwrap(), Rank::Ten);
        assert!(Rank::from_str("1").is_err());
        assert!(Rank::from_str("KK").is_err());
    }

    #[test]
    fn suit_display_and_from_str() {
        assert_eq!(Suit::Spades.to_string(), "S");
        assert_eq!(Suit::from_str("s").unwrap(), Suit::Spades);
        assert_eq!(Suit::from_str("Hearts").unwrap(), Suit::Hearts);
        assert!(Suit::from_str("x").is_err());
    }

    #[test]
    fn card_display_and_from_str() {
        let q = Card::new(Rank::Queen, Suit::Clubs);
        assert_eq!(q.to_string(), "QC");
        assert_eq!(Card::from_str("QC").unwrap(), q);
        assert_eq!(Card::from_str("10d").unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(Card::from_str("sj").unwrap(), Card::SMALL_JOKER);
        assert_eq!(Card::BIG_JOKER.to_string(), "BJ");
        assert!(Card::from_str("X").is_err());
        assert!(Card::from_str("ZH").is_err());
    }

    #[test]
    fn single_order_puts_two_above_ace_and_jokers_above_two() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        let two = Card::new(Rank::Two, Suit::Clubs);
        assert!(two.single_value() > ace.single_value());
        assert!(Card::SMALL_JOKER.single_value() > two.single_value());
        assert!(Card::BIG_JOKER.single_value() > Card::SMALL_JOKER.single_value());
        assert_eq!(Card::DISTINGUISHED.single_value(), DISTINGUISHED_VALUE);
        assert_eq!(Card::new(Rank::Five, Suit::Spades).single_value(), 3);
    }

    #[test]
    fn run_order_puts_ace_above_king_and_two_lowest() {
        assert_eq!(Rank::Two.run_value(), 1);
        assert_eq!(Rank::Three.run_value(), 2);
        assert_eq!(Rank::King.run_value(), 12);
        assert_eq!(Rank::Ace.run_value(), 13);
        assert_eq!(Card::SMALL_JOKER.run_value(), None);
    }

    #[test]
    fn jokers_have_no_suit() {
        assert_eq!(Card::BIG_JOKER.suit(), None);
        assert_eq!(Card::BIG_JOKER.rank(), None);
        assert!(Card::BIG_JOKER.is_joker());
    }

    #[test]
    fn serde_uses_notation() {
        let json = serde_json::to_string(&Card::DISTINGUISHED).unwrap();
        assert_eq!(json, "\"5H\"");
        let back: Card = serde_json::from_str("\"SJ\"").unwrap();
        assert_eq!(back, Card::SMALL_JOKER);
    }

    #[test]
    fn parse_many_cards() {
        let xs = parse_cards("AS, KD TC").unwrap();
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[2], Card::new(Rank::Ten, Suit::Clubs));
    }
}
