pub mod symbol_encoder;

use std::{fmt, str::FromStr};

/// Number of bits of the CLERS length field in the bitstream.
pub(crate) const CLERS_LENGTH_SLOT: usize = 32;

/// The traversal decision recorded for one triangle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Symbol {
    /// The apex is a new vertex.
    C,
    /// The left neighbor was already visited.
    L,
    /// Both neighbors were already visited; the branch ends.
    E,
    /// The right neighbor was already visited.
    R,
    /// Neither neighbor was visited; the traversal forks.
    S,
}

impl Symbol {
    pub const ALL: [Symbol; 5] = [Symbol::C, Symbol::L, Symbol::E, Symbol::R, Symbol::S];

    pub fn as_char(self) -> char {
        match self {
            Symbol::C => 'C',
            Symbol::L => 'L',
            Symbol::E => 'E',
            Symbol::R => 'R',
            Symbol::S => 'S',
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = char;
    fn try_from(c: char) -> Result<Self, char> {
        match c {
            'C' => Ok(Symbol::C),
            'L' => Ok(Symbol::L),
            'E' => Ok(Symbol::E),
            'R' => Ok(Symbol::R),
            'S' => Ok(Symbol::S),
            other => Err(other),
        }
    }
}


/// A CLERS string: one symbol per triangle, the seed triangle excluded.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Clers {
    symbols: Vec<Symbol>,
}

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Err {
    #[error("'{found}' at position {position} is not a CLERS symbol.")]
    InvalidSymbol { position: usize, found: char },
}

impl Clers {
    pub fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Symbol> {
        self.symbols.get(position).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }

    /// Number of triangles of the mesh this string describes.
    pub fn num_triangles(&self) -> usize {
        self.len() + 1
    }

    /// Number of vertices of the closed mesh this string describes.
    pub fn num_vertices(&self) -> usize {
        self.count(Symbol::C) + 3
    }
}

impl From<Vec<Symbol>> for Clers {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }
}

impl FromStr for Clers {
    type Err = Err;
    fn from_str(s: &str) -> Result<Self, Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| Symbol::try_from(c).map_err(|found| Err::InvalidSymbol { position, found }))
            .collect::<Result<Vec<_>, _>>()
            .map(Clers::from)
    }
}

impl fmt::Display for Clers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|s| write!(f, "{}", s.as_char()))
    }
}

impl fmt::Debug for Clers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clers(\"{}\")", self)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_print() {
        let clers: Clers = "CCRSLCE".parse().unwrap();
        assert_eq!(clers.len(), 7);
        assert_eq!(clers.count(Symbol::C), 3);
        assert_eq!(clers.num_triangles(), 8);
        assert_eq!(clers.num_vertices(), 6);
        assert_eq!(clers.get(3), Some(Symbol::S));
        assert_eq!(clers.to_string(), "CCRSLCE");
        assert_eq!("".parse::<Clers>(), Ok(Clers::new()));
    }

    #[test]
    fn reject_unknown_symbol() {
        assert_eq!(
            "CCXE".parse::<Clers>(),
            Err(Err::InvalidSymbol { position: 2, found: 'X' })
        );
    }
}
