//! Standard atomic weights for hydrogen through curium.
//!
//! Values are the IUPAC conventional weights in g/mol. Elements without a
//! stable isotope use the mass number of their longest-lived isotope.
//! Symbols are matched case-sensitively: `Co` is cobalt, `CO` is two tokens.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

pub const ELEMENT_COUNT: usize = 96;

const ATOMIC_WEIGHTS: [f64; ELEMENT_COUNT] = [
    1.008_f64,
    4.002_602_f64,
    6.94_f64,
    9.012_183_1_f64,
    10.81_f64,
    12.011_f64,
    14.007_f64,
    15.999_f64,
    18.998_403_163_f64,
    20.1797_f64,
    22.989_769_28_f64,
    24.305_f64,
    26.981_538_5_f64,
    28.085_f64,
    30.973_761_998_f64,
    32.06_f64,
    35.45_f64,
    39.948_f64,
    39.0983_f64,
    40.078_f64,
    44.955_908_f64,
    47.867_f64,
    50.9415_f64,
    51.9961_f64,
    54.938_044_f64,
    55.845_f64,
    58.933_194_f64,
    58.6934_f64,
    63.546_f64,
    65.38_f64,
    69.723_f64,
    72.630_f64,
    74.921_595_f64,
    78.971_f64,
    79.904_f64,
    83.798_f64,
    85.4678_f64,
    87.62_f64,
    88.905_84_f64,
    91.224_f64,
    92.906_37_f64,
    95.95_f64,
    98_f64,
    101.07_f64,
    102.905_50_f64,
    106.42_f64,
    107.8682_f64,
    112.414_f64,
    114.818_f64,
    118.710_f64,
    121.760_f64,
    127.60_f64,
    126.904_47_f64,
    131.293_f64,
    132.905_451_96_f64,
    137.327_f64,
    138.905_47_f64,
    140.116_f64,
    140.907_66_f64,
    144.242_f64,
    145_f64,
    150.36_f64,
    151.964_f64,
    157.25_f64,
    158.925_35_f64,
    162.500_f64,
    164.930_33_f64,
    167.259_f64,
    168.934_22_f64,
    173.045_f64,
    174.9668_f64,
    178.49_f64,
    180.947_88_f64,
    183.84_f64,
    186.207_f64,
    190.23_f64,
    192.217_f64,
    195.084_f64,
    196.966_569_f64,
    200.592_f64,
    204.38_f64,
    207.2_f64,
    208.980_40_f64,
    209_f64,
    210_f64,
    222_f64,
    223_f64,
    226_f64,
    227_f64,
    232.0377_f64,
    231.035_88_f64,
    238.028_91_f64,
    237_f64,
    244_f64,
    243_f64,
    247_f64,
];

const ATOMIC_SYMBOLS: [&str; ELEMENT_COUNT] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
];

/// An element symbol known to the weight table.
///
/// Equality and hashing follow the table slot; ordering follows the symbol
/// text so sorted collections come out alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementSymbol {
    index: u8,
}

impl ElementSymbol {
    pub fn parse(symbol: &str) -> Option<Self> {
        ATOMIC_SYMBOLS
            .iter()
            .position(|candidate| *candidate == symbol)
            .map(|index| Self { index: index as u8 })
    }

    pub fn from_atomic_number(atomic_number: usize) -> Option<Self> {
        index_1_based(atomic_number).map(|index| Self { index: index as u8 })
    }

    pub const fn as_str(self) -> &'static str {
        ATOMIC_SYMBOLS[self.index as usize]
    }

    pub const fn atomic_number(self) -> usize {
        self.index as usize + 1
    }

    pub const fn atomic_weight(self) -> f64 {
        ATOMIC_WEIGHTS[self.index as usize]
    }
}

impl Ord for ElementSymbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for ElementSymbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<str> for ElementSymbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ElementSymbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Display for ElementSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementSymbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

pub fn lookup(symbol: &str) -> Option<f64> {
    ElementSymbol::parse(symbol).map(ElementSymbol::atomic_weight)
}

pub fn weight_for_atomic_number(atomic_number: usize) -> Option<f64> {
    index_1_based(atomic_number).map(|index| ATOMIC_WEIGHTS[index])
}

pub fn symbol_for_atomic_number(atomic_number: usize) -> Option<&'static str> {
    index_1_based(atomic_number).map(|index| ATOMIC_SYMBOLS[index])
}

/// All table entries in atomic-number order.
pub fn elements() -> impl Iterator<Item = ElementSymbol> {
    (0..ELEMENT_COUNT).map(|index| ElementSymbol { index: index as u8 })
}

const fn index_1_based(atomic_number: usize) -> Option<usize> {
    if atomic_number == 0 || atomic_number > ELEMENT_COUNT {
        None
    } else {
        Some(atomic_number - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ELEMENT_COUNT, ElementSymbol, elements, lookup, symbol_for_atomic_number,
        weight_for_atomic_number,
    };
    use std::collections::BTreeSet;

    #[test]
    fn weight_lookup_is_case_sensitive() {
        assert_eq!(lookup("H"), Some(1.008));
        assert_eq!(lookup("Co"), Some(58.933_194));
        assert_eq!(lookup("CO"), None);
        assert_eq!(lookup("co"), None);
        assert_eq!(lookup("Xx"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn atomic_number_lookup_is_one_based() {
        assert_eq!(weight_for_atomic_number(1), Some(1.008));
        assert_eq!(weight_for_atomic_number(20), Some(40.078));
        assert_eq!(weight_for_atomic_number(96), Some(247.0));
        assert_eq!(weight_for_atomic_number(0), None);
        assert_eq!(weight_for_atomic_number(97), None);

        assert_eq!(symbol_for_atomic_number(1), Some("H"));
        assert_eq!(symbol_for_atomic_number(75), Some("Re"));
        assert_eq!(symbol_for_atomic_number(96), Some("Cm"));
        assert_eq!(symbol_for_atomic_number(0), None);
    }

    #[test]
    fn symbols_are_unique_and_well_formed() {
        let mut seen = BTreeSet::new();
        for element in elements() {
            let symbol = element.as_str();
            let mut chars = symbol.chars();
            assert!(chars.next().is_some_and(|ch| ch.is_ascii_uppercase()));
            assert!(chars.all(|ch| ch.is_ascii_lowercase()));
            assert!(symbol.len() <= 2, "symbol {symbol} is too long");
            assert!(seen.insert(symbol), "duplicate symbol {symbol}");
        }
        assert_eq!(seen.len(), ELEMENT_COUNT);
    }

    #[test]
    fn weights_are_positive_and_finite() {
        for element in elements() {
            let weight = element.atomic_weight();
            assert!(weight.is_finite() && weight > 0.0, "{element} has weight {weight}");
        }
    }

    #[test]
    fn element_symbol_round_trips_through_atomic_number() {
        let calcium = ElementSymbol::parse("Ca").expect("calcium should exist");
        assert_eq!(calcium.atomic_number(), 20);
        assert_eq!(ElementSymbol::from_atomic_number(20), Some(calcium));
        assert_eq!(calcium, "Ca");
        assert_eq!(calcium.to_string(), "Ca");
    }

    #[test]
    fn element_symbols_order_by_text_not_atomic_number() {
        let hydrogen = ElementSymbol::parse("H").expect("hydrogen should exist");
        let carbon = ElementSymbol::parse("C").expect("carbon should exist");
        let calcium = ElementSymbol::parse("Ca").expect("calcium should exist");

        let mut symbols = vec![hydrogen, calcium, carbon];
        symbols.sort();
        assert_eq!(symbols, vec![carbon, calcium, hydrogen]);
    }

    #[test]
    fn element_symbol_serializes_as_text() {
        let oxygen = ElementSymbol::parse("O").expect("oxygen should exist");
        assert_eq!(
            serde_json::to_string(&oxygen).expect("symbol should serialize"),
            "\"O\""
        );
    }
}
