//! Table A: the T1 truth table that drives every other field.

use serde::Serialize;

/// Assigned T1 data type designators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    /// Analyses.
    A,
    /// Addressed message.
    B,
    /// Climatic data.
    C,
    /// Grid point information (GRID).
    D,
    /// Satellite imagery.
    E,
    /// Forecasts.
    F,
    /// Grid point information (GRID).
    G,
    /// Grid point information (GRIB).
    H,
    /// Observational data (BUFR).
    I,
    /// Forecast information (BUFR).
    J,
    /// CREX.
    K,
    /// Aviation information in XML.
    L,
    /// Notices.
    N,
    /// Oceanographic information (GRIB).
    O,
    /// Pictorial information (binary).
    P,
    /// Regional pictorial information (binary).
    Q,
    /// Surface data.
    S,
    /// Satellite data.
    T,
    /// Upper-air data.
    U,
    /// National data.
    V,
    /// Warnings.
    W,
    /// Common Alert Protocol messages.
    X,
    /// GRIB regional use.
    Y,
}

/// Where the T2 vocabulary comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum T2Source {
    /// Table B1, keyed by T1.
    B1,
    /// Table B2.
    B2,
    /// Table B3.
    B3,
    /// Table B4.
    B4,
    /// Table B5.
    B5,
    /// Table B6.
    B6,
    /// Table B7.
    B7,
    /// Table C7 T2 list.
    CrexT2,
}

/// Where the A1 vocabulary comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum A1Source {
    /// First letters of Table C1 country codes.
    CountryPrefix,
    /// Country first letters together with Table C2 station types.
    CountryPrefixOrStation,
    /// Table C3.
    GeographicalArea,
    /// Table C6, keyed by T1T2.
    BufrDataType,
    /// Table C7 A1, keyed by T2.
    CrexDataType,
}

/// Where the A2 vocabulary comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum A2Source {
    /// Second letters of the countries starting with A1.
    CountrySuffix,
    /// Country second letters, or C2 ocean areas for a station-type A1.
    CountrySuffixOrStationArea,
    /// Table C3.
    GeographicalArea,
    /// Table C4.
    ReferenceTime,
    /// Table C5 (3-hour steps).
    RegionalReferenceTime,
}

/// Where the ii vocabulary comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IiSource {
    /// Any bulletin number 00–99.
    Sequence,
    /// Table D1.
    OceanDepth,
    /// Table D2.
    PressureLevel,
}

/// One row of the Table A mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrammarRow {
    /// T2 source.
    pub t2: T2Source,
    /// A1 source.
    pub a1: A1Source,
    /// A2 source.
    pub a2: A2Source,
    /// ii source.
    pub ii: IiSource,
}

const fn row(t2: T2Source, a1: A1Source, a2: A2Source, ii: IiSource) -> GrammarRow {
    GrammarRow { t2, a1, a2, ii }
}

impl DataType {
    /// Parse a T1 letter; unassigned letters (M, R, Z, …) give `None`.
    pub fn from_code(c: char) -> Option<DataType> {
        use DataType::*;
        Some(match c {
            'A' => A,
            'B' => B,
            'C' => C,
            'D' => D,
            'E' => E,
            'F' => F,
            'G' => G,
            'H' => H,
            'I' => I,
            'J' => J,
            'K' => K,
            'L' => L,
            'N' => N,
            'O' => O,
            'P' => P,
            'Q' => Q,
            'S' => S,
            'T' => T,
            'U' => U,
            'V' => V,
            'W' => W,
            'X' => X,
            'Y' => Y,
            _ => return None,
        })
    }

    /// The table-family row; `None` for addressed messages, which have no
    /// T2/A1/A2 grammar.
    pub fn grammar(self) -> Option<GrammarRow> {
        use A1Source as A1;
        use A2Source as A2;
        use IiSource as Ii;
        use T2Source as T2;
        Some(match self {
            DataType::A | DataType::C | DataType::F | DataType::N | DataType::W => {
                row(T2::B1, A1::CountryPrefix, A2::CountrySuffix, Ii::Sequence)
            }
            DataType::B => return None,
            DataType::D | DataType::G | DataType::H => row(
                T2::B2,
                A1::GeographicalArea,
                A2::ReferenceTime,
                Ii::PressureLevel,
            ),
            DataType::E => row(T2::B5, A1::CountryPrefix, A2::CountrySuffix, Ii::Sequence),
            DataType::I => row(
                T2::B3,
                A1::BufrDataType,
                A2::GeographicalArea,
                Ii::Sequence,
            ),
            DataType::J => row(
                T2::B3,
                A1::BufrDataType,
                A2::ReferenceTime,
                Ii::PressureLevel,
            ),
            DataType::K => row(
                T2::CrexT2,
                A1::CrexDataType,
                A2::GeographicalArea,
                Ii::Sequence,
            ),
            DataType::L => row(T2::B7, A1::CountryPrefix, A2::CountrySuffix, Ii::Sequence),
            DataType::O => row(
                T2::B4,
                A1::GeographicalArea,
                A2::ReferenceTime,
                Ii::OceanDepth,
            ),
            DataType::P => row(
                T2::B6,
                A1::GeographicalArea,
                A2::ReferenceTime,
                Ii::PressureLevel,
            ),
            DataType::Q => row(
                T2::B6,
                A1::GeographicalArea,
                A2::RegionalReferenceTime,
                Ii::PressureLevel,
            ),
            DataType::S | DataType::U => row(
                T2::B1,
                A1::CountryPrefixOrStation,
                A2::CountrySuffixOrStationArea,
                Ii::Sequence,
            ),
            DataType::T => row(
                T2::B1,
                A1::GeographicalArea,
                A2::ReferenceTime,
                Ii::Sequence,
            ),
            DataType::V => row(T2::B2, A1::CountryPrefix, A2::CountrySuffix, Ii::Sequence),
            DataType::X | DataType::Y => row(
                T2::B2,
                A1::GeographicalArea,
                A2::RegionalReferenceTime,
                Ii::PressureLevel,
            ),
        })
    }

    /// Whether A1A2 together form a Table C1 country code.
    pub fn uses_country_table(self) -> bool {
        matches!(
            self.grammar().map(|r| r.a1),
            Some(A1Source::CountryPrefix | A1Source::CountryPrefixOrStation)
        )
    }
}

/// Grammar row for a T1 character, if it has one.
pub fn grammar_for(t1: char) -> Option<GrammarRow> {
    DataType::from_code(t1)?.grammar()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_letters_have_no_type() {
        for c in ['M', 'R', 'Z', 'a', '1'] {
            assert_eq!(DataType::from_code(c), None, "{c}");
        }
    }

    #[test]
    fn addressed_message_has_no_grammar() {
        assert_eq!(grammar_for('B'), None);
    }

    #[test]
    fn country_table_users() {
        let users: String = "ABCDEFGHIJKLNOPQSTUVWXY"
            .chars()
            .filter(|&c| DataType::from_code(c).is_some_and(DataType::uses_country_table))
            .collect();
        assert_eq!(users, "ACEFLNSUVW");
    }
}
