// Copyright (c) 2024 Botho Foundation

//! Plutus data: the untyped tree every datum and redeemer is made of.
//!
//! Records are encoded as constructors with an index and positional fields.
//! On the wire, constructor `i` uses CBOR tag `121 + i` for `i < 7`,
//! `1280 + (i - 7)` for `7 <= i < 128`, and the general form
//! `102([i, fields])` above that.

use crate::token::DatumHash;
use blake2::{digest::consts::U32, Blake2b, Digest};
use displaydoc::Display;
use core::fmt;
use serde::{
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{self, SerializeMap},
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_with::{DeserializeAs, SerializeAs};
use uada_util_fraction::Fraction;
use uada_util_serial::{self as serial, Tagged};

type Blake2b256 = Blake2b<U32>;

const COMPACT_TAG_BASE: u64 = 121;
const EXTENDED_TAG_BASE: u64 = 1280;
const GENERAL_TAG: u64 = 102;

/// An untyped plutus data tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlutusData {
    /// A constructor application: `(index, fields)`.
    Constr(u64, Vec<PlutusData>),
    /// An association list.
    Map(Vec<(PlutusData, PlutusData)>),
    /// A list.
    List(Vec<PlutusData>),
    /// An integer.
    Int(i128),
    /// A byte string.
    Bytes(Vec<u8>),
}

/// Errors turning bytes or untyped data into typed records.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum DecodeError {
    /// Invalid CBOR: {0}
    Cbor(String),

    /// Expected {0}
    UnexpectedShape(&'static str),

    /// Expected constructor {expected}, found {found}
    UnexpectedConstructor {
        /// The constructor index the record requires
        expected: u64,
        /// The constructor index that was found
        found: u64,
    },

    /// Constructor {constr} expects {expected} fields, found {found}
    FieldCount {
        /// The constructor index
        constr: u64,
        /// The number of fields the record requires
        expected: usize,
        /// The number of fields that were found
        found: usize,
    },

    /// Invalid fraction: {0}
    Fraction(uada_util_fraction::Error),
}

impl std::error::Error for DecodeError {}

impl From<uada_util_fraction::Error> for DecodeError {
    fn from(src: uada_util_fraction::Error) -> Self {
        Self::Fraction(src)
    }
}

/// Conversion of a typed record into plutus data.
pub trait ToPlutusData {
    /// Build the untyped representation.
    fn to_plutus_data(&self) -> PlutusData;
}

/// Conversion of plutus data into a typed record.
///
/// Implementations must reject anything that is not exactly the expected
/// shape; a malformed datum is a reason to reject a transaction, never to
/// guess.
pub trait FromPlutusData: Sized {
    /// Parse the untyped representation.
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError>;
}

impl PlutusData {
    /// A constructor with no fields.
    pub fn unit(constr: u64) -> Self {
        Self::Constr(constr, Vec::new())
    }

    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Result<i128, DecodeError> {
        match self {
            Self::Int(i) => Ok(*i),
            _ => Err(DecodeError::UnexpectedShape("an integer")),
        }
    }

    /// The byte payload, if this is a byte string.
    pub fn as_bytes(&self) -> Result<&[u8], DecodeError> {
        match self {
            Self::Bytes(b) => Ok(b),
            _ => Err(DecodeError::UnexpectedShape("a byte string")),
        }
    }

    /// The constructor index and fields, if this is a constructor.
    pub fn as_constr(&self) -> Result<(u64, &[PlutusData]), DecodeError> {
        match self {
            Self::Constr(constr, fields) => Ok((*constr, fields)),
            _ => Err(DecodeError::UnexpectedShape("a constructor")),
        }
    }

    /// The fields of constructor `constr`, which must have exactly `arity`
    /// of them.
    pub fn fields_of(&self, constr: u64, arity: usize) -> Result<&[PlutusData], DecodeError> {
        let (found, fields) = self.as_constr()?;
        if found != constr {
            return Err(DecodeError::UnexpectedConstructor {
                expected: constr,
                found,
            });
        }
        if fields.len() != arity {
            return Err(DecodeError::FieldCount {
                constr,
                expected: arity,
                found: fields.len(),
            });
        }
        Ok(fields)
    }

    /// Canonical CBOR encoding. Map entries keep their order.
    pub fn to_cbor(&self) -> Result<Vec<u8>, serial::Error> {
        serial::serialize(self)
    }

    /// Decode canonical or non-canonical CBOR.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, DecodeError> {
        serial::deserialize(bytes).map_err(|err| DecodeError::Cbor(err.to_string()))
    }

    /// The datum hash: BLAKE2b-256 of the canonical encoding.
    pub fn hash(&self) -> Result<DatumHash, serial::Error> {
        let bytes = self.to_cbor()?;
        Ok(DatumHash(Blake2b256::digest(bytes).to_vec()))
    }
}

/// The constructor index a CBOR tag stands for, if it is a constructor tag
/// with the fields directly beneath it.
fn compact_constr(tag: u64) -> Option<u64> {
    match tag {
        t if (COMPACT_TAG_BASE..COMPACT_TAG_BASE + 7).contains(&t) => Some(t - COMPACT_TAG_BASE),
        t if (EXTENDED_TAG_BASE..EXTENDED_TAG_BASE + 121).contains(&t) => {
            Some(t - EXTENDED_TAG_BASE + 7)
        }
        _ => None,
    }
}

impl Serialize for PlutusData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Constr(constr, fields) => match *constr {
                c if c < 7 => Tagged::new(Some(COMPACT_TAG_BASE + c), fields).serialize(serializer),
                c if c < 128 => {
                    Tagged::new(Some(EXTENDED_TAG_BASE + c - 7), fields).serialize(serializer)
                }
                c => Tagged::new(Some(GENERAL_TAG), (c, fields)).serialize(serializer),
            },
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::List(items) => items.serialize(serializer),
            Self::Int(i) => serializer.serialize_i128(*i),
            Self::Bytes(b) => serializer.serialize_bytes(b),
        }
    }
}

impl<'de> Deserialize<'de> for PlutusData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PlutusDataVisitor)
    }
}

struct PlutusDataVisitor;

impl<'de> Visitor<'de> for PlutusDataVisitor {
    type Value = PlutusData;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("plutus data")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PlutusData, E> {
        Ok(PlutusData::Int(v.into()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PlutusData, E> {
        Ok(PlutusData::Int(v.into()))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<PlutusData, E> {
        i128::try_from(v)
            .map(PlutusData::Int)
            .map_err(|_| E::custom(format!("integer {v} is out of range")))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<PlutusData, E> {
        Ok(PlutusData::Int(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<PlutusData, E> {
        Ok(PlutusData::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<PlutusData, E> {
        Ok(PlutusData::Bytes(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PlutusData, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(PlutusData::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PlutusData, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Ok(PlutusData::Map(entries))
    }

    // CBOR tags arrive as newtype structs, with the tag readable until the
    // inner item is decoded.
    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<PlutusData, D::Error> {
        match serial::current_cbor_tag() {
            Some(tag) => match compact_constr(tag) {
                Some(constr) => {
                    let fields = Vec::<PlutusData>::deserialize(deserializer)?;
                    Ok(PlutusData::Constr(constr, fields))
                }
                None if tag == GENERAL_TAG => {
                    let (constr, fields) = <(u64, Vec<PlutusData>)>::deserialize(deserializer)?;
                    Ok(PlutusData::Constr(constr, fields))
                }
                None => Err(de::Error::custom(format!("unsupported tag {tag}"))),
            },
            None => Err(de::Error::custom("untagged newtype")),
        }
    }
}

impl ToPlutusData for PlutusData {
    fn to_plutus_data(&self) -> PlutusData {
        self.clone()
    }
}

impl FromPlutusData for PlutusData {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        Ok(data.clone())
    }
}

impl ToPlutusData for i128 {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::Int(*self)
    }
}

impl FromPlutusData for i128 {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        data.as_int()
    }
}

/// Fractions are constructor 1 with `[numerator, denominator]`.
impl ToPlutusData for Fraction {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::Constr(
            1,
            vec![
                PlutusData::Int(self.numerator()),
                PlutusData::Int(self.denominator()),
            ],
        )
    }
}

impl FromPlutusData for Fraction {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let fields = data.fields_of(1, 2)?;
        Ok(Fraction::new(fields[0].as_int()?, fields[1].as_int()?)?)
    }
}

/// `Option<T>` in the `Union[T, Nothing]` style: `None` is the empty
/// constructor 0 and `Some` is `T` itself. Only sound when `T` never encodes
/// as constructor 0 without fields.
pub fn optional_to_plutus_data<T: ToPlutusData>(value: &Option<T>) -> PlutusData {
    match value {
        Some(inner) => inner.to_plutus_data(),
        None => PlutusData::unit(0),
    }
}

/// Inverse of [`optional_to_plutus_data`].
pub fn optional_from_plutus_data<T: FromPlutusData>(
    data: &PlutusData,
) -> Result<Option<T>, DecodeError> {
    match data {
        PlutusData::Constr(0, fields) if fields.is_empty() => Ok(None),
        other => T::from_plutus_data(other).map(Some),
    }
}

/// Embeds plutus data in human-readable formats as hex-encoded CBOR.
///
/// ```ignore
/// #[serde_as(as = "CborHex")]
/// datum: PlutusData,
/// ```
pub struct CborHex;

impl SerializeAs<PlutusData> for CborHex {
    fn serialize_as<S: Serializer>(source: &PlutusData, serializer: S) -> Result<S::Ok, S::Error> {
        let bytes = source.to_cbor().map_err(ser::Error::custom)?;
        serializer.serialize_str(&hex::encode(bytes))
    }
}

impl<'de> DeserializeAs<'de, PlutusData> for CborHex {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<PlutusData, D::Error> {
        let bytes: Vec<u8> = hex::serde::deserialize(deserializer)?;
        PlutusData::from_cbor(&bytes).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::OutputDatum;
    use assert_matches::assert_matches;

    #[test]
    fn compact_constructor_tags() {
        let unit = PlutusData::unit(0).to_cbor().unwrap();
        // tag 121, empty array
        assert_eq!(unit, vec![0xd8, 0x79, 0x80]);

        let five = PlutusData::unit(5).to_cbor().unwrap();
        assert_eq!(five, vec![0xd8, 0x7e, 0x80]);
    }

    #[test]
    fn extended_and_general_constructors_round_trip() {
        for constr in [7u64, 100, 127, 128, 1000] {
            let data = PlutusData::Constr(constr, vec![PlutusData::Int(-1)]);
            let bytes = data.to_cbor().unwrap();
            assert_eq!(PlutusData::from_cbor(&bytes).unwrap(), data, "constr {constr}");
        }
    }

    #[test]
    fn nested_data_round_trips() {
        let data = PlutusData::Constr(
            5,
            vec![
                PlutusData::Int(1_000_000),
                PlutusData::Bytes(b"uADA".to_vec()),
                PlutusData::List(vec![PlutusData::unit(0), PlutusData::Int(-3)]),
                PlutusData::Map(vec![(PlutusData::Int(1), PlutusData::Bytes(vec![]))]),
            ],
        );
        let bytes = data.to_cbor().unwrap();
        assert_eq!(PlutusData::from_cbor(&bytes).unwrap(), data);
    }

    #[test]
    fn text_is_not_plutus_data() {
        // CBOR text string "a"
        assert_matches!(PlutusData::from_cbor(&[0x61, 0x61]), Err(DecodeError::Cbor(_)));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        // tag 30 (rational), empty array
        assert_matches!(PlutusData::from_cbor(&[0xd8, 0x1e, 0x80]), Err(DecodeError::Cbor(_)));
    }

    #[test]
    fn map_entries_keep_their_order() {
        let data = PlutusData::Map(vec![
            (PlutusData::Int(2), PlutusData::Int(20)),
            (PlutusData::Int(1), PlutusData::Int(10)),
        ]);
        let bytes = data.to_cbor().unwrap();
        assert_eq!(bytes, vec![0xa2, 0x02, 0x14, 0x01, 0x0a]);
        assert_eq!(PlutusData::from_cbor(&bytes).unwrap(), data);

        let sorted = PlutusData::Map(vec![
            (PlutusData::Int(1), PlutusData::Int(10)),
            (PlutusData::Int(2), PlutusData::Int(20)),
        ]);
        assert_ne!(data.hash().unwrap(), sorted.hash().unwrap());
    }

    #[test]
    fn duplicate_map_keys_are_kept() {
        let data = PlutusData::Constr(
            0,
            vec![PlutusData::Map(vec![
                (PlutusData::Int(1), PlutusData::Int(10)),
                (PlutusData::Int(1), PlutusData::Int(11)),
            ])],
        );
        let bytes = data.to_cbor().unwrap();
        assert_eq!(PlutusData::from_cbor(&bytes).unwrap(), data);
    }

    #[test]
    fn inline_datum_with_map_round_trips_through_hex() {
        let datum = OutputDatum::Inline(PlutusData::Map(vec![
            (PlutusData::Bytes(b"z".to_vec()), PlutusData::unit(0)),
            (PlutusData::Bytes(b"a".to_vec()), PlutusData::unit(1)),
        ]));
        let json = serde_json::to_string(&datum).unwrap();
        assert_eq!(serde_json::from_str::<OutputDatum>(&json).unwrap(), datum);
    }

    #[test]
    fn indefinite_length_list_is_accepted() {
        // tag 121, indefinite array [1]
        let bytes = [0xd8, 0x79, 0x9f, 0x01, 0xff];
        assert_eq!(
            PlutusData::from_cbor(&bytes).unwrap(),
            PlutusData::Constr(0, vec![PlutusData::Int(1)])
        );
    }

    #[test]
    fn truncated_input_is_an_error() {
        assert_matches!(PlutusData::from_cbor(&[0xd8, 0x79]), Err(DecodeError::Cbor(_)));
    }

    #[test]
    fn fields_of_checks_constructor_and_arity() {
        let data = PlutusData::Constr(1, vec![PlutusData::Int(2)]);
        assert!(data.fields_of(1, 1).is_ok());
        assert_eq!(
            data.fields_of(2, 1),
            Err(DecodeError::UnexpectedConstructor {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            data.fields_of(1, 2),
            Err(DecodeError::FieldCount {
                constr: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn fraction_rejects_zero_denominator() {
        let data = PlutusData::Constr(1, vec![PlutusData::Int(3), PlutusData::Int(0)]);
        assert_matches!(Fraction::from_plutus_data(&data), Err(DecodeError::Fraction(_)));
    }

    #[test]
    fn optional_fraction() {
        let some = Some(Fraction::new(3, 1000).unwrap());
        let data = optional_to_plutus_data(&some);
        assert_eq!(optional_from_plutus_data::<Fraction>(&data).unwrap(), some);

        let none: Option<Fraction> = None;
        let data = optional_to_plutus_data(&none);
        assert_eq!(data, PlutusData::unit(0));
        assert_eq!(optional_from_plutus_data::<Fraction>(&data).unwrap(), None);
    }

    #[test]
    fn hash_is_blake2b_256_of_encoding() {
        let data = PlutusData::unit(0);
        let hash = data.hash().unwrap();
        assert_eq!(hash.len(), 32);
        assert_eq!(hash, PlutusData::unit(0).hash().unwrap());
        assert_ne!(hash, PlutusData::unit(1).hash().unwrap());
    }
}
