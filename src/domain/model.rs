use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Values pulled out of an observation, keyed by the 1-based line they came from.
pub type ExtractedFields = BTreeMap<usize, String>;

/// The filled document bytes, or the reason there are none.
pub type RenderResult = crate::utils::error::Result<Vec<u8>>;

/// Semantic meaning of an observation line, fixed by its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldSlot {
    FullName,
    DocumentNumber,
    OccupantCount,
    CheckIn,
    CheckOut,
    AmountPaid,
    TotalAmount,
    Address,
    Phone,
}

impl FieldSlot {
    pub const ALL: [FieldSlot; 9] = [
        FieldSlot::FullName,
        FieldSlot::DocumentNumber,
        FieldSlot::OccupantCount,
        FieldSlot::CheckIn,
        FieldSlot::CheckOut,
        FieldSlot::AmountPaid,
        FieldSlot::TotalAmount,
        FieldSlot::Address,
        FieldSlot::Phone,
    ];

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        ordinal
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn ordinal(self) -> usize {
        self as usize + 1
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldSlot::FullName => "full_name",
            FieldSlot::DocumentNumber => "document_number",
            FieldSlot::OccupantCount => "occupant_count",
            FieldSlot::CheckIn => "check_in",
            FieldSlot::CheckOut => "check_out",
            FieldSlot::AmountPaid => "amount_paid",
            FieldSlot::TotalAmount => "total_amount",
            FieldSlot::Address => "address",
            FieldSlot::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BLACK
    }
}

/// Where and how a single piece of text lands on the page, in PDF user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateStamp {
    pub day: Placement,
    pub month: Placement,
    pub year: Placement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldLayout {
    pub name: String,
    pub fields: HashMap<FieldSlot, Vec<Placement>>,
    pub date_stamp: DateStamp,
}

impl FieldLayout {
    pub fn placements(&self, slot: FieldSlot) -> &[Placement] {
        self.fields.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }
}
