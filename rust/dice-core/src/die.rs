//! A single die: kind, last rolled value, and frozen flag.
//!
//! `rolled` is 0 only before the first roll and is otherwise in `1..=faces`.
//! It changes only through [`Die::roll`]; `is_frozen` changes only through
//! [`Die::toggle_freeze`] (and the idempotent freeze/unfreeze helpers built on it).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::chance::Chance;
use crate::error::DiceError;

/// Supported die kinds. The face count determines the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DieKind {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieKind {
    pub const ALL: [DieKind; 7] = [
        DieKind::D4,
        DieKind::D6,
        DieKind::D8,
        DieKind::D10,
        DieKind::D12,
        DieKind::D20,
        DieKind::D100,
    ];

    pub fn faces(self) -> u32 {
        match self {
            DieKind::D4 => 4,
            DieKind::D6 => 6,
            DieKind::D8 => 8,
            DieKind::D10 => 10,
            DieKind::D12 => 12,
            DieKind::D20 => 20,
            DieKind::D100 => 100,
        }
    }

    /// "d{faces}".
    pub fn name(self) -> &'static str {
        match self {
            DieKind::D4 => "d4",
            DieKind::D6 => "d6",
            DieKind::D8 => "d8",
            DieKind::D10 => "d10",
            DieKind::D12 => "d12",
            DieKind::D20 => "d20",
            DieKind::D100 => "d100",
        }
    }

    pub fn from_faces(faces: u32) -> Option<DieKind> {
        DieKind::ALL.into_iter().find(|k| k.faces() == faces)
    }
}

impl fmt::Display for DieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts "d6", "D6", or a bare face count "6".
impl FromStr for DieKind {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let digits = t
            .strip_prefix('d')
            .or_else(|| t.strip_prefix('D'))
            .unwrap_or(t);
        digits
            .parse::<u32>()
            .ok()
            .and_then(DieKind::from_faces)
            .ok_or_else(|| DiceError::UnknownDieKind(s.to_string()))
    }
}

/// A die. Equality and ordering look at `rolled` only.
#[derive(Debug, Clone, Copy)]
pub struct Die {
    kind: DieKind,
    rolled: u32,
    is_frozen: bool,
}

impl Die {
    /// A fresh, never-rolled, unfrozen die.
    pub fn new(kind: DieKind) -> Self {
        Self {
            kind,
            rolled: 0,
            is_frozen: false,
        }
    }

    pub fn kind(&self) -> DieKind {
        self.kind
    }

    pub fn face_count(&self) -> u32 {
        self.kind.faces()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn rolled(&self) -> u32 {
        self.rolled
    }

    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    /// Draw a new value unless frozen. Returns the (possibly unchanged) value.
    pub fn roll(&mut self, chance: &mut Chance) -> u32 {
        if !self.is_frozen {
            self.rolled = chance.draw(self.face_count());
        }
        self.rolled
    }

    pub fn toggle_freeze(&mut self) {
        self.is_frozen = !self.is_frozen;
    }

    /// No-op when already frozen.
    pub fn freeze(&mut self) {
        if !self.is_frozen {
            self.toggle_freeze();
        }
    }

    /// No-op when already unfrozen.
    pub fn unfreeze(&mut self) {
        if self.is_frozen {
            self.toggle_freeze();
        }
    }

    pub fn add(&self, other: impl Into<Operand>) -> Result<i64, DiceError> {
        let rhs = self.operand_value('+', other.into())?;
        checked('+', self.value().checked_add(rhs))
    }

    /// `self - other`.
    pub fn subtract(&self, other: impl Into<Operand>) -> Result<i64, DiceError> {
        let rhs = self.operand_value('-', other.into())?;
        checked('-', self.value().checked_sub(rhs))
    }

    /// `other - self`.
    pub fn subtract_from(&self, other: impl Into<Operand>) -> Result<i64, DiceError> {
        let lhs = self.operand_value('-', other.into())?;
        checked('-', lhs.checked_sub(self.value()))
    }

    pub fn multiply(&self, other: impl Into<Operand>) -> Result<i64, DiceError> {
        let rhs = self.operand_value('*', other.into())?;
        checked('*', self.value().checked_mul(rhs))
    }

    /// `floor(self / other)`.
    pub fn floor_divide(&self, other: impl Into<Operand>) -> Result<i64, DiceError> {
        let rhs = self.operand_value('/', other.into())?;
        floor_div(self.value(), rhs)
    }

    /// `floor(other / self)`.
    pub fn floor_divide_into(&self, other: impl Into<Operand>) -> Result<i64, DiceError> {
        let lhs = self.operand_value('/', other.into())?;
        floor_div(lhs, self.value())
    }

    /// Pip art for the current value. Only six-sided dice have a face layout.
    pub fn render_face(&self) -> Result<String, DiceError> {
        match self.kind {
            DieKind::D6 => Ok(render_d6_face(self.rolled)),
            other => Err(DiceError::FaceArtUnsupported { name: other.name() }),
        }
    }

    pub fn console_print_face(&self) -> Result<(), DiceError> {
        print!("{}", self.render_face()?);
        Ok(())
    }

    fn value(&self) -> i64 {
        i64::from(self.rolled)
    }

    fn operand_value(&self, op: char, other: Operand) -> Result<i64, DiceError> {
        match other {
            Operand::Int(v) => Ok(v),
            Operand::Die(d) if d.kind == self.kind => Ok(d.value()),
            Operand::Die(d) => Err(DiceError::UnsupportedOperand {
                op,
                left: self.name(),
                right: d.name(),
            }),
        }
    }
}

impl PartialEq for Die {
    fn eq(&self, other: &Self) -> bool {
        self.rolled == other.rolled
    }
}

impl Eq for Die {}

impl PartialOrd for Die {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Die {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rolled.cmp(&other.rolled)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Right-hand side of a die arithmetic operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand {
    Die(Die),
    Int(i64),
}

impl From<Die> for Operand {
    fn from(d: Die) -> Self {
        Operand::Die(d)
    }
}

impl From<&Die> for Operand {
    fn from(d: &Die) -> Self {
        Operand::Die(*d)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Int(v)
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Operand::Int(i64::from(v))
    }
}

impl From<u32> for Operand {
    fn from(v: u32) -> Self {
        Operand::Int(i64::from(v))
    }
}

fn checked(op: char, result: Option<i64>) -> Result<i64, DiceError> {
    result.ok_or(DiceError::ArithmeticOverflow { op })
}

/// Rounds toward negative infinity. A die value is always one of the operands,
/// so `i64::MIN / -1` cannot occur.
fn floor_div(a: i64, b: i64) -> Result<i64, DiceError> {
    if b == 0 {
        return Err(DiceError::DivisionByZero { dividend: a });
    }
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

// Rows of a 3x3 pip grid, indexed by rolled value 0..=6.
const D6_FACES: [[&str; 3]; 7] = [
    ["   ", "   ", "   "],
    ["   ", " o ", "   "],
    ["o  ", "   ", "  o"],
    ["o  ", " o ", "  o"],
    ["o o", "   ", "o o"],
    ["o o", " o ", "o o"],
    ["o o", "o o", "o o"],
];

fn render_d6_face(rolled: u32) -> String {
    let face = D6_FACES.get(rolled as usize).unwrap_or(&D6_FACES[0]);
    let border = " ------- \n";
    let mut out = String::from(border);
    for row in face {
        let cells: Vec<String> = row.chars().map(|c| c.to_string()).collect();
        out.push_str("| ");
        out.push_str(&cells.join("  "));
        out.push_str(" |\n");
    }
    out.push_str(border);
    out
}
