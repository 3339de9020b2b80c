//! Protocol module - JSON message types for network clients
//!
//! One JSON object per line in each direction.
//!
//! Server -> client (after every state change):
//!
//! ```text
//! {"board":[null,...,{"owner":"red"},...],"your_turn":true,"observing":false}
//! ```
//!
//! `board` holds 42 cells, top row first, or is `null` when no state is known.
//!
//! Client -> server:
//!
//! ```text
//! {"type":"new_move","column":3}
//! {"type":"new_move","column":"3"}
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Color, CELL_COUNT};

// ============== Game -> Client Messages ==============

/// Lowercase color for the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLower {
    Red,
    Blue,
}

impl From<Color> for ColorLower {
    fn from(value: Color) -> Self {
        match value {
            Color::Red => ColorLower::Red,
            Color::Blue => ColorLower::Blue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceWire {
    pub owner: ColorLower,
}

/// The 42 cells, serialized as a flat JSON array (no heap)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardWire(pub [Cell; CELL_COUNT]);

impl Serialize for BoardWire {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(CELL_COUNT))?;
        for cell in self.0.iter() {
            let piece = cell.map(|p| PieceWire {
                owner: p.owner.into(),
            });
            seq.serialize_element(&piece)?;
        }
        seq.end()
    }
}

/// State pushed to every connected client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateMessage {
    pub board: Option<BoardWire>,
    pub your_turn: bool,
    pub observing: bool,
}

// ============== Client -> Game Messages ==============

/// Column as sent by clients: a number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ColumnValue {
    Number(i64),
    Text(String),
}

impl ColumnValue {
    fn to_column(&self) -> Option<i8> {
        let n = match self {
            ColumnValue::Number(n) => *n,
            ColumnValue::Text(s) => s.trim().parse::<i64>().ok()?,
        };
        // Anything outside i8 is off the grid anyway.
        Some(i8::try_from(n).unwrap_or(i8::MIN))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawMessage {
    #[serde(rename = "type")]
    msg_type: String,
    #[serde(default)]
    column: Option<ColumnValue>,
}

/// Parsed inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    NewMove { column: i8 },
    /// `new_move` without a usable column
    InvalidMove,
    Unknown(String),
}

/// Parse an inbound line
pub fn parse_message(line: &str) -> Result<ParsedMessage, serde_json::Error> {
    let raw: RawMessage = serde_json::from_str(line)?;
    Ok(match raw.msg_type.as_str() {
        "new_move" => match raw.column.as_ref().and_then(ColumnValue::to_column) {
            Some(column) => ParsedMessage::NewMove { column },
            None => ParsedMessage::InvalidMove,
        },
        _ => ParsedMessage::Unknown(raw.msg_type),
    })
}
