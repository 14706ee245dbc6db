//! Typed lookups into decoded NBT compounds, and builders for test chunk trees.

use nbt::Value;

use crate::world::{ColumnPos, WorldError};

pub type Compound = std::collections::HashMap<String, Value>;

/// Looks a tag up, `None` when absent.
pub fn find<'a>(compound: &'a Compound, name: &'static str) -> Option<&'a Value> {
    compound.get(name)
}

pub fn require<'a>(
    compound: &'a Compound,
    name: &'static str,
    pos: ColumnPos,
) -> Result<&'a Value, WorldError> {
    find(compound, name).ok_or(WorldError::MissingTag(pos, name))
}

pub fn as_compound<'a>(
    value: &'a Value,
    name: &'static str,
    pos: ColumnPos,
) -> Result<&'a Compound, WorldError> {
    match value {
        Value::Compound(compound) => Ok(compound),
        _ => Err(WorldError::UnexpectedTag(pos, name)),
    }
}

pub fn as_list<'a>(
    value: &'a Value,
    name: &'static str,
    pos: ColumnPos,
) -> Result<&'a [Value], WorldError> {
    match value {
        Value::List(list) => Ok(list),
        _ => Err(WorldError::UnexpectedTag(pos, name)),
    }
}

pub fn as_byte_array<'a>(
    value: &'a Value,
    name: &'static str,
    pos: ColumnPos,
) -> Result<&'a [i8], WorldError> {
    match value {
        Value::ByteArray(bytes) => Ok(bytes),
        _ => Err(WorldError::UnexpectedTag(pos, name)),
    }
}

/// Reads any integral tag as an `i32`. Section `Y` is a Byte, positions are Ints.
pub fn as_int(value: &Value, name: &'static str, pos: ColumnPos) -> Result<i32, WorldError> {
    match *value {
        Value::Byte(v) => Ok(v as i32),
        Value::Short(v) => Ok(v as i32),
        Value::Int(v) => Ok(v),
        _ => Err(WorldError::UnexpectedTag(pos, name)),
    }
}
