//! Field get/set on an SCB image.
//!
//! Scalars are read and written little-endian, masked and shifted per the
//! variant's field table. Writes merge: bits co-located in the same bytes
//! but belonging to other fields are preserved. Values wider than the
//! field are truncated to the bits the field owns, so `set` followed by
//! `get` always returns `value & value_mask`.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{
    layout::{Field, FieldSpec},
    scb::{FieldError, Scb},
};

impl Scb {
    fn resolve(&self, field: Field) -> Result<FieldSpec, FieldError> {
        let spec = self.layout().spec(field).ok_or(FieldError::Undefined {
            field,
            variant: self.variant(),
        })?;
        if !self.usage_allows(field) {
            return Err(FieldError::UsageMismatch { field, usage: self.usage() });
        }
        Ok(spec)
    }

    /// Reads a scalar field.
    pub fn get(&self, field: Field) -> Result<u64, FieldError> {
        let spec = self.resolve(field)?;
        if spec.width > 8 {
            return Err(FieldError::NotScalar { field, width: spec.width });
        }
        let off = spec.offset as usize;
        let width = spec.width as usize;
        let mut raw = [0u8; 8];
        raw[..width].copy_from_slice(&self.as_bytes()[off..off + width]);
        let word = u64::from_le_bytes(raw);
        Ok((word & spec.owned_mask()) >> spec.shift)
    }

    /// Writes a scalar field, preserving co-located bits of other fields.
    pub fn set(&mut self, field: Field, value: u64) -> Result<(), FieldError> {
        let spec = self.resolve(field)?;
        if spec.width > 8 {
            return Err(FieldError::NotScalar { field, width: spec.width });
        }
        let off = spec.offset as usize;
        let width = spec.width as usize;
        let owned = spec.owned_mask();

        let mut raw = [0u8; 8];
        raw[..width].copy_from_slice(&self.as_bytes()[off..off + width]);
        let current = u64::from_le_bytes(raw);
        let merged = (current & !owned) | ((value << spec.shift) & owned);
        let out = merged.to_le_bytes();
        self.as_bytes_mut()[off..off + width].copy_from_slice(&out[..width]);
        Ok(())
    }

    /// Borrow a field's raw bytes. Works for any width.
    pub fn field_bytes(&self, field: Field) -> Result<&[u8], FieldError> {
        let spec = self.resolve(field)?;
        let off = spec.offset as usize;
        Ok(&self.as_bytes()[off..off + spec.width as usize])
    }

    /// Overwrite a field's raw bytes. `bytes` must match the field width
    /// exactly; masked fields are not writable this way.
    pub fn set_field_bytes(&mut self, field: Field, bytes: &[u8]) -> Result<(), FieldError> {
        let spec = self.resolve(field)?;
        if spec.mask.is_some() {
            return Err(FieldError::NotScalar { field, width: spec.width });
        }
        if bytes.len() != spec.width as usize {
            return Err(FieldError::WidthMismatch {
                field,
                expected: spec.width,
                got: bytes.len(),
            });
        }
        let off = spec.offset as usize;
        self.as_bytes_mut()[off..off + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}
