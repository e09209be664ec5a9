//! # Schemas
//!
//! Static descriptions of structs and methods: which field IDs exist, what they are
//! called, which wire type they carry, and which exceptions a method may raise.
//!
//! ## Invariants
//! - **Stable IDs**: Field IDs are unique within a struct and never reassigned.
//! - **Closed Exceptions**: A method's exception table is fixed at definition time; each
//!   kind maps to exactly one slot.
//! - **Slot 0**: The success slot of a result is field 0; exceptions use positive IDs.

use wirepack::Type;

use crate::error::Error;
use crate::error::Result;

/// Field ID of the success slot of every result union.
pub const SUCCESS_ID: u16 = 0;

/// One numbered field of a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: u16,
    pub name: &'static str,
    pub ty: Type,
    pub required: bool,
}

impl FieldSpec {
    pub const fn optional(id: u16, name: &'static str, ty: Type) -> Self {
        Self { id, name, ty, required: false }
    }

    pub const fn required(id: u16, name: &'static str, ty: Type) -> Self {
        Self { id, name, ty, required: true }
    }
}

/// The fields of one struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl StructSchema {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, id: u16) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Checks that IDs and names are unique.
    pub fn validate(&self) -> Result<()> {
        for (i, field) in self.fields.iter().enumerate() {
            for prev in &self.fields[..i] {
                if prev.id == field.id {
                    return Err(Error::Schema(format!(
                        "{} declares field id {} twice",
                        self.name, field.id
                    )));
                }
                if prev.name == field.name {
                    return Err(Error::Schema(format!(
                        "{} declares field {} twice",
                        self.name, field.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// What a method returns when it succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessSpec {
    /// Success carries nothing; the result union is empty on success.
    Void,
    /// Success carries a value of this wire type in slot 0.
    Value(Type),
}

/// One declared exception slot of a result union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionSpec {
    pub id: u16,
    /// Field name of the slot, e.g. `badRequestError`.
    pub name: &'static str,
    /// Kind reported by the service error type, e.g. `BadRequestError`.
    pub kind: &'static str,
}

impl ExceptionSpec {
    pub const fn new(id: u16, name: &'static str, kind: &'static str) -> Self {
        Self { id, name, kind }
    }
}

/// Everything the codec needs to know about one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSchema {
    pub service: &'static str,
    pub name: &'static str,
    pub args: StructSchema,
    pub success: SuccessSpec,
    /// In priority order.
    pub exceptions: &'static [ExceptionSpec],
}

impl MethodSchema {
    pub fn is_void(&self) -> bool {
        self.success == SuccessSpec::Void
    }

    pub fn exception_by_kind(&self, kind: &str) -> Option<&'static ExceptionSpec> {
        self.exceptions.iter().find(|e| e.kind == kind)
    }

    pub fn exception_by_id(&self, id: u16) -> Option<&'static ExceptionSpec> {
        self.exceptions.iter().find(|e| e.id == id)
    }

    /// The generated name of the result struct, e.g. `Service_Method_Result`.
    pub fn result_name(&self) -> String {
        format!("{}_{}_Result", self.service, self.name)
    }

    /// Checks the args schema and the exception table.
    pub fn validate(&self) -> Result<()> {
        self.args.validate()?;
        for (i, exc) in self.exceptions.iter().enumerate() {
            if exc.id == SUCCESS_ID {
                return Err(Error::Schema(format!(
                    "{} uses the success slot for exception {}",
                    self.name, exc.kind
                )));
            }
            for prev in &self.exceptions[..i] {
                if prev.id == exc.id || prev.name == exc.name {
                    return Err(Error::Schema(format!(
                        "{} declares exception slot {} twice",
                        self.name, exc.name
                    )));
                }
                if prev.kind == exc.kind {
                    return Err(Error::Schema(format!(
                        "{} declares exception kind {} twice",
                        self.name, exc.kind
                    )));
                }
            }
        }
        Ok(())
    }
}
