//! # Service Registry
//!
//! The set of methods one service exposes. Registering a method validates its schema
//! once and hands back its [`MethodHelper`]; a dispatcher later routes incoming
//! envelopes by method name.

use std::collections::BTreeMap;

use tracing::debug;
use wirepack::Envelope;

use crate::codec::WireType;
use crate::error::Error;
use crate::error::Result;
use crate::helper::MethodHelper;
use crate::method::Method;
use crate::method::Payload;
use crate::schema::MethodSchema;
use crate::schema::SuccessSpec;

#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    service: &'static str,
    methods: BTreeMap<&'static str, &'static MethodSchema>,
}

impl ServiceRegistry {
    pub fn new(service: &'static str) -> Self {
        Self { service, methods: BTreeMap::new() }
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Validates and adds method `M`.
    ///
    /// # Errors
    /// Returns `Error::Schema` if the schema is inconsistent, belongs to another service,
    /// declares a success type that `M::Success` does not produce, disagrees with
    /// `M::Success` about being void, or if a method of the same name is already registered.
    pub fn register<M: Method>(&mut self) -> Result<MethodHelper<M>> {
        let schema = M::schema();
        schema.validate()?;
        if schema.service != self.service {
            return Err(Error::Schema(format!(
                "{} belongs to {}, not {}",
                schema.name, schema.service, self.service
            )));
        }
        if let SuccessSpec::Value(ty) = schema.success {
            let actual = <M::Success as WireType>::TYPE;
            if actual != ty {
                return Err(Error::Schema(format!(
                    "{} declares a {} success but its payload is {}",
                    schema.name, ty, actual
                )));
            }
        }
        if schema.is_void() != M::Success::void().is_some() {
            return Err(Error::Schema(format!(
                "{} is declared {} but its payload {}",
                schema.name,
                if schema.is_void() { "void" } else { "non-void" },
                if schema.is_void() { "is not" } else { "is void" },
            )));
        }
        if self.methods.contains_key(schema.name) {
            return Err(Error::Schema(format!("{} is registered twice", schema.name)));
        }
        self.methods.insert(schema.name, schema);
        debug!(
            service = self.service,
            method = schema.name,
            exceptions = schema.exceptions.len(),
            void = schema.is_void(),
            "registered method"
        );
        Ok(MethodHelper::new())
    }

    pub fn get(&self, name: &str) -> Option<&'static MethodSchema> {
        self.methods.get(name).copied()
    }

    /// Registered methods, by name.
    pub fn methods(&self) -> impl Iterator<Item = &'static MethodSchema> + '_ {
        self.methods.values().copied()
    }

    /// Finds the method an envelope is addressed to.
    pub fn route(&self, envelope: &Envelope) -> Result<&'static MethodSchema> {
        self.get(&envelope.name).ok_or_else(|| Error::UnknownMethod(envelope.name.clone()))
    }
}
