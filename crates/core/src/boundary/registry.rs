//! Closed registry of monetary field names.
//!
//! Matching is by key name only. Path and schema are ignored, so an
//! unrelated field that happens to share a registered name is tagged too.

use std::collections::HashSet;

/// Version of `MONETARY_FIELDS`. Bump whenever the list changes.
pub const MONETARY_FIELDS_VERSION: u32 = 1;

/// Field names backed by fixed-point (two decimal) columns on the server.
///
/// Adding a money column means adding its name here.
pub const MONETARY_FIELDS: &[&str] = &[
    "monto",
    "monto_total",
    "monto_pagado",
    "monto_pendiente",
    "saldo",
    "saldo_inicial",
    "saldo_final",
    "precio",
    "precio_unitario",
    "costo",
    "subtotal",
    "total",
    "impuesto",
    "descuento",
    "abono",
    "cuota",
    "valor_cuota",
    "interes",
    "comision",
    "pago",
    "deuda",
    "limite_credito",
    "presupuesto",
];

/// Set of field names treated as money by the boundary transformer.
///
/// Fixed at construction; there is no way to add or remove names afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegistry {
    fields: HashSet<String>,
}

impl FieldRegistry {
    /// Creates a registry from an explicit list of names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The standard registry built from `MONETARY_FIELDS`.
    #[must_use]
    pub fn monetary() -> Self {
        Self::new(MONETARY_FIELDS.iter().copied())
    }

    /// Returns true if `field` is registered as monetary.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::monetary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monetary_registry() {
        let registry = FieldRegistry::monetary();
        assert!(registry.contains("monto"));
        assert!(registry.contains("saldo"));
        assert!(!registry.contains("Monto"));
        assert!(!registry.contains("cantidad"));
        assert_eq!(registry.len(), MONETARY_FIELDS.len());
    }

    #[test]
    fn test_monetary_fields_are_unique() {
        let unique: HashSet<&str> = MONETARY_FIELDS.iter().copied().collect();
        assert_eq!(unique.len(), MONETARY_FIELDS.len());
    }

    #[test]
    fn test_custom_registries_coexist() {
        let a = FieldRegistry::new(["price"]);
        let b = FieldRegistry::new(vec![String::from("cost")]);
        assert!(a.contains("price") && !a.contains("cost"));
        assert!(b.contains("cost") && !b.contains("price"));
        assert!(FieldRegistry::new(Vec::<String>::new()).is_empty());
    }
}
