//! The process wide active periodic table.
//!
//! Readers take a snapshot with [`active`], which is a single atomic load without locking.
//! [`load`] and [`restore_defaults`] install a complete new table in one atomic swap, so a
//! reader sees either the old or the new table, never a mix of both. Snapshots stay valid after
//! a swap. Formulas that were parsed before a swap keep the isotopes (and masses) they were
//! parsed with.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use log::info;

use crate::{
    chemistry::{Element, Isotope, PeriodicTable},
    error::MassError,
};

static ACTIVE: LazyLock<ArcSwap<PeriodicTable>> =
    LazyLock::new(|| ArcSwap::new(PeriodicTable::builtin()));

/// Get a snapshot of the active periodic table.
pub fn active() -> Arc<PeriodicTable> {
    ACTIVE.load_full()
}

/// Replace the active periodic table.
pub fn load(table: PeriodicTable) {
    info!("Loading periodic table with {} elements", table.len());
    ACTIVE.store(Arc::new(table));
}

/// Parse a JSON periodic table (see [`PeriodicTable::from_json`]) and make it the active table.
/// # Errors
/// If the document is invalid, the active table is left untouched in that case.
pub fn load_json(text: &str) -> Result<(), MassError> {
    load(PeriodicTable::from_json(text)?);
    Ok(())
}

/// Parse an XML periodic table (see [`PeriodicTable::from_xml`]) and make it the active table.
/// Only available with feature `xml`.
/// # Errors
/// If the document is invalid, the active table is left untouched in that case.
#[cfg(feature = "xml")]
pub fn load_xml(text: &str) -> Result<(), MassError> {
    load(PeriodicTable::from_xml(text)?);
    Ok(())
}

/// Make the built-in periodic table the active table again.
pub fn restore_defaults() {
    let table = PeriodicTable::builtin();
    info!(
        "Restoring built-in periodic table with {} elements",
        table.len()
    );
    ACTIVE.store(table);
}

/// Look up an element in the active table.
/// # Errors
/// If the symbol is not known.
pub fn element(symbol: &str) -> Result<Element, MassError> {
    active().element(symbol).cloned()
}

/// Look up an isotope in the active table, no mass number gives the principal isotope.
/// # Errors
/// If the symbol or mass number is not known.
pub fn isotope(symbol: &str, mass_number: Option<u16>) -> Result<Isotope, MassError> {
    active().isotope(symbol, mass_number)
}
