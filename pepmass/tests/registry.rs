//! Swapping the process wide periodic table. These tests share the active table so they take a
//! lock to run one after the other.

use std::sync::{Mutex, MutexGuard};

use pepmass::{prelude::*, system::dalton};

static LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

const WATER: f64 = 18.010_564_683_7;

/// A table with a heavy hydrogen (1.5 Da) and plain oxygen
const CUSTOM: &str = r#"{"elements": [
    {"name": "Hydrogen", "symbol": "H", "atomic_number": 1, "average_mass": 1.5, "valence_electrons": 1,
     "isotopes": [{"id": 1, "mass": 1.5, "mass_number": 1, "abundance": 1.0}]},
    {"name": "Oxygen", "symbol": "O", "atomic_number": 8, "average_mass": 16.0, "valence_electrons": 6,
     "isotopes": [{"id": 2, "mass": 16.0, "mass_number": 16, "abundance": 1.0}]}
]}"#;

/// A table with a single element, a hydrogen of 1.5 Da
const SINGLE: &str = r#"{"elements": [
    {"name": "Hydrogen", "symbol": "H", "atomic_number": 1, "average_mass": 1.5, "valence_electrons": 1,
     "isotopes": [{"id": 1, "mass": 1.5, "mass_number": 1, "abundance": 1.0}]}
]}"#;

fn water() -> f64 {
    ChemicalFormula::parse("H2O")
        .unwrap()
        .monoisotopic_mass()
        .get::<dalton>()
}

#[test]
fn load_and_restore() {
    let _guard = lock();
    let before = ChemicalFormula::parse("H2O").unwrap();
    registry::load_json(CUSTOM).unwrap();

    assert!((water() - 19.0).abs() < 1e-9);
    assert_eq!(registry::active().len(), 2);
    assert!(ChemicalFormula::parse("CH4").is_err());
    // Formulas parsed earlier keep their isotopes
    assert!((before.monoisotopic_mass().get::<dalton>() - WATER).abs() < 1e-9);
    // Residues are defined on the built-in table
    let glycine = AminoAcid::Glycine.residue_mass().monoisotopic();
    assert!((glycine.get::<dalton>() - 57.021_463_720_1).abs() < 1e-6);

    registry::restore_defaults();
    assert!((water() - WATER).abs() < 1e-9);
    assert!(ChemicalFormula::parse("CH4").is_ok());
}

#[test]
fn failed_load_keeps_table() {
    let _guard = lock();
    registry::restore_defaults();
    assert!(registry::load_json("{\"elements\": [").is_err());
    assert!(registry::load_json(&CUSTOM.replace("\"O\"", "\"H\"")).is_err());
    assert!((water() - WATER).abs() < 1e-9);
    assert!(registry::element("Se").is_ok());
}

#[test]
fn single_element_table() {
    let _guard = lock();
    registry::load_json(SINGLE).unwrap();
    assert_eq!(registry::active().len(), 1);
    let hydrogen = registry::isotope("H", None).unwrap();
    assert!((hydrogen.mass().get::<dalton>() - 1.5).abs() < 1e-12);
    assert!(registry::element("O").is_err());

    registry::restore_defaults();
    let hydrogen = registry::isotope("H", None).unwrap();
    assert!((hydrogen.mass().get::<dalton>() - 1.007_825_032_07).abs() < 1e-9);
    assert!(registry::element("O").is_ok());
}

#[cfg(feature = "xml")]
#[test]
fn load_xml() {
    let _guard = lock();
    registry::load_xml(
        r#"<PeriodicTable>
  <Element Name="Hydrogen" Symbol="H" AtomicNumber="1" AverageMass="1.5" ValenceElectrons="1">
    <Isotope Id="1" Mass="1.5" MassNumber="1" Abundance="1"/>
  </Element>
  <Element Name="Oxygen" Symbol="O" AtomicNumber="8" AverageMass="16" ValenceElectrons="6">
    <Isotope Id="2" Mass="16" MassNumber="16" Abundance="1"/>
  </Element>
</PeriodicTable>"#,
    )
    .unwrap();
    assert!((water() - 19.0).abs() < 1e-9);
    registry::restore_defaults();
    assert!((water() - WATER).abs() < 1e-9);
}

#[test]
fn readers_see_complete_tables() {
    let _guard = lock();
    registry::restore_defaults();
    std::thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    for _ in 0..2_000 {
                        let table = registry::active();
                        let h = table.isotope("H", None).unwrap().mass();
                        let o = table.isotope("O", None).unwrap().mass();
                        let mass = (h * 2.0 + o).get::<dalton>();
                        assert!(
                            (mass - WATER).abs() < 1e-9 || (mass - 19.0).abs() < 1e-9,
                            "{mass}"
                        );
                    }
                })
            })
            .collect();
        for _ in 0..200 {
            registry::load_json(CUSTOM).unwrap();
            registry::restore_defaults();
        }
        for reader in readers {
            reader.join().unwrap();
        }
    });
    assert!((water() - WATER).abs() < 1e-9);
}
