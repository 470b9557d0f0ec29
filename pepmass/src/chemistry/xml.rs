//! Read periodic tables from XML documents. Only available with feature `xml`.

use roxmltree::{Document, Node};

use crate::{
    chemistry::{ElementData, IsotopeData, PeriodicTable},
    error::{MassError, ParseKind},
};

impl PeriodicTable {
    /// Parse a table from an XML document. Every value can be given as an attribute or as a child
    /// element, numbers are always read with a `.` as decimal separator.
    /// ```xml
    /// <PeriodicTable>
    ///   <Element Name="Hydrogen" Symbol="H" AtomicNumber="1" AverageMass="1.00794" ValenceElectrons="1">
    ///     <Isotope Id="1" Mass="1.00782503207" MassNumber="1" Abundance="0.999885"/>
    ///   </Element>
    /// </PeriodicTable>
    /// ```
    /// # Errors
    /// If the document is not valid XML, a value is missing or malformed, or the elements are
    /// invalid.
    pub fn from_xml(text: &str) -> Result<Self, MassError> {
        let document = Document::parse(text).map_err(|err| {
            MassError::parse(
                ParseKind::PeriodicTable,
                document_position(text, err.pos()),
                err.to_string(),
            )
        })?;
        let mut elements = Vec::new();
        for node in document
            .root_element()
            .children()
            .filter(|n| n.has_tag_name("Element"))
        {
            let mut isotopes = Vec::new();
            for isotope in node.children().filter(|n| n.has_tag_name("Isotope")) {
                isotopes.push(IsotopeData {
                    id: number(text, isotope, "Id")?,
                    mass: number(text, isotope, "Mass")?,
                    mass_number: number(text, isotope, "MassNumber")?,
                    abundance: number(text, isotope, "Abundance")?,
                });
            }
            elements.push(ElementData {
                name: value(text, node, "Name")?.to_string(),
                symbol: value(text, node, "Symbol")?.to_string(),
                atomic_number: number(text, node, "AtomicNumber")?,
                average_mass: number(text, node, "AverageMass")?,
                valence_electrons: number(text, node, "ValenceElectrons")?,
                isotopes,
            });
        }
        Self::new(elements)
    }
}

fn document_position(text: &str, pos: roxmltree::TextPos) -> usize {
    text.lines()
        .take((pos.row as usize).saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + (pos.col as usize).saturating_sub(1)
}

/// Get a value from an attribute or a child element with the given name.
fn value<'a>(text: &str, node: Node<'a, '_>, name: &str) -> Result<&'a str, MassError> {
    node.attribute(name)
        .or_else(|| {
            node.children()
                .find(|c| c.has_tag_name(name))
                .and_then(|c| c.text())
        })
        .map(str::trim)
        .ok_or_else(|| {
            MassError::parse(
                ParseKind::PeriodicTable,
                node.range().start.min(text.len()),
                format!("Missing value '{name}' on <{}>", node.tag_name().name()),
            )
        })
}

fn number<T: std::str::FromStr>(text: &str, node: Node<'_, '_>, name: &str) -> Result<T, MassError>
where
    T::Err: std::fmt::Display,
{
    value(text, node, name)?.parse::<T>().map_err(|err| {
        MassError::parse(
            ParseKind::PeriodicTable,
            node.range().start.min(text.len()),
            format!("Invalid number for '{name}': {err}"),
        )
    })
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::system::da;

    #[test]
    fn attributes_and_children() {
        let table = PeriodicTable::from_xml(
            r#"<?xml version="1.0"?>
<PeriodicTable>
  <Element Name="Hydrogen" Symbol="H" AtomicNumber="1" AverageMass="1.00794" ValenceElectrons="1">
    <Isotope Id="1" Mass="1.00782503207" MassNumber="1" Abundance="0.999885"/>
    <Isotope Id="2" Mass="2.0141017778" MassNumber="2" Abundance="0.000115"/>
  </Element>
  <Element>
    <Name>Carbon</Name>
    <Symbol>C</Symbol>
    <AtomicNumber>6</AtomicNumber>
    <AverageMass>12.0107</AverageMass>
    <ValenceElectrons>4</ValenceElectrons>
    <Isotope><Id>3</Id><Mass>12</Mass><MassNumber>12</MassNumber><Abundance>0.9893</Abundance></Isotope>
  </Element>
</PeriodicTable>"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.isotope("H", Some(2)).unwrap().mass(), da(2.014_101_777_8));
        assert_eq!(table.element("C").unwrap().average_mass(), da(12.0107));
    }

    #[test]
    fn missing_and_malformed() {
        assert!(matches!(
            PeriodicTable::from_xml("<PeriodicTable><Element Symbol=\"H\"/></PeriodicTable>"),
            Err(MassError::Parse { .. })
        ));
        assert!(matches!(
            PeriodicTable::from_xml(
                "<PeriodicTable><Element Name=\"H\" Symbol=\"H\" AtomicNumber=\"1\" AverageMass=\"1,008\" ValenceElectrons=\"1\"/></PeriodicTable>"
            ),
            Err(MassError::Parse { .. })
        ));
        assert!(matches!(
            PeriodicTable::from_xml("<PeriodicTable>"),
            Err(MassError::Parse { .. })
        ));
    }
}
