use std::{fmt::Display, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::{
    chemistry::ChemicalFormula,
    error::{LookupKind, MassError},
    quantities::Mass,
    sequence::ModificationSites,
};

/// A modification on a residue or terminus.
///
/// ```rust
/// use pepmass::prelude::*;
/// use pepmass::system::dalton;
/// let oxidation = Modification::named("Oxidation").unwrap();
/// assert!((oxidation.mass().monoisotopic().get::<dalton>() - 15.994_915).abs() < 1e-6);
/// // Text in brackets is resolved as a name, then a mass, then a formula
/// let by_mass = Modification::resolve("+15.9949").unwrap();
/// assert_eq!(by_mass.mass(), Mass::new(15.9949, 15.9949));
/// assert_eq!(Modification::resolve("O").unwrap().formula(), oxidation.formula());
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Modification {
    /// A single named mass delta
    Fixed(FixedModification),
    /// Multiple modifications stacked on the same place, the masses add up
    Collection(Vec<Modification>),
    /// A set of alternative isotopologue channels of the same label
    ChannelSet(ChannelSet),
}

/// A named mass delta, optionally with its elemental composition.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FixedModification {
    name: String,
    mass: Mass,
    formula: Option<ChemicalFormula>,
    sites: ModificationSites,
}

/// A set of alternative channels of a labelling reagent (eg the channels of an isobaric or
/// isotopic label). Only one of the channels is present on a given molecule, the mass
/// contribution of the set is the mass of the lightest channel.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ChannelSet {
    name: String,
    channels: Vec<FixedModification>,
}

impl FixedModification {
    /// A modification defined by its elemental composition
    pub fn from_formula(
        name: impl Into<String>,
        formula: ChemicalFormula,
        sites: ModificationSites,
    ) -> Self {
        Self {
            name: name.into(),
            mass: formula.mass(),
            formula: Some(formula),
            sites,
        }
    }

    /// A modification only defined by its mass
    pub fn from_mass(name: impl Into<String>, mass: Mass, sites: ModificationSites) -> Self {
        Self {
            name: name.into(),
            mass,
            formula: None,
            sites,
        }
    }

    /// The name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mass delta
    pub const fn mass(&self) -> Mass {
        self.mass
    }

    /// The elemental composition, if known
    pub const fn formula(&self) -> Option<&ChemicalFormula> {
        self.formula.as_ref()
    }

    /// The places this modification can be attached to
    pub const fn sites(&self) -> ModificationSites {
        self.sites
    }
}

impl ChannelSet {
    /// Create an empty set of channels
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: Vec::new(),
        }
    }

    /// Add a channel.
    /// # Errors
    /// If a channel with the same name is already present.
    pub fn add_channel(&mut self, channel: FixedModification) -> Result<(), MassError> {
        if self.channels.iter().any(|c| c.name == channel.name) {
            return Err(MassError::InvalidArgument(format!(
                "Channel '{}' is already part of channel set '{}'",
                channel.name, self.name
            )));
        }
        self.channels.push(channel);
        Ok(())
    }

    /// The name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All channels in the order they were added
    pub fn channels(&self) -> &[FixedModification] {
        &self.channels
    }

    /// The channel with the lowest monoisotopic mass, `None` if there are no channels
    pub fn lightest(&self) -> Option<&FixedModification> {
        self.channels.iter().min_by_key(|c| c.mass)
    }
}

static BUILTIN: LazyLock<Vec<FixedModification>> = LazyLock::new(|| {
    let sites = |residues: &str| {
        ModificationSites::from_residues(residues)
            .expect("Invalid built-in modification sites, please report this crash")
    };
    vec![
        FixedModification::from_formula(
            "Carbamidomethyl",
            builtin_formula!("C2H3NO"),
            sites("C"),
        ),
        FixedModification::from_formula("Oxidation", builtin_formula!("O"), sites("M")),
        FixedModification::from_formula("Phospho", builtin_formula!("HPO3"), sites("STY")),
        FixedModification::from_formula(
            "Acetyl",
            builtin_formula!("C2H2O"),
            sites("K") | ModificationSites::N_TERM,
        ),
        FixedModification::from_formula(
            "Amidated",
            builtin_formula!("HNO-1"),
            ModificationSites::C_TERM,
        ),
        FixedModification::from_formula("Deamidated", builtin_formula!("H-1N-1O"), sites("NQ")),
        FixedModification::from_formula(
            "Methyl",
            builtin_formula!("CH2"),
            sites("KR") | ModificationSites::C_TERM,
        ),
        FixedModification::from_formula(
            "Dimethyl",
            builtin_formula!("C2H4"),
            sites("KR") | ModificationSites::N_TERM,
        ),
        FixedModification::from_formula(
            "Formyl",
            builtin_formula!("CO"),
            sites("KST") | ModificationSites::N_TERM,
        ),
        FixedModification::from_formula(
            "Carbamyl",
            builtin_formula!("CHNO"),
            sites("KRC") | ModificationSites::N_TERM,
        ),
        FixedModification::from_formula(
            "TMT6plex",
            builtin_formula!("C{13}4C8N{15}NH20O2"),
            sites("KSTH") | ModificationSites::N_TERM,
        ),
    ]
});

impl Modification {
    /// Look up a built-in modification by name, ignoring case. Known modifications are
    /// Carbamidomethyl, Oxidation, Phospho, Acetyl, Amidated, Deamidated, Methyl, Dimethyl,
    /// Formyl, Carbamyl and TMT6plex.
    /// # Errors
    /// If the name is not known.
    pub fn named(name: &str) -> Result<Self, MassError> {
        BUILTIN
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .map(|m| Self::Fixed(m.clone()))
            .ok_or_else(|| MassError::not_found(LookupKind::Modification, name))
    }

    /// All built-in modifications
    pub fn builtin() -> impl ExactSizeIterator<Item = Self> {
        BUILTIN.iter().cloned().map(Self::Fixed)
    }

    /// Resolve the text of a modification as written in a sequence. It is tried as the name of a
    /// built-in modification, then as a signed mass (`+15.9949`, `-17.0265`) and lastly as a
    /// chemical formula against the active periodic table. Masses and formulas keep the text as
    /// their name and can be placed on any site.
    /// # Errors
    /// If the text is none of these.
    pub fn resolve(text: &str) -> Result<Self, MassError> {
        let text = text.trim();
        if let Ok(modification) = Self::named(text) {
            return Ok(modification);
        }
        if text.starts_with(['+', '-'])
            && let Ok(mass) = text.parse::<f64>()
        {
            return Ok(Self::Fixed(FixedModification::from_mass(
                text,
                Mass::new(mass, mass),
                ModificationSites::ALL,
            )));
        }
        if !text.is_empty()
            && let Ok(formula) = ChemicalFormula::parse(text)
        {
            return Ok(Self::Fixed(FixedModification::from_formula(
                text,
                formula,
                ModificationSites::ALL,
            )));
        }
        Err(MassError::not_found(LookupKind::Modification, text))
    }

    /// The name, stacked modifications are joined with `+`
    pub fn name(&self) -> String {
        match self {
            Self::Fixed(m) => m.name.clone(),
            Self::Collection(list) => list.iter().map(Self::name).collect::<Vec<_>>().join("+"),
            Self::ChannelSet(set) => set.name.clone(),
        }
    }

    /// The mass contribution
    pub fn mass(&self) -> Mass {
        match self {
            Self::Fixed(m) => m.mass,
            Self::Collection(list) => list.iter().map(Self::mass).sum(),
            Self::ChannelSet(set) => set.lightest().map(|c| c.mass).unwrap_or_default(),
        }
    }

    /// The elemental composition, if known for every part
    pub fn formula(&self) -> Option<ChemicalFormula> {
        match self {
            Self::Fixed(m) => m.formula.clone(),
            Self::Collection(list) => list.iter().map(Self::formula).sum(),
            Self::ChannelSet(set) => set
                .lightest()
                .map_or_else(|| Some(ChemicalFormula::default()), |c| c.formula.clone()),
        }
    }

    /// All places this modification can be attached to
    pub fn sites(&self) -> ModificationSites {
        match self {
            Self::Fixed(m) => m.sites,
            Self::Collection(list) => list
                .iter()
                .fold(ModificationSites::NONE, |sites, m| sites | m.sites()),
            Self::ChannelSet(set) => set
                .channels
                .iter()
                .fold(ModificationSites::NONE, |sites, m| sites | m.sites),
        }
    }

    /// The single modifications that make up this modification, flattening any collection
    pub fn parts(&self) -> Vec<&Self> {
        match self {
            Self::Collection(list) => list.iter().flat_map(Self::parts).collect(),
            other => vec![other],
        }
    }

    /// Stack another modification on top of this one
    pub fn merge(self, other: Self) -> Self {
        let mut list = match self {
            Self::Collection(list) => list,
            single => vec![single],
        };
        match other {
            Self::Collection(other) => list.extend(other),
            single => list.push(single),
        }
        Self::Collection(list)
    }
}

impl From<FixedModification> for Modification {
    fn from(value: FixedModification) -> Self {
        Self::Fixed(value)
    }
}

impl From<ChannelSet> for Modification {
    fn from(value: ChannelSet) -> Self {
        Self::ChannelSet(value)
    }
}

impl Display for Modification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
