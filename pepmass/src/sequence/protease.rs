use std::{fmt::Display, sync::LazyLock};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::{LookupKind, MassError},
    sequence::AminoAcid,
};

/// A terminus of a peptide chain, also used for the side of a residue a protease cuts at.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Terminus {
    /// The N terminus (amine), for a protease: cuts before the recognised residue
    N,
    /// The C terminus (carboxyl), for a protease: cuts after the recognised residue
    C,
}

impl Display for Terminus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::N => "N-term",
                Self::C => "C-term",
            }
        )
    }
}

/// A protease defined by the residues it recognises and the side of these residues it cuts at.
/// A cut is blocked if the residue on the other side of the bond is in the no-cut set, for
/// example trypsin does not cut before a proline.
/// ```rust
/// use pepmass::prelude::*;
/// use pepmass::sequence::known_proteases;
/// let peptide = AminoAcidPolymer::parse("AKRPGKR").unwrap();
/// // Cuts after the first K, not after the R before P, and after the second K
/// assert_eq!(known_proteases::TRYPSIN.cleavage_sites(peptide.residues()), vec![2, 6]);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Protease {
    name: String,
    terminus: Terminus,
    cut: Vec<AminoAcid>,
    no_cut: Vec<AminoAcid>,
}

impl Protease {
    /// Define a protease, the residues are given as one letter codes (`"KR"`).
    /// # Errors
    /// If any of the residues is not a known one letter code.
    pub fn new(
        name: impl Into<String>,
        terminus: Terminus,
        cut: &str,
        no_cut: &str,
    ) -> Result<Self, MassError> {
        let residues = |text: &str| {
            text.chars()
                .map(AminoAcid::try_from)
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            name: name.into(),
            terminus,
            cut: residues(cut)?,
            no_cut: residues(no_cut)?,
        })
    }

    fn builtin(name: &str, terminus: Terminus, cut: &[AminoAcid], no_cut: &[AminoAcid]) -> Self {
        Self {
            name: name.to_string(),
            terminus,
            cut: cut.to_vec(),
            no_cut: no_cut.to_vec(),
        }
    }

    /// Look up a well known protease by name, ignoring case, see [`known_proteases`].
    /// # Errors
    /// If the name is not known.
    pub fn named(name: &str) -> Result<&'static Self, MassError> {
        known_proteases::ALL
            .iter()
            .map(|p| LazyLock::force(p))
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| MassError::not_found(LookupKind::Protease, name))
    }

    /// The name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The side of the recognised residues this protease cuts at
    pub const fn terminus(&self) -> Terminus {
        self.terminus
    }

    /// The residues this protease recognises
    pub fn cut(&self) -> &[AminoAcid] {
        &self.cut
    }

    /// The residues that block a cut when they are on the other side of the bond
    pub fn no_cut(&self) -> &[AminoAcid] {
        &self.no_cut
    }

    /// All locations in the given sequence where this protease cuts, as the number of residues
    /// before the cut. Only cuts inside the sequence are reported, never 0 or the length.
    pub fn cleavage_sites(&self, residues: &[AminoAcid]) -> Vec<usize> {
        match self.terminus {
            Terminus::C => residues
                .iter()
                .tuple_windows()
                .positions(|(current, next)| {
                    self.cut.contains(current) && !self.no_cut.contains(next)
                })
                .map(|i| i + 1)
                .collect(),
            Terminus::N => residues
                .iter()
                .tuple_windows()
                .positions(|(previous, current)| {
                    self.cut.contains(current) && !self.no_cut.contains(previous)
                })
                .map(|i| i + 1)
                .collect(),
        }
    }
}

impl Display for Protease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Some well known and widely used proteases
pub mod known_proteases {
    use super::*;
    use AminoAcid::*;

    /// `Trypsin` cuts after Lysine (K) or Arginine (R), unless followed by Proline (P)
    pub static TRYPSIN: LazyLock<Protease> = LazyLock::new(|| {
        Protease::builtin("Trypsin", Terminus::C, &[Lysine, Arginine], &[Proline])
    });

    /// `Chymotrypsin` cuts after Phenylalanine (F), Tryptophan (W) and Tyrosine (Y), unless followed
    /// by Proline (P)
    pub static CHYMOTRYPSIN: LazyLock<Protease> = LazyLock::new(|| {
        Protease::builtin(
            "Chymotrypsin",
            Terminus::C,
            &[Phenylalanine, Tryptophan, Tyrosine],
            &[Proline],
        )
    });

    /// `Pepsin` (pH > 2) cuts after Phenylalanine (F), Tryptophan (W), Tyrosine (Y), Leucine (L)
    pub static PEPSIN: LazyLock<Protease> = LazyLock::new(|| {
        Protease::builtin(
            "Pepsin",
            Terminus::C,
            &[Phenylalanine, Tryptophan, Tyrosine, Leucine],
            &[],
        )
    });

    /// `AspN` cuts before Aspartic acid (D)
    pub static ASPN: LazyLock<Protease> =
        LazyLock::new(|| Protease::builtin("AspN", Terminus::N, &[AsparticAcid], &[]));

    /// `GluC` cuts after Glutamic acid (E)
    pub static GLUC: LazyLock<Protease> =
        LazyLock::new(|| Protease::builtin("GluC", Terminus::C, &[GlutamicAcid], &[]));

    /// `LysC` cuts after Lysine (K)
    pub static LYSC: LazyLock<Protease> =
        LazyLock::new(|| Protease::builtin("LysC", Terminus::C, &[Lysine], &[]));

    /// `LysN` cuts before Lysine (K)
    pub static LYSN: LazyLock<Protease> =
        LazyLock::new(|| Protease::builtin("LysN", Terminus::N, &[Lysine], &[]));

    /// `ArgC` cuts after Arginine (R)
    pub static ARGC: LazyLock<Protease> =
        LazyLock::new(|| Protease::builtin("ArgC", Terminus::C, &[Arginine], &[]));

    /// `CNBr` (cyanogen bromide) cuts after Methionine (M)
    pub static CNBR: LazyLock<Protease> =
        LazyLock::new(|| Protease::builtin("CNBr", Terminus::C, &[Methionine], &[]));

    /// All proteases in this module
    pub static ALL: [&LazyLock<Protease>; 9] = [
        &TRYPSIN,
        &CHYMOTRYPSIN,
        &PEPSIN,
        &ASPN,
        &GLUC,
        &LYSC,
        &LYSN,
        &ARGC,
        &CNBR,
    ];
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sequence::{DigestionParameters, Protein};

    struct ProteaseTestCase {
        sequence: &'static str,
        expected_cut_sites: Vec<usize>,
        expected_peptides: Vec<&'static str>,
    }

    /// Generic test function for all proteases
    fn test_protease(protease: &Protease, test_case: &ProteaseTestCase) {
        let protein = Arc::new(Protein::parse(test_case.sequence, "test").unwrap());
        let cut_sites = protease.cleavage_sites(protein.residues());

        assert_eq!(
            cut_sites, test_case.expected_cut_sites,
            "Incorrect cut sites: found '{cut_sites:?}' expected '{:?}'",
            test_case.expected_cut_sites
        );

        let peptides = protein
            .digest([protease], &DigestionParameters::default())
            .unwrap();
        let found: Vec<_> = peptides.iter().map(|p| p.sequence()).collect();
        assert_eq!(
            found, test_case.expected_peptides,
            "Peptides don't match for '{}'",
            test_case.sequence
        );
    }

    #[test]
    fn trypsin() {
        let test_cases = vec![
            ProteaseTestCase {
                sequence: "AKRPGKR",
                expected_cut_sites: vec![2, 6],
                expected_peptides: vec!["AK", "RPGK", "R"],
            },
            ProteaseTestCase {
                sequence: "ARAKGCVLRPKDGR",
                expected_cut_sites: vec![2, 4, 11],
                expected_peptides: vec!["AR", "AK", "GCVLRPK", "DGR"],
            },
        ];

        for test_case in test_cases {
            test_protease(&known_proteases::TRYPSIN, &test_case);
        }
    }

    #[test]
    fn chymotrypsin() {
        let test_cases = vec![
            ProteaseTestCase {
                sequence: "AFWYPLGF",
                expected_cut_sites: vec![2, 3],
                expected_peptides: vec!["AF", "W", "YPLGF"],
            },
            ProteaseTestCase {
                sequence: "AVFUDGWTYPMSR",
                expected_cut_sites: vec![3, 7],
                expected_peptides: vec!["AVF", "UDGW", "TYPMSR"],
            },
        ];

        for test_case in test_cases {
            test_protease(&known_proteases::CHYMOTRYPSIN, &test_case);
        }
    }

    #[test]
    fn pepsin() {
        let test_cases = vec![
            ProteaseTestCase {
                sequence: "AACVFLPAKLURF",
                expected_cut_sites: vec![5, 6, 10],
                expected_peptides: vec!["AACVF", "L", "PAKL", "URF"],
            },
            ProteaseTestCase {
                sequence: "GFLPKDLVMSRG",
                expected_cut_sites: vec![2, 3, 7],
                expected_peptides: vec!["GF", "L", "PKDL", "VMSRG"],
            },
        ];

        for test_case in test_cases {
            test_protease(&known_proteases::PEPSIN, &test_case);
        }
    }

    #[test]
    fn aspn() {
        let test_cases = vec![
            ProteaseTestCase {
                sequence: "FARDKPGLFD",
                expected_cut_sites: vec![3, 9],
                expected_peptides: vec!["FAR", "DKPGLF", "D"],
            },
            ProteaseTestCase {
                sequence: "PFKDLTMSR",
                expected_cut_sites: vec![3],
                expected_peptides: vec!["PFK", "DLTMSR"],
            },
        ];

        for test_case in test_cases {
            test_protease(&known_proteases::ASPN, &test_case);
        }
    }

    #[test]
    fn gluc() {
        let test_cases = vec![
            ProteaseTestCase {
                sequence: "FAREDKPGLF",
                expected_cut_sites: vec![4],
                expected_peptides: vec!["FARE", "DKPGLF"],
            },
            ProteaseTestCase {
                sequence: "PFKELGTMSR",
                expected_cut_sites: vec![4],
                expected_peptides: vec!["PFKE", "LGTMSR"],
            },
        ];

        for test_case in test_cases {
            test_protease(&known_proteases::GLUC, &test_case);
        }
    }

    #[test]
    fn lysc_and_lysn() {
        test_protease(
            &known_proteases::LYSC,
            &ProteaseTestCase {
                sequence: "PFKDLTKMSR",
                expected_cut_sites: vec![3, 7],
                expected_peptides: vec!["PFK", "DLTK", "MSR"],
            },
        );
        test_protease(
            &known_proteases::LYSN,
            &ProteaseTestCase {
                sequence: "PFKDLTKMSR",
                expected_cut_sites: vec![2, 6],
                expected_peptides: vec!["PF", "KDLT", "KMSR"],
            },
        );
    }

    #[test]
    fn argc_and_cnbr() {
        test_protease(
            &known_proteases::ARGC,
            &ProteaseTestCase {
                sequence: "PFKDLRTMSR",
                expected_cut_sites: vec![6],
                expected_peptides: vec!["PFKDLR", "TMSR"],
            },
        );
        test_protease(
            &known_proteases::CNBR,
            &ProteaseTestCase {
                sequence: "MAMKPMG",
                expected_cut_sites: vec![1, 3, 6],
                expected_peptides: vec!["M", "AM", "KPM", "G"],
            },
        );
    }

    #[test]
    fn custom_and_named() {
        let custom = Protease::new("Custom", Terminus::N, "W", "P").unwrap();
        assert_eq!(
            custom.cleavage_sites(
                crate::sequence::AminoAcidPolymer::parse("AWPWGW")
                    .unwrap()
                    .residues()
            ),
            vec![1, 5]
        );
        assert!(matches!(
            Protease::new("Broken", Terminus::C, "KB", ""),
            Err(MassError::NotFound {
                kind: LookupKind::AminoAcid,
                ..
            })
        ));
        assert_eq!(Protease::named("trypsin").unwrap(), &*known_proteases::TRYPSIN);
        assert_eq!(Protease::named("CNBR").unwrap().name(), "CNBr");
        assert_eq!(
            Protease::named("Elastase").unwrap_err(),
            MassError::not_found(LookupKind::Protease, "Elastase")
        );
        assert_eq!(known_proteases::ALL.len(), 9);
    }
}
