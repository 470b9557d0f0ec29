use std::sync::Arc;

use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    error::MassError,
    sequence::{Peptide, Protease, Protein},
};

/// The settings for an in silico digestion.
///
/// Can be stored as JSON: `{"max_missed_cleavages": 2, "min_length": 7, "max_length": 30}`,
/// missing fields take their default value.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default)]
pub struct DigestionParameters {
    /// The maximal number of internal cleavage sites that can be left uncut in a peptide
    pub max_missed_cleavages: usize,
    /// The minimal number of residues in a peptide, inclusive
    pub min_length: usize,
    /// The maximal number of residues in a peptide, inclusive
    pub max_length: usize,
}

impl Default for DigestionParameters {
    fn default() -> Self {
        Self {
            max_missed_cleavages: 0,
            min_length: 1,
            max_length: usize::MAX,
        }
    }
}

impl DigestionParameters {
    /// Create a new set of parameters.
    /// # Errors
    /// If the minimal length is larger than the maximal length.
    pub fn new(
        max_missed_cleavages: usize,
        min_length: usize,
        max_length: usize,
    ) -> Result<Self, MassError> {
        if min_length > max_length {
            return Err(MassError::InvalidArgument(format!(
                "the minimal length ({min_length}) is larger than the maximal length ({max_length})"
            )));
        }
        Ok(Self {
            max_missed_cleavages,
            min_length,
            max_length,
        })
    }
}

impl Protein {
    /// All boundaries between peptides for the given proteases: the cleavage sites of all
    /// proteases combined, sorted and deduplicated, with the start (0) and end (length) of the
    /// protein. Every boundary is the number of residues before it.
    pub fn cleavage_sites<'a>(
        &self,
        proteases: impl IntoIterator<Item = &'a Protease>,
    ) -> Vec<usize> {
        let mut sites = vec![0];
        for protease in proteases {
            let found = protease.cleavage_sites(self.residues());
            trace!("{protease} cleaves {} at {found:?}", self.description());
            sites.extend(found);
        }
        sites.push(self.len());
        sites.sort_unstable();
        sites.dedup();
        sites
    }

    /// Digest this protein with the given proteases. All proteases cut at the same time, the
    /// resulting peptides are bounded by cleavage sites of any of the proteases. Without any
    /// protease the whole protein is the only peptide. Every peptide spans from a boundary to one
    /// of the next `max_missed_cleavages + 1` boundaries, peptides outside of the length range are
    /// skipped. Peptides are sorted on start position, then on length.
    /// ```rust
    /// use std::sync::Arc;
    /// use pepmass::prelude::*;
    /// use pepmass::sequence::known_proteases;
    /// let protein = Arc::new(Protein::parse("AKRPGKR", "example").unwrap());
    /// let parameters = DigestionParameters::new(1, 1, 10).unwrap();
    /// let peptides = protein.digest([&*known_proteases::TRYPSIN], &parameters).unwrap();
    /// let sequences: Vec<_> = peptides.iter().map(|p| p.sequence()).collect();
    /// assert_eq!(sequences, ["AK", "AKRPGK", "RPGK", "RPGKR", "R"]);
    /// ```
    /// # Errors
    /// Only if the cleavage sites are inconsistent with the protein, which does not happen for
    /// the sites found by [`Protease::cleavage_sites`].
    pub fn digest<'a>(
        self: &Arc<Self>,
        proteases: impl IntoIterator<Item = &'a Protease>,
        parameters: &DigestionParameters,
    ) -> Result<Vec<Peptide>, MassError> {
        let sites = self.cleavage_sites(proteases);
        let mut peptides = Vec::new();
        for (index, start) in sites.iter().enumerate() {
            for end in sites
                .iter()
                .skip(index + 1)
                .take(parameters.max_missed_cleavages.saturating_add(1))
            {
                let length = end - start;
                if (parameters.min_length..=parameters.max_length).contains(&length) {
                    peptides.push(Peptide::from_protein(self, start + 1, *end)?);
                }
            }
        }
        debug!(
            "Digested {} into {} peptides using {} cleavage sites",
            self.description(),
            peptides.len(),
            sites.len().saturating_sub(2)
        );
        Ok(peptides)
    }
}

/// Digest many proteins in parallel, see [`Protein::digest`]. The results are in the same order
/// as the proteins. Only available with feature `rayon`.
/// # Errors
/// If any of the digestions fails.
#[cfg(feature = "rayon")]
pub fn digest_all(
    proteins: &[Arc<Protein>],
    proteases: &[&Protease],
    parameters: &DigestionParameters,
) -> Result<Vec<Vec<Peptide>>, MassError> {
    use rayon::prelude::*;

    proteins
        .par_iter()
        .map(|protein| protein.digest(proteases.iter().copied(), parameters))
        .collect()
}

/// The number of internal cleavage sites of the proteases that are present in the peptide.
pub fn missed_cleavages<'a>(
    peptide: &Peptide,
    proteases: impl IntoIterator<Item = &'a Protease>,
) -> usize {
    proteases
        .into_iter()
        .flat_map(|p| p.cleavage_sites(peptide.residues()))
        .unique()
        .count()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::sequence::{AminoAcid, Modification, known_proteases};

    fn protein(sequence: &str) -> Arc<Protein> {
        Arc::new(Protein::parse(sequence, "test").unwrap())
    }

    fn sequences(peptides: &[Peptide]) -> Vec<String> {
        peptides.iter().map(|p| p.sequence()).collect()
    }

    #[test]
    fn no_protease() {
        let protein = protein("[Acetyl]-MAARKFGKPLMEDK-[Amidated]");
        let peptides = protein
            .digest(None::<&Protease>, &DigestionParameters::default())
            .unwrap();
        assert_eq!(peptides.len(), 1);
        assert_eq!(*peptides[0].polymer(), **protein);
        assert_eq!(protein.cleavage_sites([]), vec![0, 14]);
    }

    #[test]
    fn missed_cleavage_spans() {
        let protein = protein("AKRPGKR");
        let parameters = DigestionParameters::new(2, 1, 100).unwrap();
        let peptides = protein
            .digest([&*known_proteases::TRYPSIN], &parameters)
            .unwrap();
        assert_eq!(
            sequences(&peptides),
            vec!["AK", "AKRPGK", "AKRPGKR", "RPGK", "RPGKR", "R"]
        );
        for peptide in &peptides {
            assert!(missed_cleavages(peptide, [&*known_proteases::TRYPSIN]) <= 2);
        }
    }

    #[test]
    fn trypsin_invariants() {
        let protein = protein("MKWVTFISLLLLFSSAYSRGVFRRDTHKSEIAHRFKDLGEEHFKGLVLIAFSQYLQQCPFDEHVKLVNELTEFAKTCVADESHAGCEKSLHTLFGDELCKVASLRETYGDMADCCEKQEPERNECFLSHKDDSPDLPKLKPDPNTLCDEFKADEKKFWGKYLYEIARRHPYFYAPELLYYANKYNGVFQECCQAEDKGACLLPKIETMREKVLASSARQRLRCASIQKFGERALKAWSVARLSQKFPKAEFVEVTKLVTDLTKVHKECCHGDLLECADDRADLAKYICDNQDTISSKLKECCDKPLLEKSHCIAEVEKDAIPENLPPLTADFAEDKDVCKNYQEAKDAFLGSFLYEYSRRHPEYAVSVLLRLAKEYEATLEECCAKDDPHACYSTVFDKLKHLVDEPQNLIKQNCDQFEKLGEYGFQNALIVRYTRKVPQVSTPTLVEVSRSLGKVGTRCCTKPESERMPCTEDYLSLILNRLCVLHEKTPVSEKVTKCCTESLVNRRPCFSALTPDETYVPKAFDEKLFTFHADICTLPDTEKQIKKQTALVELLKHKPKATEEQLKTVMENFVAFVDKCCAADDKEACFAVEGPKLVVSTQTALA");
        for max_missed in 0..=3 {
            let parameters = DigestionParameters::new(max_missed, 6, 30).unwrap();
            let peptides = protein
                .digest([&*known_proteases::TRYPSIN], &parameters)
                .unwrap();
            assert!(!peptides.is_empty());
            for peptide in &peptides {
                assert!((6..=30).contains(&peptide.len()), "{peptide}");
                assert!(
                    missed_cleavages(peptide, [&*known_proteases::TRYPSIN]) <= max_missed,
                    "{peptide}"
                );
                // Every peptide ends after a K/R or at the protein C terminus
                assert!(
                    peptide.end() == protein.len()
                        || matches!(
                            peptide.residues().last(),
                            Some(AminoAcid::Lysine | AminoAcid::Arginine)
                        ),
                    "{peptide}"
                );
            }
        }
    }

    #[test]
    fn length_filter() {
        let protein = protein("AKRPGKR");
        let peptides = protein
            .digest(
                [&*known_proteases::TRYPSIN],
                &DigestionParameters::new(2, 4, 6).unwrap(),
            )
            .unwrap();
        assert_eq!(sequences(&peptides), vec!["AKRPGK", "RPGK", "RPGKR"]);
        assert!(DigestionParameters::new(0, 5, 4).is_err());
    }

    #[test]
    fn multiple_proteases() {
        let protein = protein("AKDGRLEDPK");
        let trypsin = protein
            .digest([&*known_proteases::TRYPSIN], &DigestionParameters::default())
            .unwrap();
        let aspn = protein
            .digest([&*known_proteases::ASPN], &DigestionParameters::default())
            .unwrap();
        let both = protein
            .digest(
                [&*known_proteases::TRYPSIN, &*known_proteases::ASPN],
                &DigestionParameters::new(3, 1, 100).unwrap(),
            )
            .unwrap();
        assert_eq!(
            protein.cleavage_sites([&*known_proteases::TRYPSIN, &*known_proteases::ASPN]),
            vec![0, 2, 5, 7, 10]
        );
        let combined = sequences(&both);
        for peptide in trypsin.iter().chain(aspn.iter()) {
            assert!(combined.contains(&peptide.sequence()), "{peptide}");
        }
        // Sites shared by both proteases are only used once
        let sites = protein.cleavage_sites([&*known_proteases::LYSC, &*known_proteases::TRYPSIN]);
        assert_eq!(sites, vec![0, 2, 5, 10]);
    }

    #[test]
    fn terminal_modifications() {
        let protein = protein("[Acetyl]-MAKGGRAA-[Amidated]");
        let peptides = protein
            .digest([&*known_proteases::TRYPSIN], &DigestionParameters::default())
            .unwrap();
        assert_eq!(sequences(&peptides), vec!["MAK", "GGR", "AA"]);
        let acetyl = Modification::named("Acetyl").unwrap();
        let amidated = Modification::named("Amidated").unwrap();
        assert_eq!(peptides[0].n_term_modification(), Some(&acetyl));
        assert_eq!(peptides[0].c_term_modification(), None);
        assert_eq!(peptides[1].n_term_modification(), None);
        assert_eq!(peptides[1].c_term_modification(), None);
        assert_eq!(peptides[2].n_term_modification(), None);
        assert_eq!(peptides[2].c_term_modification(), Some(&amidated));
        assert_eq!((peptides[1].start(), peptides[1].end()), (4, 6));
    }

    #[test]
    fn parameters_json() {
        let parameters: DigestionParameters =
            serde_json::from_str(r#"{"max_missed_cleavages": 2, "min_length": 7}"#).unwrap();
        assert_eq!(parameters.max_missed_cleavages, 2);
        assert_eq!(parameters.min_length, 7);
        assert_eq!(parameters.max_length, usize::MAX);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel() {
        let proteins = vec![protein("AKRPGKR"), protein("PFKDLTKMSR"), protein("")];
        let all = digest_all(
            &proteins,
            &[&*known_proteases::LYSC],
            &DigestionParameters::default(),
        )
        .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(sequences(&all[0]), vec!["AK", "RPGK", "R"]);
        assert_eq!(sequences(&all[1]), vec!["PFK", "DLTK", "MSR"]);
        assert!(all[2].is_empty());
    }
}
