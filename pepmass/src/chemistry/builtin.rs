//! The periodic table that is compiled into the crate. Exact masses from the AME 2012 atomic mass
//! evaluation, abundances and average masses from IUPAC.

use super::{ElementData, IsotopeData};

type ElementRow = (
    &'static str,
    &'static str,
    u16,
    f64,
    u8,
    &'static [(u16, f64, f64)],
);

/// Name, symbol, atomic number, average mass, valence electrons, isotopes (mass number, mass, abundance)
const ELEMENTS: &[ElementRow] = &[
    (
        "Hydrogen",
        "H",
        1,
        1.007_94,
        1,
        &[
            (1, 1.007_825_032_07, 0.999_885),
            (2, 2.014_101_777_8, 0.000_115),
            (3, 3.016_049_277_7, 0.0),
        ],
    ),
    (
        "Helium",
        "He",
        2,
        4.002_602,
        2,
        &[(3, 3.016_029_319_1, 0.000_001_34), (4, 4.002_603_254_15, 0.999_998_66)],
    ),
    (
        "Lithium",
        "Li",
        3,
        6.941,
        1,
        &[(6, 6.015_122_795, 0.0759), (7, 7.016_004_55, 0.9241)],
    ),
    (
        "Boron",
        "B",
        5,
        10.811,
        3,
        &[(10, 10.012_937_0, 0.199), (11, 11.009_305_4, 0.801)],
    ),
    (
        "Carbon",
        "C",
        6,
        12.0107,
        4,
        &[
            (12, 12.0, 0.9893),
            (13, 13.003_354_837_8, 0.0107),
            (14, 14.003_241_989, 0.0),
        ],
    ),
    (
        "Nitrogen",
        "N",
        7,
        14.0067,
        5,
        &[(14, 14.003_074_004_8, 0.996_36), (15, 15.000_108_898_2, 0.003_64)],
    ),
    (
        "Oxygen",
        "O",
        8,
        15.9994,
        6,
        &[
            (16, 15.994_914_619_56, 0.997_57),
            (17, 16.999_131_70, 0.000_38),
            (18, 17.999_161_0, 0.002_05),
        ],
    ),
    (
        "Fluorine",
        "F",
        9,
        18.998_403_2,
        7,
        &[(19, 18.998_403_22, 1.0)],
    ),
    (
        "Sodium",
        "Na",
        11,
        22.989_769_28,
        1,
        &[(23, 22.989_769_280_9, 1.0)],
    ),
    (
        "Magnesium",
        "Mg",
        12,
        24.3050,
        2,
        &[
            (24, 23.985_041_700, 0.7899),
            (25, 24.985_836_92, 0.1000),
            (26, 25.982_592_929, 0.1101),
        ],
    ),
    (
        "Silicon",
        "Si",
        14,
        28.0855,
        4,
        &[
            (28, 27.976_926_532_5, 0.922_23),
            (29, 28.976_494_700, 0.046_85),
            (30, 29.973_770_17, 0.030_92),
        ],
    ),
    (
        "Phosphorus",
        "P",
        15,
        30.973_762,
        5,
        &[(31, 30.973_761_63, 1.0)],
    ),
    (
        "Sulfur",
        "S",
        16,
        32.065,
        6,
        &[
            (32, 31.972_071_00, 0.9499),
            (33, 32.971_458_76, 0.0075),
            (34, 33.967_866_90, 0.0425),
            (36, 35.967_080_76, 0.0001),
        ],
    ),
    (
        "Chlorine",
        "Cl",
        17,
        35.453,
        7,
        &[(35, 34.968_852_68, 0.7576), (37, 36.965_902_59, 0.2424)],
    ),
    (
        "Potassium",
        "K",
        19,
        39.0983,
        1,
        &[
            (39, 38.963_706_68, 0.932_581),
            (40, 39.963_998_48, 0.000_117),
            (41, 40.961_825_76, 0.067_302),
        ],
    ),
    (
        "Calcium",
        "Ca",
        20,
        40.078,
        2,
        &[
            (40, 39.962_590_98, 0.969_41),
            (42, 41.958_618_01, 0.006_47),
            (43, 42.958_766_6, 0.001_35),
            (44, 43.955_481_8, 0.020_86),
            (46, 45.953_692_6, 0.000_04),
            (48, 47.952_534, 0.001_87),
        ],
    ),
    (
        "Iron",
        "Fe",
        26,
        55.845,
        2,
        &[
            (54, 53.939_610_5, 0.058_45),
            (56, 55.934_937_5, 0.917_54),
            (57, 56.935_394_0, 0.021_19),
            (58, 57.933_275_6, 0.002_82),
        ],
    ),
    (
        "Copper",
        "Cu",
        29,
        63.546,
        1,
        &[(63, 62.929_597_5, 0.6915), (65, 64.927_789_5, 0.3085)],
    ),
    (
        "Zinc",
        "Zn",
        30,
        65.38,
        2,
        &[
            (64, 63.929_142_2, 0.482_68),
            (66, 65.926_033_4, 0.279_75),
            (67, 66.927_127_3, 0.041_02),
            (68, 67.924_844_2, 0.190_24),
            (70, 69.925_319_3, 0.006_31),
        ],
    ),
    (
        "Selenium",
        "Se",
        34,
        78.96,
        6,
        &[
            (74, 73.922_476_4, 0.0089),
            (76, 75.919_213_6, 0.0937),
            (77, 76.919_914_0, 0.0763),
            (78, 77.917_309_1, 0.2377),
            (80, 79.916_521_3, 0.4961),
            (82, 81.916_699_4, 0.0873),
        ],
    ),
    (
        "Bromine",
        "Br",
        35,
        79.904,
        7,
        &[(79, 78.918_337_1, 0.5069), (81, 80.916_290_6, 0.4931)],
    ),
    (
        "Iodine",
        "I",
        53,
        126.904_47,
        7,
        &[(127, 126.904_473, 1.0)],
    ),
];

/// The descriptions of all built-in elements, isotope ids are numbered in table order starting at 1.
pub(super) fn builtin_elements() -> Vec<ElementData> {
    let mut id = 0;
    ELEMENTS
        .iter()
        .map(
            |&(name, symbol, atomic_number, average_mass, valence_electrons, isotopes)| {
                ElementData {
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    atomic_number,
                    average_mass,
                    valence_electrons,
                    isotopes: isotopes
                        .iter()
                        .map(|&(mass_number, mass, abundance)| {
                            id += 1;
                            IsotopeData {
                                id,
                                mass,
                                mass_number,
                                abundance,
                            }
                        })
                        .collect(),
                }
            },
        )
        .collect()
}
