//! Built-in sample dataset.

use super::Row;

const SAMPLE: &[(&str, &str, &str)] = &[
    ("001", "Acme Corporation", "Technology"),
    ("002", "Bright Solutions Inc", "Finance"),
    ("003", "Creative Minds LLC", "Marketing"),
    ("004", "Dynamic Systems", "Healthcare"),
    ("005", "Elite Innovations", "Technology"),
    ("006", "Future Tech Group", "Technology"),
    ("007", "Global Finance Corp", "Finance"),
    ("008", "Healthcare Plus", "Healthcare"),
    ("009", "Innovation Labs", "Research"),
    ("010", "Jupiter Industries", "Manufacturing"),
    ("011", "Keystone Partners", "Consulting"),
    ("012", "Lighthouse Media", "Marketing"),
    ("013", "Momentum Capital", "Finance"),
    ("014", "NextGen Solutions", "Technology"),
    ("015", "Optimal Health", "Healthcare"),
    ("016", "Pioneer Analytics", "Data Science"),
    ("017", "Quantum Computing", "Technology"),
    ("018", "Retail Giants Co", "Retail"),
    ("019", "Strategic Advisors", "Consulting"),
    ("020", "TechVision Systems", "Technology"),
    ("021", "Unity Pharmaceuticals", "Healthcare"),
    ("022", "Vertex Capital", "Finance"),
    ("023", "Wellness Group", "Healthcare"),
    ("024", "Xcelerate Marketing", "Marketing"),
    ("025", "Yield Investments", "Finance"),
    ("026", "Zenith Technologies", "Technology"),
    ("027", "Alpha Logistics", "Transportation"),
    ("028", "Beta Manufacturing", "Manufacturing"),
    ("029", "Gamma Research", "Research"),
    ("030", "Delta Services", "Consulting"),
    ("031", "Epsilon Energy", "Energy"),
    ("032", "Zeta Aerospace", "Aerospace"),
    ("033", "Eta Education", "Education"),
    ("034", "Theta Security", "Security"),
    ("035", "Iota Insurance", "Insurance"),
    ("036", "Kappa Real Estate", "Real Estate"),
    ("037", "Lambda Legal", "Legal"),
    ("038", "Mu Media Productions", "Entertainment"),
    ("039", "Nu Nutrition", "Healthcare"),
    ("040", "Xi Telecommunications", "Technology"),
    ("041", "Omicron Optics", "Manufacturing"),
    ("042", "Pi Pharmaceuticals", "Healthcare"),
    ("043", "Rho Robotics", "Technology"),
    ("044", "Sigma Software", "Technology"),
    ("045", "Tau Transportation", "Transportation"),
];

/// The built-in dataset of 45 sample companies.
pub fn sample_rows() -> Vec<Row> {
    SAMPLE
        .iter()
        .map(|(id, name, category)| Row::new(*id, *name, *category))
        .collect()
}
