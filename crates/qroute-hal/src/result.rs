//! Simulation results.

use std::fmt;

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{SimError, SimResult};

/// Dense state vector returned by state-vector mode.
///
/// Basis index bit `q` holds the value of qubit `q`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAmplitudes")]
pub struct Amplitudes {
    num_qubits: usize,
    values: Vec<Complex64>,
}

#[derive(Deserialize)]
struct RawAmplitudes {
    num_qubits: usize,
    values: Vec<Complex64>,
}

impl TryFrom<RawAmplitudes> for Amplitudes {
    type Error = SimError;

    fn try_from(raw: RawAmplitudes) -> SimResult<Self> {
        let (num_qubits, len) = (raw.num_qubits, raw.values.len());
        Self::new(num_qubits, raw.values).ok_or_else(|| {
            SimError::Backend(format!("{len} amplitudes cannot describe {num_qubits} qubits"))
        })
    }
}

impl Amplitudes {
    /// Wrap raw amplitudes. Returns `None` unless `values.len() == 2^num_qubits`.
    pub fn new(num_qubits: usize, values: Vec<Complex64>) -> Option<Self> {
        let expected = 1usize.checked_shl(u32::try_from(num_qubits).ok()?)?;
        (values.len() == expected).then_some(Self { num_qubits, values })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Complex64> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.values
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.values.iter().map(|a| a.norm()).collect()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.values.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Sum of squared magnitudes; 1.0 for a normalized state.
    pub fn norm_sqr(&self) -> f64 {
        self.values.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Index and magnitude of the largest-magnitude amplitude.
    ///
    /// Ties resolve to the lowest index.
    pub fn argmax_magnitude(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, amp) in self.values.iter().enumerate() {
            let magnitude = amp.norm();
            match best {
                Some((_, m)) if magnitude <= m => {}
                _ => best = Some((index, magnitude)),
            }
        }
        best
    }

    /// Probability of reading 1 on `qubit`.
    pub fn marginal_one(&self, qubit: usize) -> Option<f64> {
        if qubit >= self.num_qubits {
            return None;
        }
        let mask = 1usize << qubit;
        Some(
            self.values
                .iter()
                .enumerate()
                .filter(|(i, _)| i & mask != 0)
                .map(|(_, a)| a.norm_sqr())
                .sum(),
        )
    }
}

/// Measurement counts keyed by bit-string.
///
/// Character `k` of a bit-string is classical bit `k`. Iteration follows the
/// order in which outcomes were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    entries: Vec<(String, u64)>,
    index: FxHashMap<String, usize>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let bitstring = bitstring.into();
        match self.index.get(&bitstring) {
            Some(&pos) => self.entries[pos].1 += count,
            None => {
                self.index.insert(bitstring.clone(), self.entries.len());
                self.entries.push((bitstring, count));
            }
        }
    }

    /// Count for `bitstring`, zero if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.index
            .get(bitstring)
            .map_or(0, |&pos| self.entries[pos].1)
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_shots(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Highest-count outcome. Ties go to the first-inserted outcome.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (bitstring, count) in self.iter() {
            match best {
                Some((_, c)) if count <= c => {}
                _ => best = Some((bitstring, count)),
            }
        }
        best
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

impl Serialize for Counts {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (bitstring, count) in &self.entries {
            map.serialize_entry(bitstring, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Counts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = Counts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of bit-strings to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Counts, A::Error> {
                let mut counts = Counts::new();
                while let Some((bitstring, count)) = access.next_entry::<String, u64>()? {
                    counts.insert(bitstring, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}
