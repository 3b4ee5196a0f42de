//! Wire identifiers.
//!
//! Qubit `q` is bit `q` of a statevector basis index, and classical bit `c`
//! is character `c` of a measured bit-string.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! wire {
    ($id:ident, $wire:ident, $prefix:literal, $what:literal) => {
        #[doc = concat!("Index of a ", $what, " within a circuit.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $id(pub u32);

        impl $id {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $id {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl TryFrom<usize> for $id {
            type Error = std::num::TryFromIntError;

            fn try_from(index: usize) -> Result<Self, Self::Error> {
                u32::try_from(index).map($id)
            }
        }

        #[doc = concat!("A ", $what, ", optionally named by a register position.")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $wire {
            pub id: $id,
            /// Register name and offset within it.
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub register: Option<(String, u32)>,
        }

        impl $wire {
            pub fn new(id: $id) -> Self {
                Self { id, register: None }
            }

            pub fn with_register(id: $id, register: impl Into<String>, offset: u32) -> Self {
                Self {
                    id,
                    register: Some((register.into(), offset)),
                }
            }
        }

        impl fmt::Display for $wire {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match &self.register {
                    Some((name, offset)) => write!(f, "{name}[{offset}]"),
                    None => write!(f, "{}", self.id),
                }
            }
        }
    };
}

wire!(QubitId, Qubit, "q", "qubit");
wire!(ClbitId, Clbit, "c", "classical bit");
