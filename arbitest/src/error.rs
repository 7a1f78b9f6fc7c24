//! Error types for draw-time generation failures.

use std::fmt;

/// Errors that can occur while drawing values from a generator.
///
/// Misconfiguration (inverted ranges, empty choice lists, zero weights) is
/// reported by panicking at construction time instead; only failures that
/// depend on the random draws themselves travel through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A filter rejected every candidate within the retry budget
    TooManyFilterMisses { attempts: usize },

    /// A unique generator kept producing already-seen values
    TooManyUniqueMisses { attempts: usize },

    /// A set could not be filled up to its minimum size with distinct elements
    SetSizeUnreachable { min_size: usize, attempts: usize },

    /// Exhaustive enumeration was requested but the arbitrary cannot provide it
    ExhaustiveNotAvailable,
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::TooManyFilterMisses { attempts } => {
                write!(f, "Filter rejected all candidates after {} attempts", attempts)
            }
            GenError::TooManyUniqueMisses { attempts } => {
                write!(
                    f,
                    "Unique generator produced only duplicates after {} attempts",
                    attempts
                )
            }
            GenError::SetSizeUnreachable { min_size, attempts } => {
                write!(
                    f,
                    "Could not reach minimum set size {} after {} element draws",
                    min_size, attempts
                )
            }
            GenError::ExhaustiveNotAvailable => {
                write!(f, "Exhaustive generation is not available for this arbitrary")
            }
        }
    }
}

impl std::error::Error for GenError {}

impl GenError {
    /// Create a filter-miss error for the standard retry budget
    pub fn filter_misses(attempts: usize) -> Self {
        GenError::TooManyFilterMisses { attempts }
    }

    /// Create a unique-miss error for the standard retry budget
    pub fn unique_misses(attempts: usize) -> Self {
        GenError::TooManyUniqueMisses { attempts }
    }
}
