//! Error types for the graphstep core library.
//!
//! Only graph construction can fail. Traversal never raises errors: a step
//! requested while stepping is disabled is rejected by returning `None`.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while configuring a graph or building an adjacency matrix.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// A graph must contain at least one vertex.
    #[error("a graph needs at least one vertex")]
    EmptyGraph,
    /// The vertex count exceeds the largest supported graph.
    #[error("graph has {vertex_count} vertices but at most {max} are supported")]
    TooManyVertices {
        /// The rejected vertex count.
        vertex_count: usize,
        /// Largest accepted vertex count.
        max: usize,
    },
    /// The density constant must be a finite, strictly positive number.
    #[error("density constant must be finite and positive (got {density})")]
    InvalidDensity {
        /// The rejected density constant.
        density: f64,
    },
    /// The seed is a multiple of the stream modulus, which would pin the
    /// generator state at zero.
    #[error("seed {seed} is a multiple of the stream modulus {modulus}")]
    DegenerateSeed {
        /// The rejected seed.
        seed: u64,
        /// The modulus of the random stream.
        modulus: u64,
    },
    /// A row of a hand-built matrix had the wrong number of cells.
    #[error("row {row} has {len} cells but the matrix has {expected} rows")]
    NotSquare {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of cells found in that row.
        len: usize,
        /// Number of cells every row must have.
        expected: usize,
    },
    /// A cell of a hand-built matrix held something other than 0 or 1.
    #[error("cell ({row}, {column}) holds {value}; only 0 and 1 are allowed")]
    InvalidCell {
        /// Zero-based row of the offending cell.
        row: usize,
        /// Zero-based column of the offending cell.
        column: usize,
        /// The rejected value.
        value: u8,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A graph must contain at least one vertex.
        EmptyGraph => EmptyGraph => "GRAPH_EMPTY",
        /// The vertex count exceeds the supported maximum.
        TooManyVertices => TooManyVertices { .. } => "GRAPH_TOO_MANY_VERTICES",
        /// The density constant must be finite and positive.
        InvalidDensity => InvalidDensity { .. } => "GRAPH_INVALID_DENSITY",
        /// The seed would pin the generator state at zero.
        DegenerateSeed => DegenerateSeed { .. } => "GRAPH_DEGENERATE_SEED",
        /// A hand-built matrix was not square.
        NotSquare => NotSquare { .. } => "GRAPH_NOT_SQUARE",
        /// A hand-built matrix held a value other than 0 or 1.
        InvalidCell => InvalidCell { .. } => "GRAPH_INVALID_CELL",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(GraphError::EmptyGraph, "GRAPH_EMPTY")]
    #[case(
        GraphError::TooManyVertices { vertex_count: 5000, max: 4096 },
        "GRAPH_TOO_MANY_VERTICES"
    )]
    #[case(GraphError::InvalidDensity { density: -1.0 }, "GRAPH_INVALID_DENSITY")]
    #[case(
        GraphError::DegenerateSeed { seed: 0, modulus: 2_147_483_647 },
        "GRAPH_DEGENERATE_SEED"
    )]
    #[case(GraphError::NotSquare { row: 1, len: 2, expected: 3 }, "GRAPH_NOT_SQUARE")]
    #[case(GraphError::InvalidCell { row: 0, column: 0, value: 7 }, "GRAPH_INVALID_CELL")]
    fn codes_are_stable(#[case] err: GraphError, #[case] expected: &str) {
        assert_eq!(err.code().as_str(), expected);
        assert_eq!(err.code().to_string(), expected);
    }

    #[test]
    fn messages_name_the_offending_values() {
        let err = GraphError::InvalidCell {
            row: 2,
            column: 4,
            value: 9,
        };
        assert_eq!(
            err.to_string(),
            "cell (2, 4) holds 9; only 0 and 1 are allowed"
        );
    }
}
