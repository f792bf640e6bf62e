//! Mapping-strategy configuration.
//!
//! The configuration surface is a plain serde-deserializable struct;
//! locating and reading config files belongs to the embedder. Keys are
//! camelCase on the wire, matching the frontend tool's config format.
//!
//! Every strategy has a default that favors fidelity over convenience:
//! `float64` numbers, `tagged` unions, `pointer` nullability, error
//! returns, and optimization level 1 (dead-code elimination and
//! constant folding on).

use serde::Deserialize;

/// Target type for the source `number` primitive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberStrategy {
    /// Always `float64`.
    #[default]
    Float64,
    /// Always `int` (lossy; W4002 on fractional literals).
    Int,
    /// Inspect initializer shape at declaration sites: whole-number
    /// literals narrow to `int`, anything else stays `float64`.
    Contextual,
}

/// Lowering of union types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnionStrategy {
    /// Record with a tag and one nullable field per arm, plus
    /// `IsTypeN`/`AsTypeN` helpers.
    #[default]
    Tagged,
    /// Marker interface with one implementing record per arm.
    Interface,
    /// The top type; discrimination via runtime reflection.
    Any,
}

/// Representation of optional/nullable values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NullabilityStrategy {
    /// `*T`; absence is nil.
    #[default]
    Pointer,
    /// The zero value stands in for absence (lossy; W4003).
    Zero,
    /// A `Null<T>`-style record with a present flag.
    SqlNull,
}

/// Lowering of async/await.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AsyncStrategy {
    /// Synchronous descent: context parameter + error return.
    #[default]
    Sync,
    /// Future-based lowering; currently behaves as `Sync`.
    Future,
    /// Task-group lowering; currently behaves as `Sync`.
    Errgroup,
}

/// try/catch lowering shape.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorHandling {
    /// Closure returning `error`; catch runs under `if err != nil`.
    #[default]
    Return,
    /// Deferred `recover()` inside an anonymous function.
    Panic,
}

/// Optimization level: each level enables the previous level's passes.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Deserialize)]
#[serde(try_from = "u8")]
pub enum OptLevel {
    /// No passes.
    O0,
    /// Dead-code elimination + constant folding.
    #[default]
    O1,
    /// Level 1 plus type simplification, control-flow normalization,
    /// and inlining.
    O2,
}

impl TryFrom<u8> for OptLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(OptLevel::O0),
            1 => Ok(OptLevel::O1),
            2 => Ok(OptLevel::O2),
            other => Err(format!("optimizationLevel must be 0, 1, or 2, got {other}")),
        }
    }
}

/// The full configuration surface of the core.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub number_strategy: NumberStrategy,
    pub union_strategy: UnionStrategy,
    pub nullability_strategy: NullabilityStrategy,
    pub async_strategy: AsyncStrategy,
    pub error_handling: ErrorHandling,
    pub optimization_level: OptLevel,

    /// Abort a module's pipeline when any error diagnostic is raised.
    pub strict: bool,
    /// Accept `any`-typed values without a W4001 warning.
    pub allow_any: bool,
    /// Emit methods with pointer receivers.
    pub use_pointer_receivers: bool,
    /// Ship the companion runtime helper package with the output.
    pub generate_runtime: bool,
    /// Record raw source mappings while emitting.
    pub source_map: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            number_strategy: NumberStrategy::default(),
            union_strategy: UnionStrategy::default(),
            nullability_strategy: NullabilityStrategy::default(),
            async_strategy: AsyncStrategy::default(),
            error_handling: ErrorHandling::default(),
            optimization_level: OptLevel::default(),
            strict: false,
            allow_any: true,
            use_pointer_receivers: true,
            generate_runtime: false,
            source_map: false,
        }
    }
}
