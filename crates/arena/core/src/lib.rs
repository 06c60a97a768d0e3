//! Deterministic combat resolution and entity-state engine.
//!
//! `arena-core` defines the canonical rules of a turn-based team match:
//! the champion data model (stats, keywords, shields, meter, cooldowns),
//! lifecycle event dispatch, the damage resolution pipeline, and per-turn
//! bookkeeping. Content crates depend on the types re-exported here and
//! supply champions and skills as data plus callbacks; presentation,
//! transport, and matchmaking live entirely outside this crate.

pub mod champion;
pub mod combat;
pub mod config;
pub mod events;
pub mod extension;
pub mod rng;
pub mod skill;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod turn;
pub mod types;

pub use champion::{
    ABSOLUTE_IMMUNITY, Champion, CooldownTable, DamageModifier, DamageReduction, DamageTransform,
    HpChange, HpChangeMode, Keyword, KeywordSet, KeywordSpec, ResourceMeter, Shield, ShieldKind,
    ShieldStack, TakeDamageResult,
};
pub use combat::{
    DamageMode, DamageOutcome, DamageRequest, REDUCTION_CAP, defense_reduction, mitigate,
    resolve_damage,
};
pub use config::{EngineConfig, SimulationConfig};
pub use events::{
    DispatchOutcome, EventHooks, EventPayload, GameEvent, HookCommand, HookCtx, HookError,
    HookFailure, HookReaction, HookResult, HookSource, dispatch,
};
pub use extension::ExtensionStore;
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use skill::{SkillCtx, SkillError, SkillExecute, SkillSpec, TargetRule, use_skill};
pub use snapshot::{ChampionSnapshot, CooldownSnapshot, MatchSnapshot};
pub use state::MatchState;
pub use stats::{
    StatBlock, StatBounds, StatChange, StatChangeResult, StatKind, StatModifier, StatValues,
    round5,
};
pub use turn::{PendingDamage, TurnReport, advance_turn, drain_extra_damage};
pub use types::{ChampionId, Elements, TeamId, Turn};
