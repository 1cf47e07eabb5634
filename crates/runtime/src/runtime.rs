//! High-level step-loop orchestrator.
//!
//! One [`NavRuntime::step`] runs the full observe → stitch → plan pipeline
//! and either emits a direction or escalates to the external decision
//! fallback. The whole pipeline is sequential within a step: the stitcher
//! is the only writer of the store and the planner reads it afterwards.

use nav_core::{
    AreaGridStore, Direction, MapStitcher, NavConfig, NavDecision, Navigator, NoPathReason,
    StitchOutcome,
};

use crate::api::{
    DecisionFallback, GoalProvider, NoFallback, ObservationFeed, ProviderKind, Result,
    RuntimeError,
};
use crate::repository::{InMemoryMapRepo, MapRepository};

/// Runtime configuration shared across the orchestrator.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub nav: NavConfig,
    /// Persist the store after every merged stitch. Disable to batch saves
    /// under an embedder-controlled schedule.
    pub persist_each_stitch: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            persist_each_stitch: true,
        }
    }
}

/// What one pipeline step produced.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub stitch: StitchOutcome,
    /// Direction to execute, from the planner or the fallback.
    pub direction: Option<Direction>,
    /// Set when the planner deferred; the direction (if any) then came from
    /// the external fallback.
    pub deferred: Option<NoPathReason>,
    /// Standing on the resolved goal cell.
    pub arrived: bool,
}

/// Owner of the navigation pipeline: store, stitcher, navigator, and the
/// provider/repository seams.
pub struct NavRuntime {
    config: RuntimeConfig,
    store: AreaGridStore,
    stitcher: MapStitcher,
    navigator: Navigator,
    observations: Box<dyn ObservationFeed>,
    goals: Box<dyn GoalProvider>,
    fallback: Box<dyn DecisionFallback>,
    repository: Box<dyn MapRepository>,
}

impl NavRuntime {
    pub fn builder() -> NavRuntimeBuilder {
        NavRuntimeBuilder::new()
    }

    /// Executes one observe → stitch → plan cycle.
    ///
    /// Corrupt observation windows skip the merge but still plan against
    /// the existing map knowledge; repository failures propagate as hard
    /// errors.
    pub async fn step(&mut self) -> Result<StepOutcome> {
        let observation = self.observations.observe().await?;

        let stitch = self.stitcher.integrate_observation(
            &mut self.store,
            observation.map,
            observation.player_local,
            &observation.window,
        );

        match stitch {
            StitchOutcome::Merged { new_area, cells_written } => {
                tracing::debug!(
                    map = %observation.map,
                    new_area,
                    cells_written,
                    "merged observation window"
                );
                if self.config.persist_each_stitch {
                    self.repository.save(&self.store)?;
                }
            }
            StitchOutcome::SkippedCorrupt { unreadable, total } => {
                tracing::warn!(
                    map = %observation.map,
                    unreadable,
                    total,
                    "skipped corrupt observation window"
                );
            }
        }

        let goal = self.goals.current_goal().await?;
        let position = self
            .store
            .grid(observation.map)
            .map(|grid| grid.local_to_grid(observation.player_local))
            .unwrap_or(observation.player_local);

        let decision = self
            .navigator
            .decide(&self.store, observation.map, position, goal);

        let outcome = match decision {
            NavDecision::Step { direction, .. } => StepOutcome {
                stitch,
                direction: Some(direction),
                deferred: None,
                arrived: false,
            },
            NavDecision::Arrived => StepOutcome {
                stitch,
                direction: None,
                deferred: None,
                arrived: true,
            },
            NavDecision::Defer(reason) => {
                tracing::debug!(%reason, "planner deferred; consulting fallback");
                let direction = self.fallback.decide(observation.map, position).await?;
                StepOutcome {
                    stitch,
                    direction,
                    deferred: Some(reason),
                    arrived: false,
                }
            }
        };

        Ok(outcome)
    }

    /// Runs `count` steps, returning the outcomes in order.
    pub async fn run_steps(&mut self, count: usize) -> Result<Vec<StepOutcome>> {
        let mut outcomes = Vec::with_capacity(count);
        for _ in 0..count {
            outcomes.push(self.step().await?);
        }
        Ok(outcomes)
    }

    /// Read access to accumulated map knowledge.
    pub fn store(&self) -> &AreaGridStore {
        &self.store
    }

    /// Persists the current store explicitly (for embedders that batch).
    pub fn persist(&self) -> Result<()> {
        self.repository.save(&self.store)?;
        Ok(())
    }
}

/// Builder for [`NavRuntime`] with flexible provider configuration.
pub struct NavRuntimeBuilder {
    config: RuntimeConfig,
    observations: Option<Box<dyn ObservationFeed>>,
    goals: Option<Box<dyn GoalProvider>>,
    fallback: Box<dyn DecisionFallback>,
    repository: Box<dyn MapRepository>,
}

impl NavRuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            observations: None,
            goals: None,
            fallback: Box::new(NoFallback),
            repository: Box::new(InMemoryMapRepo::new()),
        }
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observations(mut self, feed: impl ObservationFeed + 'static) -> Self {
        self.observations = Some(Box::new(feed));
        self
    }

    pub fn with_goals(mut self, provider: impl GoalProvider + 'static) -> Self {
        self.goals = Some(Box::new(provider));
        self
    }

    pub fn with_fallback(mut self, fallback: impl DecisionFallback + 'static) -> Self {
        self.fallback = Box::new(fallback);
        self
    }

    pub fn with_repository(mut self, repository: impl MapRepository + 'static) -> Self {
        self.repository = Box::new(repository);
        self
    }

    /// Builds the runtime, loading any previously persisted map store.
    pub fn build(self) -> Result<NavRuntime> {
        let observations = self.observations.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Observation,
        })?;
        let goals = self.goals.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Goal,
        })?;

        let store = self.repository.load()?.unwrap_or_default();
        let stitcher = MapStitcher::new(self.config.nav);
        let navigator = Navigator::new(&self.config.nav);

        Ok(NavRuntime {
            config: self.config,
            store,
            stitcher,
            navigator,
            observations,
            goals,
            fallback: self.fallback,
            repository: self.repository,
        })
    }
}

impl Default for NavRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
