//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::analysis::PatternAnalyzer;
use crate::checkin::CheckInService;
use crate::config::Config;
use crate::cycle::CycleCalculator;
use crate::recommend::RecommendationGenerator;
use crate::store::MemoryStore;
use crate::tools::ToolRegistry;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-user cycle, mood and pattern records
    pub store: Arc<MemoryStore>,
    /// Named tools exposed under /tools
    pub tools: Arc<ToolRegistry>,
    /// Check-in workflow over `store`
    pub checkin: Arc<CheckInService>,
    pub calculator: CycleCalculator,
    pub analyzer: PatternAnalyzer,
    pub generator: RecommendationGenerator,
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state around a fresh, empty store
    pub fn new(config: Config) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), config)
    }

    /// Create state around an existing store
    pub fn with_store(store: Arc<MemoryStore>, config: Config) -> Self {
        let calculator = CycleCalculator::from_config(&config.cycle);
        let checkin = CheckInService::new(Arc::clone(&store), calculator.clone(), &config.store);

        Self {
            store,
            tools: Arc::new(ToolRegistry::with_builtin(calculator.clone())),
            checkin: Arc::new(checkin),
            calculator,
            analyzer: PatternAnalyzer::new(),
            generator: RecommendationGenerator::new(),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
