/// Factory: build the process-wide `DecisionEngine` from application `Config`.
use std::sync::Arc;

use crate::config::{Config, EngineKind};
use crate::services::decision::{
    DecisionEngine, StaticIdentityEngine, TimeoutEngine, TokenTableEngine,
};

pub fn build_decision_engine(config: &Config) -> Arc<dyn DecisionEngine> {
    let engine: Arc<dyn DecisionEngine> = match config.engine {
        EngineKind::Static => Arc::new(TimeoutEngine::new(
            StaticIdentityEngine::new(config.identity.clone()),
            config.policy_timeout,
        )),
        EngineKind::TokenTable => Arc::new(TimeoutEngine::new(
            TokenTableEngine::new(config.tokens.clone(), config.session_cookie.clone()),
            config.policy_timeout,
        )),
    };

    tracing::info!(engine = engine.name(), "decision engine ready");
    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::decision::parse_token_table;

    #[test]
    fn default_config_builds_static_engine() {
        let engine = build_decision_engine(&Config::default());
        assert_eq!(engine.name(), "static");
    }

    #[test]
    fn token_config_builds_token_engine() {
        let config = Config {
            engine: EngineKind::TokenTable,
            tokens: parse_token_table("t=alice:admin").unwrap(),
            ..Config::default()
        };
        assert_eq!(build_decision_engine(&config).name(), "token");
    }
}
