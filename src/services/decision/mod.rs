/*!
 * Auth decisions
 *
 * Responsibility:
 * - `DecisionEngine`: snapshot → `AuthDecision`
 * - Engines selectable at startup (static identity, token table), always
 *   bounded by `TimeoutEngine`
 */

pub mod engine;
pub mod factory;
pub mod static_identity;
pub mod timeout;
pub mod token_table;
pub mod types;

pub use engine::DecisionEngine;
pub use factory::build_decision_engine;
pub use static_identity::StaticIdentityEngine;
pub use timeout::TimeoutEngine;
pub use token_table::{TokenTableEngine, TokenTableError, parse_token_table};
pub use types::{AuthDecision, Identity, IdentityError};
