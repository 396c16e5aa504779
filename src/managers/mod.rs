// Translator state managers
// Managers handle stateful operations: input coordination and history persistence.

pub mod history_store;
pub mod input_coordinator;
