// Library root: view models, sample data, validation and the draft-creation
// wizard shared by the orchestrator and the terminal front end.

pub mod avatar;
pub mod config;
pub mod filter;
pub mod model;
pub mod protocol;
pub mod sample;
pub mod validation;
pub mod wizard;
