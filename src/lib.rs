// Library root
// -----------
// The binary (`main.rs`) only parses configuration, sets up logging and
// calls `pipeline::run`; everything else lives here so it can be tested.
//
// Module responsibilities:
// - `config`: command line / environment configuration, read once.
// - `credentials`: reads the docker CLI config file for a registry login.
// - `api`: blocking HTTP calls to the registry (login, description PATCH).
// - `description`: loads the description files and runs the update.
// - `pipeline`: chains the stages and stops at the first failure.
pub mod api;
pub mod config;
pub mod credentials;
pub mod description;
pub mod pipeline;
