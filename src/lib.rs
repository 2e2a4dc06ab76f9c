// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// Module responsibilities:
// - `config`: command line flags and environment, resolved once at startup.
// - `api`: the blocking chat-completion client and the `Completion` trait.
// - `prompts`: the menu and recipe prompt templates.
// - `store`: saving and loading the menu text file.
// - `session`: the loop logic, independent of the terminal.
// - `ui`: the `dialoguer` front end that drives a `Session`.
pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod prompts;
pub mod session;
pub mod store;
pub mod ui;

pub use api::{Completion, CompletionClient};
pub use config::{ApiConfig, Cli, Config};
pub use error::{ApiError, InputError, StoreError};
pub use prompts::{build_menu_prompt, build_recipe_prompt, MenuRequest};
pub use session::{Action, Outcome, Prompter, Session};
pub use store::{load_menu, save_menu, MenuStore, DEFAULT_MENU_FILE};
