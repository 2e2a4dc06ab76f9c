// Session logic: one call to `Session::run` is one pass through the
// interactive loop. Input comes from a `Prompter` and the result comes
// back as an `Outcome`, so nothing here touches the terminal.

use crate::api::Completion;
use crate::error::{ApiError, InputError, StoreError};
use crate::prompts::{build_recipe_prompt, MenuRequest};
use crate::store::MenuStore;
use std::path::PathBuf;
use tracing::{debug, info};

/// Top level menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    Save,
    Load,
    SuggestRecipes,
    Exit,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Generate,
        Action::Save,
        Action::Load,
        Action::SuggestRecipes,
        Action::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::Generate => "1. Generar un nuevo menú",
            Action::Save => "2. Guardar menú",
            Action::Load => "3. Cargar menú",
            Action::SuggestRecipes => "4. Sugerir recetas",
            Action::Exit => "5. Salir",
        }
    }

    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }
}

/// Source of user input for the flows that need it.
pub trait Prompter {
    /// Diet type, day count and meals per day for a new menu.
    fn menu_request(&mut self) -> Result<MenuRequest, InputError>;

    /// Diet type for recipe suggestions.
    fn diet_type(&mut self) -> Result<String, InputError>;
}

/// What a single pass through the loop produced.
#[derive(Debug)]
pub enum Outcome {
    Menu(String),
    MenuFailed(ApiError),
    /// Day or meal count was not a number; nothing was generated.
    InvalidNumber,
    Saved { menu: String, path: PathBuf },
    SaveFailed { menu: String, error: StoreError },
    Loaded(String),
    NotFound(PathBuf),
    LoadFailed(StoreError),
    Recipes(String),
    RecipesFailed(ApiError),
    Exit,
}

pub struct Session<C> {
    client: C,
    store: MenuStore,
}

impl<C: Completion> Session<C> {
    pub fn new(client: C, store: MenuStore) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &MenuStore {
        &self.store
    }

    /// Ask the completion service for a menu.
    pub fn generate(&self, request: &MenuRequest) -> Result<String, ApiError> {
        info!(
            diet = %request.diet_type,
            days = request.num_days,
            meals = request.meals_per_day,
            "Generating menu"
        );
        self.client.complete(&request.prompt())
    }

    pub fn suggest_recipes(&self, diet_type: &str) -> Result<String, ApiError> {
        info!(diet = %diet_type, "Suggesting recipes");
        self.client.complete(&build_recipe_prompt(diet_type))
    }

    /// Run one action to completion. Only console failures come back as
    /// errors; everything else is reported through the `Outcome`.
    pub fn run<P: Prompter>(&self, action: Action, prompter: &mut P) -> Result<Outcome, InputError> {
        info!(?action, "Running action");
        match action {
            Action::Generate => {
                let request = match read_request(prompter)? {
                    Some(request) => request,
                    None => return Ok(Outcome::InvalidNumber),
                };
                Ok(match self.generate(&request) {
                    Ok(menu) => Outcome::Menu(menu),
                    Err(e) => Outcome::MenuFailed(e),
                })
            }
            Action::Save => {
                // Always generates a fresh menu; the last one shown is not kept.
                let request = match read_request(prompter)? {
                    Some(request) => request,
                    None => return Ok(Outcome::InvalidNumber),
                };
                let menu = match self.generate(&request) {
                    Ok(menu) => menu,
                    Err(e) => return Ok(Outcome::MenuFailed(e)),
                };
                Ok(match self.store.save(&menu) {
                    Ok(()) => Outcome::Saved {
                        menu,
                        path: self.store.path().to_path_buf(),
                    },
                    Err(error) => {
                        debug!("Saving menu failed: {}", error);
                        Outcome::SaveFailed { menu, error }
                    }
                })
            }
            Action::Load => Ok(match self.store.load() {
                Ok(text) => Outcome::Loaded(text),
                Err(StoreError::NotFound { path }) => Outcome::NotFound(path),
                Err(error) => {
                    debug!("Loading menu failed: {}", error);
                    Outcome::LoadFailed(error)
                }
            }),
            Action::SuggestRecipes => {
                let diet_type = prompter.diet_type()?;
                Ok(match self.suggest_recipes(&diet_type) {
                    Ok(recipes) => Outcome::Recipes(recipes),
                    Err(e) => Outcome::RecipesFailed(e),
                })
            }
            Action::Exit => Ok(Outcome::Exit),
        }
    }
}

/// `None` when the counts were not numbers; console errors propagate.
fn read_request<P: Prompter>(prompter: &mut P) -> Result<Option<MenuRequest>, InputError> {
    match prompter.menu_request() {
        Ok(request) => Ok(Some(request)),
        Err(InputError::InvalidNumber(e)) => {
            info!("Invalid count entered: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use tempfile::TempDir;

    /// Returns canned replies and records every prompt it is given.
    struct FakeCompletion {
        replies: RefCell<VecDeque<Result<String, ApiError>>>,
        prompts: RefCell<Vec<String>>,
    }

    impl FakeCompletion {
        fn new(replies: Vec<Result<String, ApiError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.borrow().len()
        }
    }

    impl Completion for FakeCompletion {
        fn complete(&self, prompt: &str) -> Result<String, ApiError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::ResponseShape("no reply scripted".into())))
        }
    }

    /// Feeds raw answers the way a user would type them.
    struct ScriptedPrompter {
        answers: VecDeque<&'static str>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
            }
        }

        fn next(&mut self) -> Result<&'static str, InputError> {
            self.answers
                .pop_front()
                .ok_or_else(|| InputError::Console(io::Error::from(io::ErrorKind::UnexpectedEof)))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn menu_request(&mut self) -> Result<MenuRequest, InputError> {
            let diet = self.next()?;
            let days = self.next()?;
            let meals = self.next()?;
            MenuRequest::parse(diet, days, meals)
        }

        fn diet_type(&mut self) -> Result<String, InputError> {
            Ok(self.next()?.to_string())
        }
    }

    fn unauthorized() -> ApiError {
        ApiError::from_status(401, "invalid api key".into())
    }

    fn temp_store(dir: &TempDir) -> MenuStore {
        MenuStore::new(dir.path().join("menu_semanal.txt"))
    }

    #[test]
    fn test_action_order_and_labels() {
        assert_eq!(Action::from_index(0), Some(Action::Generate));
        assert_eq!(Action::from_index(4), Some(Action::Exit));
        assert_eq!(Action::from_index(5), None);
        for (i, action) in Action::ALL.iter().enumerate() {
            assert!(action.label().starts_with(&format!("{}.", i + 1)));
        }
    }

    #[test]
    fn test_generate_returns_menu_and_sends_menu_prompt() {
        let dir = TempDir::new().unwrap();
        let client = FakeCompletion::new(vec![Ok("Lunes: lentejas".into())]);
        let session = Session::new(&client, temp_store(&dir));
        let mut input = ScriptedPrompter::new(&["vegana", "5", "3"]);

        let outcome = session.run(Action::Generate, &mut input).unwrap();
        assert!(matches!(outcome, Outcome::Menu(ref m) if m == "Lunes: lentejas"));

        let prompts = client.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("5 días"));
        assert!(prompts[0].contains("dieta vegana"));
        assert!(prompts[0].contains("3 comidas"));
    }

    #[test]
    fn test_generate_failure_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let client = FakeCompletion::new(vec![Err(unauthorized())]);
        let session = Session::new(&client, temp_store(&dir));
        let mut input = ScriptedPrompter::new(&["vegana", "5", "3"]);

        let outcome = session.run(Action::Generate, &mut input).unwrap();
        assert!(matches!(outcome, Outcome::MenuFailed(ref e) if e.is_auth()));
    }

    #[test]
    fn test_invalid_number_skips_generation() {
        let dir = TempDir::new().unwrap();
        let client = FakeCompletion::new(vec![Ok("no debería usarse".into())]);
        let session = Session::new(&client, temp_store(&dir));
        let mut input = ScriptedPrompter::new(&["vegana", "cinco", "3"]);

        let outcome = session.run(Action::Generate, &mut input).unwrap();
        assert!(matches!(outcome, Outcome::InvalidNumber));
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn test_empty_count_aborts_generation() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.save("menú anterior").unwrap();

        let client = FakeCompletion::new(vec![Ok("nuevo".into())]);
        let session = Session::new(&client, store);
        let mut input = ScriptedPrompter::new(&["vegana", "5", ""]);

        let outcome = session.run(Action::Save, &mut input).unwrap();
        assert!(matches!(outcome, Outcome::InvalidNumber));
        assert_eq!(client.calls(), 0);
        assert_eq!(session.store().load().unwrap(), "menú anterior");
    }

    #[test]
    fn test_save_writes_generated_menu() {
        let dir = TempDir::new().unwrap();
        let client = FakeCompletion::new(vec![Ok("Menú de 3 días".into())]);
        let session = Session::new(&client, temp_store(&dir));
        let mut input = ScriptedPrompter::new(&["sin gluten", "3", "2"]);

        match session.run(Action::Save, &mut input).unwrap() {
            Outcome::Saved { menu, path } => {
                assert_eq!(menu, "Menú de 3 días");
                assert_eq!(path, dir.path().join("menu_semanal.txt"));
            }
            other => panic!("expected Saved, got {:?}", other),
        }
        assert_eq!(session.store().load().unwrap(), "Menú de 3 días");
    }

    #[test]
    fn test_save_regenerates_every_time() {
        let dir = TempDir::new().unwrap();
        let client = FakeCompletion::new(vec![Ok("primero".into()), Ok("segundo".into())]);
        let session = Session::new(&client, temp_store(&dir));
        let mut input = ScriptedPrompter::new(&["vegana", "5", "3", "vegana", "5", "3"]);

        session.run(Action::Generate, &mut input).unwrap();
        session.run(Action::Save, &mut input).unwrap();

        assert_eq!(client.calls(), 2);
        assert_eq!(session.store().load().unwrap(), "segundo");
    }

    #[test]
    fn test_save_does_not_write_when_generation_fails() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.save("menú anterior").unwrap();

        let client = FakeCompletion::new(vec![Err(ApiError::ResponseShape("vacío".into()))]);
        let session = Session::new(&client, store);
        let mut input = ScriptedPrompter::new(&["vegana", "5", "3"]);

        let outcome = session.run(Action::Save, &mut input).unwrap();
        assert!(matches!(outcome, Outcome::MenuFailed(_)));
        assert_eq!(session.store().load().unwrap(), "menú anterior");
    }

    #[test]
    fn test_save_with_invalid_number_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.save("menú anterior").unwrap();

        let client = FakeCompletion::new(vec![Ok("nuevo".into())]);
        let session = Session::new(&client, store);
        let mut input = ScriptedPrompter::new(&["vegana", "siete", "3"]);

        let outcome = session.run(Action::Save, &mut input).unwrap();
        assert!(matches!(outcome, Outcome::InvalidNumber));
        assert_eq!(client.calls(), 0);
        assert_eq!(session.store().load().unwrap(), "menú anterior");
    }

    #[test]
    fn test_save_failure_keeps_menu_for_display() {
        let dir = TempDir::new().unwrap();
        let client = FakeCompletion::new(vec![Ok("menú".into())]);
        let store = MenuStore::new(dir.path().join("falta").join("menu.txt"));
        let session = Session::new(&client, store);
        let mut input = ScriptedPrompter::new(&["vegana", "5", "3"]);

        match session.run(Action::Save, &mut input).unwrap() {
            Outcome::SaveFailed { menu, error } => {
                assert_eq!(menu, "menú");
                assert!(matches!(error, StoreError::Io { .. }));
            }
            other => panic!("expected SaveFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let client = FakeCompletion::new(vec![]);
        let session = Session::new(&client, temp_store(&dir));
        let mut input = ScriptedPrompter::new(&[]);

        let outcome = session.run(Action::Load, &mut input).unwrap();
        assert!(matches!(outcome, Outcome::NotFound(ref p) if p == &dir.path().join("menu_semanal.txt")));
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn test_load_returns_stored_menu() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.save("Martes: arroz").unwrap();
        let session = Session::new(FakeCompletion::new(vec![]), store);

        let outcome = session.run(Action::Load, &mut ScriptedPrompter::new(&[])).unwrap();
        assert!(matches!(outcome, Outcome::Loaded(ref t) if t == "Martes: arroz"));
    }

    #[test]
    fn test_load_other_failure_is_load_failed() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(FakeCompletion::new(vec![]), MenuStore::new(dir.path()));

        let outcome = session.run(Action::Load, &mut ScriptedPrompter::new(&[])).unwrap();
        assert!(matches!(outcome, Outcome::LoadFailed(StoreError::Io { .. })));
    }

    #[test]
    fn test_suggest_recipes() {
        let dir = TempDir::new().unwrap();
        let client = FakeCompletion::new(vec![Ok("Pan de arroz".into()), Err(unauthorized())]);
        let session = Session::new(&client, temp_store(&dir));
        let mut input = ScriptedPrompter::new(&["sin gluten", "sin gluten"]);

        let outcome = session.run(Action::SuggestRecipes, &mut input).unwrap();
        assert!(matches!(outcome, Outcome::Recipes(ref r) if r == "Pan de arroz"));
        assert_eq!(
            client.prompts.borrow()[0],
            "Sugiere algunas recetas para una dieta sin gluten."
        );

        let outcome = session.run(Action::SuggestRecipes, &mut input).unwrap();
        assert!(matches!(outcome, Outcome::RecipesFailed(_)));
    }

    #[test]
    fn test_console_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(FakeCompletion::new(vec![]), temp_store(&dir));
        let mut input = ScriptedPrompter::new(&["vegana"]);

        let result = session.run(Action::Generate, &mut input);
        assert!(matches!(result, Err(InputError::Console(_))));
    }

    #[test]
    fn test_exit() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(FakeCompletion::new(vec![]), temp_store(&dir));
        let outcome = session.run(Action::Exit, &mut ScriptedPrompter::new(&[])).unwrap();
        assert!(matches!(outcome, Outcome::Exit));
    }
}
