// UI layer: the interactive menu built on `dialoguer`. It collects input,
// hands it to the `Session` and prints whatever `Outcome` comes back.

use crate::api::Completion;
use crate::error::{ApiError, InputError};
use crate::prompts::MenuRequest;
use crate::session::{Action, Outcome, Prompter, Session};
use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Main interactive menu. Runs a select loop over the five actions until
/// the user chooses "Salir".
///
/// Note: `Select::interact()` is keyboard-driven: arrow keys and Enter.
pub fn main_menu<C: Completion>(session: &Session<C>) -> Result<()> {
    let items: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
    let mut prompter = ConsolePrompter;
    loop {
        println!();
        let selection = Select::new()
            .with_prompt("Elige una opción (1-5)")
            .items(&items)
            .default(0)
            .interact()?;
        let Some(action) = Action::from_index(selection) else {
            println!("Opción no válida. Por favor, elige otra.");
            continue;
        };

        match session.run(action, &mut prompter) {
            Ok(Outcome::Exit) => {
                println!("Saliendo del programa.");
                break;
            }
            Ok(outcome) => render(outcome)?,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Print an outcome as prose for the user.
fn render(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Menu(menu) => print_menu(&menu),
        Outcome::MenuFailed(e) => print_menu_failure(&e),
        Outcome::InvalidNumber => {
            println!("Por favor, introduce un número válido para los días y las comidas.");
        }
        Outcome::Saved { menu, path } => {
            print_menu(&menu);
            println!("Menú guardado en '{}'.", path.display());
        }
        Outcome::SaveFailed { menu, error } => {
            print_menu(&menu);
            println!("Error al guardar el menú: {}", error);
        }
        Outcome::Loaded(menu) => {
            clear_screen()?;
            println!("Menú cargado:\n");
            println!("{}", menu);
        }
        Outcome::NotFound(path) => {
            println!("El archivo '{}' no fue encontrado.", path.display());
        }
        Outcome::LoadFailed(e) => println!("Error al cargar el menú: {}", e),
        Outcome::Recipes(recipes) => {
            println!("\nRecetas sugeridas:\n");
            println!("{}", recipes);
        }
        Outcome::RecipesFailed(e) => println!("Error al obtener recetas: {}", e),
        Outcome::Exit => {}
    }
    Ok(())
}

fn print_menu(menu: &str) {
    println!("\nAquí tienes tu menú semanal:\n");
    println!("{}", menu);
}

fn print_menu_failure(e: &ApiError) {
    println!("Error al generar el menú: {}", e);
    if e.is_auth() {
        println!("Comprueba la variable de entorno API_KEY.");
    }
    println!("No se pudo generar el menú.");
}

fn clear_screen() -> io::Result<()> {
    let mut out = io::stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}

/// Reads answers from the terminal with `dialoguer` text prompts.
///
/// Counts are read as text and parsed afterwards: a bad value aborts the
/// current generation instead of asking again.
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn menu_request(&mut self) -> Result<MenuRequest, InputError> {
        let diet: String = Input::new()
            .with_prompt("Introduce el tipo de dieta (vegetariana, vegana, sin gluten, etc.)")
            .interact_text()?;
        let days: String = Input::new()
            .with_prompt("Introduce el número de días (3, 5 o 7)")
            .allow_empty(true)
            .interact_text()?;
        let meals: String = Input::new()
            .with_prompt("Introduce el número de comidas al día (1, 2 o 3)")
            .allow_empty(true)
            .interact_text()?;
        MenuRequest::parse(&diet, &days, &meals)
    }

    fn diet_type(&mut self) -> Result<String, InputError> {
        let diet: String = Input::new()
            .with_prompt("Introduce el tipo de dieta para las recetas")
            .interact_text()?;
        Ok(diet)
    }
}

/// Wraps a completion backend with an `indicatif` spinner that runs while
/// the request is in flight.
pub struct WithSpinner<C> {
    inner: C,
}

impl<C> WithSpinner<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Completion> Completion for WithSpinner<C> {
    fn complete(&self, prompt: &str) -> std::result::Result<String, ApiError> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Consultando al modelo...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = self.inner.complete(prompt);
        spinner.finish_and_clear();
        result
    }
}
