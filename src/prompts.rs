// Prompt construction. Plain string formatting: values are interpolated
// verbatim and no range checks are applied to the counts.

use crate::error::InputError;

/// What the user asked for when generating a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRequest {
    pub diet_type: String,
    /// Usually 3, 5 or 7.
    pub num_days: i64,
    /// Usually 1, 2 or 3.
    pub meals_per_day: i64,
}

impl MenuRequest {
    pub fn new(diet_type: impl Into<String>, num_days: i64, meals_per_day: i64) -> Self {
        Self {
            diet_type: diet_type.into(),
            num_days,
            meals_per_day,
        }
    }

    /// Build a request from raw console text. Fails if either count is not
    /// an integer.
    pub fn parse(diet_type: &str, num_days: &str, meals_per_day: &str) -> Result<Self, InputError> {
        let num_days = num_days.trim().parse()?;
        let meals_per_day = meals_per_day.trim().parse()?;
        Ok(Self::new(diet_type, num_days, meals_per_day))
    }

    pub fn prompt(&self) -> String {
        build_menu_prompt(&self.diet_type, self.num_days, self.meals_per_day)
    }
}

pub fn build_menu_prompt(diet_type: &str, num_days: i64, meals_per_day: i64) -> String {
    format!(
        "Genera un menú semanal de {} días para una persona que sigue una dieta {}, \
         con {} comidas al día. Asegúrate de incluir comidas variadas y balanceadas.",
        num_days, diet_type, meals_per_day
    )
}

pub fn build_recipe_prompt(diet_type: &str) -> String {
    format!("Sugiere algunas recetas para una dieta {}.", diet_type)
}
