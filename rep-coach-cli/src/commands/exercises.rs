use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rep_coach_core::services::ExerciseCatalog;

#[derive(Args)]
pub struct ExercisesCommand {
    /// Only list exercises in this category (e.g. dumbbell)
    #[arg(short, long)]
    category: Option<String>,
}

impl ExercisesCommand {
    pub async fn execute(self) -> Result<()> {
        let catalog = ExerciseCatalog::new();
        let filter = self.category.as_deref().map(str::to_lowercase);

        println!("Available Exercises");
        println!("────────────────────────────────");

        let mut shown = 0;
        for (category, definitions) in catalog.by_category() {
            let label = category.to_string();
            if filter.as_ref().is_some_and(|f| *f != label.to_lowercase()) {
                continue;
            }

            println!();
            println!("{}", label.as_str().bold());
            for definition in definitions {
                println!(
                    "  {} {:<20} {}",
                    format!("{:<18}", definition.id()).as_str().cyan(),
                    definition.name,
                    definition.kind.tip().dimmed()
                );
                shown += 1;
            }
        }

        if shown == 0 {
            if let Some(category) = &self.category {
                println!();
                println!("No exercises in category '{}'", category);
            }
        }

        Ok(())
    }
}
