use fuelplan::Catalog;
use std::error::Error;
use std::io::{self, Write};

pub fn catalog_command() -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout().lock();
    for food in Catalog::builtin().entries() {
        writeln!(
            out,
            "{} ({}) [{}] {:.2} | carbs {} g, {} kcal, protein {} g",
            food.name, food.brand, food.kind, food.price, food.carbs, food.calories, food.protein
        )?;
    }
    Ok(())
}
