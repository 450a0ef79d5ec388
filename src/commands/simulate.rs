//! Generate a synthetic input file of random records.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rankdigest_lib::io::write_records_json;
use rankdigest_lib::record::Record;
use rankdigest_lib::validation::{validate_output_dir, validate_positive};

use crate::commands::command::Command;

const FIRST_NAMES: &[&str] = &[
    "Ona", "Jonas", "Rita", "Lukas", "Greta", "Matas", "Ieva", "Tomas", "Austeja", "Paulius",
    "Egle", "Mantas", "Migle", "Darius", "Ruta", "Karolis",
];

const FIRST_YEAR: i32 = 2015;
const LAST_YEAR: i32 = 2024;

/// Write a JSON input file of random records.
#[derive(Debug, Parser)]
#[command(
    name = "simulate",
    about = "\x1b[38;5;166m[UTILITIES]\x1b[0m      \x1b[36mGenerate a synthetic input file\x1b[0m",
    long_about = r#"
Generate a synthetic input file of random records for `rankdigest run`.

Years are drawn from 2015-2024 and grades from 1.0-10.0 in steps of 0.1, so roughly a third of
the records pass the default --min-score of 7.

Example usage:
  rankdigest simulate -o students.json -n 1000 --seed 42
"#
)]
pub struct Simulate {
    /// Output JSON file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Number of records to generate
    #[arg(short = 'n', long = "count", default_value = "1000")]
    pub count: usize,

    /// Random seed for reproducibility
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

impl Command for Simulate {
    fn execute(&self, _command_line: &str) -> Result<()> {
        validate_positive(self.count, "count")?;
        validate_output_dir(&self.output, "Output JSON")?;

        info!("Starting Simulate");
        info!("Output: {}", self.output.display());
        info!("Records: {}", self.count);
        if let Some(seed) = self.seed {
            info!("Random seed: {seed}");
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        write_records_json(&self.output, generate_records(self.count, &mut rng))?;

        info!("Wrote {} records to {}", self.count, self.output.display());
        Ok(())
    }
}

/// Draws `count` random records.
pub fn generate_records<R: Rng>(count: usize, rng: &mut R) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
            let year = rng.random_range(FIRST_YEAR..=LAST_YEAR);
            let grade = f64::from(rng.random_range(10..=100_u32)) / 10.0;
            let gender = if rng.random_bool(0.5) { "F" } else { "M" };
            Record::new(
                format!("{first}{i}"),
                format!("{}{i}", first.to_lowercase()),
                gender,
                year,
                grade,
            )
        })
        .collect()
}
