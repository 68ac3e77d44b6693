use console::style;
use dialoguer::{Input, Select};
use std::io::{self, IsTerminal};
use tracing::{debug, info};

use super::print::{print_cards, print_json};
use crate::batch::{
    resolve, BatchCollection, BatchError, BatchFactory, BatchId, NewBatchForm, Stage, StageFilter,
    Variety,
};
use crate::config::Config;

/// Flag values for `invisi new`; anything left out is prompted for on a TTY.
#[derive(Debug, Default)]
pub struct NewBatchArgs {
    pub weight: Option<String>,
    pub variety: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub json: bool,
}

/// The collection every non-dashboard command starts from.
fn session_collection(config: &Config) -> BatchCollection {
    if config.batches.seed_mock_data {
        BatchCollection::seeded()
    } else {
        BatchCollection::new()
    }
}

pub fn list(config: &Config, stage: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let collection = session_collection(config);
    let stage_filter = match stage {
        Some(token) => token.parse::<StageFilter>()?,
        None => StageFilter::All,
    };

    let batches = collection.filtered(stage_filter);
    debug!(filter = %stage_filter, count = batches.len(), "Listing batches");

    if json {
        print_json(&batches)?;
    } else {
        println!(
            "{}",
            style(format!("{} ({})", stage_filter.title(), batches.len())).bold()
        );
        let counts = collection.counts_by_stage();
        let breakdown: Vec<String> = Stage::ALL
            .iter()
            .map(|stage| format!("{} {}", resolve(*stage).label, counts.get(stage).copied().unwrap_or(0)))
            .collect();
        println!("{}", style(breakdown.join(" · ")).dim());
        println!();
        print_cards(batches);
    }
    Ok(())
}

pub fn show(config: &Config, id: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let collection = session_collection(config);

    match collection.get(&BatchId::new(id)) {
        Ok(batch) if json => print_json(batch)?,
        Ok(batch) => print_cards([batch]),
        Err(e @ BatchError::NotFound(_)) => {
            eprintln!("{}", style(format!("✗ {}", e)).red());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub fn new(config: &Config, args: NewBatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = chrono::Local::now().date_naive();
    let blank = NewBatchForm::blank(today);
    let interactive = io::stdin().is_terminal();

    let form = NewBatchForm {
        weight: match args.weight {
            Some(w) => w,
            None if interactive => Input::new()
                .with_prompt("Total Weight (kg)")
                .interact_text()?,
            None => String::new(),
        },
        variety: match args.variety {
            Some(v) => v,
            None if interactive => {
                let names: Vec<&str> = Variety::ALL.iter().map(|v| v.name()).collect();
                let choice = Select::new()
                    .with_prompt("Variety")
                    .items(&names)
                    .default(0)
                    .interact()?;
                names[choice].to_string()
            }
            None => blank.variety,
        },
        date: match args.date {
            Some(d) => d,
            None if interactive => Input::new()
                .with_prompt("Start Date (YYYY-MM-DD)")
                .default(blank.date)
                .interact_text()?,
            None => blank.date,
        },
        notes: match args.notes {
            Some(n) => n,
            None if interactive => Input::new()
                .with_prompt("Notes (optional)")
                .allow_empty(true)
                .interact_text()?,
            None => String::new(),
        },
    };

    let mut collection = session_collection(config);
    let factory = BatchFactory::new(config.batches.fermentation_days);

    let label = match collection.submit(&factory, &form) {
        Ok(batch) => batch.label().to_string(),
        Err(BatchError::Validation(errors)) => {
            eprintln!("{}", style("✗ Batch not created:").red().bold());
            for error in errors.errors() {
                eprintln!("  - {}", error);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    info!(label = %label, "Batch created");

    if args.json {
        print_json(collection.as_slice())?;
    } else {
        println!("{}", style(format!("✓ {} started fermenting", label)).green());
        println!(
            "{}",
            style("Batches live for this session only; nothing was saved.").dim()
        );
        println!();
        print_cards(collection.iter());
    }
    Ok(())
}
