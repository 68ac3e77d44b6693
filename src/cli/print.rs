use console::{style, StyledObject};
use std::fmt::Write;

use crate::batch::card::progress_bar;
use crate::batch::{Batch, CardBody, CardView, Emphasis};

const BAR_WIDTH: usize = 24;

fn accent<D>(value: D, emphasis: Emphasis) -> StyledObject<D> {
    match emphasis {
        Emphasis::Orange => style(value).color256(208),
        Emphasis::Blue => style(value).blue(),
        Emphasis::Purple => style(value).magenta(),
        Emphasis::Green => style(value).green(),
    }
}

/// Multi-line text rendering of one batch card.
pub fn format_card(batch: &Batch) -> String {
    let card = CardView::from_batch(batch);
    let emphasis = card.status.emphasis;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}  {}",
        style(&card.title).bold(),
        accent(format!("[{}]", card.status.label), emphasis).bold(),
        style(batch.id()).dim()
    );
    let _ = writeln!(out, "  {}", style(&card.date_line).dim());
    if let Some(intake) = &card.intake_line {
        let _ = writeln!(out, "  {}", intake);
    }

    match &card.body {
        CardBody::Progress {
            label, progress, sub_label, ..
        } => {
            let _ = writeln!(
                out,
                "  {}: {}",
                label,
                card.metric_line().unwrap_or_default()
            );
            let _ = writeln!(
                out,
                "  {} {:>3}%",
                accent(progress_bar(*progress, BAR_WIDTH), emphasis),
                progress.percent()
            );
            if let Some(sub) = sub_label {
                let _ = writeln!(out, "  {}", style(sub).dim());
            }
        }
        CardBody::Terminal {
            total_weight,
            action,
        } => {
            let _ = writeln!(out, "  Total Weight: {}", style(total_weight).bold());
            let _ = writeln!(out, "  {}", style(format!("→ {}", action)).green());
        }
    }

    if let Some(notes) = batch.intake().and_then(|i| i.notes.as_deref()) {
        let _ = writeln!(out, "  {}", style(format!("Notes: {}", notes)).italic());
    }

    out
}

pub fn print_cards<'a>(batches: impl IntoIterator<Item = &'a Batch>) {
    let mut any = false;
    for batch in batches {
        if any {
            println!();
        }
        print!("{}", format_card(batch));
        any = true;
    }
    if !any {
        println!("{}", style("No batches in this stage.").dim());
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
