// src/output.rs
use crate::paths::PricePath;
use crate::scenario::{Evaluation, PayoffSeries};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write the price path and payoff marks side by side, one row per period.
pub fn write_series_to_csv<P: AsRef<Path>>(
    filename: P,
    path: Option<&PricePath>,
    payoff: &PayoffSeries,
) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "period,price,payoff")?;
    for point in payoff.points() {
        match path.and_then(|p| p.price_at(point.period)) {
            Some(price) => writeln!(file, "{},{},{}", point.period, price, point.level)?,
            None => writeln!(file, "{},,{}", point.period, point.level)?,
        }
    }
    Ok(())
}

pub fn write_summary_to_csv<P: AsRef<Path>>(filename: P, evaluation: &Evaluation) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "scenario,{}", evaluation.scenario.label())?;
    writeln!(file, "terminal_payoff,{}", evaluation.terminal_payoff)?;
    for event in &evaluation.events {
        writeln!(file, "{:?},{},{}", event.kind, event.period, event.price)?;
    }
    writeln!(file, "narrative,\"{}\"", evaluation.narrative)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductTerms;
    use crate::scenario::evaluate;

    #[test]
    fn test_series_csv_layout() {
        let terms = ProductTerms::builder().term(2).build().unwrap();
        let path = PricePath::from_prices(vec![100.0, 101.0, 102.0]).unwrap();
        let evaluation = evaluate(&path, &terms).unwrap();

        let target = std::env::temp_dir().join(format!("snowball-series-{}.csv", std::process::id()));
        write_series_to_csv(&target, Some(&path), &evaluation.payoff).unwrap();
        let contents = std::fs::read_to_string(&target).unwrap();
        std::fs::remove_file(&target).ok();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "period,price,payoff");
        assert!(lines[1].starts_with("0,100,100"));
    }
}
