use dice_prob::DiceProb;
use std::io::{self, BufRead, Write};

fn report(line: &str) -> dice_prob::Result<()> {
    let mut prob = DiceProb::new(line)?;
    let normalized = prob.normalized();
    let rolled = prob.roll()?;
    let calc = prob.calculate()?;

    println!("Expression:   {}", normalized);
    println!("Bounds:       {} to {}", calc.min(), calc.max());
    println!("Rolled:       {}", rolled);
    println!("Outcomes:     {{{}}}", calc.outcome_strings().join(", "));
    println!("Permutations: {}", calc.permutations());
    println!();
    println!("{:>8} | {:>20} | {:>11}", "Outcome", "Frequency", "Probability");
    println!("{:->8}-+-{:->20}-+-{:->11}", "", "", "");
    for (outcome, frequency) in calc.distribution() {
        println!(
            "{:>8} | {:>20} | {:>10.6}%",
            outcome,
            frequency,
            calc.probability(*outcome) * 100.0
        );
    }
    Ok(())
}

/// Joins command-line arguments into one expression, so `dizeprob 3d6 + 2` works unquoted.
fn expression_from_args(args: impl IntoIterator<Item = String>) -> Option<String> {
    let words: Vec<_> = args.into_iter().collect();
    let expression = words.join(" ");
    if expression.trim().is_empty() {
        None
    } else {
        Some(expression)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    if let Some(expression) = expression_from_args(std::env::args().skip(1)) {
        report(&expression)?;
        return Ok(());
    }

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            if let Err(why) = report(line) {
                eprintln!("Error: {}", why);
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    println!();
    Ok(())
}
