//! Compare command - reward schemes side by side

use anyhow::Result;

use crate::{
    app::RunConfig,
    cli::output::print_section,
    pipeline::{ComparisonConfig, ComparisonFramework, PRESET_SCHEMES},
};

pub fn execute(config: &RunConfig) -> Result<()> {
    let framework = ComparisonFramework::new(ComparisonConfig::from(config));

    for (index, scheme) in PRESET_SCHEMES.into_iter().enumerate() {
        print_section(&format!("Testing Reward Scheme {}", index + 1));
        println!(
            "Win: {:.1}, Draw: {:.1}, Loss: {:.1}, Step: {:.1}",
            scheme.win, scheme.draw, scheme.loss, scheme.step
        );

        framework.run_scheme(index, scheme, |block| {
            println!("\nAfter {} iterations:", block.games_trained);
            for (algorithm, result) in &block.results {
                println!(
                    "{:<12} - Win: {:.1}%, Draw: {:.1}%",
                    algorithm.display_name(),
                    result.win_rate() * 100.0,
                    result.draw_rate() * 100.0
                );
            }
        })?;
    }

    Ok(())
}
