//! Terra Collector entry point
//!
//! The web build is driven from JavaScript through `platform::web`. The
//! native binary runs headless autopilot rounds and a sample city score.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Terra Collector (native) starting...");

    let options = native::Options::parse();

    if let Err(e) = native::run(&options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use terra_collector::GameTuning;
    use terra_collector::city::{CityLayout, ElementKind, evaluate};
    use terra_collector::sim::{GamePhase, GameState, advance, apply_input, autopilot, start_round};

    /// Autopilot re-steers every motion tick
    const STEP_MS: u64 = 16;

    #[derive(Parser, Debug)]
    #[command(name = "terra-collector")]
    #[command(about = "Headless Terra Collector rounds driven by the autopilot")]
    pub struct Options {
        /// Seed for the spawn RNG
        #[arg(long, default_value_t = 1999)]
        pub seed: u64,

        /// Rounds to play back to back
        #[arg(long, default_value_t = 1)]
        pub rounds: u32,

        /// JSON file overriding game tuning values
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    pub fn run(options: &Options) -> terra_collector::Result<()> {
        let tuning = match &options.tuning {
            Some(path) => {
                log::info!("Loading tuning from {}", path.display());
                let json = std::fs::read_to_string(path)?;
                GameTuning::from_json(&json)?
            }
            None => GameTuning::default(),
        };

        let mut state = GameState::new(options.seed, tuning);
        for round in 1..=options.rounds {
            start_round(&mut state)?;
            while state.phase == GamePhase::Playing {
                for event in autopilot::steer(&state) {
                    apply_input(&mut state, event);
                }
                advance(&mut state, STEP_MS);
            }
            println!(
                "Round {}: score {} ({} data points), high score {}",
                round,
                state.round.score,
                state.round.collected.len(),
                state.high_score.best()
            );
        }

        let mut layout = CityLayout::new();
        layout.set(ElementKind::Tree, 6);
        layout.set(ElementKind::SolarPanel, 4);
        layout.set(ElementKind::Road, 3);
        let eval = evaluate(&layout, None);
        println!(
            "Sample city: overall {:.1} ({:?} model) {:?}",
            eval.scores.overall(),
            eval.source,
            eval.scores
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use clap::CommandFactory;

        #[test]
        fn test_cli_definition_is_valid() {
            Options::command().debug_assert();
        }

        #[test]
        fn test_defaults() {
            let options = Options::try_parse_from(["terra-collector"]).unwrap();
            assert_eq!(options.seed, 1999);
            assert_eq!(options.rounds, 1);
            assert!(options.tuning.is_none());
        }

        #[test]
        fn test_equals_and_spaced_forms() {
            let options = Options::try_parse_from([
                "terra-collector",
                "--seed=5",
                "--rounds",
                "3",
                "--tuning=balance.json",
            ])
            .unwrap();
            assert_eq!(options.seed, 5);
            assert_eq!(options.rounds, 3);
            assert_eq!(options.tuning, Some(PathBuf::from("balance.json")));
        }

        #[test]
        fn test_help_and_bad_values() {
            let help = Options::try_parse_from(["terra-collector", "--help"]).unwrap_err();
            assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);

            let bad = Options::try_parse_from(["terra-collector", "--seed", "many"]).unwrap_err();
            assert_eq!(bad.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }
}
