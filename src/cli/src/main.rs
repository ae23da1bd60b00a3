use clap::Parser;
use color_eyre::eyre::bail;
use cube_core::{format_moves, parse_moves, Cube};
use solver::Solver;

/// Scrambles and solves the 3x3x3 cube with a two-phase search
#[derive(Parser)]
#[command(version, about)]
enum Commands {
    /// Print a random scramble and the facelet string it produces
    Scramble {
        /// Number of random face turns
        #[arg(long, default_value_t = 20)]
        moves: usize,
    },
    /// Solve a move sequence or a 54-character facelet string
    Solve {
        /// Either moves like "R U R' U2" or facelets like "UUUU...BBB"
        state: String,
    },
    /// Check whether a 54-character facelet string is reachable from solved
    Check {
        facelets: String,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::builder().format_timestamp(None).init();

    match Commands::parse() {
        Commands::Scramble { moves } => {
            let mut cube = Cube::new();
            let scramble = cube.scramble(moves);
            println!("{}", format_moves(&scramble));
            println!("{cube}");
        }
        Commands::Solve { state } => {
            let cube = parse_state(&state)?;
            if cube.is_solved() {
                println!("already solved");
                return Ok(());
            }
            if !cube.is_solvable() {
                bail!("that cube state is not reachable from solved");
            }

            let solution = Solver::solve(&cube);
            if solution.is_empty() {
                bail!("no solution found within the move bound");
            }
            println!("{} ({})", format_moves(&solution), solution.len());
        }
        Commands::Check { facelets } => {
            let cube = Cube::try_from(facelets.as_str())?;
            if cube.is_solvable() {
                println!("solvable");
            } else {
                println!("unsolvable");
            }
        }
    }

    Ok(())
}

/// A 54-character run of face letters is a facelet string; anything else is
/// read as a move sequence applied to the solved cube.
fn parse_state(state: &str) -> color_eyre::Result<Cube> {
    let trimmed = state.trim();
    if trimmed.len() == 54 && trimmed.chars().all(|c| "UDLRFB".contains(c)) {
        return Ok(Cube::try_from(trimmed)?);
    }
    let mut cube = Cube::new();
    cube.apply_all(&parse_moves(trimmed)?);
    Ok(cube)
}
