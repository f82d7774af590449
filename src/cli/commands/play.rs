//! Play command - a human against an agent in the terminal
//!
//! The agent always opens as player one; the human answers as player two by
//! entering a cell number from 1 to 9. Input and output are generic so the
//! loop can be driven from tests.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::{
    app::{AgentKind, App},
    ports::Agent,
    tictactoe::{Game, GameOutcome, Player},
};

/// Read one trimmed line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn announce<W: Write>(output: &mut W, outcome: GameOutcome) -> Result<()> {
    let message = match outcome {
        GameOutcome::Win(Player::One) => "Agent wins!",
        GameOutcome::Win(Player::Two) => "You win!",
        GameOutcome::Draw => "It's a draw!",
    };
    writeln!(output, "{message}")?;
    Ok(())
}

/// Play one game. Returns `None` if the input ran out mid-game.
pub fn play_against<R: BufRead, W: Write>(
    agent: &mut dyn Agent,
    input: &mut R,
    output: &mut W,
) -> Result<Option<GameOutcome>> {
    let mut game = Game::new();

    loop {
        let position = agent.choose_action(game.board())?;
        game.play(position)?;
        writeln!(output, "\nAgent plays position {}:\n{}", position + 1, game.board())?;
        if let Some(outcome) = game.outcome() {
            announce(output, outcome)?;
            return Ok(Some(outcome));
        }

        loop {
            write!(output, "Enter your move (1-9): ")?;
            output.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            let played = line
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=9).contains(n))
                .is_some_and(|n| game.play(n - 1).is_ok());
            if played {
                break;
            }
            writeln!(output, "Invalid move, try again")?;
        }

        writeln!(output, "\nYour move:\n{}", game.board())?;
        if let Some(outcome) = game.outcome() {
            announce(output, outcome)?;
            return Ok(Some(outcome));
        }
    }
}

/// Menu loop: choose an opponent, play, repeat until the human stops.
pub fn execute<R: BufRead, W: Write>(app: &App, input: &mut R, output: &mut W) -> Result<()> {
    writeln!(output, "=== Play Against AI ===")?;

    loop {
        writeln!(output, "\nChoose your opponent:")?;
        for (i, kind) in AgentKind::ALL.iter().enumerate() {
            writeln!(output, "{}. {kind}", i + 1)?;
        }
        let exit = AgentKind::ALL.len() + 1;
        writeln!(output, "{exit}. Exit")?;
        write!(output, "Enter your choice: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            break;
        };
        let choice = line.parse::<usize>().ok();
        if choice == Some(exit) {
            writeln!(output, "Thanks for playing!")?;
            break;
        }
        let Some(kind) = choice
            .and_then(|c| c.checked_sub(1))
            .and_then(|i| AgentKind::ALL.get(i).copied())
        else {
            writeln!(output, "Invalid choice, please try again")?;
            continue;
        };

        let mut agent = app.create_agent(kind, Player::One);
        app.load_or_warn(agent.as_mut());
        if let Some(learner) = agent.as_learning_mut() {
            learner.set_evaluating(true);
        }

        writeln!(output, "\nPlaying against {kind} agent")?;
        if play_against(agent.as_mut(), input, output)?.is_none() {
            break;
        }

        write!(output, "\nPlay another game? (y/n): ")?;
        output.flush()?;
        let again = read_line(input)?;
        if again.as_deref() != Some("y") {
            writeln!(output, "Thanks for playing!")?;
            break;
        }
    }

    Ok(())
}
