use std::{io, process::exit};

use anyhow::{Context, bail};
use colored::Colorize;
use liblife::sim::{SimulationController, SimulationState};

pub fn run(controller: SimulationController) {
    for line_res in io::stdin().lines() {
        let Ok(line) = line_res else {
            return;
        };

        match handle_command(&controller, line.split_whitespace()) {
            Ok(feedback) => println!("{}", feedback.green()),
            Err(e) => eprintln!("{} {e:#}", "!".red()),
        }
    }
}

fn handle_command<'a, I>(controller: &SimulationController, mut args: I) -> anyhow::Result<String>
where
    I: Iterator<Item = &'a str>,
{
    let feedback = match args.next().context("no command")? {
        "run" => {
            if controller.run() {
                "running".to_owned()
            } else {
                "already running".to_owned()
            }
        }

        "stop" => {
            if controller.stop() {
                "stopped".to_owned()
            } else {
                "already stopped".to_owned()
            }
        }

        "random" => {
            if controller.randomize() {
                "randomized".to_owned()
            } else {
                "ignored while running".to_owned()
            }
        }

        "toggle" => {
            let row = args.next().context("missing row")?.parse::<usize>()?;
            let column = args.next().context("missing column")?.parse::<usize>()?;

            if controller.toggle_cell([row, column]) {
                format!("toggled {row} {column}")
            } else if controller.state() == SimulationState::Running {
                "ignored while running".to_owned()
            } else {
                bail!("cell {row} {column} is out of bounds");
            }
        }

        "state" => {
            let state = match controller.state() {
                SimulationState::Running => "running",
                SimulationState::Stopped => "stopped",
            };
            let population = controller.with_grid(|grid| grid.population());

            format!("{state}, {population} alive")
        }

        "exit" => exit(0),

        other => bail!("unknown command {other:?}"),
    };

    Ok(feedback)
}
