use std::thread;

use liblife::sim::SimulationController;

mod console;
mod render;

/// The widget's fixed field size.
const GRID_SIZE: usize = 75;

fn main() -> anyhow::Result<()> {
    let controller = SimulationController::new(GRID_SIZE)?;

    let console_controller = controller.clone();
    thread::spawn(move || console::run(console_controller));

    render::run(controller)
}
