mod canvas;
mod pacer;
mod surface;

use std::sync::{Arc, Mutex};

use liblife::{
    grid::CellState,
    pos::Position,
    sim::SimulationController,
};
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::{Key, NamedKey},
};

use canvas::{Canvas, Color};
use surface::{Surface, SurfaceConfig};

const WINDOW_SIZE: u32 = 600;
const TARGET_FPS: u64 = 30;
const CELL_MARGIN: u32 = 1;

const BACKDROP: Color = [10, 10, 10, 255];
const ALIVE: Color = [255, 255, 255, 255];
const DEAD: Color = [0, 0, 0, 255];

pub fn run(controller: SimulationController) -> anyhow::Result<()> {
    let view = Arc::new(Mutex::new(View {
        controller,
        cursor_cell: None,
        mouse_held: false,
        frame_width: WINDOW_SIZE,
        frame_height: WINDOW_SIZE,
    }));

    let draw_view = view.clone();
    let event_view = view.clone();

    let surface = Surface::new(SurfaceConfig {
        title: "game of life".to_owned(),
        width: WINDOW_SIZE,
        height: WINDOW_SIZE,
        target_fps: TARGET_FPS,
        draw_callback: Box::new(move |canvas| draw_view.lock().unwrap().draw(canvas)),
        event_callback: Box::new(move |event| event_view.lock().unwrap().on_event(event)),
    })?;

    surface.run()
}

struct View {
    controller: SimulationController,
    cursor_cell: Option<Position>,
    mouse_held: bool,
    frame_width: u32,
    frame_height: u32,
}

impl View {
    fn draw(&mut self, mut canvas: Canvas) {
        self.frame_width = canvas.width();
        self.frame_height = canvas.height();

        canvas.fill(BACKDROP);

        self.controller.with_grid(|grid| {
            let cell_width = canvas.width() / grid.size() as u32;
            let cell_height = canvas.height() / grid.size() as u32;

            for (pos, cell) in grid.enumerate_cells() {
                let color = match cell {
                    CellState::Alive => ALIVE,
                    CellState::Dead => DEAD,
                };

                canvas.fill_rect(
                    pos.column as u32 * cell_width + CELL_MARGIN,
                    pos.row as u32 * cell_height + CELL_MARGIN,
                    cell_width.saturating_sub(CELL_MARGIN * 2),
                    cell_height.saturating_sub(CELL_MARGIN * 2),
                    color,
                );
            }
        });
    }

    fn on_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse_held = state.is_pressed();

                if self.mouse_held {
                    self.toggle_under_cursor();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let previous = self.cursor_cell;
                self.cursor_cell = Some(self.cell_under(position.cast::<u32>()));

                // Dragging across the field toggles each cell it enters once.
                if self.mouse_held && self.cursor_cell != previous {
                    self.toggle_under_cursor();
                }
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match &event.logical_key {
                    Key::Named(NamedKey::Space) => {
                        if !self.controller.stop() {
                            self.controller.run();
                        }
                    }

                    Key::Character(c) if c.as_str() == "r" => {
                        self.controller.randomize();
                    }

                    _ => {}
                }
            }

            _ => {}
        }
    }

    fn cell_under(&self, cursor: winit::dpi::PhysicalPosition<u32>) -> Position {
        self.controller.with_grid(|grid| {
            let size = grid.size() as u32;

            Position {
                row: (cursor.y * size / self.frame_height.max(1)) as usize,
                column: (cursor.x * size / self.frame_width.max(1)) as usize,
            }
        })
    }

    fn toggle_under_cursor(&self) {
        if let Some(cell) = self.cursor_cell {
            // The controller rejects the edit while the simulation runs.
            self.controller.toggle_cell(cell);
        }
    }
}
