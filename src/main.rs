use std::time::Instant;

use sdl2::event::{Event, WindowEvent};
use sdl2::messagebox::MessageBoxFlag;

use crate::abs::App;
use crate::scene::CubeScene;

mod abs;
mod camera;
mod cube;
mod scene;

const WINDOW_TITLE: &str = "Spincube";
const WINDOW_WIDTH: u32 = 640;
const WINDOW_HEIGHT: u32 = 480;

fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn main() {
    setup_logger().expect("failed to initialise logging");

    let mut app = App::new(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT);

    // The context is current from here on, so GPU resources can be built.
    // A failed pipeline build is fatal: report it and close the window.
    let mut scene = match CubeScene::new(&app.gl, WINDOW_WIDTH, WINDOW_HEIGHT) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("failed to build the render pipeline: {e}");
            let _ = sdl2::messagebox::show_simple_message_box(
                MessageBoxFlag::ERROR,
                WINDOW_TITLE,
                &format!("Failed to build the render pipeline:\n\n{e}"),
                &app.window,
            );
            return;
        }
    };

    let mut last_frame_time = Instant::now();

    'running: loop {
        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => {
                    scene.resize(width as u32, height as u32);
                }
                _ => {}
            }
        }

        scene.render();
        app.window.gl_swap_window();

        // The swap returns once the frame is on screen (vsync), so the
        // elapsed time below is one presentation interval.
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;
        scene.frame_presented(delta_time);
    }

    // `scene` drops before `app`, so the buffers and program are deleted
    // while their context is still current.
    log::info!("shutting down");
}
