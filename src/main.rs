use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info, warn};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetManager;
use engine::game_loop::GameLoop;
use engine::renderer::{GlyphAtlas, Renderer, SpriteBatch};
use game::hud::draw_paused;
use game::{GameSettings, Roster, Session};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Duel...");

    let settings = GameSettings::from_env();
    let (canvas_width, canvas_height) = (settings.arena.width, settings.arena.height);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Rusted Duel")
            .with_inner_size(winit::dpi::LogicalSize::new(canvas_width, canvas_height))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        canvas_width,
        canvas_height,
    ))?;

    let mut assets = AssetManager::new(&settings.asset_root);
    info!("Loading assets from {}", settings.asset_root.display());
    let roster = Roster::load(&mut assets, &settings.arena);

    let mut session = Session::new(&settings, roster);
    let mut batch = SpriteBatch::new(canvas_width, canvas_height, GlyphAtlas::hud()?);
    let mut game_loop = GameLoop::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                renderer.resize(physical_size);
            }
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(code),
                                state,
                                repeat: false,
                                ..
                            },
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if code == KeyCode::KeyP {
                    if pressed {
                        game_loop.toggle_pause();
                    }
                } else if !game_loop.is_paused() {
                    session.handle_key(code, pressed);
                }
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let ticks = game_loop.begin_frame();
                for _ in 0..ticks {
                    session.tick(game_loop.tick_duration(), &mut batch);
                }
                // The banner is drawn for this present only
                let before_banner = game_loop.is_paused().then(|| {
                    let mark = batch.mark();
                    draw_paused(&mut batch);
                    mark
                });

                if game_loop.frame_count() % 600 == 0 {
                    debug!(
                        "{:.1} fps, {} ticks, {} quads",
                        game_loop.fps(),
                        game_loop.tick_count(),
                        batch.quad_count()
                    );
                }

                let result = renderer.render(&batch);
                if let Some(mark) = before_banner {
                    batch.rewind(mark);
                }

                match result {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        warn!("Surface lost, reconfiguring");
                        renderer.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("Out of GPU memory, shutting down");
                        elwt.exit();
                    }
                    Err(e) => warn!("Dropped frame: {:?}", e),
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
