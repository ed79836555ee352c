//! The frame driver: window and context setup, one-time resource
//! construction, the per-frame loop and shutdown.

use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use glam::Vec3;
use glow::HasContext;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;

use crate::abs::{App, AttributeBinding, Filter, Mesh, ShaderProgram, Texture};
use crate::config::Config;
use crate::entity::Entity;
use crate::error::RenderError;

mod abs;
mod config;
mod entity;
mod error;
mod math;
mod room;

const CONFIG_PATH: &str = "roomgl.json";
const SHADER_DIR: &str = "shaders";
const MOVE_STEP: f32 = 0.05;
const ROTATE_STEP: f32 = 0.5;
const DRIFT_STEP: f32 = 0.1;
const DRIFT_LIMIT: f32 = 20.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

/// Adds the automatic sweep to this frame's x movement and reverses the
/// sweep once the scene's total x offset passes the limit. Keyboard movement
/// counts toward the offset, so steering into the edge also triggers the
/// bounce.
fn advance_drift(offset_x: &mut f32, drift: &mut f32, keyboard_dx: f32) -> f32 {
    let dx = keyboard_dx + *drift;
    *offset_x += dx;
    if offset_x.abs() > DRIFT_LIMIT {
        *drift = -*drift;
    }
    dx
}

fn run() -> Result<(), RenderError> {
    let config = Config::load(Path::new(CONFIG_PATH))?;
    let mut app = App::new(&config.title, config.width, config.height, config.fullscreen);
    let ctx = Rc::clone(&app.ctx);

    unsafe {
        ctx.gl().enable(glow::DEPTH_TEST);
    }
    ctx.set_viewport(0, 0, config.width as i32, config.height as i32);

    // One-time resource construction.
    let mesh = Rc::new(Mesh::build(
        &ctx,
        &room::ROOM_POSITIONS,
        &room::ROOM_INDICES,
        Some(&room::ROOM_UVS),
    ));
    let texture = Rc::new(match &config.texture {
        Some(path) => {
            let image = image::open(path).map_err(|e| RenderError::TextureLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            Texture::from_image(&ctx, &image, Filter::Nearest)
        }
        None => Texture::create(
            &ctx,
            room::TEST_TEXTURE_SIZE,
            room::TEST_TEXTURE_SIZE,
            &room::test_pixels(),
            Filter::Nearest,
        ),
    });
    log::debug!("texture: {}x{}", texture.width(), texture.height());
    let shader = Rc::new(ShaderProgram::load(
        &ctx,
        Path::new(SHADER_DIR),
        "room",
        &[
            AttributeBinding::Named("position"),
            AttributeBinding::Named("uv"),
        ],
    )?);

    // The projection is computed once and shared by every draw.
    let projection =
        math::projection_matrix(config.fov, config.near, config.far, config.aspect_ratio());
    shader.bind();
    shader.set_uniform(entity::UNIFORM_PROJECTION, projection);
    shader.unbind();

    let mut entities: Vec<Entity> = room::ROOM_OFFSETS
        .iter()
        .map(|&offset| {
            Entity::new(
                Rc::clone(&ctx),
                Rc::clone(&mesh),
                Rc::clone(&texture),
                Rc::clone(&shader),
                offset + room::VIEW_OFFSET,
            )
        })
        .collect();
    log::info!("scene ready: {} entities", entities.len());

    let frame_budget = Duration::from_secs_f32(1.0 / config.fps_cap as f32);
    let mut drift = DRIFT_STEP;
    let mut offset_x = 0.0_f32;

    'running: loop {
        let frame_start = Instant::now();

        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => ctx.set_viewport(0, 0, width, height),
                _ => {}
            }
        }

        let mut delta = Vec3::ZERO;
        let mut spin = Vec3::ZERO;
        {
            let keys = app.event_pump.keyboard_state();
            if keys.is_scancode_pressed(Scancode::Left) {
                delta.x -= MOVE_STEP;
            }
            if keys.is_scancode_pressed(Scancode::Right) {
                delta.x += MOVE_STEP;
            }
            if keys.is_scancode_pressed(Scancode::Up) {
                delta.y += MOVE_STEP;
            }
            if keys.is_scancode_pressed(Scancode::Down) {
                delta.y -= MOVE_STEP;
            }
            if keys.is_scancode_pressed(Scancode::W) {
                delta.z -= MOVE_STEP;
            }
            if keys.is_scancode_pressed(Scancode::S) {
                delta.z += MOVE_STEP;
            }
            if keys.is_scancode_pressed(Scancode::Q) {
                spin.z += ROTATE_STEP;
            }
            if keys.is_scancode_pressed(Scancode::E) {
                spin.z -= ROTATE_STEP;
            }
        }

        delta.x = advance_drift(&mut offset_x, &mut drift, delta.x);

        for entity in &mut entities {
            entity.translate(delta);
            if spin != Vec3::ZERO {
                entity.rotate(spin);
            }
        }

        ctx.clear(0.0, 0.0, 0.0, 1.0);
        for entity in &entities {
            entity.render();
        }
        app.window.gl_swap_window();

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }

    // Shared GPU resources are released in one sweep before the GL context
    // goes away with `app`.
    drop(entities);
    ctx.free_all();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_reverses_once_past_the_limit() {
        let mut offset = 0.0;
        let mut drift = 1.0;
        for _ in 0..DRIFT_LIMIT as usize {
            advance_drift(&mut offset, &mut drift, 0.0);
            assert!(drift > 0.0, "still inside the limit at offset {offset}");
        }
        advance_drift(&mut offset, &mut drift, 0.0);
        assert!(drift < 0.0);
    }

    #[test]
    fn keyboard_movement_counts_toward_the_bounce() {
        let mut offset = 0.0;
        let mut drift = DRIFT_STEP;
        let dx = advance_drift(&mut offset, &mut drift, DRIFT_LIMIT + 1.0);
        assert!(drift < 0.0);
        assert!((dx - (DRIFT_LIMIT + 1.0 + DRIFT_STEP)).abs() < 1e-4);
        assert!((offset - dx).abs() < 1e-4);
    }

    #[test]
    fn frame_movement_is_keyboard_plus_drift() {
        let mut offset = 0.0;
        let mut drift = DRIFT_STEP;
        let dx = advance_drift(&mut offset, &mut drift, -MOVE_STEP);
        assert!((dx - (DRIFT_STEP - MOVE_STEP)).abs() < 1e-6);
        assert!(drift > 0.0);
    }
}
