use std::{process::ExitCode, rc::Rc};

use crate::{
    cli::WindowArgs,
    demos::Scene,
    error::Error,
    frame_loop::{run_frames, LoopExit, WindowPresenter},
    gl::{GlBackend, Renderer},
    window::{Platform, Window},
};

/// Brings up the platform, a window and its context, runs the scene until the
/// window closes, then tears everything down in reverse order.
///
/// `load` receives the context and the requested window size. Anything
/// created before a failure is released before the error is returned.
pub fn run<S, F>(args: &WindowArgs, default_title: &str, load: F) -> Result<LoopExit, Error>
where
    S: Scene<glow::Context>,
    F: FnOnce(&Rc<glow::Context>, u32, u32) -> Result<S, Error>,
{
    let mut platform = Platform::init()?;
    let mut window = Window::new(&mut platform, args.width, args.height, args.title_or(default_title))?;
    let gl = window.current()?;

    let mut scene = load(&gl, args.width, args.height)?;

    let mut renderer = frame_renderer(&gl, args, window.size(), scene.depth_test());

    let exit = {
        let mut presenter = WindowPresenter::new(&mut platform, &mut window);
        run_frames(&mut presenter, &mut renderer, &mut scene)
    };

    scene.teardown();
    drop(renderer);
    drop(gl);
    window.destroy();
    platform.terminate();

    exit
}

/// The renderer for a window of `size`, cleared to the configured background.
fn frame_renderer<G: GlBackend>(
    gl: &Rc<G>,
    args: &WindowArgs,
    (width, height): (u32, u32),
    depth_test: bool,
) -> Renderer<G> {
    let renderer = Renderer::new(gl, width, height).background(args.background);
    if depth_test {
        renderer.with_depth_test()
    } else {
        renderer
    }
}

/// Process exit status for the outcome of [`run`].
///
/// A frame that ended in a GL error still exits with `0`: the loop stops and
/// teardown runs as on a normal close.
pub fn exit_code(outcome: Result<LoopExit, Error>) -> ExitCode {
    ExitCode::from(exit_status(&outcome))
}

fn exit_status(outcome: &Result<LoopExit, Error>) -> u8 {
    match outcome {
        Ok(LoopExit::Closed) => 0,
        Ok(LoopExit::GlError(code)) => {
            log::warn!("stopped on GL error 0x{code:04X}");
            0
        }
        Err(e) => {
            log::error!("{e}");
            e.exit_code()
        }
    }
}
