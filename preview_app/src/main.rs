//! Headless model preview demo
//!
//! Loads an OBJ file through the viewer pipeline and drives a short
//! scripted session: mount, inspect the normalization, spin the camera,
//! toggle wireframe, and report how many frames the demand-driven loop
//! actually produced.

mod obj_source;

use model_viewer::foundation::time::Timer;
use model_viewer::prelude::*;
use obj_source::ObjSource;
use std::rc::Rc;

const SESSION_FRAMES: u32 = 600;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let model_path = std::env::args().nth(1).ok_or("usage: preview <model.obj>")?;

    let surface = Rc::new(HeadlessSurface);
    let mut viewer = Viewer::new(ObjSource::default(), surface, ViewerConfig::default());
    viewer.set_model(Some(&model_path));
    viewer.poll()?;

    let model = viewer.mounted().ok_or("model did not mount")?;
    log::info!(
        "Model mounted: {} nodes, scale {:.3}, ground at y = {:.3}",
        model.graph.node_count(),
        model.normalization.scale,
        model.normalization.ground_y
    );
    viewer.recenter();

    // Scripted session: a drag, a wireframe toggle, then idle auto-rotation.
    viewer.drag_rotate(200.0, 80.0, 600.0);
    viewer.set_wireframe(true);
    viewer.set_auto_rotate(true);

    let mut timer = Timer::new();
    let mut frames_rendered = 0u32;
    for step in 0..SESSION_FRAMES {
        timer.update();
        if step == SESSION_FRAMES / 2 {
            viewer.set_auto_rotate(false);
        }
        if viewer.run_frame(timer.delta_time()) {
            frames_rendered += 1;
            let pose = viewer.camera_pose();
            log::debug!(
                "Frame {step}: camera at ({:.2}, {:.2}, {:.2})",
                pose.position.x,
                pose.position.y,
                pose.position.z
            );
        }
    }

    log::info!(
        "Session finished: {frames_rendered} of {SESSION_FRAMES} steps produced a frame \
         in {:.2}s",
        timer.total_time()
    );
    Ok(())
}
