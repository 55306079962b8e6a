use std::{path::PathBuf, sync::mpsc::Receiver};

use config::Colors;
use three_d::{
    degrees, vec3, window, Camera, Context, Degrees, FrameInput, FrameOutput, InnerSpace,
    OrbitControl, Vec3, Viewport, WindowError, WindowSettings,
};

use crate::{
    gui::{Gui, Status},
    scene::{to_vec3, Scene},
    update::{Update, Updater},
};

/// An application window.
pub struct Window {
    inner: window::Window,
    updater: Updater,
    receiver: Receiver<Update>,
}

impl Window {
    /// Creates a new window.
    ///
    /// # Errors
    ///
    /// Returns a [`WindowError`] the window could not be created.
    pub fn try_new() -> Result<Self, WindowError> {
        let inner = window::Window::new(WindowSettings {
            title: "Shoring calculator".to_owned(),
            ..Default::default()
        })?;
        let (updater, receiver) = Updater::channel();

        Ok(Self {
            inner,
            updater,
            receiver,
        })
    }

    /// Returns an updater for sending updates to the window.
    #[must_use]
    pub fn updater(&self) -> Updater {
        self.updater.clone()
    }

    /// Runs the render loop, exporting cut lists to the given path. This is blocking until
    /// the window is closed.
    pub fn run_render_loop(self, export_path: PathBuf) {
        let mut application = Application::new(&self.inner, self.receiver, export_path);

        self.inner.render_loop(move |frame_input| {
            application.handle_events(frame_input);
            FrameOutput::default()
        });
    }
}

/// An application rendering an interactive scene and GUI.
struct Application {
    control: OrbitControl,
    camera: Camera,
    scene: Scene,
    colors: Colors,
    receiver: Receiver<Update>,
    gui: Gui,
}

impl Application {
    const DEFAULT_FOV: Degrees = degrees(22.5);

    /// Creates a new application given a window and the receiving end of an update channel.
    fn new(window: &window::Window, receiver: Receiver<Update>, export_path: PathBuf) -> Self {
        const DEFAULT_TARGET: Vec3 = vec3(0.0, 0.0, 1.0);
        const DEFAULT_DISTANCE: f32 = 8.0;

        let context = window.gl();
        let (camera, control) = Self::frame(window.viewport(), DEFAULT_TARGET, DEFAULT_DISTANCE);
        let colors = Colors::default();
        let scene = Scene::empty(&colors);
        let gui = Gui::new(&context, export_path);

        Self {
            control,
            camera,
            scene,
            colors,
            receiver,
            gui,
        }
    }

    /// Creates a camera and orbit control looking at the target from the given distance.
    fn frame(viewport: Viewport, target: Vec3, distance: f32) -> (Camera, OrbitControl) {
        let camera = Camera::new_perspective(
            viewport,
            target + vec3(0.6, -1.0, 0.5).normalize_to(distance),
            target,
            Vec3::unit_z(),
            Self::DEFAULT_FOV,
            0.01,
            1000.0,
        );
        let control = OrbitControl::new(target, 0.1 * distance, 10.0 * distance);

        (camera, control)
    }

    /// Handles events for the given frame input.
    fn handle_events(&mut self, mut frame_input: FrameInput) {
        self.gui.update(&mut frame_input);

        #[allow(clippy::cast_possible_truncation)]
        let viewport = Viewport {
            x: (Gui::SIDE_PANEL_WIDTH * frame_input.device_pixel_ratio) as i32,
            y: 0,
            #[allow(clippy::cast_sign_loss)]
            width: frame_input.viewport.width.saturating_sub(
                (Gui::SIDE_PANEL_WIDTH * frame_input.device_pixel_ratio) as u32,
            ),
            height: frame_input.viewport.height,
        };
        self.camera.set_viewport(viewport);
        self.control
            .handle_events(&mut self.camera, &mut frame_input.events);

        // Only the latest update matters, older ones are superseded
        if let Some(update) = self.receiver.try_iter().last() {
            self.handle_update(&frame_input.context, update);
        }

        let screen = frame_input.screen();
        self.scene.render(&self.camera, &screen);
        self.gui.render(&screen);
    }

    /// Replaces the scene and the status shown in the GUI.
    fn handle_update(&mut self, context: &Context, update: Update) {
        match update {
            Update::Calculated {
                state,
                cut_list,
                colors,
            } => {
                self.scene = match state.scene() {
                    Some(scene) => {
                        if let Some(bounds) = scene.bounds() {
                            #[allow(clippy::cast_possible_truncation)]
                            let distance = (2.5 * bounds.diameter()).max(1.0) as f32;
                            (self.camera, self.control) = Self::frame(
                                self.camera.viewport(),
                                to_vec3(bounds.center()),
                                distance,
                            );
                        }
                        Scene::from_model(context, scene, &colors)
                    }
                    None => Scene::empty(&colors),
                };
                self.colors = colors;
                self.gui.set_status(Status::Calculated { state, cut_list });
            }
            Update::Unreadable(message) => {
                self.scene = Scene::empty(&self.colors);
                self.gui.set_status(Status::Unreadable(message));
            }
        }
    }
}
