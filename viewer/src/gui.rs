use std::{
    fs,
    path::{Path, PathBuf},
};

use config::{ValidationError, MISSING_DATA_MESSAGE};
use cutlist::CutList;
use model::{Calculation, Error, State};
use three_d::{
    egui::{Align, Color32, Grid, Layout, RichText, ScrollArea, SidePanel, Ui},
    Context, FrameInput, RenderTarget, GUI,
};

const ERROR_COLOR: Color32 = Color32::from_rgb(0xE0, 0x4A, 0x3C);
const WARNING_COLOR: Color32 = Color32::from_rgb(0xF0, 0xB4, 0x29);

/// What the side panel currently reports.
#[derive(Default)]
pub enum Status {
    /// No form has been read yet.
    #[default]
    Waiting,
    /// The form file could not be read.
    Unreadable(String),
    /// The form was passed through the pipeline.
    Calculated {
        /// The state of the calculator.
        state: State,
        /// The cut list of the rendered scene.
        cut_list: Option<CutList>,
    },
}

/// A graphical user interface showing the calculation status and the cut list.
pub struct Gui {
    inner: GUI,
    panel: Panel,
}

impl Gui {
    /// The width of the side panel in logical pixels.
    pub const SIDE_PANEL_WIDTH: f32 = 320.0;

    /// Creates a new GUI for the given context, exporting cut lists to the given path.
    pub fn new(context: &Context, export_path: PathBuf) -> Self {
        let inner = GUI::new(context);

        Self {
            inner,
            panel: Panel {
                status: Status::default(),
                export_path,
                export_message: None,
            },
        }
    }

    /// Replaces the reported status.
    pub fn set_status(&mut self, status: Status) {
        self.panel.status = status;
        self.panel.export_message = None;
    }

    /// Updates the GUI using the given frame input.
    pub fn update(&mut self, frame_input: &mut FrameInput) {
        let Self { inner, panel } = self;

        inner.update(
            &mut frame_input.events,
            frame_input.accumulated_time,
            frame_input.viewport,
            frame_input.device_pixel_ratio,
            |context| {
                SidePanel::left("side_panel")
                    .exact_width(Self::SIDE_PANEL_WIDTH)
                    .resizable(false)
                    .show(context, |ui| panel.show(ui));
            },
        );
    }

    /// Renders the GUI to the given render target.
    pub fn render(&self, render_target: &RenderTarget) {
        render_target
            .write(|| self.inner.render())
            .expect("rendering the gui should never fail");
    }
}

/// The contents of the side panel.
struct Panel {
    status: Status,
    export_path: PathBuf,
    export_message: Option<String>,
}

impl Panel {
    fn show(&mut self, ui: &mut Ui) {
        ui.add_space(8.0);
        ui.label(RichText::new("Shoring calculator").strong().size(16.0));
        ui.add_space(4.0);

        ScrollArea::vertical().show(ui, |ui| match &self.status {
            Status::Waiting => {
                ui.label("Waiting for the form file");
            }
            Status::Unreadable(message) => {
                ui.colored_label(ERROR_COLOR, message);
            }
            Status::Calculated { state, cut_list } => match state {
                State::Idle => {
                    ui.label("Nothing calculated yet");
                }
                State::Invalid(Error::Validation(error)) => show_validation_error(ui, error),
                State::Invalid(error) => {
                    ui.colored_label(ERROR_COLOR, error.to_string());
                }
                State::Rendered(calculation) => {
                    show_calculation(ui, calculation);

                    if let Some(cut_list) = cut_list {
                        let exported = show_cut_list(ui, cut_list);
                        if exported {
                            self.export_message = Some(export(cut_list, &self.export_path));
                        }
                    }
                    if let Some(message) = &self.export_message {
                        ui.label(message);
                    }
                }
            },
        });
    }
}

fn show_validation_error(ui: &mut Ui, error: &ValidationError) {
    ui.colored_label(ERROR_COLOR, RichText::new(MISSING_DATA_MESSAGE).strong());

    for failure in error.failures() {
        ui.colored_label(ERROR_COLOR, format!("{} ({})", failure.field, failure.reason));
    }
}

fn show_calculation(ui: &mut Ui, calculation: &Calculation) {
    ui.label(RichText::new(calculation.scene.archetype().name()).strong());

    for warning in &calculation.warnings {
        ui.colored_label(WARNING_COLOR, warning.to_string());
    }

    parameters_section(ui, "Measurements", |ui| {
        Grid::new("measurements").striped(true).show(ui, |ui| {
            for (field, value) in calculation.record.fields() {
                ui.label(field.key());
                value_label(ui, format!("{value}"));
                ui.end_row();
            }
        });
    });

    parameters_section(ui, "Derived quantities", |ui| {
        Grid::new("derived").striped(true).show(ui, |ui| {
            for (name, value) in calculation.derived.lengths() {
                ui.label(name);
                value_label(ui, format!("{:.1} cm", value * 100.0));
                ui.end_row();
            }
        });
    });
}

/// Shows the cut list, returns true if exporting it was requested.
fn show_cut_list(ui: &mut Ui, cut_list: &CutList) -> bool {
    let mut exported = false;

    parameters_section(ui, "Cut list", |ui| {
        for row in cut_list.rows() {
            ui.label(row.to_string());
        }
        ui.label(format!("Total length: {:.2} m", cut_list.total_length()));
        exported = ui.button("Export CSV").clicked();
    });

    exported
}

fn export(cut_list: &CutList, path: &Path) -> String {
    match fs::write(path, cut_list.to_csv_file()) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "exported cut list");
            format!("Exported to {}", path.display())
        }
        Err(error) => {
            tracing::error!("failed to export cut list: {error}");
            format!("Export failed: {error}")
        }
    }
}

fn value_label(ui: &mut Ui, text: String) {
    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
        ui.label(text);
    });
}

/// Shows a titled section of the side panel.
fn parameters_section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.add_space(8.0);
    ui.separator();
    ui.label(RichText::new(title).strong());
    add_contents(ui);
}
