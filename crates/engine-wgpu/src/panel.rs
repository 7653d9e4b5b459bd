use std::collections::HashSet;

use glam::Vec2;

/// One recorded panel widget, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelWidget {
    Label(String),
    Radio { label: String, active: bool },
    SameLine,
    Button(String),
}

/// Replays the frame callback's widget stream into an egui window.
///
/// The callback records widgets and queries clicks while it runs; egui only
/// sees the stream afterwards, when the frame is composited. Click answers
/// therefore lag the pointer by one frame, which is invisible at interactive
/// rates.
pub struct PanelBridge {
    title: String,
    width: f32,
    widgets: Vec<PanelWidget>,
    clicked: HashSet<String>,
}

impl Default for PanelBridge {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 0.0,
            widgets: Vec::new(),
            clicked: HashSet::new(),
        }
    }
}

impl PanelBridge {
    /// Start a window for this frame. `size` is in meters; only the width is
    /// used, scaled to points.
    pub fn begin(&mut self, title: &str, size: Vec2) {
        self.title = title.to_string();
        self.width = size.x;
        self.widgets.clear();
    }

    pub fn label(&mut self, text: &str) {
        self.widgets.push(PanelWidget::Label(text.to_string()));
    }

    pub fn radio(&mut self, label: &str, active: bool) -> bool {
        self.widgets.push(PanelWidget::Radio {
            label: label.to_string(),
            active,
        });
        self.clicked.remove(label)
    }

    pub fn same_line(&mut self) {
        self.widgets.push(PanelWidget::SameLine);
    }

    pub fn button(&mut self, label: &str) -> bool {
        self.widgets.push(PanelWidget::Button(label.to_string()));
        self.clicked.remove(label)
    }

    /// Replay the recorded stream into egui. Clicks collected here answer
    /// next frame's queries.
    pub fn show(&mut self, ctx: &egui::Context) {
        let mut clicked = HashSet::new();
        if !self.widgets.is_empty() {
            let grouped = rows(&self.widgets);
            // meters to points, close enough for a preview window
            let width = if self.width > 0.0 {
                self.width * 1000.0
            } else {
                240.0
            };
            egui::Window::new(self.title.clone())
                .default_width(width)
                .show(ctx, |ui| {
                    for row in grouped {
                        if row.len() == 1 {
                            Self::widget(ui, row[0], &mut clicked);
                        } else {
                            ui.horizontal(|ui| {
                                for w in row {
                                    Self::widget(ui, w, &mut clicked);
                                }
                            });
                        }
                    }
                });
        }
        self.clicked = clicked;
    }

    fn widget(ui: &mut egui::Ui, widget: &PanelWidget, clicked: &mut HashSet<String>) {
        match widget {
            PanelWidget::Label(text) => {
                ui.label(text);
            }
            PanelWidget::Radio { label, active } => {
                if ui.radio(*active, label).clicked() {
                    clicked.insert(label.clone());
                }
            }
            PanelWidget::Button(label) => {
                if ui.button(label).clicked() {
                    clicked.insert(label.clone());
                }
            }
            PanelWidget::SameLine => {}
        }
    }
}

/// Group the widget stream into layout rows: a SameLine marker joins the
/// following widget onto the current row.
fn rows(widgets: &[PanelWidget]) -> Vec<Vec<&PanelWidget>> {
    let mut grouped: Vec<Vec<&PanelWidget>> = Vec::new();
    let mut join_next = false;
    for widget in widgets {
        match widget {
            PanelWidget::SameLine => join_next = true,
            other => {
                match grouped.last_mut() {
                    Some(row) if join_next => row.push(other),
                    _ => grouped.push(vec![other]),
                }
                join_next = false;
            }
        }
    }
    grouped
}
